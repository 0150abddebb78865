/*
 * errors.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for md-filters

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid Pandoc JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unsupported pandoc-api-version {0:?}")]
    UnsupportedApiVersion(Vec<u32>),

    #[error("Unknown filter '{name}'. Available: {available}")]
    UnknownFilter { name: String, available: String },

    #[error("Could not find '{tool}' on PATH (set {env_var} to its location)")]
    RendererNotFound {
        tool: &'static str,
        env_var: &'static str,
    },

    #[error("'{}' exited with status {status}: {stderr}", tool.display())]
    RendererFailed {
        tool: PathBuf,
        status: i32,
        stderr: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Transform error in '{transform}': {message}")]
    Transform { transform: String, message: String },
}

impl FilterError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
