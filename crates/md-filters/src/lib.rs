/*
 * lib.rs
 * Copyright (c) 2025 Posit, PBC
 */

pub mod config;
pub mod diagram;
pub mod errors;
pub mod filter_context;
pub mod filters;
pub mod readers;
pub mod tools;
pub mod transform;
pub mod transforms;
pub mod utils;
pub mod writers;

pub use errors::{FilterError, Result};
