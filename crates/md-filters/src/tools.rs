/*
 * tools.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Discovery and invocation of the external diagram renderers.
//!
//! Each renderer is looked up in this order:
//! 1. an environment variable naming the binary (`MD_FILTERS_MMDC`,
//!    `MD_FILTERS_DOT`), if it points at an existing file
//! 2. the system `PATH` via `which`

use crate::errors::{FilterError, Result};
use crate::utils::diagnostic_collector::DiagnosticCollector;
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub const MMDC_ENV: &str = "MD_FILTERS_MMDC";
pub const DOT_ENV: &str = "MD_FILTERS_DOT";

/// Paths to the external renderers available for this run.
#[derive(Debug, Clone, Default)]
pub struct RendererTools {
    /// mermaid-cli binary
    pub mmdc: Option<PathBuf>,
    /// Graphviz `dot` binary
    pub dot: Option<PathBuf>,
}

impl RendererTools {
    /// Discover renderers from environment and PATH. An override that does
    /// not name a file is reported as a warning.
    pub fn discover(diagnostics: &mut DiagnosticCollector) -> Self {
        Self {
            mmdc: find_binary("mmdc", MMDC_ENV, std::env::var_os(MMDC_ENV), diagnostics),
            dot: find_binary("dot", DOT_ENV, std::env::var_os(DOT_ENV), diagnostics),
        }
    }

    pub fn mmdc(&self) -> Result<&Path> {
        self.mmdc.as_deref().ok_or(FilterError::RendererNotFound {
            tool: "mmdc",
            env_var: MMDC_ENV,
        })
    }

    pub fn dot(&self) -> Result<&Path> {
        self.dot.as_deref().ok_or(FilterError::RendererNotFound {
            tool: "dot",
            env_var: DOT_ENV,
        })
    }
}

fn find_binary(
    name: &str,
    env_var: &str,
    override_path: Option<OsString>,
    diagnostics: &mut DiagnosticCollector,
) -> Option<PathBuf> {
    if let Some(path) = override_path.map(PathBuf::from) {
        if path.is_file() {
            return Some(path);
        }
        diagnostics.warn(format!(
            "{}={} does not name a file; looking for '{}' on PATH",
            env_var,
            path.display(),
            name
        ));
    }
    which::which(name).ok()
}

/// Run a renderer to completion, optionally feeding `stdin`.
///
/// Output is captured rather than shown; on a non-zero exit the captured
/// stderr becomes part of the error.
pub fn run_renderer(program: &Path, args: &[&OsStr], stdin: Option<&[u8]>) -> Result<()> {
    tracing::debug!(program = %program.display(), ?args, "Running renderer");

    let mut child = Command::new(program)
        .args(args)
        .stdin(if stdin.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
        pipe.write_all(input)?;
    }
    // stdin is dropped here, signaling EOF to the renderer

    let output = child.wait_with_output()?;
    if !output.status.success() {
        return Err(FilterError::RendererFailed {
            tool: program.to_owned(),
            status: output.status.code().unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(())
}
