/*
 * filter_context.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Context for filter execution: target format, configuration, renderer
//! discovery and diagnostics.

use crate::config::FilterConfig;
use crate::tools::RendererTools;
use crate::utils::diagnostic_collector::{Diagnostic, DiagnosticCollector};

/// Context for filter execution.
///
/// This context is threaded through filter traversal functions so that
/// callbacks can read the target format and configuration and emit warnings
/// and errors without aborting the walk.
pub struct FilterContext {
    /// Output format Pandoc is converting to, without extension suffixes
    pub format: String,
    pub config: FilterConfig,
    pub tools: RendererTools,
    /// Accumulated diagnostics (warnings and non-fatal errors)
    pub diagnostics: DiagnosticCollector,
}

impl FilterContext {
    /// Create a context with default configuration and no renderer paths.
    pub fn new(format: &str) -> Self {
        Self {
            format: base_format(format).to_string(),
            config: FilterConfig::default(),
            tools: RendererTools::default(),
            diagnostics: DiagnosticCollector::new(),
        }
    }

    pub fn with_config(mut self, config: FilterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_tools(mut self, tools: RendererTools) -> Self {
        self.tools = tools;
        self
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.diagnostics.warn(message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.diagnostics.error(message);
    }

    /// Check if any errors were collected
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.diagnostics.diagnostics()
    }

    /// Consume context and return diagnostics
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics.into_diagnostics()
    }
}

/// Strip extension modifiers from a Pandoc format name:
/// `html5+smart-raw_tex` becomes `html5`.
pub fn base_format(format: &str) -> &str {
    format.find(['+', '-']).map_or(format, |end| &format[..end])
}
