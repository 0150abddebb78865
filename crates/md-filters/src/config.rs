/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Filter configuration.
//!
//! Values are layered, later layers winning:
//!
//! 1. built-in defaults ([`FilterConfig::default`])
//! 2. the `md-filters` map in the document metadata
//! 3. explicit overrides from the command line or environment
//!    ([`ConfigOverrides`])
//!
//! ```yaml
//! md-filters:
//!   filters: [h1hr, bq, graphviz, mermaid, op]
//!   image-root: build
//!   header-style: "border-bottom:2px solid #999999"
//! ```

use crate::errors::{FilterError, Result};
use crate::utils::diagnostic_collector::DiagnosticCollector;
use md_pandoc_types::{Meta, MetaValue};
use std::path::PathBuf;

/// Metadata key holding the filter configuration map.
pub const METADATA_KEY: &str = "md-filters";

/// Filters run when nothing else is configured, in order.
pub const DEFAULT_FILTERS: &[&str] = &["h1hr", "bq", "mermaid", "op"];

pub const DEFAULT_HEADER_STYLE: &str = "border-bottom:1px solid #cccccc";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Filter names, run as separate passes in this order
    pub filters: Vec<String>,
    /// Directory under which `<kind>-images` cache directories live.
    /// Empty means the working directory Pandoc was started from.
    pub image_root: PathBuf,
    /// Inline style added to level-1 headers
    pub header_style: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            filters: DEFAULT_FILTERS.iter().map(|s| s.to_string()).collect(),
            image_root: PathBuf::new(),
            header_style: DEFAULT_HEADER_STYLE.to_string(),
        }
    }
}

/// Overrides coming from outside the document.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub filters: Option<Vec<String>>,
    pub image_root: Option<PathBuf>,
    pub header_style: Option<String>,
}

impl FilterConfig {
    /// Resolve the effective configuration for a document.
    pub fn resolve(
        meta: &Meta,
        overrides: &ConfigOverrides,
        diagnostics: &mut DiagnosticCollector,
    ) -> Self {
        let mut config = Self::default();
        config.merge_metadata(meta, diagnostics);
        config.merge_overrides(overrides);
        config
    }

    /// Merge the `md-filters` metadata map. Malformed or unknown entries are
    /// reported as warnings and otherwise ignored.
    pub fn merge_metadata(&mut self, meta: &Meta, diagnostics: &mut DiagnosticCollector) {
        let Some(value) = meta.get(METADATA_KEY) else {
            return;
        };
        let Some(map) = value.as_map() else {
            diagnostics.warn(format!("'{}' metadata must be a map", METADATA_KEY));
            return;
        };

        for (key, value) in map {
            match key.as_str() {
                "filters" => match value.as_text_list() {
                    Some(filters) => self.filters = filters,
                    None => diagnostics.warn(format!(
                        "'{}.filters' must be a list of filter names",
                        METADATA_KEY
                    )),
                },
                "image-root" => match value.as_text() {
                    Some(root) => self.image_root = PathBuf::from(root),
                    None => warn_not_text(diagnostics, key),
                },
                "header-style" => match value.as_text() {
                    Some(style) => self.header_style = style,
                    None => warn_not_text(diagnostics, key),
                },
                other => diagnostics.warn(format!(
                    "Unknown key '{}.{}' ignored",
                    METADATA_KEY, other
                )),
            }
        }
    }

    /// Reject settings no filter could work with.
    pub fn validate(&self) -> Result<()> {
        if self.image_root.exists() && !self.image_root.is_dir() {
            return Err(FilterError::config(format!(
                "image root '{}' is not a directory",
                self.image_root.display()
            )));
        }
        Ok(())
    }

    pub fn merge_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(filters) = &overrides.filters {
            self.filters = filters.clone();
        }
        if let Some(root) = &overrides.image_root {
            self.image_root = root.clone();
        }
        if let Some(style) = &overrides.header_style {
            self.header_style = style.clone();
        }
    }
}

fn warn_not_text(diagnostics: &mut DiagnosticCollector, key: &str) {
    diagnostics.warn(format!(
        "'{}.{}' must be a single value",
        METADATA_KEY, key
    ));
}

/// Convenience for building a metadata map in tests and callers that
/// assemble documents programmatically.
pub fn config_metadata(entries: Vec<(&str, MetaValue)>) -> MetaValue {
    MetaValue::MetaMap(
        entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect(),
    )
}
