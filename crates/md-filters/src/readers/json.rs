/*
 * json.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::errors::{FilterError, Result};
use crate::utils::diagnostic_collector::DiagnosticCollector;
use md_pandoc_types::{PANDOC_API_VERSION, Pandoc};

/// Read a Pandoc JSON document, as Pandoc hands it to a filter.
///
/// A document from a different pandoc-types major.minor is still accepted,
/// with a warning added to `diagnostics`: the constructors the filters
/// touch rarely change.
pub fn read<R: std::io::Read>(
    reader: &mut R,
    diagnostics: &mut DiagnosticCollector,
) -> Result<Pandoc> {
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;
    let pandoc: Pandoc = serde_json::from_str(&buffer)?;
    check_api_version(&pandoc.api_version, diagnostics)?;
    Ok(pandoc)
}

fn check_api_version(version: &[u32], diagnostics: &mut DiagnosticCollector) -> Result<()> {
    if version.is_empty() {
        return Err(FilterError::UnsupportedApiVersion(version.to_vec()));
    }
    if version.iter().take(2).ne(PANDOC_API_VERSION.iter().take(2)) {
        diagnostics.warn(format!(
            "Document pandoc-api-version {:?} differs from the supported version {:?}",
            version, PANDOC_API_VERSION
        ));
    }
    Ok(())
}
