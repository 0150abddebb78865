/*
 * json.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::errors::Result;
use md_pandoc_types::Pandoc;

/// Write the document as compact Pandoc JSON.
///
/// The API version is written as read, so Pandoc sees the version it sent.
pub fn write<W: std::io::Write>(pandoc: &Pandoc, writer: &mut W) -> Result<()> {
    serde_json::to_writer(&mut *writer, pandoc)?;
    writer.flush()?;
    Ok(())
}
