/*
 * diagram.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! On-disk cache for rendered diagram images.
//!
//! Images are named by the SHA-1 of the diagram source, so an unchanged
//! diagram is never re-rendered: if the image file exists, it is reused.
//! Renderers write to a staging file that is moved into place only after
//! they succeed, so a failed render never leaves an image behind.

use crate::errors::Result;
use sha1::{Digest, Sha1};
use std::path::{Path, PathBuf};

/// Lowercase hex SHA-1 of the diagram source.
pub fn content_hash(code: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(code.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect()
}

/// A directory of cached images for one diagram kind.
#[derive(Debug, Clone)]
pub struct DiagramCache {
    dir: PathBuf,
}

impl DiagramCache {
    /// Cache for `kind` under `root`, i.e. `<root>/<kind>-images`.
    pub fn new(root: &Path, kind: &str) -> Self {
        Self {
            dir: root.join(format!("{}-images", kind)),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, hash: &str, extension: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", hash, extension))
    }

    /// Create the cache directory if needed.
    ///
    /// Another process creating it at the same moment is not an error.
    pub fn ensure_dir(&self) -> Result<()> {
        if self.dir.is_dir() {
            return Ok(());
        }
        std::fs::create_dir_all(&self.dir)?;
        tracing::info!("Created directory {}", self.dir.display());
        Ok(())
    }

    /// Run `render` against a staging path in the cache directory and move
    /// the result to `image` if it succeeds. The staging file keeps the
    /// image's extension, since some renderers pick the output format from
    /// it. On error the staging file is removed and `image` is untouched.
    pub fn render_image<F>(&self, image: &Path, render: F) -> Result<()>
    where
        F: FnOnce(&Path) -> Result<()>,
    {
        let suffix = image
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let staging = tempfile::Builder::new()
            .prefix(".render-")
            .suffix(&suffix)
            .tempfile_in(&self.dir)?;
        render(staging.path())?;
        staging.persist(image).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Render a path the way it should appear as an image URL.
pub fn image_url(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
