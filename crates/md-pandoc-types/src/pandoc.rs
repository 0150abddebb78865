/*
 * pandoc.rs
 * Copyright (c) 2025 Posit, PBC
 */

pub use crate::block::Blocks;
pub use crate::meta::Meta;
use serde::{Deserialize, Serialize};

/// The pandoc-types API version these definitions mirror.
pub const PANDOC_API_VERSION: [u32; 3] = [1, 23, 1];

/*
 * A data structure that mimics Pandoc's `data Pandoc` type, plus the API
 * version Pandoc stamps on every JSON document it hands to a filter.
 */

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pandoc {
    #[serde(rename = "pandoc-api-version")]
    pub api_version: Vec<u32>,
    pub meta: Meta,
    pub blocks: Blocks,
}

impl Default for Pandoc {
    fn default() -> Self {
        Pandoc {
            api_version: PANDOC_API_VERSION.to_vec(),
            meta: Meta::new(),
            blocks: vec![],
        }
    }
}
