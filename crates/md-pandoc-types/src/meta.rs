/*
 * meta.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::block::{Block, Blocks};
use crate::inline::{Inlines, inlines_to_text};
use hashlink::LinkedHashMap;
use serde::{Deserialize, Serialize};

/// Document metadata, in the order Pandoc emitted it.
pub type Meta = LinkedHashMap<String, MetaValue>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum MetaValue {
    MetaMap(LinkedHashMap<String, MetaValue>),
    MetaList(Vec<MetaValue>),
    MetaBool(bool),
    MetaString(String),
    MetaInlines(Inlines),
    MetaBlocks(Blocks),
}

impl MetaValue {
    /// Plain-text reading of a scalar value.
    ///
    /// YAML scalars reach filters as `MetaInlines`, so those are stringified;
    /// a single `Plain`/`Para` block is accepted as well.
    pub fn as_text(&self) -> Option<String> {
        match self {
            MetaValue::MetaString(s) => Some(s.clone()),
            MetaValue::MetaInlines(inlines) => Some(inlines_to_text(inlines)),
            MetaValue::MetaBlocks(blocks) => match blocks.as_slice() {
                [Block::Plain(p)] => Some(inlines_to_text(&p.content)),
                [Block::Paragraph(p)] => Some(inlines_to_text(&p.content)),
                _ => None,
            },
            MetaValue::MetaBool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&LinkedHashMap<String, MetaValue>> {
        match self {
            MetaValue::MetaMap(map) => Some(map),
            _ => None,
        }
    }

    /// Read a list of scalars. A lone scalar is treated as a one-item list.
    pub fn as_text_list(&self) -> Option<Vec<String>> {
        match self {
            MetaValue::MetaList(items) => items.iter().map(MetaValue::as_text).collect(),
            other => other.as_text().map(|s| vec![s]),
        }
    }
}
