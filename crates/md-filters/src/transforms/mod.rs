/*
 * transforms/mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! The document filters.
//!
//! - [`HeaderRuleTransform`] (`h1hr`) - underlines level-1 headers
//! - [`BlockQuoteTransform`] (`bq`) - turns `bq`/`std` Divs into blockquotes
//! - [`GraphvizTransform`] (`graphviz`) - renders Graphviz code blocks to images
//! - [`MermaidTransform`] (`mermaid`) - renders Mermaid code blocks to SVG
//! - [`OperatorCodeTransform`] (`op`) - styles inline operator code
//!
//! These implement [`AstTransform`] and are assembled into a
//! [`TransformPipeline`](crate::transform::TransformPipeline) by name.

mod blockquote;
mod graphviz;
mod header_rule;
mod mermaid;
mod operator_code;

pub use blockquote::BlockQuoteTransform;
pub use graphviz::GraphvizTransform;
pub use header_rule::HeaderRuleTransform;
pub use mermaid::MermaidTransform;
pub use operator_code::OperatorCodeTransform;

use crate::transform::AstTransform;

/// Every filter name accepted in configuration, in canonical order.
pub const AVAILABLE_FILTERS: &[&str] = &["h1hr", "bq", "graphviz", "mermaid", "op"];

pub fn transform_by_name(name: &str) -> Option<Box<dyn AstTransform>> {
    match name {
        "h1hr" => Some(Box::new(HeaderRuleTransform)),
        "bq" => Some(Box::new(BlockQuoteTransform)),
        "graphviz" => Some(Box::new(GraphvizTransform)),
        "mermaid" => Some(Box::new(MermaidTransform)),
        "op" => Some(Box::new(OperatorCodeTransform)),
        _ => None,
    }
}
