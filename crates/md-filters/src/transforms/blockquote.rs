/*
 * blockquote.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform that turns marked Divs into blockquotes.
 */

//! Blockquote Div transform.
//!
//! ```markdown
//! ::: bq
//! Quoted text.
//! :::
//! ```
//!
//! A Div whose only class is `bq` becomes a plain `BlockQuote` (the Div's
//! identifier and attributes have nowhere to go and are dropped).
//!
//! A Div carrying the `std` class is rebuilt around a `BlockQuote` of its
//! content. Only the classes carry over; identifier and key-value
//! attributes are dropped.

use md_pandoc_types::{Attr, Block, BlockQuote, Div, Pandoc};

use crate::errors::Result;
use crate::filter_context::FilterContext;
use crate::filters::{Filter, FilterReturn, bottomup_traverse};
use crate::transform::AstTransform;

pub struct BlockQuoteTransform;

impl AstTransform for BlockQuoteTransform {
    fn name(&self) -> &str {
        "bq"
    }

    fn transform(&self, ast: &mut Pandoc, ctx: &mut FilterContext) -> Result<()> {
        let mut filter = Filter::new().with_div(|div, _ctx| convert_div(div));
        *ast = bottomup_traverse(std::mem::take(ast), &mut filter, ctx);
        Ok(())
    }
}

fn convert_div(div: Div) -> FilterReturn<Div, Vec<Block>> {
    if div.attr.classes == ["bq"] {
        return FilterReturn::FilterResult(vec![Block::BlockQuote(BlockQuote {
            content: div.content,
        })]);
    }

    if div.attr.has_class("std") {
        return FilterReturn::FilterResult(vec![Block::Div(Div {
            attr: Attr {
                classes: div.attr.classes,
                ..Attr::default()
            },
            content: vec![Block::BlockQuote(BlockQuote {
                content: div.content,
            })],
        })]);
    }

    FilterReturn::Unchanged(div)
}
