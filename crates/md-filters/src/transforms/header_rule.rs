/*
 * header_rule.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform that adds a bottom border to level-1 headers.
 */

use md_pandoc_types::{Block, Pandoc};

use crate::errors::Result;
use crate::filter_context::FilterContext;
use crate::filters::{Filter, FilterReturn, bottomup_traverse};
use crate::transform::AstTransform;

/// Sets the `style` attribute of every `<h1>` to the configured header
/// style, overwriting any style already present. Other levels are left
/// alone.
pub struct HeaderRuleTransform;

impl AstTransform for HeaderRuleTransform {
    fn name(&self) -> &str {
        "h1hr"
    }

    fn transform(&self, ast: &mut Pandoc, ctx: &mut FilterContext) -> Result<()> {
        let style = ctx.config.header_style.clone();
        let mut filter = Filter::new().with_header(move |mut header, _ctx| {
            if header.level != 1 {
                return FilterReturn::Unchanged(header);
            }
            header.attr.set("style", style.as_str());
            FilterReturn::FilterResult(vec![Block::Header(header)])
        });
        *ast = bottomup_traverse(std::mem::take(ast), &mut filter, ctx);
        Ok(())
    }
}
