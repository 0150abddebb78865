/*
 * operator_code.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform that wraps operator code spans in styled raw HTML.
 */

use md_pandoc_types::{Inline, Pandoc};

use crate::errors::Result;
use crate::filter_context::FilterContext;
use crate::filters::{Filter, FilterReturn, bottomup_traverse};
use crate::transform::AstTransform;

/// Rewrites `` `<=`{.op} `` to `<code><span class="op">&lt;=</span></code>`.
///
/// The result is an HTML raw inline whatever the target format; writers
/// for other formats drop it, as they do any foreign raw content.
pub struct OperatorCodeTransform;

impl AstTransform for OperatorCodeTransform {
    fn name(&self) -> &str {
        "op"
    }

    fn transform(&self, ast: &mut Pandoc, ctx: &mut FilterContext) -> Result<()> {
        let mut filter = Filter::new().with_code(|code, _ctx| {
            if !code.attr.has_class("op") {
                return FilterReturn::Unchanged(code);
            }
            FilterReturn::FilterResult(vec![operator_html(&code.text)])
        });
        *ast = bottomup_traverse(std::mem::take(ast), &mut filter, ctx);
        Ok(())
    }
}

pub(crate) fn operator_html(text: &str) -> Inline {
    Inline::raw_html(format!(
        "<code><span class=\"op\">{}</span></code>",
        escape_html(text)
    ))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}
