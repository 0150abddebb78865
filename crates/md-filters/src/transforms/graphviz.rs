/*
 * graphviz.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform that renders Graphviz code blocks to images.
 */

use std::ffi::{OsStr, OsString};

use md_pandoc_types::{Block, CodeBlock, Pandoc};

use crate::diagram::{DiagramCache, content_hash, image_url};
use crate::errors::Result;
use crate::filter_context::FilterContext;
use crate::filters::{Filter, FilterReturn, bottomup_traverse};
use crate::tools::run_renderer;
use crate::transform::AstTransform;

/// Replaces ```` ```graphviz ```` blocks with an image rendered by `dot`.
pub struct GraphvizTransform;

impl AstTransform for GraphvizTransform {
    fn name(&self) -> &str {
        "graphviz"
    }

    fn transform(&self, ast: &mut Pandoc, ctx: &mut FilterContext) -> Result<()> {
        let mut filter = Filter::new().with_code_block(|code_block, ctx| {
            if !code_block.attr.has_class("graphviz") {
                return FilterReturn::Unchanged(code_block);
            }
            match render(&code_block, ctx) {
                Ok(block) => FilterReturn::FilterResult(vec![block]),
                Err(e) => {
                    ctx.error(format!("graphviz: {}", e));
                    FilterReturn::Unchanged(code_block)
                }
            }
        });
        *ast = bottomup_traverse(std::mem::take(ast), &mut filter, ctx);
        Ok(())
    }
}

/// Image type `dot` should produce for a target format.
fn image_type(format: &str) -> &'static str {
    match format {
        "latex" => "pdf",
        _ => "png",
    }
}

fn render(code_block: &CodeBlock, ctx: &FilterContext) -> Result<Block> {
    let filetype = image_type(&ctx.format);
    let cache = DiagramCache::new(&ctx.config.image_root, "graphviz");
    let image = cache.path_for(&content_hash(&code_block.text), filetype);

    if !image.is_file() {
        let dot = ctx.tools.dot()?;
        cache.ensure_dir()?;
        let type_flag = OsString::from(format!("-T{}", filetype));
        cache.render_image(&image, |output| {
            run_renderer(
                dot,
                &[type_flag.as_os_str(), OsStr::new("-o"), output.as_os_str()],
                Some(code_block.text.as_bytes()),
            )
        })?;
        tracing::info!("Created image {}", image.display());
    }

    let caption = code_block.attr.get("caption").unwrap_or("");
    Ok(Block::image_paragraph(image_url(&image), caption))
}
