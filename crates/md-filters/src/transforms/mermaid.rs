/*
 * mermaid.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Transform that renders Mermaid code blocks to SVG images.
 */

use std::ffi::OsStr;

use md_pandoc_types::{Block, CodeBlock, Pandoc};

use crate::diagram::{DiagramCache, content_hash, image_url};
use crate::errors::Result;
use crate::filter_context::FilterContext;
use crate::filters::{Filter, FilterReturn, bottomup_traverse};
use crate::tools::run_renderer;
use crate::transform::AstTransform;

/// Replaces ```` ```mermaid ```` blocks with an image rendered by `mmdc`.
///
/// The source is kept next to the image as `<hash>.mmd`.
pub struct MermaidTransform;

impl AstTransform for MermaidTransform {
    fn name(&self) -> &str {
        "mermaid"
    }

    fn transform(&self, ast: &mut Pandoc, ctx: &mut FilterContext) -> Result<()> {
        let mut filter = Filter::new().with_code_block(|code_block, ctx| {
            if !code_block.attr.has_class("mermaid") {
                return FilterReturn::Unchanged(code_block);
            }
            match render(&code_block, ctx) {
                Ok(block) => FilterReturn::FilterResult(vec![block]),
                Err(e) => {
                    ctx.error(format!("mermaid: {}", e));
                    FilterReturn::Unchanged(code_block)
                }
            }
        });
        *ast = bottomup_traverse(std::mem::take(ast), &mut filter, ctx);
        Ok(())
    }
}

fn render(code_block: &CodeBlock, ctx: &FilterContext) -> Result<Block> {
    let cache = DiagramCache::new(&ctx.config.image_root, "mermaid");
    let hash = content_hash(&code_block.text);
    let source = cache.path_for(&hash, "mmd");
    let image = cache.path_for(&hash, "svg");

    if !image.is_file() {
        let mmdc = ctx.tools.mmdc()?;
        cache.ensure_dir()?;
        std::fs::write(&source, &code_block.text)?;
        cache.render_image(&image, |output| {
            run_renderer(
                mmdc,
                &[
                    OsStr::new("-i"),
                    source.as_os_str(),
                    OsStr::new("-o"),
                    output.as_os_str(),
                ],
                None,
            )
        })?;
        tracing::info!("Created image {}", image.display());
    } else {
        tracing::debug!(image = %image.display(), "Reusing cached image");
    }

    let caption = code_block.attr.get("caption").unwrap_or("");
    Ok(Block::image_paragraph(image_url(&image), caption))
}
