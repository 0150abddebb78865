/*
 * filters.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Callback-driven traversal of the Pandoc AST.
//!
//! A [`Filter`] carries optional callbacks for the node kinds it cares
//! about. Traversal is bottom-up, matching Pandoc's own `walk`: the children
//! of a node are filtered before the node itself, and whatever a callback
//! returns is spliced in place without being visited again.

use crate::filter_context::FilterContext;
use md_pandoc_types::{
    Block, BlockQuote, Blocks, BulletList, Caption, Cell, Cite, Code, CodeBlock, DefinitionList,
    Div, Emph, Figure, Header, Image, Inline, Inlines, LineBlock, Link, Meta, MetaValue, Note,
    OrderedList, Pandoc, Paragraph, Plain, Quoted, Row, SmallCaps, Span, Strikeout, Strong,
    Subscript, Superscript, Table, TableBody, TableFoot, TableHead, Underline,
};

// filters are destructive and take ownership of the input

pub enum FilterReturn<T, U> {
    Unchanged(T),
    FilterResult(U), // replacement content, spliced in place of the node
}

type InlineFilterFn<'a, T> = Box<dyn FnMut(T, &mut FilterContext) -> FilterReturn<T, Inlines> + 'a>;
type BlockFilterFn<'a, T> = Box<dyn FnMut(T, &mut FilterContext) -> FilterReturn<T, Blocks> + 'a>;
type InlineFilterField<'a, T> = Option<InlineFilterFn<'a, T>>;
type BlockFilterField<'a, T> = Option<BlockFilterFn<'a, T>>;

pub struct Filter<'a> {
    pub inlines: InlineFilterField<'a, Inlines>,
    pub blocks: BlockFilterField<'a, Blocks>,

    pub inline: InlineFilterField<'a, Inline>,
    pub block: BlockFilterField<'a, Block>,

    pub code: InlineFilterField<'a, Code>,

    pub code_block: BlockFilterField<'a, CodeBlock>,
    pub header: BlockFilterField<'a, Header>,
    pub div: BlockFilterField<'a, Div>,
}

impl Default for Filter<'static> {
    fn default() -> Filter<'static> {
        Filter {
            inlines: None,
            blocks: None,
            inline: None,
            block: None,
            code: None,
            code_block: None,
            header: None,
            div: None,
        }
    }
}

impl Filter<'static> {
    pub fn new() -> Filter<'static> {
        Self::default()
    }
}

macro_rules! define_filter_with_methods {
    ($return:ident, $($method:ident => $field:ident : $ty:ty),* $(,)?) => {
        impl<'a> Filter<'a> {
            $(
                pub fn $method<F>(mut self, filter: F) -> Filter<'a>
                where
                    F: FnMut($ty, &mut FilterContext) -> FilterReturn<$ty, $return> + 'a,
                {
                    self.$field = Some(Box::new(filter));
                    self
                }
            )*
        }
    };
}

define_filter_with_methods!(
    Inlines,
    with_inlines => inlines: Inlines,
    with_inline => inline: Inline,
    with_code => code: Code,
);

define_filter_with_methods!(
    Blocks,
    with_blocks => blocks: Blocks,
    with_block => block: Block,
    with_code_block => code_block: CodeBlock,
    with_header => header: Header,
    with_div => div: Div,
);

macro_rules! handle_inline_filter {
    ($variant:ident, $value:ident, $filter_field:ident, $filter:expr, $ctx:expr) => {
        if let Some(f) = &mut $filter.$filter_field {
            match f($value, $ctx) {
                FilterReturn::Unchanged(node) => vec![Inline::$variant(node)],
                FilterReturn::FilterResult(new_content) => new_content,
            }
        } else {
            apply_generic_inline(Inline::$variant($value), $filter, $ctx)
        }
    };
}

macro_rules! handle_block_filter {
    ($variant:ident, $value:ident, $filter_field:ident, $filter:expr, $ctx:expr) => {
        if let Some(f) = &mut $filter.$filter_field {
            match f($value, $ctx) {
                FilterReturn::Unchanged(node) => vec![Block::$variant(node)],
                FilterReturn::FilterResult(new_content) => new_content,
            }
        } else {
            apply_generic_block(Block::$variant($value), $filter, $ctx)
        }
    };
}

fn apply_generic_inline(inline: Inline, filter: &mut Filter, ctx: &mut FilterContext) -> Inlines {
    match &mut filter.inline {
        Some(f) => match f(inline, ctx) {
            FilterReturn::Unchanged(inline) => vec![inline],
            FilterReturn::FilterResult(new_content) => new_content,
        },
        None => vec![inline],
    }
}

fn apply_generic_block(block: Block, filter: &mut Filter, ctx: &mut FilterContext) -> Blocks {
    match &mut filter.block {
        Some(f) => match f(block, ctx) {
            FilterReturn::Unchanged(block) => vec![block],
            FilterReturn::FilterResult(new_content) => new_content,
        },
        None => vec![block],
    }
}

fn apply_inline_filter(inline: Inline, filter: &mut Filter, ctx: &mut FilterContext) -> Inlines {
    match inline {
        Inline::Code(code) => handle_inline_filter!(Code, code, code, filter, ctx),
        other => apply_generic_inline(other, filter, ctx),
    }
}

fn apply_block_filter(block: Block, filter: &mut Filter, ctx: &mut FilterContext) -> Blocks {
    match block {
        Block::CodeBlock(code) => handle_block_filter!(CodeBlock, code, code_block, filter, ctx),
        Block::Header(header) => handle_block_filter!(Header, header, header, filter, ctx),
        Block::Div(div) => handle_block_filter!(Div, div, div, filter, ctx),
        other => apply_generic_block(other, filter, ctx),
    }
}

pub fn bottomup_traverse_inline(
    inline: Inline,
    filter: &mut Filter,
    ctx: &mut FilterContext,
) -> Inlines {
    let inline = traverse_inline_structure(inline, filter, ctx);
    apply_inline_filter(inline, filter, ctx)
}

pub fn bottomup_traverse_block(
    block: Block,
    filter: &mut Filter,
    ctx: &mut FilterContext,
) -> Blocks {
    let block = traverse_block_structure(block, filter, ctx);
    apply_block_filter(block, filter, ctx)
}

pub fn bottomup_traverse_inlines(
    vec: Inlines,
    filter: &mut Filter,
    ctx: &mut FilterContext,
) -> Inlines {
    let mut result = Vec::with_capacity(vec.len());
    for inline in vec {
        result.extend(bottomup_traverse_inline(inline, filter, ctx));
    }
    match &mut filter.inlines {
        None => result,
        Some(f) => match f(result, ctx) {
            FilterReturn::Unchanged(inlines) => inlines,
            FilterReturn::FilterResult(new_content) => new_content,
        },
    }
}

pub fn bottomup_traverse_blocks(
    vec: Blocks,
    filter: &mut Filter,
    ctx: &mut FilterContext,
) -> Blocks {
    let mut result = Vec::with_capacity(vec.len());
    for block in vec {
        result.extend(bottomup_traverse_block(block, filter, ctx));
    }
    match &mut filter.blocks {
        None => result,
        Some(f) => match f(result, ctx) {
            FilterReturn::Unchanged(blocks) => blocks,
            FilterReturn::FilterResult(new_content) => new_content,
        },
    }
}

fn traverse_blocks_vec(
    blocks_vec: Vec<Blocks>,
    filter: &mut Filter,
    ctx: &mut FilterContext,
) -> Vec<Blocks> {
    blocks_vec
        .into_iter()
        .map(|blocks| bottomup_traverse_blocks(blocks, filter, ctx))
        .collect()
}

/// Rebuild an inline with its children filtered; terminal inlines are
/// returned as-is.
pub fn traverse_inline_structure(
    inline: Inline,
    filter: &mut Filter,
    ctx: &mut FilterContext,
) -> Inline {
    match inline {
        Inline::Emph(e) => Inline::Emph(Emph {
            content: bottomup_traverse_inlines(e.content, filter, ctx),
        }),
        Inline::Underline(u) => Inline::Underline(Underline {
            content: bottomup_traverse_inlines(u.content, filter, ctx),
        }),
        Inline::Strong(sg) => Inline::Strong(Strong {
            content: bottomup_traverse_inlines(sg.content, filter, ctx),
        }),
        Inline::Strikeout(st) => Inline::Strikeout(Strikeout {
            content: bottomup_traverse_inlines(st.content, filter, ctx),
        }),
        Inline::Superscript(sp) => Inline::Superscript(Superscript {
            content: bottomup_traverse_inlines(sp.content, filter, ctx),
        }),
        Inline::Subscript(sb) => Inline::Subscript(Subscript {
            content: bottomup_traverse_inlines(sb.content, filter, ctx),
        }),
        Inline::SmallCaps(sc) => Inline::SmallCaps(SmallCaps {
            content: bottomup_traverse_inlines(sc.content, filter, ctx),
        }),
        Inline::Quoted(q) => Inline::Quoted(Quoted {
            content: bottomup_traverse_inlines(q.content, filter, ctx),
            ..q
        }),
        Inline::Cite(c) => Inline::Cite(Cite {
            citations: c
                .citations
                .into_iter()
                .map(|cit| md_pandoc_types::Citation {
                    prefix: bottomup_traverse_inlines(cit.prefix, filter, ctx),
                    suffix: bottomup_traverse_inlines(cit.suffix, filter, ctx),
                    ..cit
                })
                .collect(),
            content: bottomup_traverse_inlines(c.content, filter, ctx),
        }),
        Inline::Link(l) => Inline::Link(Link {
            content: bottomup_traverse_inlines(l.content, filter, ctx),
            ..l
        }),
        Inline::Image(i) => Inline::Image(Image {
            content: bottomup_traverse_inlines(i.content, filter, ctx),
            ..i
        }),
        Inline::Note(note) => Inline::Note(Note {
            content: bottomup_traverse_blocks(note.content, filter, ctx),
        }),
        Inline::Span(span) => Inline::Span(Span {
            content: bottomup_traverse_inlines(span.content, filter, ctx),
            ..span
        }),
        // terminal inline types
        terminal => terminal,
    }
}

fn traverse_caption(caption: Caption, filter: &mut Filter, ctx: &mut FilterContext) -> Caption {
    Caption {
        short: caption
            .short
            .map(|short| bottomup_traverse_inlines(short, filter, ctx)),
        long: bottomup_traverse_blocks(caption.long, filter, ctx),
    }
}

fn traverse_row(row: Row, filter: &mut Filter, ctx: &mut FilterContext) -> Row {
    Row {
        cells: row
            .cells
            .into_iter()
            .map(|cell| Cell {
                content: bottomup_traverse_blocks(cell.content, filter, ctx),
                ..cell
            })
            .collect(),
        ..row
    }
}

fn traverse_rows(rows: Vec<Row>, filter: &mut Filter, ctx: &mut FilterContext) -> Vec<Row> {
    rows.into_iter()
        .map(|row| traverse_row(row, filter, ctx))
        .collect()
}

/// Rebuild a block with its children filtered; terminal blocks are
/// returned as-is.
pub fn traverse_block_structure(
    block: Block,
    filter: &mut Filter,
    ctx: &mut FilterContext,
) -> Block {
    match block {
        Block::Plain(plain) => Block::Plain(Plain {
            content: bottomup_traverse_inlines(plain.content, filter, ctx),
        }),
        Block::Paragraph(para) => Block::Paragraph(Paragraph {
            content: bottomup_traverse_inlines(para.content, filter, ctx),
        }),
        Block::LineBlock(line_block) => Block::LineBlock(LineBlock {
            content: line_block
                .content
                .into_iter()
                .map(|line| bottomup_traverse_inlines(line, filter, ctx))
                .collect(),
        }),
        Block::BlockQuote(quote) => Block::BlockQuote(BlockQuote {
            content: bottomup_traverse_blocks(quote.content, filter, ctx),
        }),
        Block::OrderedList(list) => Block::OrderedList(OrderedList {
            content: traverse_blocks_vec(list.content, filter, ctx),
            ..list
        }),
        Block::BulletList(list) => Block::BulletList(BulletList {
            content: traverse_blocks_vec(list.content, filter, ctx),
        }),
        Block::DefinitionList(list) => Block::DefinitionList(DefinitionList {
            content: list
                .content
                .into_iter()
                .map(|(term, def)| {
                    (
                        bottomup_traverse_inlines(term, filter, ctx),
                        traverse_blocks_vec(def, filter, ctx),
                    )
                })
                .collect(),
        }),
        Block::Header(header) => Block::Header(Header {
            content: bottomup_traverse_inlines(header.content, filter, ctx),
            ..header
        }),
        Block::Table(table) => Block::Table(Table {
            caption: traverse_caption(table.caption, filter, ctx),
            head: TableHead {
                rows: traverse_rows(table.head.rows, filter, ctx),
                ..table.head
            },
            bodies: table
                .bodies
                .into_iter()
                .map(|table_body| TableBody {
                    head: traverse_rows(table_body.head, filter, ctx),
                    body: traverse_rows(table_body.body, filter, ctx),
                    ..table_body
                })
                .collect(),
            foot: TableFoot {
                rows: traverse_rows(table.foot.rows, filter, ctx),
                ..table.foot
            },
            ..table
        }),
        Block::Figure(figure) => Block::Figure(Figure {
            caption: traverse_caption(figure.caption, filter, ctx),
            content: bottomup_traverse_blocks(figure.content, filter, ctx),
            ..figure
        }),
        Block::Div(div) => Block::Div(Div {
            content: bottomup_traverse_blocks(div.content, filter, ctx),
            ..div
        }),
        // terminal block types
        terminal @ (Block::CodeBlock(_) | Block::RawBlock(_) | Block::HorizontalRule) => terminal,
    }
}

pub fn bottomup_traverse_meta_value(
    value: MetaValue,
    filter: &mut Filter,
    ctx: &mut FilterContext,
) -> MetaValue {
    match value {
        MetaValue::MetaMap(entries) => MetaValue::MetaMap(
            entries
                .into_iter()
                .map(|(key, value)| (key, bottomup_traverse_meta_value(value, filter, ctx)))
                .collect(),
        ),
        MetaValue::MetaList(items) => MetaValue::MetaList(
            items
                .into_iter()
                .map(|item| bottomup_traverse_meta_value(item, filter, ctx))
                .collect(),
        ),
        MetaValue::MetaInlines(content) => {
            MetaValue::MetaInlines(bottomup_traverse_inlines(content, filter, ctx))
        }
        MetaValue::MetaBlocks(content) => {
            MetaValue::MetaBlocks(bottomup_traverse_blocks(content, filter, ctx))
        }
        value => value,
    }
}

pub fn bottomup_traverse_meta(meta: Meta, filter: &mut Filter, ctx: &mut FilterContext) -> Meta {
    meta.into_iter()
        .map(|(key, value)| (key, bottomup_traverse_meta_value(value, filter, ctx)))
        .collect()
}

pub fn bottomup_traverse(doc: Pandoc, filter: &mut Filter, ctx: &mut FilterContext) -> Pandoc {
    Pandoc {
        meta: bottomup_traverse_meta(doc.meta, filter, ctx),
        blocks: bottomup_traverse_blocks(doc.blocks, filter, ctx),
        api_version: doc.api_version,
    }
}
