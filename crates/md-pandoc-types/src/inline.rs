/*
 * inline.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::attr::Attr;
use crate::block::Blocks;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum Inline {
    Str(Str),
    Emph(Emph),
    Underline(Underline),
    Strong(Strong),
    Strikeout(Strikeout),
    Superscript(Superscript),
    Subscript(Subscript),
    SmallCaps(SmallCaps),
    Quoted(Quoted),
    Cite(Cite),
    Code(Code),
    Space,
    SoftBreak,
    LineBreak,
    Math(Math),
    RawInline(RawInline),
    Link(Link),
    Image(Image),
    Note(Note),
    Span(Span),
}

pub type Inlines = Vec<Inline>;

/// Link or image target: `(url, title)`.
pub type Target = (String, String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum QuoteType {
    SingleQuote,
    DoubleQuote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum MathType {
    InlineMath,
    DisplayMath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum CitationMode {
    AuthorInText,
    SuppressAuthor,
    NormalCitation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Str {
    pub text: String,
}

macro_rules! inline_container {
    ($($name:ident),* $(,)?) => {
        $(
            #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
            #[serde(transparent)]
            pub struct $name {
                pub content: Inlines,
            }
        )*
    };
}

inline_container!(
    Emph,
    Underline,
    Strong,
    Strikeout,
    Superscript,
    Subscript,
    SmallCaps
);

tuple_node! {
    pub struct Quoted {
        pub quote_type: QuoteType,
        pub content: Inlines,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    #[serde(rename = "citationId")]
    pub id: String,
    #[serde(rename = "citationPrefix")]
    pub prefix: Inlines,
    #[serde(rename = "citationSuffix")]
    pub suffix: Inlines,
    #[serde(rename = "citationMode")]
    pub mode: CitationMode,
    #[serde(rename = "citationNoteNum")]
    pub note_num: i64,
    #[serde(rename = "citationHash")]
    pub hash: i64,
}

tuple_node! {
    pub struct Cite {
        pub citations: Vec<Citation>,
        pub content: Inlines,
    }
}

tuple_node! {
    pub struct Code {
        pub attr: Attr,
        pub text: String,
    }
}

tuple_node! {
    pub struct Math {
        pub math_type: MathType,
        pub text: String,
    }
}

tuple_node! {
    pub struct RawInline {
        pub format: String,
        pub text: String,
    }
}

tuple_node! {
    pub struct Link {
        pub attr: Attr,
        pub content: Inlines,
        pub target: Target,
    }
}

tuple_node! {
    pub struct Image {
        pub attr: Attr,
        pub content: Inlines,
        pub target: Target,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Note {
    pub content: Blocks,
}

tuple_node! {
    pub struct Span {
        pub attr: Attr,
        pub content: Inlines,
    }
}

impl Inline {
    pub fn str(text: impl Into<String>) -> Inline {
        Inline::Str(Str { text: text.into() })
    }

    pub fn raw_html(text: impl Into<String>) -> Inline {
        Inline::RawInline(RawInline {
            format: "html".to_string(),
            text: text.into(),
        })
    }
}

/// Flatten inlines to their plain text, the way `pandoc.utils.stringify`
/// does. Notes are skipped; breaks and spaces become a single space.
pub fn inlines_to_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    push_text(inlines, &mut out);
    out
}

fn push_text(inlines: &[Inline], out: &mut String) {
    for inline in inlines {
        match inline {
            Inline::Str(s) => out.push_str(&s.text),
            Inline::Code(c) => out.push_str(&c.text),
            Inline::Math(m) => out.push_str(&m.text),
            Inline::Space | Inline::SoftBreak | Inline::LineBreak => out.push(' '),
            Inline::Emph(Emph { content })
            | Inline::Underline(Underline { content })
            | Inline::Strong(Strong { content })
            | Inline::Strikeout(Strikeout { content })
            | Inline::Superscript(Superscript { content })
            | Inline::Subscript(Subscript { content })
            | Inline::SmallCaps(SmallCaps { content }) => push_text(content, out),
            Inline::Quoted(q) => {
                let mark = match q.quote_type {
                    QuoteType::SingleQuote => '\'',
                    QuoteType::DoubleQuote => '"',
                };
                out.push(mark);
                push_text(&q.content, out);
                out.push(mark);
            }
            Inline::Cite(c) => push_text(&c.content, out),
            Inline::Link(l) => push_text(&l.content, out),
            Inline::Image(i) => push_text(&i.content, out),
            Inline::Span(s) => push_text(&s.content, out),
            Inline::RawInline(_) | Inline::Note(_) => {}
        }
    }
}
