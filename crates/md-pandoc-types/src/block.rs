/*
 * block.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::attr::{Attr, empty_attr};
use crate::caption::Caption;
use crate::inline::{Image, Inline, Inlines, Str};
use crate::list::ListAttributes;
use crate::table::Table;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum Block {
    Plain(Plain),
    #[serde(rename = "Para")]
    Paragraph(Paragraph),
    LineBlock(LineBlock),
    CodeBlock(CodeBlock),
    RawBlock(RawBlock),
    BlockQuote(BlockQuote),
    OrderedList(OrderedList),
    BulletList(BulletList),
    DefinitionList(DefinitionList),
    Header(Header),
    HorizontalRule,
    Table(Table),
    Figure(Figure),
    Div(Div),
}

pub type Blocks = Vec<Block>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plain {
    pub content: Inlines,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Paragraph {
    pub content: Inlines,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineBlock {
    pub content: Vec<Inlines>,
}

tuple_node! {
    pub struct CodeBlock {
        pub attr: Attr,
        pub text: String,
    }
}

tuple_node! {
    pub struct RawBlock {
        pub format: String,
        pub text: String,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockQuote {
    pub content: Blocks,
}

tuple_node! {
    pub struct OrderedList {
        pub attr: ListAttributes,
        pub content: Vec<Blocks>,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BulletList {
    pub content: Vec<Blocks>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DefinitionList {
    pub content: Vec<(Inlines, Vec<Blocks>)>,
}

tuple_node! {
    pub struct Header {
        pub level: usize,
        pub attr: Attr,
        pub content: Inlines,
    }
}

tuple_node! {
    pub struct Figure {
        pub attr: Attr,
        pub caption: Caption,
        pub content: Blocks,
    }
}

tuple_node! {
    pub struct Div {
        pub attr: Attr,
        pub content: Blocks,
    }
}

impl Block {
    /// A paragraph holding a single image, which is how diagram renderers
    /// hand their output back to the document.
    pub fn image_paragraph(url: impl Into<String>, caption: &str) -> Block {
        let alt = if caption.is_empty() {
            vec![]
        } else {
            vec![Inline::Str(Str {
                text: caption.to_string(),
            })]
        };
        Block::Paragraph(Paragraph {
            content: vec![Inline::Image(Image {
                attr: empty_attr(),
                content: alt,
                target: (url.into(), caption.to_string()),
            })],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_para_constructor_name() {
        let block = Block::Paragraph(Paragraph {
            content: vec![Inline::str("Hello")],
        });
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({"t": "Para", "c": [{"t": "Str", "c": "Hello"}]})
        );
    }

    #[test]
    fn test_header_json_shape() {
        let value = json!({"t": "Header", "c": [1, ["intro", [], []], [{"t": "Str", "c": "Intro"}]]});
        let block: Block = serde_json::from_value(value.clone()).unwrap();
        match &block {
            Block::Header(h) => {
                assert_eq!(h.level, 1);
                assert_eq!(h.attr.identifier, "intro");
            }
            other => panic!("Expected Header, got {:?}", other),
        }
        assert_eq!(serde_json::to_value(&block).unwrap(), value);
    }

    #[test]
    fn test_horizontal_rule_and_lists() {
        let value = json!([
            {"t": "HorizontalRule"},
            {"t": "OrderedList", "c": [[3, {"t": "LowerRoman"}, {"t": "OneParen"}], [[{"t": "Plain", "c": []}]]]},
            {"t": "BulletList", "c": [[{"t": "Plain", "c": [{"t": "Str", "c": "a"}]}]]},
            {"t": "DefinitionList", "c": [[[{"t": "Str", "c": "term"}], [[{"t": "Para", "c": []}]]]]}
        ]);
        let blocks: Blocks = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(blocks.len(), 4);
        assert_eq!(serde_json::to_value(&blocks).unwrap(), value);
    }

    #[test]
    fn test_image_paragraph() {
        let block = Block::image_paragraph("mermaid-images/abc.svg", "Flow");
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({"t": "Para", "c": [{"t": "Image", "c": [
                ["", [], []],
                [{"t": "Str", "c": "Flow"}],
                ["mermaid-images/abc.svg", "Flow"]
            ]}]})
        );
    }

    #[test]
    fn test_image_paragraph_without_caption_has_no_alt() {
        match Block::image_paragraph("a.png", "") {
            Block::Paragraph(p) => match &p.content[0] {
                Inline::Image(image) => {
                    assert!(image.content.is_empty());
                    assert_eq!(image.target, ("a.png".to_string(), String::new()));
                }
                other => panic!("Expected Image, got {:?}", other),
            },
            other => panic!("Expected Para, got {:?}", other),
        }
    }
}
