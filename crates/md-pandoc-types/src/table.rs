/*
 * table.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::attr::Attr;
use crate::block::Blocks;
use crate::caption::Caption;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "t")]
pub enum Alignment {
    AlignLeft,
    AlignRight,
    AlignCenter,
    AlignDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "c")]
pub enum ColWidth {
    ColWidth(f64),
    ColWidthDefault,
}

tuple_node! {
    pub struct ColSpec {
        pub alignment: Alignment,
        pub width: ColWidth,
    }
}

tuple_node! {
    pub struct Cell {
        pub attr: Attr,
        pub alignment: Alignment,
        pub row_span: usize,
        pub col_span: usize,
        pub content: Blocks,
    }
}

tuple_node! {
    pub struct Row {
        pub attr: Attr,
        pub cells: Vec<Cell>,
    }
}

tuple_node! {
    pub struct TableHead {
        pub attr: Attr,
        pub rows: Vec<Row>,
    }
}

tuple_node! {
    pub struct TableBody {
        pub attr: Attr,
        pub row_head_columns: usize,
        pub head: Vec<Row>,
        pub body: Vec<Row>,
    }
}

tuple_node! {
    pub struct TableFoot {
        pub attr: Attr,
        pub rows: Vec<Row>,
    }
}

tuple_node! {
    pub struct Table {
        pub attr: Attr,
        pub caption: Caption,
        pub colspec: Vec<ColSpec>,
        pub head: TableHead,
        pub bodies: Vec<TableBody>,
        pub foot: TableFoot,
    }
}

#[cfg(test)]
mod tests {
    use crate::block::Block;
    use serde_json::json;

    #[test]
    fn test_table_round_trip() {
        let value = json!({"t": "Table", "c": [
            ["", [], []],
            [null, []],
            [[{"t": "AlignDefault"}, {"t": "ColWidthDefault"}],
             [{"t": "AlignLeft"}, {"t": "ColWidth", "c": 0.5}]],
            [["", [], []], [[["", [], []], [
                [["", [], []], {"t": "AlignDefault"}, 1, 1, [{"t": "Plain", "c": [{"t": "Str", "c": "A"}]}]]
            ]]]],
            [[["", [], []], 0, [], [[["", [], []], [
                [["", [], []], {"t": "AlignDefault"}, 1, 2, [{"t": "Plain", "c": [{"t": "Str", "c": "1"}]}]]
            ]]]]],
            [["", [], []], []]
        ]});
        let block: Block = serde_json::from_value(value.clone()).unwrap();
        match &block {
            Block::Table(table) => {
                assert_eq!(table.colspec.len(), 2);
                assert_eq!(table.bodies[0].body[0].cells[0].col_span, 2);
                assert!(table.caption.short.is_none());
            }
            other => panic!("Expected Table, got {:?}", other),
        }
        assert_eq!(serde_json::to_value(&block).unwrap(), value);
    }
}
