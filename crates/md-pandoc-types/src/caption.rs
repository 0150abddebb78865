/*
 * caption.rs
 * Copyright (c) 2025 Posit, PBC
 */

use crate::block::Blocks;
use crate::inline::Inlines;

tuple_node! {
    /// Table and figure caption: an optional short caption and the full
    /// caption blocks.
    #[derive(Default)]
    pub struct Caption {
        pub short: Option<Inlines>,
        pub long: Blocks,
    }
}
