/*
 * utils/mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

pub mod diagnostic_collector;

#[cfg(all(test, unix))]
pub(crate) mod test_support;
