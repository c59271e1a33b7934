//! Computed-style compaction.
//!
//! A computed-style map lists every longhand property explicitly. The
//! [`StyleClassificationTable`] groups properties by the keyword their default
//! collapses to, and the [`StyleCompactor`] rewrites default values into that
//! keyword so the map stays legible.

mod compactor;
mod table;

pub use compactor::StyleCompactor;
pub use table::{StyleClassificationTable, StyleGroup};

#[cfg(test)]
#[path = "compactor_tests.rs"]
mod tests;
