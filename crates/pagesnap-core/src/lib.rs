//! # pagesnap core
//!
//! Extraction and normalization pipeline behind a pagesnap design document.
//!
//! Given a page reachable through a [`PageDriver`], the core:
//!
//! 1. Resolves one selector per [`Category`] with a [`CategorySelector`].
//! 2. Walks every matched node depth-first with a [`NodeWalker`], building an
//!    [`ElementRecord`] tree whose styles are compacted by a [`StyleCompactor`]
//!    and whose titles are resolved by the [`TitleResolver`] fallback chain.
//! 3. Reduces the resulting [`DocumentElements`] into an [`ElementMeta`]
//!    palette with the [`MetaAggregator`].
//!
//! ```text
//! CategorySelector ──► PageDriver::query_all ──► NodeWalker ──► DocumentElements
//!                                                   │                 │
//!                                  StyleCompactor ◄─┤                 ▼
//!                                  TitleResolver  ◄─┘          MetaAggregator ──► ElementMeta
//! ```
//!
//! Launching a browser, emulating devices and navigating are the job of a
//! driver implementation (see the `pagesnap-browser` crate).

mod bundle;
mod category;
mod driver;
mod error;
mod extract;
mod meta;
pub mod style;
mod title;
mod types;
mod walker;

#[cfg(test)]
mod fake_driver;

pub use bundle::{AttributeBundle, MetaCandidate, ATTRIBUTE_BUNDLE_FN};
pub use category::{Category, CategorySelector, ICON_THRESHOLD};
pub use driver::{DriverError, NodeHandle, PageDriver, Rect};
pub use error::ExtractError;
pub use extract::{extract, ExtractOptions, Extractor};
pub use meta::MetaAggregator;
pub use style::{StyleClassificationTable, StyleCompactor, StyleGroup};
pub use title::{TitleCandidates, TitleResolver};
pub use types::{
    escape_quotes, Bounds, BoxModel, Colors, DesignDocument, DocumentElements, ElementMeta,
    ElementRecord, RecordMeta,
};
pub use walker::NodeWalker;
