//! Colour and font palette aggregation.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::types::{DocumentElements, ElementMeta};

/// Everything from the first ` none` of a background value onward.
static BACKGROUND_SUFFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r" none.*$").expect("valid regex"));

/// Reduces categorized elements into a deduplicated palette.
///
/// Values are deduplicated by exact string equality; no case folding or
/// whitespace normalization is applied.
pub struct MetaAggregator;

impl MetaAggregator {
    /// Aggregate the top-level records of every category.
    pub fn aggregate(elements: &DocumentElements) -> ElementMeta {
        let mut meta = ElementMeta::default();
        for record in elements.records() {
            Self::absorb(&mut meta, |name| record.style(name));
        }
        meta
    }

    /// Aggregate a serialized document or element map.
    ///
    /// Accepts a full design document (anything with an `elements` key), a
    /// category map, or bare arrays of records nested to any depth. Only the
    /// `elements` of a document are read. Other objects carrying a `styles`
    /// map are treated as records; their `children` are not visited,
    /// matching [`MetaAggregator::aggregate`].
    pub fn aggregate_json(value: &Value) -> ElementMeta {
        let mut meta = ElementMeta::default();
        Self::visit(&mut meta, value);
        meta
    }

    fn visit(meta: &mut ElementMeta, value: &Value) {
        match value {
            Value::Array(items) => {
                for item in items {
                    Self::visit(meta, item);
                }
            }
            Value::Object(map) => {
                // A document's own `styles` belong to its root element, not
                // to any category, so `elements` is checked first.
                if let Some(elements) = map.get("elements") {
                    Self::visit(meta, elements);
                } else if let Some(Value::Object(styles)) = map.get("styles") {
                    Self::absorb(meta, |name| styles.get(name).and_then(Value::as_str));
                } else {
                    for item in map.values() {
                        Self::visit(meta, item);
                    }
                }
            }
            _ => {}
        }
    }

    fn absorb<'a, F>(meta: &mut ElementMeta, style: F)
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        if let Some(background) = style("background") {
            meta.colors
                .bg
                .insert(Self::strip_background(background).into_owned());
        }
        if let Some(color) = style("color") {
            meta.colors.fg.insert(color.to_string());
        }
        if let Some(family) = style("font-family") {
            meta.fonts.insert(family.to_string());
        }
    }

    /// Drop everything from the first ` none` token of a background value.
    pub fn strip_background(background: &str) -> Cow<'_, str> {
        BACKGROUND_SUFFIX.replace(background, "")
    }
}

#[cfg(test)]
#[path = "meta_tests.rs"]
mod tests;
