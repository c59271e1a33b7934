//! Design document data model.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::driver::Rect;

/// Element rectangle truncated to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl Bounds {
    /// Floor every component of a measured rectangle.
    pub fn from_rect(rect: &Rect) -> Self {
        Self {
            x: rect.x.floor() as i64,
            y: rect.y.floor() as i64,
            width: rect.width.floor() as i64,
            height: rect.height.floor() as i64,
        }
    }
}

/// Box model quads as reported by the rendering engine.
///
/// Each quad is eight numbers: the four corners clockwise from top-left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxModel {
    pub content: Vec<f64>,
    pub padding: Vec<f64>,
    pub border: Vec<f64>,
    pub margin: Vec<f64>,
    pub width: i64,
    pub height: i64,
}

/// Task-specific view of an element derived from its styles and attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMeta {
    pub border: Option<String>,
    pub color: Option<String>,
    pub font: Option<String>,
    /// Always equal to the owning record's `title`.
    pub text: String,
    pub placeholder: Option<String>,
    pub href: Option<String>,
    /// Encoded image payload for `img` elements.
    pub data: Option<String>,
    pub url: Option<String>,
}

/// One extracted DOM node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ElementRecord {
    pub bounds: Option<Bounds>,
    pub title: String,
    /// Outer markup with double quotes escaped.
    pub html: String,
    pub styles: BTreeMap<String, String>,
    pub classes: String,
    pub meta: RecordMeta,
    #[serde(default)]
    pub children: Vec<ElementRecord>,
    #[serde(rename = "box")]
    pub box_model: Option<BoxModel>,
}

impl ElementRecord {
    /// Look up a normalized style value.
    pub fn style(&self, name: &str) -> Option<&str> {
        self.styles.get(name).map(String::as_str)
    }

    /// Number of records in this subtree, including itself.
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(ElementRecord::subtree_len).sum::<usize>()
    }
}

/// Top-level matched records per category.
///
/// Records are not deduplicated across categories: an `img` near the page
/// origin appears in both `icons` and `images`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentElements {
    categories: BTreeMap<Category, Vec<ElementRecord>>,
}

impl DocumentElements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, category: Category, records: Vec<ElementRecord>) {
        self.categories.insert(category, records);
    }

    /// Records for a category; empty when the category was never filled.
    pub fn get(&self, category: Category) -> &[ElementRecord] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, &[ElementRecord])> {
        self.categories
            .iter()
            .map(|(category, records)| (*category, records.as_slice()))
    }

    /// Every top-level record across all categories, in category order.
    pub fn records(&self) -> impl Iterator<Item = &ElementRecord> {
        self.categories.values().flatten()
    }

    pub fn len(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Background and foreground colours.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Colors {
    pub bg: BTreeSet<String>,
    pub fg: BTreeSet<String>,
}

/// Deduplicated palette used across a page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementMeta {
    pub colors: Colors,
    pub fonts: BTreeSet<String>,
}

/// Everything captured for one page under one device emulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignDocument {
    pub device: String,
    pub html: String,
    pub title: String,
    pub description: String,
    pub url: String,
    /// Full-page PNG screenshot, base64 encoded.
    pub image: String,
    pub styles: BTreeMap<String, String>,
    /// Space-separated hrefs of every extracted link.
    pub links: String,
    pub colors: Colors,
    pub fonts: BTreeSet<String>,
    pub elements: DocumentElements,
}

/// Escape double quotes the way serialized markup is stored.
pub fn escape_quotes(html: &str) -> String {
    html.replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str) -> ElementRecord {
        ElementRecord {
            bounds: None,
            title: title.to_string(),
            html: String::new(),
            styles: BTreeMap::new(),
            classes: String::new(),
            meta: RecordMeta::default(),
            children: vec![],
            box_model: None,
        }
    }

    #[test]
    fn test_bounds_floor() {
        let bounds = Bounds::from_rect(&Rect {
            x: 10.9,
            y: -0.5,
            width: 99.99,
            height: 0.2,
        });
        assert_eq!(
            bounds,
            Bounds {
                x: 10,
                y: -1,
                width: 99,
                height: 0
            }
        );
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(
            escape_quotes(r#"<a href="/x">y</a>"#),
            r#"<a href=\"/x\">y</a>"#
        );
    }

    #[test]
    fn test_subtree_len() {
        let mut root = record("root");
        let mut mid = record("mid");
        mid.children.push(record("leaf"));
        root.children.push(mid);
        root.children.push(record("other"));
        assert_eq!(root.subtree_len(), 4);
    }

    #[test]
    fn test_document_elements_missing_category() {
        let mut elements = DocumentElements::new();
        elements.insert(Category::Links, vec![record("a")]);
        assert!(elements.get(Category::Videos).is_empty());
        assert_eq!(elements.get(Category::Links).len(), 1);
        assert_eq!(elements.len(), 1);
    }

    #[test]
    fn test_document_elements_serialize_by_name() {
        let mut elements = DocumentElements::new();
        elements.insert(Category::Textfields, vec![]);
        let json = serde_json::to_value(&elements).unwrap();
        assert!(json.get("textfields").is_some());
    }

    #[test]
    fn test_record_box_field_name() {
        let json = serde_json::to_value(record("x")).unwrap();
        assert!(json.get("box").is_some());
        assert!(json.get("box_model").is_none());
    }
}
