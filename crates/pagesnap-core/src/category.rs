//! Semantic element categories and their selectors.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::ElementRecord;

/// Icons must sit within this many pixels of the page origin on both axes.
pub const ICON_THRESHOLD: i64 = 32;

/// One of the seven semantic groupings of page elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Buttons,
    Headings,
    Icons,
    Images,
    Links,
    Textfields,
    Videos,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Buttons,
        Category::Headings,
        Category::Icons,
        Category::Images,
        Category::Links,
        Category::Textfields,
        Category::Videos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Buttons => "buttons",
            Category::Headings => "headings",
            Category::Icons => "icons",
            Category::Images => "images",
            Category::Links => "links",
            Category::Textfields => "textfields",
            Category::Videos => "videos",
        }
    }

    fn default_selector(&self) -> &'static str {
        match self {
            Category::Buttons => r#"button, input[type="button"], input[type="submit"]"#,
            Category::Headings => "h1, h2, h3, h4, h5, h6",
            Category::Icons => "img, svg",
            Category::Images => "img",
            Category::Links => "a",
            Category::Textfields => {
                r#"input:not([type="checkbox"]), input:not([type="radio"])"#
            }
            Category::Videos => "video",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

/// Selector table mapping each category to a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySelector {
    selectors: BTreeMap<Category, String>,
}

impl Default for CategorySelector {
    fn default() -> Self {
        Self {
            selectors: Category::ALL
                .into_iter()
                .map(|category| (category, category.default_selector().to_string()))
                .collect(),
        }
    }
}

impl CategorySelector {
    /// Override the selector of one category.
    pub fn with_selector(mut self, category: Category, selector: impl Into<String>) -> Self {
        self.selectors.insert(category, selector.into());
        self
    }

    /// Selector expression for a category.
    pub fn resolve(&self, category: Category) -> &str {
        self.selectors
            .get(&category)
            .map(String::as_str)
            .unwrap_or_else(|| category.default_selector())
    }

    /// Post-filter applied to a category's extracted records.
    ///
    /// Only `icons` filters: it keeps elements whose box starts within
    /// [`ICON_THRESHOLD`] pixels of the origin on both axes. This thresholds
    /// position, not size. Elements without a box never match.
    pub fn retains(&self, category: Category, record: &ElementRecord) -> bool {
        match category {
            Category::Icons => record
                .bounds
                .is_some_and(|b| b.x <= ICON_THRESHOLD && b.y <= ICON_THRESHOLD),
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Bounds, RecordMeta};

    fn record_at(bounds: Option<Bounds>) -> ElementRecord {
        ElementRecord {
            bounds,
            title: String::new(),
            html: String::new(),
            styles: BTreeMap::new(),
            classes: String::new(),
            meta: RecordMeta::default(),
            children: vec![],
            box_model: None,
        }
    }

    fn bounds(x: i64, y: i64, width: i64, height: i64) -> Option<Bounds> {
        Some(Bounds { x, y, width, height })
    }

    #[test]
    fn test_resolve_defaults() {
        let selector = CategorySelector::default();
        assert_eq!(selector.resolve(Category::Headings), "h1, h2, h3, h4, h5, h6");
        assert_eq!(selector.resolve(Category::Icons), "img, svg");
        assert_eq!(selector.resolve(Category::Links), "a");
    }

    #[test]
    fn test_with_selector_override() {
        let selector = CategorySelector::default().with_selector(Category::Videos, "video, iframe");
        assert_eq!(selector.resolve(Category::Videos), "video, iframe");
        assert_eq!(selector.resolve(Category::Images), "img");
    }

    #[test]
    fn test_icon_filter_near_origin() {
        let selector = CategorySelector::default();
        assert!(selector.retains(Category::Icons, &record_at(bounds(10, 10, 500, 500))));
        assert!(selector.retains(Category::Icons, &record_at(bounds(32, 32, 16, 16))));
    }

    #[test]
    fn test_icon_filter_is_positional() {
        let selector = CategorySelector::default();
        // A tiny glyph far from the origin is not an icon under this rule.
        assert!(!selector.retains(Category::Icons, &record_at(bounds(40, 5, 16, 16))));
        assert!(!selector.retains(Category::Icons, &record_at(bounds(5, 33, 16, 16))));
    }

    #[test]
    fn test_icon_filter_without_bounds() {
        let selector = CategorySelector::default();
        assert!(!selector.retains(Category::Icons, &record_at(None)));
    }

    #[test]
    fn test_other_categories_unfiltered() {
        let selector = CategorySelector::default();
        assert!(selector.retains(Category::Images, &record_at(bounds(400, 400, 10, 10))));
        assert!(selector.retains(Category::Images, &record_at(None)));
    }

    #[test]
    fn test_category_round_trip_names() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
        assert!("widgets".parse::<Category>().is_err());
    }
}
