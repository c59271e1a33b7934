//! Property classification groups.

use serde::{Deserialize, Serialize};

const AUTO_STYLES: &[&str] = &[
    "align-self",
    "alignment-baseline",
    "bottom",
    "break",
    "buffered-rendering",
    "clip",
    "color-rendering",
    "column",
    "cursor",
    "dominant-baseline",
    "font-kerning",
    "image-rendering",
    "isolation",
    "offset",
    "page-break",
    "shape-rendering",
    "text-underline-position",
    "touch-action",
    "user-select",
    "-webkit-line-break",
    "-webkit-min-logical",
    "-webkit-user-drag",
    "-webkit-user-select",
    "will-change",
];

const CONDENSE_STYLES: &[&str] = &[
    "animation",
    "background-position",
    "background-repeat",
    "background",
    "border-radius",
    "border",
    "column-rule",
    "fill",
    "font-variant",
    "grid-auto",
    "grid-column",
    "grid-row",
    "grid-template",
    "list-style",
    "margin",
    "marker",
    "offset",
    "outline",
    "overflow",
    "overscroll-behavior",
    "padding",
    "scroll-margin-block",
    "scroll-margin-inline",
    "scroll-margin",
    "scroll-padding-block",
    "scroll-padding-inline",
    "scroll-padding",
    "scroll-snap",
    "stroke",
    "text-decoration",
    "transition",
    "-webkit-animation",
    "-webkit-border-after",
    "-webkit-border-before",
    "-webkit-border-end",
    "-webkit-border-start",
    "-webkit-border",
    "-webkit-column-rule",
    "-webkit-margin-after",
    "-webkit-margin-before",
    "-webkit-mask-box-image",
    "-webkit-mask-position",
    "-webkit-mask-repeat",
    "-webkit-perspective-origin",
    "-webkit-text-emphasis",
    "-webkit-text-stroke",
    "-webkit-transform",
    "-webkit-transition",
];

const NONE_STYLES: &[&str] = &[
    "animation",
    "backdrop-filter",
    "background",
    "border",
    "box-shadow",
    "clear",
    "clip-path",
    "column-rule",
    "column-span",
    "contain",
    "counter-increment",
    "counter-reset",
    "filter",
    "float",
    "grid",
    "grid-template",
    "offset",
    "outline",
    "perspective",
    "pointer-events",
    "stroke",
    "text-combine-upright",
    "text-decoration",
    "text-shadow",
    "text-transform",
    "transform",
    "-webkit-animation",
    "-webkit-border",
    "webkit-box",
    "-webkit-column-rule",
    "-webkit-column-span",
    "-webkit-filter",
    "-webkit-highlight",
    "-webkit-line-clamp",
    "-webkit-max-logical",
    "-webkit-perspective",
    "-webkit-text-combine",
    "-webkit-text-decorations-in-effect",
    "-webkit-text-security",
    "-webkit-transform",
];

const NORMAL_STYLES: &[&str] = &[
    "column-gap",
    "content",
    "font-style",
    "font-variant",
    "font-variation-setting",
    "letter-spacing",
    "mix-blend-mode",
    "speak",
    "unicode-bidi",
    "-webkit-animation",
    "-webkit-font-feature-settings",
    "white-space",
    "word-break",
    "word-wrap",
];

const ZERO_STYLES: &[&str] = &[
    "baseline-shift",
    "padding",
    "text-indent",
    "-webkit-padding",
    "-webkit-shape",
    "word-spacing",
];

/// Default-collapse behaviour of a CSS property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleGroup {
    Auto,
    Condense,
    None,
    Normal,
    Zero,
    Unclassified,
}

impl StyleGroup {
    /// Groups in tie-break order: when two groups match a property equally
    /// well, the earlier one wins.
    pub const PRIORITY: [StyleGroup; 5] = [
        StyleGroup::None,
        StyleGroup::Normal,
        StyleGroup::Zero,
        StyleGroup::Auto,
        StyleGroup::Condense,
    ];

    /// Keyword a default value collapses to.
    pub fn canonical(&self) -> Option<&'static str> {
        match self {
            StyleGroup::Auto => Some("auto"),
            StyleGroup::Condense => Some("initial"),
            StyleGroup::None => Some("none"),
            StyleGroup::Normal => Some("normal"),
            StyleGroup::Zero => Some("0"),
            StyleGroup::Unclassified => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StyleGroup::Auto => "auto",
            StyleGroup::Condense => "condense",
            StyleGroup::None => "none",
            StyleGroup::Normal => "normal",
            StyleGroup::Zero => "zero",
            StyleGroup::Unclassified => "unclassified",
        }
    }
}

/// Five named lists of CSS property identifiers.
///
/// An entry matches a property when it equals the property name or is a
/// `-`-delimited prefix of it, so `column` covers `column-count` and
/// `column-width`. The table is immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleClassificationTable {
    auto: Vec<String>,
    condense: Vec<String>,
    none: Vec<String>,
    normal: Vec<String>,
    zero: Vec<String>,
}

impl Default for StyleClassificationTable {
    fn default() -> Self {
        let owned = |list: &[&str]| list.iter().map(|s| s.to_string()).collect();
        Self {
            auto: owned(AUTO_STYLES),
            condense: owned(CONDENSE_STYLES),
            none: owned(NONE_STYLES),
            normal: owned(NORMAL_STYLES),
            zero: owned(ZERO_STYLES),
        }
    }
}

impl StyleClassificationTable {
    /// Replace one group's entries. `Unclassified` is ignored.
    pub fn with_group(mut self, group: StyleGroup, entries: Vec<String>) -> Self {
        match group {
            StyleGroup::Auto => self.auto = entries,
            StyleGroup::Condense => self.condense = entries,
            StyleGroup::None => self.none = entries,
            StyleGroup::Normal => self.normal = entries,
            StyleGroup::Zero => self.zero = entries,
            StyleGroup::Unclassified => {}
        }
        self
    }

    pub fn entries(&self, group: StyleGroup) -> &[String] {
        match group {
            StyleGroup::Auto => &self.auto,
            StyleGroup::Condense => &self.condense,
            StyleGroup::None => &self.none,
            StyleGroup::Normal => &self.normal,
            StyleGroup::Zero => &self.zero,
            StyleGroup::Unclassified => &[],
        }
    }

    /// Length of the longest entry of `group` matching `property`.
    pub(crate) fn match_len(&self, group: StyleGroup, property: &str) -> Option<usize> {
        self.entries(group)
            .iter()
            .filter(|entry| matches_entry(entry, property))
            .map(String::len)
            .max()
    }
}

fn matches_entry(entry: &str, property: &str) -> bool {
    match property.strip_prefix(entry) {
        Some("") => true,
        Some(rest) => rest.starts_with('-'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_entry_exact_and_prefix() {
        assert!(matches_entry("column", "column"));
        assert!(matches_entry("column", "column-count"));
        assert!(!matches_entry("column", "columns"));
        assert!(!matches_entry("border", "bottom"));
    }

    #[test]
    fn test_with_group_replaces_entries() {
        let table = StyleClassificationTable::default()
            .with_group(StyleGroup::Zero, vec!["gap".to_string()]);
        assert_eq!(table.entries(StyleGroup::Zero).to_vec(), vec!["gap".to_string()]);
        assert!(!table.entries(StyleGroup::Auto).is_empty());
    }

    #[test]
    fn test_unclassified_has_no_entries() {
        let table = StyleClassificationTable::default();
        assert!(table.entries(StyleGroup::Unclassified).is_empty());
        assert_eq!(StyleGroup::Unclassified.canonical(), None);
    }

    #[test]
    fn test_match_len_prefers_longest() {
        let table = StyleClassificationTable::default();
        assert_eq!(
            table.match_len(StyleGroup::Condense, "border-radius"),
            Some("border-radius".len())
        );
        assert_eq!(table.match_len(StyleGroup::Zero, "margin-top"), None);
    }
}
