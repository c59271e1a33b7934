//! Default-value compaction for computed styles.

use std::collections::BTreeMap;

use super::table::{StyleClassificationTable, StyleGroup};

/// Keywords that leave a shorthand component at its initial value.
const INITIAL_KEYWORDS: &[&str] = &[
    "none",
    "normal",
    "auto",
    "initial",
    "repeat",
    "scroll",
    "padding-box",
    "border-box",
    "ease",
    "running",
    "visible",
    "currentcolor",
    "medium",
    "transparent",
    "1",
];

/// Rewrites computed style values that equal their implicit default.
#[derive(Debug, Clone, Default)]
pub struct StyleCompactor {
    table: StyleClassificationTable,
}

impl StyleCompactor {
    pub fn new(table: StyleClassificationTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &StyleClassificationTable {
        &self.table
    }

    /// Group a property belongs to.
    ///
    /// The longest matching table entry wins; equal-length matches fall back
    /// to [`StyleGroup::PRIORITY`].
    pub fn classify(&self, property: &str) -> StyleGroup {
        let mut best: Option<(usize, StyleGroup)> = None;
        for group in StyleGroup::PRIORITY {
            if let Some(len) = self.table.match_len(group, property) {
                if best.is_none_or(|(best_len, _)| len > best_len) {
                    best = Some((len, group));
                }
            }
        }
        best.map(|(_, group)| group)
            .unwrap_or(StyleGroup::Unclassified)
    }

    /// Collapse `raw` to the group's keyword when it is the group's default.
    pub fn compact(&self, group: StyleGroup, raw: &str) -> String {
        match group.canonical() {
            Some(keyword) if is_default(group, raw) => keyword.to_string(),
            _ => raw.to_string(),
        }
    }

    /// Classify and compact a single property.
    pub fn compact_property(&self, property: &str, raw: &str) -> String {
        self.compact(self.classify(property), raw)
    }

    /// Compact a whole computed-style map.
    pub fn compact_map<'a, I>(&self, styles: I) -> BTreeMap<String, String>
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        styles
            .into_iter()
            .map(|(name, value)| (name.clone(), self.compact_property(name, value)))
            .collect()
    }
}

fn is_default(group: StyleGroup, raw: &str) -> bool {
    let tokens = tokenize(raw);
    if tokens.is_empty() {
        return false;
    }

    match group {
        StyleGroup::Auto => tokens.iter().all(|t| t.eq_ignore_ascii_case("auto")),
        StyleGroup::Normal => tokens.iter().all(|t| t.eq_ignore_ascii_case("normal")),
        StyleGroup::Zero => tokens.iter().all(|t| is_zero(t)),
        StyleGroup::None => {
            let has_none = tokens.iter().any(|t| t.eq_ignore_ascii_case("none"));
            if !has_none {
                return false;
            }
            tokens[0].eq_ignore_ascii_case("none")
                || tokens.iter().all(|t| is_neutral(t))
                || is_zero_width_line(&tokens)
        }
        StyleGroup::Condense => tokens.iter().all(|t| is_neutral(t)),
        StyleGroup::Unclassified => false,
    }
}

/// A `<width> <style> <color>` shorthand (border, outline, column-rule) with a
/// zero width is invisible whatever its colour. Longer values such as a
/// `background` with a zero position are not line shorthands.
fn is_zero_width_line(tokens: &[&str]) -> bool {
    tokens.len() <= 3 && tokens.iter().any(|t| t.eq_ignore_ascii_case("0px"))
}

/// Split a value on top-level whitespace, commas and slashes.
///
/// Parenthesised groups such as `rgb(0, 0, 0)` stay whole.
pub(crate) fn tokenize(value: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start: Option<usize> = None;

    for (i, c) in value.char_indices() {
        match c {
            '(' => {
                depth += 1;
                start.get_or_insert(i);
            }
            ')' => {
                depth = depth.saturating_sub(1);
            }
            c if depth == 0 && (c.is_whitespace() || c == ',' || c == '/') => {
                if let Some(s) = start.take() {
                    tokens.push(&value[s..i]);
                }
            }
            _ => {
                start.get_or_insert(i);
            }
        }
    }
    if let Some(s) = start {
        tokens.push(&value[s..]);
    }
    tokens
}

fn is_zero(token: &str) -> bool {
    let unit_start = token
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-' || c == '+'))
        .unwrap_or(token.len());
    let (number, unit) = token.split_at(unit_start);
    if !unit.chars().all(|c| c.is_ascii_alphabetic() || c == '%') {
        return false;
    }
    matches!(number.parse::<f64>(), Ok(n) if n == 0.0)
}

fn is_transparent(token: &str) -> bool {
    let compact: String = token.chars().filter(|c| !c.is_whitespace()).collect();
    compact.eq_ignore_ascii_case("rgba(0,0,0,0)") || compact.eq_ignore_ascii_case("transparent")
}

fn is_neutral(token: &str) -> bool {
    is_zero(token)
        || is_transparent(token)
        || INITIAL_KEYWORDS
            .iter()
            .any(|keyword| token.eq_ignore_ascii_case(keyword))
}
