//! Display title resolution.

use once_cell::sync::Lazy;
use regex::Regex;

/// A fragment made of nothing but markup, e.g. `<svg>...</svg>`.
static PURE_MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<.+>$").expect("valid regex"));

/// Raw title sources read from a node.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleCandidates<'a> {
    pub alt: Option<&'a str>,
    pub value: Option<&'a str>,
    pub text_content: &'a str,
}

/// Resolves the human-readable label of an element.
///
/// Candidates are consulted in order: a non-empty `alt` attribute, then a
/// non-empty `value` attribute, then the raw text content. When that yields
/// nothing and the element has children, the deepest trailing text-bearing
/// fragment among its descendants is used instead.
pub struct TitleResolver;

impl TitleResolver {
    /// First non-empty attribute candidate, else the text content.
    pub fn primary<'a>(candidates: &TitleCandidates<'a>) -> &'a str {
        candidates
            .alt
            .filter(|alt| !alt.is_empty())
            .or_else(|| candidates.value.filter(|value| !value.is_empty()))
            .unwrap_or(candidates.text_content)
    }

    /// Resolve the title, correcting an empty result from the descendants.
    ///
    /// `trailing_fragment` is the last text-bearing descendant fragment in
    /// document order, as found by [`TitleResolver::last_text_fragment`].
    pub fn resolve(
        candidates: &TitleCandidates<'_>,
        has_children: bool,
        trailing_fragment: Option<&str>,
    ) -> String {
        let primary = Self::primary(candidates);
        if primary.is_empty() && has_children {
            return trailing_fragment.unwrap_or_default().to_string();
        }
        primary.to_string()
    }

    /// Whether a markup fragment carries text rather than only tags.
    pub fn is_text_fragment(fragment: &str) -> bool {
        !fragment.is_empty() && !PURE_MARKUP.is_match(fragment)
    }

    /// Last text-bearing fragment of a document-ordered sequence.
    pub fn last_text_fragment<'a, I>(fragments: I) -> Option<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: DoubleEndedIterator,
    {
        fragments
            .into_iter()
            .rev()
            .find(|fragment| Self::is_text_fragment(fragment))
    }
}
