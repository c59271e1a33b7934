//! Typed schema for the per-node in-page evaluation.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::driver::DriverError;

/// Function evaluated with `this` bound to the element being extracted.
///
/// Relies on the page-global helpers `elementStyles`, `elementColor`,
/// `elementFont`, `elementBounds` and `imageData`.
pub const ATTRIBUTE_BUNDLE_FN: &str = r#"function () {
    const el = this;
    const styles = elementStyles(el);
    const attr = (name) => (el.hasAttribute(name) ? el.getAttribute(name) : null);
    const className = (typeof el.className === 'string') ? el.className : (attr('class') || '');
    const first = el.firstElementChild;
    return {
        alt: attr('alt'),
        value: el.hasAttribute('value') ? String(el.value !== undefined ? el.value : attr('value')) : null,
        textContent: el.textContent || '',
        outerHtml: el.outerHTML,
        innerHtml: el.innerHTML,
        styles: styles,
        classes: className,
        meta: {
            color: elementColor(styles),
            font: elementFont(styles),
            placeholder: attr('placeholder'),
            href: el.hasAttribute('href') ? (typeof el.href === 'string' ? el.href : attr('href')) : null,
            data: (el.tagName === 'IMG' && el.hasAttribute('src')) ? imageData(el, elementBounds(el, styles).size) : null,
            url: el.hasAttribute('src') ? el.src : ((first && first.hasAttribute('src')) ? first.src : null)
        }
    };
}"#;

/// Meta fields computed inside the page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MetaCandidate {
    pub color: Option<String>,
    pub font: Option<String>,
    pub placeholder: Option<String>,
    pub href: Option<String>,
    pub data: Option<String>,
    pub url: Option<String>,
}

/// Attribute, markup and style data for one node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeBundle {
    pub alt: Option<String>,
    pub value: Option<String>,
    pub text_content: String,
    pub outer_html: String,
    pub inner_html: String,
    /// Raw computed styles, every value coerced to a string.
    pub styles: BTreeMap<String, String>,
    pub classes: String,
    pub meta: MetaCandidate,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBundle {
    #[serde(default)]
    alt: Option<String>,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    text_content: Option<String>,
    outer_html: String,
    #[serde(default)]
    inner_html: Option<String>,
    #[serde(default)]
    styles: Option<BTreeMap<String, Value>>,
    #[serde(default)]
    classes: Option<String>,
    #[serde(default)]
    meta: Option<MetaCandidate>,
}

impl AttributeBundle {
    /// Validate an evaluation result and coerce loosely-typed fields.
    ///
    /// `outerHtml` is the only required field; everything else defaults to
    /// empty. Numeric and boolean style values become strings, `null` style
    /// values are dropped.
    pub fn from_value(value: Value) -> Result<Self, DriverError> {
        if !value.is_object() {
            return Err(DriverError::InvalidResult(format!(
                "expected an object, got {}",
                kind(&value)
            )));
        }

        let raw: RawBundle = serde_json::from_value(value)?;

        let styles = raw
            .styles
            .unwrap_or_default()
            .into_iter()
            .filter_map(|(name, value)| scalar_to_string(value).map(|v| (name, v)))
            .collect();

        Ok(Self {
            alt: raw.alt,
            value: raw.value.and_then(scalar_to_string),
            text_content: raw.text_content.unwrap_or_default(),
            outer_html: raw.outer_html,
            inner_html: raw.inner_html.unwrap_or_default(),
            styles,
            classes: raw.classes.unwrap_or_default(),
            meta: raw.meta.unwrap_or_default(),
        })
    }
}

fn scalar_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
