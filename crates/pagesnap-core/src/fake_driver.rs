//! In-memory page used by the walker and extractor tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{json, Map, Value};

use crate::driver::{DriverError, NodeHandle, PageDriver, Rect};
use crate::types::BoxModel;

#[derive(Debug, Clone, Default)]
pub(crate) struct FakeNode {
    pub children: Vec<i64>,
    pub rect: Option<Rect>,
    pub alt: Option<String>,
    pub value: Option<String>,
    pub text: String,
    pub inner_html: String,
    pub outer_html: String,
    pub styles: Vec<(String, String)>,
    pub classes: String,
    pub href: Option<String>,
    pub detached: bool,
    pub stalls: bool,
    pub malformed: bool,
}

impl FakeNode {
    pub fn new(outer_html: &str) -> Self {
        Self {
            outer_html: outer_html.to_string(),
            ..Default::default()
        }
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn inner(mut self, inner_html: &str) -> Self {
        self.inner_html = inner_html.to_string();
        self
    }

    pub fn alt(mut self, alt: &str) -> Self {
        self.alt = Some(alt.to_string());
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn at(mut self, x: f64, y: f64, width: f64, height: f64) -> Self {
        self.rect = Some(Rect {
            x,
            y,
            width,
            height,
        });
        self
    }

    pub fn style(mut self, name: &str, value: &str) -> Self {
        self.styles.push((name.to_string(), value.to_string()));
        self
    }

    pub fn href(mut self, href: &str) -> Self {
        self.href = Some(href.to_string());
        self
    }

    pub fn children(mut self, children: &[i64]) -> Self {
        self.children = children.to_vec();
        self
    }

    pub fn detached(mut self) -> Self {
        self.detached = true;
        self
    }

    pub fn stalls(mut self) -> Self {
        self.stalls = true;
        self
    }

    pub fn malformed(mut self) -> Self {
        self.malformed = true;
        self
    }

    fn bundle(&self) -> Value {
        if self.malformed {
            return json!(["not", "a", "bundle"]);
        }
        let styles: Map<String, Value> = self
            .styles
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();
        json!({
            "alt": self.alt,
            "value": self.value,
            "textContent": self.text,
            "outerHtml": self.outer_html,
            "innerHtml": self.inner_html,
            "styles": styles,
            "classes": self.classes,
            "meta": {
                "color": self.styles.iter().find(|(k, _)| k == "color").map(|(_, v)| v.clone()),
                "href": self.href,
            }
        })
    }
}

#[derive(Default)]
pub(crate) struct FakeDriver {
    nodes: HashMap<i64, FakeNode>,
    queries: HashMap<String, Vec<i64>>,
    failing_queries: Vec<String>,
    evaluations: AtomicUsize,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(mut self, id: i64, node: FakeNode) -> Self {
        self.nodes.insert(id, node);
        self
    }

    pub fn matches(mut self, selector: &str, ids: &[i64]) -> Self {
        self.queries.insert(selector.to_string(), ids.to_vec());
        self
    }

    pub fn failing(mut self, selector: &str) -> Self {
        self.failing_queries.push(selector.to_string());
        self
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations.load(Ordering::SeqCst)
    }

    async fn lookup(&self, node: &NodeHandle) -> Result<&FakeNode, DriverError> {
        let found = self
            .nodes
            .get(&node.id())
            .ok_or(DriverError::NodeDetached(node.id()))?;
        if found.stalls {
            std::future::pending::<()>().await;
        }
        if found.detached {
            return Err(DriverError::NodeDetached(node.id()));
        }
        Ok(found)
    }
}

#[async_trait]
impl PageDriver for FakeDriver {
    async fn query_all(&self, selector: &str) -> Result<Vec<NodeHandle>, DriverError> {
        if self.failing_queries.iter().any(|s| s == selector) {
            return Err(DriverError::InvalidSelector(selector.to_string()));
        }
        Ok(self
            .queries
            .get(selector)
            .map(|ids| ids.iter().copied().map(NodeHandle::new).collect())
            .unwrap_or_default())
    }

    async fn child_elements(&self, node: &NodeHandle) -> Result<Vec<NodeHandle>, DriverError> {
        let found = self.lookup(node).await?;
        Ok(found.children.iter().copied().map(NodeHandle::new).collect())
    }

    async fn bounding_box(&self, node: &NodeHandle) -> Result<Option<Rect>, DriverError> {
        Ok(self.lookup(node).await?.rect)
    }

    async fn box_model(&self, node: &NodeHandle) -> Result<Option<BoxModel>, DriverError> {
        Ok(self.lookup(node).await?.rect.map(|r| {
            let quad = vec![
                r.x,
                r.y,
                r.x + r.width,
                r.y,
                r.x + r.width,
                r.y + r.height,
                r.x,
                r.y + r.height,
            ];
            BoxModel {
                content: quad.clone(),
                padding: quad.clone(),
                border: quad.clone(),
                margin: quad,
                width: r.width as i64,
                height: r.height as i64,
            }
        }))
    }

    async fn evaluate(&self, _function: &str, node: &NodeHandle) -> Result<Value, DriverError> {
        let found = self.lookup(node).await?;
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        Ok(found.bundle())
    }
}
