//! Page-driving capability consumed by the extraction core.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::types::BoxModel;

/// Opaque handle to a live DOM element owned by a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeHandle(i64);

impl NodeHandle {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn id(&self) -> i64 {
        self.0
    }
}

/// Measured rectangle in CSS pixels, before truncation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Errors reported by a [`PageDriver`].
#[derive(Debug, Error)]
pub enum DriverError {
    /// The node left the document between selection and use.
    #[error("Node {0} is detached from the document")]
    NodeDetached(i64),

    /// The selector was rejected by the page.
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// An evaluation returned something that does not fit the expected schema.
    #[error("Invalid evaluation result: {0}")]
    InvalidResult(String),

    /// In-page script threw.
    #[error("Script error: {0}")]
    Script(String),

    #[error("Timeout: {0}")]
    Timeout(String),

    /// Transport or protocol failure talking to the rendering process.
    #[error("Protocol error: {0}")]
    Protocol(String),
}

impl From<serde_json::Error> for DriverError {
    fn from(e: serde_json::Error) -> Self {
        DriverError::InvalidResult(e.to_string())
    }
}

/// Access to a rendered page.
///
/// Implementations must tolerate concurrent calls; the walker issues queries
/// for sibling subtrees and for every category at the same time.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// All elements in the document matching `selector`, in document order.
    async fn query_all(&self, selector: &str) -> Result<Vec<NodeHandle>, DriverError>;

    /// Direct element children of `node`, in document order.
    async fn child_elements(&self, node: &NodeHandle) -> Result<Vec<NodeHandle>, DriverError>;

    /// Border-box rectangle, or `None` when the element has no box.
    async fn bounding_box(&self, node: &NodeHandle) -> Result<Option<Rect>, DriverError>;

    /// Content/padding/border/margin quads, or `None` when not rendered.
    async fn box_model(&self, node: &NodeHandle) -> Result<Option<BoxModel>, DriverError>;

    /// Call a function declaration in the page with `this` bound to `node`.
    async fn evaluate(&self, function: &str, node: &NodeHandle) -> Result<Value, DriverError>;
}
