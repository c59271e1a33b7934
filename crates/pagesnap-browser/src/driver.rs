//! [`PageDriver`] over a CDP page session.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use pagesnap_core::{BoxModel, DriverError, NodeHandle, PageDriver, Rect};
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::debug;

use crate::cdp::{self, CdpError, PageSession};

/// Drives extraction against one attached page.
///
/// Node handles are CDP `nodeId`s, valid until the document is replaced.
pub struct CdpPageDriver<'a> {
    session: &'a PageSession,
    root: OnceCell<i64>,
    boxes: NodeCache<Option<cdp::BoxModel>>,
}

impl<'a> CdpPageDriver<'a> {
    pub fn new(session: &'a PageSession) -> Self {
        Self {
            session,
            root: OnceCell::new(),
            boxes: NodeCache::default(),
        }
    }

    async fn root(&self) -> Result<i64, DriverError> {
        self.root
            .get_or_try_init(|| async {
                let document = self
                    .session
                    .get_document()
                    .await
                    .map_err(|e| driver_error(None, e))?;
                debug!(node = document.node_id, "Resolved document root");
                Ok(document.node_id)
            })
            .await
            .copied()
    }

    /// `bounding_box` and `box_model` share one `DOM.getBoxModel` per node.
    async fn cdp_box_model(&self, node: &NodeHandle) -> Result<Option<cdp::BoxModel>, DriverError> {
        self.boxes
            .get_or_fetch(node.id(), move || async move {
                self.session
                    .get_box_model(node.id())
                    .await
                    .map_err(|e| driver_error(Some(node.id()), e))
            })
            .await
    }
}

/// Per-node memo of a driver result. Concurrent callers for the same node
/// wait on a single fetch; failures are not cached.
struct NodeCache<T> {
    cells: Mutex<HashMap<i64, Arc<OnceCell<T>>>>,
}

impl<T> Default for NodeCache<T> {
    fn default() -> Self {
        Self {
            cells: Mutex::new(HashMap::new()),
        }
    }
}

impl<T: Clone> NodeCache<T> {
    async fn get_or_fetch<F, Fut>(&self, id: i64, fetch: F) -> Result<T, DriverError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, DriverError>>,
    {
        let cell = self.cells.lock().entry(id).or_default().clone();
        cell.get_or_try_init(fetch).await.cloned()
    }
}

#[async_trait]
impl PageDriver for CdpPageDriver<'_> {
    async fn query_all(&self, selector: &str) -> Result<Vec<NodeHandle>, DriverError> {
        let root = self.root().await?;
        let ids = self
            .session
            .query_selector_all(root, selector)
            .await
            .map_err(|e| match e {
                CdpError::Protocol {
                    code: CdpError::SERVER_ERROR,
                    ..
                } => DriverError::InvalidSelector(format!("{}: {}", selector, e)),
                e => driver_error(None, e),
            })?;
        Ok(ids.into_iter().map(NodeHandle::new).collect())
    }

    async fn child_elements(&self, node: &NodeHandle) -> Result<Vec<NodeHandle>, DriverError> {
        let ids = self
            .session
            .child_elements(node.id())
            .await
            .map_err(|e| driver_error(Some(node.id()), e))?;
        Ok(ids.into_iter().map(NodeHandle::new).collect())
    }

    async fn bounding_box(&self, node: &NodeHandle) -> Result<Option<Rect>, DriverError> {
        let model = self.cdp_box_model(node).await?;
        Ok(model
            .and_then(|m| m.border_rect())
            .map(|(x, y, width, height)| Rect {
                x,
                y,
                width,
                height,
            }))
    }

    async fn box_model(&self, node: &NodeHandle) -> Result<Option<BoxModel>, DriverError> {
        let model = self.cdp_box_model(node).await?;
        Ok(model.map(|m| BoxModel {
            content: m.content,
            padding: m.padding,
            border: m.border,
            margin: m.margin,
            width: m.width,
            height: m.height,
        }))
    }

    async fn evaluate(&self, function: &str, node: &NodeHandle) -> Result<Value, DriverError> {
        let object = self
            .session
            .resolve_node(node.id())
            .await
            .map_err(|e| driver_error(Some(node.id()), e))?;
        let object_id = object
            .object_id
            .ok_or(DriverError::NodeDetached(node.id()))?;

        let result = self
            .session
            .call_function_on(&object_id, function)
            .await
            .map_err(|e| driver_error(Some(node.id()), e));

        if let Err(e) = self.session.release_object(&object_id).await {
            debug!(node = node.id(), "Failed to release remote object: {}", e);
        }
        result
    }
}

/// Map a CDP failure onto the driver error taxonomy.
pub(crate) fn driver_error(node: Option<i64>, e: CdpError) -> DriverError {
    match (node, e) {
        (Some(id), e) if e.is_missing_node() => DriverError::NodeDetached(id),
        (_, CdpError::JavaScript(msg)) => DriverError::Script(msg),
        (_, CdpError::Timeout(msg)) => DriverError::Timeout(msg),
        (_, CdpError::Serialization(e)) => DriverError::InvalidResult(e.to_string()),
        (_, CdpError::InvalidResponse(msg)) => DriverError::InvalidResult(msg),
        (_, e) => DriverError::Protocol(e.to_string()),
    }
}
