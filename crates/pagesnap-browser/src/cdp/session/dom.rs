//! DOM operations for CDP page session.

use serde_json::json;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{BoxModel, DomNode, RemoteObject};

use super::core::PageSession;

impl PageSession {
    /// Get the document root node.
    ///
    /// Calling this again invalidates every node id handed out before, so
    /// callers fetch it once per extraction.
    pub async fn get_document(&self) -> Result<DomNode, CdpError> {
        let result = self
            .call("DOM.getDocument", Some(json!({"depth": 0})))
            .await?;

        let root: DomNode = serde_json::from_value(result["root"].clone())?;
        Ok(root)
    }

    /// Run `querySelectorAll` against the subtree of `node_id`.
    pub async fn query_selector_all(
        &self,
        node_id: i64,
        selector: &str,
    ) -> Result<Vec<i64>, CdpError> {
        let result = self
            .call(
                "DOM.querySelectorAll",
                Some(json!({
                    "nodeId": node_id,
                    "selector": selector,
                })),
            )
            .await?;

        let node_ids: Vec<i64> = result["nodeIds"]
            .as_array()
            .map(|arr| arr.iter().filter_map(|v| v.as_i64()).collect())
            .unwrap_or_default();

        Ok(node_ids)
    }

    /// Direct element children of `node_id`, in document order.
    pub async fn child_elements(&self, node_id: i64) -> Result<Vec<i64>, CdpError> {
        self.query_selector_all(node_id, ":scope > *").await
    }

    /// Get box model for node, `None` when it is not rendered.
    pub async fn get_box_model(&self, node_id: i64) -> Result<Option<BoxModel>, CdpError> {
        let result = self
            .call("DOM.getBoxModel", Some(json!({"nodeId": node_id})))
            .await;

        match result {
            Ok(r) => {
                let model: BoxModel = serde_json::from_value(r["model"].clone())?;
                Ok(Some(model))
            }
            Err(e) if e.is_missing_node() => Err(e),
            Err(CdpError::Protocol {
                code: CdpError::SERVER_ERROR,
                ..
            }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Resolve node to runtime object.
    pub async fn resolve_node(&self, node_id: i64) -> Result<RemoteObject, CdpError> {
        let result = self
            .call("DOM.resolveNode", Some(json!({"nodeId": node_id})))
            .await?;

        let obj: RemoteObject = serde_json::from_value(result["object"].clone())?;
        Ok(obj)
    }
}
