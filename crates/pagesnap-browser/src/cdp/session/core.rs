//! Core session struct and CDP command dispatch.

use serde_json::{json, Value};
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

use crate::cdp::client::Transport;
use crate::cdp::error::CdpError;
use crate::cdp::protocol::{CdpResponse, ScreenshotFormat};

/// A session attached to a single page/target.
pub struct PageSession {
    pub(super) target_id: String,
    pub(super) session_id: String,
    pub(super) transport: Transport,
    /// Events routed to this session, drained while waiting for network idle.
    pub(super) events: Mutex<mpsc::UnboundedReceiver<CdpResponse>>,
}

impl PageSession {
    pub(crate) fn new(
        target_id: String,
        session_id: String,
        transport: Transport,
        event_rx: mpsc::UnboundedReceiver<CdpResponse>,
    ) -> Self {
        Self {
            target_id,
            session_id,
            transport,
            events: Mutex::new(event_rx),
        }
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Send a CDP command to this page session.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport
            .call(method, params, Some(&self.session_id))
            .await
    }

    /// Enable required CDP domains.
    pub(crate) async fn enable_domains(&self) -> Result<(), CdpError> {
        self.call("Page.enable", None).await?;
        self.call("DOM.enable", None).await?;
        self.call("Runtime.enable", None).await?;
        self.call("Network.enable", None).await?;

        debug!("Enabled CDP domains for session {}", self.session_id);
        Ok(())
    }

    /// Serialized markup of the whole document, doctype included.
    pub async fn get_content(&self) -> Result<String, CdpError> {
        let result = self
            .evaluate(
                "(() => { const dt = document.doctype; \
                 const prefix = dt ? new XMLSerializer().serializeToString(dt) : ''; \
                 return prefix + document.documentElement.outerHTML; })()",
            )
            .await?;
        Ok(result.as_str().unwrap_or("").to_string())
    }

    /// Take a screenshot, returned base64 encoded.
    pub async fn screenshot(
        &self,
        format: ScreenshotFormat,
        full_page: bool,
    ) -> Result<String, CdpError> {
        let params = json!({
            "format": format,
            "captureBeyondViewport": full_page,
        });

        let result = self.call("Page.captureScreenshot", Some(params)).await?;

        result["data"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| CdpError::InvalidResponse("Missing screenshot data".to_string()))
    }
}
