//! Navigation and load-state operations for CDP page session.

use std::collections::HashSet;
use std::time::Duration;

use serde_json::json;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::CdpResponse;

use super::core::PageSession;

/// Requests allowed in flight while the network still counts as idle.
const IDLE_CONNECTIONS: usize = 2;

impl PageSession {
    /// Navigate to URL and wait for the document to load.
    pub async fn navigate(&self, url: &str, timeout: Duration) -> Result<String, CdpError> {
        let result = self
            .call("Page.navigate", Some(json!({"url": url})))
            .await?;

        if let Some(error) = result.get("errorText").and_then(|e| e.as_str()) {
            return Err(CdpError::NavigationFailed(format!("{}: {}", url, error)));
        }

        let frame_id = result["frameId"]
            .as_str()
            .unwrap_or("main")
            .to_string();

        self.wait_for_load(timeout).await?;

        debug!("Navigated to {}", url);
        Ok(frame_id)
    }

    /// Poll `document.readyState` until the page has loaded.
    pub async fn wait_for_load(&self, timeout: Duration) -> Result<(), CdpError> {
        let start = Instant::now();

        loop {
            let result = self.evaluate("document.readyState").await?;

            if result.as_str() == Some("complete") {
                return Ok(());
            }

            if start.elapsed() > timeout {
                return Err(CdpError::Timeout("Page load timeout".to_string()));
            }

            tokio::time::sleep(Duration::from_millis(100)).await;
        }
    }

    /// Wait until at most two requests have been in flight for `quiet`.
    ///
    /// Network tracking is switched off afterwards, whatever the outcome, and
    /// queued events are discarded.
    pub async fn wait_for_network_idle(
        &self,
        quiet: Duration,
        timeout: Duration,
    ) -> Result<(), CdpError> {
        let mut events = self.events.lock().await;
        let result = Self::await_idle(&mut events, quiet, timeout).await;

        if let Err(e) = self.call("Network.disable", None).await {
            debug!("Failed to disable network events: {}", e);
        }
        let dropped = drain_events(&mut events);
        debug!(dropped, "Stopped network tracking for session {}", self.session_id);

        result
    }

    pub(super) async fn await_idle(
        events: &mut mpsc::UnboundedReceiver<CdpResponse>,
        quiet: Duration,
        timeout: Duration,
    ) -> Result<(), CdpError> {
        let deadline = Instant::now() + timeout;
        let mut tracker = NetworkTracker::default();
        let mut idle_since = Some(Instant::now());

        loop {
            let now = Instant::now();
            if let Some(since) = idle_since {
                if now.duration_since(since) >= quiet {
                    return Ok(());
                }
            }
            if now >= deadline {
                return Err(CdpError::Timeout("Network idle timeout".to_string()));
            }

            let wake = match idle_since {
                Some(since) => (since + quiet).min(deadline),
                None => deadline,
            };

            match tokio::time::timeout_at(wake, events.recv()).await {
                Ok(Some(event)) => {
                    tracker.observe(&event);
                    if !tracker.is_idle() {
                        idle_since = None;
                    } else if idle_since.is_none() {
                        idle_since = Some(Instant::now());
                    }
                }
                Ok(None) => return Err(CdpError::SessionClosed),
                Err(_) => {}
            }
        }
    }

    pub async fn get_url(&self) -> Result<String, CdpError> {
        let result = self.evaluate("window.location.href").await?;
        Ok(result.as_str().unwrap_or("").to_string())
    }

    pub async fn get_title(&self) -> Result<String, CdpError> {
        let result = self.evaluate("document.title").await?;
        Ok(result.as_str().unwrap_or("").to_string())
    }
}

/// Discard every event already queued, returning how many were dropped.
pub(super) fn drain_events(events: &mut mpsc::UnboundedReceiver<CdpResponse>) -> usize {
    let mut dropped = 0;
    while events.try_recv().is_ok() {
        dropped += 1;
    }
    dropped
}

/// In-flight request bookkeeping from `Network.*` events.
#[derive(Debug, Default)]
pub(super) struct NetworkTracker {
    inflight: HashSet<String>,
}

impl NetworkTracker {
    pub(super) fn observe(&mut self, event: &CdpResponse) {
        let request_id = event
            .params
            .as_ref()
            .and_then(|p| p["requestId"].as_str());
        let Some(request_id) = request_id else {
            return;
        };

        match event.method.as_deref() {
            Some("Network.requestWillBeSent") => {
                self.inflight.insert(request_id.to_string());
            }
            Some("Network.loadingFinished") | Some("Network.loadingFailed") => {
                self.inflight.remove(request_id);
            }
            _ => {}
        }
    }

    pub(super) fn inflight(&self) -> usize {
        self.inflight.len()
    }

    pub(super) fn is_idle(&self) -> bool {
        self.inflight.len() <= IDLE_CONNECTIONS
    }
}
