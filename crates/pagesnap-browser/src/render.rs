//! Per-device render worker producing design documents.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use futures::future::join_all;
use pagesnap_config::{Config, StylesConfig};
use pagesnap_core::{
    escape_quotes, Category, CategorySelector, DesignDocument, DocumentElements, ExtractOptions,
    Extractor, MetaAggregator, StyleClassificationTable, StyleCompactor, StyleGroup,
};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use url::Url;

use crate::cdp::{CdpClient, PageSession, ScreenshotFormat};
use crate::devices::DeviceProfile;
use crate::driver::CdpPageDriver;
use crate::helpers::{DOCUMENT_STYLES, PAGE_HELPERS};
use crate::manager::{BrowserError, BrowserManager};

/// Page-level settings for a render.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Stored as the document title.
    pub project: String,
    pub network_idle: std::time::Duration,
    pub navigation_timeout: std::time::Duration,
}

/// Outcome of rendering one device.
#[derive(Debug)]
pub struct DeviceRender {
    pub device: String,
    pub result: Result<DesignDocument, BrowserError>,
}

/// Renders a URL under several device emulations at once.
pub struct RenderWorker {
    manager: Arc<BrowserManager>,
    extractor: Extractor,
    options: RenderOptions,
    cancel: CancellationToken,
}

impl RenderWorker {
    pub fn new(manager: Arc<BrowserManager>, extractor: Extractor, options: RenderOptions) -> Self {
        Self {
            manager,
            extractor,
            options,
            cancel: CancellationToken::new(),
        }
    }

    /// Build a worker from loaded configuration.
    pub fn from_config(config: &Config, manager: Arc<BrowserManager>) -> Self {
        let extractor = Extractor::new(
            CategorySelector::default(),
            StyleCompactor::new(style_table(&config.styles)),
            ExtractOptions {
                node_timeout: config.extract.node_timeout(),
                max_concurrency: config.extract.max_concurrency,
            },
        );
        let options = RenderOptions {
            project: config
                .output
                .project
                .clone()
                .unwrap_or_else(project_name),
            network_idle: config.extract.network_idle(),
            navigation_timeout: config.extract.navigation_timeout(),
        };
        Self::new(manager, extractor, options)
    }

    /// Stop in-flight extractions when `cancel` fires.
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Render `url` once per device, concurrently.
    ///
    /// Fails only when the URL is invalid or the browser cannot be reached;
    /// every other failure is reported against its device.
    pub async fn render(
        &self,
        url: &str,
        devices: &[DeviceProfile],
    ) -> Result<Vec<DeviceRender>, BrowserError> {
        Url::parse(url).map_err(|e| BrowserError::InvalidUrl {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let client = self.manager.connect().await?;

        let renders = join_all(devices.iter().map(|device| {
            let client = &client;
            async move {
                let result = self.render_device(client, url, device).await;
                match &result {
                    Ok(doc) => info!(
                        device = %device.name,
                        elements = doc.elements.len(),
                        "Rendered device"
                    ),
                    Err(e) => warn!(device = %device.name, "Render failed: {}", e),
                }
                DeviceRender {
                    device: device.name.clone(),
                    result,
                }
            }
        }))
        .await;

        Ok(renders)
    }

    async fn render_device(
        &self,
        client: &CdpClient,
        url: &str,
        device: &DeviceProfile,
    ) -> Result<DesignDocument, BrowserError> {
        let session = client.new_page().await?;
        let result = self.capture(&session, url, device).await;
        if let Err(e) = client.close_page(&session).await {
            warn!(device = %device.name, "Failed to close page: {}", e);
        }
        result
    }

    async fn capture(
        &self,
        session: &PageSession,
        url: &str,
        device: &DeviceProfile,
    ) -> Result<DesignDocument, BrowserError> {
        info!(device = %device.name, url, "Rendering");

        device.apply(session).await?;
        session.navigate(url, self.options.navigation_timeout).await?;
        if let Err(e) = session
            .wait_for_network_idle(self.options.network_idle, self.options.navigation_timeout)
            .await
        {
            warn!(device = %device.name, "Network never settled, extracting anyway: {}", e);
        }
        session.evaluate(PAGE_HELPERS).await?;

        let driver = CdpPageDriver::new(session);
        let elements = self
            .extractor
            .extract_with_cancel(&driver, self.cancel.child_token())
            .await;
        let meta = MetaAggregator::aggregate(&elements);

        let raw_styles = session.evaluate(DOCUMENT_STYLES).await?;
        let styles = self.extractor.compactor().compact_map(&string_map(&raw_styles));

        Ok(DesignDocument {
            device: device.name.clone(),
            html: escape_quotes(&session.get_content().await?),
            title: self.options.project.clone(),
            description: session.get_title().await?,
            url: session.get_url().await?,
            image: session.screenshot(ScreenshotFormat::Png, true).await?,
            styles,
            links: link_list(&elements),
            colors: meta.colors,
            fonts: meta.fonts,
            elements,
        })
    }
}

/// Built-in classification table with any configured groups replaced.
pub fn style_table(styles: &StylesConfig) -> StyleClassificationTable {
    let groups = [
        (StyleGroup::Auto, &styles.auto),
        (StyleGroup::Condense, &styles.condense),
        (StyleGroup::None, &styles.none),
        (StyleGroup::Normal, &styles.normal),
        (StyleGroup::Zero, &styles.zero),
    ];
    groups
        .into_iter()
        .fold(StyleClassificationTable::default(), |table, (group, entries)| {
            match entries {
                Some(entries) => table.with_group(group, entries.clone()),
                None => table,
            }
        })
}

/// Space-separated hrefs of the extracted links, in document order.
pub fn link_list(elements: &DocumentElements) -> String {
    elements
        .get(Category::Links)
        .iter()
        .filter_map(|link| link.meta.href.as_deref())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Name of the current working directory.
pub fn project_name() -> String {
    std::env::current_dir()
        .ok()
        .as_deref()
        .and_then(Path::file_name)
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Computed styles as strings; nulls dropped, scalars stringified.
fn string_map(value: &Value) -> BTreeMap<String, String> {
    let Some(map) = value.as_object() else {
        return BTreeMap::new();
    };
    map.iter()
        .filter_map(|(name, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((name.clone(), s.clone())),
            other => Some((name.clone(), other.to_string())),
        })
        .collect()
}

#[cfg(test)]
#[path = "render_tests.rs"]
mod tests;
