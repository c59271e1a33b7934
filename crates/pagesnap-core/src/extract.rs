//! Document-level extraction across all categories.

use std::time::Duration;

use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::category::{Category, CategorySelector};
use crate::driver::{NodeHandle, PageDriver};
use crate::error::ExtractError;
use crate::style::StyleCompactor;
use crate::types::{DocumentElements, ElementRecord};
use crate::walker::NodeWalker;

/// Tuning for an extraction pass.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Deadline for each round trip to the page.
    pub node_timeout: Duration,
    /// Maximum number of driver calls in flight at once.
    pub max_concurrency: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            node_timeout: Duration::from_secs(10),
            max_concurrency: 32,
        }
    }
}

/// Runs the category queries and walks every match.
pub struct Extractor {
    selector: CategorySelector,
    compactor: StyleCompactor,
    options: ExtractOptions,
}

impl Extractor {
    pub fn new(
        selector: CategorySelector,
        compactor: StyleCompactor,
        options: ExtractOptions,
    ) -> Self {
        Self {
            selector,
            compactor,
            options,
        }
    }

    pub fn selector(&self) -> &CategorySelector {
        &self.selector
    }

    pub fn compactor(&self) -> &StyleCompactor {
        &self.compactor
    }

    /// Extract every category from the page.
    pub async fn extract(&self, driver: &dyn PageDriver) -> DocumentElements {
        self.extract_with_cancel(driver, CancellationToken::new())
            .await
    }

    /// Extract every category, stopping early once `cancel` fires.
    ///
    /// Nodes still pending at cancellation are omitted; whatever finished is
    /// returned.
    pub async fn extract_with_cancel(
        &self,
        driver: &dyn PageDriver,
        cancel: CancellationToken,
    ) -> DocumentElements {
        let walker = NodeWalker::new(driver, &self.compactor, &self.options, cancel);

        let results = join_all(
            Category::ALL
                .into_iter()
                .map(|category| self.extract_category(&walker, category)),
        )
        .await;

        let mut elements = DocumentElements::new();
        for (category, records) in results {
            elements.insert(category, records);
        }
        elements
    }

    /// Extract a single node outside of any category.
    pub async fn extract_node(
        &self,
        driver: &dyn PageDriver,
        node: NodeHandle,
    ) -> Result<ElementRecord, ExtractError> {
        NodeWalker::new(driver, &self.compactor, &self.options, CancellationToken::new())
            .extract(node)
            .await
    }

    async fn extract_category(
        &self,
        walker: &NodeWalker<'_>,
        category: Category,
    ) -> (Category, Vec<ElementRecord>) {
        let selector = self.selector.resolve(category);
        let handles = match walker.query_all(selector).await {
            Ok(handles) => handles,
            Err(ExtractError::Cancelled) => return (category, Vec::new()),
            Err(e) => {
                warn!(category = %category, "Category query failed: {}", e);
                return (category, Vec::new());
            }
        };

        let matched = handles.len();
        let records: Vec<ElementRecord> = walker
            .extract_all(handles)
            .await
            .into_iter()
            .filter(|record| self.selector.retains(category, record))
            .collect();

        info!(
            category = %category,
            matched,
            kept = records.len(),
            "Extracted category"
        );
        (category, records)
    }
}

/// Extract all categories with the default style table and options.
pub async fn extract(selector: &CategorySelector, driver: &dyn PageDriver) -> DocumentElements {
    Extractor::new(
        selector.clone(),
        StyleCompactor::default(),
        ExtractOptions::default(),
    )
    .extract(driver)
    .await
}

#[cfg(test)]
#[path = "extract_tests.rs"]
mod tests;
