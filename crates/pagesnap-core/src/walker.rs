//! Depth-first node extraction.

use std::future::Future;
use std::time::Duration;

use futures::future::{join_all, BoxFuture};
use futures::FutureExt;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::bundle::{AttributeBundle, ATTRIBUTE_BUNDLE_FN};
use crate::driver::{DriverError, NodeHandle, PageDriver};
use crate::error::ExtractError;
use crate::extract::ExtractOptions;
use crate::style::StyleCompactor;
use crate::title::{TitleCandidates, TitleResolver};
use crate::types::{escape_quotes, Bounds, ElementRecord, RecordMeta};

/// A record plus the last text-bearing fragment of its subtree in document
/// order, which its ancestors need for title correction.
struct Walked {
    record: ElementRecord,
    trailing_fragment: Option<String>,
}

enum Failure {
    Driver(DriverError),
    Timeout,
    Cancelled,
}

/// Extracts element trees from a page in a single depth-first pass.
///
/// Every node is visited exactly once: a node's `children` are assembled from
/// the records of its direct element children. Sibling subtrees are extracted
/// concurrently. Each driver round trip is bounded by the node timeout, and
/// a failed node drops out together with its subtree while its siblings and
/// ancestors carry on.
pub struct NodeWalker<'a> {
    driver: &'a dyn PageDriver,
    compactor: &'a StyleCompactor,
    node_timeout: Duration,
    permits: Semaphore,
    cancel: CancellationToken,
}

impl<'a> NodeWalker<'a> {
    pub fn new(
        driver: &'a dyn PageDriver,
        compactor: &'a StyleCompactor,
        options: &ExtractOptions,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            driver,
            compactor,
            node_timeout: options.node_timeout,
            permits: Semaphore::new(options.max_concurrency.max(1)),
            cancel,
        }
    }

    /// Extract one node and its element subtree.
    pub async fn extract(&self, node: NodeHandle) -> Result<ElementRecord, ExtractError> {
        self.walk(node).await.map(|walked| walked.record)
    }

    /// Extract several nodes concurrently, keeping the ones that succeed in
    /// their original order.
    pub async fn extract_all(&self, nodes: Vec<NodeHandle>) -> Vec<ElementRecord> {
        let results = join_all(nodes.into_iter().map(|node| self.walk(node))).await;
        survivors(results)
            .into_iter()
            .map(|walked| walked.record)
            .collect()
    }

    /// Run a document query under the same deadline and cancellation rules.
    pub async fn query_all(&self, selector: &str) -> Result<Vec<NodeHandle>, ExtractError> {
        self.guarded(self.driver.query_all(selector))
            .await
            .map_err(|failure| match failure {
                Failure::Driver(source) => ExtractError::Query {
                    selector: selector.to_string(),
                    source,
                },
                Failure::Timeout => ExtractError::Query {
                    selector: selector.to_string(),
                    source: DriverError::Timeout(format!("query exceeded {:?}", self.node_timeout)),
                },
                Failure::Cancelled => ExtractError::Cancelled,
            })
    }

    fn walk(&self, node: NodeHandle) -> BoxFuture<'_, Result<Walked, ExtractError>> {
        async move {
            let (rect, box_model, bundle, children) = tokio::try_join!(
                self.round_trip(node, "bounding_box", self.driver.bounding_box(&node)),
                self.round_trip(node, "box_model", self.driver.box_model(&node)),
                self.attributes(node),
                self.children(node),
            )?;

            let descendant_fragment = children
                .iter()
                .rev()
                .find_map(|child| child.trailing_fragment.clone());

            let candidates = TitleCandidates {
                alt: bundle.alt.as_deref(),
                value: bundle.value.as_deref(),
                text_content: &bundle.text_content,
            };
            let title = TitleResolver::resolve(
                &candidates,
                !children.is_empty(),
                descendant_fragment.as_deref(),
            );

            let trailing_fragment = descendant_fragment.or_else(|| {
                TitleResolver::is_text_fragment(&bundle.inner_html)
                    .then(|| bundle.inner_html.clone())
            });

            let styles = self.compactor.compact_map(&bundle.styles);
            let meta = RecordMeta {
                border: styles.get("border").cloned(),
                color: bundle.meta.color,
                font: bundle.meta.font,
                text: title.clone(),
                placeholder: bundle.meta.placeholder,
                href: bundle.meta.href,
                data: bundle.meta.data,
                url: bundle.meta.url,
            };

            debug!(node = node.id(), children = children.len(), "Extracted node");

            Ok(Walked {
                record: ElementRecord {
                    bounds: rect.as_ref().map(Bounds::from_rect),
                    title,
                    html: escape_quotes(&bundle.outer_html),
                    styles,
                    classes: bundle.classes,
                    meta,
                    children: children.into_iter().map(|child| child.record).collect(),
                    box_model,
                },
                trailing_fragment,
            })
        }
        .boxed()
    }

    async fn children(&self, node: NodeHandle) -> Result<Vec<Walked>, ExtractError> {
        let handles = self
            .round_trip(node, "child_elements", self.driver.child_elements(&node))
            .await?;
        let results = join_all(handles.into_iter().map(|child| self.walk(child))).await;
        Ok(survivors(results))
    }

    async fn attributes(&self, node: NodeHandle) -> Result<AttributeBundle, ExtractError> {
        let value = self
            .round_trip(node, "evaluate", self.driver.evaluate(ATTRIBUTE_BUNDLE_FN, &node))
            .await?;
        AttributeBundle::from_value(value).map_err(|source| ExtractError::Driver {
            node: node.id(),
            op: "evaluate",
            source,
        })
    }

    async fn round_trip<T, F>(
        &self,
        node: NodeHandle,
        op: &'static str,
        call: F,
    ) -> Result<T, ExtractError>
    where
        F: Future<Output = Result<T, DriverError>>,
    {
        self.guarded(call).await.map_err(|failure| match failure {
            Failure::Driver(source) => ExtractError::Driver {
                node: node.id(),
                op,
                source,
            },
            Failure::Timeout => ExtractError::Timeout { node: node.id(), op },
            Failure::Cancelled => ExtractError::Cancelled,
        })
    }

    async fn guarded<T, F>(&self, call: F) -> Result<T, Failure>
    where
        F: Future<Output = Result<T, DriverError>>,
    {
        let bounded = async {
            let _permit = self
                .permits
                .acquire()
                .await
                .map_err(|_| Failure::Cancelled)?;
            match tokio::time::timeout(self.node_timeout, call).await {
                Ok(result) => result.map_err(Failure::Driver),
                Err(_) => Err(Failure::Timeout),
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(Failure::Cancelled),
            result = bounded => result,
        }
    }
}

fn survivors(results: Vec<Result<Walked, ExtractError>>) -> Vec<Walked> {
    results
        .into_iter()
        .filter_map(|result| match result {
            Ok(walked) => Some(walked),
            Err(ExtractError::Cancelled) => None,
            Err(e) if e.is_detached() => {
                debug!("Dropping detached node: {}", e);
                None
            }
            Err(e) => {
                warn!("Dropping node: {}", e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "walker_tests.rs"]
mod tests;
