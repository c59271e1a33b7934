//! Extraction errors.

use thiserror::Error;

use crate::driver::DriverError;

/// Failure extracting a single node.
///
/// Every variant is scoped to one node: the walker drops the node and keeps
/// going with its siblings.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("{op} failed for node {node}: {source}")]
    Driver {
        node: i64,
        op: &'static str,
        #[source]
        source: DriverError,
    },

    #[error("Query '{selector}' failed: {source}")]
    Query {
        selector: String,
        #[source]
        source: DriverError,
    },

    #[error("{op} timed out for node {node}")]
    Timeout { node: i64, op: &'static str },

    #[error("Extraction cancelled")]
    Cancelled,
}

impl ExtractError {
    /// Whether the node vanished from the document mid-extraction.
    pub fn is_detached(&self) -> bool {
        matches!(
            self,
            ExtractError::Driver {
                source: DriverError::NodeDetached(_),
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_error_display() {
        let err = ExtractError::Driver {
            node: 7,
            op: "evaluate",
            source: DriverError::Script("boom".to_string()),
        };
        let display = err.to_string();
        assert!(display.contains("evaluate"));
        assert!(display.contains("7"));
        assert!(display.contains("boom"));
    }

    #[test]
    fn test_is_detached() {
        let err = ExtractError::Driver {
            node: 1,
            op: "bounding_box",
            source: DriverError::NodeDetached(1),
        };
        assert!(err.is_detached());
        assert!(!ExtractError::Cancelled.is_detached());
        assert!(!ExtractError::Timeout { node: 1, op: "evaluate" }.is_detached());
    }
}
