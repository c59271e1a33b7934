//! JavaScript execution operations for CDP page session.

use serde_json::{json, Value};

use crate::cdp::error::CdpError;
use crate::cdp::protocol::ExceptionDetails;

use super::core::PageSession;

impl PageSession {
    /// Evaluate a JavaScript expression and return its value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        Self::unwrap_result(result)
    }

    /// Call a function declaration with `this` bound to a remote object.
    pub async fn call_function_on(
        &self,
        object_id: &str,
        function: &str,
    ) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.callFunctionOn",
                Some(json!({
                    "objectId": object_id,
                    "functionDeclaration": function,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        Self::unwrap_result(result)
    }

    /// Release a remote object handle.
    pub async fn release_object(&self, object_id: &str) -> Result<(), CdpError> {
        self.call(
            "Runtime.releaseObject",
            Some(json!({"objectId": object_id})),
        )
        .await?;
        Ok(())
    }

    pub(super) fn unwrap_result(result: Value) -> Result<Value, CdpError> {
        if let Some(exception) = result.get("exceptionDetails") {
            let message = serde_json::from_value::<ExceptionDetails>(exception.clone())
                .map(|details| details.message().to_string())
                .unwrap_or_else(|_| exception["text"].as_str().unwrap_or("Unknown error").to_string());
            return Err(CdpError::JavaScript(message));
        }

        Ok(result
            .get("result")
            .and_then(|r| r.get("value"))
            .cloned()
            .unwrap_or(Value::Null))
    }
}
