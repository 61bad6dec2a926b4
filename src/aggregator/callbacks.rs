//! Best-effort invocation of the explain and profiler callbacks.
//!
//! A callback that errors or panics degrades to an empty result for that
//! one query. The failure text is kept for the report.

use crate::utils::error::CallbackError;
use log::warn;
use serde_json::Value;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Callback taking SQL text and returning structured data
pub type QueryCallback = Box<dyn Fn(&str) -> anyhow::Result<Value>>;

/// Result attached to a query whose callback failed
pub fn empty_result() -> Value {
    Value::Array(Vec::new())
}

/// Run a callback, catching errors and panics
pub fn invoke(callback: &QueryCallback, argument: &str) -> Result<Value, CallbackError> {
    match catch_unwind(AssertUnwindSafe(|| callback(argument))) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(CallbackError::Failed(e)),
        Err(payload) => Err(CallbackError::Panicked(panic_message(payload.as_ref()))),
    }
}

/// Run a callback and fold any failure into an empty result plus its message
pub fn invoke_best_effort(
    name: &str,
    callback: &QueryCallback,
    argument: &str,
) -> (Value, Option<String>) {
    match invoke(callback, argument) {
        Ok(value) => (value, None),
        Err(e) => {
            warn!("Query {} callback failed: {}", name, e);
            (empty_result(), Some(e.to_string()))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_successful_callback() {
        let callback: QueryCallback = Box::new(|sql: &str| -> anyhow::Result<Value> {
            Ok(json!({ "sql": sql }))
        });
        let (value, error) = invoke_best_effort("explain", &callback, "EXPLAIN SELECT 1");

        assert_eq!(value, json!({ "sql": "EXPLAIN SELECT 1" }));
        assert!(error.is_none());
    }

    #[test]
    fn test_failing_callback_degrades() {
        let callback: QueryCallback = Box::new(|_: &str| -> anyhow::Result<Value> {
            Err(anyhow::anyhow!("connection lost"))
        });
        let (value, error) = invoke_best_effort("explain", &callback, "EXPLAIN SELECT 1");

        assert_eq!(value, empty_result());
        assert_eq!(error.as_deref(), Some("callback failed: connection lost"));
    }

    #[test]
    fn test_panicking_callback_degrades() {
        let callback: QueryCallback = Box::new(|_: &str| -> anyhow::Result<Value> {
            panic!("profiler exploded")
        });
        let (value, error) = invoke_best_effort("profiler", &callback, "SELECT 1");

        assert_eq!(value, empty_result());
        assert_eq!(error.as_deref(), Some("callback panicked: profiler exploded"));
    }
}
