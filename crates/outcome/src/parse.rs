use serde_json::{Map, Value};

/// Attempt to interpret task stdout as a single JSON object.
///
/// Anything else yields `None`: arrays and scalars are not task objects,
/// and malformed input degrades to raw output rather than an error.
pub(crate) fn parse_object(stdout: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(stdout) {
        Ok(Value::Object(map)) => Some(map),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!(error = %e, "task stdout is not valid JSON, treating as raw output");
            None
        }
    }
}
