//! Read-endpoint body handling.

use serde_json::{json, Value};

/// Converts a spreadsheet feed response into the JSON relayed to clients.
///
/// An empty body becomes `[]`, valid JSON is passed through untouched and
/// anything else is wrapped as `{"raw": <text>}`.
pub fn interpret_feed_body(text: &str) -> Value {
    if text.is_empty() {
        return Value::Array(Vec::new());
    }
    serde_json::from_str(text).unwrap_or_else(|e| {
        tracing::warn!("Failed to parse feed JSON: {e}");
        json!({ "raw": text })
    })
}
