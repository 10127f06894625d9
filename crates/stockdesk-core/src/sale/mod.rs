//! Sales data handling.
//!
//! - [`submission`] validates and normalizes a sale before it is forwarded.
//! - [`upstream`] interprets the write endpoint's ambiguous responses.
//! - [`feed`] turns read-endpoint bodies into the JSON relayed to clients.

pub mod feed;
pub mod submission;
pub mod upstream;

use serde_json::Value;

/// JavaScript-style truthiness, which the spreadsheet backend's clients rely on.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Renders a loosely-typed field as text.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Returns a trimmed string when `value` is a non-blank string.
pub(crate) fn non_blank_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
