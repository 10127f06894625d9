//! Interpretation of the sales write endpoint's responses.
//!
//! The spreadsheet script behind the write endpoint answers most failures
//! with HTTP 200 and a body describing the problem in one of several ad-hoc
//! shapes. The checks here are a compatibility shim for that particular
//! contract, not a general pattern for reading upstream responses.

use serde_json::Value;

use super::non_blank_str;

const FAILURE_STATUSES: &[&str] = &["error", "failed", "fail", "unauthorized", "forbidden"];
const GENERIC_FAILURE: &str = "Sales endpoint indicated a failure.";
const MAX_DETAIL_CHARS: usize = 500;

/// Returns the failure message if a 2xx body still signals failure.
///
/// A body counts as failed when any of these hold:
/// - `success` is `false` or the string `"false"`
/// - `ok` is `false`
/// - `status` is one of `error`, `failed`, `fail`, `unauthorized`, `forbidden`
/// - `error` is a non-blank string, an object or an array
///
/// The message prefers the `error` string, then the `message` string, then a
/// generic sentence. Bodies that are not JSON objects never fail.
pub fn detect_upstream_failure(body: &Value) -> Option<String> {
    let obj = body.as_object()?;

    let success_false = match obj.get("success") {
        Some(Value::Bool(b)) => !b,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("false"),
        _ => false,
    };
    let ok_false = matches!(obj.get("ok"), Some(Value::Bool(false)));
    let status_failed = obj
        .get("status")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_lowercase())
        .is_some_and(|s| FAILURE_STATUSES.contains(&s.as_str()));
    let error = obj.get("error");
    let error_present = non_blank_str(error).is_some()
        || matches!(error, Some(Value::Object(_) | Value::Array(_)));

    if !(success_false || ok_false || status_failed || error_present) {
        return None;
    }

    let message = non_blank_str(error)
        .or_else(|| non_blank_str(obj.get("message")))
        .unwrap_or(GENERIC_FAILURE);
    Some(message.to_string())
}

/// Picks what to report as `details` for a non-2xx upstream response.
///
/// Uses the parsed body's `error` field, else the parsed body itself, else
/// the first 500 characters of the raw text.
pub fn upstream_error_details(parsed: Option<&Value>, text: &str) -> Value {
    match parsed {
        Some(body) if !body.is_null() => match body.get("error") {
            Some(err) if !err.is_null() => err.clone(),
            _ => body.clone(),
        },
        _ => Value::String(text.chars().take(MAX_DETAIL_CHARS).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_success_is_not_a_failure() {
        assert_eq!(detect_upstream_failure(&json!({ "success": true, "row": 12 })), None);
        assert_eq!(detect_upstream_failure(&json!({ "status": "ok" })), None);
        assert_eq!(detect_upstream_failure(&json!({ "error": "   " })), None);
        assert_eq!(detect_upstream_failure(&json!({ "error": null })), None);
    }

    #[test]
    fn non_objects_never_fail() {
        assert_eq!(detect_upstream_failure(&json!([{ "error": "x" }])), None);
        assert_eq!(detect_upstream_failure(&json!("error")), None);
        assert_eq!(detect_upstream_failure(&json!(null)), None);
    }

    #[test]
    fn success_false_fails_with_generic_message() {
        assert_eq!(
            detect_upstream_failure(&json!({ "success": false })).as_deref(),
            Some("Sales endpoint indicated a failure.")
        );
        assert!(detect_upstream_failure(&json!({ "success": " FALSE " })).is_some());
    }

    #[test]
    fn ok_false_fails() {
        assert!(detect_upstream_failure(&json!({ "ok": false })).is_some());
        assert!(detect_upstream_failure(&json!({ "ok": "false" })).is_none());
    }

    #[test]
    fn failure_statuses_are_case_insensitive() {
        for status in ["error", " Failed ", "FAIL", "unauthorized", "Forbidden"] {
            assert!(
                detect_upstream_failure(&json!({ "status": status })).is_some(),
                "{status}"
            );
        }
    }

    #[test]
    fn error_string_is_the_message() {
        assert_eq!(
            detect_upstream_failure(&json!({ "error": "  Bad token ", "message": "ignored" }))
                .as_deref(),
            Some("Bad token")
        );
    }

    #[test]
    fn message_used_when_error_is_structured() {
        let body = json!({ "error": { "code": 7 }, "message": " Sheet locked " });
        assert_eq!(detect_upstream_failure(&body).as_deref(), Some("Sheet locked"));
    }

    #[test]
    fn details_prefer_error_field() {
        let body = json!({ "error": "denied", "extra": 1 });
        assert_eq!(upstream_error_details(Some(&body), "ignored"), json!("denied"));
    }

    #[test]
    fn details_fall_back_to_body_then_text() {
        let body = json!({ "reason": "quota" });
        assert_eq!(upstream_error_details(Some(&body), "ignored"), body);

        let long = "x".repeat(800);
        let details = upstream_error_details(None, &long);
        assert_eq!(details.as_str().map(str::len), Some(500));

        assert_eq!(upstream_error_details(Some(&json!(null)), "raw"), json!("raw"));
    }
}
