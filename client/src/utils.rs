use serde_json::Value;

use crate::models::PredictionResponse;

/// Renders a JSON value for display, or `None` if it carries nothing usable.
///
/// `null`, `false`, blank strings and empty containers are treated as absent.
/// Numbers, including zero, are always usable.
pub fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) if items.is_empty() => None,
        Value::Object(map) if map.is_empty() => None,
        other => Some(other.to_string()),
    }
}

/// `application/json` or any `+json` suffix type, parameters ignored.
pub fn is_json_content_type(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

/// Pulls a server supplied `error` message out of a failed response body.
pub fn server_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<PredictionResponse>(body)
        .ok()?
        .error
        .as_ref()
        .and_then(render_value)
}
