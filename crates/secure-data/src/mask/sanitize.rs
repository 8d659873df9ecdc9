//! Masking of sensitive fields before structured data reaches the logs.

use serde_json::Value;

/// Substrings that mark a field name as sensitive (matched case-insensitively).
const SENSITIVE_MARKERS: &[&str] = &[
    "key",
    "secret",
    "token",
    "password",
    "pwd",
    "auth",
    "private",
    "credential",
];

/// Characters kept at each end by [`sanitize_for_logging`].
const LOG_VISIBLE_CHARS: usize = 3;

/// Render `value` as `start...end`, keeping `visible_chars` at each end.
///
/// Values of `2 * visible_chars` characters or fewer render as `***`.
pub fn mask_sensitive(value: &str, visible_chars: usize) -> String {
    let len = value.chars().count();
    if len <= visible_chars * 2 {
        return "***".to_owned();
    }
    let start: String = value.chars().take(visible_chars).collect();
    let end: String = value.chars().skip(len - visible_chars).collect();
    format!("{start}...{end}")
}

/// Returns `true` if a field called `name` likely holds secret material.
pub fn is_sensitive_field(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    SENSITIVE_MARKERS.iter().any(|m| name.contains(m))
}

/// Copy of `value` with every string field under a sensitive name masked.
///
/// Objects and arrays are walked recursively. Only string values directly
/// under a sensitive key are masked; non-string values are walked as usual.
pub fn sanitize_for_logging(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| {
                    let clean = match v {
                        Value::String(s) if is_sensitive_field(k) => {
                            Value::String(mask_sensitive(s, LOG_VISIBLE_CHARS))
                        }
                        other => sanitize_for_logging(other),
                    };
                    (k.clone(), clean)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(sanitize_for_logging).collect()),
        other => other.clone(),
    }
}
