//! Value rendering for tagged-text output
//!
//! Values are JSON-encoded when possible. Anything the encoder rejects
//! (invalid UTF-8, non-finite floats, errors that cannot describe themselves)
//! falls back to [`LogValue::inspect`] and the rendered pair is marked with
//! [`JSON_FAILED_MARKER`] so degraded output stays visible.

use super::value::LogValue;
use std::borrow::Cow;

/// Field names owned by the event schema
pub const RESERVED_KEYS: [&str; 9] = [
    "message",
    "time",
    "level",
    "meta",
    "action_id",
    "pid",
    "error",
    "backtrace",
    "error_class",
];

/// Appended to a `key=value` pair whose value could not be JSON-encoded
pub const JSON_FAILED_MARKER: &str = " [JSON-FAILED]";

/// Result of rendering a single value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedValue {
    pub text: String,
    /// True when the inspect fallback was used
    pub json_failed: bool,
}

pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Prefix reserved and underscore-led keys with `_` when escaping is requested
pub fn display_key(key: &str, escape_keys: bool) -> Cow<'_, str> {
    if escape_keys && (key.starts_with('_') || is_reserved_key(key)) {
        Cow::Owned(format!("_{}", key))
    } else {
        Cow::Borrowed(key)
    }
}

/// Render a value for display. Never fails.
pub fn render_value(value: &LogValue) -> RenderedValue {
    let (text, json_failed) = match serde_json::to_string(value) {
        Ok(encoded) => (encoded, false),
        Err(_) => (value.inspect(), true),
    };

    let text = match unquote_simple(&text) {
        Some(bare) => bare.to_string(),
        None => text,
    };

    RenderedValue { text, json_failed }
}

/// Render a `key=value` pair
pub fn display(key: &str, value: &LogValue, escape_keys: bool) -> String {
    let key = display_key(key, escape_keys);
    let rendered = render_value(value);
    if rendered.json_failed {
        format!("{}={}{}", key, rendered.text, JSON_FAILED_MARKER)
    } else {
        format!("{}={}", key, rendered.text)
    }
}

/// Render a `key=value` pair whose value is plain text
pub fn display_text(key: &str, text: &str) -> String {
    display(key, &LogValue::Text(text.to_string()), false)
}

/// `"ValueOne"` -> `ValueOne`; anything else (spaces, lowercase first letter,
/// digits first, escapes) keeps its quotes.
fn unquote_simple(rendered: &str) -> Option<&str> {
    let inner = rendered.strip_prefix('"')?.strip_suffix('"')?;
    let mut chars = inner.chars();
    let first = chars.next()?;
    if !first.is_ascii_uppercase() {
        return None;
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Some(inner)
    } else {
        None
    }
}
