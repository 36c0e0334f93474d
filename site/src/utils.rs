use chrono::Local;
use serde_json::Value;

/// Client-side timestamp in the shape the browser's `toLocaleString()`
/// produced, pinned to one locale so stored values stay comparable.
pub fn locale_timestamp() -> String {
    Local::now().format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Field value as the page would display it: strings verbatim, everything
/// else via its JSON rendering.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
