//! Extracting structured data from free-form model output.

use serde_json::Value;

/// Pull a JSON object out of a completion.
///
/// Tries, in order: the whole text, the first fenced ```json block, and the
/// span between the first `{` and the last `}`. Returns `None` when nothing
/// parses to an object.
pub fn extract_json(text: &str) -> Option<serde_json::Map<String, Value>> {
    if let Some(obj) = parse_object(text) {
        return Some(obj);
    }

    if let Some(fenced) = fenced_json(text) {
        return parse_object(fenced);
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end <= start {
        return None;
    }
    parse_object(&text[start..=end])
}

fn parse_object(text: &str) -> Option<serde_json::Map<String, Value>> {
    match serde_json::from_str::<Value>(text.trim()) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn fenced_json(text: &str) -> Option<&str> {
    let (_, after) = text.split_once("```json")?;
    let (body, _) = after.split_once("```")?;
    Some(body)
}

/// The text after a `query:` marker, up to the end of that line.
///
/// Matching is case-insensitive and the returned text is lower-cased, as
/// prose answers rarely keep field names in a stable case.
pub fn query_line(text: &str) -> Option<String> {
    let lower = text.to_lowercase();
    let (_, rest) = lower.split_once("query:")?;
    let line = rest.trim_start().lines().next().unwrap_or("").trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}

/// String field, trimmed; empty strings count as absent.
pub fn string_field(obj: &serde_json::Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Numeric field accepted as a number or a numeric string.
pub fn f64_field(obj: &serde_json::Map<String, Value>, key: &str) -> Option<f64> {
    match obj.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Array of strings; non-string members are skipped.
pub fn string_list(obj: &serde_json::Map<String, Value>, key: &str) -> Vec<String> {
    obj.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}
