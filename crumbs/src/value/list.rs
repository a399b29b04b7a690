//! Splitting of single text values into lists.
//!
//! A list parameter read from an environment variable or a scalar file entry
//! arrives as one string. Comma-separated text is split into items unless it
//! looks like structured data: `[`-prefixed text is parsed as a JSON array,
//! and quoted text is kept as a single item so values with embedded commas
//! survive.

use serde_json::Value;

fn is_quoted(value: &str) -> Option<&str> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .or_else(|| value.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
}

fn parse_json_array(value: &str) -> Result<Vec<String>, String> {
    let items: Vec<Value> = serde_json::from_str(value).map_err(|err| err.to_string())?;
    Ok(items
        .into_iter()
        .map(|item| match item {
            Value::String(text) => text,
            other => other.to_string(),
        })
        .collect())
}

/// Split `raw` into list items.
pub(crate) fn split_list(raw: &str) -> Result<Vec<String>, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if let Some(inner) = is_quoted(trimmed) {
        return Ok(vec![inner.to_owned()]);
    }
    match trimmed.chars().next() {
        Some('[') => parse_json_array(trimmed),
        Some('{') => Err(String::from("expected a list, found an object")),
        _ => Ok(trimmed.split(',').map(|s| s.trim().to_owned()).collect()),
    }
}
