//! Media field resolution
//!
//! Media collections are materialized into the snapshot before reduction,
//! under the field's name. A collection is `null`, a single media item, or an
//! array of items. Each item contributes one URL.

use serde_json::Value;

/// Keys probed on a media item, in order
pub const URL_KEYS: [&str; 2] = ["original_url", "url"];

/// URL of a single media item, if it has one
fn item_url(item: &Value) -> Option<Value> {
    match item {
        Value::String(s) if !s.is_empty() => Some(item.clone()),
        Value::Object(map) => URL_KEYS.iter().find_map(|key| match map.get(*key) {
            Some(Value::String(s)) if !s.is_empty() => Some(Value::String(s.clone())),
            _ => None,
        }),
        _ => None,
    }
}

/// All URLs of a media collection, in collection order
pub fn media_urls(raw: &Value) -> Result<Vec<Value>, String> {
    match raw {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items.iter().filter_map(item_url).collect()),
        Value::Object(_) | Value::String(_) => Ok(item_url(raw).into_iter().collect()),
        other => Err(format!("expected a media collection, got {}", other)),
    }
}

/// Resolve a media collection to its storable value
///
/// A gallery stores every URL; a single-image field stores the first URL or
/// `null`.
pub fn resolve_media(raw: &Value, gallery: bool) -> Result<Value, String> {
    let urls = media_urls(raw)?;

    if gallery {
        Ok(Value::Array(urls))
    } else {
        Ok(urls.into_iter().next().unwrap_or(Value::Null))
    }
}
