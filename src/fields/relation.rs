//! Relation field resolution
//!
//! Related records are pre-loaded into the snapshot under the field's name,
//! either as one object or as an array of objects.

use serde_json::Value;

/// Resolve a pre-loaded relation to its storable value
///
/// Without an attribute the related value is stored as is. With one, the
/// attribute is plucked from the related object, or from every object of a
/// to-many relation.
pub fn resolve_relation(raw: Value, attribute: Option<&str>) -> Result<Value, String> {
    let Some(attribute) = attribute else {
        return Ok(raw);
    };

    match raw {
        Value::Null => Ok(Value::Null),
        Value::Object(map) => Ok(map.get(attribute).cloned().unwrap_or(Value::Null)),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => Ok(map.get(attribute).cloned().unwrap_or(Value::Null)),
                other => Err(format!("expected related objects, got {}", other)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        other => Err(format!(
            "cannot read '{}' from non-object relation value {}",
            attribute, other
        )),
    }
}
