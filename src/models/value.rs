//! Attribute values
//!
//! Attribute values are plain `serde_json::Value`s. This module adds the two
//! pieces of value semantics the reducer depends on: blank detection and
//! casting to a field's declared type.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Check whether a value counts as blank
///
/// Blank values are `null`, the empty string, the empty array and the empty
/// object. Numbers (including `0`) and booleans (including `false`) are never
/// blank.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Declared type of a field's storable value
///
/// Resolved values are cast to this type before they are compared or stored,
/// so `"0"` and `0` are equal on an `Integer` field but different on an
/// `Any` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Keep the resolved value as is
    #[default]
    Any,
    String,
    Integer,
    Float,
    Boolean,
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Any => write!(f, "any"),
            ValueType::String => write!(f, "string"),
            ValueType::Integer => write!(f, "integer"),
            ValueType::Float => write!(f, "float"),
            ValueType::Boolean => write!(f, "boolean"),
        }
    }
}

impl ValueType {
    /// Cast a value to this type
    ///
    /// `null` stays `null` and arrays are cast element by element. Objects can
    /// only be kept by `Any`.
    pub fn cast(self, value: Value) -> Result<Value, String> {
        if self == ValueType::Any {
            return Ok(value);
        }

        match value {
            Value::Null => Ok(Value::Null),
            Value::Array(items) => items
                .into_iter()
                .map(|item| self.cast(item))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            Value::Object(_) => Err(format!("cannot cast an object to {}", self)),
            scalar => match self {
                ValueType::Any => Ok(scalar),
                ValueType::String => Ok(Value::String(to_string(&scalar))),
                ValueType::Integer => to_integer(&scalar),
                ValueType::Float => to_float(&scalar),
                ValueType::Boolean => to_boolean(&scalar),
            },
        }
    }
}

fn to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn to_integer(value: &Value) -> Result<Value, String> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::from(u))
            } else {
                let f = n.as_f64().unwrap_or_default();
                float_to_integer(f)
            }
        }
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(i) = trimmed.parse::<i64>() {
                Ok(Value::from(i))
            } else if let Ok(f) = trimmed.parse::<f64>() {
                float_to_integer(f)
            } else {
                Err(format!("'{}' is not an integer", s))
            }
        }
        Value::Bool(b) => Ok(Value::from(i64::from(*b))),
        other => Err(format!("cannot cast {} to integer", other)),
    }
}

fn float_to_integer(f: f64) -> Result<Value, String> {
    let truncated = f.trunc();
    if truncated.is_finite() && truncated >= i64::MIN as f64 && truncated < i64::MAX as f64 {
        Ok(Value::from(truncated as i64))
    } else {
        Err(format!("{} is out of integer range", f))
    }
}

fn to_float(value: &Value) -> Result<Value, String> {
    let f = match value {
        Value::Number(n) => n.as_f64().unwrap_or_default(),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("'{}' is not a number", s))?,
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        other => return Err(format!("cannot cast {} to float", other)),
    };

    Number::from_f64(f)
        .map(Value::Number)
        .ok_or_else(|| format!("{} is not a finite number", f))
}

fn to_boolean(value: &Value) -> Result<Value, String> {
    match value {
        Value::Bool(b) => Ok(Value::Bool(*b)),
        Value::Number(n) => Ok(Value::Bool(n.as_f64().unwrap_or_default() != 0.0)),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(Value::Bool(true)),
            "" | "0" | "false" | "no" | "off" => Ok(Value::Bool(false)),
            _ => Err(format!("'{}' is not a boolean", s)),
        },
        other => Err(format!("cannot cast {} to boolean", other)),
    }
}

/// Turn an attribute name into a display label ("cover_image" -> "Cover image")
pub fn headline(name: &str) -> String {
    let spaced = name.replace(['_', '-'], " ");
    let mut chars = spaced.trim().chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
