//! Conversion between serializable objects and interpreter values

use super::Variable;
use crate::Result;
use cel_interpreter::Value;
use cel_interpreter::objects::{Key, Map};
use ohno::app_err;
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

/// Projects an object into the attribute mapping bound to `variable`.
///
/// Absent objects, and objects that serialize to `null`, project to [`Value::Null`]. Anything
/// else must serialize to a map.
///
/// # Errors
///
/// Returns an error if the object cannot be serialized or does not serialize to a map
pub fn project<T>(variable: Variable, object: Option<&T>) -> Result<Value>
where
    T: Serialize + ?Sized,
{
    let Some(object) = object else {
        return Ok(Value::Null);
    };

    let json = serde_json::to_value(object).map_err(|e| app_err!("unable to convert {variable}: {e}"))?;
    match json {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::Object(_) => Ok(json_to_value(json)),
        other => Err(app_err!(
            "unable to convert {variable}: expected an object, got {}",
            json_kind(&other)
        )),
    }
}

/// Converts a JSON document into an interpreter value
///
/// Integers become `Int` when they fit in an `i64` and `UInt` otherwise.
#[must_use]
pub fn json_to_value(json: serde_json::Value) -> Value {
    match json {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Bool(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if let Some(u) = n.as_u64() {
                Value::UInt(u)
            } else {
                n.as_f64().map_or(Value::Null, Value::Float)
            }
        }
        serde_json::Value::String(s) => Value::String(Arc::new(s)),
        serde_json::Value::Array(items) => Value::List(Arc::new(items.into_iter().map(json_to_value).collect())),
        serde_json::Value::Object(fields) => {
            let fields: HashMap<Arc<String>, Value> = fields.into_iter().map(|(k, v)| (Arc::new(k), json_to_value(v))).collect();
            Value::Map(Map::from(fields))
        }
    }
}

/// Converts an evaluated value back into JSON for reporting
///
/// Values with no JSON counterpart are rendered as their debug text.
#[must_use]
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => json!(b),
        Value::Int(i) => json!(i),
        Value::UInt(u) => json!(u),
        Value::Float(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Bytes(bytes) => json!(bytes.as_slice()),
        Value::List(items) => json!(items.iter().map(value_to_json).collect::<Vec<_>>()),
        Value::Map(map) => {
            let fields: serde_json::Map<String, serde_json::Value> =
                map.map.iter().map(|(key, value)| (key_to_string(key), value_to_json(value))).collect();
            serde_json::Value::Object(fields)
        }
        other => json!(format!("{other:?}")),
    }
}

fn key_to_string(key: &Key) -> String {
    match key {
        Key::String(s) => s.to_string(),
        Key::Int(i) => i.to_string(),
        Key::Uint(u) => u.to_string(),
        Key::Bool(b) => b.to_string(),
    }
}

const fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "an object",
    }
}
