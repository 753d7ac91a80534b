use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::Value as JsonValue;

use crate::SqlbindError;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Self::Blob(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

/// One set of values for a single application of a statement: either ordered
/// (`?`, `?N`) or keyed by parameter name (`:x`, `$x`, `@x`).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum BindValues {
    Positional(Vec<Value>),
    Named(BTreeMap<String, Value>),
}

impl BindValues {
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Positional(values) => values.is_empty(),
            Self::Named(values) => values.is_empty(),
        }
    }

    /// Accepts a JSON array (positional) or object (named). Nested arrays and
    /// objects inside are stored as their JSON text.
    pub fn from_json(json: &JsonValue) -> Result<Self, SqlbindError> {
        match json {
            JsonValue::Array(items) => Ok(Self::Positional(
                items.iter().map(json_to_value).collect(),
            )),
            JsonValue::Object(entries) => Ok(Self::Named(
                entries
                    .iter()
                    .map(|(key, value)| (key.clone(), json_to_value(value)))
                    .collect(),
            )),
            other => Err(crate::errors::scalar_bind_values_error(other)),
        }
    }
}

impl From<Vec<Value>> for BindValues {
    fn from(values: Vec<Value>) -> Self {
        Self::Positional(values)
    }
}

impl From<BTreeMap<String, Value>> for BindValues {
    fn from(values: BTreeMap<String, Value>) -> Self {
        Self::Named(values)
    }
}

fn json_to_value(json: &JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(flag) => Value::Boolean(*flag),
        JsonValue::Number(number) => number
            .as_i64()
            .map(Value::Integer)
            .or_else(|| number.as_f64().map(Value::Real))
            .unwrap_or(Value::Null),
        JsonValue::String(text) => Value::Text(text.clone()),
        JsonValue::Array(_) | JsonValue::Object(_) => Value::Text(json.to_string()),
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExecutionMeta {
    pub changes: u64,
    pub last_insert_rowid: Option<i64>,
    pub duration: Duration,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
    pub meta: ExecutionMeta,
}

#[cfg(test)]
mod tests {
    use super::{BindValues, Value};
    use crate::ErrorCode;
    use serde_json::json;

    #[test]
    fn json_array_becomes_positional_values() {
        let binds = BindValues::from_json(&json!([1, "bob", null, true, 1.5]))
            .expect("array should convert");
        assert_eq!(
            binds,
            BindValues::Positional(vec![
                Value::Integer(1),
                Value::Text("bob".to_string()),
                Value::Null,
                Value::Boolean(true),
                Value::Real(1.5),
            ])
        );
    }

    #[test]
    fn json_object_becomes_named_values() {
        let binds =
            BindValues::from_json(&json!({"id": 7, "name": "ada"})).expect("object should convert");
        let BindValues::Named(values) = binds else {
            panic!("expected named bind values");
        };
        assert_eq!(values.get("id"), Some(&Value::Integer(7)));
        assert_eq!(values.get("name"), Some(&Value::Text("ada".to_string())));
    }

    #[test]
    fn json_scalar_is_rejected() {
        let error = BindValues::from_json(&json!(42)).expect_err("scalar should fail");
        assert_eq!(error.code, ErrorCode::BindShape);
    }
}
