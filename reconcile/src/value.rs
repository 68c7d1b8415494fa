//! Generic key/value attribute container and the typed-record adapter seam
//!
//! Host runtimes hand the reconciler loosely-typed attribute maps; typed
//! records implement [`AttributeMapped`] to convert in both directions. All
//! stringly-typed conversion lives behind that trait, never inside the
//! reconciliation verbs.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ReconcileError, Result};

/// A loosely-typed attribute value as supplied by a host runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    String(String),
    List(Vec<Value>),
    Map(HashMap<String, Value>),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

/// Named attribute set for one declared resource.
///
/// Accessors fail with [`ReconcileError::Validation`] on type mismatches so a
/// malformed host-side value surfaces before any remote round trip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Attributes(HashMap<String, Value>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(name.into(), value.into());
    }

    /// Insert only when the value is present; absent optionals stay unset so
    /// host-side default injection can tell the difference.
    pub fn set_opt(&mut self, name: impl Into<String>, value: Option<impl Into<Value>>) {
        if let Some(value) = value {
            self.set(name, value);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get_string(&self, name: &str) -> Result<Option<String>> {
        self.typed(name, "string", |v| v.as_str().map(|s| s.to_string()))
    }

    pub fn get_bool(&self, name: &str) -> Result<Option<bool>> {
        self.typed(name, "bool", Value::as_bool)
    }

    pub fn get_int(&self, name: &str) -> Result<Option<i64>> {
        self.typed(name, "int", Value::as_int)
    }

    /// String list accessor; element order is the host's concern.
    pub fn get_string_list(&self, name: &str) -> Result<Option<Vec<String>>> {
        let list = match self.get(name) {
            Some(v) => v
                .as_list()
                .ok_or_else(|| Self::mismatch(name, "list", v))?,
            None => return Ok(None),
        };

        let mut out = Vec::with_capacity(list.len());
        for item in list {
            let s = item
                .as_str()
                .ok_or_else(|| Self::mismatch(name, "string element", item))?;
            out.push(s.to_string());
        }
        Ok(Some(out))
    }

    /// Nested repeated records, e.g. client secrets or permissions.
    pub fn get_blocks(&self, name: &str) -> Result<Vec<Attributes>> {
        let list = match self.get(name) {
            Some(v) => v
                .as_list()
                .ok_or_else(|| Self::mismatch(name, "list", v))?,
            None => return Ok(Vec::new()),
        };

        let mut out = Vec::with_capacity(list.len());
        for item in list {
            let map = item
                .as_map()
                .ok_or_else(|| Self::mismatch(name, "object element", item))?;
            out.push(Attributes(map.clone()));
        }
        Ok(out)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn typed<T>(&self, name: &str, expected: &str, accessor: impl Fn(&Value) -> Option<T>) -> Result<Option<T>> {
        match self.get(name) {
            Some(v) => accessor(v)
                .map(Some)
                .ok_or_else(|| Self::mismatch(name, expected, v)),
            None => Ok(None),
        }
    }

    fn mismatch(name: &str, expected: &str, actual: &Value) -> ReconcileError {
        ReconcileError::Validation(format!(
            "attribute '{}': expected {}, got {}",
            name,
            expected,
            actual.type_name()
        ))
    }
}

impl From<HashMap<String, Value>> for Attributes {
    fn from(map: HashMap<String, Value>) -> Self {
        Self(map)
    }
}

impl From<Attributes> for Value {
    fn from(attrs: Attributes) -> Self {
        Value::Map(attrs.0)
    }
}

impl FromIterator<(String, Value)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Bidirectional mapping between a typed record and a generic attribute set.
pub trait AttributeMapped: Sized {
    /// Render the record as host-facing attributes.
    fn to_attributes(&self) -> Attributes;

    /// Build the record from host-supplied attributes, injecting defaults for
    /// unset optionals and rejecting malformed values with
    /// [`ReconcileError::Validation`].
    fn from_attributes(attrs: &Attributes) -> Result<Self>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_accessors_return_values() {
        let mut attrs = Attributes::new();
        attrs.set("name", "app1");
        attrs.set("enabled", true);
        attrs.set("validity", 300i64);

        assert_eq!(attrs.get_string("name").unwrap().as_deref(), Some("app1"));
        assert_eq!(attrs.get_bool("enabled").unwrap(), Some(true));
        assert_eq!(attrs.get_int("validity").unwrap(), Some(300));
        assert_eq!(attrs.get_string("missing").unwrap(), None);
    }

    #[test]
    fn type_mismatch_is_validation_error() {
        let mut attrs = Attributes::new();
        attrs.set("enabled", "yes");

        let err = attrs.get_bool("enabled").unwrap_err();
        assert!(matches!(err, ReconcileError::Validation(_)));
        assert!(err.to_string().contains("enabled"));
    }

    #[test]
    fn null_reads_as_unset() {
        let mut attrs = Attributes::new();
        attrs.set("comment", Value::Null);

        assert!(!attrs.contains("comment"));
        assert_eq!(attrs.get_string("comment").unwrap(), None);
    }

    #[test]
    fn string_list_rejects_mixed_elements() {
        let mut attrs = Attributes::new();
        attrs.set(
            "scopes",
            Value::List(vec![Value::String("read".into()), Value::Bool(true)]),
        );

        assert!(attrs.get_string_list("scopes").is_err());
    }

    #[test]
    fn blocks_expose_nested_records() {
        let mut secret = HashMap::new();
        secret.insert("description".to_string(), Value::String("primary".into()));

        let mut attrs = Attributes::new();
        attrs.set("client_secrets", Value::List(vec![Value::Map(secret)]));

        let blocks = attrs.get_blocks("client_secrets").unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(
            blocks[0].get_string("description").unwrap().as_deref(),
            Some("primary")
        );
    }

    #[test]
    fn value_serializes_untagged() {
        let value = Value::List(vec![Value::Int(1), Value::String("a".into()), Value::Null]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"[1,"a",null]"#);

        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, value);
    }
}
