//! Route parameters
//!
//! Parameters are produced by hostname and path parsers, declared as route
//! defaults, and consumed again when assembling URIs. Values are arbitrary
//! JSON values so defaults loaded from configuration keep their type.

use crate::error::{Result, RouterError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Named parameters extracted from, or supplied to, a route
///
/// # Example
///
/// ```
/// use route_tree::RouteParams;
///
/// let mut params = RouteParams::new();
/// params.insert("id", "123");
/// params.insert("page", 2);
///
/// assert_eq!(params.get_str("id"), Some("123"));
/// assert_eq!(params.get_as::<u32>("page"), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteParams {
    params: HashMap<String, Value>,
}

impl RouteParams {
    /// Create new empty route params
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from hashmap
    pub fn from_map(params: HashMap<String, Value>) -> Self {
        Self { params }
    }

    /// Create from a JSON value, which must be an object
    pub fn from_json(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            Value::Null => Ok(Self::new()),
            other => Err(RouterError::invalid_argument(format!(
                "parameters must be an object, {} given",
                json_type_name(&other)
            ))),
        }
    }

    /// Get a parameter value
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// Get a parameter if it holds a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.params.get(key)?.as_str()
    }

    /// Get a parameter and convert it to a specific type
    ///
    /// String values are additionally tried through `FromStr`-like JSON
    /// parsing, so `"42"` converts to an integer.
    pub fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        let value = self.params.get(key)?;
        serde_json::from_value(value.clone()).ok().or_else(|| {
            value
                .as_str()
                .and_then(|raw| serde_json::from_str(raw).ok())
        })
    }

    /// Insert a parameter, replacing any previous value
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.params.insert(key.into(), value.into());
    }

    /// Remove a parameter
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.params.remove(key)
    }

    /// Check if parameter exists
    pub fn contains(&self, key: &str) -> bool {
        self.params.contains_key(key)
    }

    /// Layer `other` on top of these params; keys present in both take `other`'s value
    pub fn overlay(&mut self, other: &RouteParams) {
        for (key, value) in &other.params {
            self.params.insert(key.clone(), value.clone());
        }
    }

    /// Build a new set from layers, later layers overriding earlier ones
    pub fn layered<'a>(layers: impl IntoIterator<Item = &'a RouteParams>) -> Self {
        let mut merged = Self::new();
        for layer in layers {
            merged.overlay(layer);
        }
        merged
    }

    /// Get all parameters as a reference to the HashMap
    pub fn all(&self) -> &HashMap<String, Value> {
        &self.params
    }

    /// Iterate over all parameters
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.params.iter()
    }

    /// Check if parameters are empty
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Get number of parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }
}

impl<K, V> FromIterator<(K, V)> for RouteParams
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            params: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl From<HashMap<String, Value>> for RouteParams {
    fn from(params: HashMap<String, Value>) -> Self {
        Self::from_map(params)
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_route_params_basic() {
        let mut params = RouteParams::new();
        params.insert("id", "123");

        assert_eq!(params.get_str("id"), Some("123"));
        assert!(params.contains("id"));
        assert!(!params.contains("missing"));
    }

    #[test]
    fn test_route_params_get_as() {
        let mut params = RouteParams::new();
        params.insert("id", "123");
        params.insert("active", true);
        params.insert("limit", 50);

        assert_eq!(params.get_as::<i32>("id"), Some(123));
        assert_eq!(params.get_as::<bool>("active"), Some(true));
        assert_eq!(params.get_as::<usize>("limit"), Some(50));
        assert_eq!(params.get_as::<String>("id"), Some("123".to_string()));
        assert_eq!(params.get_as::<i32>("missing"), None);
    }

    #[test]
    fn test_layered_precedence() {
        let defaults: RouteParams = [("foo", "bat"), ("baz", "bat")].into_iter().collect();
        let host: RouteParams = [("baz", "host")].into_iter().collect();
        let path: RouteParams = [("foo", "bar")].into_iter().collect();

        let merged = RouteParams::layered([&defaults, &host, &path]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get_str("foo"), Some("bar"));
        assert_eq!(merged.get_str("baz"), Some("host"));
    }

    #[test]
    fn test_from_json() {
        let params = RouteParams::from_json(json!({"lang": "en", "page": 1})).unwrap();
        assert_eq!(params.get_str("lang"), Some("en"));
        assert_eq!(params.get_as::<u8>("page"), Some(1));

        assert!(RouteParams::from_json(Value::Null).unwrap().is_empty());

        let error = RouteParams::from_json(json!(["en"])).unwrap_err();
        assert!(matches!(error, RouterError::InvalidArgument(_)));
    }

    #[test]
    fn test_route_params_empty() {
        let params = RouteParams::new();
        assert!(params.is_empty());
        assert_eq!(params.len(), 0);

        let mut params = RouteParams::new();
        params.insert("key", "value");
        assert!(!params.is_empty());
        assert_eq!(params.remove("key"), Some(json!("value")));
        assert!(params.is_empty());
    }
}
