//! HTTP method restrictions of a route

use crate::error::{Result, RouterError};
use crate::params::json_type_name;
use indexmap::IndexSet;
use serde_json::Value;

/// Method names a route may be restricted to
pub const HTTP_METHODS: [&str; 10] = [
    "OPTIONS", "GET", "HEAD", "POST", "PUT", "DELETE", "TRACE", "CONNECT", "PATCH", "PROPFIND",
];

/// Which request methods a route accepts
///
/// `Only` with an empty set never matches; `Any` covers both "no restriction
/// configured" and the `*` wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Methods {
    #[default]
    Any,
    Only(IndexSet<String>),
}

impl Methods {
    /// Parse a single method string: `""` is the empty set, `"*"` the wildcard
    pub fn parse(method: &str) -> Result<Self> {
        match method {
            "*" => Ok(Methods::Any),
            "" => Ok(Methods::Only(IndexSet::new())),
            name => Ok(Methods::Only(IndexSet::from([normalize(name)?]))),
        }
    }

    /// Build a restriction from a list of method names
    pub fn from_list<I, S>(methods: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let set = methods
            .into_iter()
            .map(|name| normalize(name.as_ref()))
            .collect::<Result<IndexSet<_>>>()?;
        Ok(Methods::Only(set))
    }

    /// Build from configuration: a string or an array of strings
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Methods::Any),
            Value::String(method) => Self::parse(method),
            Value::Array(items) => {
                let names = items
                    .iter()
                    .map(|item| {
                        item.as_str().ok_or_else(|| {
                            RouterError::invalid_argument(format!(
                                "method names must be strings, {} given",
                                json_type_name(item)
                            ))
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                Self::from_list(names)
            }
            other => Err(RouterError::invalid_argument(format!(
                "$methods must either be a string or an array, {} given",
                json_type_name(other)
            ))),
        }
    }

    /// Check whether a route with this restriction can ever match
    pub fn is_empty(&self) -> bool {
        matches!(self, Methods::Only(set) if set.is_empty())
    }

    pub fn allows(&self, method: &str) -> bool {
        match self {
            Methods::Any => true,
            Methods::Only(set) => set.contains(&method.to_ascii_uppercase()),
        }
    }

    /// Allowed methods in configured order, duplicates dropped; empty for `Any`
    pub fn to_list(&self) -> Vec<String> {
        match self {
            Methods::Any => Vec::new(),
            Methods::Only(set) => set.iter().cloned().collect(),
        }
    }
}

fn normalize(method: &str) -> Result<String> {
    let upper = method.to_ascii_uppercase();
    if HTTP_METHODS.contains(&upper.as_str()) {
        Ok(upper)
    } else {
        Err(RouterError::invalid_argument(format!(
            "{} is not a valid HTTP method",
            upper
        )))
    }
}
