//! Route abstraction and configuration records

use crate::assembly::AssemblyResult;
use crate::error::{Result, RouterError};
use crate::match_result::MatchResult;
use crate::params::{json_type_name, RouteParams};
use crate::request::HttpRequest;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Type tag used when a configuration record does not name one
pub const DEFAULT_ROUTE_TYPE: &str = "generic";

// ============================================================================
// Route
// ============================================================================

/// A node of the route tree
pub trait Route: Send + Sync + fmt::Debug {
    /// Match `request`, skipping the first `path_offset` bytes of its path
    ///
    /// `Ok(None)` means the route does not match at all. Errors are reserved
    /// for configuration mistakes and contract violations.
    fn match_request(
        &self,
        request: &dyn HttpRequest,
        path_offset: usize,
    ) -> Result<Option<MatchResult>>;

    /// Build this route's URI fragments
    ///
    /// `child_name` is the slash-separated name of a descendant to continue
    /// assembling into, or `None` to stop at this route.
    fn assemble(&self, params: &RouteParams, child_name: Option<&str>) -> Result<AssemblyResult>;
}

/// Shared route handle.
///
/// Collections hand out the same instance for every lookup of a name, so
/// routes are always passed around as `Arc<dyn Route>`.
pub type RouteRef = Arc<dyn Route>;

// ============================================================================
// RouteConfig
// ============================================================================

/// Configuration record for a route that is built on first use
///
/// # Example
///
/// ```
/// use route_tree::RouteConfig;
/// use serde_json::json;
///
/// let config = RouteConfig::from_value(json!({
///     "path": "/blog",
///     "methods": ["GET"],
/// }))
/// .unwrap();
///
/// assert_eq!(config.type_name(), "generic");
/// assert_eq!(config.option("path"), Some(&json!("/blog")));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RouteConfig {
    /// Factory type tag, `generic` when absent
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub route_type: Option<String>,
    /// Everything else, handed to the factory as-is
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl RouteConfig {
    /// Create an empty generic route configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration for a specific route type
    pub fn typed(route_type: impl Into<String>) -> Self {
        Self {
            route_type: Some(route_type.into()),
            options: Map::new(),
        }
    }

    /// Parse a configuration record from a JSON value
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.is_object() {
            return Err(RouterError::invalid_argument(format!(
                "route must either be a configuration object or a route instance, {} given",
                json_type_name(&value)
            )));
        }

        serde_json::from_value(value)
            .map_err(|e| RouterError::invalid_argument(format!("malformed route config: {}", e)))
    }

    /// Set an option
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// The type tag the factory is asked for
    pub fn type_name(&self) -> &str {
        self.route_type.as_deref().unwrap_or(DEFAULT_ROUTE_TYPE)
    }

    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }
}

// ============================================================================
// RouteDefinition
// ============================================================================

/// What a collection slot holds: a live route or a record to build one from
#[derive(Debug, Clone)]
pub enum RouteDefinition {
    Route(RouteRef),
    Config(RouteConfig),
}

impl RouteDefinition {
    pub fn is_resolved(&self) -> bool {
        matches!(self, RouteDefinition::Route(_))
    }
}

impl<R: Route + 'static> From<R> for RouteDefinition {
    fn from(route: R) -> Self {
        RouteDefinition::Route(Arc::new(route))
    }
}

impl From<RouteRef> for RouteDefinition {
    fn from(route: RouteRef) -> Self {
        RouteDefinition::Route(route)
    }
}

impl From<RouteConfig> for RouteDefinition {
    fn from(config: RouteConfig) -> Self {
        RouteDefinition::Config(config)
    }
}

impl TryFrom<Value> for RouteDefinition {
    type Error = RouterError;

    fn try_from(value: Value) -> Result<Self> {
        RouteConfig::from_value(value).map(RouteDefinition::Config)
    }
}
