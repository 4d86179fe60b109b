//! Building routes from configuration records
//!
//! A [`RouteCollection`] stores configuration records until a route is first
//! needed and then asks its [`RouteFactory`] for an instance. [`RouteManager`]
//! is the stock factory: a registry of constructors keyed by type tag, with
//! the `generic` type built in.

use crate::collection::{RouteCollection, DEFAULT_PRIORITY};
use crate::error::{Result, RouterError};
use crate::generic::GenericRoute;
use crate::method::Methods;
use crate::params::{json_type_name, RouteParams};
use crate::parser::{LiteralParser, ParserRef};
use crate::route::{RouteConfig, RouteRef, DEFAULT_ROUTE_TYPE};
use crate::{trace_log, warn_log};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Turns a type tag and options into a route
pub trait RouteFactory: Send + Sync + fmt::Debug {
    fn create(&self, route_type: &str, options: &Map<String, Value>) -> Result<RouteRef>;
}

/// Shared factory handle
pub type RouteFactoryRef = Arc<dyn RouteFactory>;

/// Constructor registered for a route type
pub type RouteConstructor =
    Arc<dyn Fn(&Map<String, Value>, &RouteManager) -> Result<RouteRef> + Send + Sync>;

/// Builds a parser from a pattern string found in configuration
pub type ParserBuilder = Arc<dyn Fn(&str) -> Result<ParserRef> + Send + Sync>;

/// Registry of route constructors
///
/// Cloning is cheap. Registering on a clone copies the table first, so
/// earlier clones keep their constructors.
///
/// # Example
///
/// ```
/// use route_tree::{Request, Route, RouteFactory, RouteManager};
/// use serde_json::json;
///
/// let manager = RouteManager::new();
/// let options = json!({"path": "/foo", "methods": "get"});
/// let route = manager
///     .create("generic", options.as_object().unwrap())
///     .unwrap();
///
/// let request = Request::get("http://example.com/foo").unwrap();
/// let result = route.match_request(&request, 0).unwrap().unwrap();
/// assert!(result.is_success());
/// ```
#[derive(Clone)]
pub struct RouteManager {
    constructors: Arc<HashMap<String, RouteConstructor>>,
    path_parser: ParserBuilder,
    hostname_parser: ParserBuilder,
}

impl RouteManager {
    /// Create a manager with the `generic` route type registered
    ///
    /// Hostname and path options are compiled into literal parsers until other
    /// builders are installed.
    pub fn new() -> Self {
        let mut manager = Self {
            constructors: Arc::new(HashMap::new()),
            path_parser: Arc::new(literal_path_parser),
            hostname_parser: Arc::new(literal_hostname_parser),
        };
        manager.register(DEFAULT_ROUTE_TYPE, build_generic);
        manager
    }

    /// Register a constructor for a type tag, replacing any previous one
    pub fn register<F>(&mut self, route_type: impl Into<String>, constructor: F)
    where
        F: Fn(&Map<String, Value>, &RouteManager) -> Result<RouteRef> + Send + Sync + 'static,
    {
        let route_type = route_type.into();
        trace_log!("Registering route type '{}'", route_type);
        Arc::make_mut(&mut self.constructors).insert(route_type, Arc::new(constructor));
    }

    /// Use `builder` to compile `path` options
    pub fn with_path_parser<F>(mut self, builder: F) -> Self
    where
        F: Fn(&str) -> Result<ParserRef> + Send + Sync + 'static,
    {
        self.path_parser = Arc::new(builder);
        self
    }

    /// Use `builder` to compile `hostname` options
    pub fn with_hostname_parser<F>(mut self, builder: F) -> Self
    where
        F: Fn(&str) -> Result<ParserRef> + Send + Sync + 'static,
    {
        self.hostname_parser = Arc::new(builder);
        self
    }

    pub fn has(&self, route_type: &str) -> bool {
        self.constructors.contains_key(route_type)
    }

    pub fn build_path_parser(&self, pattern: &str) -> Result<ParserRef> {
        (self.path_parser)(pattern)
    }

    pub fn build_hostname_parser(&self, pattern: &str) -> Result<ParserRef> {
        (self.hostname_parser)(pattern)
    }

    /// Empty collection whose records are resolved by this manager
    pub fn collection(&self) -> RouteCollection {
        RouteCollection::new(Arc::new(self.clone()))
    }

    /// Insert every entry of a `name → config` object into `collection`
    ///
    /// An entry may carry a `priority` key; it is taken out of the record
    /// before the record is stored.
    pub fn insert_routes(&self, collection: &mut RouteCollection, routes: &Value) -> Result<()> {
        let Value::Object(routes) = routes else {
            return Err(RouterError::invalid_argument(format!(
                "routes must be an object, {} given",
                json_type_name(routes)
            )));
        };

        for (name, config) in routes {
            let mut config = config.clone();
            let priority = match config.as_object_mut().and_then(|c| c.remove("priority")) {
                None => DEFAULT_PRIORITY,
                Some(value) => value
                    .as_i64()
                    .and_then(|p| i32::try_from(p).ok())
                    .ok_or_else(|| {
                        RouterError::invalid_argument(format!(
                            "priority of route '{}' must be an integer",
                            name
                        ))
                    })?,
            };
            collection.insert_value(name.clone(), config, priority)?;
        }

        Ok(())
    }
}

impl Default for RouteManager {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RouteManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut types: Vec<&String> = self.constructors.keys().collect();
        types.sort();
        f.debug_struct("RouteManager")
            .field("types", &types)
            .finish()
    }
}

impl RouteFactory for RouteManager {
    fn create(&self, route_type: &str, options: &Map<String, Value>) -> Result<RouteRef> {
        let Some(constructor) = self.constructors.get(route_type) else {
            warn_log!("No constructor registered for route type '{}'", route_type);
            return Err(RouterError::UnknownRouteType(route_type.to_string()));
        };
        constructor(options, self)
    }
}

/// Constructor for the `generic` route type
///
/// Recognized options: `hostname`, `path`, `secure`, `methods`, `defaults`
/// and `children`.
pub fn build_generic(options: &Map<String, Value>, manager: &RouteManager) -> Result<RouteRef> {
    let mut route = GenericRoute::new();

    for (key, value) in options {
        route = match key.as_str() {
            "hostname" => {
                let pattern = string_option(key, value)?;
                route.hostname_parser_ref(manager.build_hostname_parser(pattern)?)
            }
            "path" => {
                let pattern = string_option(key, value)?;
                route.path_parser_ref(manager.build_path_parser(pattern)?)
            }
            "secure" => route.secure(value.as_bool().ok_or_else(|| {
                RouterError::invalid_argument(format!(
                    "secure must be a boolean, {} given",
                    json_type_name(value)
                ))
            })?),
            "methods" => route.methods(Methods::from_json(value)?),
            "defaults" => route.defaults(RouteParams::from_json(value.clone())?),
            "children" => {
                let mut children = manager.collection();
                manager.insert_routes(&mut children, value)?;
                route.children(children)
            }
            other => {
                warn_log!("Ignoring unknown generic route option '{}'", other);
                route
            }
        };
    }

    Ok(Arc::new(route))
}

fn literal_path_parser(pattern: &str) -> Result<ParserRef> {
    Ok(Arc::new(LiteralParser::new(pattern)))
}

fn literal_hostname_parser(pattern: &str) -> Result<ParserRef> {
    Ok(Arc::new(LiteralParser::case_insensitive(pattern)))
}

fn string_option<'a>(key: &str, value: &'a Value) -> Result<&'a str> {
    value.as_str().ok_or_else(|| {
        RouterError::invalid_argument(format!(
            "{} must be a string, {} given",
            key,
            json_type_name(value)
        ))
    })
}

/// Build a route straight from a configuration record
pub fn create_from_config(factory: &dyn RouteFactory, config: &RouteConfig) -> Result<RouteRef> {
    factory.create(config.type_name(), &config.options)
}
