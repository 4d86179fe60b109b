//! Top-level router
//!
//! The [`Router`] owns the root routes and the base URI the application is
//! mounted under. Matching starts after the base path; assembled URIs are
//! rendered against the base URI's scheme and host and get the base path put
//! in front.

use crate::collection::{RouteCollection, DEFAULT_PRIORITY};
use crate::error::{Result, RouterError};
use crate::factory::RouteManager;
use crate::match_result::MatchResult;
use crate::params::RouteParams;
use crate::request::HttpRequest;
use crate::route::RouteDefinition;
use crate::{debug_log, info_log, warn_log};
use serde_json::Value;
use url::Url;

/// Scheme assembled URIs are rendered against until a base URI is set
pub const DEFAULT_SCHEME: &str = "http";

/// Host assembled URIs are rendered against until a base URI is set
pub const DEFAULT_HOST: &str = "localhost";

/// Entry point for matching requests and assembling URIs
///
/// # Example
///
/// ```
/// use route_tree::{Request, Router};
/// use serde_json::json;
///
/// let router = Router::from_config(&json!({
///     "blog": {
///         "path": "/blog",
///         "children": {
///             "post": {"path": "/post", "methods": ["GET"]}
///         }
///     }
/// }))
/// .unwrap();
///
/// let request = Request::get("http://localhost/blog/post").unwrap();
/// let result = router.match_request(&request).unwrap().unwrap();
/// assert_eq!(result.as_success().unwrap().route_name(), Some("blog/post"));
///
/// let uri = router.assemble(&Default::default(), "blog/post", false).unwrap();
/// assert_eq!(uri, "/blog/post");
/// ```
#[derive(Debug)]
pub struct Router {
    routes: RouteCollection,
    manager: RouteManager,
    scheme: String,
    host: String,
    /// Path prefix without trailing slash
    base_path: String,
}

impl Router {
    /// Create an empty router using the stock route manager
    pub fn new() -> Self {
        Self::with_manager(RouteManager::new())
    }

    /// Create an empty router resolving configured routes through `manager`
    pub fn with_manager(manager: RouteManager) -> Self {
        Self {
            routes: manager.collection(),
            manager,
            scheme: DEFAULT_SCHEME.to_string(),
            host: DEFAULT_HOST.to_string(),
            base_path: String::new(),
        }
    }

    /// Build a router from a `name → route config` object
    pub fn from_config(routes: &Value) -> Result<Self> {
        let mut router = Self::new();
        router.load(routes)?;
        Ok(router)
    }

    /// Add every route of a `name → route config` object
    pub fn load(&mut self, routes: &Value) -> Result<()> {
        self.manager.insert_routes(&mut self.routes, routes)?;
        info_log!("Router configured with {} root routes", self.routes.len());
        Ok(())
    }

    /// Mount the router under `base_uri`
    pub fn set_base_uri(&mut self, base_uri: &str) -> Result<()> {
        let url = Url::parse(base_uri).map_err(|e| {
            RouterError::invalid_argument(format!("invalid base URI '{}': {}", base_uri, e))
        })?;

        self.scheme = url.scheme().to_string();
        self.host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => String::new(),
        };
        self.base_path = url.path().trim_end_matches('/').to_string();
        Ok(())
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn routes(&self) -> &RouteCollection {
        &self.routes
    }

    pub fn routes_mut(&mut self) -> &mut RouteCollection {
        &mut self.routes
    }

    /// Add a root route with the default priority
    pub fn add_route(&mut self, name: impl Into<String>, route: impl Into<RouteDefinition>) {
        self.routes.insert(name, route, DEFAULT_PRIORITY);
    }

    /// Match a request against the root routes
    ///
    /// Requests outside the base path never match. The base path only covers
    /// whole segments: `/app` covers `/app` and `/app/...` but not `/application`.
    pub fn match_request(&self, request: &dyn HttpRequest) -> Result<Option<MatchResult>> {
        let base_path = self.base_path.as_str();
        let inside = request
            .path()
            .strip_prefix(base_path)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'));
        if !inside {
            debug_log!(
                "Request path '{}' is outside base path '{}'",
                request.path(),
                base_path
            );
            return Ok(None);
        }

        let result = self.routes.match_request(request, base_path.len())?;
        debug_log!(
            "{} {} → {}",
            request.method(),
            request.path(),
            result.as_ref().map_or("no match", MatchResult::kind)
        );
        Ok(result)
    }

    /// Assemble the URI of the route named `name` (`parent/child/...`)
    pub fn assemble(&self, params: &RouteParams, name: &str, force_canonical: bool) -> Result<String> {
        let (root, remainder) = match name.split_once('/') {
            Some((root, rest)) => (root, Some(rest).filter(|rest| !rest.is_empty())),
            None => (name, None),
        };

        let Some(route) = self.routes.get(root)? else {
            warn_log!("Cannot assemble unknown route '{}'", root);
            return Err(RouterError::RouteNotFound {
                name: root.to_string(),
            });
        };

        let mut result = route.assemble(params, remainder)?;
        result.prefix_path(&self.base_path);

        Ok(result.generate_uri(&self.scheme, &self.host, force_canonical))
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}
