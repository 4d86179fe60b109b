//! # Route Tree
//!
//! A hierarchical HTTP router with support for:
//!
//! - **Nested Routes** - Routes consume part of the path and hand the rest to their children
//! - **Priorities** - Children are tried by priority, most recent registration first on ties
//! - **Lazy Routes** - Children can be registered as configuration and built on first use
//! - **Hostname, Scheme and Method Checks** - With structured reasons when a request is rejected
//! - **Reverse Routing** - Assemble the shortest correct URI for a route name and parameters
//!
//! # Quick Start
//!
//! ```
//! use route_tree::*;
//! use serde_json::json;
//!
//! let router = Router::from_config(&json!({
//!     "user": {
//!         "path": "/user",
//!         "children": {
//!             "profile": {"path": "/profile", "methods": "get"},
//!             "login": {"path": "/login", "methods": ["post"], "secure": true},
//!         }
//!     }
//! }))
//! .unwrap();
//!
//! let request = Request::get("http://localhost/user/profile").unwrap();
//! match router.match_request(&request).unwrap() {
//!     Some(MatchResult::Success(success)) => {
//!         assert_eq!(success.route_name(), Some("user/profile"));
//!     }
//!     other => panic!("unexpected result: {:?}", other),
//! }
//!
//! let uri = router.assemble(&RouteParams::new(), "user/login", true).unwrap();
//! assert_eq!(uri, "https://localhost/user/login");
//! ```
//!
//! # Match Results
//!
//! Matching never fails with an error for a request that simply does not fit.
//! The outcome is `None`, a [`SuccessfulMatch`], or a reason the request was
//! rejected at a location that does exist:
//!
//! - [`MethodNotAllowed`] - lists the methods that would have matched
//! - [`SchemeNotAllowed`] - carries the request URI rewritten to `https`
//! - [`MatchResult::Other`] - a custom reason produced by a custom [`Route`]
//!
//! # Patterns
//!
//! Hostname and path patterns are compiled by [`Parser`] implementations
//! supplied by the application. [`LiteralParser`] matches fixed strings and is
//! what [`RouteManager`] uses unless told otherwise.
//!
//! # Feature Flags
//!
//! - `log` (default) - Uses the standard `log` crate for logging
//! - `tracing` - Uses the `tracing` crate for structured logging (mutually exclusive with `log`)
//! - `http` - Implements [`HttpRequest`] for `http::Request<B>`

#![doc(html_root_url = "https://docs.rs/route-tree/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
// Lints are configured in Cargo.toml [lints] section

// Logging abstraction
pub mod logging;

// Error handling
pub mod error;

// Building blocks
pub mod assembly;
pub mod match_result;
pub mod method;
pub mod params;
pub mod parser;
pub mod request;

// Route tree
pub mod collection;
pub mod factory;
pub mod generic;
pub mod route;
pub mod router;

// Re-export main types for convenient access
pub use assembly::AssemblyResult;
pub use collection::{RouteCollection, DEFAULT_PRIORITY};
pub use error::{Result, RouterError};
pub use factory::{
    build_generic, create_from_config, ParserBuilder, RouteConstructor, RouteFactory,
    RouteFactoryRef, RouteManager,
};
pub use generic::GenericRoute;
pub use match_result::{
    CustomMatchResult, MatchResult, MethodNotAllowed, SchemeNotAllowed, SuccessfulMatch,
};
pub use method::{Methods, HTTP_METHODS};
pub use params::RouteParams;
pub use parser::{LiteralParser, ParseResult, Parser, ParserRef};
pub use request::{HttpRequest, Request, SECURE_SCHEME};
pub use route::{Route, RouteConfig, RouteDefinition, RouteRef, DEFAULT_ROUTE_TYPE};
pub use router::Router;
