//! The generic route
//!
//! [`GenericRoute`] is the composite node of the route tree. It can check
//! the scheme, the hostname, a piece of the path and the method, and hands
//! whatever is left of the path to its children.
//!
//! # Matching
//!
//! ```text
//! secure route, non-secure scheme  → SchemeNotAllowed (no parsing)
//! hostname parser, partial/no host → no match
//! no path parser / path mismatch   → no match
//! path left over                   → children (no children: no match)
//! path fully consumed              → method check at this node
//! ```

use crate::assembly::AssemblyResult;
use crate::collection::RouteCollection;
use crate::error::{Result, RouterError};
use crate::match_result::{MatchResult, MethodNotAllowed, SchemeNotAllowed, SuccessfulMatch};
use crate::method::Methods;
use crate::params::RouteParams;
use crate::parser::{Parser, ParserRef};
use crate::request::{HttpRequest, SECURE_SCHEME};
use crate::route::Route;
use crate::{trace_log, warn_log};
use std::sync::Arc;

/// Composite route matching hostname, path, scheme and method
///
/// # Example
///
/// ```
/// use route_tree::{GenericRoute, LiteralParser, Methods, Request, Route};
///
/// let route = GenericRoute::new()
///     .path_parser(LiteralParser::new("/login"))
///     .methods(Methods::parse("post").unwrap());
///
/// let request = Request::get("http://example.com/login").unwrap();
/// let result = route.match_request(&request, 0).unwrap().unwrap();
///
/// assert!(!result.is_success());
/// ```
#[derive(Debug, Default)]
pub struct GenericRoute {
    hostname_parser: Option<ParserRef>,
    path_parser: Option<ParserRef>,
    children: Option<RouteCollection>,
    secure: bool,
    methods: Methods,
    defaults: RouteParams,
}

impl GenericRoute {
    /// Create a route that matches nothing until configured
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hostname_parser(self, parser: impl Parser + 'static) -> Self {
        self.hostname_parser_ref(Arc::new(parser))
    }

    pub fn hostname_parser_ref(mut self, parser: ParserRef) -> Self {
        self.hostname_parser = Some(parser);
        self
    }

    pub fn path_parser(self, parser: impl Parser + 'static) -> Self {
        self.path_parser_ref(Arc::new(parser))
    }

    pub fn path_parser_ref(mut self, parser: ParserRef) -> Self {
        self.path_parser = Some(parser);
        self
    }

    /// Require the secure scheme
    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn methods(mut self, methods: Methods) -> Self {
        self.methods = methods;
        self
    }

    /// Parameters used when neither hostname nor path provide a value
    pub fn defaults(mut self, defaults: RouteParams) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn children(mut self, children: RouteCollection) -> Self {
        self.children = Some(children);
        self
    }

    pub fn get_children(&self) -> Option<&RouteCollection> {
        self.children.as_ref()
    }

    pub fn get_children_mut(&mut self) -> Option<&mut RouteCollection> {
        self.children.as_mut()
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }

    pub fn get_methods(&self) -> &Methods {
        &self.methods
    }

    pub fn get_defaults(&self) -> &RouteParams {
        &self.defaults
    }

    /// Hostname parameters; `None` rejects the request
    ///
    /// Hostnames must match in full, there is no partial match to delegate.
    fn match_hostname(&self, request: &dyn HttpRequest) -> Option<RouteParams> {
        let Some(parser) = &self.hostname_parser else {
            return Some(RouteParams::new());
        };

        let hostname = request.hostname();
        parser
            .parse(hostname, 0)
            .filter(|result| result.match_length == hostname.len())
            .map(|result| result.params)
    }
}

impl Route for GenericRoute {
    fn match_request(
        &self,
        request: &dyn HttpRequest,
        path_offset: usize,
    ) -> Result<Option<MatchResult>> {
        if self.secure && request.scheme() != SECURE_SCHEME {
            return Ok(Some(
                SchemeNotAllowed::new(request.uri_with_scheme(SECURE_SCHEME)).into(),
            ));
        }

        let Some(host_params) = self.match_hostname(request) else {
            return Ok(None);
        };

        let Some(path_parser) = &self.path_parser else {
            return Ok(None);
        };

        let path = request.path();
        let Some(path_result) = path_parser.parse(path, path_offset) else {
            return Ok(None);
        };

        let next_offset = path_offset + path_result.match_length;
        let params = RouteParams::layered([&self.defaults, &host_params, &path_result.params]);

        if next_offset < path.len() {
            let Some(children) = &self.children else {
                return Ok(None);
            };

            trace_log!(
                "Incomplete path match, resolving children from offset {}",
                next_offset
            );
            let mut result = children.match_request(request, next_offset)?;
            if let Some(MatchResult::Success(success)) = &mut result {
                success.merge_parent_params(&params);
            }
            return Ok(result);
        }

        if self.methods.is_empty() {
            return Ok(None);
        }

        if self.methods.allows(request.method()) {
            return Ok(Some(SuccessfulMatch::new(params).into()));
        }

        Ok(Some(MethodNotAllowed::new(self.methods.to_list()).into()))
    }

    fn assemble(&self, params: &RouteParams, child_name: Option<&str>) -> Result<AssemblyResult> {
        let mut result = AssemblyResult::new();

        if self.secure {
            result = result.with_scheme(SECURE_SCHEME);
        }
        if let Some(parser) = &self.hostname_parser {
            result = result.with_host(parser.compile(params, &self.defaults)?);
        }
        if let Some(parser) = &self.path_parser {
            result = result.with_path(parser.compile(params, &self.defaults)?);
        }

        let Some(child_name) = child_name else {
            return Ok(result);
        };

        let Some(children) = &self.children else {
            return Err(RouterError::Runtime(
                "Route has no children to assemble".to_string(),
            ));
        };

        let (name, remainder) = match child_name.split_once('/') {
            Some((name, rest)) => (name, Some(rest).filter(|rest| !rest.is_empty())),
            None => (child_name, None),
        };

        let Some(child) = children.get(name)? else {
            warn_log!("Cannot assemble unknown child route '{}'", name);
            return Err(RouterError::RouteNotFound {
                name: name.to_string(),
            });
        };

        result.append(child.assemble(params, remainder)?);
        Ok(result)
    }
}
