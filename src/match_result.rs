//! Match results
//!
//! A route either does not match at all (`None`), matches successfully, or
//! matches the request's location but rejects it for a specific reason. Route
//! implementations outside this crate may report their own reasons through
//! [`MatchResult::Other`].

use crate::params::RouteParams;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Result kinds produced by custom routes
pub trait CustomMatchResult: fmt::Debug + Send + Sync + 'static {
    /// Whether this result reports a successful match
    ///
    /// Only [`SuccessfulMatch`] may report success; a custom result that
    /// returns `true` here is rejected while merging child results.
    fn is_success(&self) -> bool;

    /// Downcasting hook for callers that know the concrete type
    fn as_any(&self) -> &dyn Any;
}

/// Outcome of matching a request against a route
#[derive(Debug, Clone)]
pub enum MatchResult {
    Success(SuccessfulMatch),
    MethodNotAllowed(MethodNotAllowed),
    SchemeNotAllowed(SchemeNotAllowed),
    /// Opaque result of a custom route, passed through unmodified
    Other(Arc<dyn CustomMatchResult>),
}

impl MatchResult {
    pub fn is_success(&self) -> bool {
        match self {
            MatchResult::Success(_) => true,
            MatchResult::MethodNotAllowed(_) | MatchResult::SchemeNotAllowed(_) => false,
            MatchResult::Other(result) => result.is_success(),
        }
    }

    pub fn as_success(&self) -> Option<&SuccessfulMatch> {
        match self {
            MatchResult::Success(success) => Some(success),
            _ => None,
        }
    }

    pub fn into_success(self) -> Option<SuccessfulMatch> {
        match self {
            MatchResult::Success(success) => Some(success),
            _ => None,
        }
    }

    /// Short name of the variant, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            MatchResult::Success(_) => "success",
            MatchResult::MethodNotAllowed(_) => "method-not-allowed",
            MatchResult::SchemeNotAllowed(_) => "scheme-not-allowed",
            MatchResult::Other(_) => "custom",
        }
    }
}

impl PartialEq for MatchResult {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (MatchResult::Success(a), MatchResult::Success(b)) => a == b,
            (MatchResult::MethodNotAllowed(a), MatchResult::MethodNotAllowed(b)) => a == b,
            (MatchResult::SchemeNotAllowed(a), MatchResult::SchemeNotAllowed(b)) => a == b,
            // Custom results compare by identity.
            (MatchResult::Other(a), MatchResult::Other(b)) => {
                Arc::as_ptr(a).cast::<()>() == Arc::as_ptr(b).cast::<()>()
            }
            _ => false,
        }
    }
}

impl From<SuccessfulMatch> for MatchResult {
    fn from(success: SuccessfulMatch) -> Self {
        MatchResult::Success(success)
    }
}

impl From<MethodNotAllowed> for MatchResult {
    fn from(result: MethodNotAllowed) -> Self {
        MatchResult::MethodNotAllowed(result)
    }
}

impl From<SchemeNotAllowed> for MatchResult {
    fn from(result: SchemeNotAllowed) -> Self {
        MatchResult::SchemeNotAllowed(result)
    }
}

// ============================================================================
// SuccessfulMatch
// ============================================================================

/// A request fully matched a route
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SuccessfulMatch {
    params: RouteParams,
    route_name: Option<String>,
}

impl SuccessfulMatch {
    pub fn new(params: RouteParams) -> Self {
        Self {
            params,
            route_name: None,
        }
    }

    pub fn params(&self) -> &RouteParams {
        &self.params
    }

    pub fn into_params(self) -> RouteParams {
        self.params
    }

    /// Slash-separated name of the matched route, from the outermost named ancestor down
    pub fn route_name(&self) -> Option<&str> {
        self.route_name.as_deref()
    }

    /// Record the collection name under which this match was found
    pub fn prepend_route_name(&mut self, name: &str) {
        self.route_name = Some(match self.route_name.take() {
            Some(child) => format!("{}/{}", name, child),
            None => name.to_string(),
        });
    }

    /// Put an ancestor's parameters underneath this match's own
    pub fn merge_parent_params(&mut self, parent: &RouteParams) {
        let own = std::mem::replace(&mut self.params, parent.clone());
        self.params.overlay(&own);
    }
}

// ============================================================================
// MethodNotAllowed
// ============================================================================

/// The location matched but the request method is not accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodNotAllowed {
    allowed_methods: Vec<String>,
}

impl MethodNotAllowed {
    pub fn new(allowed_methods: Vec<String>) -> Self {
        Self { allowed_methods }
    }

    pub fn allowed_methods(&self) -> &[String] {
        &self.allowed_methods
    }

    /// Append another result's methods, keeping order and duplicates
    pub fn merge(&mut self, other: &MethodNotAllowed) {
        self.allowed_methods
            .extend(other.allowed_methods.iter().cloned());
    }

    /// Value for an `Allow` response header, duplicates removed
    pub fn allow_header(&self) -> String {
        let mut seen = Vec::with_capacity(self.allowed_methods.len());
        for method in &self.allowed_methods {
            if !seen.contains(&method.as_str()) {
                seen.push(method.as_str());
            }
        }
        seen.join(", ")
    }
}

// ============================================================================
// SchemeNotAllowed
// ============================================================================

/// The location matched but must be requested over another scheme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeNotAllowed {
    allowed_uri: String,
}

impl SchemeNotAllowed {
    pub fn new(allowed_uri: impl Into<String>) -> Self {
        Self {
            allowed_uri: allowed_uri.into(),
        }
    }

    /// The request URI rewritten to the allowed scheme
    pub fn allowed_uri(&self) -> &str {
        &self.allowed_uri
    }
}
