//! Error handling for the router
//!
//! A failed match is never an error: it is reported as `None` or as one of
//! the failure variants of [`MatchResult`](crate::MatchResult). The errors in
//! this module are configuration mistakes and contract violations.

use thiserror::Error;

/// Errors raised while configuring, matching or assembling routes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// A value handed to the router has the wrong shape
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An operation was requested that the route cannot perform
    #[error("{0}")]
    Runtime(String),

    /// A custom match result broke the success contract
    #[error("Unexpected value: {0}")]
    UnexpectedValue(String),

    /// Assembly referenced a child name that is not registered
    #[error("Route not found: {name}")]
    RouteNotFound { name: String },

    /// The route factory has no constructor for a type tag
    #[error("Unknown route type: {0}")]
    UnknownRouteType(String),
}

impl RouterError {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        RouterError::InvalidArgument(message.into())
    }

    /// Check if this error is a configuration mistake rather than a contract violation
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            RouterError::InvalidArgument(_)
                | RouterError::RouteNotFound { .. }
                | RouterError::UnknownRouteType(_)
        )
    }
}

/// Result alias used throughout the crate
pub type Result<T, E = RouterError> = std::result::Result<T, E>;
