//! Parser contract for hostname and path patterns
//!
//! The pattern language itself lives outside this crate. A route only needs
//! two things from a compiled pattern: parse a subject string from an offset,
//! and compile parameters back into a string.

use crate::error::Result;
use crate::params::RouteParams;
use std::fmt;
use std::sync::Arc;

/// Outcome of a successful parse step
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    /// Parameters captured by the pattern
    pub params: RouteParams,
    /// Number of bytes of the subject consumed from the offset
    pub match_length: usize,
}

impl ParseResult {
    pub fn new(params: RouteParams, match_length: usize) -> Self {
        Self {
            params,
            match_length,
        }
    }
}

/// A compiled hostname or path pattern
pub trait Parser: Send + Sync + fmt::Debug {
    /// Try to match `input` starting at byte `offset`
    ///
    /// Returns `None` when the pattern does not match at that position.
    fn parse(&self, input: &str, offset: usize) -> Option<ParseResult>;

    /// Render the pattern with `params`, falling back to `defaults`
    fn compile(&self, params: &RouteParams, defaults: &RouteParams) -> Result<String>;
}

/// Shared parser handle
pub type ParserRef = Arc<dyn Parser>;

/// Parser for a fixed literal with no parameters
///
/// # Example
///
/// ```
/// use route_tree::{LiteralParser, Parser, RouteParams};
///
/// let parser = LiteralParser::new("/blog");
///
/// let result = parser.parse("/blog/post", 0).unwrap();
/// assert_eq!(result.match_length, 5);
/// assert!(parser.parse("/news", 0).is_none());
///
/// let path = parser.compile(&RouteParams::new(), &RouteParams::new()).unwrap();
/// assert_eq!(path, "/blog");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralParser {
    literal: String,
    case_sensitive: bool,
}

impl LiteralParser {
    pub fn new(literal: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
            case_sensitive: true,
        }
    }

    /// Literal compared ignoring ASCII case, as hostnames are
    pub fn case_insensitive(literal: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
            case_sensitive: false,
        }
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }
}

impl Parser for LiteralParser {
    fn parse(&self, input: &str, offset: usize) -> Option<ParseResult> {
        let end = offset.checked_add(self.literal.len())?;
        let candidate = input.get(offset..end)?;

        let matched = if self.case_sensitive {
            candidate == self.literal
        } else {
            candidate.eq_ignore_ascii_case(&self.literal)
        };

        matched.then(|| ParseResult::new(RouteParams::new(), self.literal.len()))
    }

    fn compile(&self, _params: &RouteParams, _defaults: &RouteParams) -> Result<String> {
        Ok(self.literal.clone())
    }
}
