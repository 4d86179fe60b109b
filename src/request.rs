//! Request accessors consumed by the matcher
//!
//! Routes never look at a full HTTP request. They only need the scheme,
//! hostname, path and method, plus the ability to rebuild the request URI
//! under a different scheme when redirecting to the secure variant.

use crate::error::{Result, RouterError};
use url::Url;

/// The scheme a `secure` route requires
pub const SECURE_SCHEME: &str = "https";

/// Read-only view of an incoming request
pub trait HttpRequest {
    /// Request scheme, lowercase (`http`, `https`)
    fn scheme(&self) -> &str;

    /// Hostname without port
    fn hostname(&self) -> &str;

    /// Request path, starting with `/`
    fn path(&self) -> &str;

    /// Request method, uppercase
    fn method(&self) -> &str;

    /// Full request URI with the scheme replaced, keeping host, path and query
    fn uri_with_scheme(&self, scheme: &str) -> String;
}

/// Owned request value backed by a parsed URL
///
/// # Example
///
/// ```
/// use route_tree::{HttpRequest, Request};
///
/// let request = Request::new("post", "http://example.com/foo?x=1").unwrap();
///
/// assert_eq!(request.method(), "POST");
/// assert_eq!(request.path(), "/foo");
/// assert_eq!(request.uri_with_scheme("https"), "https://example.com/foo?x=1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    url: Url,
    method: String,
}

impl Request {
    /// Create a request from a method and an absolute URI
    pub fn new(method: impl AsRef<str>, uri: &str) -> Result<Self> {
        let url = Url::parse(uri).map_err(|e| {
            RouterError::invalid_argument(format!("'{}' is not a valid absolute URI: {}", uri, e))
        })?;

        Ok(Self {
            url,
            method: method.as_ref().to_ascii_uppercase(),
        })
    }

    /// Create a `GET` request
    pub fn get(uri: &str) -> Result<Self> {
        Self::new("GET", uri)
    }

    /// Replace the request method
    pub fn with_method(mut self, method: impl AsRef<str>) -> Self {
        self.method = method.as_ref().to_ascii_uppercase();
        self
    }

    /// The parsed URL
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl HttpRequest for Request {
    fn scheme(&self) -> &str {
        self.url.scheme()
    }

    fn hostname(&self) -> &str {
        self.url.host_str().unwrap_or("")
    }

    fn path(&self) -> &str {
        self.url.path()
    }

    fn method(&self) -> &str {
        &self.method
    }

    fn uri_with_scheme(&self, scheme: &str) -> String {
        let serialized = self.url.as_str();
        format!("{}{}", scheme, &serialized[self.url.scheme().len()..])
    }
}

/// Server-side requests usually carry an origin-form URI with no scheme. The
/// scheme is then read from an [`http::uri::Scheme`] in the request
/// extensions, which the server inserts once it knows whether the connection
/// is TLS; without one the request counts as `http` and `secure` routes answer
/// with a redirect target.
///
/// ```
/// use http::uri::Scheme;
/// use route_tree::HttpRequest;
///
/// let mut request = http::Request::get("/login").body(()).unwrap();
/// assert_eq!(HttpRequest::scheme(&request), "http");
///
/// request.extensions_mut().insert(Scheme::HTTPS);
/// assert_eq!(HttpRequest::scheme(&request), "https");
/// ```
#[cfg(feature = "http")]
impl<B> HttpRequest for http::Request<B> {
    fn scheme(&self) -> &str {
        self.uri()
            .scheme_str()
            .or_else(|| {
                self.extensions()
                    .get::<http::uri::Scheme>()
                    .map(http::uri::Scheme::as_str)
            })
            .unwrap_or("http")
    }

    fn hostname(&self) -> &str {
        if let Some(host) = self.uri().host() {
            return host;
        }

        self.headers()
            .get(http::header::HOST)
            .and_then(|value| value.to_str().ok())
            .map(strip_port)
            .unwrap_or("")
    }

    fn path(&self) -> &str {
        self.uri().path()
    }

    fn method(&self) -> &str {
        self.method().as_str()
    }

    fn uri_with_scheme(&self, scheme: &str) -> String {
        let authority = self
            .uri()
            .authority()
            .map(|authority| authority.as_str())
            .or_else(|| {
                self.headers()
                    .get(http::header::HOST)
                    .and_then(|value| value.to_str().ok())
            })
            .unwrap_or("");
        let path_and_query = self
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        format!("{}://{}{}", scheme, authority, path_and_query)
    }
}

#[cfg(feature = "http")]
fn strip_port(host: &str) -> &str {
    // Bracketed IPv6 literals contain colons of their own.
    if host.starts_with('[') {
        return host.find(']').map_or(host, |end| &host[..=end]);
    }
    host.split(':').next().unwrap_or(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_accessors() {
        let request = Request::get("http://example.com/foo/bar").unwrap();

        assert_eq!(request.scheme(), "http");
        assert_eq!(request.hostname(), "example.com");
        assert_eq!(request.path(), "/foo/bar");
        assert_eq!(request.method(), "GET");
    }

    #[test]
    fn test_uri_with_scheme_preserves_rest() {
        let request = Request::get("http://example.com:8080/foo/bar?baz=bat#frag").unwrap();

        assert_eq!(
            request.uri_with_scheme(SECURE_SCHEME),
            "https://example.com:8080/foo/bar?baz=bat#frag"
        );
    }

    #[test]
    fn test_method_is_uppercased() {
        let request = Request::get("http://example.com/").unwrap().with_method("patch");
        assert_eq!(request.method(), "PATCH");
    }

    #[test]
    fn test_invalid_uri() {
        let error = Request::get("/relative/only").unwrap_err();
        assert!(matches!(error, RouterError::InvalidArgument(_)));
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_request_adapter() {
        let request = http::Request::builder()
            .method("POST")
            .uri("/foo/bar?x=1")
            .header("Host", "example.com:8080")
            .body(())
            .unwrap();

        assert_eq!(HttpRequest::scheme(&request), "http");
        assert_eq!(HttpRequest::hostname(&request), "example.com");
        assert_eq!(HttpRequest::path(&request), "/foo/bar");
        assert_eq!(HttpRequest::method(&request), "POST");
        assert_eq!(
            request.uri_with_scheme("https"),
            "https://example.com:8080/foo/bar?x=1"
        );
    }

    #[cfg(feature = "http")]
    #[test]
    fn test_http_request_scheme_from_extensions() {
        use crate::generic::GenericRoute;
        use crate::parser::LiteralParser;
        use crate::route::Route;

        let route = GenericRoute::new()
            .secure(true)
            .path_parser(LiteralParser::new("/login"));

        let mut request = http::Request::builder()
            .uri("/login")
            .header("Host", "example.com")
            .body(())
            .unwrap();

        let result = route.match_request(&request, 0).unwrap().unwrap();
        assert!(!result.is_success());

        request.extensions_mut().insert(http::uri::Scheme::HTTPS);
        assert_eq!(HttpRequest::scheme(&request), "https");

        let result = route.match_request(&request, 0).unwrap().unwrap();
        assert!(result.is_success());

        let absolute = http::Request::builder()
            .uri("http://example.com/login")
            .body(())
            .unwrap();
        assert_eq!(HttpRequest::scheme(&absolute), "http");
    }
}
