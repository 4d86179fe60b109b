//! Deferred URI building for reverse routing
//!
//! Every route on the way down to the named target contributes a fragment.
//! The result stays unrendered until the caller supplies the scheme and host
//! the URI will be resolved against, so it can decide how much of the
//! authority to spell out.

/// Fragments collected while assembling a route name
///
/// # Example
///
/// ```
/// use route_tree::AssemblyResult;
///
/// let mut result = AssemblyResult::new().with_path("/blog");
/// result.append(AssemblyResult::new().with_path("/2024"));
///
/// assert_eq!(result.generate_uri("http", "example.com", false), "/blog/2024");
/// assert_eq!(
///     result.generate_uri("http", "example.com", true),
///     "http://example.com/blog/2024"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssemblyResult {
    scheme: Option<String>,
    host: Option<String>,
    path: String,
}

impl AssemblyResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Splice a descendant's fragments onto this one
    ///
    /// The child path is appended. A scheme or host declared by the child
    /// replaces this level's, since the deepest constraint is authoritative.
    pub fn append(&mut self, child: AssemblyResult) {
        self.path.push_str(&child.path);

        if child.scheme.is_some() {
            self.scheme = child.scheme;
        }
        if child.host.is_some() {
            self.host = child.host;
        }
    }

    /// Put a base path in front of the assembled path
    pub fn prefix_path(&mut self, base: &str) {
        let base = base.trim_end_matches('/');
        if !base.is_empty() {
            self.path.insert_str(0, base);
        }
    }

    /// Render the URI against the current scheme and host
    ///
    /// Without a declared scheme or host and without `force_canonical`, only
    /// the path is returned. A declared host pulls in the current scheme.
    pub fn generate_uri(
        &self,
        current_scheme: &str,
        current_host: &str,
        force_canonical: bool,
    ) -> String {
        let scheme = self.scheme.as_deref().or_else(|| {
            (force_canonical || self.host.is_some()).then_some(current_scheme)
        });
        let host = self
            .host
            .as_deref()
            .or_else(|| force_canonical.then_some(current_host));

        let mut uri = String::new();

        if let Some(scheme) = scheme {
            uri.push_str(scheme);
            uri.push(':');
        }
        if let Some(host) = host {
            uri.push_str("//");
            uri.push_str(host);
        }
        uri.push_str(&self.path);

        uri
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_scheme_only() {
        let result = AssemblyResult::new().with_scheme("https");
        assert_eq!(result.generate_uri("http", "example.com", false), "https:");
    }

    #[test]
    fn test_host_pulls_in_current_scheme() {
        let result = AssemblyResult::new().with_host("example.org");
        assert_eq!(
            result.generate_uri("http", "example.com", false),
            "http://example.org"
        );
    }

    #[test]
    fn test_path_only_is_relative() {
        let result = AssemblyResult::new().with_path("/bar");
        assert_eq!(result.generate_uri("http", "example.com", false), "/bar");
    }

    #[test]
    fn test_force_canonical() {
        let result = AssemblyResult::new().with_path("/bar");
        assert_eq!(
            result.generate_uri("http", "example.com", true),
            "http://example.com/bar"
        );

        let secure = AssemblyResult::new().with_scheme("https").with_path("/bar");
        assert_eq!(
            secure.generate_uri("http", "example.com", true),
            "https://example.com/bar"
        );
    }

    #[test]
    fn test_append_child_overrides_authority() {
        let mut parent = AssemblyResult::new()
            .with_host("example.com")
            .with_path("/foo");
        parent.append(
            AssemblyResult::new()
                .with_scheme("https")
                .with_host("api.example.com")
                .with_path("/bar"),
        );

        assert_eq!(parent.path(), "/foo/bar");
        assert_eq!(parent.host(), Some("api.example.com"));
        assert_eq!(parent.scheme(), Some("https"));
    }

    #[test]
    fn test_append_keeps_parent_authority_when_child_has_none() {
        let mut parent = AssemblyResult::new().with_scheme("https").with_path("/foo");
        parent.append(AssemblyResult::new().with_path("/bar"));

        assert_eq!(parent.scheme(), Some("https"));
        assert_eq!(parent.host(), None);
        assert_eq!(parent.generate_uri("http", "example.com", false), "https:/foo/bar");
    }

    #[test]
    fn test_prefix_path() {
        let mut result = AssemblyResult::new().with_path("/bar");
        result.prefix_path("/app/");
        assert_eq!(result.path(), "/app/bar");

        let mut result = AssemblyResult::new().with_path("/bar");
        result.prefix_path("/");
        assert_eq!(result.path(), "/bar");
    }
}
