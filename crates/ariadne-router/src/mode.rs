//! Routing modes.
//!
//! The engine matches and generates the same way everywhere; what differs
//! between transports is where the candidate path comes from and how a
//! generated path plus leftover parameters is written out. That difference
//! is a configuration value, not a subclass: one [`RoutingMode`] enum
//! parameterizes both the dispatcher's input extraction and the URL
//! generator's output format.

use http::Method;

use crate::url::{encode_query, GeneratedUrl};

/// Default name of the query parameter carrying the route path.
pub const DEFAULT_ROUTE_PARAM: &str = "r";

/// Minimal view of an incoming request, as the router sees it.
///
/// The HTTP message abstraction is an external collaborator; the router
/// needs only the method, the path component, and the query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRequest {
    /// HTTP method of the request.
    pub method: Method,
    /// Path component of the request URI.
    pub path: String,
    /// Decoded query parameters in order of appearance.
    pub query: Vec<(String, String)>,
}

impl RouteRequest {
    /// Creates a request with no query parameters.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Returns the first query parameter with the given name.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Transport-specific convention for where the matched path comes from and
/// how generated URLs are formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingMode {
    /// The route path travels in a query parameter (default name `r`).
    /// Generated URLs are `{base}?r={path}&k=v`.
    QueryParam {
        /// Prefix prepended to generated URLs (e.g. a script URL); may be
        /// empty.
        base: String,
        /// Name of the query parameter carrying the path.
        route_param: String,
    },
    /// The route path is the request path with a known base prefix
    /// stripped. Generated URLs are `{base_path}{path}?k=v`.
    PathRewrite {
        /// Base prefix stripped on match and prepended on generation; may
        /// be empty.
        base_path: String,
    },
    /// The route path is the first positional argument of an argument
    /// vector; leftover parameter values are appended verbatim.
    ArgumentVector,
}

impl Default for RoutingMode {
    fn default() -> Self {
        Self::QueryParam {
            base: String::new(),
            route_param: DEFAULT_ROUTE_PARAM.to_string(),
        }
    }
}

impl RoutingMode {
    /// A path-rewrite mode with the given base prefix.
    #[must_use]
    pub fn path_rewrite(base_path: impl Into<String>) -> Self {
        Self::PathRewrite {
            base_path: base_path.into(),
        }
    }

    /// Extracts the candidate route path from a request according to this
    /// mode. An absent route parameter yields the empty (root) path.
    #[must_use]
    pub fn extract_path(&self, request: &RouteRequest) -> String {
        match self {
            Self::QueryParam { route_param, .. } => request
                .query_param(route_param)
                .unwrap_or_default()
                .to_string(),
            Self::PathRewrite { base_path } => {
                match request.path.strip_prefix(base_path.as_str()) {
                    // The remainder must sit on a segment boundary:
                    // "/apple/pie" is not under the "/app" base.
                    Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.to_string(),
                    _ => request.path.clone(),
                }
            }
            // Argument-vector requests carry the joined path directly; see
            // the dispatcher's argv entry point.
            Self::ArgumentVector => request.path.clone(),
        }
    }

    /// Formats a generated path and its leftover parameters into the final
    /// URL (or argument string) for this mode.
    #[must_use]
    pub fn format(&self, url: &GeneratedUrl) -> String {
        match self {
            Self::QueryParam { base, route_param } => {
                let mut out = format!(
                    "{base}?{route_param}={}",
                    url.path.trim_start_matches('/')
                );
                let query = encode_query(&url.remaining);
                if !query.is_empty() {
                    out.push('&');
                    out.push_str(&query);
                }
                out
            }
            Self::PathRewrite { base_path } => {
                let mut out = format!("{base_path}{}", url.path);
                let query = encode_query(&url.remaining);
                if !query.is_empty() {
                    out.push('?');
                    out.push_str(&query);
                }
                out
            }
            Self::ArgumentVector => {
                let mut out = url.path.trim_start_matches('/').to_string();
                for (_, value) in &url.remaining {
                    out.push(' ');
                    out.push_str(value);
                }
                out
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generated(path: &str, pairs: &[(&str, &str)]) -> GeneratedUrl {
        GeneratedUrl {
            path: path.to_string(),
            remaining: pairs.iter().copied().collect(),
        }
    }

    #[test]
    fn query_param_extraction() {
        let mode = RoutingMode::default();
        let request =
            RouteRequest::new(Method::GET, "/index").with_query("r", "article/42");
        assert_eq!(mode.extract_path(&request), "article/42");
    }

    #[test]
    fn query_param_missing_is_root() {
        let mode = RoutingMode::default();
        let request = RouteRequest::new(Method::GET, "/index");
        assert_eq!(mode.extract_path(&request), "");
    }

    #[test]
    fn path_rewrite_strips_base() {
        let mode = RoutingMode::path_rewrite("/app");
        let request = RouteRequest::new(Method::GET, "/app/article/42");
        assert_eq!(mode.extract_path(&request), "/article/42");
    }

    #[test]
    fn path_rewrite_without_base_prefix_uses_whole_path() {
        let mode = RoutingMode::path_rewrite("/app");
        let request = RouteRequest::new(Method::GET, "/article/42");
        assert_eq!(mode.extract_path(&request), "/article/42");
    }

    #[test]
    fn path_rewrite_strips_only_on_segment_boundary() {
        let mode = RoutingMode::path_rewrite("/app");

        let request = RouteRequest::new(Method::GET, "/apple/pie");
        assert_eq!(mode.extract_path(&request), "/apple/pie");

        let request = RouteRequest::new(Method::GET, "/app");
        assert_eq!(mode.extract_path(&request), "");
    }

    #[test]
    fn query_param_formatting() {
        let mode = RoutingMode::QueryParam {
            base: "index".to_string(),
            route_param: "r".to_string(),
        };
        assert_eq!(
            mode.format(&generated("/article/42", &[("ref", "home")])),
            "index?r=article/42&ref=home"
        );
        assert_eq!(mode.format(&generated("/article/42", &[])), "index?r=article/42");
    }

    #[test]
    fn path_rewrite_formatting() {
        let mode = RoutingMode::path_rewrite("/app");
        assert_eq!(
            mode.format(&generated("/article/42", &[("ref", "home")])),
            "/app/article/42?ref=home"
        );
        assert_eq!(mode.format(&generated("/article/42", &[])), "/app/article/42");
    }

    #[test]
    fn argument_vector_formatting() {
        let mode = RoutingMode::ArgumentVector;
        assert_eq!(
            mode.format(&generated("/user-list/remove-old", &[("0", "30"), ("1", "--dry")])),
            "user-list/remove-old 30 --dry"
        );
    }

    #[test]
    fn query_param_lookup() {
        let request = RouteRequest::new(Method::GET, "/")
            .with_query("a", "1")
            .with_query("a", "2");
        assert_eq!(request.query_param("a"), Some("1"));
        assert_eq!(request.query_param("b"), None);
    }

    #[test]
    fn default_mode() {
        let mode = RoutingMode::default();
        assert_eq!(
            mode,
            RoutingMode::QueryParam {
                base: String::new(),
                route_param: "r".to_string(),
            }
        );
    }
}
