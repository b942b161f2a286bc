//! Path matching against a compiled route table.
//!
//! The matcher walks precedence classes in fixed order (static, typed,
//! wildcard) and routes in registration order within each class. A route
//! that matches structurally but not by verb does not end the scan: a later
//! route may match the verb, and only when the whole scan finishes without a
//! verb match does the matcher settle on `MethodNotAllowed`. This is what
//! makes a `GET /users` route and a `POST /users` route independently
//! reachable.

use std::sync::Arc;

use http::Method;
use thiserror::Error;

use crate::params::Params;
use crate::table::RouteTable;

/// A successful match: the route's handler name plus extracted parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    /// Symbolic handler name of the matched route.
    pub handler: String,
    /// Extracted placeholder values in order of appearance.
    pub params: Params,
}

/// Typed per-request match failures. Recoverable and expected; the caller
/// maps them to user-visible outcomes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatchError {
    /// No route matched the path structurally.
    #[error("no route matched the path")]
    NoMatch,

    /// At least one route matched structurally, but none accepted the verb.
    #[error("method not allowed for the matched path")]
    MethodNotAllowed {
        /// Union of the verbs accepted by structurally matching routes,
        /// suitable for an `Allow` header.
        allowed: Vec<Method>,
    },
}

/// Validates and normalizes a request path for matching.
///
/// Returns `None` when the path contains characters outside
/// `[A-Za-z0-9/-]`; the guard runs before any route evaluation or handler
/// probing so that the naming convention can never be fed hostile input.
/// Otherwise leading and trailing slashes are stripped.
#[must_use]
pub fn normalize_path(raw: &str) -> Option<String> {
    let legal = raw
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '/' || c == '-');
    if !legal {
        return None;
    }
    Some(raw.trim_matches('/').to_string())
}

/// Matches incoming paths against an immutable [`RouteTable`].
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use ariadne_router::{Matcher, RouteEntry, RouteTable};
/// use http::Method;
///
/// let table = Arc::new(
///     RouteTable::build(vec![RouteEntry::new("/article/:id", "Article.Show")]).unwrap(),
/// );
/// let matcher = Matcher::new(table);
///
/// let m = matcher.match_path("/article/42", &Method::GET).unwrap();
/// assert_eq!(m.handler, "Article.Show");
/// assert_eq!(m.params.get("id"), Some("42"));
/// ```
#[derive(Debug, Clone)]
pub struct Matcher {
    table: Arc<RouteTable>,
}

impl Matcher {
    /// Creates a matcher over a shared route table.
    #[must_use]
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self { table }
    }

    /// The table this matcher scans.
    #[must_use]
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Matches a path and method, returning the handler name and extracted
    /// parameters, or a typed failure.
    pub fn match_path(&self, path: &str, method: &Method) -> Result<RouteMatch, MatchError> {
        let normalized = normalize_path(path).ok_or(MatchError::NoMatch)?;

        let mut structural_hit = false;
        let mut allowed: Vec<Method> = Vec::new();

        for route in self.table.scan_order() {
            let Some(caps) = route.regex().captures(&normalized) else {
                continue;
            };

            if !route.methods().allows(method) {
                // Wrong verb; remember the hit and keep scanning for a
                // route that accepts this method.
                structural_hit = true;
                if let Some(methods) = route.methods().methods() {
                    for m in methods {
                        if !allowed.contains(m) {
                            allowed.push(m.clone());
                        }
                    }
                }
                continue;
            }

            let mut params = Params::with_capacity(route.param_names().len());
            for (name, group) in route.param_names().iter().zip(route.capture_indices()) {
                let value = caps.get(*group).map_or("", |m| m.as_str());
                if !params.contains(name) {
                    params.push(name.clone(), value);
                }
            }
            return Ok(RouteMatch {
                handler: route.handler().to_string(),
                params,
            });
        }

        if structural_hit {
            Err(MatchError::MethodNotAllowed { allowed })
        } else {
            Err(MatchError::NoMatch)
        }
    }
}
