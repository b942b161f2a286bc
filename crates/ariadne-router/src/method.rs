//! Allowed-method constraints for routes.
//!
//! A route either accepts any verb or a fixed list drawn from the supported
//! set (GET, POST, PUT, PATCH, DELETE, HEAD, OPTIONS). Constraints are
//! written in configuration as `"Any"`, a single verb, or a comma-separated
//! list such as `"GET, POST"`.

use http::Method;
use thiserror::Error;

/// The verbs a method constraint may name.
pub const SUPPORTED_METHODS: [Method; 7] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::HEAD,
    Method::OPTIONS,
];

/// Error raised when a method constraint string cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MethodSetError {
    /// A verb outside the supported set was named.
    #[error("unsupported HTTP method in constraint: {verb}")]
    UnsupportedMethod {
        /// The offending verb as written.
        verb: String,
    },

    /// The constraint contained an empty verb (e.g. `"GET,,POST"`).
    #[error("empty method in constraint: {spec:?}")]
    EmptyMethod {
        /// The full constraint string.
        spec: String,
    },
}

/// The set of HTTP methods a route accepts.
///
/// # Example
///
/// ```rust
/// use ariadne_router::MethodSet;
/// use http::Method;
///
/// let set = MethodSet::parse("GET, POST").unwrap();
/// assert!(set.allows(&Method::GET));
/// assert!(!set.allows(&Method::DELETE));
///
/// assert!(MethodSet::Any.allows(&Method::DELETE));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MethodSet {
    /// No constraint; every verb is accepted.
    #[default]
    Any,
    /// Only the listed verbs are accepted.
    Of(Vec<Method>),
}

impl MethodSet {
    /// Builds a constraint from an explicit verb list.
    #[must_use]
    pub fn of(methods: impl IntoIterator<Item = Method>) -> Self {
        Self::Of(methods.into_iter().collect())
    }

    /// Parses a constraint string: `"Any"` (case-insensitive) or `"*"` for
    /// no constraint, otherwise a comma-separated verb list.
    pub fn parse(spec: &str) -> Result<Self, MethodSetError> {
        let trimmed = spec.trim();
        if trimmed.is_empty() || trimmed == "*" || trimmed.eq_ignore_ascii_case("any") {
            return Ok(Self::Any);
        }

        let mut methods = Vec::new();
        for part in trimmed.split(',') {
            let verb = part.trim();
            if verb.is_empty() {
                return Err(MethodSetError::EmptyMethod {
                    spec: spec.to_string(),
                });
            }
            let method = SUPPORTED_METHODS
                .iter()
                .find(|m| m.as_str().eq_ignore_ascii_case(verb))
                .cloned()
                .ok_or_else(|| MethodSetError::UnsupportedMethod {
                    verb: verb.to_string(),
                })?;
            if !methods.contains(&method) {
                methods.push(method);
            }
        }
        Ok(Self::Of(methods))
    }

    /// Returns true if `method` satisfies this constraint.
    #[must_use]
    pub fn allows(&self, method: &Method) -> bool {
        match self {
            Self::Any => true,
            Self::Of(methods) => methods.contains(method),
        }
    }

    /// Returns the explicit verb list, or `None` for an unconstrained set.
    #[must_use]
    pub fn methods(&self) -> Option<&[Method]> {
        match self {
            Self::Any => None,
            Self::Of(methods) => Some(methods),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_any_forms() {
        assert_eq!(MethodSet::parse("Any").unwrap(), MethodSet::Any);
        assert_eq!(MethodSet::parse("ANY").unwrap(), MethodSet::Any);
        assert_eq!(MethodSet::parse("*").unwrap(), MethodSet::Any);
        assert_eq!(MethodSet::parse("").unwrap(), MethodSet::Any);
    }

    #[test]
    fn parse_single_verb() {
        let set = MethodSet::parse("get").unwrap();
        assert!(set.allows(&Method::GET));
        assert!(!set.allows(&Method::POST));
    }

    #[test]
    fn parse_verb_list() {
        let set = MethodSet::parse("GET, POST,put").unwrap();
        assert_eq!(
            set.methods(),
            Some(&[Method::GET, Method::POST, Method::PUT][..])
        );
    }

    #[test]
    fn parse_deduplicates() {
        let set = MethodSet::parse("GET,get,GET").unwrap();
        assert_eq!(set.methods(), Some(&[Method::GET][..]));
    }

    #[test]
    fn parse_rejects_unknown_verb() {
        let err = MethodSet::parse("GET,TRACE").unwrap_err();
        assert!(matches!(err, MethodSetError::UnsupportedMethod { verb } if verb == "TRACE"));
    }

    #[test]
    fn parse_rejects_empty_verb() {
        let err = MethodSet::parse("GET,,POST").unwrap_err();
        assert!(matches!(err, MethodSetError::EmptyMethod { .. }));
    }

    #[test]
    fn any_allows_everything() {
        for method in SUPPORTED_METHODS {
            assert!(MethodSet::Any.allows(&method));
        }
    }
}
