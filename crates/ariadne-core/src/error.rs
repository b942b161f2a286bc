//! Dispatch error types.
//!
//! The dispatcher surfaces exactly two per-request failure signals:
//! "not found" and "method not allowed". A route that matched but whose
//! handler is missing from the registry is deliberately reported as "not
//! found" as well — callers must not be able to distinguish "no route" from
//! "route matched but handler missing".
//!
//! Configuration-time failures (malformed patterns, bad method lists) are
//! raised during startup by `RouteTable::build` and the configuration
//! loader, never through this type.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using [`DispatchError`].
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Per-request dispatch failures.
///
/// These are typed values, not exceptions used for control flow: matching
/// and resolution are deterministic, and a failure on attempt N fails
/// identically on attempt N+1, so there are no retries anywhere.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No route matched, or the matched route's handler does not exist.
    #[error("not found")]
    NotFound,

    /// A route matched the path structurally but not the request method.
    #[error("method not allowed")]
    MethodNotAllowed {
        /// Verbs that would have been accepted; suitable for an `Allow`
        /// header.
        allowed: Vec<http::Method>,
    },
}

impl DispatchError {
    /// Returns the conventional HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
        }
    }

    /// Converts this error to a serializable envelope.
    #[must_use]
    pub fn to_envelope(&self, request_id: Option<&str>) -> ErrorEnvelope {
        let allow = match self {
            Self::MethodNotAllowed { allowed } => Some(
                allowed
                    .iter()
                    .map(|m| m.as_str().to_string())
                    .collect::<Vec<_>>(),
            ),
            _ => None,
        };
        ErrorEnvelope {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                allow,
            },
            request_id: request_id.map(ToString::to_string),
        }
    }
}

/// Serializable error envelope for transport-layer responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// The error details.
    pub error: ErrorDetail,
    /// The request ID for correlation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

/// Error detail within an envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Accepted verbs for a method-not-allowed failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow: Option<Vec<String>>,
}
