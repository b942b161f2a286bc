//! Convention-based handler resolution.
//!
//! Given a symbolic candidate (either a route's configured target or a raw
//! path converted through the naming convention), the resolver probes an
//! ordered list of namespace roots for a registered handler identifier.
//! When the whole candidate resolves nothing and it still contains a module
//! separator, the deepest segment is peeled off and retried as an action
//! name on the shorter handler. Precedence is therefore: longer symbolic
//! match first — `foo/bar` prefers a `Foo.Bar` handler's default action
//! over a `Foo` handler's `bar` action.

use std::sync::Arc;

use thiserror::Error;

use ariadne_router::convention::{lower_camel, to_symbolic, MODULE_SEPARATOR};

use crate::registry::HandlerRegistry;

/// Failure to resolve a candidate to a registered handler.
///
/// The dispatcher collapses this into its "not found" signal; it never
/// reaches clients in distinguishable form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No namespace probe produced a registered handler.
    #[error("no handler registered for candidate '{candidate}'")]
    HandlerNotFound {
        /// The symbolic candidate that failed to resolve.
        candidate: String,
    },
}

/// A resolved handler reference: the registry identifier plus the selected
/// action, if any. `action == None` means the handler's default action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedHandler {
    /// Registry identifier of the handler.
    pub handler_id: String,
    /// Lower-camel-cased action name, when the deepest-segment fallback
    /// selected one.
    pub action: Option<String>,
}

/// One candidate handler-group prefix, consulted in priority order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NamespaceRoot {
    /// Symbolic prefix prepended to candidates; may be empty.
    pub prefix: String,
    /// Suffix appended to the candidate's last segment (e.g. `Command`);
    /// may be empty.
    pub handler_suffix: String,
}

impl NamespaceRoot {
    /// Creates a namespace root.
    #[must_use]
    pub fn new(prefix: impl Into<String>, handler_suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            handler_suffix: handler_suffix.into(),
        }
    }

    /// Composes the probe identifier for a symbolic candidate.
    fn compose(&self, symbolic: &str) -> String {
        let mut id = String::new();
        if !self.prefix.is_empty() {
            id.push_str(&self.prefix);
            id.push(MODULE_SEPARATOR);
        }
        id.push_str(symbolic);
        id.push_str(&self.handler_suffix);
        id
    }
}

/// Resolves symbolic candidates against a handler registry.
#[derive(Clone)]
pub struct HandlerResolver {
    roots: Vec<NamespaceRoot>,
    registry: Arc<dyn HandlerRegistry>,
}

impl std::fmt::Debug for HandlerResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerResolver")
            .field("roots", &self.roots)
            .finish_non_exhaustive()
    }
}

impl HandlerResolver {
    /// Creates a resolver over the given namespace roots, in priority
    /// order. An empty list resolves nothing; supply a single root with
    /// empty prefix and suffix to probe candidates verbatim.
    #[must_use]
    pub fn new(roots: Vec<NamespaceRoot>, registry: Arc<dyn HandlerRegistry>) -> Self {
        Self { roots, registry }
    }

    /// Resolves an already-symbolic candidate (a route's configured
    /// target).
    pub fn resolve_symbolic(&self, candidate: &str) -> Result<ResolvedHandler, ResolveError> {
        // Whole candidate as handler, default action.
        if let Some(handler_id) = self.probe(candidate) {
            return Ok(ResolvedHandler {
                handler_id,
                action: None,
            });
        }

        // Deepest segment as action on the shorter handler.
        if let Some((head, tail)) = candidate.rsplit_once(MODULE_SEPARATOR) {
            if let Some(handler_id) = self.probe(head) {
                return Ok(ResolvedHandler {
                    handler_id,
                    action: Some(lower_camel(tail)),
                });
            }
        }

        Err(ResolveError::HandlerNotFound {
            candidate: candidate.to_string(),
        })
    }

    /// Resolves a raw normalized path (implicit/convention dispatch mode).
    ///
    /// The caller is responsible for having validated the path's character
    /// set before handing it over.
    pub fn resolve_path(&self, path: &str) -> Result<ResolvedHandler, ResolveError> {
        self.resolve_symbolic(&to_symbolic(path))
    }

    /// Probes every namespace root for a registered identifier; first hit
    /// wins.
    fn probe(&self, symbolic: &str) -> Option<String> {
        if symbolic.is_empty() {
            return None;
        }
        for root in &self.roots {
            let id = root.compose(symbolic);
            let found = self.registry.exists(&id);
            tracing::trace!(candidate = %id, found, "handler probe");
            if found {
                return Some(id);
            }
        }
        None
    }
}
