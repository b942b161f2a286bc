//! Handler registry abstraction.
//!
//! The resolver never enumerates handlers or performs dynamic existence
//! checks itself; it computes a symbolic name and treats it strictly as an
//! opaque lookup key against this injected collaborator. That keeps the
//! routing core free of anything reflection-like.

use std::collections::BTreeSet;
use std::sync::Arc;

use indexmap::IndexMap;

/// Existence oracle for handler identifiers.
///
/// Implementations own the mapping from symbolic identifier to an actual
/// handler; the router only asks whether an identifier is known.
pub trait HandlerRegistry: Send + Sync {
    /// Returns true if `id` names a registered handler.
    fn exists(&self, id: &str) -> bool;
}

/// A registry that knows identifiers but holds no handler values.
///
/// Useful when handler construction lives elsewhere (a DI container, a
/// code-generated table) and the router only needs the existence check.
///
/// # Example
///
/// ```rust
/// use ariadne_core::{HandlerRegistry, StaticRegistry};
///
/// let registry: StaticRegistry = ["Article.Show", "User.List"].into_iter().collect();
/// assert!(registry.exists("Article.Show"));
/// assert!(!registry.exists("Article.Delete"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    ids: BTreeSet<String>,
}

impl StaticRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an identifier.
    pub fn insert(&mut self, id: impl Into<String>) {
        self.ids.insert(id.into());
    }

    /// Number of registered identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl HandlerRegistry for StaticRegistry {
    fn exists(&self, id: &str) -> bool {
        self.ids.contains(id)
    }
}

impl<S: Into<String>> FromIterator<S> for StaticRegistry {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// A registry that maps identifiers to shared handler values.
///
/// `H` is whatever the caller's handler type is — a factory, a trait
/// object, a closure wrapper. The router never touches the values; it only
/// resolves them on behalf of the invocation layer.
#[derive(Debug, Clone)]
pub struct TypedRegistry<H> {
    handlers: IndexMap<String, Arc<H>>,
}

impl<H> Default for TypedRegistry<H> {
    fn default() -> Self {
        Self {
            handlers: IndexMap::new(),
        }
    }
}

impl<H> TypedRegistry<H> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler under an identifier, replacing any previous one.
    pub fn register(&mut self, id: impl Into<String>, handler: H) {
        self.handlers.insert(id.into(), Arc::new(handler));
    }

    /// Resolves a handler by identifier.
    #[must_use]
    pub fn resolve(&self, id: &str) -> Option<Arc<H>> {
        self.handlers.get(id).cloned()
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<H: Send + Sync> HandlerRegistry for TypedRegistry<H> {
    fn exists(&self, id: &str) -> bool {
        self.handlers.contains_key(id)
    }
}
