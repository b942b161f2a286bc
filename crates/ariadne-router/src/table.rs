//! Build-once route table.
//!
//! The table compiles every configured route eagerly, partitions the result
//! by precedence class (preserving registration order within each class),
//! and keeps a reverse index from handler name to originating routes for the
//! URL generator. After [`RouteTable::build`] returns the table is never
//! mutated, so it is safe for unsynchronized concurrent reads and is
//! normally shared behind an `Arc`.

use indexmap::IndexMap;

use crate::method::MethodSet;
use crate::pattern::{compile, CompiledRoute, PatternError, Precedence};

/// One configuration entry consumed by [`RouteTable::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    /// Route pattern as configured (e.g. `/article/:id`).
    pub pattern: String,
    /// Symbolic handler name the route targets (e.g. `Article.Show`).
    pub handler: String,
    /// Allowed methods; defaults to [`MethodSet::Any`].
    pub methods: MethodSet,
}

impl RouteEntry {
    /// Creates an entry with no method constraint.
    #[must_use]
    pub fn new(pattern: impl Into<String>, handler: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            handler: handler.into(),
            methods: MethodSet::Any,
        }
    }

    /// Sets the method constraint.
    #[must_use]
    pub fn with_methods(mut self, methods: MethodSet) -> Self {
        self.methods = methods;
        self
    }
}

/// An immutable collection of compiled routes.
///
/// # Example
///
/// ```rust
/// use ariadne_router::{RouteEntry, RouteTable};
///
/// let table = RouteTable::build(vec![
///     RouteEntry::new("/article/:id", "Article.Show"),
///     RouteEntry::new("/about", "Site.About"),
/// ])
/// .unwrap();
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.by_handler("Article.Show").count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    /// All compiled routes in registration order.
    routes: Vec<CompiledRoute>,
    /// Route indices grouped by precedence class, registration order kept.
    by_precedence: [Vec<usize>; 3],
    /// Handler name -> route indices in registration order.
    by_handler: IndexMap<String, Vec<usize>>,
}

impl RouteTable {
    /// Compiles every entry and builds the table.
    ///
    /// Fails on the first malformed pattern: configuration bugs must be
    /// caught before serving traffic.
    pub fn build(entries: impl IntoIterator<Item = RouteEntry>) -> Result<Self, PatternError> {
        let mut table = Self::default();

        for entry in entries {
            let route = compile(&entry.pattern, entry.handler, entry.methods)?;
            let index = table.routes.len();
            table.by_precedence[route.precedence().index()].push(index);
            table
                .by_handler
                .entry(route.handler().to_string())
                .or_default()
                .push(index);
            table.routes.push(route);
        }

        tracing::debug!(
            total = table.routes.len(),
            statics = table.by_precedence[Precedence::Static.index()].len(),
            typed = table.by_precedence[Precedence::Typed.index()].len(),
            wildcards = table.by_precedence[Precedence::Wildcard.index()].len(),
            "route table built"
        );
        Ok(table)
    }

    /// Routes of one precedence class in registration order.
    pub fn in_class(&self, class: Precedence) -> impl Iterator<Item = &CompiledRoute> {
        self.by_precedence[class.index()]
            .iter()
            .map(move |&i| &self.routes[i])
    }

    /// All static routes in registration order.
    pub fn statics(&self) -> impl Iterator<Item = &CompiledRoute> {
        self.in_class(Precedence::Static)
    }

    /// All typed routes in registration order.
    pub fn typed(&self) -> impl Iterator<Item = &CompiledRoute> {
        self.in_class(Precedence::Typed)
    }

    /// All wildcard routes in registration order.
    pub fn wildcards(&self) -> impl Iterator<Item = &CompiledRoute> {
        self.in_class(Precedence::Wildcard)
    }

    /// Routes in matcher scan order: static, then typed, then wildcard,
    /// registration order within each class.
    pub fn scan_order(&self) -> impl Iterator<Item = &CompiledRoute> {
        Precedence::SCAN_ORDER
            .into_iter()
            .flat_map(move |class| self.in_class(class))
    }

    /// Routes registered for a handler name, in registration order.
    ///
    /// A handler may be the target of several patterns; the URL generator
    /// picks the best fit among them.
    pub fn by_handler(&self, handler: &str) -> impl Iterator<Item = &CompiledRoute> {
        self.by_handler
            .get(handler)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(move |&i| &self.routes[i])
    }

    /// All routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CompiledRoute> {
        self.routes.iter()
    }

    /// Number of compiled routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns true if the table holds no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_partitions_by_precedence() {
        let table = RouteTable::build(vec![
            RouteEntry::new("/files/*", "File.Serve"),
            RouteEntry::new("/about", "Site.About"),
            RouteEntry::new("/article/:id", "Article.Show"),
            RouteEntry::new("/contact", "Site.Contact"),
        ])
        .unwrap();

        let statics: Vec<_> = table.statics().map(CompiledRoute::pattern).collect();
        assert_eq!(statics, ["/about", "/contact"]);

        let typed: Vec<_> = table.typed().map(CompiledRoute::pattern).collect();
        assert_eq!(typed, ["/article/:id"]);

        let wildcards: Vec<_> = table.wildcards().map(CompiledRoute::pattern).collect();
        assert_eq!(wildcards, ["/files/*"]);
    }

    #[test]
    fn scan_order_puts_static_first() {
        let table = RouteTable::build(vec![
            RouteEntry::new("/x/*", "Wild"),
            RouteEntry::new("/x/:id", "Typed"),
            RouteEntry::new("/x/y", "Static"),
        ])
        .unwrap();

        let order: Vec<_> = table.scan_order().map(CompiledRoute::handler).collect();
        assert_eq!(order, ["Static", "Typed", "Wild"]);
    }

    #[test]
    fn by_handler_keeps_registration_order() {
        let table = RouteTable::build(vec![
            RouteEntry::new("/article/:id/:slug", "Article.Show"),
            RouteEntry::new("/article/:id", "Article.Show"),
        ])
        .unwrap();

        let patterns: Vec<_> = table
            .by_handler("Article.Show")
            .map(CompiledRoute::pattern)
            .collect();
        assert_eq!(patterns, ["/article/:id/:slug", "/article/:id"]);
    }

    #[test]
    fn by_handler_unknown_is_empty() {
        let table = RouteTable::build(vec![RouteEntry::new("/a", "A")]).unwrap();
        assert_eq!(table.by_handler("Missing").count(), 0);
    }

    #[test]
    fn build_fails_on_bad_pattern() {
        let err = RouteTable::build(vec![
            RouteEntry::new("/ok", "A"),
            RouteEntry::new("", "B"),
        ])
        .unwrap_err();
        assert!(matches!(err, PatternError::Empty));
    }

    #[test]
    fn empty_table() {
        let table = RouteTable::build(Vec::new()).unwrap();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert_eq!(table.scan_order().count(), 0);
    }
}
