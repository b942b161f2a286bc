//! Dispatch orchestration.
//!
//! The dispatcher is deliberately thin: extract the candidate path for the
//! active routing mode, guard and normalize it, match it, resolve the
//! handler, and map every failure to one of the two external signals. It is
//! the only place that touches the request abstraction; everything below it
//! is pure computation over immutable state.

use std::sync::Arc;

use ariadne_router::{
    make_url, normalize_path, MatchError, Matcher, Params, RouteRequest, RouteTable, RoutingMode,
};

use crate::error::{DispatchError, DispatchResult};
use crate::resolver::{HandlerResolver, ResolvedHandler};

/// A successful dispatch: the resolved handler plus per-request parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// The resolved handler and action.
    pub handler: ResolvedHandler,
    /// Parameters extracted from the matched route (or positional argv
    /// extras).
    pub params: Params,
}

/// Per-request routing orchestrator.
///
/// Built once at startup around a shared [`RouteTable`] and a
/// [`HandlerResolver`]; immutable and safe to share across worker threads.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use ariadne_core::{Dispatcher, HandlerResolver, NamespaceRoot, StaticRegistry};
/// use ariadne_router::{RouteEntry, RouteRequest, RouteTable, RoutingMode};
/// use http::Method;
///
/// let table = Arc::new(
///     RouteTable::build(vec![RouteEntry::new("/article/:id", "Article.Show")]).unwrap(),
/// );
/// let registry: StaticRegistry = ["Article.Show"].into_iter().collect();
/// let resolver = HandlerResolver::new(vec![NamespaceRoot::default()], Arc::new(registry));
///
/// let dispatcher = Dispatcher::new(table, resolver)
///     .with_mode(RoutingMode::path_rewrite(""));
///
/// let request = RouteRequest::new(Method::GET, "/article/42");
/// let dispatch = dispatcher.dispatch(&request).unwrap();
/// assert_eq!(dispatch.handler.handler_id, "Article.Show");
/// assert_eq!(dispatch.params.get("id"), Some("42"));
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher {
    matcher: Matcher,
    resolver: HandlerResolver,
    mode: RoutingMode,
    implicit: bool,
}

impl Dispatcher {
    /// Creates a dispatcher with the default routing mode and implicit
    /// (convention) dispatch enabled.
    #[must_use]
    pub fn new(table: Arc<RouteTable>, resolver: HandlerResolver) -> Self {
        Self {
            matcher: Matcher::new(table),
            resolver,
            mode: RoutingMode::default(),
            implicit: true,
        }
    }

    /// Sets the routing mode.
    #[must_use]
    pub fn with_mode(mut self, mode: RoutingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enables or disables implicit dispatch: resolving an unrouted path
    /// through the naming convention.
    #[must_use]
    pub fn with_implicit(mut self, implicit: bool) -> Self {
        self.implicit = implicit;
        self
    }

    /// The active routing mode.
    #[must_use]
    pub fn mode(&self) -> &RoutingMode {
        &self.mode
    }

    /// The route table this dispatcher matches against.
    #[must_use]
    pub fn table(&self) -> &RouteTable {
        self.matcher.table()
    }

    /// Routes a request to a handler.
    pub fn dispatch(&self, request: &RouteRequest) -> DispatchResult<Dispatch> {
        let raw = self.mode.extract_path(request);

        // Charset guard before anything else: an illegal path must fail
        // without a single registry probe.
        let Some(normalized) = normalize_path(&raw) else {
            tracing::debug!(path = %raw, "path rejected by charset guard");
            return Err(DispatchError::NotFound);
        };

        match self.matcher.match_path(&normalized, &request.method) {
            Ok(matched) => {
                let handler = self.resolve_routed(&matched.handler)?;
                Ok(Dispatch {
                    handler,
                    params: matched.params,
                })
            }
            Err(MatchError::MethodNotAllowed { allowed }) => {
                Err(DispatchError::MethodNotAllowed { allowed })
            }
            Err(MatchError::NoMatch) if self.implicit && !normalized.is_empty() => {
                let handler = self.resolve_implicit(&normalized)?;
                Ok(Dispatch {
                    handler,
                    params: Params::new(),
                })
            }
            Err(MatchError::NoMatch) => Err(DispatchError::NotFound),
        }
    }

    /// Routes an argument vector (CLI mode): the first argument is the
    /// path, the rest become positional parameters.
    pub fn dispatch_argv(&self, args: &[String]) -> DispatchResult<Dispatch> {
        let path = args.first().map(String::as_str).unwrap_or_default();
        let request = RouteRequest::new(http::Method::GET, path);

        let mut dispatch = self.dispatch(&request)?;
        let mut index = 0usize;
        for arg in args.iter().skip(1) {
            // A matched wildcard may already hold a positional name; extras
            // take the next free index instead of being dropped.
            while dispatch.params.contains(&index.to_string()) {
                index += 1;
            }
            dispatch.params.push(index.to_string(), arg.clone());
            index += 1;
        }
        Ok(dispatch)
    }

    /// Generates a URL for a handler name, formatted for the active mode.
    ///
    /// Never fails; a handler with no usable route degrades to its literal
    /// path form.
    #[must_use]
    pub fn url_for(&self, handler: &str, params: &Params) -> String {
        let url = make_url(self.matcher.table(), handler, params);
        self.mode.format(&url)
    }

    fn resolve_routed(&self, symbolic: &str) -> DispatchResult<ResolvedHandler> {
        self.resolver.resolve_symbolic(symbolic).map_err(|err| {
            // "No route" and "route matched but handler missing" are
            // indistinguishable from outside.
            tracing::debug!(%err, "handler resolution failed");
            DispatchError::NotFound
        })
    }

    fn resolve_implicit(&self, normalized: &str) -> DispatchResult<ResolvedHandler> {
        self.resolver.resolve_path(normalized).map_err(|err| {
            tracing::debug!(%err, "implicit resolution failed");
            DispatchError::NotFound
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::StaticRegistry;
    use crate::resolver::NamespaceRoot;
    use ariadne_router::{MethodSet, RouteEntry};
    use http::Method;

    fn dispatcher(entries: Vec<RouteEntry>, ids: &[&str]) -> Dispatcher {
        dispatcher_with_roots(entries, ids, vec![NamespaceRoot::default()])
    }

    fn dispatcher_with_roots(
        entries: Vec<RouteEntry>,
        ids: &[&str],
        roots: Vec<NamespaceRoot>,
    ) -> Dispatcher {
        let table = Arc::new(RouteTable::build(entries).unwrap());
        let registry: StaticRegistry = ids.iter().copied().collect();
        let resolver = HandlerResolver::new(roots, Arc::new(registry));
        Dispatcher::new(table, resolver).with_mode(RoutingMode::path_rewrite(""))
    }

    #[test]
    fn routed_dispatch() {
        let d = dispatcher(
            vec![RouteEntry::new("/article/:id", "Article.Show")],
            &["Article.Show"],
        );

        let dispatch = d
            .dispatch(&RouteRequest::new(Method::GET, "/article/42"))
            .unwrap();
        assert_eq!(dispatch.handler.handler_id, "Article.Show");
        assert_eq!(dispatch.handler.action, None);
        assert_eq!(dispatch.params.get("id"), Some("42"));
    }

    #[test]
    fn missing_handler_collapses_to_not_found() {
        let d = dispatcher(
            vec![RouteEntry::new("/article/:id", "Article.Show")],
            &[],
        );

        // Implicit fallback is not attempted for a *matched* route whose
        // handler is missing; the failure is a plain 404.
        let err = d
            .dispatch(&RouteRequest::new(Method::GET, "/article/42"))
            .unwrap_err();
        assert!(matches!(err, DispatchError::NotFound));
    }

    #[test]
    fn method_not_allowed_propagates() {
        let d = dispatcher(
            vec![RouteEntry::new("/users", "User.List")
                .with_methods(MethodSet::of([Method::GET]))],
            &["User.List"],
        );

        let err = d
            .dispatch(&RouteRequest::new(Method::POST, "/users"))
            .unwrap_err();
        assert!(matches!(
            err,
            DispatchError::MethodNotAllowed { allowed } if allowed == vec![Method::GET]
        ));
    }

    #[test]
    fn implicit_dispatch_resolves_unrouted_path() {
        let d = dispatcher(Vec::new(), &["Foo"]);

        let dispatch = d
            .dispatch(&RouteRequest::new(Method::GET, "/foo/bar"))
            .unwrap();
        assert_eq!(dispatch.handler.handler_id, "Foo");
        assert_eq!(dispatch.handler.action, Some("bar".to_string()));
        assert!(dispatch.params.is_empty());
    }

    #[test]
    fn implicit_dispatch_can_be_disabled() {
        let d = dispatcher(Vec::new(), &["Foo"]).with_implicit(false);

        let err = d
            .dispatch(&RouteRequest::new(Method::GET, "/foo/bar"))
            .unwrap_err();
        assert!(matches!(err, DispatchError::NotFound));
    }

    #[test]
    fn injection_guard_short_circuits() {
        // The registry would resolve the convention name if probed; the
        // guard must reject the path before any probe happens.
        let d = dispatcher(Vec::new(), &["Foo"]);

        let err = d
            .dispatch(&RouteRequest::new(Method::GET, "/foo;DROP"))
            .unwrap_err();
        assert!(matches!(err, DispatchError::NotFound));
    }

    #[test]
    fn query_param_mode_reads_route_from_query() {
        let table = Arc::new(
            RouteTable::build(vec![RouteEntry::new("/article/:id", "Article.Show")]).unwrap(),
        );
        let registry: StaticRegistry = ["Article.Show"].into_iter().collect();
        let resolver = HandlerResolver::new(vec![NamespaceRoot::default()], Arc::new(registry));
        let d = Dispatcher::new(table, resolver);

        let request =
            RouteRequest::new(Method::GET, "/index").with_query("r", "article/42");
        let dispatch = d.dispatch(&request).unwrap();
        assert_eq!(dispatch.params.get("id"), Some("42"));
    }

    #[test]
    fn argv_dispatch_with_positional_extras() {
        let d = dispatcher_with_roots(
            Vec::new(),
            &["App.Command.UserListCommand"],
            vec![NamespaceRoot::new("App.Command", "Command")],
        )
        .with_mode(RoutingMode::ArgumentVector);

        let args: Vec<String> = ["user-list/remove-old", "30", "force"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let dispatch = d.dispatch_argv(&args).unwrap();

        assert_eq!(dispatch.handler.handler_id, "App.Command.UserListCommand");
        assert_eq!(dispatch.handler.action, Some("removeOld".to_string()));
        assert_eq!(dispatch.params.get("0"), Some("30"));
        assert_eq!(dispatch.params.get("1"), Some("force"));
    }

    #[test]
    fn argv_extras_shift_past_captured_positions() {
        let d = dispatcher(vec![RouteEntry::new("/run/*", "Runner")], &["Runner"])
            .with_mode(RoutingMode::ArgumentVector);

        let args: Vec<String> = ["run/task-a", "fast", "verbose"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let dispatch = d.dispatch_argv(&args).unwrap();

        // "0" was captured by the wildcard; the extras land on "1" and "2".
        assert_eq!(dispatch.params.get("0"), Some("task-a"));
        assert_eq!(dispatch.params.get("1"), Some("fast"));
        assert_eq!(dispatch.params.get("2"), Some("verbose"));
    }

    #[test]
    fn empty_argv_is_not_found() {
        let d = dispatcher(Vec::new(), &["Foo"]).with_mode(RoutingMode::ArgumentVector);
        assert!(d.dispatch_argv(&[]).is_err());
    }

    #[test]
    fn url_for_formats_for_mode() {
        let d = dispatcher(
            vec![RouteEntry::new("/article/:id", "Article.Show")],
            &["Article.Show"],
        );

        let mut params = Params::new();
        params.push("id", "42");
        params.push("ref", "home");
        assert_eq!(d.url_for("Article.Show", &params), "/article/42?ref=home");
    }

    #[test]
    fn root_path_without_root_route_is_not_found() {
        let d = dispatcher(Vec::new(), &["Foo"]);
        let err = d.dispatch(&RouteRequest::new(Method::GET, "/")).unwrap_err();
        assert!(matches!(err, DispatchError::NotFound));
    }
}
