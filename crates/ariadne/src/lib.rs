//! # Ariadne
//!
//! **Route compilation, matching, and reverse URL generation**
//!
//! Ariadne turns a declarative route map into a compiled, immutable routing
//! engine:
//!
//! - **Compiled patterns** - placeholders, typed constraints, and wildcards
//!   become anchored regular expressions at startup
//! - **Deterministic precedence** - static routes beat typed routes beat
//!   wildcards, registration order breaks ties
//! - **Method-tolerant matching** - a wrong-verb structural hit keeps
//!   scanning and surfaces the allowed verbs on failure
//! - **Convention-based resolution** - hyphenated paths map bijectively to
//!   symbolic handler names, with namespace probing for unrouted paths
//! - **Reverse generation** - every handler gets a URL back, degrading to
//!   its literal path form when no route fits
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use ariadne::prelude::*;
//! use http::Method;
//!
//! let table = Arc::new(RouteTable::build(vec![
//!     RouteEntry::new("/article/{id:int}", "Article.Show"),
//! ]).unwrap());
//!
//! let registry: StaticRegistry = ["Article.Show"].into_iter().collect();
//! let resolver = HandlerResolver::new(vec![NamespaceRoot::default()], Arc::new(registry));
//! let dispatcher = Dispatcher::new(Arc::clone(&table), resolver)
//!     .with_mode(RoutingMode::path_rewrite(""));
//!
//! let dispatch = dispatcher
//!     .dispatch(&RouteRequest::new(Method::GET, "/article/42"))
//!     .unwrap();
//! assert_eq!(dispatch.handler.handler_id, "Article.Show");
//! assert_eq!(dispatch.params.get("id"), Some("42"));
//!
//! let mut params = Params::new();
//! params.push("id", "42");
//! assert_eq!(dispatcher.url_for("Article.Show", &params), "/article/42");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! RouteEntry ──compile──▶ RouteTable ──▶ Matcher ──▶ HandlerResolver ──▶ Dispatch
//!                             │
//!                             └──────▶ make_url (reverse generation)
//! ```

#![doc(html_root_url = "https://docs.rs/ariadne/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export the routing engine
pub use ariadne_router as router;

// Re-export dispatch and resolution types
pub use ariadne_core as core;

// Re-export configuration types
pub use ariadne_config as config;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use ariadne::prelude::*;
/// ```
pub mod prelude {
    pub use ariadne_router::{
        compile, encode_query, make_url, normalize_path, CompiledRoute, GeneratedUrl, MatchError,
        Matcher, MethodSet, Params, PatternError, Precedence, RouteEntry, RouteMatch, RouteRequest,
        RouteTable, RoutingMode,
    };

    pub use ariadne_core::{
        Dispatch, Dispatcher, DispatchError, DispatchResult, HandlerRegistry, HandlerResolver,
        NamespaceRoot, ResolvedHandler, StaticRegistry, TypedRegistry,
    };

    pub use ariadne_config::{ConfigLoader, RoutingConfig};
}
