//! Route compilation, matching, and reverse URL generation for Ariadne.
//!
//! This crate is the routing engine: it compiles configured route patterns
//! into matchable form, matches incoming paths against them with
//! deterministic precedence, converts between path-form and symbolic-form
//! identifiers, and inverts the whole mapping to generate URLs.
//!
//! # Features
//!
//! - **Pattern language**: literal segments, `:name` and `{name:type}`
//!   placeholders, `*` wildcards.
//! - **Deterministic precedence**: static routes before typed routes before
//!   wildcard routes, registration order within a class.
//! - **Method-tolerant matching**: a structural match with the wrong verb
//!   keeps scanning, so the same path can be routed per verb and a true
//!   verb mismatch is reported as `MethodNotAllowed`, not `NoMatch`.
//! - **Invertible naming convention**: `user-list/say-hello` ⇄
//!   `UserList.SayHello`.
//! - **Reverse URL generation**: best-fit pattern selection, placeholder
//!   substitution, leftover parameters formatted per routing mode.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use ariadne_router::{make_url, Matcher, Params, RouteEntry, RouteTable};
//! use http::Method;
//!
//! let table = Arc::new(
//!     RouteTable::build(vec![RouteEntry::new("/article/:id", "Article.Show")]).unwrap(),
//! );
//!
//! let matcher = Matcher::new(Arc::clone(&table));
//! let m = matcher.match_path("/article/42", &Method::GET).unwrap();
//! assert_eq!(m.handler, "Article.Show");
//! assert_eq!(m.params.get("id"), Some("42"));
//!
//! let url = make_url(&table, "Article.Show", &m.params);
//! assert_eq!(url.path, "/article/42");
//! ```
//!
//! # Immutability
//!
//! A [`RouteTable`] is built once at startup and never mutated; it is safe
//! for unsynchronized concurrent reads from any number of worker threads.
//! Match results and parameter sets are allocated per request.

pub mod convention;
mod matcher;
mod method;
mod mode;
mod params;
mod pattern;
mod table;
mod url;

pub use matcher::{normalize_path, MatchError, Matcher, RouteMatch};
pub use method::{MethodSet, MethodSetError, SUPPORTED_METHODS};
pub use mode::{RouteRequest, RoutingMode, DEFAULT_ROUTE_PARAM};
pub use params::Params;
pub use pattern::{compile, CompiledRoute, PatternError, Precedence};
pub use table::{RouteEntry, RouteTable};
pub use url::{encode_query, make_url, GeneratedUrl};
