//! Reverse URL generation.
//!
//! Given a symbolic handler name and a parameter set, the generator looks up
//! the handler's originating pattern(s), picks the best fit, substitutes
//! placeholder values, and returns the path together with the leftover
//! parameters. The active routing mode then formats path + leftovers into
//! the final URL (see [`crate::mode`]).
//!
//! Generation never fails: a handler name with no configured (or no usable)
//! pattern degrades to its literal path form via the naming convention.
//! URL generation is typically called from template code, where a hard
//! failure would be disproportionately disruptive.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::convention::to_path;
use crate::params::Params;
use crate::pattern::{CompiledRoute, Segment};
use crate::table::RouteTable;

/// Characters escaped inside a substituted path segment or query component.
/// The unreserved set (RFC 3986) passes through.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Result of reverse URL generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedUrl {
    /// The substituted path, with a leading `/`.
    pub path: String,
    /// Parameters not consumed by placeholder substitution, in the caller's
    /// order. The routing mode formats these as a query string, a path
    /// suffix, or positional arguments.
    pub remaining: Params,
}

/// Generates the path for `handler` with the given parameters.
///
/// Pattern selection among multiple routes for the same handler prefers an
/// exact key-set match, then the usable pattern (all placeholders supplied)
/// with the most placeholders, with registration order breaking ties.
///
/// # Example
///
/// ```rust
/// use ariadne_router::{make_url, Params, RouteEntry, RouteTable};
///
/// let table = RouteTable::build(vec![
///     RouteEntry::new("/article/:id", "Article.Show"),
/// ])
/// .unwrap();
///
/// let mut params = Params::new();
/// params.push("id", "42");
/// params.push("ref", "home");
///
/// let url = make_url(&table, "Article.Show", &params);
/// assert_eq!(url.path, "/article/42");
/// assert_eq!(url.remaining.get("ref"), Some("home"));
/// ```
#[must_use]
pub fn make_url(table: &RouteTable, handler: &str, params: &Params) -> GeneratedUrl {
    match select_route(table, handler, params) {
        Some(route) => substitute(route, params),
        None => GeneratedUrl {
            path: format!("/{}", to_path(handler)),
            remaining: params.clone(),
        },
    }
}

/// Picks the best-fitting pattern for a handler, or `None` when the handler
/// has no route whose placeholders are all supplied.
fn select_route<'t>(
    table: &'t RouteTable,
    handler: &str,
    params: &Params,
) -> Option<&'t CompiledRoute> {
    let mut best: Option<(&CompiledRoute, usize, bool)> = None;

    for route in table.by_handler(handler) {
        let names = route.param_names();
        let usable = names.iter().all(|name| params.contains(name));
        if !usable {
            continue;
        }
        let exact = params.iter().all(|(name, _)| names.iter().any(|n| n == name));
        let overlap = names.len();

        let better = match best {
            None => true,
            Some((_, best_overlap, best_exact)) => {
                (exact && !best_exact) || (exact == best_exact && overlap > best_overlap)
            }
        };
        if better {
            best = Some((route, overlap, exact));
        }
    }

    best.map(|(route, _, _)| route)
}

/// Substitutes parameter values into a route's segments and splits off the
/// unconsumed leftovers.
fn substitute(route: &CompiledRoute, params: &Params) -> GeneratedUrl {
    let mut parts: Vec<String> = Vec::with_capacity(route.segments().len());
    let mut consumed: Vec<&str> = Vec::new();

    for segment in route.segments() {
        match segment {
            Segment::Literal(text) => parts.push(text.clone()),
            Segment::Param { name } => {
                let value = params.get(name).unwrap_or_default();
                parts.push(utf8_percent_encode(value, COMPONENT).to_string());
                consumed.push(name);
            }
            Segment::Wildcard { name } => {
                // Wildcard values keep their slashes; they were captured
                // from a path in the first place.
                let value = params.get(name).unwrap_or_default();
                if !value.is_empty() {
                    parts.push(value.to_string());
                }
                consumed.push(name);
            }
        }
    }

    let remaining = params
        .iter()
        .filter(|(name, _)| !consumed.contains(name))
        .collect();

    GeneratedUrl {
        path: format!("/{}", parts.join("/")),
        remaining,
    }
}

/// Encodes a parameter set as a query string (`k=v&k2=v2`), percent-escaping
/// names and values. Empty input yields an empty string.
#[must_use]
pub fn encode_query(params: &Params) -> String {
    let mut out = String::new();
    for (name, value) in params {
        if !out.is_empty() {
            out.push('&');
        }
        out.push_str(&utf8_percent_encode(name, COMPONENT).to_string());
        out.push('=');
        out.push_str(&utf8_percent_encode(value, COMPONENT).to_string());
    }
    out
}
