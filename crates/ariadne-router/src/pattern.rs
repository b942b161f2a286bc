//! Route pattern compilation.
//!
//! A pattern is a `/`-separated template in which each segment is either a
//! literal, a named placeholder, or a wildcard:
//!
//! | Token | Meaning |
//! |---|---|
//! | `:name` | one segment, any non-slash characters |
//! | `{name}` | same as `:name` |
//! | `{name:type}` | one segment constrained by `type` |
//! | `*` | the remainder of the path, captured under a positional name |
//! | `*name` | the remainder of the path, captured under `name` |
//!
//! Built-in placeholder types are `int` (digits), `str` (non-slash, the
//! default), `date` (8 digits), and `year` (4 digits). Any other type string
//! is spliced into the match expression verbatim, so `{id:[a-f0-9]+}`
//! constrains the segment with an inline sub-expression.
//!
//! Compilation is a pure function from pattern text to a [`CompiledRoute`]:
//! an anchored, case-insensitive regular expression, the ordered placeholder
//! names, and a [`Precedence`] class used by the matcher to order the scan.

use regex::Regex;
use thiserror::Error;

use crate::method::MethodSet;

/// Match-order priority class of a compiled pattern.
///
/// Static routes are always tried before typed routes, and typed routes
/// before wildcard routes, regardless of registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precedence {
    /// No placeholders at all; the pattern is a literal path.
    Static,
    /// Named or typed placeholders, but no wildcard.
    Typed,
    /// At least one wildcard segment.
    Wildcard,
}

impl Precedence {
    /// Scan order of the precedence classes.
    pub const SCAN_ORDER: [Self; 3] = [Self::Static, Self::Typed, Self::Wildcard];

    /// Stable index of this class within [`Precedence::SCAN_ORDER`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Static => 0,
            Self::Typed => 1,
            Self::Wildcard => 2,
        }
    }
}

/// Errors raised while compiling a route pattern.
///
/// These are configuration-time errors: the application should refuse to
/// start rather than serve traffic with a malformed route.
#[derive(Error, Debug)]
pub enum PatternError {
    /// The pattern string was empty.
    #[error("route pattern must not be empty")]
    Empty,

    /// A `{...}` placeholder was opened but never closed.
    #[error("unterminated placeholder in pattern: {pattern}")]
    UnterminatedPlaceholder {
        /// The offending pattern.
        pattern: String,
    },

    /// A placeholder had no name (`:` or `{}` or `{:int}`).
    #[error("placeholder without a name in pattern: {pattern}")]
    MissingPlaceholderName {
        /// The offending pattern.
        pattern: String,
    },

    /// The assembled match expression failed to compile. This can only
    /// happen through a malformed inline sub-expression.
    #[error("invalid match expression for pattern {pattern}")]
    Expression {
        /// The offending pattern.
        pattern: String,
        /// The underlying regex error.
        #[source]
        source: Box<regex::Error>,
    },
}

/// One parsed segment of a route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    /// Literal text, matched case-insensitively.
    Literal(String),
    /// A single-segment capture.
    Param {
        /// Placeholder name.
        name: String,
    },
    /// A capture of the remaining path.
    Wildcard {
        /// Positional or explicit name.
        name: String,
    },
}

/// A route pattern compiled into matchable form.
///
/// Produced once per configuration entry by [`compile`] (via
/// `RouteTable::build`) and immutable afterwards.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    pattern: String,
    regex: Regex,
    segments: Vec<Segment>,
    param_names: Vec<String>,
    capture_indices: Vec<usize>,
    precedence: Precedence,
    methods: MethodSet,
    handler: String,
}

impl CompiledRoute {
    /// The normalized pattern text (always with a leading `/`).
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The symbolic handler name this route targets.
    #[must_use]
    pub fn handler(&self) -> &str {
        &self.handler
    }

    /// Placeholder names in left-to-right order of appearance.
    #[must_use]
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    /// The precedence class of this route.
    #[must_use]
    pub fn precedence(&self) -> Precedence {
        self.precedence
    }

    /// The method constraint of this route.
    #[must_use]
    pub fn methods(&self) -> &MethodSet {
        &self.methods
    }

    pub(crate) fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Regex group index of each placeholder, parallel to `param_names`.
    /// Not simply `1..=n`: an inline sub-expression may open capture groups
    /// of its own, which shift the numbering of every later placeholder.
    pub(crate) fn capture_indices(&self) -> &[usize] {
        &self.capture_indices
    }

    pub(crate) fn segments(&self) -> &[Segment] {
        &self.segments
    }
}

/// Compiles a route pattern into a [`CompiledRoute`].
///
/// The pattern is normalized by prefixing `/` when missing; the match
/// expression is anchored over the slash-trimmed path and case-insensitive.
/// Pure and side-effect free.
pub fn compile(
    pattern: &str,
    handler: impl Into<String>,
    methods: MethodSet,
) -> Result<CompiledRoute, PatternError> {
    if pattern.trim().is_empty() {
        return Err(PatternError::Empty);
    }

    let normalized = if pattern.starts_with('/') {
        pattern.to_string()
    } else {
        format!("/{pattern}")
    };
    let core = normalized.trim_matches('/');

    let segments = parse_segments(core, &normalized)?;
    let param_names = segments
        .iter()
        .filter_map(|segment| match segment {
            Segment::Literal(_) => None,
            Segment::Param { name } | Segment::Wildcard { name } => Some(name.clone()),
        })
        .collect();
    let precedence = classify(&segments);
    let (expr, capture_indices) = build_expression(core, &segments);

    let regex = Regex::new(&expr).map_err(|source| PatternError::Expression {
        pattern: normalized.clone(),
        source: Box::new(source),
    })?;

    Ok(CompiledRoute {
        pattern: normalized,
        regex,
        segments,
        param_names,
        capture_indices,
        precedence,
        methods,
        handler: handler.into(),
    })
}

/// Splits the slash-trimmed pattern into parsed segments, assigning
/// positional names (`"0"`, `"1"`, ...) to anonymous wildcards.
fn parse_segments(core: &str, pattern: &str) -> Result<Vec<Segment>, PatternError> {
    if core.is_empty() {
        return Ok(Vec::new());
    }

    let mut segments = Vec::new();
    let mut wildcard_index = 0usize;

    for raw in core.split('/') {
        let segment = if raw == "*" {
            let name = wildcard_index.to_string();
            wildcard_index += 1;
            Segment::Wildcard { name }
        } else if let Some(name) = raw.strip_prefix('*') {
            Segment::Wildcard {
                name: name.to_string(),
            }
        } else if let Some(name) = raw.strip_prefix(':') {
            if name.is_empty() {
                return Err(PatternError::MissingPlaceholderName {
                    pattern: pattern.to_string(),
                });
            }
            Segment::Param {
                name: name.to_string(),
            }
        } else if raw.starts_with('{') {
            let inner = raw
                .strip_prefix('{')
                .and_then(|rest| rest.strip_suffix('}'))
                .ok_or_else(|| PatternError::UnterminatedPlaceholder {
                    pattern: pattern.to_string(),
                })?;
            let (name, _) = split_placeholder(inner);
            if name.is_empty() {
                return Err(PatternError::MissingPlaceholderName {
                    pattern: pattern.to_string(),
                });
            }
            Segment::Param {
                name: name.to_string(),
            }
        } else {
            Segment::Literal(raw.to_string())
        };
        segments.push(segment);
    }

    Ok(segments)
}

/// Splits `name:type` placeholder text; a missing `:type` means the default.
fn split_placeholder(inner: &str) -> (&str, Option<&str>) {
    match inner.split_once(':') {
        Some((name, ty)) => (name, Some(ty)),
        None => (inner, None),
    }
}

/// Returns the sub-expression for a placeholder type.
fn type_expression(ty: Option<&str>) -> String {
    match ty {
        None | Some("str") => "[^/]+".to_string(),
        Some("int") => "[0-9]+".to_string(),
        Some("date") => "[0-9]{8}".to_string(),
        Some("year") => "[0-9]{4}".to_string(),
        // Anything else is an inline sub-expression, spliced verbatim.
        Some(inline) => inline.to_string(),
    }
}

/// Classifies a parsed pattern into its precedence class.
fn classify(segments: &[Segment]) -> Precedence {
    if segments
        .iter()
        .any(|s| matches!(s, Segment::Wildcard { .. }))
    {
        Precedence::Wildcard
    } else if segments.iter().any(|s| matches!(s, Segment::Param { .. })) {
        Precedence::Typed
    } else {
        Precedence::Static
    }
}

/// Assembles the anchored, case-insensitive match expression together with
/// the regex group index of each placeholder in order of appearance.
///
/// A trailing wildcard also matches the zero-segment form: `/users/*`
/// compiles so that both `users` and `users/a/b` match, the former with an
/// empty capture. A wildcard in the middle of a pattern keeps its
/// surrounding slashes and matches lazily.
///
/// Inline sub-expressions are spliced verbatim and may open capture groups
/// of their own; those nested groups are counted so every later
/// placeholder's index stays pointed at its own capture.
fn build_expression(core: &str, segments: &[Segment]) -> (String, Vec<usize>) {
    let mut expr = String::from("(?i)^");
    let mut capture_indices = Vec::new();
    let mut group = 0usize;

    for (i, segment) in segments.iter().enumerate() {
        let last = i + 1 == segments.len();
        match segment {
            Segment::Wildcard { .. } if last && i > 0 => {
                expr.push_str("(?:/(.*))?");
                group += 1;
                capture_indices.push(group);
            }
            Segment::Wildcard { .. } if last => {
                expr.push_str("(.*)");
                group += 1;
                capture_indices.push(group);
            }
            Segment::Wildcard { .. } => {
                if i > 0 {
                    expr.push('/');
                }
                expr.push_str("(.*?)");
                group += 1;
                capture_indices.push(group);
            }
            Segment::Literal(text) => {
                if i > 0 {
                    expr.push('/');
                }
                expr.push_str(&regex::escape(text));
            }
            Segment::Param { .. } => {
                if i > 0 {
                    expr.push('/');
                }
                // Re-derive the type from the original pattern text so the
                // parsed segment list stays free of regex fragments.
                let raw = core.split('/').nth(i).unwrap_or_default();
                let ty = raw
                    .strip_prefix('{')
                    .and_then(|rest| rest.strip_suffix('}'))
                    .and_then(|inner| split_placeholder(inner).1);
                let sub = type_expression(ty);
                expr.push('(');
                expr.push_str(&sub);
                expr.push(')');
                group += 1;
                capture_indices.push(group);
                group += count_capture_groups(&sub);
            }
        }
    }

    expr.push('$');
    (expr, capture_indices)
}

/// Counts the capture groups an expression fragment opens: unescaped `(`
/// outside a character class and not followed by `?`.
fn count_capture_groups(expr: &str) -> usize {
    let mut count = 0;
    let mut in_class = false;
    let mut chars = expr.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            '(' if !in_class => {
                if chars.peek() != Some(&'?') {
                    count += 1;
                }
            }
            _ => {}
        }
    }

    count
}
