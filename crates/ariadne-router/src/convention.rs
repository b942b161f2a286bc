//! Naming convention between path form and symbolic form.
//!
//! Path form is lower-case, hyphen-separated words in `/`-delimited
//! segments (`user-list/say-hello`); symbolic form capitalizes each word,
//! drops the hyphens, and joins segments with [`MODULE_SEPARATOR`]
//! (`UserList.SayHello`). The two transforms are mutual inverses, which is
//! what lets the URL generator fall back to a literal path for a handler
//! name that has no configured route.
//!
//! A doubled hyphen in path form escapes a literal hyphen: it maps to a
//! plain `-` in symbolic form without starting a new word, and
//! [`to_path`] writes a symbolic `-` back out as `--`.

/// Separator between symbolic name segments.
pub const MODULE_SEPARATOR: char = '.';

/// Converts a path-form identifier to symbolic form.
///
/// ```rust
/// use ariadne_router::convention::to_symbolic;
///
/// assert_eq!(to_symbolic("user-list/say-hello"), "UserList.SayHello");
/// assert_eq!(to_symbolic("post2/list"), "Post2.List");
/// ```
#[must_use]
pub fn to_symbolic(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut chars = path.chars().peekable();
    let mut word_start = true;

    while let Some(c) = chars.next() {
        match c {
            '/' => {
                out.push(MODULE_SEPARATOR);
                word_start = true;
            }
            '-' => {
                if chars.peek() == Some(&'-') {
                    // Escaped literal hyphen; not a word boundary.
                    chars.next();
                    out.push('-');
                    word_start = false;
                } else {
                    word_start = true;
                }
            }
            _ => {
                if word_start {
                    out.extend(c.to_uppercase());
                } else {
                    out.push(c);
                }
                word_start = false;
            }
        }
    }

    out
}

/// Converts a symbolic identifier back to path form.
///
/// ```rust
/// use ariadne_router::convention::to_path;
///
/// assert_eq!(to_path("UserList.SayHello"), "user-list/say-hello");
/// ```
#[must_use]
pub fn to_path(symbolic: &str) -> String {
    let mut out = String::with_capacity(symbolic.len());
    let mut segment_start = true;

    for c in symbolic.chars() {
        match c {
            MODULE_SEPARATOR => {
                out.push('/');
                segment_start = true;
            }
            '-' => {
                out.push_str("--");
                segment_start = false;
            }
            c if c.is_uppercase() => {
                // A leading capital starts the segment's first word; no
                // hyphen is emitted for it.
                if !segment_start {
                    out.push('-');
                }
                out.extend(c.to_lowercase());
                segment_start = false;
            }
            _ => {
                out.push(c);
                segment_start = false;
            }
        }
    }

    out
}

/// Lower-camel-cases a symbolic word: the first character is decapitalized
/// and the rest is left untouched. Used for action names.
///
/// ```rust
/// use ariadne_router::convention::lower_camel;
///
/// assert_eq!(lower_camel("RemoveOld"), "removeOld");
/// ```
#[must_use]
pub fn lower_camel(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn single_segment() {
        assert_eq!(to_symbolic("user-list"), "UserList");
        assert_eq!(to_path("UserList"), "user-list");
    }

    #[test]
    fn multiple_segments() {
        assert_eq!(to_symbolic("user-list/say-hello"), "UserList.SayHello");
        assert_eq!(to_path("UserList.SayHello"), "user-list/say-hello");
    }

    #[test]
    fn plain_words() {
        assert_eq!(to_symbolic("foo/bar"), "Foo.Bar");
        assert_eq!(to_path("Foo.Bar"), "foo/bar");
    }

    #[test]
    fn digits_within_words() {
        assert_eq!(to_symbolic("post2/list"), "Post2.List");
        assert_eq!(to_path("Post2.List"), "post2/list");
    }

    #[test]
    fn doubled_hyphen_is_literal() {
        assert_eq!(to_symbolic("a--b"), "A-b");
        assert_eq!(to_path("A-b"), "a--b");
    }

    #[test]
    fn empty_input() {
        assert_eq!(to_symbolic(""), "");
        assert_eq!(to_path(""), "");
    }

    #[test]
    fn lower_camel_basic() {
        assert_eq!(lower_camel("RemoveOld"), "removeOld");
        assert_eq!(lower_camel("List"), "list");
        assert_eq!(lower_camel(""), "");
    }

    proptest! {
        /// Round-trip law over the path grammar: letter-led words joined by
        /// single hyphens, segments joined by single slashes.
        #[test]
        fn round_trip(
            path in r"[a-z][a-z0-9]{0,5}(-[a-z][a-z0-9]{0,5}){0,3}(/[a-z][a-z0-9]{0,5}(-[a-z][a-z0-9]{0,5}){0,3}){0,3}"
        ) {
            prop_assert_eq!(to_path(&to_symbolic(&path)), path);
        }

        /// The escaped-hyphen form also round-trips.
        #[test]
        fn round_trip_with_escapes(
            path in r"[a-z][a-z0-9]{0,4}(--?[a-z][a-z0-9]{0,4}){0,3}"
        ) {
            prop_assert_eq!(to_path(&to_symbolic(&path)), path);
        }
    }
}
