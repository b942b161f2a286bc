//! Extracted route parameter storage.
//!
//! Parameters are stored as ordered (name, value) pairs with a small-vector
//! optimization so the common case (1-4 captures) stays on the stack. Lookup
//! returns the *first* value pushed under a name, which is what gives the
//! matcher its first-capture-wins semantics for duplicate placeholder names.

use smallvec::SmallVec;

/// Number of parameters stored inline before spilling to the heap.
const INLINE_PARAMS: usize = 4;

/// Ordered per-request parameter set extracted from a matched path.
///
/// # Example
///
/// ```rust
/// use ariadne_router::Params;
///
/// let mut params = Params::new();
/// params.push("id", "42");
/// params.push("page", "3");
///
/// assert_eq!(params.get("id"), Some("42"));
/// assert_eq!(params.get("missing"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    pairs: SmallVec<[(String, String); INLINE_PARAMS]>,
}

impl Params {
    /// Creates an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parameter set with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: SmallVec::with_capacity(capacity),
        }
    }

    /// Appends a parameter. Duplicate names are kept; [`Params::get`]
    /// always returns the first occurrence.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Returns the first value recorded under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns true if a value exists under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|(n, _)| n == name)
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the number of recorded pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Iterates over (name, value) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl<'a> IntoIterator for &'a Params {
    type Item = (&'a str, &'a str);
    type IntoIter = std::iter::Map<
        std::slice::Iter<'a, (String, String)>,
        fn(&'a (String, String)) -> (&'a str, &'a str),
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Params {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_and_get() {
        let mut params = Params::new();
        params.push("id", "42");
        params.push("slug", "hello-world");

        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get("slug"), Some("hello-world"));
        assert_eq!(params.get("nope"), None);
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn first_capture_wins() {
        let mut params = Params::new();
        params.push("id", "first");
        params.push("id", "second");

        assert_eq!(params.get("id"), Some("first"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn contains() {
        let mut params = Params::new();
        assert!(!params.contains("id"));
        params.push("id", "42");
        assert!(params.contains("id"));
    }

    #[test]
    fn iteration_preserves_order() {
        let mut params = Params::new();
        params.push("b", "2");
        params.push("a", "1");

        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("b", "2"), ("a", "1")]);
    }

    #[test]
    fn from_str_pairs() {
        let params: Params = vec![("id", "42"), ("page", "3")].into_iter().collect();
        assert_eq!(params.get("page"), Some("3"));
    }

    #[test]
    fn spills_past_inline_capacity() {
        let mut params = Params::new();
        for i in 0..10 {
            params.push(format!("k{i}"), format!("v{i}"));
        }
        assert_eq!(params.len(), 10);
        assert_eq!(params.get("k7"), Some("v7"));
    }
}
