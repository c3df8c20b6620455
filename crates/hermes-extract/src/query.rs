//! Query string parsing.

use hermes_core::ParameterMap;

/// Decoded query string pairs, in request order.
///
/// Keys may repeat; lookups return the first occurrence.
///
/// # Example
///
/// ```rust
/// use hermes_extract::QueryPairs;
///
/// let query = QueryPairs::parse("name=alice%20smith&tag=a&tag=b&flag");
/// assert_eq!(query.get("name"), Some("alice smith"));
/// assert_eq!(query.get("tag"), Some("a"));
/// assert_eq!(query.get_all("tag").collect::<Vec<_>>(), vec!["a", "b"]);
/// assert_eq!(query.get("flag"), Some(""));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryPairs {
    pairs: Vec<(String, String)>,
}

impl QueryPairs {
    /// Parses a raw (still percent-encoded) query string.
    ///
    /// `+` decodes to a space. A string that cannot be decoded yields no
    /// pairs.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match serde_urlencoded::from_str::<Vec<(String, String)>>(raw) {
            Ok(pairs) => Self { pairs },
            Err(e) => {
                tracing::debug!(error = %e, "ignoring undecodable query string");
                Self::default()
            }
        }
    }

    /// Returns the first value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns every value for `name`.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if `name` appears at least once.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == name)
    }

    /// Returns the number of pairs, counting repeats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no pairs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates all pairs in request order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Collapses the pairs into a parameter map, keeping the first value of
    /// each key.
    #[must_use]
    pub fn to_parameter_map(&self) -> ParameterMap {
        let mut map = ParameterMap::with_capacity(self.pairs.len());
        for (k, v) in &self.pairs {
            map.entry(k.clone()).or_insert_with(|| v.clone());
        }
        map
    }
}

impl Extend<(String, String)> for QueryPairs {
    fn extend<I: IntoIterator<Item = (String, String)>>(&mut self, iter: I) {
        self.pairs.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty() {
        let query = QueryPairs::parse("");
        assert!(query.is_empty());
        assert_eq!(query.get("a"), None);
    }

    #[test]
    fn test_parse_percent_and_plus() {
        let query = QueryPairs::parse("q=rust+lang&path=%2Fhome%2Fuser");
        assert_eq!(query.get("q"), Some("rust lang"));
        assert_eq!(query.get("path"), Some("/home/user"));
    }

    #[test]
    fn test_bracketed_keys_are_plain_keys() {
        let query = QueryPairs::parse("user%5Bage%5D=30&user[name]=bob");
        assert_eq!(query.get("user[age]"), Some("30"));
        assert_eq!(query.get("user[name]"), Some("bob"));
    }

    #[test]
    fn test_blank_value_is_present() {
        let query = QueryPairs::parse("a=&b");
        assert!(query.contains("a"));
        assert_eq!(query.get("a"), Some(""));
        assert_eq!(query.get("b"), Some(""));
    }

    #[test]
    fn test_parameter_map_first_value_wins() {
        let query = QueryPairs::parse("x=1&y=2&x=3");
        let map = query.to_parameter_map();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("x").map(String::as_str), Some("1"));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(query.len(), 3);
    }
}
