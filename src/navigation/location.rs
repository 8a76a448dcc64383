//! Outer page location snapshot and query parsing.

// ============================================================================
// Imports
// ============================================================================

use url::Url;
use url::form_urlencoded;

use crate::error::{Error, Result};

// ============================================================================
// PageLocation
// ============================================================================

/// Immutable view of the outer page location.
///
/// `search` keeps its leading `?` and `fragment` drops its leading `#`,
/// matching how the two are concatenated back into links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLocation {
    origin: String,
    hostname: String,
    path: String,
    search: String,
    fragment: String,
}

impl PageLocation {
    /// Parses an absolute page URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUrl`] if `href` is not an absolute URL.
    pub fn parse(href: &str) -> Result<Self> {
        let url = Url::parse(href).map_err(|e| Error::invalid_url(href, e))?;
        Ok(Self::from_url(&url))
    }

    /// Builds the snapshot from a parsed URL.
    #[must_use]
    pub fn from_url(url: &Url) -> Self {
        Self {
            origin: url.origin().ascii_serialization(),
            hostname: url.host_str().unwrap_or_default().to_string(),
            path: url.path().to_string(),
            search: url.query().map(|q| format!("?{q}")).unwrap_or_default(),
            fragment: url.fragment().unwrap_or_default().to_string(),
        }
    }

    /// Returns a copy with the fragment replaced.
    ///
    /// A leading `#` in `fragment` is ignored.
    #[must_use]
    pub fn with_fragment(&self, fragment: &str) -> Self {
        Self {
            fragment: fragment.strip_prefix('#').unwrap_or(fragment).to_string(),
            ..self.clone()
        }
    }

    /// Scheme, host and port, e.g. `http://master:8080`.
    #[inline]
    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Host without port.
    #[inline]
    #[must_use]
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    /// Path, always starting with `/`.
    #[inline]
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query string including `?`, or empty.
    #[inline]
    #[must_use]
    pub fn search(&self) -> &str {
        &self.search
    }

    /// Fragment without `#`, or empty.
    #[inline]
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Fragment including `#`, or empty.
    #[must_use]
    pub fn hash(&self) -> String {
        if self.fragment.is_empty() {
            String::new()
        } else {
            format!("#{}", self.fragment)
        }
    }

    /// Parsed query parameters.
    #[must_use]
    pub fn query(&self) -> QueryParams {
        QueryParams::parse(&self.search)
    }

    /// Full URL.
    #[must_use]
    pub fn href(&self) -> String {
        format!("{}{}{}{}", self.origin, self.path, self.search, self.hash())
    }
}

// ============================================================================
// QueryParams
// ============================================================================

/// Query string parsed once into key/value pairs.
///
/// Repeated keys are kept; [`QueryParams::get`] returns the first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Parses `search`, with or without its leading `?`.
    #[must_use]
    pub fn parse(search: &str) -> Self {
        let query = search.strip_prefix('?').unwrap_or(search);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// First value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if `key` is present, even without a value.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Number of pairs.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if there are no pairs.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates pairs in query order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_location() {
        let location =
            PageLocation::parse("http://master:8080/interactivespaces/index.html?wsport=9000&x=1#/space/7")
                .expect("parse");

        assert_eq!(location.origin(), "http://master:8080");
        assert_eq!(location.hostname(), "master");
        assert_eq!(location.path(), "/interactivespaces/index.html");
        assert_eq!(location.search(), "?wsport=9000&x=1");
        assert_eq!(location.fragment(), "/space/7");
        assert_eq!(location.hash(), "#/space/7");
        assert_eq!(
            location.href(),
            "http://master:8080/interactivespaces/index.html?wsport=9000&x=1#/space/7"
        );
    }

    #[test]
    fn test_parse_without_query_or_fragment() {
        let location = PageLocation::parse("https://console.example.com/").expect("parse");
        assert_eq!(location.origin(), "https://console.example.com");
        assert_eq!(location.search(), "");
        assert_eq!(location.fragment(), "");
        assert_eq!(location.hash(), "");
        assert!(location.query().is_empty());
    }

    #[test]
    fn test_parse_relative_fails() {
        let err = PageLocation::parse("/just/a/path").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl { .. }));
    }

    #[test]
    fn test_with_fragment() {
        let location = PageLocation::parse("http://h/#/old").expect("parse");
        assert_eq!(location.with_fragment("/new").fragment(), "/new");
        assert_eq!(location.with_fragment("#/hashed").fragment(), "/hashed");
        assert_eq!(location.with_fragment("").hash(), "");
    }

    #[test]
    fn test_query_params() {
        let query = QueryParams::parse("?wsport=9000&debug&name=a%20b&wsport=1");
        assert_eq!(query.get("wsport"), Some("9000"));
        assert_eq!(query.get("name"), Some("a b"));
        assert_eq!(query.get("debug"), Some(""));
        assert!(query.contains("debug"));
        assert_eq!(query.get("missing"), None);
        assert_eq!(query.len(), 4);
    }

    #[test]
    fn test_query_params_without_question_mark() {
        let query = QueryParams::parse("a=1");
        assert_eq!(query.iter().collect::<Vec<_>>(), vec![("a", "1")]);
        assert!(QueryParams::parse("").is_empty());
    }
}
