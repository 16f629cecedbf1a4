//! Ordered query parameters and the cielo24 query-string encoder.
//!
//! Keys are form-encoded (space becomes `+`), values are strictly
//! percent-encoded (space becomes `%20`, a literal `+` becomes `%2B`). The
//! asymmetry is part of the wire format: a value can never be decoded into
//! something other than what was sent.

use std::borrow::Cow;

/// An insertion-ordered mapping of query (or form) parameters.
///
/// Inserting an existing key replaces its value in place; keys are never
/// sorted or duplicated.
///
/// # Example
///
/// ```rust
/// use cielo24::clients::QueryParams;
///
/// let params = QueryParams::new()
///     .with("job_id", "abc")
///     .with("caption_format", "SRT");
///
/// assert_eq!(params.get("job_id"), Some("abc"));
/// assert_eq!(params.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Creates an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds or replaces a parameter, returning `self` for chaining.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Adds or replaces a parameter. Replacing keeps the original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Adds a parameter only if the key is not already present.
    pub fn insert_default(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if !self.contains_key(&key) {
            self.0.push((key, value.into()));
        }
    }

    /// Returns the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns `true` if `key` is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(index).1)
    }

    /// Iterates over the parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merges `self` over `lower`: every key of `self` wins, keys only in
    /// `lower` are kept after them in their original order.
    #[must_use]
    pub fn merged_over(mut self, lower: Self) -> Self {
        for (key, value) in lower.0 {
            self.insert_default(key, value);
        }
        self
    }

    /// Encodes the parameters as `&key=value` pairs.
    #[must_use]
    pub fn encode(&self) -> String {
        self.iter().fold(String::new(), |mut out, (key, value)| {
            out.push('&');
            out.push_str(&encode_key(key));
            out.push('=');
            out.push_str(&encode_value(value));
            out
        })
    }

    /// Encodes the parameters as a form body (no leading separator).
    #[must_use]
    pub fn to_form_body(&self) -> String {
        let encoded = self.encode();
        encoded.strip_prefix('&').unwrap_or(&encoded).to_string()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// The query part of a caller's options bag.
///
/// Only [`Query::Params`] can be merged with explicit parameters; a
/// [`Query::Literal`] is accepted by the encoder but rejected by the option
/// resolver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Query {
    /// A key/value mapping.
    Params(QueryParams),
    /// A pre-built query string, passed through unchanged.
    Literal(String),
}

impl From<QueryParams> for Query {
    fn from(params: QueryParams) -> Self {
        Self::Params(params)
    }
}

/// Encodes an optional query into a URL fragment.
///
/// - `None` encodes to the empty string.
/// - A literal is passed through unchanged behind a leading `&`.
/// - A mapping encodes each pair as `&key=value`.
///
/// # Example
///
/// ```rust
/// use cielo24::clients::{encode_query, Query, QueryParams};
///
/// assert_eq!(encode_query(None), "");
///
/// let literal = Query::Literal("a=1".to_string());
/// assert_eq!(encode_query(Some(&literal)), "&a=1");
///
/// let params = Query::Params(QueryParams::new().with("title", "a b+c"));
/// assert_eq!(encode_query(Some(&params)), "&title=a%20b%2Bc");
/// ```
#[must_use]
pub fn encode_query(query: Option<&Query>) -> String {
    match query {
        None => String::new(),
        Some(Query::Literal(literal)) => format!("&{literal}"),
        Some(Query::Params(params)) => params.encode(),
    }
}

fn encode_key(key: &str) -> String {
    url::form_urlencoded::byte_serialize(key.as_bytes()).collect()
}

fn encode_value(value: &str) -> Cow<'_, str> {
    urlencoding::encode(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(encoded: &str) -> Vec<(String, String)> {
        url::form_urlencoded::parse(encoded.as_bytes())
            .into_owned()
            .collect()
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut params = QueryParams::new().with("a", "1").with("b", "2");
        params.insert("a", "3");
        let pairs: Vec<_> = params.iter().collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_insert_default_keeps_existing_value() {
        let mut params = QueryParams::new().with("priority", "CRITICAL");
        params.insert_default("priority", "STANDARD");
        params.insert_default("transcription_fidelity", "PREMIUM");
        assert_eq!(params.get("priority"), Some("CRITICAL"));
        assert_eq!(params.get("transcription_fidelity"), Some("PREMIUM"));
    }

    #[test]
    fn test_remove_returns_value() {
        let mut params = QueryParams::from([("media_path", "/tmp/a.mp4"), ("job_id", "1")]);
        assert_eq!(params.remove("media_path"), Some("/tmp/a.mp4".to_string()));
        assert_eq!(params.remove("media_path"), None);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_merged_over_prefers_self_and_keeps_unrelated_keys() {
        let explicit = QueryParams::from([("job_id", "A")]);
        let existing = QueryParams::from([("job_id", "B"), ("extra", "C")]);
        let merged = explicit.merged_over(existing);
        assert_eq!(merged.encode(), "&job_id=A&extra=C");
    }

    #[test]
    fn test_encode_preserves_insertion_order() {
        let params = QueryParams::from([("z", "1"), ("a", "2"), ("m", "3")]);
        assert_eq!(params.encode(), "&z=1&a=2&m=3");
    }

    #[test]
    fn test_values_use_strict_percent_encoding() {
        let params = QueryParams::from([("q", "a b+c/d?e&f=g~h")]);
        let encoded = params.encode();
        assert_eq!(encoded, "&q=a%20b%2Bc%2Fd%3Fe%26f%3Dg~h");
        assert!(!encoded.contains('+'));
    }

    #[test]
    fn test_keys_use_form_encoding() {
        let params = QueryParams::from([("my key", "v"), ("a&b", "v")]);
        assert_eq!(params.encode(), "&my+key=v&a%26b=v");
    }

    #[test]
    fn test_encoded_values_never_contain_plus_and_round_trip() {
        let cases = [
            ("title", "Hello World"),
            ("expr", "1+1=2"),
            ("path", "/media/file name.mp4"),
            ("unicode", "caf\u{e9} \u{1f3a4}"),
            ("empty", ""),
            ("symbols", "!*'();:@&=+$,/?#[]"),
        ];
        let params: QueryParams = cases.iter().copied().collect();
        let encoded = params.encode();

        for pair in encoded.split('&').filter(|s| !s.is_empty()) {
            let value = pair.split_once('=').map_or("", |(_, v)| v);
            assert!(!value.contains('+'), "value segment {value} contains '+'");
        }

        let expected: Vec<(String, String)> = cases
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        assert_eq!(decode(&encoded), expected);
    }

    #[test]
    fn test_encode_query_none_and_literal() {
        assert_eq!(encode_query(None), "");
        assert_eq!(
            encode_query(Some(&Query::Literal("foo=bar&baz=1".to_string()))),
            "&foo=bar&baz=1"
        );
    }

    #[test]
    fn test_encode_query_keeps_literal_unchanged() {
        assert_eq!(
            encode_query(Some(&Query::Literal("&&a=1".to_string()))),
            "&&&a=1"
        );
        assert_eq!(
            encode_query(Some(&Query::Literal("a=1&".to_string()))),
            "&a=1&"
        );
    }

    #[test]
    fn test_empty_params_encode_to_empty_string() {
        assert_eq!(QueryParams::new().encode(), "");
        assert_eq!(QueryParams::new().to_form_body(), "");
    }

    #[test]
    fn test_form_body_has_no_leading_separator() {
        let params = QueryParams::from([("new_password", "p@ss word"), ("v", "1")]);
        assert_eq!(params.to_form_body(), "new_password=p%40ss%20word&v=1");
    }
}
