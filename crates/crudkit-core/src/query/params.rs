use crate::model::names_match;
use url::form_urlencoded;

///
/// QueryParams
///
/// Ordered multi-map of request query parameters.
/// Keys match case-insensitively and may repeat; insertion order is kept so
/// repeated values are seen in the order the client sent them.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Parse a raw query string (with or without the leading `?`),
    /// percent-decoding keys and values.
    #[must_use]
    pub fn from_query_str(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);

        form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect()
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    /// Every value sent for `key`, in request order.
    pub fn get_all<'s: 'a, 'a>(&'s self, key: &'a str) -> impl Iterator<Item = &'s str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| names_match(k, key))
            .map(|(_, v)| v.as_str())
    }

    /// First value sent for `key`.
    #[must_use]
    pub fn first(&self, key: &str) -> Option<&str> {
        self.get_all(key).next()
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.first(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K, V> Extend<(K, V)> for QueryParams
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.push(k, v);
        }
    }
}
