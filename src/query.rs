//! Ordered query parameters.

use std::fmt;
use std::str::FromStr;

use crate::constants::{QUERY_PAIR_SEPARATOR, QUERY_VALUE_SEPARATOR};

/// Query parameters as ordered key/value pairs.
///
/// Parsing splits the query on `&`, then each segment on its first `=`.
/// Order and duplicate keys are preserved; a segment without `=` has no
/// value; empty segments (`a&&b`) are skipped. Nothing is percent-decoded.
///
/// # Examples
///
/// ```
/// use strict_uri::QueryValues;
///
/// let values = QueryValues::parse("a=1&b=2&a=3&flag");
/// let pairs: Vec<_> = values.iter().collect();
/// assert_eq!(
///     pairs,
///     vec![("a", Some("1")), ("b", Some("2")), ("a", Some("3")), ("flag", None)]
/// );
/// assert_eq!(values.to_string(), "a=1&b=2&a=3&flag");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct QueryValues {
    pairs: Vec<(String, Option<String>)>,
}

impl QueryValues {
    /// Creates an empty parameter list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses parameters from a query string (without leading '?').
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let pairs = query
            .split(QUERY_PAIR_SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .map(|segment| match segment.split_once(QUERY_VALUE_SEPARATOR) {
                Some((key, value)) => (key.to_string(), Some(value.to_string())),
                None => (segment.to_string(), None),
            })
            .collect();
        Self { pairs }
    }

    /// Appends a parameter.
    pub fn push(&mut self, key: impl Into<String>, value: Option<&str>) {
        self.pairs.push((key.into(), value.map(str::to_string)));
    }

    /// Returns the value of the first parameter named `key`.
    ///
    /// The outer `Option` is `None` when the key is missing, the inner one
    /// when the key is present without a value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Returns every value of the parameters named `key`, in order.
    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = Option<&'a str>> + 'a {
        self.iter().filter(move |(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Returns true if there are no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Returns the number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns an iterator over the parameters in query order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_deref()))
    }
}

impl fmt::Display for QueryValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, "{QUERY_PAIR_SEPARATOR}")?;
            }
            f.write_str(key)?;
            if let Some(value) = value {
                write!(f, "{QUERY_VALUE_SEPARATOR}{value}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for QueryValues {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl<K, V> FromIterator<(K, Option<V>)> for QueryValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, Option<V>)>>(iter: I) -> Self {
        let pairs = iter
            .into_iter()
            .map(|(k, v)| (k.into(), v.map(Into::into)))
            .collect();
        Self { pairs }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for QueryValues {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for QueryValues {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let pairs = Vec::<(String, Option<String>)>::deserialize(deserializer)?;
        Ok(Self { pairs })
    }
}
