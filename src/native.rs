//! Strict re-validation of [`url::Url`] values.
//!
//! `url::Url` follows the WHATWG URL standard, which accepts and repairs
//! input RFC 3986 rejects. Converting renders the URL to text and parses
//! that text with the same rules as [`Uri::parse`].

use crate::error::InvalidUriError;
use crate::uri::Uri;

impl Uri {
    /// Re-parses a [`url::Url`] with strict RFC 3986 rules.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUriError` if the serialized URL is not a valid URI.
    ///
    /// # Examples
    ///
    /// ```
    /// use strict_uri::Uri;
    ///
    /// let url = url::Url::parse("HTTP://Example.com:8080/a b").unwrap();
    /// let uri = Uri::from_url(&url).unwrap();
    /// assert_eq!(uri.host_name(), Some("example.com"));
    /// assert_eq!(uri.path(), Some("/a%20b"));
    /// ```
    pub fn from_url(url: &url::Url) -> Result<Self, InvalidUriError> {
        Self::parse(url.as_str())
    }
}

impl TryFrom<&url::Url> for Uri {
    type Error = InvalidUriError;

    fn try_from(url: &url::Url) -> Result<Self, Self::Error> {
        Self::from_url(url)
    }
}

impl TryFrom<url::Url> for Uri {
    type Error = InvalidUriError;

    fn try_from(url: url::Url) -> Result<Self, Self::Error> {
        Self::from_url(&url)
    }
}
