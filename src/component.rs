//! Names of the addressable URI components.

use std::fmt;
use std::str::FromStr;

/// One addressable component of a [`Uri`](crate::Uri).
///
/// Besides naming the culprit of an [`InvalidUriError`](crate::InvalidUriError),
/// components are the keys accepted by
/// [`Uri::from_components`](crate::Uri::from_components).
///
/// # Examples
///
/// ```
/// use strict_uri::Component;
///
/// assert_eq!(Component::HostName.as_str(), "hostName");
/// assert_eq!("portNumber".parse::<Component>(), Ok(Component::PortNumber));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    /// The scheme, without the trailing `:`.
    Scheme,
    /// The user name part of the user information.
    UserName,
    /// The password part of the user information.
    Password,
    /// The host, either a registered name or a bracketed IP literal.
    HostName,
    /// The port, as written.
    PortNumber,
    /// The path.
    Path,
    /// The query, without the leading `?`.
    Query,
    /// The query as ordered key/value pairs.
    QueryValues,
    /// The fragment, without the leading `#`.
    Fragment,
    /// `[userinfo "@"] host [":" port]`
    Authority,
    /// `user [":" password]`
    UserInfo,
}

impl Component {
    /// Every component, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Scheme,
        Self::UserName,
        Self::Password,
        Self::HostName,
        Self::PortNumber,
        Self::Path,
        Self::Query,
        Self::QueryValues,
        Self::Fragment,
        Self::Authority,
        Self::UserInfo,
    ];

    /// Returns the key name of the component.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheme => "scheme",
            Self::UserName => "userName",
            Self::Password => "password",
            Self::HostName => "hostName",
            Self::PortNumber => "portNumber",
            Self::Path => "path",
            Self::Query => "query",
            Self::QueryValues => "queryValues",
            Self::Fragment => "fragment",
            Self::Authority => "authority",
            Self::UserInfo => "userInfo",
        }
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Component {
    type Err = UnknownComponent;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownComponent(s.to_string()))
    }
}

impl TryFrom<&str> for Component {
    type Error = UnknownComponent;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Returned when a key does not name any [`Component`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownComponent(pub String);

impl fmt::Display for UnknownComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown URI component '{}'", self.0)
    }
}

impl std::error::Error for UnknownComponent {}

#[cfg(feature = "serde")]
impl serde::Serialize for Component {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Component {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
