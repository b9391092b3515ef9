//! Main URI value type.

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::authority::AuthorityParts;
use crate::charset::CharacterClass;
use crate::component::Component;
use crate::error::{InvalidUriError, InvalidUriErrorKind};
use crate::query::QueryValues;
use crate::transaction::ValidationTransaction;
use crate::validate::{
    check_chars, check_host, check_password, check_port, check_scheme, check_user_name,
};

/// Stands in for user information in log output.
const REDACTED: &str = "***";

/// Which view of the authority was written last.
#[derive(Debug, Clone)]
enum AuthorityView {
    /// The sub-components are the source of truth; the string is recomposed
    /// on every read.
    Parts,
    /// The authority string was assigned directly and is kept as written.
    Written(String),
}

/// A URI reference with strictly validated components.
///
/// Every component is optional, and an absent component is different from
/// an empty one: `http://h/?` has an empty query, `http://h/` has none.
///
/// The authority can be read and written as a whole or through its user
/// name, password, host name and port number; both views always agree.
///
/// # Structure
///
/// ```text
/// [scheme ":"] ["//" [userinfo "@"] host [":" port]] path ["?" query] ["#" fragment]
/// ```
///
/// # Examples
///
/// ```
/// use strict_uri::Uri;
///
/// let uri = Uri::parse("https://bob:pw@example.com:8443/a/b?x=1&y#top").unwrap();
/// assert_eq!(uri.scheme(), Some("https"));
/// assert_eq!(uri.user_name(), Some("bob"));
/// assert_eq!(uri.host_name(), Some("example.com"));
/// assert_eq!(uri.port_number(), Some("8443"));
/// assert_eq!(uri.path(), Some("/a/b"));
/// assert_eq!(uri.query(), Some("x=1&y"));
/// assert_eq!(uri.fragment(), Some("top"));
///
/// assert!(Uri::parse("http://example.com:80a/").is_err());
/// ```
#[derive(Debug)]
pub struct Uri {
    scheme: Option<String>,
    parts: AuthorityParts,
    authority_view: AuthorityView,
    path: Option<String>,
    query: Option<String>,
    fragment: Option<String>,
    /// Open validation transactions
    deferral_depth: usize,
}

impl Uri {
    /// Creates a URI with every component absent.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            scheme: None,
            parts: AuthorityParts {
                user_name: None,
                password: None,
                host_name: None,
                port_number: None,
            },
            authority_view: AuthorityView::Parts,
            path: None,
            query: None,
            fragment: None,
            deferral_depth: 0,
        }
    }

    /// Parses a URI reference.
    ///
    /// The path is always present after parsing, possibly empty; query and
    /// fragment are present when their delimiter is.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUriError` if any component breaks its grammar, e.g.
    /// a scheme that does not start with a letter, a non-digit port, or a
    /// character outside the component's set that is not percent-encoded.
    pub fn parse(input: &str) -> Result<Self, InvalidUriError> {
        let uri = Self::split(input);
        log::debug!("parsing URI '{}'", uri.redacted());
        uri.validate()?;
        Ok(uri)
    }

    /// Builds a URI from component values without parsing a URI string.
    ///
    /// Entries are applied in iteration order and validated once, after the
    /// last one. When both `authority` (or `userInfo`) and its sub-components
    /// are given, whichever comes later wins. A `queryValues` entry holds
    /// serialized pairs and is re-composed through [`QueryValues`]. Without
    /// a `path` entry the path is empty, as it would be after parsing.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUriError` if the resulting URI is invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use strict_uri::{Component, Uri};
    ///
    /// let uri = Uri::from_components([
    ///     (Component::Scheme, "http"),
    ///     (Component::HostName, "example.com"),
    ///     (Component::PortNumber, "8080"),
    ///     (Component::Path, "/index.html"),
    /// ])
    /// .unwrap();
    /// assert_eq!(uri.to_string(), "http://example.com:8080/index.html");
    /// ```
    pub fn from_components<'a, I>(components: I) -> Result<Self, InvalidUriError>
    where
        I: IntoIterator<Item = (Component, &'a str)>,
    {
        let mut uri = Self::new();
        uri.defer_validation(|uri| {
            for (component, value) in components {
                uri.set_component(component, Some(value))?;
            }
            if uri.path.is_none() {
                uri.path = Some(String::new());
            }
            Ok(())
        })?;
        Ok(uri)
    }

    /// Returns the scheme.
    #[must_use]
    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    /// Returns the user name.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.parts.user_name.as_deref()
    }

    /// Returns the password.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.parts.password.as_deref()
    }

    /// Returns `user [":" password]`.
    #[must_use]
    pub fn user_info(&self) -> Option<String> {
        self.parts.user_info()
    }

    /// Returns the host name. IP literals keep their brackets.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        self.parts.host_name.as_deref()
    }

    /// Returns the port number as written.
    #[must_use]
    pub fn port_number(&self) -> Option<&str> {
        self.parts.port_number.as_deref()
    }

    /// Returns the port as an integer, if present and representable.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port_number().and_then(|port| port.parse().ok())
    }

    /// Returns the authority.
    ///
    /// Borrowed when the authority was the last view written, recomposed
    /// from the sub-components otherwise.
    #[must_use]
    pub fn authority(&self) -> Option<Cow<'_, str>> {
        match &self.authority_view {
            AuthorityView::Written(authority) => Some(Cow::Borrowed(authority)),
            AuthorityView::Parts => self.parts.compose().map(Cow::Owned),
        }
    }

    /// Returns the path.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Returns the query, without the leading `?`.
    #[must_use]
    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    /// Returns the query split into ordered pairs.
    #[must_use]
    pub fn query_values(&self) -> Option<QueryValues> {
        self.query.as_deref().map(QueryValues::parse)
    }

    /// Returns the fragment, without the leading `#`.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Returns the value of any component by name.
    ///
    /// `queryValues` is returned in its serialized form.
    #[must_use]
    pub fn component(&self, component: Component) -> Option<Cow<'_, str>> {
        match component {
            Component::Scheme => self.scheme().map(Cow::Borrowed),
            Component::UserName => self.user_name().map(Cow::Borrowed),
            Component::Password => self.password().map(Cow::Borrowed),
            Component::HostName => self.host_name().map(Cow::Borrowed),
            Component::PortNumber => self.port_number().map(Cow::Borrowed),
            Component::Path => self.path().map(Cow::Borrowed),
            Component::Query => self.query().map(Cow::Borrowed),
            Component::QueryValues => self.query_values().map(|v| Cow::Owned(v.to_string())),
            Component::Fragment => self.fragment().map(Cow::Borrowed),
            Component::Authority => self.authority(),
            Component::UserInfo => self.user_info().map(Cow::Owned),
        }
    }

    /// Returns true if the URI has a scheme.
    #[must_use]
    pub const fn is_absolute(&self) -> bool {
        self.scheme.is_some()
    }

    /// Returns true if the URI has no scheme.
    #[must_use]
    pub const fn is_relative(&self) -> bool {
        self.scheme.is_none()
    }

    /// Returns true if the URI has an authority.
    #[must_use]
    pub const fn has_authority(&self) -> bool {
        self.parts.host_name.is_some()
    }

    /// Sets the scheme.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUriError` if validation runs and fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use strict_uri::Uri;
    ///
    /// let mut uri = Uri::parse("http://example.com/").unwrap();
    /// uri.set_scheme(Some("a1+-.")).unwrap();
    /// assert!(uri.set_scheme(Some("ht!tp")).is_err());
    /// ```
    pub fn set_scheme(&mut self, scheme: Option<&str>) -> Result<(), InvalidUriError> {
        self.scheme = scheme.map(str::to_string);
        self.validate_unless_deferred()
    }

    /// Sets the user name.
    ///
    /// Clearing the user name while a password is set leaves an empty user
    /// name, since a password cannot stand alone.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUriError` if validation runs and fails.
    pub fn set_user_name(&mut self, user_name: Option<&str>) -> Result<(), InvalidUriError> {
        self.parts.user_name = user_name.map(str::to_string);
        self.fill_user_for_password();
        self.parts_written()
    }

    /// Sets the password.
    ///
    /// Setting a password without a user name sets an empty user name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUriError` if validation runs and fails.
    pub fn set_password(&mut self, password: Option<&str>) -> Result<(), InvalidUriError> {
        self.parts.password = password.map(str::to_string);
        self.fill_user_for_password();
        self.parts_written()
    }

    /// Sets user name and password from `user [":" password]`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUriError` if validation runs and fails.
    pub fn set_user_info(&mut self, user_info: Option<&str>) -> Result<(), InvalidUriError> {
        self.parts.set_user_info(user_info);
        self.parts_written()
    }

    /// Sets the host name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUriError` if validation runs and fails.
    pub fn set_host_name(&mut self, host_name: Option<&str>) -> Result<(), InvalidUriError> {
        self.parts.host_name = host_name.map(str::to_string);
        self.parts_written()
    }

    /// Sets the port number.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUriError` if validation runs and fails, e.g. when the
    /// port contains a non-digit.
    pub fn set_port_number(&mut self, port_number: Option<&str>) -> Result<(), InvalidUriError> {
        self.parts.port_number = port_number.map(str::to_string);
        self.parts_written()
    }

    /// Sets the authority, replacing user name, password, host name and
    /// port number with its parts.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUriError` if validation runs and fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use strict_uri::Uri;
    ///
    /// let mut uri = Uri::parse("http://example.org/").unwrap();
    /// uri.set_authority(Some("bob:pw@example.com:80")).unwrap();
    /// assert_eq!(uri.user_name(), Some("bob"));
    /// assert_eq!(uri.password(), Some("pw"));
    /// assert_eq!(uri.host_name(), Some("example.com"));
    /// assert_eq!(uri.port_number(), Some("80"));
    /// ```
    pub fn set_authority(&mut self, authority: Option<&str>) -> Result<(), InvalidUriError> {
        if let Some(authority) = authority {
            self.parts = AuthorityParts::decompose(authority);
            self.authority_view = AuthorityView::Written(authority.to_string());
        } else {
            self.parts = AuthorityParts::default();
            self.authority_view = AuthorityView::Parts;
        }
        self.validate_unless_deferred()
    }

    /// Sets the path.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUriError` if validation runs and fails.
    pub fn set_path(&mut self, path: Option<&str>) -> Result<(), InvalidUriError> {
        self.path = path.map(str::to_string);
        self.validate_unless_deferred()
    }

    /// Sets the query, without the leading `?`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUriError` if validation runs and fails.
    pub fn set_query(&mut self, query: Option<&str>) -> Result<(), InvalidUriError> {
        self.query = query.map(str::to_string);
        self.validate_unless_deferred()
    }

    /// Sets the query from ordered pairs.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUriError` if validation runs and fails.
    pub fn set_query_values(
        &mut self,
        query_values: Option<&QueryValues>,
    ) -> Result<(), InvalidUriError> {
        self.query = query_values.map(ToString::to_string);
        self.validate_unless_deferred()
    }

    /// Sets the fragment, without the leading `#`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUriError` if validation runs and fails.
    pub fn set_fragment(&mut self, fragment: Option<&str>) -> Result<(), InvalidUriError> {
        self.fragment = fragment.map(str::to_string);
        self.validate_unless_deferred()
    }

    /// Sets any component by name.
    ///
    /// A `queryValues` value holds serialized pairs.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUriError` if validation runs and fails.
    pub fn set_component(
        &mut self,
        component: Component,
        value: Option<&str>,
    ) -> Result<(), InvalidUriError> {
        match component {
            Component::Scheme => self.set_scheme(value),
            Component::UserName => self.set_user_name(value),
            Component::Password => self.set_password(value),
            Component::HostName => self.set_host_name(value),
            Component::PortNumber => self.set_port_number(value),
            Component::Path => self.set_path(value),
            Component::Query => self.set_query(value),
            Component::QueryValues => self.set_query_values(value.map(QueryValues::parse).as_ref()),
            Component::Fragment => self.set_fragment(value),
            Component::Authority => self.set_authority(value),
            Component::UserInfo => self.set_user_info(value),
        }
    }

    /// Checks every component now, regardless of open transactions.
    ///
    /// Components are checked in order (scheme, user name, password, host
    /// name, port number, path, query, fragment), then the rules that span
    /// components. The first violation is returned.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUriError` naming the first invalid component.
    pub fn validate(&self) -> Result<(), InvalidUriError> {
        type Check = fn(&str) -> Result<(), InvalidUriErrorKind>;

        let checks: [(Component, Option<&str>, Check); 8] = [
            (Component::Scheme, self.scheme(), check_scheme),
            (Component::UserName, self.user_name(), check_user_name),
            (Component::Password, self.password(), check_password),
            (Component::HostName, self.host_name(), check_host),
            (Component::PortNumber, self.port_number(), check_port),
            (Component::Path, self.path(), |v| check_chars(v, CharacterClass::Path)),
            (Component::Query, self.query(), |v| check_chars(v, CharacterClass::Query)),
            (Component::Fragment, self.fragment(), |v| check_chars(v, CharacterClass::Fragment)),
        ];

        for (component, value, check) in checks {
            if let Some(value) = value {
                check(value).map_err(|kind| self.error(component, kind))?;
            }
        }

        self.check_structure()
            .map_err(|(component, kind)| self.error(component, kind))
    }

    /// Opens a validation transaction.
    ///
    /// Setters called through the returned guard store their values without
    /// validating. [`ValidationTransaction::commit`] validates once, when the
    /// outermost transaction commits; dropping the guard without committing
    /// skips validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use strict_uri::Uri;
    ///
    /// let mut uri = Uri::parse("http://example.com/").unwrap();
    /// let mut tx = uri.begin_transaction();
    /// tx.set_scheme(Some("1nvalid")).unwrap();
    /// tx.set_scheme(Some("https")).unwrap();
    /// tx.commit().unwrap();
    /// assert_eq!(uri.to_string(), "https://example.com/");
    /// ```
    pub fn begin_transaction(&mut self) -> ValidationTransaction<'_> {
        ValidationTransaction::new(self)
    }

    /// Runs `f` with validation deferred until it returns.
    ///
    /// If `f` returns `Ok`, the deferred validation runs (when this is the
    /// outermost transaction). If `f` returns `Err` or panics, validation is
    /// skipped and the object may be left invalid.
    ///
    /// # Errors
    ///
    /// Returns the error from `f`, or the `InvalidUriError` of the final
    /// validation.
    ///
    /// # Examples
    ///
    /// ```
    /// use strict_uri::Uri;
    ///
    /// let mut uri = Uri::new();
    /// uri.defer_validation(|uri| {
    ///     uri.set_port_number(Some("80"))?; // no host yet
    ///     uri.set_host_name(Some("example.com"))?;
    ///     uri.set_scheme(Some("http"))
    /// })
    /// .unwrap();
    /// assert_eq!(uri.to_string(), "http://example.com:80");
    /// ```
    pub fn defer_validation<T, F>(&mut self, f: F) -> Result<T, InvalidUriError>
    where
        F: FnOnce(&mut Self) -> Result<T, InvalidUriError>,
    {
        let mut transaction = self.begin_transaction();
        let value = f(&mut transaction)?;
        transaction.commit()?;
        Ok(value)
    }

    /// Returns true while a validation transaction is open.
    #[must_use]
    pub const fn is_validation_deferred(&self) -> bool {
        self.deferral_depth > 0
    }

    pub(crate) fn enter_deferral(&mut self) {
        self.deferral_depth += 1;
    }

    /// Returns true when the outermost transaction was left.
    pub(crate) fn leave_deferral(&mut self) -> bool {
        self.deferral_depth = self.deferral_depth.saturating_sub(1);
        self.deferral_depth == 0
    }

    fn validate_unless_deferred(&self) -> Result<(), InvalidUriError> {
        if self.is_validation_deferred() {
            return Ok(());
        }
        self.validate()
    }

    fn parts_written(&mut self) -> Result<(), InvalidUriError> {
        self.authority_view = AuthorityView::Parts;
        self.validate_unless_deferred()
    }

    fn fill_user_for_password(&mut self) {
        if self.parts.password.is_some() && self.parts.user_name.is_none() {
            self.parts.user_name = Some(String::new());
        }
    }

    fn error(&self, component: Component, kind: InvalidUriErrorKind) -> InvalidUriError {
        InvalidUriError::new(self.to_string(), component, kind)
    }

    fn check_structure(&self) -> Result<(), (Component, InvalidUriErrorKind)> {
        if !self.has_authority() {
            let orphan = [
                (Component::UserName, &self.parts.user_name),
                (Component::Password, &self.parts.password),
                (Component::PortNumber, &self.parts.port_number),
            ]
            .into_iter()
            .find(|(_, value)| value.is_some());
            if let Some((component, _)) = orphan {
                return Err((component, InvalidUriErrorKind::MissingHost));
            }
        }

        let path = self.path().unwrap_or_default();
        if self.has_authority() {
            if !path.is_empty() && !path.starts_with('/') {
                return Err((Component::Path, InvalidUriErrorKind::RelativePathWithAuthority));
            }
        } else if path.starts_with("//") {
            return Err((Component::Path, InvalidUriErrorKind::AmbiguousPath));
        }

        if self.is_relative() && !self.has_authority() {
            let first_segment = path.split('/').next().unwrap_or_default();
            if first_segment.contains(':') {
                return Err((Component::Path, InvalidUriErrorKind::ColonInFirstSegment));
            }
        }

        Ok(())
    }

    /// Splits `input` into components without validating them.
    fn split(input: &str) -> Self {
        let mut uri = Self::new();
        let mut rest = input;

        if let Some(end) = input.find([':', '/', '?', '#'])
            && input[end..].starts_with(':')
        {
            uri.scheme = Some(input[..end].to_string());
            rest = &input[end + 1..];
        }

        if let Some((before, fragment)) = rest.split_once('#') {
            uri.fragment = Some(fragment.to_string());
            rest = before;
        }

        if let Some((before, query)) = rest.split_once('?') {
            uri.query = Some(query.to_string());
            rest = before;
        }

        if let Some(hier) = rest.strip_prefix("//") {
            let end = hier.find('/').unwrap_or(hier.len());
            let authority = &hier[..end];
            uri.parts = AuthorityParts::decompose(authority);
            uri.authority_view = AuthorityView::Written(authority.to_string());
            rest = &hier[end..];
        }

        uri.path = Some(rest.to_string());
        uri
    }

    /// Log-safe rendering: user name and password are replaced by `***`.
    pub(crate) const fn redacted(&self) -> Redacted<'_> {
        Redacted(self)
    }

    fn write_to(&self, f: &mut fmt::Formatter<'_>, mask_user_info: bool) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            write!(f, "{scheme}:")?;
        }
        let has_user_info = self.parts.user_name.is_some() || self.parts.password.is_some();
        if mask_user_info && has_user_info {
            write!(f, "//{REDACTED}@{}", self.host_name().unwrap_or_default())?;
            if let Some(port) = self.port_number() {
                write!(f, ":{port}")?;
            }
        } else if let Some(authority) = self.authority() {
            write!(f, "//{authority}")?;
        }
        if let Some(path) = &self.path {
            f.write_str(path)?;
        }
        if let Some(query) = &self.query {
            write!(f, "?{query}")?;
        }
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }

    fn key(&self) -> (Option<&str>, &AuthorityParts, Option<&str>, Option<&str>, Option<&str>) {
        (self.scheme(), &self.parts, self.path(), self.query(), self.fragment())
    }
}

impl Default for Uri {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Uri {
    /// Clones the components; the clone has no open transactions.
    fn clone(&self) -> Self {
        Self {
            scheme: self.scheme.clone(),
            parts: self.parts.clone(),
            authority_view: self.authority_view.clone(),
            path: self.path.clone(),
            query: self.query.clone(),
            fragment: self.fragment.clone(),
            deferral_depth: 0,
        }
    }
}

impl PartialEq for Uri {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Uri {}

impl Hash for Uri {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f, false)
    }
}

/// Renders a [`Uri`] with its user information masked.
pub(crate) struct Redacted<'a>(&'a Uri);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_to(f, true)
    }
}

impl FromStr for Uri {
    type Err = InvalidUriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Uri {
    type Error = InvalidUriError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Uri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Uri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
