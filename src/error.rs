//! Error type for URI validation.

use std::fmt;

use crate::charset::CharacterClass;
use crate::component::Component;

/// Raised when a URI, or one of its components, breaks the RFC 3986 grammar.
///
/// The same error comes out of parsing, of a setter that validates
/// immediately, of [`Uri::validate`](crate::Uri::validate), and of a
/// committed [`ValidationTransaction`](crate::ValidationTransaction).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidUriError {
    /// The URI text being validated
    pub uri: String,
    /// The component that failed
    pub component: Component,
    /// The rule that was violated
    pub kind: InvalidUriErrorKind,
}

impl InvalidUriError {
    pub(crate) fn new(
        uri: impl Into<String>,
        component: Component,
        kind: InvalidUriErrorKind,
    ) -> Self {
        Self {
            uri: uri.into(),
            component,
            kind,
        }
    }
}

/// The grammar or structural rule a component violated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidUriErrorKind {
    /// Character outside the component's permitted set
    InvalidChar {
        /// The offending character
        char: char,
        /// Position in the component, in characters
        position: usize,
        /// The set the character had to belong to
        allowed: CharacterClass,
    },
    /// Delimiter that must be percent-encoded in this component
    UnencodedDelimiter {
        /// The delimiter
        char: char,
        /// Position in the component, in characters
        position: usize,
    },
    /// `%` not followed by two hexadecimal digits
    InvalidPercentEncoding {
        /// Position of the `%`, in characters
        position: usize,
    },
    /// Scheme present but empty
    EmptyScheme,
    /// Scheme does not begin with a letter
    SchemeMustStartWithLetter {
        /// The character found
        found: char,
    },
    /// Port contains something other than decimal digits
    NonDigitPort {
        /// The offending character
        char: char,
        /// Position in the port, in characters
        position: usize,
    },
    /// Host starts with `[` but does not end with `]`
    UnterminatedIpLiteral,
    /// User name, password, or port given without a host
    MissingHost,
    /// Non-empty path not starting with `/` while an authority is present
    RelativePathWithAuthority,
    /// Path starts with `//` while no authority is present
    AmbiguousPath,
    /// Scheme-less path whose first segment contains `:`
    ColonInFirstSegment,
}

impl fmt::Display for InvalidUriErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidChar {
                char,
                position,
                allowed,
            } => write!(
                f,
                "invalid character '{char}' at position {position}; expected {allowed} or a percent-encoded octet"
            ),
            Self::UnencodedDelimiter { char, position } => write!(
                f,
                "delimiter '{char}' at position {position} must be percent-encoded"
            ),
            Self::InvalidPercentEncoding { position } => write!(
                f,
                "'%' at position {position} is not followed by two hexadecimal digits"
            ),
            Self::EmptyScheme => write!(f, "scheme cannot be empty"),
            Self::SchemeMustStartWithLetter { found } => {
                write!(f, "scheme must start with a letter, found '{found}'")
            }
            Self::NonDigitPort { char, position } => write!(
                f,
                "port contains non-digit character '{char}' at position {position}"
            ),
            Self::UnterminatedIpLiteral => write!(f, "IP literal is missing its closing ']'"),
            Self::MissingHost => write!(
                f,
                "host name not supplied; user name, password and port require a host"
            ),
            Self::RelativePathWithAuthority => write!(
                f,
                "cannot have a relative path while an authority is set"
            ),
            Self::AmbiguousPath => write!(
                f,
                "cannot have a path starting with '//' without an authority"
            ),
            Self::ColonInFirstSegment => write!(
                f,
                "first path segment of a relative reference cannot contain ':'"
            ),
        }
    }
}

impl fmt::Display for InvalidUriError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid URI '{}': {}: {}", self.uri, self.component, self.kind)
    }
}

impl std::error::Error for InvalidUriError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_component_and_rule() {
        let err = InvalidUriError::new(
            "http://example.com:80a",
            Component::PortNumber,
            InvalidUriErrorKind::NonDigitPort {
                char: 'a',
                position: 2,
            },
        );
        assert_eq!(
            err.to_string(),
            "invalid URI 'http://example.com:80a': portNumber: port contains non-digit character 'a' at position 2"
        );
    }

    #[test]
    fn display_invalid_char_names_the_set() {
        let kind = InvalidUriErrorKind::InvalidChar {
            char: ' ',
            position: 3,
            allowed: CharacterClass::Path,
        };
        assert_eq!(
            kind.to_string(),
            "invalid character ' ' at position 3; expected path or a percent-encoded octet"
        );
    }

    #[test]
    fn display_scheme_rule() {
        let kind = InvalidUriErrorKind::SchemeMustStartWithLetter { found: '1' };
        assert_eq!(kind.to_string(), "scheme must start with a letter, found '1'");
    }
}
