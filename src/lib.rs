//! Strictly validated RFC 3986 URI references.
//!
//! This crate provides [`Uri`], a mutable URI value whose components are
//! checked against the RFC 3986 grammar on every change, together with the
//! character sets that grammar is built from.
//!
//! # Overview
//!
//! A URI reference has the structure:
//!
//! ```text
//! [scheme ":"] ["//" [userinfo "@"] host [":" port]] path ["?" query] ["#" fragment]
//! ```
//!
//! Every component is optional, and absent is not the same as empty. The
//! authority is available both as one string and as user name, password,
//! host name and port number; the two views stay consistent whichever one
//! is written.
//!
//! # Quick Start
//!
//! ```rust
//! use strict_uri::Uri;
//!
//! // Parse a URI reference
//! let mut uri = Uri::parse("http://bob@example.com:8080/docs?page=2#intro").unwrap();
//!
//! // Access components
//! assert_eq!(uri.host_name(), Some("example.com"));
//! assert_eq!(uri.port(), Some(8080));
//! assert_eq!(uri.query_values().unwrap().get("page"), Some(Some("2")));
//!
//! // Setters validate immediately
//! assert!(uri.set_port_number(Some("80a")).is_err());
//! uri.set_authority(Some("example.org")).unwrap();
//! assert_eq!(uri.to_string(), "http://example.org/docs?page=2#intro");
//! ```
//!
//! # Deferred Validation
//!
//! Several mutations can be grouped so the URI is only checked in its final
//! state:
//!
//! ```rust
//! use strict_uri::Uri;
//!
//! let mut uri = Uri::new();
//! uri.defer_validation(|uri| {
//!     uri.set_port_number(Some("443"))?; // a port without a host is invalid...
//!     uri.set_host_name(Some("example.com"))?; // ...until the host arrives
//!     uri.set_scheme(Some("https"))
//! })
//! .unwrap();
//! assert_eq!(uri.to_string(), "https://example.com:443");
//! ```
//!
//! # Character Sets
//!
//! The named RFC 3986 character classes are available as sets and as regex
//! bracket expressions:
//!
//! ```rust
//! use strict_uri::CharacterClass;
//!
//! assert!(CharacterClass::Unreserved.set().contains('~'));
//! assert_eq!(CharacterClass::Digit.regex_class(), "[0-9]");
//! assert_eq!(CharacterClass::Digit.inverted_regex_class(), "[^0-9]");
//! ```
//!
//! # Features
//!
//! | Feature | Default | Enables |
//! |---------|---------|---------|
//! | `url` | yes | [`Uri::from_url`] and `TryFrom<url::Url>` |
//! | `serde` | no | `Serialize`/`Deserialize` for [`Uri`], [`Component`] and [`QueryValues`] |

#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod authority;
mod charset;
mod component;
mod constants;
mod error;
#[cfg(feature = "url")]
mod native;
pub mod prelude;
mod query;
mod regex_class;
mod transaction;
mod uri;
mod validate;

pub use charset::{CharacterClass, CharacterSet, UnknownCharacterClass};
pub use component::{Component, UnknownComponent};
pub use constants::{
    GEN_DELIMS, PERCENT, QUERY_PAIR_SEPARATOR, QUERY_VALUE_SEPARATOR, SCHEME_MARKS, SUB_DELIMS,
    UNRESERVED_MARKS,
};
pub use error::{InvalidUriError, InvalidUriErrorKind};
pub use query::QueryValues;
pub use transaction::ValidationTransaction;
pub use uri::Uri;
