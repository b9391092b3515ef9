//! Convenient re-exports for glob imports.
//!
//! ```rust
//! use strict_uri::prelude::*;
//!
//! let uri = Uri::parse("https://example.com/").unwrap();
//! assert_eq!(uri.component(Component::HostName).as_deref(), Some("example.com"));
//! ```
//!
//! Constants and the parse errors for class and component names are left
//! out; import them from the crate root.

// Core types
pub use crate::{CharacterClass, CharacterSet, Component, QueryValues};
pub use crate::{Uri, ValidationTransaction};

// Errors
pub use crate::{InvalidUriError, InvalidUriErrorKind};
