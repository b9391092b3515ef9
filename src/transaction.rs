//! Deferred validation of several mutations.

use std::ops::{Deref, DerefMut};

use crate::error::InvalidUriError;
use crate::uri::Uri;

/// Guard that suppresses per-setter validation on a [`Uri`].
///
/// Created by [`Uri::begin_transaction`]. Dereferences to the URI, so
/// setters can be called on the guard directly. Transactions nest; only
/// committing the outermost one validates.
///
/// Dropping the guard without calling [`commit`](Self::commit) (an early
/// return or a panic) closes the transaction without validating, which may
/// leave the URI in an invalid state.
///
/// # Examples
///
/// ```
/// use strict_uri::Uri;
///
/// let mut uri = Uri::parse("http://example.com/").unwrap();
/// let mut tx = uri.begin_transaction();
/// tx.set_port_number(Some("80a")).unwrap(); // not validated yet
/// assert!(tx.commit().is_err());
/// ```
#[derive(Debug)]
#[must_use = "dropping a transaction without committing skips validation"]
pub struct ValidationTransaction<'a> {
    uri: &'a mut Uri,
    committed: bool,
}

impl<'a> ValidationTransaction<'a> {
    pub(crate) fn new(uri: &'a mut Uri) -> Self {
        uri.enter_deferral();
        Self {
            uri,
            committed: false,
        }
    }

    /// Closes the transaction.
    ///
    /// When this is the outermost transaction, the URI is validated once in
    /// its final state.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUriError` if the final state is invalid.
    pub fn commit(mut self) -> Result<(), InvalidUriError> {
        self.committed = true;
        if !self.uri.leave_deferral() {
            return Ok(());
        }
        log::debug!("running deferred validation of '{}'", self.uri.redacted());
        self.uri.validate()
    }
}

impl Deref for ValidationTransaction<'_> {
    type Target = Uri;

    fn deref(&self) -> &Self::Target {
        &*self.uri
    }
}

impl DerefMut for ValidationTransaction<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.uri
    }
}

impl Drop for ValidationTransaction<'_> {
    fn drop(&mut self) {
        if !self.committed {
            self.uri.leave_deferral();
            log::debug!(
                "validation transaction abandoned; '{}' was not validated",
                self.uri.redacted()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::component::Component;
    use crate::error::InvalidUriErrorKind;
    use crate::uri::Uri;

    fn base() -> Uri {
        Uri::parse("http://example.com/").unwrap()
    }

    #[test]
    fn corrected_value_does_not_fail() {
        let mut uri = base();
        uri.defer_validation(|uri| {
            uri.set_scheme(Some("ht!tp"))?;
            uri.set_scheme(Some("https"))
        })
        .unwrap();
        assert_eq!(uri.scheme(), Some("https"));
        assert!(!uri.is_validation_deferred());
    }

    #[test]
    fn invalid_final_value_fails_once_at_the_end() {
        let mut uri = base();
        let mut setter_results = Vec::new();
        let result = uri.defer_validation(|uri| {
            setter_results.push(uri.set_scheme(Some("ht!tp")));
            setter_results.push(uri.set_port_number(Some("x")));
            Ok(())
        });

        assert!(setter_results.iter().all(Result::is_ok));
        let err = result.unwrap_err();
        assert_eq!(err.component, Component::Scheme);
        assert!(!uri.is_validation_deferred());
    }

    #[test]
    fn nested_transactions_validate_at_outermost_commit() {
        let mut uri = base();
        let mut outer = uri.begin_transaction();
        outer.set_port_number(Some("bad")).unwrap();

        let mut inner = outer.begin_transaction();
        inner.set_path(Some("also bad")).unwrap();
        inner.commit().unwrap();
        assert!(outer.is_validation_deferred());

        outer.set_port_number(Some("8080")).unwrap();
        outer.set_path(Some("/fine")).unwrap();
        outer.commit().unwrap();
        assert_eq!(uri.to_string(), "http://example.com:8080/fine");
    }

    #[test]
    fn nested_closures() {
        let mut uri = base();
        uri.defer_validation(|uri| {
            uri.defer_validation(|uri| uri.set_host_name(Some("")))?;
            uri.set_path(Some("/etc/hosts"))?;
            uri.set_scheme(Some("file"))
        })
        .unwrap();
        assert_eq!(uri.to_string(), "file:///etc/hosts");
    }

    #[test]
    fn dropped_guard_skips_validation() {
        let mut uri = base();
        {
            let mut tx = uri.begin_transaction();
            tx.set_scheme(Some("9")).unwrap();
        }
        assert!(!uri.is_validation_deferred());
        assert_eq!(uri.scheme(), Some("9"));
        assert_eq!(
            uri.validate().unwrap_err().kind,
            InvalidUriErrorKind::SchemeMustStartWithLetter { found: '9' }
        );
    }

    #[test]
    fn error_inside_closure_skips_validation() {
        let mut uri = base();
        let sentinel = Uri::parse("x y").unwrap_err();
        let result: Result<(), _> = uri.defer_validation(|uri| {
            uri.set_fragment(Some("not valid"))?;
            Err(sentinel.clone())
        });
        assert_eq!(result.unwrap_err(), sentinel);
        assert!(!uri.is_validation_deferred());
        assert_eq!(uri.fragment(), Some("not valid"));
    }

    #[test]
    fn panic_inside_closure_closes_transaction() {
        let mut uri = base();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = uri.defer_validation(|uri| -> Result<(), _> {
                uri.set_scheme(Some("+"))?;
                panic!("unit of work failed");
            });
        }));
        assert!(outcome.is_err());
        assert!(!uri.is_validation_deferred());
    }

    #[test]
    fn setters_validate_again_after_commit() {
        let mut uri = base();
        uri.defer_validation(|uri| uri.set_query(Some("a=1"))).unwrap();
        assert!(uri.set_query(Some("a b")).is_err());
    }
}
