//! Domain-level error values.
//!
//! These errors are transport agnostic. Outbound adapters classify driver
//! failures into them and inbound adapters map them to HTTP status codes and
//! JSON envelopes.

use std::borrow::Cow;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

mod catalog;

pub use self::catalog::{CatalogEntry, ErrorGroup, catalog, lookup};

/// Stable, caller-facing error identity.
///
/// A domain error is a `(code, message)` pair. The `code` is the stable,
/// machine-readable identifier callers branch on; the `message` is for
/// humans and never drives control flow. Equality and hashing consider the
/// `code` only, so a localised message still compares equal to the catalog
/// entry it was derived from.
///
/// No validation happens at construction. Uniqueness of catalog codes is
/// enforced by the catalog tests rather than by the constructor.
///
/// # Examples
/// ```
/// use domain_errors::domain::DomainError;
///
/// let err = DomainError::new("TEST_ERROR", "Test message");
/// assert_eq!(err.to_string(), "TEST_ERROR: Test message");
/// assert_eq!(DomainError::NOT_FOUND.code(), "NOT_FOUND");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainError {
    code: Cow<'static, str>,
    message: Cow<'static, str>,
}

impl DomainError {
    /// Construct an error from arbitrary code and message values.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Compile-time constructor used to declare catalog entries.
    #[must_use]
    pub const fn from_static(code: &'static str, message: &'static str) -> Self {
        Self {
            code: Cow::Borrowed(code),
            message: Cow::Borrowed(message),
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Human-readable message returned to adapters.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Replace the message while keeping the code, e.g. for localisation.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Locate the first domain error in `error`'s source chain.
    ///
    /// The error itself is inspected first, then each `source()` in turn, so
    /// a domain error wrapped by an adapter-specific error type is still
    /// recognised.
    ///
    /// # Examples
    /// ```
    /// use domain_errors::domain::DomainError;
    ///
    /// let err = DomainError::CONFLICT;
    /// let found = DomainError::find_in(&err).map(DomainError::code);
    /// assert_eq!(found, Some("CONFLICT"));
    ///
    /// let io = std::io::Error::other("disk on fire");
    /// assert!(DomainError::find_in(&io).is_none());
    /// ```
    #[must_use]
    pub fn find_in<'a>(error: &'a (dyn std::error::Error + 'static)) -> Option<&'a Self> {
        std::iter::successors(Some(error), |current| current.source())
            .find_map(|current| current.downcast_ref::<Self>())
    }
}

impl PartialEq for DomainError {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for DomainError {}

impl Hash for DomainError {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for DomainError {}

#[cfg(test)]
mod tests;
