//! Port for translating persistence failures into domain errors.

use crate::domain::DomainError;

/// Classify raw persistence failures of type `E` into domain errors.
///
/// Implementations are pure and synchronous. They never hand back the raw
/// error: a present failure always becomes some [`DomainError`], falling back
/// to [`DomainError::DATABASE_QUERY`] when nothing more specific applies.
///
/// # Examples
/// ```
/// use domain_errors::domain::DomainError;
/// use domain_errors::domain::ports::DbErrorMapper;
///
/// struct AlwaysMissing;
///
/// impl DbErrorMapper<std::io::Error> for AlwaysMissing {
///     fn classify(&self, _error: &std::io::Error) -> DomainError {
///         DomainError::NOT_FOUND
///     }
/// }
///
/// let mapper = AlwaysMissing;
/// assert_eq!(mapper.map(None), None);
/// let io = std::io::Error::other("gone");
/// assert_eq!(mapper.map(Some(&io)), Some(DomainError::NOT_FOUND));
/// ```
pub trait DbErrorMapper<E: ?Sized>: Send + Sync {
    /// Classify a failure that is known to be present.
    fn classify(&self, error: &E) -> DomainError;

    /// Classify an optional failure; no failure means no domain error.
    fn map(&self, error: Option<&E>) -> Option<DomainError> {
        error.map(|raw| self.classify(raw))
    }
}
