//! Postgres error classification.
//!
//! Postgres reports failures with a five-character SQLSTATE and, for
//! integrity violations, the name of the violated constraint as a separate
//! field. Overrides are therefore matched exactly on that name.

use std::borrow::Cow;

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use sqlx::postgres::PgDatabaseError;
use thiserror::Error;
use tracing::debug;

use crate::domain::DomainError;
use crate::domain::ports::{DbErrorMapper, OverrideTable};

/// SQLSTATE `23505`: unique violation.
pub const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE `23503`: foreign key violation.
pub const FOREIGN_KEY_VIOLATION: &str = "23503";
/// SQLSTATE `23502`: not-null violation.
pub const NOT_NULL_VIOLATION: &str = "23502";
/// SQLSTATE `23514`: check violation.
pub const CHECK_VIOLATION: &str = "23514";
/// SQLSTATE `40001`: serialization failure.
pub const SERIALIZATION_FAILURE: &str = "40001";
/// SQLSTATE `25006`: read-only SQL transaction.
pub const READ_ONLY_SQL_TRANSACTION: &str = "25006";
/// SQLSTATE `08006`: connection failure.
pub const CONNECTION_FAILURE: &str = "08006";
/// SQLSTATE `57014`: query cancelled, including statement timeouts.
pub const QUERY_CANCELED: &str = "57014";

/// Structured view of a Postgres server error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgServerError<'a> {
    /// Five-character SQLSTATE.
    pub code: Cow<'a, str>,
    /// Violated constraint, when the server reported one.
    pub constraint: Option<&'a str>,
}

/// Why an operation stopped before the database answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interruption {
    /// The caller or server cancelled the operation.
    Cancelled,
    /// The operation ran past its deadline.
    DeadlineExceeded,
}

/// Raw error types that may carry Postgres failure details.
///
/// Each method is one explicit extraction; returning `None` or `false` simply
/// means the failure does not have that shape.
pub trait PostgresErrorSource {
    /// Whether this is the ORM-level duplicated-key marker.
    fn is_duplicated_key(&self) -> bool {
        false
    }

    /// Extract the server error, if the server produced one.
    fn pg_server_error(&self) -> Option<PgServerError<'_>>;

    /// Extract a cancellation or deadline expiry.
    fn interruption(&self) -> Option<Interruption> {
        None
    }
}

const fn sqlstate_for_kind(kind: &DatabaseErrorKind) -> Option<&'static str> {
    match kind {
        DatabaseErrorKind::UniqueViolation => Some(UNIQUE_VIOLATION),
        DatabaseErrorKind::ForeignKeyViolation => Some(FOREIGN_KEY_VIOLATION),
        DatabaseErrorKind::NotNullViolation => Some(NOT_NULL_VIOLATION),
        DatabaseErrorKind::CheckViolation => Some(CHECK_VIOLATION),
        DatabaseErrorKind::SerializationFailure => Some(SERIALIZATION_FAILURE),
        DatabaseErrorKind::ReadOnlyTransaction => Some(READ_ONLY_SQL_TRANSACTION),
        DatabaseErrorKind::ClosedConnection => Some(CONNECTION_FAILURE),
        _ => None,
    }
}

impl PostgresErrorSource for DieselError {
    fn pg_server_error(&self) -> Option<PgServerError<'_>> {
        let Self::DatabaseError(kind, info) = self else {
            return None;
        };
        let code = sqlstate_for_kind(kind)?;
        Some(PgServerError {
            code: Cow::Borrowed(code),
            constraint: info.constraint_name(),
        })
    }
}

impl PostgresErrorSource for sqlx::Error {
    fn pg_server_error(&self) -> Option<PgServerError<'_>> {
        let Self::Database(database) = self else {
            return None;
        };
        let postgres = database.try_downcast_ref::<PgDatabaseError>()?;
        Some(PgServerError {
            code: Cow::Borrowed(postgres.code()),
            constraint: postgres.constraint(),
        })
    }

    fn interruption(&self) -> Option<Interruption> {
        match self {
            Self::PoolTimedOut => Some(Interruption::DeadlineExceeded),
            _ => self
                .pg_server_error()
                .filter(|server| server.code == QUERY_CANCELED)
                .map(|_| Interruption::Cancelled),
        }
    }
}

/// Failure surfaced by a Postgres-backed repository before classification.
#[derive(Debug, Error)]
pub enum PostgresFailure {
    /// ORM-level marker for a duplicated key, raised without server details
    /// (e.g. when an `ON CONFLICT DO NOTHING` insert affects no rows).
    #[error("duplicated key")]
    DuplicatedKey,
    /// Server error reported by a driver without a dedicated integration.
    #[error("postgres error {code}: {message}")]
    Server {
        /// Five-character SQLSTATE.
        code: String,
        /// Violated constraint, if reported.
        constraint: Option<String>,
        /// Server message.
        message: String,
    },
    /// Diesel query failure.
    #[error(transparent)]
    Diesel(#[from] DieselError),
    /// SQLx query failure.
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    /// The operation was cancelled before completion.
    #[error("operation cancelled")]
    Cancelled,
    /// The operation ran past its deadline.
    #[error("operation deadline exceeded")]
    DeadlineExceeded,
}

impl From<tokio::time::error::Elapsed> for PostgresFailure {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        Self::DeadlineExceeded
    }
}

impl PostgresErrorSource for PostgresFailure {
    fn is_duplicated_key(&self) -> bool {
        matches!(self, Self::DuplicatedKey)
    }

    fn pg_server_error(&self) -> Option<PgServerError<'_>> {
        match self {
            Self::Server {
                code, constraint, ..
            } => Some(PgServerError {
                code: Cow::Borrowed(code.as_str()),
                constraint: constraint.as_deref(),
            }),
            Self::Diesel(error) => error.pg_server_error(),
            Self::Sqlx(error) => error.pg_server_error(),
            Self::DuplicatedKey | Self::Cancelled | Self::DeadlineExceeded => None,
        }
    }

    fn interruption(&self) -> Option<Interruption> {
        match self {
            Self::Cancelled => Some(Interruption::Cancelled),
            Self::DeadlineExceeded => Some(Interruption::DeadlineExceeded),
            Self::Server { code, .. } if code == QUERY_CANCELED => Some(Interruption::Cancelled),
            Self::Sqlx(error) => error.interruption(),
            Self::Diesel(error) => error.interruption(),
            Self::Server { .. } | Self::DuplicatedKey => None,
        }
    }
}

/// Classifier for Postgres-backed repositories.
///
/// Precedence: the duplicated-key marker first, then the SQLSTATE cases, then
/// cancellation or deadline expiry, then the database-query fallback.
///
/// # Examples
/// ```
/// use domain_errors::domain::DomainError;
/// use domain_errors::domain::ports::{DbErrorMapper, OverrideTable};
/// use domain_errors::outbound::persistence::{PostgresErrorMapper, PostgresFailure};
///
/// let mapper = PostgresErrorMapper::new(
///     OverrideTable::new().with("users_email_key", DomainError::DUPLICATE_EMAIL),
/// );
/// let raw = PostgresFailure::Server {
///     code: "23505".to_owned(),
///     constraint: Some("users_email_key".to_owned()),
///     message: "duplicate key value violates unique constraint".to_owned(),
/// };
/// assert_eq!(mapper.map(Some(&raw)), Some(DomainError::DUPLICATE_EMAIL));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PostgresErrorMapper {
    constraint_errors: OverrideTable,
}

impl PostgresErrorMapper {
    /// Build a classifier with constraint-name overrides for unique violations.
    #[must_use]
    pub const fn new(constraint_errors: OverrideTable) -> Self {
        Self { constraint_errors }
    }

    /// Overrides consulted for unique violations.
    #[must_use]
    pub const fn overrides(&self) -> &OverrideTable {
        &self.constraint_errors
    }

    fn classify_server_error(&self, error: &PgServerError<'_>) -> Option<DomainError> {
        match error.code.as_ref() {
            UNIQUE_VIOLATION => Some(
                error
                    .constraint
                    .and_then(|name| self.constraint_errors.get(name))
                    .cloned()
                    .unwrap_or(DomainError::CONFLICT),
            ),
            FOREIGN_KEY_VIOLATION => Some(DomainError::INVALID_RELATIONSHIP),
            NOT_NULL_VIOLATION => Some(DomainError::REQUIRED_FIELD),
            _ => None,
        }
    }
}

impl<E: PostgresErrorSource + ?Sized> DbErrorMapper<E> for PostgresErrorMapper {
    fn classify(&self, error: &E) -> DomainError {
        if error.is_duplicated_key() {
            debug!("postgres duplicated-key marker classified as conflict");
            return DomainError::CONFLICT;
        }

        let server_error = error.pg_server_error();
        if let Some(classified) = server_error
            .as_ref()
            .and_then(|server| self.classify_server_error(server))
        {
            debug!(
                sqlstate = server_error.as_ref().map(|server| server.code.as_ref()),
                code = classified.code(),
                "postgres error classified"
            );
            return classified;
        }

        if let Some(interruption) = error.interruption() {
            debug!(?interruption, "postgres operation interrupted");
            return DomainError::REQUEST_TIMEOUT;
        }

        debug!(
            sqlstate = server_error.as_ref().map(|server| server.code.as_ref()),
            "postgres failure unrecognised; using fallback"
        );
        DomainError::DATABASE_QUERY
    }
}
