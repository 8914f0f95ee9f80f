//! MySQL error classification.
//!
//! MySQL reports failures as numeric server error numbers with a free-text
//! message. The violated index of a duplicate-entry failure only appears
//! inside that message, so overrides are matched by substring.

use sqlx::mysql::MySqlDatabaseError;
use thiserror::Error;
use tracing::debug;

use crate::domain::DomainError;
use crate::domain::ports::{DbErrorMapper, OverrideTable};

/// `ER_DUP_ENTRY`: duplicate entry for a unique key.
pub const ER_DUP_ENTRY: u16 = 1062;
/// `ER_BAD_NULL_ERROR`: column cannot be null.
pub const ER_BAD_NULL_ERROR: u16 = 1048;

/// Structured view of a MySQL server error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MySqlServerError<'a> {
    /// Server error number, e.g. [`ER_DUP_ENTRY`].
    pub number: u16,
    /// Free-text server message.
    pub message: &'a str,
}

/// Raw error types that may carry a MySQL server error.
pub trait MySqlErrorSource {
    /// Extract the server error, if this failure came from the server.
    fn mysql_server_error(&self) -> Option<MySqlServerError<'_>>;
}

impl MySqlErrorSource for sqlx::Error {
    fn mysql_server_error(&self) -> Option<MySqlServerError<'_>> {
        let Self::Database(database) = self else {
            return None;
        };
        let mysql = database.try_downcast_ref::<MySqlDatabaseError>()?;
        Some(MySqlServerError {
            number: mysql.number(),
            message: mysql.message(),
        })
    }
}

/// Owned MySQL failure for drivers without a dedicated integration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MySqlFailure {
    /// The server rejected the statement.
    #[error("mysql server error {number}: {message}")]
    Server {
        /// Server error number.
        number: u16,
        /// Free-text server message.
        message: String,
    },
    /// The failure happened client side (I/O, protocol, pool).
    #[error("mysql client error: {0}")]
    Client(String),
}

impl MySqlErrorSource for MySqlFailure {
    fn mysql_server_error(&self) -> Option<MySqlServerError<'_>> {
        match self {
            Self::Server { number, message } => Some(MySqlServerError {
                number: *number,
                message: message.as_str(),
            }),
            Self::Client(_) => None,
        }
    }
}

/// Classifier for MySQL-backed repositories.
///
/// # Examples
/// ```
/// use domain_errors::domain::DomainError;
/// use domain_errors::domain::ports::{DbErrorMapper, OverrideTable};
/// use domain_errors::outbound::persistence::{ER_DUP_ENTRY, MySqlErrorMapper, MySqlFailure};
///
/// let mapper = MySqlErrorMapper::new(
///     OverrideTable::new().with("idx_email", DomainError::DUPLICATE_EMAIL),
/// );
/// let raw = MySqlFailure::Server {
///     number: ER_DUP_ENTRY,
///     message: "Duplicate entry 'a@b.c' for key 'idx_email'".to_owned(),
/// };
/// assert_eq!(mapper.map(Some(&raw)), Some(DomainError::DUPLICATE_EMAIL));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MySqlErrorMapper {
    duplicate_index_errors: OverrideTable,
}

impl MySqlErrorMapper {
    /// Build a classifier with index-name overrides for duplicate entries.
    #[must_use]
    pub const fn new(duplicate_index_errors: OverrideTable) -> Self {
        Self {
            duplicate_index_errors,
        }
    }

    /// Overrides consulted for duplicate-entry failures.
    #[must_use]
    pub const fn overrides(&self) -> &OverrideTable {
        &self.duplicate_index_errors
    }

    fn classify_server_error(&self, error: MySqlServerError<'_>) -> DomainError {
        match error.number {
            ER_DUP_ENTRY => self
                .duplicate_index_errors
                .find_contained_in(error.message)
                .cloned()
                .unwrap_or(DomainError::CONFLICT),
            ER_BAD_NULL_ERROR => DomainError::REQUIRED_FIELD,
            _ => DomainError::DATABASE_QUERY,
        }
    }
}

impl<E: MySqlErrorSource + ?Sized> DbErrorMapper<E> for MySqlErrorMapper {
    fn classify(&self, error: &E) -> DomainError {
        let Some(server_error) = error.mysql_server_error() else {
            debug!("mysql failure without server error; using fallback");
            return DomainError::DATABASE_QUERY;
        };
        let classified = self.classify_server_error(server_error);
        debug!(
            number = server_error.number,
            code = classified.code(),
            "mysql error classified"
        );
        classified
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for MySQL classification.

    use super::*;
    use rstest::{fixture, rstest};

    fn server(number: u16, message: &str) -> MySqlFailure {
        MySqlFailure::Server {
            number,
            message: message.to_owned(),
        }
    }

    #[fixture]
    fn mapper() -> MySqlErrorMapper {
        MySqlErrorMapper::new(
            OverrideTable::new()
                .with("idx_email", DomainError::DUPLICATE_EMAIL)
                .with("idx_cpf", DomainError::DUPLICATE_CPF),
        )
    }

    #[rstest]
    fn absent_error_maps_to_none(mapper: MySqlErrorMapper) {
        assert_eq!(mapper.map(None::<&MySqlFailure>), None);
        assert_eq!(mapper.map(None::<&sqlx::Error>), None);
    }

    #[rstest]
    #[case("Duplicate entry 'a@b.c' for key 'users.idx_email'", "DUPLICATE_EMAIL")]
    #[case("Duplicate entry '123' for key 'idx_cpf'", "DUPLICATE_CPF")]
    #[case("Duplicate entry 'x' for key 'idx_other'", "CONFLICT")]
    fn duplicate_entry_consults_overrides(
        mapper: MySqlErrorMapper,
        #[case] message: &str,
        #[case] expected: &str,
    ) {
        let classified = mapper.classify(&server(ER_DUP_ENTRY, message));
        assert_eq!(classified.code(), expected);
    }

    #[rstest]
    fn duplicate_entry_without_overrides_is_conflict() {
        let mapper = MySqlErrorMapper::default();
        let raw = server(ER_DUP_ENTRY, "Duplicate entry 'x' for key 'idx_email'");
        assert_eq!(mapper.classify(&raw), DomainError::CONFLICT);
    }

    #[rstest]
    fn null_column_is_required_field_regardless_of_overrides(mapper: MySqlErrorMapper) {
        let raw = server(ER_BAD_NULL_ERROR, "Column 'idx_email' cannot be null");
        assert_eq!(mapper.classify(&raw), DomainError::REQUIRED_FIELD);
    }

    #[rstest]
    #[case(server(1213, "Deadlock found when trying to get lock"))]
    #[case(server(1452, "Cannot add or update a child row"))]
    #[case(MySqlFailure::Client("connection reset".to_owned()))]
    fn unrecognised_failures_fall_back_to_database_query(
        mapper: MySqlErrorMapper,
        #[case] raw: MySqlFailure,
    ) {
        assert_eq!(mapper.classify(&raw), DomainError::DATABASE_QUERY);
    }

    #[rstest]
    fn sqlx_errors_without_server_details_fall_back(mapper: MySqlErrorMapper) {
        let classified = mapper.classify(&sqlx::Error::RowNotFound);
        assert_eq!(classified, DomainError::DATABASE_QUERY);
        assert_eq!(
            mapper.map(Some(&sqlx::Error::PoolTimedOut)),
            Some(DomainError::DATABASE_QUERY)
        );
    }
}
