//! Persistence error classification for MySQL and Postgres backends.
//!
//! # Architecture
//!
//! - **Explicit shapes**: each backend declares the structured failure it
//!   understands through an extraction trait ([`MySqlErrorSource`],
//!   [`PostgresErrorSource`]). Driver error types (`sqlx`, `diesel`) and the
//!   owned failure enums implement those traits, so classifiers never probe
//!   for concrete types.
//! - **Closed vocabulary**: classifiers only return catalog entries or values
//!   registered in their [`OverrideTable`](crate::domain::ports::OverrideTable).
//! - **Safe fallback**: anything unrecognised becomes
//!   `DATABASE_QUERY_ERROR`; the raw error is never passed on.
//!
//! # Example
//!
//! ```
//! use domain_errors::domain::DomainError;
//! use domain_errors::domain::ports::{DbErrorMapper, OverrideTable};
//! use domain_errors::outbound::persistence::{PostgresErrorMapper, PostgresFailure};
//!
//! let mapper = PostgresErrorMapper::new(OverrideTable::new());
//! assert_eq!(
//!     mapper.map(Some(&PostgresFailure::Cancelled)),
//!     Some(DomainError::REQUEST_TIMEOUT)
//! );
//! ```

mod mysql_error_mapping;
mod postgres_error_mapping;

pub use mysql_error_mapping::{
    ER_BAD_NULL_ERROR, ER_DUP_ENTRY, MySqlErrorMapper, MySqlErrorSource, MySqlFailure,
    MySqlServerError,
};
pub use postgres_error_mapping::{
    CHECK_VIOLATION, CONNECTION_FAILURE, FOREIGN_KEY_VIOLATION, Interruption, NOT_NULL_VIOLATION,
    PgServerError, PostgresErrorMapper, PostgresErrorSource, PostgresFailure, QUERY_CANCELED,
    READ_ONLY_SQL_TRANSACTION, SERIALIZATION_FAILURE, UNIQUE_VIOLATION,
};
