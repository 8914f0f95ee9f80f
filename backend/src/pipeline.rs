//! Wiring of classifiers and the status table into one shareable unit.
//!
//! Repositories classify driver failures with the backend mapper for their
//! database; handlers then resolve the status with the shared table. The
//! pipeline owns one of each so services construct everything in one place.

use std::sync::Arc;

use actix_web::http::StatusCode;
use tracing::info;

use crate::domain::DomainError;
use crate::domain::ports::DbErrorMapper;
use crate::inbound::http::HttpStatusMapper;
use crate::outbound::persistence::{
    MySqlErrorMapper, MySqlErrorSource, PostgresErrorMapper, PostgresErrorSource,
};
use crate::settings::{ErrorMappingSettings, OverrideTables, SettingsError};

/// Classifiers and status table built once at startup.
///
/// Cloning is cheap; every clone shares the same tables.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use domain_errors::domain::DomainError;
/// use domain_errors::outbound::persistence::{ER_BAD_NULL_ERROR, MySqlFailure};
/// use domain_errors::pipeline::ErrorPipeline;
/// use domain_errors::settings::OverrideTables;
///
/// let pipeline = ErrorPipeline::new(OverrideTables::default());
/// let raw = MySqlFailure::Server {
///     number: ER_BAD_NULL_ERROR,
///     message: "Column 'name' cannot be null".to_owned(),
/// };
/// assert_eq!(
///     pipeline.resolve_mysql(Some(&raw)),
///     Some((DomainError::REQUIRED_FIELD, StatusCode::BAD_REQUEST))
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ErrorPipeline {
    mysql: Arc<MySqlErrorMapper>,
    postgres: Arc<PostgresErrorMapper>,
    statuses: Arc<HttpStatusMapper>,
}

impl ErrorPipeline {
    /// Build the pipeline from already validated override tables.
    #[must_use]
    pub fn new(overrides: OverrideTables) -> Self {
        let OverrideTables { mysql, postgres } = overrides;
        Self {
            mysql: Arc::new(MySqlErrorMapper::new(mysql)),
            postgres: Arc::new(PostgresErrorMapper::new(postgres)),
            statuses: Arc::new(HttpStatusMapper::new()),
        }
    }

    /// Build the pipeline from loaded settings.
    pub fn from_settings(settings: &ErrorMappingSettings) -> Result<Self, SettingsError> {
        let pipeline = Self::new(settings.override_tables()?);
        info!(
            mysql_overrides = pipeline.mysql.overrides().len(),
            postgres_overrides = pipeline.postgres.overrides().len(),
            statuses = pipeline.statuses.len(),
            "error pipeline ready"
        );
        Ok(pipeline)
    }

    /// MySQL classifier.
    #[must_use]
    pub fn mysql(&self) -> &MySqlErrorMapper {
        &self.mysql
    }

    /// Postgres classifier.
    #[must_use]
    pub fn postgres(&self) -> &PostgresErrorMapper {
        &self.postgres
    }

    /// Shared status table.
    #[must_use]
    pub fn statuses(&self) -> &HttpStatusMapper {
        &self.statuses
    }

    /// Classify a MySQL failure and resolve its status.
    #[must_use]
    pub fn resolve_mysql<E>(&self, error: Option<&E>) -> Option<(DomainError, StatusCode)>
    where
        E: MySqlErrorSource + ?Sized,
    {
        self.mysql.map(error).map(|domain| self.with_status(domain))
    }

    /// Classify a Postgres failure and resolve its status.
    #[must_use]
    pub fn resolve_postgres<E>(&self, error: Option<&E>) -> Option<(DomainError, StatusCode)>
    where
        E: PostgresErrorSource + ?Sized,
    {
        self.postgres
            .map(error)
            .map(|domain| self.with_status(domain))
    }

    fn with_status(&self, domain: DomainError) -> (DomainError, StatusCode) {
        let status = self.statuses.status_for(&domain);
        (domain, status)
    }
}

impl Default for ErrorPipeline {
    fn default() -> Self {
        Self::new(OverrideTables::default())
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for pipeline wiring.

    use super::*;
    use std::io::Write;

    use rstest::{fixture, rstest};

    use crate::domain::ports::OverrideTable;
    use crate::outbound::persistence::{ER_DUP_ENTRY, MySqlFailure, PostgresFailure};

    #[fixture]
    fn pipeline() -> ErrorPipeline {
        ErrorPipeline::new(OverrideTables {
            mysql: OverrideTable::new().with("idx_email", DomainError::DUPLICATE_EMAIL),
            postgres: OverrideTable::new().with("users_cpf_key", DomainError::DUPLICATE_CPF),
        })
    }

    #[rstest]
    fn absent_errors_resolve_to_none(pipeline: ErrorPipeline) {
        assert_eq!(pipeline.resolve_mysql(None::<&MySqlFailure>), None);
        assert_eq!(pipeline.resolve_postgres(None::<&PostgresFailure>), None);
    }

    #[rstest]
    fn mysql_override_resolves_with_conflict_status(pipeline: ErrorPipeline) {
        let raw = MySqlFailure::Server {
            number: ER_DUP_ENTRY,
            message: "Duplicate entry 'a@b.c' for key 'idx_email'".to_owned(),
        };
        assert_eq!(
            pipeline.resolve_mysql(Some(&raw)),
            Some((DomainError::DUPLICATE_EMAIL, StatusCode::CONFLICT))
        );
    }

    #[rstest]
    #[case(PostgresFailure::DuplicatedKey, DomainError::CONFLICT, StatusCode::CONFLICT)]
    #[case(
        PostgresFailure::Server {
            code: "23505".to_owned(),
            constraint: Some("users_cpf_key".to_owned()),
            message: "duplicate key".to_owned(),
        },
        DomainError::DUPLICATE_CPF,
        StatusCode::CONFLICT
    )]
    #[case(
        PostgresFailure::Server {
            code: "23503".to_owned(),
            constraint: None,
            message: "violates foreign key".to_owned(),
        },
        DomainError::INVALID_RELATIONSHIP,
        StatusCode::UNPROCESSABLE_ENTITY
    )]
    #[case(
        PostgresFailure::DeadlineExceeded,
        DomainError::REQUEST_TIMEOUT,
        StatusCode::REQUEST_TIMEOUT
    )]
    #[case(
        PostgresFailure::Sqlx(sqlx::Error::RowNotFound),
        DomainError::DATABASE_QUERY,
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    fn postgres_failures_resolve_end_to_end(
        pipeline: ErrorPipeline,
        #[case] raw: PostgresFailure,
        #[case] expected: DomainError,
        #[case] status: StatusCode,
    ) {
        assert_eq!(
            pipeline.resolve_postgres(Some(&raw)),
            Some((expected, status))
        );
    }

    #[rstest]
    fn clones_share_tables(pipeline: ErrorPipeline) {
        let clone = pipeline.clone();
        assert!(Arc::ptr_eq(&pipeline.statuses, &clone.statuses));
        assert!(Arc::ptr_eq(&pipeline.mysql, &clone.mysql));
        assert_eq!(clone.postgres().overrides().len(), 1);
    }

    #[rstest]
    fn from_settings_reads_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(br#"{ "postgres": { "leads_email_key": "DUPLICATE_LEAD" } }"#)
            .expect("write overrides");
        let settings = ErrorMappingSettings {
            overrides_path: Some(file.path().to_path_buf()),
            reject_overlapping_keys: false,
        };

        let pipeline = ErrorPipeline::from_settings(&settings).expect("pipeline builds");
        assert_eq!(
            pipeline.postgres().overrides().get("leads_email_key"),
            Some(&DomainError::DUPLICATE_LEAD)
        );
        assert!(pipeline.mysql().overrides().is_empty());
    }

    #[rstest]
    fn from_settings_surfaces_invalid_overrides() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(br#"{ "mysql": { "idx": "NOT_A_CODE" } }"#)
            .expect("write overrides");
        let settings = ErrorMappingSettings {
            overrides_path: Some(file.path().to_path_buf()),
            reject_overlapping_keys: false,
        };

        let result = ErrorPipeline::from_settings(&settings);
        assert!(matches!(result, Err(SettingsError::UnknownCode { .. })));
    }
}
