//! Status table mapping domain error codes to HTTP status codes.
//!
//! Purpose: resolve the transport status for any error through one table that
//! is built eagerly when the mapper is constructed and is read-only after
//! that. Construct one mapper at startup and share it by reference (or
//! `Arc`); there is no global instance.

use std::collections::HashMap;

use actix_web::http::StatusCode;

use crate::domain::DomainError;

/// Status returned for anything the table does not know.
pub const DEFAULT_STATUS: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

/// Status returned when there is no error at all.
pub const NO_ERROR_STATUS: StatusCode = StatusCode::OK;

/// Table of record from domain error code to HTTP status.
///
/// Registering a code twice keeps the later status. The default table relies
/// on this for `RECORD_LOCKED`, which is first grouped with the conflicts and
/// then pinned to `423 Locked`.
///
/// # Examples
/// ```
/// use actix_web::http::StatusCode;
/// use domain_errors::domain::DomainError;
/// use domain_errors::inbound::http::HttpStatusMapper;
///
/// let mapper = HttpStatusMapper::new();
/// assert_eq!(mapper.status(Some(&DomainError::NOT_FOUND)), StatusCode::NOT_FOUND);
/// assert_eq!(mapper.status_for_code("UNKNOWN"), StatusCode::INTERNAL_SERVER_ERROR);
/// assert_eq!(mapper.status(None), StatusCode::OK);
/// ```
#[derive(Debug, Clone)]
pub struct HttpStatusMapper {
    status_by_code: HashMap<String, StatusCode>,
}

impl Default for HttpStatusMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpStatusMapper {
    /// Build the mapper with the full default table.
    #[must_use]
    pub fn new() -> Self {
        let mut mapper = Self {
            status_by_code: HashMap::new(),
        };
        mapper.register_defaults();
        mapper
    }

    /// Register an extra code, e.g. an ad hoc deployment error.
    ///
    /// Later registrations replace earlier ones, including defaults.
    #[must_use]
    pub fn with(mut self, error: &DomainError, status: StatusCode) -> Self {
        self.register(error, status);
        self
    }

    fn register(&mut self, error: &DomainError, status: StatusCode) {
        self.status_by_code.insert(error.code().to_owned(), status);
    }

    fn register_all(&mut self, errors: &[DomainError], status: StatusCode) {
        for error in errors {
            self.register(error, status);
        }
    }

    fn register_defaults(&mut self) {
        // 400: validation and malformed input
        self.register_all(
            &[
                DomainError::INVALID_INPUT,
                DomainError::INVALID_EMAIL,
                DomainError::INVALID_CPF,
                DomainError::INVALID_CNPJ,
                DomainError::INVALID_PHONE,
                DomainError::INVALID_DATE,
                DomainError::INVALID_CURRENCY,
                DomainError::REQUIRED_FIELD,
            ],
            StatusCode::BAD_REQUEST,
        );

        // 401 / 403
        self.register_all(
            &[
                DomainError::UNAUTHORIZED,
                DomainError::INVALID_CREDENTIALS,
                DomainError::TOKEN_INVALID,
                DomainError::TOKEN_EXPIRED,
                DomainError::SESSION_EXPIRED,
            ],
            StatusCode::UNAUTHORIZED,
        );
        self.register_all(
            &[DomainError::FORBIDDEN, DomainError::INSUFFICIENT_PERMISSIONS],
            StatusCode::FORBIDDEN,
        );

        // 402 / 422: financial rules
        self.register_all(
            &[
                DomainError::INSUFFICIENT_BALANCE,
                DomainError::CREDIT_LIMIT_EXCEEDED,
            ],
            StatusCode::PAYMENT_REQUIRED,
        );
        self.register_all(
            &[
                DomainError::PAYMENT_OVERDUE,
                DomainError::PAYMENT_FAILED,
                DomainError::INVOICE_NOT_PAID,
            ],
            StatusCode::UNPROCESSABLE_ENTITY,
        );

        // 404
        self.register_all(
            &[
                DomainError::NOT_FOUND,
                DomainError::FILE_NOT_FOUND,
                DomainError::CUSTOMER_NOT_ACTIVE,
            ],
            StatusCode::NOT_FOUND,
        );

        // 409: duplicates, clashing state, records in use
        self.register_all(
            &[
                DomainError::CONFLICT,
                DomainError::DUPLICATE_EMAIL,
                DomainError::DUPLICATE_CPF,
                DomainError::DUPLICATE_CNPJ,
                DomainError::DUPLICATE_LEAD,
                DomainError::STATUS_CONFLICT,
                DomainError::RECORD_LOCKED,
                DomainError::RECORD_IN_USE,
                DomainError::DUPLICATE_REQUEST,
                DomainError::IDEMPOTENCY_KEY_USED,
                DomainError::IDEMPOTENCY_CONFLICT,
                DomainError::CONCURRENT_MODIFICATION,
                DomainError::OPTIMISTIC_LOCK_FAILED,
                DomainError::DEPENDENCY_EXISTS,
                DomainError::LEAD_ALREADY_CONVERTED,
            ],
            StatusCode::CONFLICT,
        );

        // 410 / 422: removal, lifecycle and relationship rules
        self.register_all(
            &[DomainError::RESOURCE_GONE, DomainError::RESOURCE_ARCHIVED],
            StatusCode::GONE,
        );
        self.register_all(
            &[
                DomainError::INVALID_STATUS,
                DomainError::ORPHAN_RECORD,
                DomainError::CIRCULAR_REFERENCE,
                DomainError::INVALID_RELATIONSHIP,
                DomainError::INVALID_LEAD_STATUS,
                DomainError::CONTRACT_EXPIRED,
                DomainError::CONTRACT_NOT_ACTIVE,
                DomainError::MODULE_NOT_CONTRACTED,
                DomainError::ACCOUNT_SUSPENDED,
                DomainError::ACCOUNT_INACTIVE,
                DomainError::COMPANY_SUSPENDED,
            ],
            StatusCode::UNPROCESSABLE_ENTITY,
        );

        // 413 / 415: files
        self.register(&DomainError::FILE_TOO_LARGE, StatusCode::PAYLOAD_TOO_LARGE);
        self.register(
            &DomainError::INVALID_FILE_TYPE,
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
        );
        self.register(
            &DomainError::FILE_UPLOAD_FAILED,
            StatusCode::INTERNAL_SERVER_ERROR,
        );

        // protocol-level
        self.register(
            &DomainError::METHOD_NOT_ALLOWED,
            StatusCode::METHOD_NOT_ALLOWED,
        );
        self.register(&DomainError::NOT_ACCEPTABLE, StatusCode::NOT_ACCEPTABLE);
        self.register(&DomainError::REQUEST_TIMEOUT, StatusCode::REQUEST_TIMEOUT);
        self.register(
            &DomainError::UNSUPPORTED_MEDIA_TYPE,
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
        );
        self.register(
            &DomainError::EXPECTATION_FAILED,
            StatusCode::EXPECTATION_FAILED,
        );

        // 412
        self.register_all(
            &[DomainError::PRECONDITION_FAILED, DomainError::ETAG_MISMATCH],
            StatusCode::PRECONDITION_FAILED,
        );

        // 423: overrides the 409 above
        self.register(&DomainError::RECORD_LOCKED, StatusCode::LOCKED);

        // 424 / 429 / 451
        self.register(&DomainError::FAILED_DEPENDENCY, StatusCode::FAILED_DEPENDENCY);
        self.register_all(
            &[
                DomainError::RATE_LIMIT_EXCEEDED,
                DomainError::QUOTA_EXCEEDED,
                DomainError::MAX_ATTEMPTS_EXCEEDED,
            ],
            StatusCode::TOO_MANY_REQUESTS,
        );
        self.register(
            &DomainError::UNAVAILABLE_FOR_LEGAL_REASONS,
            StatusCode::UNAVAILABLE_FOR_LEGAL_REASONS,
        );

        // 5xx: internal, database and upstream failures
        self.register_all(
            &[
                DomainError::INTERNAL_SERVER,
                DomainError::DATABASE_CONNECTION,
                DomainError::DATABASE_QUERY,
            ],
            StatusCode::INTERNAL_SERVER_ERROR,
        );
        self.register(&DomainError::THIRD_PARTY_API_ERROR, StatusCode::BAD_GATEWAY);
        self.register_all(
            &[
                DomainError::EXTERNAL_SERVICE_UNAVAILABLE,
                DomainError::SERVICE_UNAVAILABLE,
            ],
            StatusCode::SERVICE_UNAVAILABLE,
        );
        self.register(
            &DomainError::EXTERNAL_SERVICE_TIMEOUT,
            StatusCode::GATEWAY_TIMEOUT,
        );
    }

    /// Resolve the status for an optional error.
    ///
    /// - `None` is success: [`NO_ERROR_STATUS`].
    /// - An error with no [`DomainError`] in its source chain, or a domain
    ///   error whose code is not registered: [`DEFAULT_STATUS`].
    /// - Otherwise the registered status.
    #[must_use]
    pub fn status(&self, error: Option<&(dyn std::error::Error + 'static)>) -> StatusCode {
        let Some(error) = error else {
            return NO_ERROR_STATUS;
        };
        DomainError::find_in(error).map_or(DEFAULT_STATUS, |domain| self.status_for(domain))
    }

    /// Resolve the status for a domain error.
    #[must_use]
    pub fn status_for(&self, error: &DomainError) -> StatusCode {
        self.status_for_code(error.code())
    }

    /// Resolve the status for a raw code string.
    #[must_use]
    pub fn status_for_code(&self, code: &str) -> StatusCode {
        self.status_by_code
            .get(code)
            .copied()
            .unwrap_or(DEFAULT_STATUS)
    }

    /// Whether `code` has a registered status.
    #[must_use]
    pub fn is_registered(&self, code: &str) -> bool {
        self.status_by_code.contains_key(code)
    }

    /// Registered codes in lexicographic order.
    #[must_use]
    pub fn registered_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.status_by_code.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    /// Number of distinct registered codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.status_by_code.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status_by_code.is_empty()
    }
}
