//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn any failure into a consistent `{code, message}` JSON
//! response with the status resolved by [`HttpStatusMapper`].

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use super::status::{DEFAULT_STATUS, HttpStatusMapper};
use crate::domain::DomainError;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// A domain error paired with its resolved HTTP status.
///
/// The domain error is also the `source()`, so an `ApiError` passed back
/// through [`HttpStatusMapper::status`] or [`write_error`] resolves the same.
///
/// # Examples
/// ```
/// use actix_web::ResponseError;
/// use actix_web::http::StatusCode;
/// use domain_errors::domain::DomainError;
/// use domain_errors::inbound::http::{ApiError, HttpStatusMapper};
///
/// let mapper = HttpStatusMapper::new();
/// let err = ApiError::from_error(&mapper, &DomainError::CONFLICT);
/// assert_eq!(err.status_code(), StatusCode::CONFLICT);
/// assert_eq!(err.body().code(), "CONFLICT");
/// ```
#[derive(Debug, Clone, thiserror::Error)]
#[error("{body}")]
pub struct ApiError {
    status: StatusCode,
    #[source]
    body: DomainError,
}

impl ApiError {
    /// Resolve `error` into the payload and status sent to clients.
    ///
    /// Errors without a [`DomainError`] in their source chain are logged and
    /// replaced by `INTERNAL_SERVER_ERROR` with the default status, so driver
    /// or framework details never reach the client.
    pub fn from_error(mapper: &HttpStatusMapper, error: &(dyn std::error::Error + 'static)) -> Self {
        match DomainError::find_in(error) {
            Some(domain) => Self {
                status: mapper.status_for(domain),
                body: domain.clone(),
            },
            None => {
                error!(error = %error, "non-domain error promoted to internal server error");
                Self {
                    status: DEFAULT_STATUS,
                    body: DomainError::INTERNAL_SERVER,
                }
            }
        }
    }

    /// Payload serialised into the response body.
    #[must_use]
    pub const fn body(&self) -> &DomainError {
        &self.body
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(&self.body)
    }
}

/// Build the error response for `error` in one call.
pub fn write_error(mapper: &HttpStatusMapper, error: &(dyn std::error::Error + 'static)) -> HttpResponse {
    ApiError::from_error(mapper, error).error_response()
}
