//! HTTP inbound adapter: status resolution and error responses.

pub mod error;
pub mod status;

pub use error::{ApiError, ApiResult, write_error};
pub use status::{DEFAULT_STATUS, HttpStatusMapper, NO_ERROR_STATUS};
