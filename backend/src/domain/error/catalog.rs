//! The closed catalog of domain errors.
//!
//! Every entry is declared once as an associated constant on
//! [`DomainError`] and listed once in [`catalog`] together with its
//! taxonomy group. Codes are part of the public contract: never reuse a code
//! for a different meaning, and never change an existing one.

use serde::Serialize;

use super::DomainError;

/// Taxonomy group of a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorGroup {
    /// Malformed or invalid input.
    Validation,
    /// Missing or clashing records.
    Resource,
    /// Authentication and authorisation failures.
    Auth,
    /// Financial business rules.
    Financial,
    /// Lifecycle and status rules.
    State,
    /// Idempotency and concurrent modification.
    Concurrency,
    /// Rate limits and quotas.
    RateLimit,
    /// Failures of third-party systems.
    ExternalIntegration,
    /// Broken or blocking relationships between records.
    Relationship,
    /// Domain-specific business rules (CRM).
    Business,
    /// File handling and uploads.
    File,
    /// HTTP protocol negotiation.
    Protocol,
    /// Preconditions and resource versioning.
    Precondition,
    /// Removed or archived resources.
    Removal,
    /// Failed dependencies and legal restrictions.
    Compliance,
    /// Internal and infrastructure failures.
    System,
}

/// A catalog entry: one domain error and the group it belongs to.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    group: ErrorGroup,
    error: DomainError,
}

impl CatalogEntry {
    const fn new(group: ErrorGroup, error: DomainError) -> Self {
        Self { group, error }
    }

    /// Taxonomy group of the entry.
    #[must_use]
    pub const fn group(&self) -> ErrorGroup {
        self.group
    }

    /// The catalog error itself.
    #[must_use]
    pub const fn error(&self) -> &DomainError {
        &self.error
    }
}

macro_rules! domain_errors {
    ($( $group:ident { $( $(#[$meta:meta])* $name:ident = ($code:literal, $message:literal); )+ } )+) => {
        impl DomainError {
            $($(
                $(#[$meta])*
                pub const $name: Self = Self::from_static($code, $message);
            )+)+
        }

        static CATALOG: &[CatalogEntry] = &[
            $($(CatalogEntry::new(ErrorGroup::$group, DomainError::$name),)+)+
        ];
    };
}

domain_errors! {
    Validation {
        /// Generic input validation failure.
        INVALID_INPUT = ("INVALID_INPUT", "Invalid input");
        /// Malformed e-mail address.
        INVALID_EMAIL = ("INVALID_EMAIL", "Invalid email");
        /// Malformed individual taxpayer number (CPF).
        INVALID_CPF = ("INVALID_CPF", "Invalid CPF");
        /// Malformed company taxpayer number (CNPJ).
        INVALID_CNPJ = ("INVALID_CNPJ", "Invalid CNPJ");
        /// Malformed phone number.
        INVALID_PHONE = ("INVALID_PHONE", "Invalid phone number");
        /// Malformed or out-of-range date.
        INVALID_DATE = ("INVALID_DATE", "Invalid date");
        /// Malformed monetary amount.
        INVALID_CURRENCY = ("INVALID_CURRENCY", "Invalid monetary amount");
        /// A mandatory field was not provided.
        REQUIRED_FIELD = ("REQUIRED_FIELD", "Required field not provided");
    }
    Resource {
        /// The record does not exist.
        NOT_FOUND = ("NOT_FOUND", "Record not found");
        /// Generic uniqueness clash.
        CONFLICT = ("CONFLICT", "Record already exists");
        /// E-mail address already registered.
        DUPLICATE_EMAIL = ("DUPLICATE_EMAIL", "Email already registered");
        /// CPF already registered.
        DUPLICATE_CPF = ("DUPLICATE_CPF", "CPF already registered");
        /// CNPJ already registered.
        DUPLICATE_CNPJ = ("DUPLICATE_CNPJ", "CNPJ already registered");
        /// The record is locked for editing.
        RECORD_LOCKED = ("RECORD_LOCKED", "Record locked for editing");
        /// The record is referenced and cannot be deleted.
        RECORD_IN_USE = ("RECORD_IN_USE", "Record in use and cannot be deleted");
    }
    Auth {
        /// Missing or rejected authentication.
        UNAUTHORIZED = ("UNAUTHORIZED", "Unauthorized");
        /// Authenticated but not allowed.
        FORBIDDEN = ("FORBIDDEN", "Access denied");
        /// Wrong username or password.
        INVALID_CREDENTIALS = ("INVALID_CREDENTIALS", "Invalid credentials");
        /// The session is no longer valid.
        SESSION_EXPIRED = ("SESSION_EXPIRED", "Session expired");
        /// The token is malformed or has a bad signature.
        TOKEN_INVALID = ("TOKEN_INVALID", "Invalid token");
        /// The token is past its expiry.
        TOKEN_EXPIRED = ("TOKEN_EXPIRED", "Token expired");
        /// The caller lacks a required permission.
        INSUFFICIENT_PERMISSIONS = ("INSUFFICIENT_PERMISSIONS", "Insufficient permissions");
    }
    Financial {
        /// Balance does not cover the operation.
        INSUFFICIENT_BALANCE = ("INSUFFICIENT_BALANCE", "Insufficient balance");
        /// A payment is past due.
        PAYMENT_OVERDUE = ("PAYMENT_OVERDUE", "Payment overdue");
        /// The payment was declined or failed.
        PAYMENT_FAILED = ("PAYMENT_FAILED", "Payment failed");
        /// The invoice has not been paid.
        INVOICE_NOT_PAID = ("INVOICE_NOT_PAID", "Invoice not paid");
        /// The credit limit would be exceeded.
        CREDIT_LIMIT_EXCEEDED = ("CREDIT_LIMIT_EXCEEDED", "Credit limit exceeded");
    }
    State {
        /// The current status does not allow the operation.
        INVALID_STATUS = ("INVALID_STATUS", "Invalid status for operation");
        /// Two status transitions clash.
        STATUS_CONFLICT = ("STATUS_CONFLICT", "Status conflict");
        /// The account is suspended.
        ACCOUNT_SUSPENDED = ("ACCOUNT_SUSPENDED", "Account suspended");
        /// The account is inactive.
        ACCOUNT_INACTIVE = ("ACCOUNT_INACTIVE", "Account inactive");
        /// The company is suspended for non-payment.
        COMPANY_SUSPENDED = ("COMPANY_SUSPENDED", "Company suspended for non-payment");
    }
    Concurrency {
        /// The same request was already processed.
        DUPLICATE_REQUEST = ("DUPLICATE_REQUEST", "Duplicate request");
        /// The idempotency key has already been consumed.
        IDEMPOTENCY_KEY_USED = ("IDEMPOTENCY_KEY_USED", "Idempotency key already used");
        /// The idempotency key was reused for a different operation.
        IDEMPOTENCY_CONFLICT = (
            "IDEMPOTENCY_CONFLICT",
            "Idempotency conflict: different operation with the same key"
        );
        /// Someone else modified the record first.
        CONCURRENT_MODIFICATION = ("CONCURRENT_MODIFICATION", "Record modified by another user");
        /// Optimistic version check failed.
        OPTIMISTIC_LOCK_FAILED = ("OPTIMISTIC_LOCK_FAILED", "Optimistic concurrency control failed");
    }
    RateLimit {
        /// Too many requests in the current window.
        RATE_LIMIT_EXCEEDED = ("RATE_LIMIT_EXCEEDED", "Request limit exceeded");
        /// A usage quota is exhausted.
        QUOTA_EXCEEDED = ("QUOTA_EXCEEDED", "Quota exceeded");
        /// Too many attempts for the operation.
        MAX_ATTEMPTS_EXCEEDED = ("MAX_ATTEMPTS_EXCEEDED", "Maximum number of attempts exceeded");
    }
    ExternalIntegration {
        /// A required external service is down.
        EXTERNAL_SERVICE_UNAVAILABLE = ("EXTERNAL_SERVICE_UNAVAILABLE", "External service unavailable");
        /// An external service did not answer in time.
        EXTERNAL_SERVICE_TIMEOUT = ("EXTERNAL_SERVICE_TIMEOUT", "External service timeout");
        /// A third-party API answered with an error.
        THIRD_PARTY_API_ERROR = ("THIRD_PARTY_API_ERROR", "Third-party API error");
    }
    Relationship {
        /// A mandatory relationship is missing.
        ORPHAN_RECORD = ("ORPHAN_RECORD", "Orphan record: required relationship missing");
        /// The relationship graph would contain a cycle.
        CIRCULAR_REFERENCE = ("CIRCULAR_REFERENCE", "Circular reference detected");
        /// A referenced record does not exist or may not be linked.
        INVALID_RELATIONSHIP = ("INVALID_RELATIONSHIP", "Invalid relationship");
        /// Dependent records prevent deletion.
        DEPENDENCY_EXISTS = ("DEPENDENCY_EXISTS", "Cannot delete: dependencies exist");
    }
    Business {
        /// The lead has already become a customer.
        LEAD_ALREADY_CONVERTED = ("LEAD_ALREADY_CONVERTED", "Lead already converted to customer");
        /// The lead status does not allow the operation.
        INVALID_LEAD_STATUS = ("INVALID_LEAD_STATUS", "Lead status does not allow this operation");
        /// The lead already exists.
        DUPLICATE_LEAD = ("DUPLICATE_LEAD", "Duplicate lead");
        /// The customer is not active.
        CUSTOMER_NOT_ACTIVE = ("CUSTOMER_NOT_ACTIVE", "Customer is not active");
        /// The contract has expired.
        CONTRACT_EXPIRED = ("CONTRACT_EXPIRED", "Contract expired");
        /// The contract is not active.
        CONTRACT_NOT_ACTIVE = ("CONTRACT_NOT_ACTIVE", "Contract is not active");
        /// The company has not contracted the module.
        MODULE_NOT_CONTRACTED = ("MODULE_NOT_CONTRACTED", "Module not contracted by the company");
    }
    File {
        /// The upload exceeds the size limit.
        FILE_TOO_LARGE = ("FILE_TOO_LARGE", "File too large");
        /// The file type is not accepted.
        INVALID_FILE_TYPE = ("INVALID_FILE_TYPE", "Invalid file type");
        /// Storing the upload failed.
        FILE_UPLOAD_FAILED = ("FILE_UPLOAD_FAILED", "File upload failed");
        /// The file does not exist.
        FILE_NOT_FOUND = ("FILE_NOT_FOUND", "File not found");
    }
    Protocol {
        /// The HTTP method is not supported by the resource.
        METHOD_NOT_ALLOWED = ("METHOD_NOT_ALLOWED", "HTTP method not allowed");
        /// No acceptable response representation.
        NOT_ACCEPTABLE = ("NOT_ACCEPTABLE", "Response format not supported");
        /// The request took too long.
        REQUEST_TIMEOUT = ("REQUEST_TIMEOUT", "Request timed out");
        /// The request body media type is not supported.
        UNSUPPORTED_MEDIA_TYPE = ("UNSUPPORTED_MEDIA_TYPE", "Unsupported media type");
        /// The `Expect` header cannot be met.
        EXPECTATION_FAILED = ("EXPECTATION_FAILED", "Expectation failed");
    }
    Precondition {
        /// A request precondition did not hold.
        PRECONDITION_FAILED = ("PRECONDITION_FAILED", "Precondition failed");
        /// The entity tag no longer matches.
        ETAG_MISMATCH = ("ETAG_MISMATCH", "ETag mismatch: resource was modified");
    }
    Removal {
        /// The resource was permanently removed.
        RESOURCE_GONE = ("RESOURCE_GONE", "Resource permanently removed");
        /// The resource was archived.
        RESOURCE_ARCHIVED = ("RESOURCE_ARCHIVED", "Resource archived");
    }
    Compliance {
        /// A required dependency failed.
        FAILED_DEPENDENCY = ("FAILED_DEPENDENCY", "Required dependency failed");
        /// Access is blocked for legal reasons.
        UNAVAILABLE_FOR_LEGAL_REASONS = ("UNAVAILABLE_FOR_LEGAL_REASONS", "Unavailable for legal reasons");
    }
    System {
        /// Unexpected internal failure.
        INTERNAL_SERVER = ("INTERNAL_SERVER_ERROR", "Internal server error");
        /// The database could not be reached.
        DATABASE_CONNECTION = ("DATABASE_CONNECTION_ERROR", "Database connection error");
        /// A database statement failed. Universal fallback of the classifiers.
        DATABASE_QUERY = ("DATABASE_QUERY_ERROR", "Database query failed");
        /// The service is temporarily unavailable.
        SERVICE_UNAVAILABLE = ("SERVICE_UNAVAILABLE", "Service temporarily unavailable");
    }
}

/// Enumerate every catalog entry in declaration order.
///
/// # Examples
/// ```
/// use domain_errors::domain::{ErrorGroup, catalog};
///
/// let entry = catalog()
///     .iter()
///     .find(|entry| entry.error().code() == "NOT_FOUND")
///     .expect("NOT_FOUND is catalogued");
/// assert_eq!(entry.group(), ErrorGroup::Resource);
/// ```
#[must_use]
pub fn catalog() -> &'static [CatalogEntry] {
    CATALOG
}

/// Resolve a code string to its catalog entry.
#[must_use]
pub fn lookup(code: &str) -> Option<&'static DomainError> {
    CATALOG
        .iter()
        .map(CatalogEntry::error)
        .find(|error| error.code() == code)
}
