//! Service-boundary error: everything a catalog operation can fail with.

use thiserror::Error;

use campus_auth::AuthzError;
use campus_core::DomainError;

use crate::store::StoreError;

pub type CatalogResult<T> = Result<T, CatalogError>;

/// Each variant is a distinct, stable signal; callers map them to protocol
/// status codes. `Forbidden` is never folded into `NotFound`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Malformed or missing required content. Not retryable.
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// No such event, or the event is deleted.
    #[error("not found")]
    NotFound,

    /// The acting user does not own the event.
    #[error("forbidden")]
    Forbidden,

    /// Lost an optimistic concurrency race on the same event.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Storage failure.
    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<DomainError> for CatalogError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Validation(msg) => CatalogError::Validation(msg),
            DomainError::InvariantViolation(msg) => CatalogError::InvariantViolation(msg),
            DomainError::InvalidId(msg) => CatalogError::InvalidId(msg),
            DomainError::NotFound => CatalogError::NotFound,
            DomainError::Conflict(msg) => CatalogError::Conflict(msg),
            DomainError::Forbidden => CatalogError::Forbidden,
        }
    }
}

impl From<AuthzError> for CatalogError {
    fn from(_: AuthzError) -> Self {
        CatalogError::Forbidden
    }
}

impl From<StoreError> for CatalogError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Concurrency(msg) => CatalogError::Conflict(msg),
            other => CatalogError::Store(other),
        }
    }
}
