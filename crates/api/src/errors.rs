use serde::Serialize;

use campus_infra::{CatalogError, StoreError};

/// Error payload a transport can serialize as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// Stable machine-readable code per failure kind.
pub fn error_code(err: &CatalogError) -> &'static str {
    match err {
        CatalogError::Validation(_) => "validation_error",
        CatalogError::InvalidId(_) => "invalid_id",
        CatalogError::InvariantViolation(_) => "invariant_violation",
        CatalogError::NotFound => "not_found",
        CatalogError::Forbidden => "forbidden",
        CatalogError::Conflict(_) => "conflict",
        CatalogError::Store(_) => "store_error",
    }
}

/// Suggested HTTP status for transports that speak HTTP.
pub fn status_hint(err: &CatalogError) -> u16 {
    match err {
        CatalogError::Validation(_) | CatalogError::InvalidId(_) => 400,
        CatalogError::Forbidden => 403,
        CatalogError::NotFound => 404,
        CatalogError::Conflict(_) => 409,
        CatalogError::InvariantViolation(_) => 422,
        CatalogError::Store(StoreError::Unavailable(_)) => 503,
        CatalogError::Store(_) => 500,
    }
}

pub fn error_body(err: &CatalogError) -> ErrorBody {
    ErrorBody {
        error: error_code(err),
        message: err.to_string(),
    }
}
