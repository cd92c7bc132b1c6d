//! Domain error type returned by every catalog operation.

use crate::framework::StoreError;
use crate::model::MoneyError;
use thiserror::Error;

/// Errors surfaced to adapters, which translate them into transport responses.
///
/// Store-level `NotFound` and `Conflict` become their domain counterparts; every
/// other store failure is reported as `Unavailable`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Store unavailable: {0}")]
    Unavailable(StoreError),
}

impl CatalogError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }
}

impl From<StoreError> for CatalogError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { .. } => CatalogError::NotFound(e.to_string()),
            StoreError::Conflict { .. } => CatalogError::Conflict(e.to_string()),
            other => CatalogError::Unavailable(other),
        }
    }
}

impl From<MoneyError> for CatalogError {
    fn from(e: MoneyError) -> Self {
        CatalogError::BadRequest(e.to_string())
    }
}
