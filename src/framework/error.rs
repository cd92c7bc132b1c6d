//! # Store Errors
//!
//! Errors raised by the entity store itself. They describe plumbing failures
//! (closed channels, timeouts) and the two constraint failures the store can
//! detect on its own: a filter that matched nothing and a unique-key clash.
//! Domain code converts them into [`CatalogError`](crate::error::CatalogError).

use crate::framework::document::Kind;
use std::time::Duration;

/// Errors that can occur within the store framework itself.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store actor closed")]
    ActorClosed,
    #[error("Store actor dropped response channel")]
    ActorDropped,
    #[error("Store request timed out after {0:?}")]
    Timeout(Duration),
    #[error("{kind} not found: {key}")]
    NotFound { kind: Kind, key: String },
    #[error("{kind} already exists: {key}")]
    Conflict { kind: Kind, key: String },
}

impl StoreError {
    pub(crate) fn not_found(kind: Kind, key: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            key: key.into(),
        }
    }
}
