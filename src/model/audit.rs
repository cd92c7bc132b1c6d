//! Audit trail and soft-delete flag shared by every stored kind.

use super::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who created, last updated and soft-deleted a document, and when.
///
/// A document is deleted exactly when `deleted_at` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audit {
    pub created_at: DateTime<Utc>,
    pub created_by: Option<UserId>,
    pub updated_at: Option<DateTime<Utc>>,
    pub updated_by: Option<UserId>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<UserId>,
}

impl Audit {
    pub fn created(by: Option<UserId>) -> Self {
        Self {
            created_at: Utc::now(),
            created_by: by,
            updated_at: None,
            updated_by: None,
            deleted_at: None,
            deleted_by: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub fn touch(&mut self, by: Option<UserId>) {
        self.updated_at = Some(Utc::now());
        self.updated_by = by;
    }

    pub fn mark_deleted(&mut self, by: Option<UserId>) {
        self.deleted_at = Some(Utc::now());
        self.deleted_by = by;
    }

    /// Clears both deletion fields together.
    pub fn clear_deletion(&mut self) {
        self.deleted_at = None;
        self.deleted_by = None;
    }
}
