//! # Soft-Delete Lifecycle
//!
//! Active -> Deleted -> Active. Nothing is ever physically removed: deletion stamps
//! `deleted_at`/`deleted_by` and restore clears both. The store's active-only
//! filters hide deleted documents from every other read path.
//!
//! These functions run inside a caller's transaction so they compose with other
//! writes (the cascade in [`association`](crate::association) relies on that).

use crate::error::CatalogError;
use crate::framework::{Document, Filter, Session};
use crate::model::UserId;
use tracing::debug;

/// Marks an active document deleted.
///
/// Fails with `NotFound` when the document is missing or already deleted.
pub fn mark_deleted<T: Document>(
    session: &mut Session<'_>,
    id: &T::Id,
    by: &UserId,
) -> Result<T, CatalogError> {
    let doc = session.update_one(&Filter::<T>::by_id(id), |doc| {
        doc.audit_mut().mark_deleted(Some(by.clone()))
    })?;
    debug!(kind = %T::KIND, %id, by = %by, "Marked deleted");
    Ok(doc)
}

/// Clears the deletion fields of a deleted document.
///
/// Fails with `BadRequest` when the document is active, `NotFound` when it does not
/// exist, and `Conflict` when restoring it would break a unique key.
pub fn restore<T: Document>(session: &mut Session<'_>, id: &T::Id) -> Result<T, CatalogError> {
    let filter = Filter::<T>::by_id(id).include_deleted();
    let current = session.find_one(&filter)?;
    if current.is_active() {
        return Err(CatalogError::bad_request(format!(
            "{} {id} is not deleted or already restored",
            T::KIND
        )));
    }
    let doc = session.update_one(&filter, |doc| doc.audit_mut().clear_deletion())?;
    debug!(kind = %T::KIND, %id, "Restored");
    Ok(doc)
}
