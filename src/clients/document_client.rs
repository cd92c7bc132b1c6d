use crate::error::CatalogError;
use crate::framework::{Document, StoreClient};
use crate::model::Actor;
use crate::soft_delete;
use async_trait::async_trait;

/// Trait for kind-specific clients to inherit the standard lookups and the
/// soft-delete lifecycle.
///
/// Implementors only provide [`DocumentClient::store`]. Kinds whose deletion has
/// side effects (Toppings, Fillings) or ownership rules (Addresses) override
/// `delete`.
#[async_trait]
pub trait DocumentClient<T: Document>: Send + Sync {
    /// Access the shared store handle.
    fn store(&self) -> &StoreClient;

    /// Fetch an active document by ID.
    #[tracing::instrument(skip(self), fields(kind = %T::KIND))]
    async fn get(&self, id: T::Id) -> Result<T, CatalogError> {
        tracing::debug!("Sending request");
        Ok(self.store().find_by_id::<T>(id).await?)
    }

    /// Soft-delete an active document.
    #[tracing::instrument(skip(self), fields(kind = %T::KIND))]
    async fn delete(&self, id: T::Id, actor: Actor) -> Result<T, CatalogError> {
        tracing::debug!("Sending request");
        self.store()
            .transaction("soft_delete", move |session| {
                soft_delete::mark_deleted::<T>(session, &id, &actor.id)
            })
            .await
    }

    /// Restore a soft-deleted document.
    #[tracing::instrument(skip(self), fields(kind = %T::KIND))]
    async fn restore(&self, id: T::Id) -> Result<T, CatalogError> {
        tracing::debug!("Sending request");
        self.store()
            .transaction("restore", move |session| {
                soft_delete::restore::<T>(session, &id)
            })
            .await
    }
}
