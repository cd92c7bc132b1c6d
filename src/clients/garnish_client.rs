use crate::association::{self, AssociationManager};
use crate::clients::DocumentClient;
use crate::error::CatalogError;
use crate::framework::{Filter, StoreClient};
use crate::listing::{paginate, ListQuery, Page};
use crate::model::{Actor, Filling, Food, FoodId, Garnish, GarnishCreate, GarnishUpdate, Topping};
use async_trait::async_trait;
use std::marker::PhantomData;
use tracing::{debug, info, instrument};

/// Client for managing Toppings or Fillings.
///
/// Deleting through this client cascades: the Topping/Filling is pulled from every
/// Food that lists it in the same transaction that marks it deleted.
#[derive(Debug)]
pub struct GarnishClient<G: Garnish> {
    store: StoreClient,
    associations: AssociationManager,
    _kind: PhantomData<fn() -> G>,
}

pub type ToppingClient = GarnishClient<Topping>;
pub type FillingClient = GarnishClient<Filling>;

impl<G: Garnish> Clone for GarnishClient<G> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            associations: self.associations.clone(),
            _kind: PhantomData,
        }
    }
}

impl<G: Garnish> GarnishClient<G> {
    pub fn new(store: StoreClient) -> Self {
        let associations = AssociationManager::new(store.clone());
        Self {
            store,
            associations,
            _kind: PhantomData,
        }
    }

    #[instrument(skip(self), fields(kind = %G::KIND))]
    pub async fn create(&self, params: GarnishCreate, actor: Actor) -> Result<G, CatalogError> {
        debug!("Sending request");
        validate_name(&params.name)?;
        Ok(self.store.insert::<G>(params, Some(actor.id)).await?)
    }

    /// Creates the Topping/Filling and pushes it onto an active Food atomically.
    #[instrument(skip(self), fields(kind = %G::KIND))]
    pub async fn create_for_food(
        &self,
        food: FoodId,
        params: GarnishCreate,
        actor: Actor,
    ) -> Result<G, CatalogError> {
        debug!("Sending request");
        validate_name(&params.name)?;
        self.store
            .transaction("create_for_food", move |session| {
                let created = session.insert::<G>(params, Some(actor.id))?;
                association::push::<G>(session, &food, created.id())?;
                Ok(created)
            })
            .await
    }

    #[instrument(skip(self), fields(kind = %G::KIND))]
    pub async fn update(
        &self,
        id: G::Id,
        update: GarnishUpdate,
        actor: Actor,
    ) -> Result<G, CatalogError> {
        debug!("Sending request");
        if update.is_empty() {
            return Err(CatalogError::bad_request("nothing to update"));
        }
        if let Some(name) = &update.name {
            validate_name(name)?;
        }
        self.store
            .transaction("update_garnish", move |session| {
                Ok(session.update_one(&Filter::<G>::by_id(&id), |garnish| {
                    garnish.apply(update);
                    garnish.audit_mut().touch(Some(actor.id));
                })?)
            })
            .await
    }

    /// Lists active Toppings/Fillings, optionally restricted to an exact name.
    #[instrument(skip(self), fields(kind = %G::KIND))]
    pub async fn list(
        &self,
        name: Option<String>,
        query: ListQuery,
    ) -> Result<Page<G>, CatalogError> {
        debug!("Sending request");
        self.store
            .read("list_garnishes", move |session| {
                let filter = match name {
                    Some(name) => {
                        Filter::matching(format!("name = {name}"), move |g: &G| g.name() == name)
                    }
                    None => Filter::all(),
                };
                paginate(session, filter, &query)
            })
            .await
    }

    /// Soft-deletes the Topping/Filling and pulls it from one Food only.
    pub async fn delete_from_food(
        &self,
        food: FoodId,
        id: G::Id,
        actor: Actor,
    ) -> Result<Food, CatalogError> {
        self.associations.detach_from_food::<G>(food, id, actor).await
    }

    /// Re-adds the Topping/Filling to one Food without restoring it.
    pub async fn push(&self, food: FoodId, id: G::Id) -> Result<Food, CatalogError> {
        self.associations.push::<G>(food, id).await
    }
}

#[async_trait]
impl<G: Garnish> DocumentClient<G> for GarnishClient<G> {
    fn store(&self) -> &StoreClient {
        &self.store
    }

    /// Soft-deletes and pulls the Topping/Filling from every Food.
    async fn delete(&self, id: G::Id, actor: Actor) -> Result<G, CatalogError> {
        let cascade = self
            .associations
            .detach_from_all_foods::<G>(id, actor)
            .await?;
        info!(
            kind = %G::KIND,
            id = %cascade.removed.id(),
            foods = cascade.foods_updated,
            "Deleted"
        );
        Ok(cascade.removed)
    }
}

fn validate_name(name: &str) -> Result<(), CatalogError> {
    if name.trim().is_empty() {
        return Err(CatalogError::bad_request("name is required"));
    }
    Ok(())
}
