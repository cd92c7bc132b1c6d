//! # Association Manager
//!
//! Maintains the Food -> Topping and Food -> Filling membership lists.
//!
//! Each operation is one store transaction: any `NotFound` aborts it and nothing
//! is written. The store actor runs transactions one at a time, so concurrent
//! operations on the same Food are serialized.
//!
//! The session-level functions are public so other components can compose them
//! into larger transactions (see `GarnishClient::create_for_food`).

use crate::error::CatalogError;
use crate::framework::{Filter, Session, StoreClient};
use crate::model::{Actor, Filling, FillingId, Food, FoodId, Garnish, Topping, ToppingId};
use crate::soft_delete;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Result of deleting a Topping/Filling everywhere.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cascade<G> {
    /// The Topping/Filling as it was marked deleted.
    pub removed: G,
    /// Foods that referenced it, including soft-deleted ones.
    pub foods_updated: usize,
}

/// Appends the named Topping and/or Filling to an active Food.
pub fn attach(
    session: &mut Session<'_>,
    food: &FoodId,
    topping: Option<&ToppingId>,
    filling: Option<&FillingId>,
) -> Result<Food, CatalogError> {
    if topping.is_none() && filling.is_none() {
        return Err(CatalogError::bad_request(
            "a topping or a filling is required to attach",
        ));
    }
    session.find_by_id::<Food>(food)?;
    if let Some(id) = topping {
        session.find_by_id::<Topping>(id)?;
    }
    if let Some(id) = filling {
        session.find_by_id::<Filling>(id)?;
    }
    let updated = session.update_one(&Filter::<Food>::by_id(food), |food| {
        if let Some(id) = topping {
            food.toppings.push(id.clone());
        }
        if let Some(id) = filling {
            food.fillings.push(id.clone());
        }
    })?;
    Ok(updated)
}

/// Removes every occurrence of `id` from every Food, soft-deleted Foods included.
pub fn detach_from_all_foods<G: Garnish>(
    session: &mut Session<'_>,
    id: &G::Id,
) -> Result<usize, CatalogError> {
    let wanted = id.clone();
    let filter = Filter::<Food>::matching(format!("{} contains {id}", G::RELATION), move |food| {
        G::relation(food).contains(&wanted)
    })
    .include_deleted();
    let updated = session.update_many(&filter, |food| {
        G::relation_mut(food).retain(|member| member != id)
    })?;
    debug!(relation = G::RELATION, %id, updated, "Detached from all foods");
    Ok(updated)
}

/// Removes every occurrence of `id` from one active Food.
pub fn detach_from_food<G: Garnish>(
    session: &mut Session<'_>,
    food: &FoodId,
    id: &G::Id,
) -> Result<Food, CatalogError> {
    let updated = session.update_one(&Filter::<Food>::by_id(food), |food| {
        G::relation_mut(food).retain(|member| member != id)
    })?;
    Ok(updated)
}

/// Appends `id` to one active Food. The Topping/Filling must exist but may be
/// soft-deleted; its delete state is left alone.
pub fn push<G: Garnish>(
    session: &mut Session<'_>,
    food: &FoodId,
    id: &G::Id,
) -> Result<Food, CatalogError> {
    session.find_one(&Filter::<G>::by_id(id).include_deleted())?;
    let updated = session.update_one(&Filter::<Food>::by_id(food), |food| {
        G::relation_mut(food).push(id.clone())
    })?;
    Ok(updated)
}

/// Async front end to the association operations.
#[derive(Clone, Debug)]
pub struct AssociationManager {
    store: StoreClient,
}

impl AssociationManager {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn attach(
        &self,
        food: FoodId,
        topping: Option<ToppingId>,
        filling: Option<FillingId>,
    ) -> Result<Food, CatalogError> {
        debug!("Sending request");
        self.store
            .transaction("attach", move |session| {
                attach(session, &food, topping.as_ref(), filling.as_ref())
            })
            .await
    }

    /// Soft-deletes a Topping/Filling and pulls it from every Food in one transaction.
    ///
    /// A Topping/Filling already deleted through `detach_from_food` keeps its
    /// deletion stamp; the pull still runs so no Food is left referencing it.
    #[instrument(skip(self), fields(relation = G::RELATION))]
    pub async fn detach_from_all_foods<G: Garnish>(
        &self,
        id: G::Id,
        actor: Actor,
    ) -> Result<Cascade<G>, CatalogError> {
        debug!("Sending request");
        let cascade = self
            .store
            .transaction("detach_from_all_foods", move |session| {
                let current = session.find_one(&Filter::<G>::by_id(&id).include_deleted())?;
                let removed = if current.is_active() {
                    soft_delete::mark_deleted::<G>(session, &id, &actor.id)?
                } else {
                    current
                };
                let foods_updated = detach_from_all_foods::<G>(session, &id)?;
                Ok::<_, CatalogError>(Cascade {
                    removed,
                    foods_updated,
                })
            })
            .await?;
        info!(foods_updated = cascade.foods_updated, "Cascade committed");
        Ok(cascade)
    }

    /// Soft-deletes a Topping/Filling and pulls it from one Food in one transaction.
    #[instrument(skip(self), fields(relation = G::RELATION))]
    pub async fn detach_from_food<G: Garnish>(
        &self,
        food: FoodId,
        id: G::Id,
        actor: Actor,
    ) -> Result<Food, CatalogError> {
        debug!("Sending request");
        self.store
            .transaction("detach_from_food", move |session| {
                soft_delete::mark_deleted::<G>(session, &id, &actor.id)?;
                detach_from_food::<G>(session, &food, &id)
            })
            .await
    }

    #[instrument(skip(self), fields(relation = G::RELATION))]
    pub async fn push<G: Garnish>(&self, food: FoodId, id: G::Id) -> Result<Food, CatalogError> {
        debug!("Sending request");
        self.store
            .transaction("push", move |session| push::<G>(session, &food, &id))
            .await
    }
}
