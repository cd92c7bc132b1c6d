use crate::association::AssociationManager;
use crate::clients::DocumentClient;
use crate::error::CatalogError;
use crate::framework::{Document, Filter, Session, StoreClient};
use crate::listing::{paginate, ListQuery, Page};
use crate::model::{
    Actor, Filling, FillingId, Food, FoodCreate, FoodId, FoodUpdate, Topping, ToppingId,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// A Food with its active Toppings and Fillings resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodDetail {
    pub food: Food,
    pub toppings: Vec<Topping>,
    pub fillings: Vec<Filling>,
}

/// Client for managing Foods.
///
/// Deleting a Food does not touch the Toppings and Fillings it references.
#[derive(Clone, Debug)]
pub struct FoodClient {
    store: StoreClient,
    associations: AssociationManager,
}

impl FoodClient {
    pub fn new(store: StoreClient) -> Self {
        let associations = AssociationManager::new(store.clone());
        Self {
            store,
            associations,
        }
    }

    #[instrument(skip(self))]
    pub async fn create_food(
        &self,
        params: FoodCreate,
        actor: Actor,
    ) -> Result<Food, CatalogError> {
        debug!("Sending request");
        if params.name.trim().is_empty() {
            return Err(CatalogError::bad_request("food name is required"));
        }
        Ok(self.store.insert(params, Some(actor.id)).await?)
    }

    #[instrument(skip(self))]
    pub async fn update_food(
        &self,
        id: FoodId,
        update: FoodUpdate,
        actor: Actor,
    ) -> Result<Food, CatalogError> {
        debug!("Sending request");
        if update.is_empty() {
            return Err(CatalogError::bad_request("nothing to update"));
        }
        if update.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
            return Err(CatalogError::bad_request("food name must not be blank"));
        }
        self.store
            .transaction("update_food", move |session| {
                let food = session.update_one(&Filter::<Food>::by_id(&id), |food| {
                    if let Some(name) = update.name {
                        food.name = name;
                    }
                    if let Some(price) = update.price {
                        food.price = price;
                    }
                    food.audit.touch(Some(actor.id));
                })?;
                Ok(food)
            })
            .await
    }

    /// The Food with its Toppings and Fillings, skipping soft-deleted ones.
    #[instrument(skip(self))]
    pub async fn detail(&self, id: FoodId) -> Result<FoodDetail, CatalogError> {
        debug!("Sending request");
        self.store
            .read("food_detail", move |session| {
                let food = session.find_by_id::<Food>(&id)?;
                let toppings = resolve::<Topping>(session, &food.toppings);
                let fillings = resolve::<Filling>(session, &food.fillings);
                Ok(FoodDetail {
                    food,
                    toppings,
                    fillings,
                })
            })
            .await
    }

    /// Lists active Foods, optionally restricted to an exact name.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        name: Option<String>,
        query: ListQuery,
    ) -> Result<Page<Food>, CatalogError> {
        debug!("Sending request");
        self.store
            .read("list_foods", move |session| {
                let filter = match name {
                    Some(name) => Filter::matching(format!("name = {name}"), move |food: &Food| {
                        food.name == name
                    }),
                    None => Filter::all(),
                };
                paginate(session, filter, &query)
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn attach(
        &self,
        id: FoodId,
        topping: Option<ToppingId>,
        filling: Option<FillingId>,
    ) -> Result<Food, CatalogError> {
        debug!("Sending request");
        self.associations.attach(id, topping, filling).await
    }
}

#[async_trait]
impl DocumentClient<Food> for FoodClient {
    fn store(&self) -> &StoreClient {
        &self.store
    }
}

fn resolve<T: Document>(session: &Session<'_>, ids: &[T::Id]) -> Vec<T> {
    ids.iter()
        .filter_map(|id| session.find_by_id::<T>(id).ok())
        .collect()
}
