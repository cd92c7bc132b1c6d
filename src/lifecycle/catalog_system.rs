use crate::association::AssociationManager;
use crate::clients::{
    AddressClient, FillingClient, FoodClient, OrderClient, ToppingClient, UserClient,
};
use crate::framework::{Database, StoreActor, StoreClient};
use crate::lifecycle::StoreConfig;
use crate::pricing::PricingEngine;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The runtime orchestrator for the catalog.
///
/// `CatalogSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the store actor
/// - **Dependency Wiring**: Handing every component a clone of the same store client
///
/// # Architecture
///
/// A single [`StoreActor`] owns all collections. Every client below is a thin,
/// cloneable wrapper around a [`StoreClient`]; none of them hold state of their own.
///
/// # Example
///
/// ```
/// use food_catalog::clients::DocumentClient;
/// use food_catalog::lifecycle::{CatalogSystem, StoreConfig};
/// use food_catalog::model::{Actor, FoodCreate};
///
/// #[tokio::main]
/// async fn main() {
///     let system = CatalogSystem::new(StoreConfig::default());
///     let admin = Actor::admin("user_1");
///
///     let bun = system
///         .foods
///         .create_food(FoodCreate { name: "Bun".into(), price: "10.00".parse().unwrap() }, admin)
///         .await
///         .unwrap();
///     assert_eq!(system.foods.get(bun.id).await.unwrap().name, "Bun");
///
///     system.shutdown().await.unwrap();
/// }
/// ```
pub struct CatalogSystem {
    pub foods: FoodClient,
    pub toppings: ToppingClient,
    pub fillings: FillingClient,
    pub associations: AssociationManager,
    pub pricing: PricingEngine,
    pub orders: OrderClient,
    pub addresses: AddressClient,
    pub users: UserClient,

    store: StoreClient,
    handle: JoinHandle<()>,
}

impl CatalogSystem {
    /// Spawns an empty store and wires every client to it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: StoreConfig) -> Self {
        Self::with_database(Database::new(), config)
    }

    /// Spawns a store pre-loaded with `db`.
    pub fn with_database(db: Database, config: StoreConfig) -> Self {
        let (actor, store) = StoreActor::with_database(db, &config);
        let handle = tokio::spawn(actor.run());
        info!(
            buffer = config.buffer_size,
            timeout_ms = config.request_timeout_ms,
            "Catalog started"
        );

        Self {
            foods: FoodClient::new(store.clone()),
            toppings: ToppingClient::new(store.clone()),
            fillings: FillingClient::new(store.clone()),
            associations: AssociationManager::new(store.clone()),
            pricing: PricingEngine::new(store.clone()),
            orders: OrderClient::new(store.clone()),
            addresses: AddressClient::new(store.clone()),
            users: UserClient::new(store.clone()),
            store,
            handle,
        }
    }

    /// A raw handle to the store, for callers composing their own transactions.
    pub fn store(&self) -> StoreClient {
        self.store.clone()
    }

    /// Gracefully shuts down the store.
    ///
    /// Dropping every client closes the request channel; the actor drains what is
    /// already queued and exits. Clones of the clients held elsewhere keep the
    /// actor alive, so drop those first.
    pub async fn shutdown(self) -> Result<(), tokio::task::JoinError> {
        info!("Shutting down catalog...");
        let Self {
            foods,
            toppings,
            fillings,
            associations,
            pricing,
            orders,
            addresses,
            users,
            store,
            handle,
        } = self;

        // Closing the last sender ends the actor's receive loop.
        drop((
            foods,
            toppings,
            fillings,
            associations,
            pricing,
            orders,
            addresses,
            users,
            store,
        ));

        if let Err(e) = handle.await {
            error!("Store task failed: {:?}", e);
            return Err(e);
        }

        info!("Catalog shutdown complete.");
        Ok(())
    }
}
