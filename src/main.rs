//! Demo: builds a small catalog and prices one order end to end.
//!
//! 1. Loads [`StoreConfig`] from the environment and starts the [`CatalogSystem`].
//! 2. Creates a Bun with a Cheese topping and a Beef filling.
//! 3. Orders two of them (34.00), then deletes the Cheese and shows the cascade.

use food_catalog::clients::DocumentClient;
use food_catalog::lifecycle::{setup_tracing, CatalogSystem, StoreConfig};
use food_catalog::model::{
    Actor, FoodCreate, GarnishCreate, LineItem, Money, MoneyError, Quantity, Role, UserCreate,
};
use food_catalog::CatalogError;
use tracing::{error, info, Instrument};

fn price(raw: &str) -> Result<Money, String> {
    raw.parse().map_err(|e: MoneyError| e.to_string())
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = StoreConfig::from_env().map_err(|e| e.to_string())?;
    info!(?config, "Starting catalog");
    let system = CatalogSystem::new(config);

    let admin = system
        .users
        .create_user(UserCreate {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            role: Role::Admin,
        })
        .await
        .map_err(|e| e.to_string())?
        .actor();

    let span = tracing::info_span!("catalog_setup");
    let (bun, cheese) = async {
        let bun = system
            .foods
            .create_food(
                FoodCreate {
                    name: "Bun".to_string(),
                    price: price("10.00")?,
                },
                admin.clone(),
            )
            .await
            .map_err(|e| e.to_string())?;
        let cheese = system
            .toppings
            .create_for_food(
                bun.id.clone(),
                GarnishCreate {
                    name: "Cheese".to_string(),
                    price: price("2.00")?,
                },
                admin.clone(),
            )
            .await
            .map_err(|e| e.to_string())?;
        let beef = system
            .fillings
            .create_for_food(
                bun.id.clone(),
                GarnishCreate {
                    name: "Beef".to_string(),
                    price: price("5.00")?,
                },
                admin.clone(),
            )
            .await
            .map_err(|e| e.to_string())?;
        info!(food = %bun.id, topping = %cheese.id, filling = %beef.id, "Catalog ready");
        Ok::<_, String>((bun, cheese))
    }
    .instrument(span)
    .await?;

    let detail = system
        .foods
        .detail(bun.id.clone())
        .await
        .map_err(|e| e.to_string())?;
    let item = LineItem {
        food: bun.id.clone(),
        toppings: detail.food.toppings.clone(),
        fillings: detail.food.fillings.clone(),
        quantity: Quantity::new(2).map_err(|e| e.to_string())?,
    };

    let span = tracing::info_span!("order_processing");
    let customer = Actor::user("user_42");
    match system
        .orders
        .create_order(vec![item], customer)
        .instrument(span)
        .await
    {
        Ok(order) => info!(order = %order.id, total = %order.total_amount, "Order placed"),
        Err(e) => error!(error = %e, "Order failed"),
    }

    system
        .toppings
        .delete(cheese.id.clone(), admin)
        .await
        .map_err(|e| e.to_string())?;
    let after = system
        .foods
        .get(bun.id.clone())
        .await
        .map_err(|e| e.to_string())?;
    info!(toppings = after.toppings.len(), "Cheese removed from every food");

    let empty = system.orders.create_order(Vec::new(), Actor::user("user_42")).await;
    if let Err(CatalogError::BadRequest(reason)) = empty {
        info!(%reason, "Empty order rejected");
    }

    system.shutdown().await.map_err(|e| e.to_string())?;
    Ok(())
}
