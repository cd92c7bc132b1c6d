#![allow(dead_code)]

use food_catalog::lifecycle::{CatalogSystem, StoreConfig};
use food_catalog::model::{
    Actor, Filling, Food, FoodCreate, GarnishCreate, Money, Topping,
};

pub fn money(raw: &str) -> Money {
    raw.parse().expect("valid amount")
}

pub fn admin() -> Actor {
    Actor::admin("user_1")
}

pub fn system() -> CatalogSystem {
    CatalogSystem::new(StoreConfig::default())
}

pub async fn food(system: &CatalogSystem, name: &str, price: &str) -> Food {
    system
        .foods
        .create_food(
            FoodCreate {
                name: name.to_string(),
                price: money(price),
            },
            admin(),
        )
        .await
        .expect("Failed to create food")
}

pub async fn topping(system: &CatalogSystem, name: &str, price: &str) -> Topping {
    system
        .toppings
        .create(
            GarnishCreate {
                name: name.to_string(),
                price: money(price),
            },
            admin(),
        )
        .await
        .expect("Failed to create topping")
}

pub async fn filling(system: &CatalogSystem, name: &str, price: &str) -> Filling {
    system
        .fillings
        .create(
            GarnishCreate {
                name: name.to_string(),
                price: money(price),
            },
            admin(),
        )
        .await
        .expect("Failed to create filling")
}

/// Bun 10.00 with Cheese 2.00 attached as a topping and Beef 5.00 as a filling.
pub async fn burger(system: &CatalogSystem) -> (Food, Topping, Filling) {
    let bun = food(system, "Bun", "10.00").await;
    let cheese = topping(system, "Cheese", "2.00").await;
    let beef = filling(system, "Beef", "5.00").await;
    let bun = system
        .foods
        .attach(bun.id, Some(cheese.id.clone()), Some(beef.id.clone()))
        .await
        .expect("Failed to attach");
    (bun, cheese, beef)
}
