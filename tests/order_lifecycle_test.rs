mod common;

use common::{admin, burger, food, money, system};
use food_catalog::clients::{DocumentClient, OrderClient, OrderFilter};
use food_catalog::framework::mock::MockStore;
use food_catalog::framework::{Database, StoreError};
use food_catalog::listing::ListQuery;
use food_catalog::model::{Actor, FoodCreate, FoodUpdate, LineItem, Order, Quantity};
use food_catalog::CatalogError;

#[tokio::test]
async fn test_empty_order_is_rejected_without_writing() {
    let system = system();
    let result = system
        .orders
        .create_order(Vec::new(), Actor::user("user_7"))
        .await;
    assert!(matches!(result, Err(CatalogError::BadRequest(_))));

    let orders = system
        .orders
        .list(OrderFilter::default(), ListQuery::default())
        .await
        .unwrap();
    assert_eq!(orders.total, 0);
}

#[tokio::test]
async fn test_order_for_deleted_food_is_not_found() {
    let system = system();
    let bun = food(&system, "Bun", "10.00").await;
    system.foods.delete(bun.id.clone(), admin()).await.unwrap();

    let result = system
        .orders
        .create_order(vec![LineItem::new(bun.id)], Actor::user("user_7"))
        .await;
    assert!(matches!(result, Err(CatalogError::NotFound(_))));

    let orders = system
        .orders
        .list(OrderFilter::default(), ListQuery::default())
        .await
        .unwrap();
    assert_eq!(orders.total, 0);
}

#[tokio::test]
async fn test_order_with_deleted_topping_is_not_found() {
    let system = system();
    let (bun, cheese, _) = burger(&system).await;
    system.toppings.delete(cheese.id.clone(), admin()).await.unwrap();

    let result = system
        .orders
        .create_order(
            vec![LineItem::new(bun.id).with_topping(cheese.id)],
            Actor::user("user_7"),
        )
        .await;
    assert!(matches!(result, Err(CatalogError::NotFound(_))));
}

#[tokio::test]
async fn test_total_is_a_snapshot() {
    let system = system();
    let (bun, cheese, beef) = burger(&system).await;
    let order = system
        .orders
        .create_order(
            vec![LineItem::new(bun.id.clone())
                .with_topping(cheese.id)
                .with_filling(beef.id)
                .with_quantity(Quantity::new(2).unwrap())],
            Actor::user("user_7"),
        )
        .await
        .unwrap();
    assert_eq!(order.total_amount, money("34.00"));

    system
        .foods
        .update_food(
            bun.id,
            FoodUpdate {
                price: Some(money("99.00")),
                ..FoodUpdate::default()
            },
            admin(),
        )
        .await
        .unwrap();

    let stored = system.orders.get(order.id).await.unwrap();
    assert_eq!(stored.total_amount, money("34.00"));
}

#[tokio::test]
async fn test_order_delete_and_restore() {
    let system = system();
    let bun = food(&system, "Bun", "10.00").await;
    let order = system
        .orders
        .create_order(vec![LineItem::new(bun.id)], Actor::user("user_7"))
        .await
        .unwrap();

    let not_deleted = system.orders.restore(order.id.clone()).await;
    assert!(matches!(not_deleted, Err(CatalogError::BadRequest(_))));

    let deleted = system
        .orders
        .delete(order.id.clone(), Actor::user("user_7"))
        .await
        .unwrap();
    assert_eq!(deleted.audit.deleted_by, Some("user_7".into()));
    assert!(matches!(
        system.orders.get(order.id.clone()).await,
        Err(CatalogError::NotFound(_))
    ));

    let twice = system.orders.delete(order.id.clone(), admin()).await;
    assert!(matches!(twice, Err(CatalogError::NotFound(_))));

    let restored = system.orders.restore(order.id.clone()).await.unwrap();
    assert!(!restored.audit.is_deleted());
    assert_eq!(restored.total_amount, order.total_amount);
    assert_eq!(system.orders.get(order.id).await.unwrap(), restored);
}

#[tokio::test]
async fn test_unknown_order_is_not_found() {
    let system = system();
    let result = system.orders.get("order_12".into()).await;
    assert!(matches!(result, Err(CatalogError::NotFound(_))));
    let result = system.orders.restore("order_12".into()).await;
    assert!(matches!(result, Err(CatalogError::NotFound(_))));
}

/// A store that drops the transaction surfaces as `Unavailable` and commits nothing.
#[tokio::test]
async fn test_dropped_transaction_is_unavailable() {
    let mut db = Database::new();
    let bun = db
        .session()
        .insert::<food_catalog::model::Food>(
            FoodCreate {
                name: "Bun".into(),
                price: money("10.00"),
            },
            None,
        )
        .unwrap();

    let mock = MockStore::new(db);
    mock.expect("create_order").drop_request();
    let orders = OrderClient::new(mock.client());

    let result = orders
        .create_order(vec![LineItem::new(bun.id)], Actor::user("user_7"))
        .await;
    assert!(matches!(
        result,
        Err(CatalogError::Unavailable(StoreError::ActorDropped))
    ));
    assert!(mock.snapshot().collection::<Order>().is_empty());
    assert_eq!(mock.labels(), vec!["create_order"]);
    mock.verify();
}

#[tokio::test]
async fn test_served_transaction_commits_on_mock() {
    let mut db = Database::new();
    let bun = db
        .session()
        .insert::<food_catalog::model::Food>(
            FoodCreate {
                name: "Bun".into(),
                price: money("10.00"),
            },
            None,
        )
        .unwrap();

    let mock = MockStore::new(db);
    mock.expect("create_order").serve();
    let orders = OrderClient::new(mock.client());

    let order = orders
        .create_order(
            vec![LineItem::new(bun.id).with_quantity(Quantity::new(3).unwrap())],
            Actor::user("user_7"),
        )
        .await
        .unwrap();
    assert_eq!(order.total_amount, money("30.00"));
    assert_eq!(mock.snapshot().collection::<Order>().len(), 1);
    mock.verify();
}
