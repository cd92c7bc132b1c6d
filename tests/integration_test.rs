mod common;

use common::{admin, burger, food, money, system, topping};
use food_catalog::clients::{AddressSearch, DocumentClient, OrderFilter};
use food_catalog::listing::{ListQuery, SortOrder};
use food_catalog::model::{
    Actor, AddressCreate, AddressUpdate, FoodUpdate, GarnishCreate, LineItem, OrderStatus,
    Quantity, Role, UserCreate,
};
use food_catalog::CatalogError;

/// Full end-to-end flow through a real store actor.
#[tokio::test]
async fn test_full_catalog_integration() {
    let system = system();
    let (bun, cheese, beef) = burger(&system).await;
    assert_eq!(bun.toppings, vec![cheese.id.clone()]);
    assert_eq!(bun.fillings, vec![beef.id.clone()]);

    let detail = system
        .foods
        .detail(bun.id.clone())
        .await
        .expect("Failed to load detail");
    assert_eq!(detail.toppings, vec![cheese.clone()]);
    assert_eq!(detail.fillings, vec![beef.clone()]);

    let item = LineItem::new(bun.id.clone())
        .with_topping(cheese.id.clone())
        .with_filling(beef.id.clone())
        .with_quantity(Quantity::new(2).unwrap());
    let customer = Actor::user("user_7");
    let order = system
        .orders
        .create_order(vec![item], customer.clone())
        .await
        .expect("Failed to create order");
    assert_eq!(order.total_amount, money("34.00"));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.ordered_by, customer.id);

    let fetched = system
        .orders
        .get(order.id.clone())
        .await
        .expect("Failed to get order");
    assert_eq!(fetched, order);

    // Deleting the topping pulls it from the bun in the same transaction.
    system
        .toppings
        .delete(cheese.id.clone(), admin())
        .await
        .expect("Failed to delete topping");
    let bun_after = system.foods.get(bun.id.clone()).await.unwrap();
    assert!(bun_after.toppings.is_empty());
    assert_eq!(bun_after.fillings, vec![beef.id.clone()]);

    // The stored order keeps its snapshot.
    let fetched = system.orders.get(order.id.clone()).await.unwrap();
    assert_eq!(fetched.total_amount, money("34.00"));

    system.shutdown().await.expect("Failed to shut down");
}

#[tokio::test]
async fn test_duplicate_food_name_is_conflict() {
    let system = system();
    food(&system, "Bun", "10.00").await;
    let err = system
        .foods
        .create_food(
            food_catalog::model::FoodCreate {
                name: "Bun".into(),
                price: money("9.00"),
            },
            admin(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Conflict(_)));
}

#[tokio::test]
async fn test_rename_collision_is_conflict_and_changes_nothing() {
    let system = system();
    food(&system, "Bun", "10.00").await;
    let wrap = food(&system, "Wrap", "8.00").await;

    let err = system
        .foods
        .update_food(
            wrap.id.clone(),
            FoodUpdate {
                name: Some("Bun".into()),
                price: Some(money("1.00")),
            },
            admin(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Conflict(_)));

    let unchanged = system.foods.get(wrap.id).await.unwrap();
    assert_eq!(unchanged.name, "Wrap");
    assert_eq!(unchanged.price, money("8.00"));
}

#[tokio::test]
async fn test_update_food_records_actor() {
    let system = system();
    let wrap = food(&system, "Wrap", "8.00").await;
    let updated = system
        .foods
        .update_food(
            wrap.id.clone(),
            FoodUpdate {
                price: Some(money("8.50")),
                ..FoodUpdate::default()
            },
            Actor::admin("user_3"),
        )
        .await
        .unwrap();
    assert_eq!(updated.price, money("8.50"));
    assert_eq!(updated.audit.updated_by, Some("user_3".into()));

    let err = system
        .foods
        .update_food(wrap.id, FoodUpdate::default(), admin())
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::BadRequest(_)));
}

#[tokio::test]
async fn test_deleting_food_does_not_cascade() {
    let system = system();
    let (bun, cheese, _) = burger(&system).await;

    let deleted = system.foods.delete(bun.id.clone(), admin()).await.unwrap();
    assert!(deleted.audit.is_deleted());
    assert!(system.toppings.get(cheese.id).await.is_ok());
    assert!(matches!(
        system.foods.get(bun.id).await,
        Err(CatalogError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_create_for_food_pushes_onto_food() {
    let system = system();
    let bun = food(&system, "Bun", "10.00").await;
    let pickles = system
        .toppings
        .create_for_food(
            bun.id.clone(),
            GarnishCreate {
                name: "Pickles".into(),
                price: money("0.50"),
            },
            admin(),
        )
        .await
        .unwrap();
    let bun = system.foods.get(bun.id).await.unwrap();
    assert_eq!(bun.toppings, vec![pickles.id]);
}

#[tokio::test]
async fn test_create_for_missing_food_writes_nothing() {
    let system = system();
    let err = system
        .fillings
        .create_for_food(
            "food_404".into(),
            GarnishCreate {
                name: "Beef".into(),
                price: money("5.00"),
            },
            admin(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));

    let page = system
        .fillings
        .list(None, ListQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total, 0);
}

#[tokio::test]
async fn test_listing_filters_and_sorts() {
    let system = system();
    for (name, price) in [("Bun", "10.00"), ("Arepa", "7.00"), ("Wrap", "8.00")] {
        food(&system, name, price).await;
    }
    let arepa = system
        .foods
        .list(Some("Arepa".into()), ListQuery::default())
        .await
        .unwrap();
    assert_eq!(arepa.total, 1);
    assert_eq!(arepa.items[0].name, "Arepa");

    let wrap_id = system
        .foods
        .list(Some("Wrap".into()), ListQuery::default())
        .await
        .unwrap()
        .items[0]
        .id
        .clone();
    system.foods.delete(wrap_id, admin()).await.unwrap();

    let page = system
        .foods
        .list(None, ListQuery::sorted(SortOrder::ZToA))
        .await
        .unwrap();
    let names: Vec<_> = page.items.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, ["Bun", "Arepa"]);
    assert_eq!(page.num_pages, 1);
}

#[tokio::test]
async fn test_orders_list_by_status_and_owner() {
    let system = system();
    let bun = food(&system, "Bun", "10.00").await;
    for user in ["user_7", "user_8", "user_7"] {
        system
            .orders
            .create_order(vec![LineItem::new(bun.id.clone())], Actor::user(user))
            .await
            .unwrap();
    }

    let mine = system
        .orders
        .list(
            OrderFilter {
                ordered_by: Some("user_7".into()),
                ..OrderFilter::default()
            },
            ListQuery::default(),
        )
        .await
        .unwrap();
    assert_eq!(mine.total, 2);

    let shipped = system
        .orders
        .list(
            OrderFilter {
                status: Some(OrderStatus::Shipped),
                ..OrderFilter::default()
            },
            ListQuery::default(),
        )
        .await
        .unwrap();
    assert_eq!(shipped.total, 0);
}

#[tokio::test]
async fn test_quote_breaks_down_lines() {
    let system = system();
    let (bun, cheese, beef) = burger(&system).await;
    let wrap = food(&system, "Wrap", "8.00").await;
    let quote = system
        .orders
        .quote(vec![
            LineItem::new(bun.id.clone())
                .with_topping(cheese.id.clone())
                .with_filling(beef.id.clone())
                .with_quantity(Quantity::new(2).unwrap()),
            LineItem::new(wrap.id.clone()),
        ])
        .await
        .unwrap();
    assert_eq!(quote.lines[0].unit_price, money("17.00"));
    assert_eq!(quote.lines[0].subtotal, money("34.00"));
    assert_eq!(quote.lines[1].subtotal, money("8.00"));
    assert_eq!(quote.total, money("42.00"));

    // Quoting writes nothing.
    let orders = system
        .orders
        .list(OrderFilter::default(), ListQuery::default())
        .await
        .unwrap();
    assert_eq!(orders.total, 0);
}

#[tokio::test]
async fn test_address_ownership() {
    let system = system();
    let owner = system
        .users
        .create_user(UserCreate {
            username: "bob".into(),
            email: "bob@example.com".into(),
            role: Role::User,
        })
        .await
        .unwrap()
        .actor();

    let missing = system
        .addresses
        .create(
            owner.clone(),
            AddressCreate {
                country: "Peru".into(),
                ..AddressCreate::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(missing, CatalogError::BadRequest(_)));

    let home = system
        .addresses
        .create(
            owner.clone(),
            AddressCreate {
                country: "Peru".into(),
                city: "Lima".into(),
                street: "Av. Larco 101".into(),
                postal_code: Some(15074),
            },
        )
        .await
        .unwrap();
    let stored = system.users.get(owner.id.clone()).await.unwrap();
    assert_eq!(stored.addresses, vec![home.id.clone()]);

    let stranger = Actor::user("user_99");
    let err = system
        .addresses
        .update(
            stranger.clone(),
            home.id.clone(),
            AddressUpdate {
                city: Some("Cusco".into()),
                ..AddressUpdate::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Unauthorized(_)));
    let err = system
        .addresses
        .delete(home.id.clone(), stranger)
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Unauthorized(_)));

    let err = system
        .addresses
        .update(owner.clone(), home.id.clone(), AddressUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::BadRequest(_)));

    let found = system
        .addresses
        .list(
            AddressSearch {
                search: Some("lim".into()),
                ..AddressSearch::default()
            },
            ListQuery::default(),
        )
        .await
        .unwrap();
    assert_eq!(found.total, 1);

    system
        .addresses
        .delete(home.id.clone(), Actor::admin("user_1"))
        .await
        .expect("Admin may delete any address");
    let found = system
        .addresses
        .list(AddressSearch::default(), ListQuery::default())
        .await
        .unwrap();
    assert_eq!(found.total, 0);
}

#[tokio::test]
async fn test_topping_restore_does_not_reattach() {
    let system = system();
    let bun = food(&system, "Bun", "10.00").await;
    let cheese = topping(&system, "Cheese", "2.00").await;
    system
        .foods
        .attach(bun.id.clone(), Some(cheese.id.clone()), None)
        .await
        .unwrap();

    system.toppings.delete(cheese.id.clone(), admin()).await.unwrap();
    system.toppings.restore(cheese.id.clone()).await.unwrap();
    assert!(system.foods.get(bun.id.clone()).await.unwrap().toppings.is_empty());

    let bun = system
        .toppings
        .push(bun.id.clone(), cheese.id.clone())
        .await
        .unwrap();
    assert_eq!(bun.toppings, vec![cheese.id]);
}

#[tokio::test]
async fn test_compute_order_total_uses_current_prices() {
    let system = system();
    let (bun, cheese, beef) = burger(&system).await;
    let total = system
        .pricing
        .compute_order_total(vec![LineItem::new(bun.id.clone())
            .with_topping(cheese.id)
            .with_filling(beef.id)
            .with_quantity(Quantity::new(2).unwrap())])
        .await
        .expect("Failed to price");
    assert_eq!(total, money("34.00"));

    let empty = system.pricing.compute_order_total(Vec::new()).await.unwrap();
    assert_eq!(empty, money("0"));
}

#[tokio::test]
async fn test_compute_order_total_for_deleted_food_is_not_found() {
    let system = system();
    let bun = food(&system, "Bun", "10.00").await;
    system.foods.delete(bun.id.clone(), admin()).await.unwrap();

    let result = system
        .pricing
        .compute_order_total(vec![LineItem::new(bun.id)])
        .await;
    assert!(matches!(result, Err(CatalogError::NotFound(_))));
}
