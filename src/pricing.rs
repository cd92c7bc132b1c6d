//! # Pricing Engine
//!
//! Resolves current prices for line items and totals them:
//!
//! ```text
//! unit     = food.price + sum(topping prices) + sum(filling prices)
//! subtotal = unit * quantity
//! total    = sum(subtotals)
//! ```
//!
//! Every listed reference is priced, so a topping listed twice is charged twice.
//! A missing or soft-deleted reference fails the whole computation with `NotFound`.
//! All arithmetic is checked fixed-point decimal.

use crate::error::CatalogError;
use crate::framework::{Session, StoreClient};
use crate::model::{Filling, Food, FoodId, LineItem, Money, Quantity, Topping};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineQuote {
    pub food: FoodId,
    pub unit_price: Money,
    pub quantity: Quantity,
    pub subtotal: Money,
}

/// Per-line breakdown plus the order total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub lines: Vec<LineQuote>,
    pub total: Money,
}

pub fn price_line(session: &Session<'_>, item: &LineItem) -> Result<LineQuote, CatalogError> {
    let food = session.find_by_id::<Food>(&item.food)?;
    let mut unit_price = food.price;
    for id in &item.toppings {
        unit_price = unit_price.checked_add(session.find_by_id::<Topping>(id)?.price)?;
    }
    for id in &item.fillings {
        unit_price = unit_price.checked_add(session.find_by_id::<Filling>(id)?.price)?;
    }
    let subtotal = unit_price.times(item.quantity)?;
    Ok(LineQuote {
        food: food.id,
        unit_price,
        quantity: item.quantity,
        subtotal,
    })
}

pub fn quote(session: &Session<'_>, items: &[LineItem]) -> Result<Quote, CatalogError> {
    let lines = items
        .iter()
        .map(|item| price_line(session, item))
        .collect::<Result<Vec<_>, _>>()?;
    let total = lines
        .iter()
        .try_fold(Money::ZERO, |total, line| total.checked_add(line.subtotal))?;
    debug!(lines = lines.len(), %total, "Priced");
    Ok(Quote { lines, total })
}

/// Async front end to pricing, reading current prices from the store.
#[derive(Clone, Debug)]
pub struct PricingEngine {
    store: StoreClient,
}

impl PricingEngine {
    pub fn new(store: StoreClient) -> Self {
        Self { store }
    }

    #[instrument(skip(self, items), fields(lines = items.len()))]
    pub async fn compute_order_total(&self, items: Vec<LineItem>) -> Result<Money, CatalogError> {
        Ok(self.quote(items).await?.total)
    }

    #[instrument(skip(self, items), fields(lines = items.len()))]
    pub async fn quote(&self, items: Vec<LineItem>) -> Result<Quote, CatalogError> {
        debug!(?items, "quote called");
        self.store
            .read("quote", move |session| quote(session, &items))
            .await
    }
}
