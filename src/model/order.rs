use super::{Audit, FillingId, FoodId, Money, OrderId, Quantity, ToppingId, UserId};
use crate::framework::document::document;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Fulfilment state of an order. Orders are created `Pending`; nothing in the
/// catalog moves them between states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

impl AsRef<str> for OrderStatus {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One priced selection within an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub food: FoodId,
    #[serde(default)]
    pub toppings: Vec<ToppingId>,
    #[serde(default)]
    pub fillings: Vec<FillingId>,
    #[serde(default)]
    pub quantity: Quantity,
}

impl LineItem {
    pub fn new(food: FoodId) -> Self {
        Self {
            food,
            toppings: Vec::new(),
            fillings: Vec::new(),
            quantity: Quantity::ONE,
        }
    }

    pub fn with_topping(mut self, topping: ToppingId) -> Self {
        self.toppings.push(topping);
        self
    }

    pub fn with_filling(mut self, filling: FillingId) -> Self {
        self.fillings.push(filling);
        self
    }

    pub fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = quantity;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub ordered_by: UserId,
    pub items: Vec<LineItem>,
    /// Price snapshot taken at creation.
    pub total_amount: Money,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub audit: Audit,
}

#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub ordered_by: UserId,
    pub items: Vec<LineItem>,
    pub total_amount: Money,
}

impl Order {
    fn from_params(id: OrderId, params: OrderCreate, audit: Audit) -> Self {
        Self {
            id,
            ordered_by: params.ordered_by,
            items: params.items,
            total_amount: params.total_amount,
            order_date: audit.created_at,
            status: OrderStatus::Pending,
            audit,
        }
    }
}

document!(Order, create = OrderCreate, collection = orders, label = status);
