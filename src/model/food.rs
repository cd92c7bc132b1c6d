use super::{Audit, FillingId, FoodId, Money, ToppingId};
use crate::framework::document::document;
use serde::{Deserialize, Serialize};

/// A base catalog item that Toppings and Fillings attach to.
///
/// `name` is unique among active Foods. The topping and filling lists keep
/// insertion order and may contain the same id more than once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: FoodId,
    pub name: String,
    pub price: Money,
    pub toppings: Vec<ToppingId>,
    pub fillings: Vec<FillingId>,
    pub audit: Audit,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodCreate {
    pub name: String,
    pub price: Money,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoodUpdate {
    pub name: Option<String>,
    pub price: Option<Money>,
}

impl FoodUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }
}

impl Food {
    fn from_params(id: FoodId, params: FoodCreate, audit: Audit) -> Self {
        Self {
            id,
            name: params.name,
            price: params.price,
            toppings: Vec::new(),
            fillings: Vec::new(),
            audit,
        }
    }
}

document!(Food, create = FoodCreate, collection = foods, label = name, unique = name);
