//! Toppings and Fillings.
//!
//! The two kinds are symmetric: same fields, same lifecycle. They differ only in
//! which relation list on [`Food`] points at them, which [`Garnish`] captures so the
//! association and client code can be written once.

use super::{Audit, FillingId, Food, Money, ToppingId};
use crate::framework::document::{document, Document};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GarnishCreate {
    pub name: String,
    pub price: Money,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GarnishUpdate {
    pub name: Option<String>,
    pub price: Option<Money>,
}

impl GarnishUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none()
    }
}

/// A Topping or Filling together with the Food relation that references it.
pub trait Garnish: Document<Create = GarnishCreate> {
    /// Name of the relation field on Food (`toppings` / `fillings`).
    const RELATION: &'static str;

    fn name(&self) -> &str;

    fn price(&self) -> Money;

    fn apply(&mut self, update: GarnishUpdate);

    fn relation(food: &Food) -> &[Self::Id];

    fn relation_mut(food: &mut Food) -> &mut Vec<Self::Id>;
}

macro_rules! garnish {
    ($(#[$meta:meta])* $ty:ident, $relation:ident) => {
        paste::paste! {
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
            pub struct $ty {
                pub id: [<$ty Id>],
                pub name: String,
                pub price: Money,
                pub audit: Audit,
            }

            impl $ty {
                fn from_params(id: [<$ty Id>], params: GarnishCreate, audit: Audit) -> Self {
                    Self {
                        id,
                        name: params.name,
                        price: params.price,
                        audit,
                    }
                }
            }

            document!($ty, create = GarnishCreate, collection = $relation, label = name);

            impl Garnish for $ty {
                const RELATION: &'static str = stringify!($relation);

                fn name(&self) -> &str {
                    &self.name
                }

                fn price(&self) -> Money {
                    self.price
                }

                fn apply(&mut self, update: GarnishUpdate) {
                    if let Some(name) = update.name {
                        self.name = name;
                    }
                    if let Some(price) = update.price {
                        self.price = price;
                    }
                }

                fn relation(food: &Food) -> &[[<$ty Id>]] {
                    &food.$relation
                }

                fn relation_mut(food: &mut Food) -> &mut Vec<[<$ty Id>]> {
                    &mut food.$relation
                }
            }
        }
    };
}

garnish!(
    /// An add-on priced on top of a Food, e.g. Cheese.
    Topping,
    toppings
);

garnish!(
    /// A filling priced on top of a Food, e.g. Beef.
    Filling,
    fillings
);
