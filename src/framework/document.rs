//! # Document Trait
//!
//! The `Document` trait is the contract every stored kind (Food, Topping, Filling,
//! Order, User, Address) implements so the store can manage it generically. It fixes
//! the typed identifier, the creation payload, where the audit trail lives, and which
//! collection of the [`Database`] holds the kind.
//!
//! # Architecture Note
//! The store never matches on concrete kinds. `Session::insert::<Food>` and
//! `Session::insert::<Order>` run the same code; the associated types make it
//! impossible to insert a `FoodCreate` into the Order collection.
//!
//! # Provided Methods
//! - [`Document::unique_key`] defaults to `None` (no unique index).
//! - [`Document::is_active`] reads the soft-delete flag from the audit trail.

use crate::framework::store::{Collection, Database};
use crate::model::Audit;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug, Display};
use std::hash::Hash;

/// Discriminates the stored kinds in logs and errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Food,
    Topping,
    Filling,
    Order,
    User,
    Address,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Food => "Food",
            Kind::Topping => "Topping",
            Kind::Filling => "Filling",
            Kind::Order => "Order",
            Kind::User => "User",
            Kind::Address => "Address",
        }
    }
}

impl Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait that any stored kind must implement to be managed by the store.
pub trait Document: Clone + Debug + Send + Sync + 'static {
    /// Store-assigned identifier. Must be convertible from `u32` for id generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32> + 'static;

    /// The data required to create a new instance.
    type Create: Send + Debug + 'static;

    const KIND: Kind;

    /// Construct the full document from its assigned id, payload and fresh audit trail.
    fn from_create_params(id: Self::Id, params: Self::Create, audit: Audit) -> Self;

    fn id(&self) -> &Self::Id;

    fn audit(&self) -> &Audit;

    fn audit_mut(&mut self) -> &mut Audit;

    /// Text used by alphabetical sorts.
    fn label(&self) -> &str;

    /// Key that must be unique among active documents of this kind.
    fn unique_key(&self) -> Option<&str> {
        None
    }

    fn is_active(&self) -> bool {
        !self.audit().is_deleted()
    }

    fn collection(db: &Database) -> &Collection<Self>;

    fn collection_mut(db: &mut Database) -> &mut Collection<Self>;
}

/// Implements [`Document`] for a model struct with `id` and `audit` fields.
///
/// The id type is derived from the struct name (`Food` -> `FoodId`), so every kind
/// must follow that naming. The struct must provide `from_params(id, params, audit)`.
macro_rules! document {
    (
        $ty:ident,
        create = $create:ty,
        collection = $collection:ident,
        label = $label:ident
        $(, unique = $unique:ident)?
    ) => {
        paste::paste! {
            impl $crate::framework::Document for $ty {
                type Id = [<$ty Id>];
                type Create = $create;

                const KIND: $crate::framework::Kind = $crate::framework::Kind::$ty;

                fn from_create_params(
                    id: Self::Id,
                    params: Self::Create,
                    audit: $crate::model::Audit,
                ) -> Self {
                    Self::from_params(id, params, audit)
                }

                fn id(&self) -> &Self::Id {
                    &self.id
                }

                fn audit(&self) -> &$crate::model::Audit {
                    &self.audit
                }

                fn audit_mut(&mut self) -> &mut $crate::model::Audit {
                    &mut self.audit
                }

                fn label(&self) -> &str {
                    AsRef::<str>::as_ref(&self.$label)
                }

                $(
                    fn unique_key(&self) -> Option<&str> {
                        Some(AsRef::<str>::as_ref(&self.$unique))
                    }
                )?

                fn collection(
                    db: &$crate::framework::Database,
                ) -> &$crate::framework::Collection<Self> {
                    &db.$collection
                }

                fn collection_mut(
                    db: &mut $crate::framework::Database,
                ) -> &mut $crate::framework::Collection<Self> {
                    &mut db.$collection
                }
            }
        }
    };
}

pub(crate) use document;
