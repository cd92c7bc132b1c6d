//! In-memory collections owned by the store actor.

use crate::framework::document::Document;
use crate::framework::session::Session;
use crate::model::{Address, Filling, Food, Order, Topping, User};
use std::collections::HashMap;

/// One keyed collection of documents, iterated in insertion order.
#[derive(Debug, Clone)]
pub struct Collection<T: Document> {
    docs: HashMap<T::Id, T>,
    order: Vec<T::Id>,
    next_id: u32,
}

impl<T: Document> Default for Collection<T> {
    fn default() -> Self {
        Self {
            docs: HashMap::new(),
            order: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T: Document> Collection<T> {
    /// Number of documents, deleted ones included.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.docs.get(id)
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.order.iter().filter_map(|id| self.docs.get(id))
    }

    pub(crate) fn allocate_id(&mut self) -> T::Id {
        let id = T::Id::from(self.next_id);
        self.next_id += 1;
        id
    }

    pub(crate) fn insert(&mut self, doc: T) {
        let id = doc.id().clone();
        if self.docs.insert(id.clone(), doc).is_none() {
            self.order.push(id);
        }
    }
}

/// Every collection the catalog persists.
///
/// Cloning is how transactions stage their writes: the actor clones the database,
/// lets the job mutate the copy and swaps it in on commit.
#[derive(Debug, Clone, Default)]
pub struct Database {
    pub(crate) foods: Collection<Food>,
    pub(crate) toppings: Collection<Topping>,
    pub(crate) fillings: Collection<Filling>,
    pub(crate) orders: Collection<Order>,
    pub(crate) users: Collection<User>,
    pub(crate) addresses: Collection<Address>,
}

impl Database {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn collection<T: Document>(&self) -> &Collection<T> {
        T::collection(self)
    }

    /// Opens a session directly on this database, bypassing the actor.
    /// Used to seed fixtures and by synchronous callers such as tests.
    pub fn session(&mut self) -> Session<'_> {
        Session::new(self)
    }
}
