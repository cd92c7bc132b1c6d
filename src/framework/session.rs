//! # Session
//!
//! The synchronous view of the database a job runs against. Inside the actor a
//! transaction's session wraps a staged copy; everything it writes is either
//! swapped in together or thrown away together.

use crate::framework::document::Document;
use crate::framework::error::StoreError;
use crate::framework::query::{Filter, FindOptions, Sort};
use crate::framework::store::Database;
use crate::model::{Audit, UserId};
use tracing::debug;

pub struct Session<'a> {
    db: &'a mut Database,
    writes: usize,
}

impl<'a> Session<'a> {
    pub(crate) fn new(db: &'a mut Database) -> Self {
        Self { db, writes: 0 }
    }

    /// Number of documents written through this session.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Assigns the next id of the kind and stores a new document.
    ///
    /// Fails with `Conflict` when the document's unique key is already held by an
    /// active document of the same kind.
    pub fn insert<T: Document>(
        &mut self,
        params: T::Create,
        created_by: Option<UserId>,
    ) -> Result<T, StoreError> {
        let id = T::collection_mut(self.db).allocate_id();
        let doc = T::from_create_params(id, params, Audit::created(created_by));
        self.check_unique(&doc)?;
        T::collection_mut(self.db).insert(doc.clone());
        self.writes += 1;
        debug!(kind = %T::KIND, id = %doc.id(), "Inserted");
        Ok(doc)
    }

    /// First match in insertion order.
    pub fn find_one<T: Document>(&self, filter: &Filter<T>) -> Result<T, StoreError> {
        T::collection(self.db)
            .iter()
            .find(|doc| filter.matches(doc))
            .cloned()
            .ok_or_else(|| StoreError::not_found(T::KIND, filter.key()))
    }

    /// Active document by id.
    pub fn find_by_id<T: Document>(&self, id: &T::Id) -> Result<T, StoreError> {
        match T::collection(self.db).get(id) {
            Some(doc) if doc.is_active() => Ok(doc.clone()),
            _ => Err(StoreError::not_found(T::KIND, id.to_string())),
        }
    }

    pub fn find_many<T: Document>(&self, filter: &Filter<T>, options: &FindOptions<T>) -> Vec<T> {
        let collection = T::collection(self.db);
        let mut found: Vec<&T> = match &options.sort {
            Sort::Newest => collection.iter().rev().filter(|d| filter.matches(d)).collect(),
            _ => collection.iter().filter(|d| filter.matches(d)).collect(),
        };
        if let Sort::By(compare) = &options.sort {
            found.sort_by(|a, b| compare(*a, *b));
        }
        found
            .into_iter()
            .skip(options.skip)
            .take(options.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }

    pub fn count<T: Document>(&self, filter: &Filter<T>) -> usize {
        T::collection(self.db)
            .iter()
            .filter(|doc| filter.matches(doc))
            .count()
    }

    pub fn exists<T: Document>(&self, filter: &Filter<T>) -> bool {
        T::collection(self.db).iter().any(|doc| filter.matches(doc))
    }

    /// Patches the first match and returns it as written.
    pub fn update_one<T: Document>(
        &mut self,
        filter: &Filter<T>,
        patch: impl FnOnce(&mut T),
    ) -> Result<T, StoreError> {
        let id = self.find_one(filter)?.id().clone();
        let mut doc = T::collection(self.db)
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(T::KIND, id.to_string()))?;
        patch(&mut doc);
        self.check_unique(&doc)?;
        T::collection_mut(self.db).insert(doc.clone());
        self.writes += 1;
        debug!(kind = %T::KIND, %id, "Updated");
        Ok(doc)
    }

    /// Patches every match and returns how many were written.
    pub fn update_many<T: Document>(
        &mut self,
        filter: &Filter<T>,
        patch: impl Fn(&mut T),
    ) -> Result<usize, StoreError> {
        let ids: Vec<T::Id> = T::collection(self.db)
            .iter()
            .filter(|doc| filter.matches(doc))
            .map(|doc| doc.id().clone())
            .collect();
        for id in &ids {
            let Some(mut doc) = T::collection(self.db).get(id).cloned() else {
                continue;
            };
            patch(&mut doc);
            self.check_unique(&doc)?;
            T::collection_mut(self.db).insert(doc);
        }
        self.writes += ids.len();
        debug!(kind = %T::KIND, filter = filter.key(), updated = ids.len(), "Updated many");
        Ok(ids.len())
    }

    fn check_unique<T: Document>(&self, doc: &T) -> Result<(), StoreError> {
        let Some(key) = doc.unique_key() else {
            return Ok(());
        };
        if !doc.is_active() {
            return Ok(());
        }
        let taken = T::collection(self.db).iter().any(|other| {
            other.is_active() && other.id() != doc.id() && other.unique_key() == Some(key)
        });
        if taken {
            return Err(StoreError::Conflict {
                kind: T::KIND,
                key: key.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Food, FoodCreate, GarnishCreate, Money, Topping};

    fn food(name: &str, cents: i64) -> FoodCreate {
        FoodCreate {
            name: name.to_string(),
            price: Money::from_minor(cents).unwrap(),
        }
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let mut db = Database::new();
        let mut session = db.session();
        let bun: Food = session.insert(food("Bun", 1000), None).unwrap();
        let wrap: Food = session.insert(food("Wrap", 800), None).unwrap();
        assert_eq!(bun.id.as_str(), "food_1");
        assert_eq!(wrap.id.as_str(), "food_2");
        assert_eq!(session.writes(), 2);
    }

    #[test]
    fn test_ids_are_scoped_per_kind() {
        let mut db = Database::new();
        let mut session = db.session();
        session.insert::<Food>(food("Bun", 1000), None).unwrap();
        let cheese: Topping = session
            .insert(
                GarnishCreate {
                    name: "Cheese".into(),
                    price: Money::from_minor(200).unwrap(),
                },
                None,
            )
            .unwrap();
        assert_eq!(cheese.id.as_str(), "topping_1");
    }

    #[test]
    fn test_deleted_documents_are_hidden_unless_opted_in() {
        let mut db = Database::new();
        let mut session = db.session();
        let bun: Food = session.insert(food("Bun", 1000), None).unwrap();
        session
            .update_one(&Filter::<Food>::by_id(&bun.id), |f| {
                f.audit.mark_deleted(None)
            })
            .unwrap();

        assert!(matches!(
            session.find_by_id::<Food>(&bun.id),
            Err(StoreError::NotFound { .. })
        ));
        assert_eq!(session.count(&Filter::<Food>::all()), 0);
        let found = session
            .find_one(&Filter::<Food>::by_id(&bun.id).include_deleted())
            .unwrap();
        assert!(found.audit.is_deleted());
    }

    #[test]
    fn test_unique_key_conflicts_only_with_active_documents() {
        let mut db = Database::new();
        let mut session = db.session();
        let bun: Food = session.insert(food("Bun", 1000), None).unwrap();

        let err = session.insert::<Food>(food("Bun", 900), None).unwrap_err();
        assert!(matches!(err, StoreError::Conflict { .. }));

        session
            .update_one(&Filter::<Food>::by_id(&bun.id), |f| {
                f.audit.mark_deleted(None)
            })
            .unwrap();
        assert!(session.insert::<Food>(food("Bun", 900), None).is_ok());
    }

    #[test]
    fn test_find_many_sorts_and_pages() {
        let mut db = Database::new();
        let mut session = db.session();
        for name in ["Bun", "Arepa", "Wrap", "Crepe"] {
            session.insert::<Food>(food(name, 100), None).unwrap();
        }

        let newest = session.find_many(
            &Filter::<Food>::all(),
            &FindOptions::sorted(Sort::Newest).page(0, 2),
        );
        let names: Vec<_> = newest.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Crepe", "Wrap"]);

        let alphabetical = session.find_many(
            &Filter::<Food>::all(),
            &FindOptions::sorted(Sort::label_ascending()).page(1, 2),
        );
        let names: Vec<_> = alphabetical.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["Bun", "Crepe"]);
    }

    #[test]
    fn test_update_many_reports_count() {
        let mut db = Database::new();
        let mut session = db.session();
        for name in ["Bun", "Wrap", "Crepe"] {
            session.insert::<Food>(food(name, 100), None).unwrap();
        }
        let cheap = Money::from_minor(50).unwrap();
        let updated = session
            .update_many(
                &Filter::<Food>::matching("name != Wrap", |f: &Food| f.name != "Wrap"),
                |f| f.price = cheap,
            )
            .unwrap();
        assert_eq!(updated, 2);
    }

    #[test]
    fn test_update_one_missing_is_not_found() {
        let mut db = Database::new();
        let mut session = db.session();
        let err = session
            .update_one(&Filter::<Food>::by_id(&"food_9".into()), |_| {})
            .unwrap_err();
        assert_eq!(
            err,
            StoreError::NotFound {
                kind: crate::framework::Kind::Food,
                key: "food_9".to_string()
            }
        );
        assert_eq!(session.writes(), 0);
    }
}
