//! # Filters and Sorts
//!
//! Every read and update in the store goes through a [`Filter`]. A filter is
//! active-only unless [`Filter::include_deleted`] is called, so soft-deleted
//! documents stay invisible to callers that did not ask for them.

use crate::framework::document::Document;
use std::cmp::Ordering;
use std::fmt;

type Predicate<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;
type Comparator<T> = Box<dyn Fn(&T, &T) -> Ordering + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    ActiveOnly,
    IncludeDeleted,
}

/// Selects documents of one kind.
pub struct Filter<T: Document> {
    predicates: Vec<Predicate<T>>,
    key: String,
    scope: Scope,
}

impl<T: Document> Filter<T> {
    /// Matches every active document.
    pub fn all() -> Self {
        Self {
            predicates: Vec::new(),
            key: "*".to_string(),
            scope: Scope::ActiveOnly,
        }
    }

    pub fn by_id(id: &T::Id) -> Self {
        let wanted = id.clone();
        Self::matching(id.to_string(), move |doc: &T| doc.id() == &wanted)
    }

    /// `key` describes the filter in logs and `NotFound` errors.
    pub fn matching(
        key: impl Into<String>,
        predicate: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            predicates: vec![Box::new(predicate)],
            key: key.into(),
            scope: Scope::ActiveOnly,
        }
    }

    /// Adds another condition; a document must satisfy all of them.
    pub fn and(mut self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.predicates.push(Box::new(predicate));
        self
    }

    pub fn include_deleted(mut self) -> Self {
        self.scope = Scope::IncludeDeleted;
        self
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn matches(&self, doc: &T) -> bool {
        if self.scope == Scope::ActiveOnly && !doc.is_active() {
            return false;
        }
        self.predicates.iter().all(|p| p(doc))
    }
}

impl<T: Document> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Filter")
            .field("kind", &T::KIND)
            .field("key", &self.key)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Result ordering for [`FindOptions`].
///
/// `Oldest` and `Newest` follow insertion order, which is creation order.
pub enum Sort<T: Document> {
    Oldest,
    Newest,
    By(Comparator<T>),
}

impl<T: Document> Sort<T> {
    pub fn by(compare: impl Fn(&T, &T) -> Ordering + Send + Sync + 'static) -> Self {
        Self::By(Box::new(compare))
    }

    pub fn label_ascending() -> Self {
        Self::by(|a: &T, b: &T| a.label().cmp(b.label()))
    }

    pub fn label_descending() -> Self {
        Self::by(|a: &T, b: &T| b.label().cmp(a.label()))
    }
}

impl<T: Document> fmt::Debug for Sort<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sort::Oldest => f.write_str("Oldest"),
            Sort::Newest => f.write_str("Newest"),
            Sort::By(_) => f.write_str("By(..)"),
        }
    }
}

#[derive(Debug)]
pub struct FindOptions<T: Document> {
    pub sort: Sort<T>,
    pub skip: usize,
    pub limit: Option<usize>,
}

impl<T: Document> Default for FindOptions<T> {
    fn default() -> Self {
        Self {
            sort: Sort::Oldest,
            skip: 0,
            limit: None,
        }
    }
}

impl<T: Document> FindOptions<T> {
    pub fn sorted(sort: Sort<T>) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    pub fn page(mut self, skip: usize, limit: usize) -> Self {
        self.skip = skip;
        self.limit = Some(limit);
        self
    }
}
