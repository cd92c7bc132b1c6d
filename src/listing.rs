//! Paged, sorted listings shared by every catalog client.

use crate::error::CatalogError;
use crate::framework::{Document, Filter, FindOptions, Session, Sort};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Recently,
    Oldest,
    AToZ,
    ZToA,
}

/// Creation window, ordering and page selection for a listing.
///
/// The window covers whole UTC days: `created_from` counts from the start of its
/// day and `created_to` up to the end of its day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    pub sort: SortOrder,
    pub page: u32,
    pub limit: u32,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            created_from: None,
            created_to: None,
            sort: SortOrder::Recently,
            page: 1,
            limit: 10,
        }
    }
}

impl ListQuery {
    pub fn sorted(sort: SortOrder) -> Self {
        Self {
            sort,
            ..Self::default()
        }
    }

    pub fn page(mut self, page: u32, limit: u32) -> Self {
        self.page = page;
        self.limit = limit;
        self
    }

    pub fn created_between(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        self.created_from = from;
        self.created_to = to;
        self
    }

    fn validate(&self) -> Result<(), CatalogError> {
        if self.page == 0 || self.limit == 0 {
            return Err(CatalogError::bad_request(
                "page and limit must be positive",
            ));
        }
        if let (Some(from), Some(to)) = (self.created_from, self.created_to) {
            if from.date_naive() > to.date_naive() {
                return Err(CatalogError::bad_request(
                    "created_from must not be after created_to",
                ));
            }
        }
        Ok(())
    }

    fn sort_for<T: Document>(&self) -> Sort<T> {
        match self.sort {
            SortOrder::Recently => Sort::Newest,
            SortOrder::Oldest => Sort::Oldest,
            SortOrder::AToZ => Sort::label_ascending(),
            SortOrder::ZToA => Sort::label_descending(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: u32,
    pub total: usize,
    pub num_pages: usize,
}

/// Runs `filter` restricted to the query's creation window and returns one page.
pub fn paginate<T: Document>(
    session: &Session<'_>,
    filter: Filter<T>,
    query: &ListQuery,
) -> Result<Page<T>, CatalogError> {
    query.validate()?;
    let from = query.created_from.map(|at| at.date_naive());
    let to = query.created_to.map(|at| at.date_naive());
    let filter = filter.and(move |doc: &T| {
        let created = doc.audit().created_at.date_naive();
        from.map_or(true, |from| created >= from) && to.map_or(true, |to| created <= to)
    });

    let limit = query.limit as usize;
    let skip = (query.page as usize - 1) * limit;
    let total = session.count(&filter);
    let items = session.find_many(
        &filter,
        &FindOptions::sorted(query.sort_for()).page(skip, limit),
    );
    Ok(Page {
        items,
        current_page: query.page,
        total,
        num_pages: total.div_ceil(limit),
    })
}

/// Case-insensitive substring match.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::Database;
    use crate::model::{Food, FoodCreate, Money};
    use rstest::rstest;

    fn seeded() -> Database {
        let mut db = Database::new();
        let mut session = db.session();
        for name in ["Bun", "Arepa", "Wrap"] {
            session
                .insert::<Food>(
                    FoodCreate {
                        name: name.into(),
                        price: Money::from_minor(100).unwrap(),
                    },
                    None,
                )
                .unwrap();
        }
        db
    }

    #[rstest]
    #[case(SortOrder::Recently, ["Wrap", "Arepa", "Bun"])]
    #[case(SortOrder::Oldest, ["Bun", "Arepa", "Wrap"])]
    #[case(SortOrder::AToZ, ["Arepa", "Bun", "Wrap"])]
    #[case(SortOrder::ZToA, ["Wrap", "Bun", "Arepa"])]
    fn test_sort_orders(#[case] sort: SortOrder, #[case] expected: [&str; 3]) {
        let mut db = seeded();
        let query = ListQuery::sorted(sort);
        let page = paginate(&db.session(), Filter::<Food>::all(), &query).unwrap();
        let names: Vec<_> = page.items.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_page_counts() {
        let mut db = seeded();
        let query = ListQuery::sorted(SortOrder::Oldest).page(2, 2);
        let page = paginate(&db.session(), Filter::<Food>::all(), &query).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "Wrap");
        assert_eq!((page.current_page, page.total, page.num_pages), (2, 3, 2));
    }

    #[test]
    fn test_zero_limit_is_bad_request() {
        let mut db = seeded();
        let query = ListQuery::default().page(1, 0);
        let err = paginate(&db.session(), Filter::<Food>::all(), &query).unwrap_err();
        assert!(matches!(err, CatalogError::BadRequest(_)));
    }

    #[test]
    fn test_future_window_is_empty() {
        let mut db = seeded();
        let tomorrow = Utc::now() + chrono::Duration::days(1);
        let query = ListQuery::default().created_between(Some(tomorrow), None);
        let page = paginate(&db.session(), Filter::<Food>::all(), &query).unwrap();
        assert_eq!((page.total, page.num_pages), (0, 0));
    }

    #[test]
    fn test_window_snaps_to_whole_days() {
        let mut db = seeded();
        let first = db.collection::<Food>().iter().next().unwrap().audit.created_at;
        let query = ListQuery::default().created_between(Some(first), Some(first));
        let page = paginate(&db.session(), Filter::<Food>::all(), &query).unwrap();
        assert_eq!(page.total, 3);
    }

    #[test]
    fn test_bounds_are_compared_by_day() {
        use chrono::TimeZone;
        let evening = Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap();
        let morning = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let next_day = Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap();

        let same_day = ListQuery::default().created_between(Some(evening), Some(morning));
        assert!(same_day.validate().is_ok());
        let reversed = ListQuery::default().created_between(Some(next_day), Some(evening));
        assert!(matches!(reversed.validate(), Err(CatalogError::BadRequest(_))));
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Buenos Aires", "aires"));
        assert!(!contains_ignore_case("Lima", "aires"));
    }
}
