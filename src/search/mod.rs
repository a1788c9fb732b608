//! Multi-field catalog search.
//!
//! A search runs three filter stages in a fixed order over an immutable
//! snapshot of the catalog:
//!
//! 1. [`filter_by_title`] scans the full catalog for a case-insensitive title
//!    fragment. Without a title it yields an empty set, it never passes the
//!    catalog through.
//! 2. [`filter_by_authors`] either scans the full catalog for a case-insensitive
//!    author fragment (running set empty) or keeps only running members whose
//!    author line equals the query exactly, case included (running set non-empty).
//! 3. [`filter_by_status`] does the same split with exact status equality.
//!
//! Absent criteria leave the running set untouched, except for the title stage.
//! Consequently a search with no criteria at all returns nothing; callers that
//! want the whole catalog must ask the repository directly.
//!
//! Members of a [`ResultSet`] are positions in the snapshot, so two records
//! with identical fields are still distinct members.
//!
//! ```rust
//! use webstore::models::{BookEntity, BookStatus, SearchCriteria};
//! use webstore::search::search;
//!
//! let catalog = vec![
//!     BookEntity::new(Some(1), "First", "Author", BookStatus::Free),
//!     BookEntity::new(Some(2), "Second", "Author2", BookStatus::Loan),
//! ];
//!
//! let found = search(&catalog, &SearchCriteria::new().authors("author2"));
//! let ids: Vec<_> = found.records(&catalog).iter().map(|b| b.id).collect();
//! assert_eq!(ids, vec![Some(2)]);
//! ```

use std::collections::BTreeSet;

use crate::models::{BookEntity, BookStatus, SearchCriteria};

/// Identity-keyed set of catalog members produced by the filter stages.
///
/// Iteration follows catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    members: BTreeSet<usize>,
}

impl ResultSet {
    /// Create an empty result set
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the set has no members
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether the catalog position is a member
    pub fn contains(&self, position: usize) -> bool {
        self.members.contains(&position)
    }

    /// Resolve the members against the snapshot they were built from
    pub fn records<'a>(&self, catalog: &'a [BookEntity]) -> Vec<&'a BookEntity> {
        self.members
            .iter()
            .filter_map(|&position| catalog.get(position))
            .collect()
    }

    /// Keep only the members whose record satisfies `predicate`
    fn refine<F>(self, catalog: &[BookEntity], predicate: F) -> Self
    where
        F: Fn(&BookEntity) -> bool,
    {
        self.members
            .into_iter()
            .filter(|&position| catalog.get(position).is_some_and(&predicate))
            .collect()
    }

    /// Every catalog position whose record satisfies `predicate`
    fn scan<F>(catalog: &[BookEntity], predicate: F) -> Self
    where
        F: Fn(&BookEntity) -> bool,
    {
        catalog
            .iter()
            .enumerate()
            .filter(|(_, book)| predicate(book))
            .map(|(position, _)| position)
            .collect()
    }
}

impl FromIterator<usize> for ResultSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

/// Run the title, author and status stages over `catalog`
pub fn search(catalog: &[BookEntity], criteria: &SearchCriteria) -> ResultSet {
    let by_title = filter_by_title(catalog, criteria.title.as_deref());
    tracing::debug!(matches = by_title.len(), "title stage");

    let by_authors = filter_by_authors(catalog, by_title, criteria.authors.as_deref());
    tracing::debug!(matches = by_authors.len(), "authors stage");

    let by_status = filter_by_status(catalog, by_authors, criteria.status);
    tracing::debug!(matches = by_status.len(), "status stage");

    by_status
}

/// Title stage: case-insensitive substring over the full catalog.
///
/// Returns an empty set when `title` is `None`.
pub fn filter_by_title(catalog: &[BookEntity], title: Option<&str>) -> ResultSet {
    let Some(title) = title else {
        return ResultSet::new();
    };

    let needle = title.to_lowercase();
    ResultSet::scan(catalog, |book| book.title.to_lowercase().contains(&needle))
}

/// Author stage.
///
/// With an empty running set this is the first predicate and scans the full
/// catalog for a case-insensitive fragment. With a non-empty running set it
/// refines that set by exact, case-sensitive equality of the author line.
pub fn filter_by_authors(
    catalog: &[BookEntity],
    current: ResultSet,
    authors: Option<&str>,
) -> ResultSet {
    let Some(authors) = authors else {
        return current;
    };

    if current.is_empty() {
        let needle = authors.to_lowercase();
        ResultSet::scan(catalog, |book| book.authors.to_lowercase().contains(&needle))
    } else {
        current.refine(catalog, |book| book.authors == authors)
    }
}

/// Status stage: exact equality, over the full catalog when the running set
/// is empty and over the running set otherwise.
pub fn filter_by_status(
    catalog: &[BookEntity],
    current: ResultSet,
    status: Option<BookStatus>,
) -> ResultSet {
    let Some(status) = status else {
        return current;
    };

    if current.is_empty() {
        ResultSet::scan(catalog, |book| book.status == status)
    } else {
        current.refine(catalog, |book| book.status == status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<BookEntity> {
        vec![
            BookEntity::new(Some(1), "First", "Author", BookStatus::Free),
            BookEntity::new(Some(2), "Second", "Author2", BookStatus::Free),
            BookEntity::new(Some(3), "Third", "Author3", BookStatus::Free),
        ]
    }

    fn ids(set: &ResultSet, catalog: &[BookEntity]) -> Vec<i64> {
        set.records(catalog).iter().filter_map(|b| b.id).collect()
    }

    #[test]
    fn test_title_stage_without_title_is_empty() {
        let books = catalog();
        assert!(filter_by_title(&books, None).is_empty());
    }

    #[test]
    fn test_title_stage_is_case_insensitive() {
        let books = catalog();
        let set = filter_by_title(&books, Some("IRS"));
        assert_eq!(ids(&set, &books), vec![1]);
    }

    #[test]
    fn test_authors_stage_passes_through_when_absent() {
        let books = catalog();
        let current: ResultSet = [0, 2].into_iter().collect();
        let set = filter_by_authors(&books, current.clone(), None);
        assert_eq!(set, current);
    }

    #[test]
    fn test_authors_stage_scans_catalog_when_running_set_is_empty() {
        let books = catalog();
        let set = filter_by_authors(&books, ResultSet::new(), Some("AUTHOR"));
        assert_eq!(ids(&set, &books), vec![1, 2, 3]);
    }

    #[test]
    fn test_authors_stage_refines_by_exact_match() {
        let books = catalog();
        let current: ResultSet = [0, 1].into_iter().collect();

        let set = filter_by_authors(&books, current.clone(), Some("Author2"));
        assert_eq!(ids(&set, &books), vec![2]);

        // Substring and case-folded forms do not match while refining
        assert!(filter_by_authors(&books, current.clone(), Some("Auth")).is_empty());
        assert!(filter_by_authors(&books, current, Some("author2")).is_empty());
    }

    #[test]
    fn test_status_stage_branches() {
        let mut books = catalog();
        books[1].status = BookStatus::Loan;

        let set = filter_by_status(&books, ResultSet::new(), Some(BookStatus::Loan));
        assert_eq!(ids(&set, &books), vec![2]);

        let current: ResultSet = [0, 2].into_iter().collect();
        let set = filter_by_status(&books, current.clone(), Some(BookStatus::Loan));
        assert!(set.is_empty());

        let set = filter_by_status(&books, current.clone(), None);
        assert_eq!(set, current);
    }

    #[test]
    fn test_identical_records_are_distinct_members() {
        let books = vec![
            BookEntity::new(Some(7), "Twin", "Same", BookStatus::Free),
            BookEntity::new(Some(8), "Twin", "Same", BookStatus::Free),
        ];
        let set = search(&books, &SearchCriteria::new().title("twin"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_records_ignores_positions_outside_catalog() {
        let books = catalog();
        let set: ResultSet = [1, 42].into_iter().collect();
        assert_eq!(ids(&set, &books), vec![2]);
        assert!(set.contains(42));
    }

    #[test]
    fn test_search_all_fields() {
        let books = catalog();
        let criteria = SearchCriteria::new()
            .title("first")
            .authors("Author")
            .status(BookStatus::Free);
        assert_eq!(ids(&search(&books, &criteria), &books), vec![1]);
    }
}
