//! Integration tests for the multi-field catalog search.
//!
//! These exercise the three-stage pipeline through the public API, both on
//! raw catalog slices and through the catalog service.

use std::sync::Arc;

use webstore::models::{BookEntity, BookStatus, SearchCriteria};
use webstore::repository::InMemoryBookRepository;
use webstore::search::{filter_by_authors, filter_by_status, filter_by_title, search, ResultSet};
use webstore::service::{BookService, CatalogService};

fn catalog() -> Vec<BookEntity> {
    vec![
        BookEntity::new(Some(1), "first", "author", BookStatus::Free),
        BookEntity::new(Some(2), "second", "author2", BookStatus::Free),
        BookEntity::new(Some(3), "third", "author3", BookStatus::Free),
    ]
}

fn library() -> Vec<BookEntity> {
    vec![
        BookEntity::new(Some(1), "First Book", "Jan Kowalski", BookStatus::Free),
        BookEntity::new(Some(2), "Second Book", "Zbigniew Nowak", BookStatus::Free),
        BookEntity::new(Some(3), "Third Book", "Janusz Jankowski", BookStatus::Loan),
        BookEntity::new(Some(4), "Dzieci z Bullerbyn", "Astrid Lindgren", BookStatus::Loan),
        BookEntity::new(Some(5), "Pan Tadeusz", "Adam Mickiewicz", BookStatus::Missing),
    ]
}

fn ids(set: &ResultSet, catalog: &[BookEntity]) -> Vec<i64> {
    set.records(catalog).iter().filter_map(|book| book.id).collect()
}

#[test]
fn test_no_criteria_finds_nothing() {
    for books in [catalog(), library(), Vec::new()] {
        assert!(search(&books, &SearchCriteria::new()).is_empty());
    }
}

#[test]
fn test_title_only_is_case_insensitive_substring() {
    let books = library();
    let found = search(&books, &SearchCriteria::new().title("BOOK"));
    assert_eq!(ids(&found, &books), vec![1, 2, 3]);

    let found = search(&books, &SearchCriteria::new().title("tadeusz"));
    assert_eq!(ids(&found, &books), vec![5]);
}

#[test]
fn test_authors_after_title_match_exactly() {
    let books = library();

    // fragment of the author line does not refine
    let criteria = SearchCriteria::new().title("book").authors("Kowalski");
    assert!(search(&books, &criteria).is_empty());

    let criteria = SearchCriteria::new().title("book").authors("Jan Kowalski");
    assert_eq!(ids(&search(&books, &criteria), &books), vec![1]);

    // exact match is case-sensitive
    let criteria = SearchCriteria::new().title("book").authors("jan kowalski");
    assert!(search(&books, &criteria).is_empty());
}

#[test]
fn test_authors_without_title_is_case_insensitive_substring() {
    let books = library();
    let found = search(&books, &SearchCriteria::new().authors("JAN"));
    assert_eq!(ids(&found, &books), vec![1, 3]);
}

#[test]
fn test_authors_when_title_matches_nothing_scans_catalog() {
    let books = library();
    let criteria = SearchCriteria::new().title("nonexistent").authors("nowak");
    assert_eq!(ids(&search(&books, &criteria), &books), vec![2]);
}

#[test]
fn test_status_narrows_running_set() {
    let books = library();
    let criteria = SearchCriteria::new().title("book").status(BookStatus::Loan);
    assert_eq!(ids(&search(&books, &criteria), &books), vec![3]);

    let criteria = SearchCriteria::new().authors("jan").status(BookStatus::Free);
    assert_eq!(ids(&search(&books, &criteria), &books), vec![1]);
}

#[test]
fn test_search_is_idempotent() {
    let books = library();
    let criteria = SearchCriteria::new().title("book").status(BookStatus::Free);
    let first = search(&books, &criteria);
    let second = search(&books, &criteria);
    assert_eq!(first, second);
}

#[test]
fn test_scenario_title_authors_status() {
    let books = catalog();
    let criteria = SearchCriteria::from_fields("first", "author", Some(BookStatus::Free));
    assert_eq!(ids(&search(&books, &criteria), &books), vec![1]);
}

#[test]
fn test_scenario_authors_only() {
    let books = catalog();
    let criteria = SearchCriteria::from_fields("", "author2", None);
    assert_eq!(ids(&search(&books, &criteria), &books), vec![2]);
}

#[test]
fn test_scenario_status_only() {
    let books = catalog();
    let criteria = SearchCriteria::from_fields("", "", Some(BookStatus::Free));
    assert_eq!(ids(&search(&books, &criteria), &books), vec![1, 2, 3]);
}

#[test]
fn test_failed_exact_author_falls_back_to_status_scan() {
    // "author" != "Author", so the author stage empties the running set and
    // the status stage scans the whole catalog again.
    let books = vec![
        BookEntity::new(Some(1), "First", "Author", BookStatus::Free),
        BookEntity::new(Some(2), "Second", "Author2", BookStatus::Free),
        BookEntity::new(Some(3), "Third", "Author3", BookStatus::Free),
    ];
    let criteria = SearchCriteria::from_fields("first", "author", Some(BookStatus::Free));
    assert_eq!(ids(&search(&books, &criteria), &books), vec![1, 2, 3]);
}

#[test]
fn test_identical_records_stay_distinct() {
    let books = vec![
        BookEntity::new(Some(10), "Solaris", "Stanisław Lem", BookStatus::Free),
        BookEntity::new(Some(11), "Solaris", "Stanisław Lem", BookStatus::Free),
    ];
    let found = search(&books, &SearchCriteria::new().title("solaris"));
    assert_eq!(found.len(), 2);
    assert_eq!(ids(&found, &books), vec![10, 11]);
}

#[test]
fn test_stages_compose_like_search() {
    let books = library();
    let by_title = filter_by_title(&books, Some("book"));
    let by_authors = filter_by_authors(&books, by_title, None);
    let by_status = filter_by_status(&books, by_authors, Some(BookStatus::Free));

    let criteria = SearchCriteria::new().title("book").status(BookStatus::Free);
    assert_eq!(by_status, search(&books, &criteria));
}

#[tokio::test]
async fn test_service_search_returns_transfer_objects() {
    let repository = Arc::new(InMemoryBookRepository::with_books(library()));
    let service = CatalogService::new(repository);

    let criteria = SearchCriteria::from_fields("", "", Some(BookStatus::Loan));
    let found = service.find_books_by_all_fields(&criteria).await.unwrap();
    let titles: Vec<_> = found.iter().map(|book| book.title.as_str()).collect();
    assert_eq!(titles, vec!["Third Book", "Dzieci z Bullerbyn"]);

    let none = service
        .find_books_by_all_fields(&SearchCriteria::new())
        .await
        .unwrap();
    assert!(none.is_empty());
}
