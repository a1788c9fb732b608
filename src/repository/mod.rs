//! Book persistence.
//!
//! The [`BookRepository`] trait is the catalog source the service layer reads
//! from and writes to. Two implementations ship with the crate:
//!
//! - [`InMemoryBookRepository`]: a process-local store, used by tests and when
//!   no storage path is configured
//! - [`JsonFileBookRepository`]: the in-memory store plus a JSON snapshot file
//!   that is rewritten after every mutation
//!
//! Repositories assign ids on first save, starting at 1 and never reusing an id.

mod json_file;
mod memory;

pub use json_file::JsonFileBookRepository;
pub use memory::InMemoryBookRepository;

use crate::models::{BookEntity, BookStatus};
use async_trait::async_trait;

/// Storage interface for book records
#[async_trait]
pub trait BookRepository: Send + Sync + std::fmt::Debug {
    /// Every stored book, in id order
    async fn find_all(&self) -> Result<Vec<BookEntity>, RepositoryError>;

    /// Book with the given id, if stored
    async fn find_by_id(&self, id: i64) -> Result<Option<BookEntity>, RepositoryError>;

    /// Books whose title starts with `title`, ignoring case
    async fn find_by_title(&self, title: &str) -> Result<Vec<BookEntity>, RepositoryError>;

    /// Books whose author line contains `author`, ignoring case
    async fn find_by_author(&self, author: &str) -> Result<Vec<BookEntity>, RepositoryError>;

    /// Insert (no id) or replace (id present) a book and return the stored record
    async fn save(&self, book: BookEntity) -> Result<BookEntity, RepositoryError>;

    /// Remove the book with the given id
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}

/// Errors raised by repositories
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// No book with this id
    #[error("Book not found: {0}")]
    NotFound(i64),

    /// Explicit ids must be positive
    #[error("Invalid book id: {0}")]
    InvalidId(i64),

    /// Every id up to `i64::MAX` has been handed out
    #[error("Book id sequence exhausted")]
    IdSequenceExhausted,

    /// Snapshot file could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot file could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Serialization(err.to_string())
    }
}

/// Demo catalog loaded into an empty store when seeding is enabled
pub fn seed_books() -> Vec<BookEntity> {
    [
        ("First Book", "Jan Kowalski", BookStatus::Free),
        ("Second Book", "Zbigniew Nowak", BookStatus::Free),
        ("Third Book", "Janusz Jankowski", BookStatus::Loan),
        ("Starter Kit Book", "Kacper Ossoliński", BookStatus::Free),
        ("Z kamerą wśród zwierząt", "Antoni Gucwiński", BookStatus::Missing),
        ("Dzieci z Bullerbyn", "Astrid Lindgren", BookStatus::Loan),
    ]
    .into_iter()
    .map(|(title, authors, status)| BookEntity::new(None, title, authors, status))
    .collect()
}

/// Save `books` into `repository` if it is currently empty.
///
/// Returns the number of books inserted.
pub async fn seed_if_empty(
    repository: &dyn BookRepository,
    books: Vec<BookEntity>,
) -> Result<usize, RepositoryError> {
    if !repository.find_all().await?.is_empty() {
        return Ok(0);
    }

    let count = books.len();
    for book in books {
        repository.save(book).await?;
    }
    tracing::info!("Seeded catalog with {} books", count);
    Ok(count)
}
