//! Catalog service: the single entry point shared by the web pages, the REST
//! API and the CLI.

mod mapper;

pub use mapper::map_to_transfer;

use async_trait::async_trait;
use std::sync::Arc;

use crate::models::{BookEntity, BookTo, InvalidStatus, SearchCriteria};
use crate::repository::{BookRepository, RepositoryError};
use crate::search;

/// Operations on the book catalog
#[async_trait]
pub trait BookService: Send + Sync {
    /// Every book in the catalog
    async fn find_all_books(&self) -> Result<Vec<BookTo>, CatalogError>;

    /// Books whose title starts with `title`, ignoring case
    async fn find_books_by_title(&self, title: &str) -> Result<Vec<BookTo>, CatalogError>;

    /// Books whose author line contains `author`, ignoring case
    async fn find_books_by_author(&self, author: &str) -> Result<Vec<BookTo>, CatalogError>;

    /// Book with the given id, if any
    async fn find_book_by_id(&self, id: i64) -> Result<Option<BookTo>, CatalogError>;

    /// Store a new book (no id) or update an existing one, returning the stored book
    async fn save_book(&self, book: BookTo) -> Result<BookTo, CatalogError>;

    /// Delete the book with the given id
    async fn delete_book(&self, id: i64) -> Result<(), CatalogError>;

    /// Multi-field search, see [`crate::search`]
    async fn find_books_by_all_fields(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<BookTo>, CatalogError>;
}

/// Errors returned by [`BookService`]
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Caller supplied a malformed value
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No book with this id
    #[error("Book not found: {0}")]
    NotFound(i64),

    /// Storage failure
    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

impl From<RepositoryError> for CatalogError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(id) => CatalogError::NotFound(id),
            RepositoryError::InvalidId(id) => {
                CatalogError::InvalidArgument(format!("book id must be positive, got {id}"))
            }
            other => CatalogError::Repository(other),
        }
    }
}

impl From<InvalidStatus> for CatalogError {
    fn from(err: InvalidStatus) -> Self {
        CatalogError::InvalidArgument(err.to_string())
    }
}

/// [`BookService`] implementation over a [`BookRepository`]
#[derive(Debug, Clone)]
pub struct CatalogService {
    repository: Arc<dyn BookRepository>,
}

impl CatalogService {
    /// Create a service reading from and writing to `repository`
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl BookService for CatalogService {
    async fn find_all_books(&self) -> Result<Vec<BookTo>, CatalogError> {
        Ok(map_to_transfer(self.repository.find_all().await?))
    }

    async fn find_books_by_title(&self, title: &str) -> Result<Vec<BookTo>, CatalogError> {
        Ok(map_to_transfer(self.repository.find_by_title(title).await?))
    }

    async fn find_books_by_author(&self, author: &str) -> Result<Vec<BookTo>, CatalogError> {
        Ok(map_to_transfer(self.repository.find_by_author(author).await?))
    }

    async fn find_book_by_id(&self, id: i64) -> Result<Option<BookTo>, CatalogError> {
        Ok(self.repository.find_by_id(id).await?.map(BookTo::from))
    }

    async fn save_book(&self, book: BookTo) -> Result<BookTo, CatalogError> {
        let saved = self.repository.save(BookEntity::from(book)).await?;
        tracing::info!(id = ?saved.id, title = %saved.title, "Saved book");
        Ok(saved.into())
    }

    async fn delete_book(&self, id: i64) -> Result<(), CatalogError> {
        self.repository.delete(id).await?;
        tracing::info!(id, "Deleted book");
        Ok(())
    }

    async fn find_books_by_all_fields(
        &self,
        criteria: &SearchCriteria,
    ) -> Result<Vec<BookTo>, CatalogError> {
        let catalog = self.repository.find_all().await?;
        let found = search::search(&catalog, criteria);
        tracing::debug!(
            catalog = catalog.len(),
            found = found.len(),
            "Searched catalog by all fields"
        );
        Ok(map_to_transfer(found.records(&catalog)))
    }
}
