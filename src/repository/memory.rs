//! Process-local book store.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::{BookRepository, RepositoryError};
use crate::models::BookEntity;

/// A book repository kept entirely in memory.
#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    store: RwLock<Store>,
}

#[derive(Debug, Default, Clone)]
struct Store {
    books: BTreeMap<i64, BookEntity>,
    last_id: i64,
}

/// Copy of a store's contents and id sequence, taken before a mutation
#[derive(Debug)]
pub(super) struct Checkpoint(Store);

impl Store {
    fn insert(&mut self, mut book: BookEntity) -> Result<BookEntity, RepositoryError> {
        let id = match book.id {
            Some(id) if id <= 0 => return Err(RepositoryError::InvalidId(id)),
            Some(id) => id,
            None => self
                .last_id
                .checked_add(1)
                .ok_or(RepositoryError::IdSequenceExhausted)?,
        };
        self.last_id = self.last_id.max(id);
        book.id = Some(id);
        self.books.insert(id, book.clone());
        Ok(book)
    }

    fn matching<F>(&self, predicate: F) -> Vec<BookEntity>
    where
        F: Fn(&BookEntity) -> bool,
    {
        self.books.values().filter(|b| predicate(b)).cloned().collect()
    }
}

// Keep explicit ids stable before numbering the rest
fn with_ids_first(books: Vec<BookEntity>) -> impl Iterator<Item = BookEntity> {
    let (with_id, without_id): (Vec<_>, Vec<_>) =
        books.into_iter().partition(|b| b.id.is_some());
    with_id.into_iter().chain(without_id)
}

impl InMemoryBookRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding `books`; books without an id get one.
    ///
    /// Books the store cannot accept are logged and skipped.
    pub fn with_books(books: Vec<BookEntity>) -> Self {
        let mut store = Store::default();
        for book in with_ids_first(books) {
            if let Err(e) = store.insert(book) {
                tracing::warn!("Skipping book: {}", e);
            }
        }
        Self::from_store(store)
    }

    /// Like [`with_books`](Self::with_books), but fails on the first book
    /// the store cannot accept
    pub fn try_with_books(books: Vec<BookEntity>) -> Result<Self, RepositoryError> {
        let mut store = Store::default();
        for book in with_ids_first(books) {
            store.insert(book)?;
        }
        Ok(Self::from_store(store))
    }

    fn from_store(store: Store) -> Self {
        Self {
            store: RwLock::new(store),
        }
    }

    /// Copy of every stored book, in id order
    pub async fn snapshot(&self) -> Vec<BookEntity> {
        self.store.read().await.books.values().cloned().collect()
    }

    /// Number of stored books
    pub async fn len(&self) -> usize {
        self.store.read().await.books.len()
    }

    /// Whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.books.is_empty()
    }

    pub(super) async fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.store.read().await.clone())
    }

    pub(super) async fn restore(&self, checkpoint: Checkpoint) {
        *self.store.write().await = checkpoint.0;
    }
}

#[async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn find_all(&self) -> Result<Vec<BookEntity>, RepositoryError> {
        Ok(self.snapshot().await)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<BookEntity>, RepositoryError> {
        Ok(self.store.read().await.books.get(&id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<BookEntity>, RepositoryError> {
        let prefix = title.to_lowercase();
        let store = self.store.read().await;
        Ok(store.matching(|b| b.title.to_lowercase().starts_with(&prefix)))
    }

    async fn find_by_author(&self, author: &str) -> Result<Vec<BookEntity>, RepositoryError> {
        let needle = author.to_lowercase();
        let store = self.store.read().await;
        Ok(store.matching(|b| b.authors.to_lowercase().contains(&needle)))
    }

    async fn save(&self, book: BookEntity) -> Result<BookEntity, RepositoryError> {
        self.store.write().await.insert(book)
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        match self.store.write().await.books.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepositoryError::NotFound(id)),
        }
    }
}
