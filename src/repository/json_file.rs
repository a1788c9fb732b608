//! JSON snapshot persistence for the book catalog.
//!
//! The whole catalog lives in memory; after each mutation it is written to
//! `<path>` as a single JSON document:
//!
//! ```text
//! {
//!   "version": 1,
//!   "books": [ { "id": 1, "title": "...", "authors": "...", "status": "FREE" } ]
//! }
//! ```
//!
//! Writes go to `<path>.tmp` first and are renamed over the snapshot.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use super::memory::Checkpoint;
use super::{BookRepository, InMemoryBookRepository, RepositoryError};
use crate::models::BookEntity;

const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct CatalogSnapshot {
    version: u32,
    books: Vec<BookEntity>,
}

/// Book repository backed by a JSON snapshot file
#[derive(Debug)]
pub struct JsonFileBookRepository {
    path: PathBuf,
    books: InMemoryBookRepository,
    /// Serializes mutation + write so snapshots land in mutation order
    write_guard: Mutex<()>,
}

impl JsonFileBookRepository {
    /// Open the snapshot at `path`, starting empty if the file does not exist
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let path = path.into();

        let books = match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let snapshot: CatalogSnapshot = serde_json::from_slice(&bytes)?;
                if snapshot.version != SNAPSHOT_VERSION {
                    return Err(RepositoryError::Serialization(format!(
                        "unsupported snapshot version {}",
                        snapshot.version
                    )));
                }
                tracing::info!(
                    "Loaded {} books from {}",
                    snapshot.books.len(),
                    path.display()
                );
                snapshot.books
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("No catalog snapshot at {}, starting empty", path.display());
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            books: InMemoryBookRepository::try_with_books(books)?,
            write_guard: Mutex::new(()),
        })
    }

    /// Location of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the snapshot, rolling the store back to `checkpoint` if that fails
    async fn commit(&self, checkpoint: Checkpoint) -> Result<(), RepositoryError> {
        if let Err(e) = self.persist().await {
            tracing::error!("Failed to write {}: {}", self.path.display(), e);
            self.books.restore(checkpoint).await;
            return Err(e);
        }
        Ok(())
    }

    async fn persist(&self) -> Result<(), RepositoryError> {
        let snapshot = CatalogSnapshot {
            version: SNAPSHOT_VERSION,
            books: self.books.snapshot().await,
        };
        let content = serde_json::to_vec_pretty(&snapshot)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        tracing::debug!(
            "Wrote {} books to {}",
            snapshot.books.len(),
            self.path.display()
        );
        Ok(())
    }
}

#[async_trait]
impl BookRepository for JsonFileBookRepository {
    async fn find_all(&self) -> Result<Vec<BookEntity>, RepositoryError> {
        self.books.find_all().await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<BookEntity>, RepositoryError> {
        self.books.find_by_id(id).await
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<BookEntity>, RepositoryError> {
        self.books.find_by_title(title).await
    }

    async fn find_by_author(&self, author: &str) -> Result<Vec<BookEntity>, RepositoryError> {
        self.books.find_by_author(author).await
    }

    async fn save(&self, book: BookEntity) -> Result<BookEntity, RepositoryError> {
        let _guard = self.write_guard.lock().await;
        let checkpoint = self.books.checkpoint().await;
        let saved = self.books.save(book).await?;
        self.commit(checkpoint).await?;
        Ok(saved)
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let _guard = self.write_guard.lock().await;
        let checkpoint = self.books.checkpoint().await;
        self.books.delete(id).await?;
        self.commit(checkpoint).await
    }
}
