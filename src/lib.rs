//! # Webstore
//!
//! A small library catalog: books with a title, an author line and a lending
//! status, served as HTML pages and as a JSON REST API.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (BookEntity, BookTo, SearchCriteria)
//! - [`search`]: The multi-field catalog search engine
//! - [`repository`]: Book persistence behind the [`BookRepository`] trait
//! - [`service`]: Catalog operations behind the [`BookService`] trait
//! - [`web`]: HTTP pages, REST endpoints and the server loop
//! - [`config`]: Configuration management
//! - [`ui`]: Terminal output for the command-line client

pub mod config;
pub mod models;
pub mod repository;
pub mod search;
pub mod service;
pub mod ui;
pub mod web;

// Re-export commonly used types
pub use models::{BookEntity, BookStatus, BookTo, SearchCriteria};
pub use repository::BookRepository;
pub use service::{BookService, CatalogError, CatalogService};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
