//! Core data models for books and catalog searches.

mod book;
mod search;

pub use book::{BookEntity, BookStatus, BookTo, InvalidStatus};
pub use search::SearchCriteria;
