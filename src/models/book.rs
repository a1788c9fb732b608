//! Book models: the persisted entity, its transfer object, and the lending status.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lending status of a book in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookStatus {
    Free,
    Loan,
    Missing,
}

impl BookStatus {
    /// All statuses, in display order
    pub const ALL: [BookStatus; 3] = [BookStatus::Free, BookStatus::Loan, BookStatus::Missing];

    /// Returns the wire name of the status
    pub fn as_str(&self) -> &'static str {
        match self {
            BookStatus::Free => "FREE",
            BookStatus::Loan => "LOAN",
            BookStatus::Missing => "MISSING",
        }
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a [`BookStatus`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid book status '{0}': expected one of FREE, LOAN, MISSING")]
pub struct InvalidStatus(pub String);

impl FromStr for BookStatus {
    type Err = InvalidStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FREE" => Ok(BookStatus::Free),
            "LOAN" => Ok(BookStatus::Loan),
            "MISSING" => Ok(BookStatus::Missing),
            _ => Err(InvalidStatus(s.to_string())),
        }
    }
}

/// A book as stored by a repository.
///
/// `id` is `None` until the record has been saved; repositories assign it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookEntity {
    pub id: Option<i64>,
    pub title: String,
    /// Free-form author line, not a structured list
    pub authors: String,
    pub status: BookStatus,
}

impl BookEntity {
    /// Create a new entity
    pub fn new(
        id: Option<i64>,
        title: impl Into<String>,
        authors: impl Into<String>,
        status: BookStatus,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            authors: authors.into(),
            status,
        }
    }
}

/// Transfer object handed to the web layer, the REST API and the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookTo {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    pub authors: String,
    pub status: BookStatus,
}

impl BookTo {
    /// Create a new transfer object
    pub fn new(
        id: Option<i64>,
        title: impl Into<String>,
        authors: impl Into<String>,
        status: BookStatus,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            authors: authors.into(),
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!("FREE".parse::<BookStatus>().unwrap(), BookStatus::Free);
        assert_eq!("loan".parse::<BookStatus>().unwrap(), BookStatus::Loan);
        assert_eq!(" Missing ".parse::<BookStatus>().unwrap(), BookStatus::Missing);
    }

    #[test]
    fn test_status_parse_rejects_unknown_values() {
        let err = "LOST".parse::<BookStatus>().unwrap_err();
        assert_eq!(err, InvalidStatus("LOST".to_string()));
        assert!("".parse::<BookStatus>().is_err());
    }

    #[test]
    fn test_status_serializes_upper_case() {
        let json = serde_json::to_string(&BookStatus::Missing).unwrap();
        assert_eq!(json, "\"MISSING\"");

        let status: BookStatus = serde_json::from_str("\"LOAN\"").unwrap();
        assert_eq!(status, BookStatus::Loan);
    }

    #[test]
    fn test_book_to_id_defaults_to_none() {
        let book: BookTo =
            serde_json::from_str(r#"{"title":"Dune","authors":"Frank Herbert","status":"FREE"}"#)
                .unwrap();
        assert_eq!(book.id, None);
        assert_eq!(book.status, BookStatus::Free);
    }
}
