//! Search criteria for the multi-field catalog search.

use serde::{Deserialize, Serialize};

use super::BookStatus;

/// Criteria for a multi-field catalog search.
///
/// Every criterion is optional. `None` means "not specified", which is
/// different from searching for an empty string. Boundary layers that receive
/// form or query values should build criteria with [`SearchCriteria::from_fields`]
/// so that blank inputs become `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Case-insensitive title fragment
    pub title: Option<String>,

    /// Author fragment (first predicate) or exact author line (refining predicate)
    pub authors: Option<String>,

    /// Exact lending status
    pub status: Option<BookStatus>,
}

impl SearchCriteria {
    /// Create empty criteria
    pub fn new() -> Self {
        Self::default()
    }

    /// Build criteria from raw boundary values, treating empty strings as absent
    pub fn from_fields(title: &str, authors: &str, status: Option<BookStatus>) -> Self {
        Self {
            title: non_empty(title),
            authors: non_empty(authors),
            status,
        }
    }

    /// Set the title criterion
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the authors criterion
    pub fn authors(mut self, authors: impl Into<String>) -> Self {
        self.authors = Some(authors.into());
        self
    }

    /// Set the status criterion
    pub fn status(mut self, status: BookStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Whether no criterion is specified
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.authors.is_none() && self.status.is_none()
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
