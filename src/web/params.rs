//! Query-string and form parameters shared by the pages and the REST API.

use serde::Deserialize;

use crate::models::{BookStatus, BookTo, SearchCriteria};
use crate::service::CatalogError;

/// `?id=N`
#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    #[serde(default)]
    pub id: Option<String>,
}

impl IdQuery {
    /// The required numeric id
    pub fn id(&self) -> Result<i64, CatalogError> {
        match self.id.as_deref().map(str::trim) {
            None | Some("") => Err(CatalogError::InvalidArgument(
                "missing required parameter 'id'".to_string(),
            )),
            Some(raw) => raw
                .parse()
                .map_err(|_| CatalogError::InvalidArgument(format!("invalid id '{raw}'"))),
        }
    }
}

/// Book fields as submitted by a form or a query string.
///
/// Only `id`, `title`, `authors` and `status` are bound; anything else is
/// ignored. Missing fields read as empty strings.
#[derive(Debug, Default, Deserialize)]
pub struct BookForm {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub status: String,
}

impl BookForm {
    /// Search criteria with blank fields treated as absent
    pub fn criteria(&self) -> Result<SearchCriteria, CatalogError> {
        Ok(SearchCriteria::from_fields(
            &self.title,
            &self.authors,
            parse_status(&self.status)?,
        ))
    }

    /// Whether title, authors and status are all filled in
    pub fn is_complete(&self) -> bool {
        !self.title.trim().is_empty()
            && !self.authors.trim().is_empty()
            && !self.status.trim().is_empty()
    }

    /// The book described by the form; status is required
    pub fn to_book(&self) -> Result<BookTo, CatalogError> {
        let id = match self.id.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                raw.parse()
                    .map_err(|_| CatalogError::InvalidArgument(format!("invalid id '{raw}'")))?,
            ),
        };
        let status = parse_status(&self.status)?.ok_or_else(|| {
            CatalogError::InvalidArgument("missing required field 'status'".to_string())
        })?;

        Ok(BookTo::new(id, self.title.trim(), self.authors.trim(), status))
    }
}

/// Parse an optional status, where an empty value means "not specified"
pub fn parse_status(raw: &str) -> Result<Option<BookStatus>, CatalogError> {
    let raw = raw.trim();
    if raw.is_empty() {
        Ok(None)
    } else {
        Ok(Some(raw.parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(title: &str, authors: &str, status: &str) -> BookForm {
        BookForm {
            id: None,
            title: title.to_string(),
            authors: authors.to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn test_id_query() {
        let query = IdQuery {
            id: Some("12".to_string()),
        };
        assert_eq!(query.id().unwrap(), 12);

        assert!(IdQuery::default().id().is_err());
        let query = IdQuery {
            id: Some("abc".to_string()),
        };
        assert!(matches!(query.id(), Err(CatalogError::InvalidArgument(_))));
    }

    #[test]
    fn test_criteria_from_blank_form_is_empty() {
        let criteria = form("", "", "").criteria().unwrap();
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_criteria_rejects_unknown_status() {
        let err = form("", "", "BURNT").criteria().unwrap_err();
        assert!(matches!(err, CatalogError::InvalidArgument(_)));
    }

    #[test]
    fn test_is_complete() {
        assert!(form("Title", "Author", "FREE").is_complete());
        assert!(!form("Title", "", "FREE").is_complete());
        assert!(!form("Title", "Author", "").is_complete());
    }

    #[test]
    fn test_to_book() {
        let mut f = form(" Lalka ", "Prus", "loan");
        f.id = Some("4".to_string());
        let book = f.to_book().unwrap();
        assert_eq!(book, BookTo::new(Some(4), "Lalka", "Prus", BookStatus::Loan));

        assert!(form("Lalka", "Prus", "").to_book().is_err());
    }
}
