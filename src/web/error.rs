//! Error types for the REST API and the HTML pages.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use super::views::{self, view_names};
use crate::service::CatalogError;

/// Error detail in a REST error payload
#[derive(Debug, Clone, Serialize)]
pub struct ErrorDetail {
    /// Stable error code identifier
    pub error_code: String,
    /// Human readable message
    pub message: String,
}

/// REST error payload: `{"error": {"error_code": ..., "message": ...}}`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error returned by REST handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Request parameters or body were invalid
    #[error("{message}")]
    InvalidArgument { message: String },

    /// Requested book does not exist
    #[error("{message}")]
    NotFound { message: String },

    /// Anything else
    #[error("{message}")]
    Internal { message: String },
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::InvalidArgument { .. } => (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT"),
            Self::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            Self::Internal { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL"),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        let message = err.to_string();
        match err {
            CatalogError::InvalidArgument(_) => Self::InvalidArgument { message },
            CatalogError::NotFound(_) => Self::NotFound { message },
            CatalogError::Repository(_) => Self::Internal { message },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "REST request failed");
        } else {
            tracing::warn!(error = %self, "REST request rejected");
        }

        let payload = ErrorResponse {
            error: ErrorDetail {
                error_code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(payload)).into_response()
    }
}

/// Error returned by HTML page handlers; rendered with the `error` view
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Template error: {0}")]
    Render(#[from] minijinja::Error),
}

impl PageError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(CatalogError::InvalidArgument(_)) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::Catalog(CatalogError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Catalog(CatalogError::Repository(_)) | Self::Render(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Page request failed");
        }

        let message = self.to_string();
        let ctx = minijinja::context! {
            status => status.as_u16(),
            errorMessage => message,
        };
        match views::render(view_names::ERROR, ctx) {
            Ok(html) => (status, html).into_response(),
            Err(e) => {
                tracing::error!(error = %e, "Failed to render error page");
                (status, Html("Internal error".to_string())).into_response()
            }
        }
    }
}
