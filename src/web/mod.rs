//! HTTP front end: server-rendered pages and the JSON REST API.
//!
//! Both route groups share one [`AppState`] and delegate every operation to
//! the [`BookService`](crate::service::BookService) it holds.

mod error;
mod pages;
mod params;
mod rest;
mod state;
pub mod views;

pub use error::{ApiError, ErrorDetail, ErrorResponse, PageError};
pub use params::{parse_status, BookForm, IdQuery};
pub use rest::ALL_BOOKS_DELETED;
pub use state::AppState;

use axum::extract::OriginalUri;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(pages::routes())
        .merge(rest::routes())
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn not_found(uri: OriginalUri) -> PageError {
    PageError::NotFound(uri.0.path().to_string())
}

/// Serve the application on `listener` until Ctrl-C
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("Webstore listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(e) => tracing::error!("Failed to listen for shutdown signal: {}", e),
    }
}
