//! Shared state for web handlers.

use std::sync::Arc;

use crate::service::BookService;

/// State shared by every page and REST handler
#[derive(Clone)]
pub struct AppState {
    /// The catalog service all handlers delegate to
    pub service: Arc<dyn BookService>,
}

impl AppState {
    /// Create state around `service`
    #[must_use]
    pub fn new(service: Arc<dyn BookService>) -> Self {
        Self { service }
    }
}
