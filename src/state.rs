//! Shared application state injected into all handlers.

use std::sync::Arc;

use crate::application::services::LinkService;

/// Application state shared across request handlers.
///
/// Cheap to clone; holds the service behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
}

impl AppState {
    /// Creates the application state.
    pub fn new(link_service: Arc<LinkService>) -> Self {
        Self { link_service }
    }
}
