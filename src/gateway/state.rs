use std::sync::Arc;

use crate::library::LibraryCoordinator;

/// Gateway application state (shared, read-only)
#[derive(Clone)]
pub struct AppState {
    pub coordinator: Arc<LibraryCoordinator>,
}

impl AppState {
    pub fn new(coordinator: Arc<LibraryCoordinator>) -> Self {
        Self { coordinator }
    }
}
