//! Application state - shared across all handlers.

use std::sync::Arc;

use sogram_core::ports::{PostRepository, UserRepository};
use sogram_infra::store::{MemoryPostRepository, MemoryUserRepository};

/// Shared application state: the two document collections behind their
/// repository ports.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
}

impl AppState {
    /// Build the application state backed by the in-process store.
    pub fn new() -> Self {
        tracing::info!("Application state initialized (in-process document store)");

        Self {
            users: Arc::new(MemoryUserRepository::new()),
            posts: Arc::new(MemoryPostRepository::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
