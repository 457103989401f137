//! Application context shared by all request handlers (via Axum state).

use std::sync::Arc;

use imagebin_core::config::Config;
use imagebin_core::ImageStore;

/// Application context shared by all request handlers.
///
/// This is cheaply cloneable because it only holds `Arc`s. The store is
/// injected at construction rather than living in a global, so tests can
/// run against isolated fresh instances.
#[derive(Clone)]
pub struct AppContext {
    /// The in-memory image store; the single source of truth.
    pub store: Arc<ImageStore>,
    /// Immutable application configuration snapshot.
    pub config: Arc<Config>,
}

impl AppContext {
    /// Build a context with a fresh empty store.
    pub fn new(config: Config) -> Self {
        Self {
            store: Arc::new(ImageStore::new()),
            config: Arc::new(config),
        }
    }
}
