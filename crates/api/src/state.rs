//! Application state shared across handlers.

use std::sync::Arc;

use crate::store::ProductStore;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Holds the storage collaborator behind the
/// [`ProductStore`] trait so the router can run against any implementation.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Arc<dyn ProductStore>,
}

impl AppState {
    /// Create a new application state around a store.
    #[must_use]
    pub fn new(store: Arc<dyn ProductStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { store }),
        }
    }

    /// Get a reference to the product store.
    #[must_use]
    pub fn store(&self) -> &dyn ProductStore {
        self.inner.store.as_ref()
    }
}
