//! Shared application state for all routes.

use crate::store::PostStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PostStore>,
}

impl AppState {
    pub fn new(store: impl PostStore + 'static) -> Self {
        Self { store: Arc::new(store) }
    }
}
