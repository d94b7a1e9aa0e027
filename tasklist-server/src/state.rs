//! Application state shared across handlers

use std::sync::Arc;

use crate::engine::EngineProvider;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    engine: EngineProvider,
}

impl AppState {
    pub fn new(engine: EngineProvider) -> Self {
        Self {
            inner: Arc::new(AppStateInner { engine }),
        }
    }

    pub fn engine(&self) -> &EngineProvider {
        &self.inner.engine
    }
}
