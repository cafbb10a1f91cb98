//! Application state management.
//!
//! This module provides the shared application state that is
//! accessible to all request handlers via Axum's State extractor.

use std::sync::Arc;

use crate::domain::DogRepository;
use crate::infra::PrometheusHandle;

use super::service::DogService;

/// Shared application state for the Axum web server.
///
/// Handlers see the repository only through [`DogService`], so any
/// [`DogRepository`] implementation can be plugged in.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<DogService>,

    /// Renders GET /metrics; `None` when no recorder was installed.
    pub metrics_handle: Option<Arc<PrometheusHandle>>,
}

impl AppState {
    #[must_use]
    pub fn new(repository: Arc<dyn DogRepository>) -> Self {
        Self {
            service: Arc::new(DogService::new(repository)),
            metrics_handle: None,
        }
    }

    #[must_use]
    pub fn with_metrics(mut self, handle: Option<Arc<PrometheusHandle>>) -> Self {
        self.metrics_handle = handle;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockDogRepository;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new(Arc::new(MockDogRepository::new()));

        assert!(Arc::strong_count(&state.service) >= 1);
        assert!(state.metrics_handle.is_none());
    }

    #[test]
    fn test_app_state_is_clone() {
        let state = AppState::new(Arc::new(MockDogRepository::new()));
        let cloned = state.clone();

        assert!(Arc::ptr_eq(&state.service, &cloned.service));
    }
}
