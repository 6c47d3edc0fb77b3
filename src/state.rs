//! Application state shared across HTTP handlers.

use std::sync::Arc;

use crate::application::services::RotationService;
use crate::domain::publisher::EventPublisher;
use crate::domain::repositories::RotationRepository;

/// Shared state injected into handlers. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub rotation_service: Arc<RotationService>,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn RotationRepository>,
        publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            rotation_service: Arc::new(RotationService::new(repository, publisher)),
        }
    }
}
