#![allow(dead_code)]

use std::sync::Arc;

use banner_rotation::application::services::RotationService;
use banner_rotation::infrastructure::broker::RecordingPublisher;
use banner_rotation::infrastructure::persistence::MemoryRotationRepository;
use banner_rotation::state::AppState;

/// Rotation service over in-process backends, plus handles to both so tests
/// can inspect state and inject publish failures.
pub fn memory_service() -> (
    RotationService,
    Arc<MemoryRotationRepository>,
    Arc<RecordingPublisher>,
) {
    let repository = Arc::new(MemoryRotationRepository::new());
    let publisher = Arc::new(RecordingPublisher::new());
    let service = RotationService::new(repository.clone(), publisher.clone());
    (service, repository, publisher)
}

/// Application state over in-process backends, for handler tests.
pub fn memory_state() -> (
    AppState,
    Arc<MemoryRotationRepository>,
    Arc<RecordingPublisher>,
) {
    let repository = Arc::new(MemoryRotationRepository::new());
    let publisher = Arc::new(RecordingPublisher::new());
    let state = AppState::new(repository.clone(), publisher.clone());
    (state, repository, publisher)
}

/// Creates a slot with `n` linked banners; returns (slot_id, banner ids in
/// link order).
pub async fn slot_with_linked_banners(
    service: &RotationService,
    n: usize,
) -> (String, Vec<String>) {
    let slot = service.add_slot("slot under test").await.unwrap();
    let mut banners = Vec::with_capacity(n);
    for i in 0..n {
        let banner = service.add_banner(&format!("banner {i}")).await.unwrap();
        service
            .add_banner_to_slot(&slot.id, &banner.id)
            .await
            .unwrap();
        banners.push(banner.id);
    }
    (slot.id, banners)
}
