//! End-to-end rotation scenarios over the in-process repository and
//! publisher.

mod common;

use banner_rotation::domain::events::EventKind;
use banner_rotation::domain::repositories::RotationRepository;
use banner_rotation::error::AppError;
use rand::Rng;

// ─── Cold start and exploitation ─────────────────────────────────────────────

#[tokio::test]
async fn cold_start_shows_banners_in_link_order() {
    let (service, repository, publisher) = common::memory_service();
    let (slot_id, banners) = common::slot_with_linked_banners(&service, 3).await;
    let group_id = service.add_group("students").await.unwrap().id;

    for expected in &banners {
        let picked = service.next_banner_id(&slot_id, &group_id).await.unwrap();
        assert_eq!(&picked, expected);
    }

    assert_eq!(repository.totals(&slot_id, &group_id), (3, 0));

    let messages = publisher.messages();
    assert_eq!(messages.len(), 3);
    for (msg, expected) in messages.iter().zip(&banners) {
        assert_eq!(msg.kind, EventKind::Show);
        assert_eq!(&msg.banner_id, expected);
        assert_eq!(msg.slot_id, slot_id);
        assert_eq!(msg.group_id, group_id);
    }
}

#[tokio::test]
async fn clicked_banner_wins_after_explore_phase() {
    let (service, _repository, publisher) = common::memory_service();
    let (slot_id, banners) = common::slot_with_linked_banners(&service, 3).await;
    let group_id = service.add_group("students").await.unwrap().id;

    for _ in 0..3 {
        service.next_banner_id(&slot_id, &group_id).await.unwrap();
    }
    service
        .persist_click(&slot_id, &group_id, &banners[1])
        .await
        .unwrap();

    // N = 3: the clicked banner scores 1 + sqrt(2 ln 3), the others
    // sqrt(2 ln 3).
    let fourth = service.next_banner_id(&slot_id, &group_id).await.unwrap();
    assert_eq!(fourth, banners[1]);

    let clicks: Vec<EventKind> = publisher.messages().iter().map(|m| m.kind).collect();
    assert_eq!(
        clicks,
        vec![
            EventKind::Show,
            EventKind::Show,
            EventKind::Show,
            EventKind::Click,
            EventKind::Show,
        ]
    );
}

#[tokio::test]
async fn popular_banners_are_shown_more_often() {
    let iterations = 500;
    let banner_count = 100;
    let popular_count = 10;

    let (service, _repository, _publisher) = common::memory_service();
    let (slot_id, banners) = common::slot_with_linked_banners(&service, banner_count).await;
    let group_id = service.add_group("gamers").await.unwrap().id;
    let popular: Vec<String> = banners[..popular_count].to_vec();

    let mut rng = rand::rng();
    let mut popular_shows = 0;
    let mut unpopular_shows = 0;

    for _ in 0..iterations {
        let picked = service.next_banner_id(&slot_id, &group_id).await.unwrap();
        if popular.contains(&picked) {
            popular_shows += 1;
        } else {
            unpopular_shows += 1;
        }

        // Click only popular banners. Before every popular banner had its
        // first show the click may legitimately be rejected.
        let target = &popular[rng.random_range(0..popular_count)];
        match service.persist_click(&slot_id, &group_id, target).await {
            Ok(()) => {}
            Err(AppError::BannerNotShown { .. }) => {}
            Err(e) => panic!("unexpected error: {e:?}"),
        }
    }

    assert!(
        popular_shows > unpopular_shows,
        "popular banners shown {popular_shows} times, unpopular {unpopular_shows}"
    );
}

// ─── Counter exactness ───────────────────────────────────────────────────────

#[tokio::test]
async fn counters_account_for_every_recorded_show_and_click() {
    let (service, repository, _publisher) = common::memory_service();
    let (slot_id, banners) = common::slot_with_linked_banners(&service, 4).await;
    let group_id = service.add_group("readers").await.unwrap().id;

    let mut shows = 0;
    for _ in 0..25 {
        service.next_banner_id(&slot_id, &group_id).await.unwrap();
        shows += 1;
    }
    let mut clicks = 0;
    for banner_id in &banners {
        for _ in 0..3 {
            service
                .persist_click(&slot_id, &group_id, banner_id)
                .await
                .unwrap();
            clicks += 1;
        }
    }

    assert_eq!(repository.totals(&slot_id, &group_id), (shows, clicks));
}

// ─── Error paths ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn click_before_any_show_is_rejected_without_event() {
    let (service, repository, publisher) = common::memory_service();
    let (slot_id, banners) = common::slot_with_linked_banners(&service, 1).await;
    let group_id = service.add_group("students").await.unwrap().id;

    let err = service
        .persist_click(&slot_id, &group_id, &banners[0])
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::BannerNotShown { .. }));
    assert_eq!(publisher.message_count(), 0);
    assert_eq!(repository.totals(&slot_id, &group_id), (0, 0));
}

#[tokio::test]
async fn selection_fails_on_slot_without_links() {
    let (service, _repository, publisher) = common::memory_service();
    let slot_id = service.add_slot("empty slot").await.unwrap().id;
    let group_id = service.add_group("students").await.unwrap().id;

    let err = service.next_banner_id(&slot_id, &group_id).await.unwrap_err();

    assert!(matches!(err, AppError::NoBannersForSlot { .. }));
    assert_eq!(publisher.message_count(), 0);
}

#[tokio::test]
async fn publish_failure_fails_selection_but_keeps_the_counter() {
    let (service, repository, publisher) = common::memory_service();
    let (slot_id, _banners) = common::slot_with_linked_banners(&service, 1).await;
    let group_id = service.add_group("students").await.unwrap().id;

    publisher.fail_next();
    let err = service.next_banner_id(&slot_id, &group_id).await.unwrap_err();

    assert!(matches!(err, AppError::Broker { .. }));
    // The show was already counted; only the event is missing.
    assert_eq!(repository.totals(&slot_id, &group_id), (1, 0));
    assert_eq!(publisher.message_count(), 0);

    // The next selection succeeds and publishes normally.
    service.next_banner_id(&slot_id, &group_id).await.unwrap();
    assert_eq!(repository.totals(&slot_id, &group_id), (2, 0));
    assert_eq!(publisher.message_count(), 1);
}

// ─── Deletion and cascades ───────────────────────────────────────────────────

#[tokio::test]
async fn deleting_the_slot_cascades_and_breaks_selection() {
    let (service, repository, _publisher) = common::memory_service();
    let (slot_id, _banners) = common::slot_with_linked_banners(&service, 1).await;
    let group_id = service.add_group("students").await.unwrap().id;
    service.next_banner_id(&slot_id, &group_id).await.unwrap();

    service.delete_slot(&slot_id).await.unwrap();

    let stats = repository
        .find_slot_banner_stats(&slot_id, &group_id)
        .await
        .unwrap();
    assert!(stats.is_empty());

    let err = service.next_banner_id(&slot_id, &group_id).await.unwrap_err();
    assert!(matches!(err, AppError::NoBannersForSlot { .. }));
}

#[tokio::test]
async fn deleting_a_banner_removes_its_links_and_stats() {
    let (service, repository, _publisher) = common::memory_service();
    let (slot_id, banners) = common::slot_with_linked_banners(&service, 1).await;
    let group_id = service.add_group("students").await.unwrap().id;
    service.next_banner_id(&slot_id, &group_id).await.unwrap();

    service.delete_banner(&banners[0]).await.unwrap();

    assert_eq!(repository.stat_rows_for_banner(&banners[0]), 0);
    let err = service.next_banner_id(&slot_id, &group_id).await.unwrap_err();
    assert!(matches!(err, AppError::NoBannersForSlot { .. }));
}

#[tokio::test]
async fn delete_is_not_idempotent() {
    let (service, _repository, _publisher) = common::memory_service();
    let banner_id = service.add_banner("promo").await.unwrap().id;

    service.delete_banner(&banner_id).await.unwrap();
    let err = service.delete_banner(&banner_id).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[tokio::test]
async fn unlink_removes_exactly_the_named_pair() {
    // Regression guard for the argument order of delete_banner_from_slot:
    // with two slots sharing a banner, unlinking (slot_a, banner) must not
    // touch slot_b and must not be interpretable as (banner, slot).
    let (service, repository, _publisher) = common::memory_service();
    let slot_a = service.add_slot("slot a").await.unwrap().id;
    let slot_b = service.add_slot("slot b").await.unwrap().id;
    let shared = service.add_banner("shared banner").await.unwrap().id;
    let other = service.add_banner("other banner").await.unwrap().id;

    service.add_banner_to_slot(&slot_a, &shared).await.unwrap();
    service.add_banner_to_slot(&slot_a, &other).await.unwrap();
    service.add_banner_to_slot(&slot_b, &shared).await.unwrap();

    service
        .delete_banner_from_slot(&slot_a, &shared)
        .await
        .unwrap();

    let stats_a = repository
        .find_slot_banner_stats(&slot_a, "any-group")
        .await
        .unwrap();
    let remaining: Vec<&str> = stats_a.iter().map(|s| s.banner_id.as_str()).collect();
    assert_eq!(remaining, vec![other.as_str()]);

    let stats_b = repository
        .find_slot_banner_stats(&slot_b, "any-group")
        .await
        .unwrap();
    assert_eq!(stats_b.len(), 1);
    assert_eq!(stats_b[0].banner_id, shared);
}

// ─── Round-trip ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn created_banner_can_be_fetched_by_returned_id() {
    let (service, repository, _publisher) = common::memory_service();
    let banner = service.add_banner("weekly deals").await.unwrap();

    let fetched = repository.get_banner_by_id(&banner.id).await.unwrap();
    assert_eq!(fetched.description, "weekly deals");
}
