//! Banner rotation core: administrative operations, show/click recording
//! and the UCB1 selection policy.

use std::sync::Arc;

use crate::domain::entities::{Banner, Slot, SlotBannerStat, SocialGroup};
use crate::domain::events::EventMessage;
use crate::domain::publisher::EventPublisher;
use crate::domain::repositories::RotationRepository;
use crate::error::AppError;

/// Orchestrates the repository and the event publisher.
///
/// The service holds no mutable state of its own; all shared state lives
/// behind the repository, so concurrent calls coordinate only through the
/// repository's transactional guarantees. Errors are never retried and never
/// swallowed — every failure propagates to the caller.
pub struct RotationService {
    repository: Arc<dyn RotationRepository>,
    publisher: Arc<dyn EventPublisher>,
}

impl RotationService {
    pub fn new(repository: Arc<dyn RotationRepository>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self {
            repository,
            publisher,
        }
    }

    pub async fn add_slot(&self, description: &str) -> Result<Slot, AppError> {
        let id = self.repository.add_slot(description).await?;
        Ok(Slot::new(id, description.to_string()))
    }

    pub async fn delete_slot(&self, slot_id: &str) -> Result<(), AppError> {
        self.repository.delete_slot(slot_id).await
    }

    pub async fn add_banner(&self, description: &str) -> Result<Banner, AppError> {
        let id = self.repository.add_banner(description).await?;
        Ok(Banner::new(id, description.to_string()))
    }

    pub async fn delete_banner(&self, banner_id: &str) -> Result<(), AppError> {
        self.repository.delete_banner(banner_id).await
    }

    pub async fn add_group(&self, description: &str) -> Result<SocialGroup, AppError> {
        let id = self.repository.add_group(description).await?;
        Ok(SocialGroup::new(id, description.to_string()))
    }

    pub async fn delete_group(&self, group_id: &str) -> Result<(), AppError> {
        self.repository.delete_group(group_id).await
    }

    pub async fn add_banner_to_slot(&self, slot_id: &str, banner_id: &str) -> Result<(), AppError> {
        self.repository.add_banner_to_slot(slot_id, banner_id).await
    }

    pub async fn delete_banner_from_slot(
        &self,
        slot_id: &str,
        banner_id: &str,
    ) -> Result<(), AppError> {
        self.repository
            .delete_banner_from_slot(slot_id, banner_id)
            .await
    }

    /// Records a click and publishes the corresponding event.
    ///
    /// The counter is incremented first; if the subsequent publish fails the
    /// call fails but the increment is not rolled back (at-least-once
    /// counters, at-most-once events).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BannerNotShown`] when no show was ever recorded
    /// for this (slot, group, banner) — no event is published in that case.
    pub async fn persist_click(
        &self,
        slot_id: &str,
        group_id: &str,
        banner_id: &str,
    ) -> Result<(), AppError> {
        self.repository
            .persist_click(slot_id, group_id, banner_id)
            .await?;
        metrics::counter!("rotation_clicks_total").increment(1);

        self.publisher
            .publish(&EventMessage::click(slot_id, group_id, banner_id))
            .await?;
        Ok(())
    }

    /// Picks the banner to display next for (slot, group) and records the
    /// show.
    ///
    /// Selection runs over the stats snapshot returned by the repository:
    /// every linked banner is shown once before UCB1 exploitation begins.
    /// The winner's show counter is incremented before the event is
    /// published; a publish failure fails the call without rolling the
    /// counter back.
    ///
    /// Two selections racing on the same (slot, group) may read the same
    /// snapshot and pick the same winner — accepted, since the repository
    /// serializes the increments and UCB1 tolerates transient staleness.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NoBannersForSlot`] when the slot has no linked
    /// banners.
    pub async fn next_banner_id(&self, slot_id: &str, group_id: &str) -> Result<String, AppError> {
        let stats = self
            .repository
            .find_slot_banner_stats(slot_id, group_id)
            .await?;

        let Some(winner) = select_banner(&stats) else {
            return Err(AppError::NoBannersForSlot {
                slot_id: slot_id.to_string(),
            });
        };
        let winner_id = winner.banner_id.clone();
        tracing::debug!(slot_id, group_id, banner_id = %winner_id, "selected banner");

        self.repository
            .persist_show(slot_id, group_id, &winner_id)
            .await?;
        metrics::counter!("rotation_shows_total").increment(1);

        self.publisher
            .publish(&EventMessage::show(slot_id, group_id, &winner_id))
            .await?;
        Ok(winner_id)
    }
}

/// Picks the next banner from a stats snapshot. Returns `None` iff the
/// snapshot is empty.
///
/// Explore-first: the first entry (in repository order) that was never shown
/// wins outright. Once every entry has at least one show, the entry with the
/// strictly greatest UCB1 score wins. The running maximum starts at 0.0 with
/// the first entry as the initial candidate, so when every score is <= 0
/// (e.g. one show each and no clicks with N = 1) the first entry wins; an
/// equal-score later entry never displaces an earlier one.
fn select_banner(stats: &[SlotBannerStat]) -> Option<&SlotBannerStat> {
    if stats.is_empty() {
        return None;
    }
    if let Some(unshown) = stats.iter().find(|s| s.shows() == 0) {
        return Some(unshown);
    }

    let total_shows: i64 = stats.iter().map(SlotBannerStat::shows).sum();

    let mut winner = &stats[0];
    let mut max_score = 0.0_f64;
    for stat in stats {
        let score = ucb1_score(stat.clicks() as f64, stat.shows() as f64, total_shows as f64);
        // Strict > keeps the earliest maximum; no tolerance.
        if score > max_score {
            max_score = score;
            winner = stat;
        }
    }
    Some(winner)
}

/// UCB1: average reward plus the exploration bonus.
///
/// `shows >= 1` and `total_shows >= 1` hold by construction (the
/// explore-first branch fires before this is ever evaluated).
fn ucb1_score(clicks: f64, shows: f64, total_shows: f64) -> f64 {
    clicks / shows + ((2.0 * total_shows.ln()) / shows).sqrt()
}
