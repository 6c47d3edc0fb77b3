//! Repository port for banners, slots, groups, links and counters.

use crate::domain::entities::{Banner, Slot, SlotBannerStat, SocialGroup};
use crate::error::AppError;
use async_trait::async_trait;

/// Port over persisted rotation state.
///
/// Transactional atomicity is the implementation's responsibility: the core
/// relies on `persist_show` / `persist_click` being single serializable
/// steps (concurrent callers never lose an increment and never create
/// duplicate rows).
///
/// Ids are opaque to callers; implementations generate and interpret them.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRotationRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryRotationRepository`] - in-process,
///   for tests and development
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RotationRepository: Send + Sync {
    /// Creates a slot and returns its fresh id.
    async fn add_slot(&self, description: &str) -> Result<String, AppError>;

    async fn get_slot_by_id(&self, id: &str) -> Result<Slot, AppError>;

    /// Deletes a slot. Cascades to slot-banner links and stats rows.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when no slot has this id.
    async fn delete_slot(&self, id: &str) -> Result<(), AppError>;

    /// Creates a banner and returns its fresh id.
    async fn add_banner(&self, description: &str) -> Result<String, AppError>;

    async fn get_banner_by_id(&self, id: &str) -> Result<Banner, AppError>;

    /// Deletes a banner. Cascades to slot-banner links and stats rows.
    async fn delete_banner(&self, id: &str) -> Result<(), AppError>;

    /// Creates a social group and returns its fresh id.
    async fn add_group(&self, description: &str) -> Result<String, AppError>;

    async fn get_group_by_id(&self, id: &str) -> Result<SocialGroup, AppError>;

    /// Deletes a group. Cascades to stats rows.
    async fn delete_group(&self, id: &str) -> Result<(), AppError>;

    /// Declares `banner_id` eligible for display in `slot_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] on a duplicate link and
    /// [`AppError::NotFound`] when either side does not exist.
    async fn add_banner_to_slot(&self, slot_id: &str, banner_id: &str) -> Result<(), AppError>;

    /// Removes the (slot, banner) link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the link does not exist.
    async fn delete_banner_from_slot(&self, slot_id: &str, banner_id: &str)
    -> Result<(), AppError>;

    /// Increments the click counter of the unique (slot, group, banner) row.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::BannerNotShown`] when no stats row exists yet;
    /// the state is left unchanged.
    async fn persist_click(
        &self,
        slot_id: &str,
        group_id: &str,
        banner_id: &str,
    ) -> Result<(), AppError>;

    /// Increments the show counter of the (slot, group, banner) row,
    /// inserting it with `shows = 1, clicks = 0` on first use. The
    /// update-or-insert is one serializable step.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StatsInitFailed`] when the row could neither be
    /// updated nor inserted.
    async fn persist_show(
        &self,
        slot_id: &str,
        group_id: &str,
        banner_id: &str,
    ) -> Result<(), AppError>;

    /// Returns one entry per banner currently linked to `slot_id`, in link
    /// creation order, with counters for `group_id` (absent counters are
    /// reported as NULL and project to 0).
    async fn find_slot_banner_stats(
        &self,
        slot_id: &str,
        group_id: &str,
    ) -> Result<Vec<SlotBannerStat>, AppError>;
}
