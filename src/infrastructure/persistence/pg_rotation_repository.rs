//! PostgreSQL implementation of the rotation repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Banner, Slot, SlotBannerStat, SocialGroup};
use crate::domain::repositories::RotationRepository;
use crate::error::AppError;

/// Repository backed by a PostgreSQL pool.
///
/// Ids are UUID v4 strings generated here; the schema cascades deletions of
/// slots/banners/groups into the link and stats tables.
pub struct PgRotationRepository {
    pool: Arc<PgPool>,
}

impl PgRotationRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn fresh_id() -> String {
        Uuid::new_v4().to_string()
    }
}

#[async_trait]
impl RotationRepository for PgRotationRepository {
    async fn add_slot(&self, description: &str) -> Result<String, AppError> {
        let id = Self::fresh_id();
        sqlx::query("INSERT INTO slots (slot_id, slot_description) VALUES ($1, $2)")
            .bind(&id)
            .bind(description)
            .execute(self.pool.as_ref())
            .await?;
        Ok(id)
    }

    async fn get_slot_by_id(&self, id: &str) -> Result<Slot, AppError> {
        sqlx::query_as::<_, Slot>(
            "SELECT slot_id AS id, slot_description AS description FROM slots WHERE slot_id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| AppError::not_found("slot not found", json!({ "slot_id": id })))
    }

    async fn delete_slot(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM slots WHERE slot_id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "slot not found",
                json!({ "slot_id": id }),
            ));
        }
        Ok(())
    }

    async fn add_banner(&self, description: &str) -> Result<String, AppError> {
        let id = Self::fresh_id();
        sqlx::query("INSERT INTO banners (banner_id, banner_description) VALUES ($1, $2)")
            .bind(&id)
            .bind(description)
            .execute(self.pool.as_ref())
            .await?;
        Ok(id)
    }

    async fn get_banner_by_id(&self, id: &str) -> Result<Banner, AppError> {
        sqlx::query_as::<_, Banner>(
            "SELECT banner_id AS id, banner_description AS description FROM banners WHERE banner_id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| AppError::not_found("banner not found", json!({ "banner_id": id })))
    }

    async fn delete_banner(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM banners WHERE banner_id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "banner not found",
                json!({ "banner_id": id }),
            ));
        }
        Ok(())
    }

    async fn add_group(&self, description: &str) -> Result<String, AppError> {
        let id = Self::fresh_id();
        sqlx::query("INSERT INTO social_groups (group_id, group_description) VALUES ($1, $2)")
            .bind(&id)
            .bind(description)
            .execute(self.pool.as_ref())
            .await?;
        Ok(id)
    }

    async fn get_group_by_id(&self, id: &str) -> Result<SocialGroup, AppError> {
        sqlx::query_as::<_, SocialGroup>(
            "SELECT group_id AS id, group_description AS description FROM social_groups WHERE group_id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or_else(|| AppError::not_found("social group not found", json!({ "group_id": id })))
    }

    async fn delete_group(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM social_groups WHERE group_id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "social group not found",
                json!({ "group_id": id }),
            ));
        }
        Ok(())
    }

    async fn add_banner_to_slot(&self, slot_id: &str, banner_id: &str) -> Result<(), AppError> {
        let result = sqlx::query("INSERT INTO slot_banners (slot_id, banner_id) VALUES ($1, $2)")
            .bind(slot_id)
            .bind(banner_id)
            .execute(self.pool.as_ref())
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                if let Some(db) = e.as_database_error() {
                    if db.is_unique_violation() {
                        return Err(AppError::conflict(
                            "banner is already linked to slot",
                            json!({ "slot_id": slot_id, "banner_id": banner_id }),
                        ));
                    }
                    if db.is_foreign_key_violation() {
                        return Err(AppError::not_found(
                            "slot or banner not found",
                            json!({ "slot_id": slot_id, "banner_id": banner_id }),
                        ));
                    }
                }
                Err(e.into())
            }
        }
    }

    async fn delete_banner_from_slot(
        &self,
        slot_id: &str,
        banner_id: &str,
    ) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM slot_banners WHERE slot_id = $1 AND banner_id = $2")
            .bind(slot_id)
            .bind(banner_id)
            .execute(self.pool.as_ref())
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::not_found(
                "slot to banner mapping not found",
                json!({ "slot_id": slot_id, "banner_id": banner_id }),
            ));
        }
        Ok(())
    }

    async fn persist_click(
        &self,
        slot_id: &str,
        group_id: &str,
        banner_id: &str,
    ) -> Result<(), AppError> {
        let result = sqlx::query(
            "UPDATE banner_stats
             SET clicks_amount = clicks_amount + 1
             WHERE slot_id = $1 AND group_id = $2 AND banner_id = $3",
        )
        .bind(slot_id)
        .bind(group_id)
        .bind(banner_id)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::BannerNotShown {
                slot_id: slot_id.to_string(),
                group_id: group_id.to_string(),
                banner_id: banner_id.to_string(),
            });
        }
        Ok(())
    }

    async fn persist_show(
        &self,
        slot_id: &str,
        group_id: &str,
        banner_id: &str,
    ) -> Result<(), AppError> {
        // Single serializable step: concurrent callers either insert the row
        // once or pile increments onto it, never both and never neither.
        let result = sqlx::query(
            "INSERT INTO banner_stats (slot_id, banner_id, group_id, clicks_amount, shows_amount)
             VALUES ($1, $2, $3, 0, 1)
             ON CONFLICT (slot_id, banner_id, group_id)
             DO UPDATE SET shows_amount = banner_stats.shows_amount + 1",
        )
        .bind(slot_id)
        .bind(banner_id)
        .bind(group_id)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::StatsInitFailed {
                slot_id: slot_id.to_string(),
                group_id: group_id.to_string(),
                banner_id: banner_id.to_string(),
            });
        }
        Ok(())
    }

    async fn find_slot_banner_stats(
        &self,
        slot_id: &str,
        group_id: &str,
    ) -> Result<Vec<SlotBannerStat>, AppError> {
        // One row per linked banner; counters outer-joined per group. A
        // linked banner with no stats row yields NULL counters. Link
        // creation order keeps the explore-first phase deterministic.
        let stats = sqlx::query_as::<_, SlotBannerStat>(
            "SELECT sb.banner_id, bs.clicks_amount, bs.shows_amount
             FROM slot_banners sb
             LEFT JOIN banner_stats bs
               ON bs.slot_id = sb.slot_id
              AND bs.banner_id = sb.banner_id
              AND bs.group_id = $2
             WHERE sb.slot_id = $1
             ORDER BY sb.link_id",
        )
        .bind(slot_id)
        .bind(group_id)
        .fetch_all(self.pool.as_ref())
        .await?;
        Ok(stats)
    }
}
