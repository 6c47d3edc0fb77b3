//! In-memory repository implementation.
//!
//! Used for tests and development without a database. Thread-safe via a
//! single `RwLock` over the whole state, which also gives each operation the
//! serializable semantics the port requires.

use async_trait::async_trait;
use serde_json::json;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::{Banner, Slot, SlotBannerStat, SocialGroup};
use crate::domain::repositories::RotationRepository;
use crate::error::AppError;

#[derive(Debug, Clone, Copy, Default)]
struct Counters {
    clicks: i64,
    shows: i64,
}

#[derive(Default)]
struct Inner {
    slots: HashMap<String, Slot>,
    banners: HashMap<String, Banner>,
    groups: HashMap<String, SocialGroup>,
    /// (slot_id, banner_id) pairs in insertion order; the order defines the
    /// snapshot order of `find_slot_banner_stats`.
    links: Vec<(String, String)>,
    /// Keyed by (slot_id, banner_id, group_id).
    stats: HashMap<(String, String, String), Counters>,
}

/// In-memory rotation repository.
#[derive(Default)]
pub struct MemoryRotationRepository {
    inner: RwLock<Inner>,
}

impl MemoryRotationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total (shows, clicks) recorded for a (slot, group), over all banners.
    pub fn totals(&self, slot_id: &str, group_id: &str) -> (i64, i64) {
        let inner = self.inner.read().unwrap();
        inner
            .stats
            .iter()
            .filter(|((s, _, g), _)| s == slot_id && g == group_id)
            .fold((0, 0), |(shows, clicks), (_, c)| {
                (shows + c.shows, clicks + c.clicks)
            })
    }

    /// Number of stat rows mentioning the banner, over all slots and groups.
    pub fn stat_rows_for_banner(&self, banner_id: &str) -> usize {
        let inner = self.inner.read().unwrap();
        inner.stats.keys().filter(|(_, b, _)| b == banner_id).count()
    }

    fn fresh_id() -> String {
        Uuid::new_v4().to_string()
    }
}

#[async_trait]
impl RotationRepository for MemoryRotationRepository {
    async fn add_slot(&self, description: &str) -> Result<String, AppError> {
        let id = Self::fresh_id();
        let mut inner = self.inner.write().unwrap();
        inner
            .slots
            .insert(id.clone(), Slot::new(id.clone(), description.to_string()));
        Ok(id)
    }

    async fn get_slot_by_id(&self, id: &str) -> Result<Slot, AppError> {
        self.inner
            .read()
            .unwrap()
            .slots
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::not_found("slot not found", json!({ "slot_id": id })))
    }

    async fn delete_slot(&self, id: &str) -> Result<(), AppError> {
        let mut inner = self.inner.write().unwrap();
        if inner.slots.remove(id).is_none() {
            return Err(AppError::not_found(
                "slot not found",
                json!({ "slot_id": id }),
            ));
        }
        inner.links.retain(|(slot_id, _)| slot_id != id);
        inner.stats.retain(|(slot_id, _, _), _| slot_id != id);
        Ok(())
    }

    async fn add_banner(&self, description: &str) -> Result<String, AppError> {
        let id = Self::fresh_id();
        let mut inner = self.inner.write().unwrap();
        inner
            .banners
            .insert(id.clone(), Banner::new(id.clone(), description.to_string()));
        Ok(id)
    }

    async fn get_banner_by_id(&self, id: &str) -> Result<Banner, AppError> {
        self.inner
            .read()
            .unwrap()
            .banners
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::not_found("banner not found", json!({ "banner_id": id })))
    }

    async fn delete_banner(&self, id: &str) -> Result<(), AppError> {
        let mut inner = self.inner.write().unwrap();
        if inner.banners.remove(id).is_none() {
            return Err(AppError::not_found(
                "banner not found",
                json!({ "banner_id": id }),
            ));
        }
        inner.links.retain(|(_, banner_id)| banner_id != id);
        inner.stats.retain(|(_, banner_id, _), _| banner_id != id);
        Ok(())
    }

    async fn add_group(&self, description: &str) -> Result<String, AppError> {
        let id = Self::fresh_id();
        let mut inner = self.inner.write().unwrap();
        inner.groups.insert(
            id.clone(),
            SocialGroup::new(id.clone(), description.to_string()),
        );
        Ok(id)
    }

    async fn get_group_by_id(&self, id: &str) -> Result<SocialGroup, AppError> {
        self.inner
            .read()
            .unwrap()
            .groups
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::not_found("social group not found", json!({ "group_id": id })))
    }

    async fn delete_group(&self, id: &str) -> Result<(), AppError> {
        let mut inner = self.inner.write().unwrap();
        if inner.groups.remove(id).is_none() {
            return Err(AppError::not_found(
                "social group not found",
                json!({ "group_id": id }),
            ));
        }
        inner.stats.retain(|(_, _, group_id), _| group_id != id);
        Ok(())
    }

    async fn add_banner_to_slot(&self, slot_id: &str, banner_id: &str) -> Result<(), AppError> {
        let mut inner = self.inner.write().unwrap();
        if !inner.slots.contains_key(slot_id) || !inner.banners.contains_key(banner_id) {
            return Err(AppError::not_found(
                "slot or banner not found",
                json!({ "slot_id": slot_id, "banner_id": banner_id }),
            ));
        }
        let link = (slot_id.to_string(), banner_id.to_string());
        if inner.links.contains(&link) {
            return Err(AppError::conflict(
                "banner is already linked to slot",
                json!({ "slot_id": slot_id, "banner_id": banner_id }),
            ));
        }
        inner.links.push(link);
        Ok(())
    }

    async fn delete_banner_from_slot(
        &self,
        slot_id: &str,
        banner_id: &str,
    ) -> Result<(), AppError> {
        let mut inner = self.inner.write().unwrap();
        let before = inner.links.len();
        inner
            .links
            .retain(|(s, b)| !(s == slot_id && b == banner_id));
        if inner.links.len() == before {
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
        let mut inner = self.inner.write().unwrap();
        let key = (
            slot_id.to_string(),
            banner_id.to_string(),
            group_id.to_string(),
        );
        match inner.stats.get_mut(&key) {
            Some(counters) => {
                counters.clicks += 1;
                Ok(())
            }
            None => Err(AppError::BannerNotShown {
                slot_id: slot_id.to_string(),
                group_id: group_id.to_string(),
                banner_id: banner_id.to_string(),
            }),
        }
    }

    async fn persist_show(
        &self,
        slot_id: &str,
        group_id: &str,
        banner_id: &str,
    ) -> Result<(), AppError> {
        let mut inner = self.inner.write().unwrap();
        let key = (
            slot_id.to_string(),
            banner_id.to_string(),
            group_id.to_string(),
        );
        inner.stats.entry(key).or_default().shows += 1;
        Ok(())
    }

    async fn find_slot_banner_stats(
        &self,
        slot_id: &str,
        group_id: &str,
    ) -> Result<Vec<SlotBannerStat>, AppError> {
        let inner = self.inner.read().unwrap();
        let stats = inner
            .links
            .iter()
            .filter(|(s, _)| s == slot_id)
            .map(|(s, banner_id)| {
                let counters = inner.stats.get(&(
                    s.clone(),
                    banner_id.clone(),
                    group_id.to_string(),
                ));
                SlotBannerStat {
                    banner_id: banner_id.clone(),
                    clicks_amount: counters.map(|c| c.clicks),
                    shows_amount: counters.map(|c| c.shows),
                }
            })
            .collect();
        Ok(stats)
    }
}
