//! Core business entities.
//!
//! Plain records mirroring the persisted model: banners, slots, social
//! groups and the per-(slot, banner, group) counter row.

pub mod banner;
pub mod slot;
pub mod slot_banner_stat;
pub mod social_group;

pub use banner::Banner;
pub use slot::Slot;
pub use slot_banner_stat::SlotBannerStat;
pub use social_group::SocialGroup;
