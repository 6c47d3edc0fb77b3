//! Request and response DTOs for the administrative surface.

pub mod banners;
pub mod groups;
pub mod rotation;
pub mod slots;

pub use banners::{BannerResponse, CreateBannerRequest};
pub use groups::{CreateGroupRequest, GroupResponse};
pub use rotation::{ClickRequest, NextBannerRequest, NextBannerResponse};
pub use slots::{CreateSlotRequest, SlotResponse};

use validator::ValidationError;

/// Rejects values that are empty after trimming surrounding whitespace.
pub fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("non_blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_blank_rejects_whitespace_only() {
        assert!(non_blank("").is_err());
        assert!(non_blank("   ").is_err());
        assert!(non_blank("\t\n").is_err());
        assert!(non_blank(" header ").is_ok());
    }
}
