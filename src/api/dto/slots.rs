//! DTOs for slot management.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Slot;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSlotRequest {
    #[validate(custom(function = "crate::api::dto::non_blank"))]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct SlotResponse {
    pub id: String,
    pub description: String,
}

impl From<Slot> for SlotResponse {
    fn from(slot: Slot) -> Self {
        Self {
            id: slot.id,
            description: slot.description,
        }
    }
}
