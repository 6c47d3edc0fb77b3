//! DTOs for click recording and banner selection.

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct ClickRequest {
    #[validate(custom(function = "crate::api::dto::non_blank"))]
    pub slot_id: String,
    #[validate(custom(function = "crate::api::dto::non_blank"))]
    pub group_id: String,
    #[validate(custom(function = "crate::api::dto::non_blank"))]
    pub banner_id: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct NextBannerRequest {
    #[validate(custom(function = "crate::api::dto::non_blank"))]
    pub slot_id: String,
    #[validate(custom(function = "crate::api::dto::non_blank"))]
    pub group_id: String,
}

#[derive(Debug, Serialize)]
pub struct NextBannerResponse {
    pub banner_id: String,
}
