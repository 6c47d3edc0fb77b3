//! DTOs for banner management.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Banner;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateBannerRequest {
    #[validate(custom(function = "crate::api::dto::non_blank"))]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct BannerResponse {
    pub id: String,
    pub description: String,
}

impl From<Banner> for BannerResponse {
    fn from(banner: Banner) -> Self {
        Self {
            id: banner.id,
            description: banner.description,
        }
    }
}
