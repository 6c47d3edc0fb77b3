//! DTOs for social group management.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::SocialGroup;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateGroupRequest {
    #[validate(custom(function = "crate::api::dto::non_blank"))]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct GroupResponse {
    pub id: String,
    pub description: String,
}

impl From<SocialGroup> for GroupResponse {
    fn from(group: SocialGroup) -> Self {
        Self {
            id: group.id,
            description: group.description,
        }
    }
}
