//! Social group entity.

use sqlx::FromRow;

/// An audience segment. Shows and clicks are counted per group so that the
/// rotation converges independently for each audience.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct SocialGroup {
    pub id: String,
    pub description: String,
}

impl SocialGroup {
    pub fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}
