//! Slot entity.

use sqlx::FromRow;

/// A place on a page where one banner is displayed at a time.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Slot {
    pub id: String,
    pub description: String,
}

impl Slot {
    pub fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}
