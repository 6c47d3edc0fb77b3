//! Banner entity.

use sqlx::FromRow;

/// An advertisement banner eligible for rotation.
///
/// The id is an opaque, server-assigned string and is immutable for the
/// lifetime of the banner.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Banner {
    pub id: String,
    pub description: String,
}

impl Banner {
    pub fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}
