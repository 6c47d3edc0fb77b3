//! HTTP handlers: one unary endpoint per administrative operation.
//!
//! Handlers validate input (trimming ids and descriptions, rejecting blank
//! values) before anything reaches the rotation core.

pub mod banners;
pub mod groups;
pub mod health;
pub mod rotation;
pub mod slots;

pub use banners::{add_banner_handler, delete_banner_handler};
pub use groups::{add_group_handler, delete_group_handler};
pub use health::health_handler;
pub use rotation::{next_banner_handler, persist_click_handler};
pub use slots::{
    add_banner_to_slot_handler, add_slot_handler, delete_banner_from_slot_handler,
    delete_slot_handler,
};

use crate::error::AppError;
use serde_json::json;

/// Trims an id path segment, rejecting blank values before any repository
/// call.
pub(crate) fn require_id<'a>(value: &'a str, field: &str) -> Result<&'a str, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::bad_request(
            format!("{field} must not be empty"),
            json!({ "field": field }),
        ));
    }
    Ok(trimmed)
}
