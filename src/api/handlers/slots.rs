//! Handlers for slot management and slot-banner links.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::{CreateSlotRequest, SlotResponse};
use crate::api::handlers::require_id;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /slots`
pub async fn add_slot_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateSlotRequest>,
) -> Result<Json<SlotResponse>, AppError> {
    payload.validate()?;

    let slot = state
        .rotation_service
        .add_slot(payload.description.trim())
        .await?;
    Ok(Json(SlotResponse::from(slot)))
}

/// `DELETE /slots/{slot_id}`
pub async fn delete_slot_handler(
    State(state): State<AppState>,
    Path(slot_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let slot_id = require_id(&slot_id, "slot_id")?;

    state.rotation_service.delete_slot(slot_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /slots/{slot_id}/banners/{banner_id}`
pub async fn add_banner_to_slot_handler(
    State(state): State<AppState>,
    Path((slot_id, banner_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let slot_id = require_id(&slot_id, "slot_id")?;
    let banner_id = require_id(&banner_id, "banner_id")?;

    state
        .rotation_service
        .add_banner_to_slot(slot_id, banner_id)
        .await?;
    Ok(StatusCode::CREATED)
}

/// `DELETE /slots/{slot_id}/banners/{banner_id}`
pub async fn delete_banner_from_slot_handler(
    State(state): State<AppState>,
    Path((slot_id, banner_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let slot_id = require_id(&slot_id, "slot_id")?;
    let banner_id = require_id(&banner_id, "banner_id")?;

    state
        .rotation_service
        .delete_banner_from_slot(slot_id, banner_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
