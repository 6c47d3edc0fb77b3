//! Handlers for click recording and banner selection.

use axum::{Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::{ClickRequest, NextBannerRequest, NextBannerResponse};
use crate::error::AppError;
use crate::state::AppState;

/// `POST /clicks`
pub async fn persist_click_handler(
    State(state): State<AppState>,
    Json(payload): Json<ClickRequest>,
) -> Result<StatusCode, AppError> {
    payload.validate()?;

    state
        .rotation_service
        .persist_click(
            payload.slot_id.trim(),
            payload.group_id.trim(),
            payload.banner_id.trim(),
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /next-banner`
pub async fn next_banner_handler(
    State(state): State<AppState>,
    Json(payload): Json<NextBannerRequest>,
) -> Result<Json<NextBannerResponse>, AppError> {
    payload.validate()?;

    let banner_id = state
        .rotation_service
        .next_banner_id(payload.slot_id.trim(), payload.group_id.trim())
        .await?;
    Ok(Json(NextBannerResponse { banner_id }))
}
