//! Handlers for banner management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::{BannerResponse, CreateBannerRequest};
use crate::api::handlers::require_id;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /banners`
pub async fn add_banner_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateBannerRequest>,
) -> Result<Json<BannerResponse>, AppError> {
    payload.validate()?;

    let banner = state
        .rotation_service
        .add_banner(payload.description.trim())
        .await?;
    Ok(Json(BannerResponse::from(banner)))
}

/// `DELETE /banners/{banner_id}`
pub async fn delete_banner_handler(
    State(state): State<AppState>,
    Path(banner_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let banner_id = require_id(&banner_id, "banner_id")?;

    state.rotation_service.delete_banner(banner_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
