//! Handlers for social group management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::{CreateGroupRequest, GroupResponse};
use crate::api::handlers::require_id;
use crate::error::AppError;
use crate::state::AppState;

/// `POST /groups`
pub async fn add_group_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateGroupRequest>,
) -> Result<Json<GroupResponse>, AppError> {
    payload.validate()?;

    let group = state
        .rotation_service
        .add_group(payload.description.trim())
        .await?;
    Ok(Json(GroupResponse::from(group)))
}

/// `DELETE /groups/{group_id}`
pub async fn delete_group_handler(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let group_id = require_id(&group_id, "group_id")?;

    state.rotation_service.delete_group(group_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
