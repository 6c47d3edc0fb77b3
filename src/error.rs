//! Domain error taxonomy and its HTTP surfacing.
//!
//! Every failure path in the service maps to one [`AppError`] variant. The
//! variants are transport-independent; [`IntoResponse`] translates them to
//! status codes at the boundary.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Domain-level error kinds.
#[derive(Debug)]
pub enum AppError {
    /// Blank id or description rejected before reaching the repository.
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    /// Duplicate slot-banner link.
    Conflict { message: String, details: Value },
    /// Selection requested for a slot with zero linked banners.
    NoBannersForSlot { slot_id: String },
    /// A click arrived for a (slot, group, banner) that has no stats row yet.
    /// Surfaced to clients as a validation error: clicks are only accepted
    /// after the first recorded show.
    BannerNotShown {
        slot_id: String,
        group_id: String,
        banner_id: String,
    },
    /// The show upsert could neither update nor insert a stats row.
    StatsInitFailed {
        slot_id: String,
        group_id: String,
        banner_id: String,
    },
    /// Event publication failed. The enclosing operation fails even though
    /// the counter may already have been advanced.
    Broker { message: String },
    /// Unclassified I/O or SQL error.
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn broker(message: impl Into<String>) -> Self {
        Self::Broker {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match self {
            AppError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                message,
                details,
            ),
            AppError::BannerNotShown {
                slot_id,
                group_id,
                banner_id,
            } => (
                StatusCode::BAD_REQUEST,
                "banner_not_shown",
                "this banner was not shown yet, click statistics are not recorded".to_string(),
                json!({ "slot_id": slot_id, "group_id": group_id, "banner_id": banner_id }),
            ),
            AppError::NotFound { message, details } => {
                (StatusCode::NOT_FOUND, "not_found", message, details)
            }
            AppError::Conflict { message, details } => {
                (StatusCode::CONFLICT, "conflict", message, details)
            }
            AppError::NoBannersForSlot { slot_id } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "no_banners_for_slot",
                "no banners found for provided slot".to_string(),
                json!({ "slot_id": slot_id }),
            ),
            AppError::StatsInitFailed {
                slot_id,
                group_id,
                banner_id,
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "stats_init_failed",
                "failed to init banner stats".to_string(),
                json!({ "slot_id": slot_id, "group_id": group_id, "banner_id": banner_id }),
            ),
            AppError::Broker { message } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "broker_error",
                message,
                json!({}),
            ),
            AppError::Internal { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                message,
                details,
            ),
        };

        let body = ErrorBody {
            error: ErrorInfo {
                code,
                message,
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return AppError::conflict(
                "unique constraint violation",
                json!({ "constraint": db.constraint() }),
            );
        }

        tracing::error!(error = %e, "database error");
        AppError::internal("database error", json!({}))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::bad_request(
            "request validation failed",
            json!({ "fields": e.field_errors().keys().collect::<Vec<_>>() }),
        )
    }
}
