//! Route configuration.

use std::time::Duration;

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::LatencyUnit;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::api::handlers::{
    add_banner_handler, add_banner_to_slot_handler, add_group_handler, add_slot_handler,
    delete_banner_from_slot_handler, delete_banner_handler, delete_group_handler,
    delete_slot_handler, health_handler, next_banner_handler, persist_click_handler,
};
use crate::state::AppState;

/// Builds the application router: ten unary endpoints plus health.
///
/// `request_timeout` bounds every call; when it fires mid-operation the
/// request future is dropped, cancelling whatever repository or publisher
/// call was in flight.
pub fn app_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/slots", post(add_slot_handler))
        .route("/slots/{slot_id}", delete(delete_slot_handler))
        .route(
            "/slots/{slot_id}/banners/{banner_id}",
            post(add_banner_to_slot_handler).delete(delete_banner_from_slot_handler),
        )
        .route("/banners", post(add_banner_handler))
        .route("/banners/{banner_id}", delete(delete_banner_handler))
        .route("/groups", post(add_group_handler))
        .route("/groups/{group_id}", delete(delete_group_handler))
        .route("/clicks", post(persist_click_handler))
        .route("/next-banner", post(next_banner_handler))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .latency_unit(LatencyUnit::Millis),
                ),
        )
        .layer(TimeoutLayer::new(request_timeout))
        .with_state(state)
}
