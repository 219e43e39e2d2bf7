//! HTTP router construction.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the application router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/dingtalk/{profile}/send", post(handlers::send_notification))
        .route("/-/reload", post(handlers::reload))
        .route("/-/healthy", get(handlers::healthy))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
