// HTTP routes
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{download, health_check, index, refresh, refresh_redirect};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/", get(index).post(download))
        .route("/refresh", get(refresh_redirect).post(refresh))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
