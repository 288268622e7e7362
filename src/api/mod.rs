pub mod dashboard;
pub mod error;
pub mod raw;

use crate::ax_state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

async fn health() -> &'static str {
    "ok"
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/dashboard", post(dashboard::dashboard))
        .route("/api/raw/domains", get(raw::domains))
        .route("/api/raw", post(raw::raw_data))
        .route("/api/raw/export", post(raw::export_csv))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
