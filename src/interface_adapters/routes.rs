use crate::interface_adapters::handlers::{generate_plan, health, quick_edit, refine_prompt};
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

// Request bodies above this size are refused before any handler runs.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/plan", post(generate_plan))
        .route("/api/refine", post(refine_prompt))
        .route("/api/quick-edit", post(quick_edit))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
