use crate::handlers;
use crate::state::AppState;
use axum::{Router, routing::get};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/stats", get(handlers::get_stats))
        .route("/api/charts", get(handlers::get_charts))
        .route("/api/content/:registry/:key", get(handlers::get_content))
        .with_state(state)
}
