use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/refresh", post(handlers::refresh))
        .route("/log", post(handlers::quick_log))
        .route("/api/view", get(handlers::get_view))
        .with_state(state)
}
