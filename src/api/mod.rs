//! HTTP API module
//!
//! The presentation layer: timer CRUD, run views and their transport
//! commands.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timers", get(list_timers_handler).post(create_timer_handler))
        .route(
            "/timers/:id",
            get(get_timer_handler)
                .put(update_timer_handler)
                .delete(delete_timer_handler),
        )
        .route(
            "/timers/:id/run",
            get(run_snapshot_handler)
                .post(enter_run_handler)
                .delete(exit_run_handler),
        )
        .route("/timers/:id/run/toggle", post(toggle_handler))
        .route("/timers/:id/run/restart", post(restart_handler))
        .route("/timers/:id/run/skip-forward", post(skip_forward_handler))
        .route("/timers/:id/run/skip-back", post(skip_back_handler))
        .route("/palette", get(palette_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
