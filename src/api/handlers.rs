//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use tracing::info;

use super::responses::{ApiError, HealthResponse, StatusResponse};
use crate::{
    model::{palette, Swatch, Timer, TimerDraft},
    state::{AppState, RunSession, RunSnapshot, RunView},
};

type ApiResult<T> = Result<Json<T>, ApiError>;

/// Resolve the open run of a timer or explain why there is none
fn require_session(state: &AppState, timer_id: String) -> Result<RunSession, ApiError> {
    match state.run_view(&timer_id).map_err(ApiError::Internal)? {
        RunView::Ready(session) => Ok(session),
        RunView::NotLoaded => Err(ApiError::RunNotStarted(timer_id)),
        RunView::NotFound => Err(ApiError::TimerNotFound(timer_id)),
        RunView::Empty => Err(ApiError::NothingToRun(timer_id)),
    }
}

/// Handle GET /timers
pub async fn list_timers_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Timer>> {
    Json(state.store.list())
}

/// Handle POST /timers
pub async fn create_timer_handler(
    State(state): State<Arc<AppState>>,
    Json(draft): Json<TimerDraft>,
) -> Result<(StatusCode, Json<Timer>), ApiError> {
    let timer = Timer::from_draft(draft, Utc::now())?;
    state.store.save(&timer)?;
    info!("Created timer {} with {} intervals", timer.id, timer.intervals.len());
    Ok((StatusCode::CREATED, Json(timer)))
}

/// Handle GET /timers/:id
pub async fn get_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(timer_id): Path<String>,
) -> ApiResult<Timer> {
    state
        .store
        .get(&timer_id)
        .map(Json)
        .ok_or(ApiError::TimerNotFound(timer_id))
}

/// Handle PUT /timers/:id. An open run keeps the intervals it started with.
pub async fn update_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(timer_id): Path<String>,
    Json(draft): Json<TimerDraft>,
) -> ApiResult<Timer> {
    let mut timer = state
        .store
        .get(&timer_id)
        .ok_or_else(|| ApiError::TimerNotFound(timer_id.clone()))?;
    timer.apply_draft(draft, Utc::now())?;
    state.store.save(&timer)?;
    Ok(Json(timer))
}

/// Handle DELETE /timers/:id
pub async fn delete_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(timer_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.exit_run(&timer_id).map_err(ApiError::Internal)?;
    if state.store.delete(&timer_id)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::TimerNotFound(timer_id))
    }
}

/// Handle POST /timers/:id/run - enter a fresh run view
pub async fn enter_run_handler(
    State(state): State<Arc<AppState>>,
    Path(timer_id): Path<String>,
) -> ApiResult<RunSnapshot> {
    match state.enter_run(&timer_id).map_err(ApiError::Internal)? {
        RunView::Ready(session) => session.snapshot().map(Json).map_err(ApiError::Internal),
        RunView::Empty => Err(ApiError::NothingToRun(timer_id)),
        RunView::NotFound | RunView::NotLoaded => Err(ApiError::TimerNotFound(timer_id)),
    }
}

/// Handle GET /timers/:id/run
pub async fn run_snapshot_handler(
    State(state): State<Arc<AppState>>,
    Path(timer_id): Path<String>,
) -> ApiResult<RunSnapshot> {
    let session = require_session(&state, timer_id)?;
    session.snapshot().map(Json).map_err(ApiError::Internal)
}

/// Handle DELETE /timers/:id/run - leave the run view
pub async fn exit_run_handler(
    State(state): State<Arc<AppState>>,
    Path(timer_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.exit_run(&timer_id).map_err(ApiError::Internal)? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::RunNotStarted(timer_id))
    }
}

/// Handle POST /timers/:id/run/toggle
pub async fn toggle_handler(
    State(state): State<Arc<AppState>>,
    Path(timer_id): Path<String>,
) -> ApiResult<RunSnapshot> {
    let session = require_session(&state, timer_id)?;
    session.toggle_pause().await.map(Json).map_err(ApiError::Internal)
}

/// Handle POST /timers/:id/run/restart
pub async fn restart_handler(
    State(state): State<Arc<AppState>>,
    Path(timer_id): Path<String>,
) -> ApiResult<RunSnapshot> {
    let session = require_session(&state, timer_id)?;
    session.restart().map(Json).map_err(ApiError::Internal)
}

/// Handle POST /timers/:id/run/skip-forward
pub async fn skip_forward_handler(
    State(state): State<Arc<AppState>>,
    Path(timer_id): Path<String>,
) -> ApiResult<RunSnapshot> {
    let session = require_session(&state, timer_id)?;
    session.skip_forward().map(Json).map_err(ApiError::Internal)
}

/// Handle POST /timers/:id/run/skip-back
pub async fn skip_back_handler(
    State(state): State<Arc<AppState>>,
    Path(timer_id): Path<String>,
) -> ApiResult<RunSnapshot> {
    let session = require_session(&state, timer_id)?;
    session.skip_back().map(Json).map_err(ApiError::Internal)
}

/// Handle GET /palette
pub async fn palette_handler() -> Json<Vec<Swatch>> {
    Json(palette())
}

/// Handle GET /status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> ApiResult<StatusResponse> {
    let active_runs = state.active_runs().map_err(ApiError::Internal)?;
    Ok(Json(StatusResponse {
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        timers: state.store.list().len(),
        active_runs,
        timestamp: Utc::now(),
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
