//! Health Routes
//!
//! - GET /health/live - Liveness check (process is alive)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::controller::LoadStatus;
use crate::server::state::ServerState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub data: LoadStatus,
    pub revision: Option<String>,
    pub records: usize,
    pub uptime_seconds: u64,
    pub version: String,
}

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health
///
/// "healthy" once data is loaded, "degraded" while loading or after a failed fetch.
pub async fn full_health(State(state): State<Arc<ServerState>>) -> Json<HealthResponse> {
    let (data, revision, records) = state
        .app_state()
        .read(|app| (app.status.clone(), app.revision.clone(), app.benchmarks.len()));

    let status = match data {
        LoadStatus::Ready => "healthy",
        LoadStatus::Loading | LoadStatus::Failed(_) => "degraded",
    };

    Json(HealthResponse {
        status: status.to_string(),
        data,
        revision,
        records,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
