//! State API
//!
//! - GET /api/state - Current application state as JSON

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::controller::AppState;
use crate::server::error::{ServerError, ServerResult};
use crate::server::state::ServerState;

/// GET /api/state
///
/// Returns 502 when the last fetch failed.
pub async fn app_state(State(state): State<Arc<ServerState>>) -> ServerResult<Json<AppState>> {
    let snapshot = state.app_state().snapshot();
    if let Some(message) = snapshot.error() {
        return Err(ServerError::Upstream(message.to_string()));
    }
    Ok(Json(snapshot))
}
