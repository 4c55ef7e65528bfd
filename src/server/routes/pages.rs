//! Page Routes
//!
//! Server-rendered views.
//!
//! - GET / - Home (update date, hardware)
//! - GET /result - Every framework's results
//! - GET /compare?frameworks=a,b - Side-by-side comparison
//!
//! Any page accepts `?sha=<revision>`. When it differs from the revision on
//! display, or the last fetch failed, the data for it is fetched before
//! rendering, without touching the displayed date.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::routes::View;
use crate::server::render;
use crate::server::state::ServerState;
use crate::views::parse_selection;

/// Query parameters shared by every page
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub sha: Option<String>,
    pub frameworks: Option<String>,
}

/// GET /
pub async fn home(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<PageParams>,
) -> Html<String> {
    render_view(&state, View::Home, params).await
}

/// GET /result
pub async fn result(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<PageParams>,
) -> Html<String> {
    render_view(&state, View::Result, params).await
}

/// GET /compare
pub async fn compare(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<PageParams>,
) -> Html<String> {
    render_view(&state, View::Compare, params).await
}

/// Fallback for unknown paths
pub async fn not_found(State(state): State<Arc<ServerState>>) -> (StatusCode, Html<String>) {
    let revision = state.app_state().read(|app| app.revision.clone());
    (
        StatusCode::NOT_FOUND,
        Html(render::not_found(revision.as_deref())),
    )
}

async fn render_view(state: &ServerState, view: View, params: PageParams) -> Html<String> {
    if let Some(sha) = params.sha.filter(|sha| !sha.is_empty()) {
        let initial = state.controller.fallback_revision();
        if state.app_state().read(|app| app.needs_fetch(&sha, initial)) {
            switch_revision(state, sha).await;
        }
    }

    let selection = params
        .frameworks
        .as_deref()
        .map(parse_selection)
        .unwrap_or_default();

    let html = state
        .app_state()
        .read(|app| render::page(view, app, &selection));
    Html(html)
}

/// Fetch `revision` on its own task so a dropped request cannot abandon it
///
/// The outcome is recorded in the state and rendered by the caller.
async fn switch_revision(state: &ServerState, revision: String) {
    let controller = state.controller.clone();
    let task = tokio::spawn(async move {
        let result = controller.fetch_benchmark_data(&revision, false).await;
        (revision, result)
    });

    match task.await {
        Ok((_, Ok(()))) => {}
        Ok((revision, Err(e))) => {
            tracing::warn!(revision = %revision, error = %e, "Revision switch failed");
        }
        Err(e) => tracing::error!("Revision switch task failed: {}", e),
    }
}
