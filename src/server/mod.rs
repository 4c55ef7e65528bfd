//! Benchboard Web Server
//!
//! Server-rendered pages for the three views, built with Axum.
//!
//! # Endpoints
//!
//! ## Pages
//! - `GET /` - Home: update date and hardware
//! - `GET /result` - Every framework's results
//! - `GET /compare` - Side-by-side comparison (`?frameworks=a,b`)
//!
//! Every page accepts `?sha=<revision>` to switch the benchmark run on display.
//!
//! ## API
//! - `GET /api/state` - Application state as JSON
//!
//! ## Health
//! - `GET /health/live` - Liveness check
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use benchboard::controller::{Controller, SharedState};
//! use benchboard::server::{serve, ServerState};
//! use benchboard::source::HttpSource;
//!
//! let source: DynSource = Arc::new(HttpSource::new(DEFAULT_DATA_URL, Duration::from_secs(30))?);
//! let colors: Box<dyn ColorSampler + Send + Sync> = Box::new(RandomColors);
//! let controller = Controller::with_colors(source, SharedState::new(), colors);
//! controller.mount("").await.ok();
//! serve(ServerState::new(controller), &ServerConfig::default()).await?;
//! ```

pub mod error;
pub mod render;
pub mod routes;
pub mod state;

pub use error::{ServerError, ServerResult};
pub use state::{PageController, ServerState};

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// Build the router with all routes and middleware
pub fn build_router(state: ServerState) -> Router {
    let page_routes = Router::new()
        .route("/", get(routes::pages::home))
        .route("/result", get(routes::pages::result))
        .route("/compare", get(routes::pages::compare));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .merge(page_routes)
        .route("/api/state", get(routes::api::app_state))
        .nest("/health", health_routes)
        .fallback(routes::pages::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state)
}

/// Start the web server
pub async fn serve(state: ServerState, config: &ServerConfig) -> Result<(), ServerError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Benchboard listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Benchboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{AppState, Controller, SharedState, StateStore};
    use crate::decorate::{ColorSampler, SeededColors};
    use crate::model::{Benchmark, BenchmarkPayload, Framework, Hardware};
    use crate::source::{BenchmarkSource, DynSource, SourceError, SourceResult};
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Mutex;
    use tower::util::ServiceExt;

    /// Serves one payload per known revision and records every request
    #[derive(Default)]
    struct FakeSource {
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl BenchmarkSource for FakeSource {
        async fn fetch(&self, revision: &str) -> SourceResult<BenchmarkPayload> {
            self.calls.lock().unwrap().push(revision.to_string());
            match revision {
                "master" => Ok(BenchmarkPayload {
                    data: vec![
                        Benchmark::new(Framework::new("actix", "4.4")).result("rps", 1000),
                        Benchmark::new(Framework::new("gin", "1.9")).result("rps", 800),
                    ],
                    updated_at: "2023-05-01 10:00:00".to_string(),
                    hardware: Hardware::default(),
                }),
                "old" => Ok(BenchmarkPayload {
                    data: vec![Benchmark::new(Framework::new("express", "4.18"))],
                    updated_at: "2022-01-01 00:00:00".to_string(),
                    hardware: Hardware::default(),
                }),
                other => Err(SourceError::Status {
                    status: 404,
                    url: format!("https://example.com/{}", other),
                }),
            }
        }
    }

    async fn create_test_app() -> (Router, Arc<FakeSource>) {
        let source = Arc::new(FakeSource::default());
        let dyn_source: DynSource = source.clone();
        let colors: Box<dyn ColorSampler + Send + Sync> = Box::new(SeededColors::new(42));
        let controller = Controller::with_colors(dyn_source, SharedState::new(), colors);
        controller.mount("").await.unwrap();
        (build_router(ServerState::new(controller)), source)
    }

    async fn get_body(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_home_page() {
        let (app, source) = create_test_app().await;
        let (status, body) = get_body(app, "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("2023-05-01"));
        assert!(!body.contains("10:00:00"));
        assert_eq!(*source.calls.lock().unwrap(), vec!["master".to_string()]);
    }

    #[tokio::test]
    async fn test_result_page() {
        let (app, _) = create_test_app().await;
        let (status, body) = get_body(app, "/result").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("actix (4.4)"));
        assert!(body.contains("gin (1.9)"));
        assert!(body.contains("2 frameworks"));
    }

    #[tokio::test]
    async fn test_compare_page_selection() {
        let (app, _) = create_test_app().await;
        let (status, body) = get_body(app, "/compare?frameworks=gin").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("gin (1.9)"));
        assert!(!body.contains("actix (4.4)"));
    }

    #[tokio::test]
    async fn test_revision_switch_keeps_date() {
        let (app, source) = create_test_app().await;
        let (status, body) = get_body(app.clone(), "/result?sha=old").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("express (4.18)"));

        // Displayed date still comes from the initial load
        let (_, home) = get_body(app, "/").await;
        assert!(home.contains("2023-05-01"));
        assert_eq!(source.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_same_revision_does_not_refetch() {
        let (app, source) = create_test_app().await;
        let _ = get_body(app, "/?sha=master").await;
        assert_eq!(source.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_revision_shows_error() {
        let (app, _) = create_test_app().await;
        let (status, body) = get_body(app.clone(), "/?sha=missing").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Failed to load benchmark data"));

        let (status, _) = get_body(app, "/api/state").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_return_to_shown_revision_clears_failure() {
        let (app, source) = create_test_app().await;
        let (_, body) = get_body(app.clone(), "/?sha=bad").await;
        assert!(body.contains("Failed to load benchmark data"));

        let (status, body) = get_body(app.clone(), "/?sha=master").await;
        assert_eq!(status, StatusCode::OK);
        assert!(!body.contains("Failed to load benchmark data"));
        assert_eq!(source.calls.lock().unwrap().len(), 3);

        let (status, _) = get_body(app.clone(), "/api/state").await;
        assert_eq!(status, StatusCode::OK);

        let (_, health) = get_body(app, "/health").await;
        assert!(health.contains("\"healthy\""));
    }

    #[tokio::test]
    async fn test_default_revision_joins_initial_load() {
        let source = Arc::new(FakeSource::default());
        let dyn_source: DynSource = source.clone();
        let colors: Box<dyn ColorSampler + Send + Sync> = Box::new(SeededColors::new(42));
        let controller = Controller::with_colors(dyn_source, SharedState::new(), colors);
        // Initial load of the default revision still outstanding
        controller.store().update(AppState::begin_fetch);
        let app = build_router(ServerState::new(controller));

        let (status, body) = get_body(app.clone(), "/result?sha=master").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Loading..."));
        assert!(source.calls.lock().unwrap().is_empty());

        // Another revision is still fetched
        let (_, body) = get_body(app, "/result?sha=old").await;
        assert!(body.contains("Loading..."));
        assert_eq!(*source.calls.lock().unwrap(), vec!["old".to_string()]);
    }

    #[tokio::test]
    async fn test_api_state() {
        let (app, _) = create_test_app().await;
        let (status, body) = get_body(app, "/api/state").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"]["state"], "ready");
        assert_eq!(json["benchmarks"].as_array().unwrap().len(), 2);
        assert_eq!(json["updatedAt"], "2023-05-01");
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = create_test_app().await;
        let (status, body) = get_body(app.clone(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("\"healthy\""));

        let (status, _) = get_body(app, "/health/live").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let (app, _) = create_test_app().await;
        let (status, body) = get_body(app, "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Page Not Found"));
    }
}
