//! Benchboard Web Server
//!
//! Run with: cargo run --bin benchboard-server
//!
//! # Configuration
//!
//! Read from `config.toml` (see `benchboard config`), overridden by:
//! - `BENCHBOARD_DATA_URL`: Data URL template with a `{revision}` placeholder
//! - `BENCHBOARD_REVISION`: Revision loaded at startup (default: master)
//! - `BENCHBOARD_HOST` / `BENCHBOARD_PORT`: Bind address (default: 0.0.0.0:8086)
//! - `BENCHBOARD_LOG_LEVEL` / `BENCHBOARD_LOG_FORMAT`: Logging
//! - `RUST_LOG`: Full tracing filter, wins over the level above

use benchboard::config::Config;
use benchboard::controller::{Controller, SharedState};
use benchboard::decorate::{ColorSampler, RandomColors};
use benchboard::server::{serve, ServerState};
use benchboard::source::{DynSource, HttpSource};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let (config, problems) = Config::load_default();
    benchboard::logging::init(&config.logging);
    for problem in &problems {
        tracing::warn!("{}, using defaults", problem);
    }

    tracing::info!("Starting Benchboard server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data URL: {}", config.source.data_url);

    let source: DynSource = Arc::new(HttpSource::new(
        &config.source.data_url,
        config.source.request_timeout(),
    )?);
    let colors: Box<dyn ColorSampler + Send + Sync> = Box::new(RandomColors);
    let controller = Controller::with_colors(source, SharedState::new(), colors)
        .default_revision(&config.source.default_revision);

    let state = ServerState::new(controller);

    // Pages render "Loading..." until the initial load lands; a failure is
    // kept in the state and shown on every page
    let initial = state.controller.clone();
    tokio::spawn(async move {
        if let Err(e) = initial.mount("").await {
            tracing::warn!("Initial benchmark load failed: {}", e);
        }
    });

    serve(state, &config.server).await?;
    Ok(())
}
