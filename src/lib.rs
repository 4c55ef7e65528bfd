//! # Benchboard
//!
//! Web framework benchmark dashboard: fetches the benchmark run for a
//! revision, decorates every framework record with chart colors and a label,
//! and renders home, result and comparison views.
//!
//! ## Modules
//!
//! - [`model`]: Wire types and decorated display records
//! - [`color`], [`decorate`]: Chart colors and the presentation decorator
//! - [`source`]: Data source trait (HTTP and file sources with `native`)
//! - [`controller`]: Application state and fetch orchestration
//! - [`routes`], [`views`]: Route table and per-view data
//! - `config`, `logging`, `server`: Configuration, tracing setup and the
//!   server-rendered web app (`native`)
//!
//! Without the default `native` feature the crate only carries the parts the
//! browser app shares.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use benchboard::controller::{Controller, SharedState};
//! use benchboard::source::{HttpSource, DEFAULT_DATA_URL};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = HttpSource::new(DEFAULT_DATA_URL, Duration::from_secs(30))?;
//!     let controller = Controller::new(source, SharedState::new());
//!
//!     // Same as a first page load without ?sha=
//!     controller.mount("").await?;
//!
//!     let state = controller.store().snapshot();
//!     println!("{} frameworks, updated {}", state.benchmarks.len(), state.updated_at);
//!     Ok(())
//! }
//! ```

pub mod color;
pub mod controller;
pub mod decorate;
pub mod model;
pub mod routes;
pub mod source;
pub mod views;

#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod logging;
#[cfg(feature = "native")]
pub mod server;

// Re-export top-level types for convenience
pub use color::Color;

pub use controller::{
    display_date, revision_from_query, AppState, Controller, LoadStatus, SharedState, StateStore,
};

pub use decorate::{decorate, ColorSampler, RandomColors, SeededColors};

pub use model::{Benchmark, BenchmarkPayload, DisplayRecord, Framework, Hardware, DEFAULT_REVISION};

pub use routes::{View, ROUTES};

pub use source::{BenchmarkSource, SourceError, SourceResult};

pub use views::{CompareView, HomeView, ResultView};

#[cfg(feature = "native")]
pub use source::{DynSource, HttpSource, JsonFileSource};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError, LoggingConfig, ServerConfig, SourceConfig};

#[cfg(feature = "native")]
pub use server::{build_router, serve, PageController, ServerError, ServerState};
