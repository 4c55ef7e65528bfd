//! Server State
//!
//! Shared state accessible by all handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::controller::{Controller, SharedState};
use crate::decorate::ColorSampler;
use crate::source::DynSource;

/// Controller type the server drives
pub type PageController = Controller<DynSource, SharedState, Box<dyn ColorSampler + Send + Sync>>;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct ServerState {
    /// Fetch orchestration and the application state it owns
    pub controller: Arc<PageController>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl ServerState {
    pub fn new(controller: PageController) -> Self {
        Self {
            controller: Arc::new(controller),
            start_time: Instant::now(),
        }
    }

    /// Application state written by the controller
    pub fn app_state(&self) -> &SharedState {
        self.controller.store()
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
