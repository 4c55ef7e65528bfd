//! Root Controller
//!
//! Owns the application state and runs the fetch-decorate-store cycle.
//!
//! The state lives behind a [`StateStore`] so the same orchestration drives a
//! lock-protected struct in the native binaries and reactive signals in the
//! browser app.
//!
//! Overlapping fetches are neither cancelled nor sequenced: every completed
//! fetch replaces the data wholesale, so the response that arrives last wins
//! even when it belongs to the call issued first. The status only returns to
//! [`LoadStatus::Ready`] once no fetch is outstanding.

use serde::Serialize;
use std::sync::{Arc, RwLock};

use crate::decorate::{decorate, ColorSampler, RandomColors};
use crate::model::{DisplayRecord, Hardware, DEFAULT_REVISION};
use crate::source::{BenchmarkSource, SourceResult};

/// Lifecycle of the benchmark data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum LoadStatus {
    /// A fetch is outstanding (or none has started yet)
    Loading,
    /// Data from the last completed fetch is in place
    Ready,
    /// The last fetch failed; previous data, if any, is kept
    Failed(String),
}

/// Everything the views render
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub benchmarks: Vec<DisplayRecord>,
    /// Date shown on the home view (first segment of the raw timestamp)
    pub updated_at: String,
    pub hardware: Option<Hardware>,
    /// Revision the current data was fetched for
    pub revision: Option<String>,
    pub status: LoadStatus,
    #[serde(skip)]
    pending: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            benchmarks: Vec::new(),
            updated_at: String::new(),
            hardware: None,
            revision: None,
            status: LoadStatus::Loading,
            pending: 0,
        }
    }
}

impl AppState {
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Number of fetches started but not yet finished
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Mark a fetch as outstanding
    pub fn begin_fetch(&mut self) {
        self.pending += 1;
        self.status = LoadStatus::Loading;
    }

    /// Replace the data with a completed fetch's result
    pub fn finish_fetch(
        &mut self,
        revision: &str,
        benchmarks: Vec<DisplayRecord>,
        hardware: Hardware,
        displayed_date: Option<String>,
    ) {
        self.benchmarks = benchmarks;
        self.hardware = Some(hardware);
        self.revision = Some(revision.to_string());
        if let Some(date) = displayed_date {
            self.updated_at = date;
        }
        self.settle(LoadStatus::Ready);
    }

    /// Record a failed fetch, keeping whatever data is already shown
    pub fn fail_fetch(&mut self, message: impl Into<String>) {
        self.settle(LoadStatus::Failed(message.into()));
    }

    /// Record a fetch abandoned before it finished
    ///
    /// Data already shown stays; with nothing shown yet the state fails.
    pub fn cancel_fetch(&mut self) {
        let outcome = if self.revision.is_some() {
            LoadStatus::Ready
        } else {
            LoadStatus::Failed("Fetch cancelled before any data arrived".to_string())
        };
        self.settle(outcome);
    }

    /// Whether a request for `requested` must fetch before rendering
    ///
    /// True when another revision is shown or the last fetch failed. While
    /// the first load is in flight, a request for the revision it is loading
    /// (`initial`) joins it instead of fetching again.
    pub fn needs_fetch(&self, requested: &str, initial: &str) -> bool {
        if self.error().is_some() {
            return true;
        }
        match &self.revision {
            Some(shown) => shown != requested,
            None => !(self.pending > 0 && requested == initial),
        }
    }

    fn settle(&mut self, outcome: LoadStatus) {
        self.pending = self.pending.saturating_sub(1);
        self.status = if self.pending > 0 {
            LoadStatus::Loading
        } else {
            outcome
        };
    }
}

/// Container the controller writes application state into
pub trait StateStore {
    /// Apply a mutation to the state
    fn update<F: FnOnce(&mut AppState)>(&self, f: F);
}

/// Lock-protected state shared between the controller and its readers
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    inner: Arc<RwLock<AppState>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current state
    pub fn snapshot(&self) -> AppState {
        self.read(|state| state.clone())
    }

    /// Read the state without cloning it
    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> R {
        let guard = self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&guard)
    }
}

impl StateStore for SharedState {
    fn update<F: FnOnce(&mut AppState)>(&self, f: F) {
        let mut guard = self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard);
    }
}

/// Part of a raw update timestamp shown to users: everything before the first space
pub fn display_date(raw: &str) -> String {
    raw.split(' ').next().unwrap_or_default().to_string()
}

/// Value of the `sha` parameter in a query string (with or without leading `?`)
pub fn revision_from_query(query: &str) -> Option<String> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key) == "sha").then(|| decode_component(value))
        })
        .next()
}

fn decode_component(s: &str) -> String {
    let s = s.replace('+', " ");
    let decoded = urlencoding::decode(&s).map(|decoded| decoded.into_owned());
    decoded.unwrap_or(s)
}

/// An outstanding fetch; settles the state as cancelled if dropped unfinished
struct PendingFetch<'a, T: StateStore> {
    store: &'a T,
    settled: bool,
}

impl<'a, T: StateStore> PendingFetch<'a, T> {
    fn begin(store: &'a T) -> Self {
        store.update(AppState::begin_fetch);
        Self {
            store,
            settled: false,
        }
    }

    fn settle<F: FnOnce(&mut AppState)>(mut self, f: F) {
        self.settled = true;
        self.store.update(f);
    }
}

impl<T: StateStore> Drop for PendingFetch<'_, T> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("Benchmark fetch dropped before completion");
            self.store.update(AppState::cancel_fetch);
        }
    }
}

/// Drives fetches from a data source into a state store
pub struct Controller<S, T, C = RandomColors> {
    source: S,
    store: T,
    colors: C,
    default_revision: String,
}

impl<S, T> Controller<S, T, RandomColors>
where
    S: BenchmarkSource,
    T: StateStore,
{
    /// Create a controller with random chart colors
    pub fn new(source: S, store: T) -> Self {
        Self::with_colors(source, store, RandomColors)
    }
}

impl<S, T, C> Controller<S, T, C>
where
    S: BenchmarkSource,
    T: StateStore,
    C: ColorSampler,
{
    /// Create a controller with a specific color sampler
    pub fn with_colors(source: S, store: T, colors: C) -> Self {
        Self {
            source,
            store,
            colors,
            default_revision: DEFAULT_REVISION.to_string(),
        }
    }

    /// Revision used when the page carries no `sha` parameter
    pub fn default_revision(mut self, revision: impl Into<String>) -> Self {
        self.default_revision = revision.into();
        self
    }

    pub fn store(&self) -> &T {
        &self.store
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Revision fetched when the query carries no `sha`
    pub fn fallback_revision(&self) -> &str {
        &self.default_revision
    }

    /// Revision selected by a query string, falling back to the default
    pub fn revision_for_query(&self, query: &str) -> String {
        revision_from_query(query)
            .filter(|rev| !rev.is_empty())
            .unwrap_or_else(|| self.default_revision.clone())
    }

    /// Initial load: fetch the revision named by `sha` and set the displayed date
    pub async fn mount(&self, query: &str) -> SourceResult<()> {
        let revision = self.revision_for_query(query);
        self.fetch_benchmark_data(&revision, true).await
    }

    /// Fetch, decorate and store the benchmark run for `revision`
    ///
    /// The error is recorded in the state as well as returned. Dropping the
    /// future before it completes settles the state as cancelled.
    pub async fn fetch_benchmark_data(
        &self,
        revision: &str,
        update_displayed_date: bool,
    ) -> SourceResult<()> {
        let pending = PendingFetch::begin(&self.store);
        tracing::info!(revision, "Fetching benchmark data");

        let payload = match self.source.fetch(revision).await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(revision, error = %e, "Benchmark fetch failed");
                let message = e.to_string();
                pending.settle(|state| state.fail_fetch(message));
                return Err(e);
            }
        };

        let records = decorate(&payload.data, &self.colors);
        let displayed_date = update_displayed_date.then(|| display_date(&payload.updated_at));
        tracing::info!(revision, records = records.len(), "Benchmark data loaded");

        pending.settle(|state| {
            state.finish_fetch(revision, records, payload.hardware, displayed_date)
        });
        Ok(())
    }
}
