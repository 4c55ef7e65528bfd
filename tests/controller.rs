//! Controller integration tests
//!
//! Drive the fetch cycle against in-memory sources.

use async_trait::async_trait;
use benchboard::{
    AppState, Benchmark, BenchmarkPayload, BenchmarkSource, Controller, Framework, Hardware,
    LoadStatus, SeededColors, SharedState, SourceError, SourceResult, StateStore,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::oneshot;

fn payload(labels: &[&str], updated_at: &str) -> BenchmarkPayload {
    BenchmarkPayload {
        data: labels
            .iter()
            .enumerate()
            .map(|(i, label)| {
                Benchmark::new(Framework::new(*label, "1.0")).result("rps", (i as u64 + 1) * 100)
            })
            .collect(),
        updated_at: updated_at.to_string(),
        hardware: serde_json::from_str(r#"{"cpus": 4}"#).unwrap(),
    }
}

/// Returns canned payloads and remembers which revisions were requested
#[derive(Default)]
struct RecordingSource {
    payloads: HashMap<String, BenchmarkPayload>,
    calls: Mutex<Vec<String>>,
}

impl RecordingSource {
    fn with(mut self, revision: &str, payload: BenchmarkPayload) -> Self {
        self.payloads.insert(revision.to_string(), payload);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BenchmarkSource for RecordingSource {
    async fn fetch(&self, revision: &str) -> SourceResult<BenchmarkPayload> {
        self.calls.lock().unwrap().push(revision.to_string());
        self.payloads
            .get(revision)
            .cloned()
            .ok_or_else(|| SourceError::Status {
                status: 404,
                url: format!("mem://{}", revision),
            })
    }
}

/// Holds every fetch until the test releases the matching gate
struct GatedSource {
    gates: Mutex<HashMap<String, oneshot::Receiver<BenchmarkPayload>>>,
}

#[async_trait]
impl BenchmarkSource for GatedSource {
    async fn fetch(&self, revision: &str) -> SourceResult<BenchmarkPayload> {
        let gate = self
            .gates
            .lock()
            .unwrap()
            .remove(revision)
            .expect("no gate for revision");
        gate.await
            .map_err(|_| SourceError::Request("gate dropped".to_string()))
    }
}

/// Never answers for `stalled`; serves a small run for anything else
struct StallingSource;

#[async_trait]
impl BenchmarkSource for StallingSource {
    async fn fetch(&self, revision: &str) -> SourceResult<BenchmarkPayload> {
        if revision == "stalled" {
            std::future::pending::<()>().await;
        }
        Ok(payload(&["actix"], "2023-05-01 10:00:00"))
    }
}

fn controller(
    source: RecordingSource,
) -> Controller<Arc<RecordingSource>, SharedState, SeededColors> {
    Controller::with_colors(Arc::new(source), SharedState::new(), SeededColors::new(9))
}

#[tokio::test]
async fn test_mount_without_sha_uses_default_revision() {
    let ctl = controller(RecordingSource::default().with("master", payload(&["actix"], "2023-05-01 10:00:00")));

    ctl.mount("").await.unwrap();

    assert_eq!(ctl.source().calls(), vec!["master".to_string()]);
    let state = ctl.store().snapshot();
    assert_eq!(state.status, LoadStatus::Ready);
    assert_eq!(state.updated_at, "2023-05-01");
    assert_eq!(state.revision.as_deref(), Some("master"));
}

#[tokio::test]
async fn test_mount_reads_sha_from_query() {
    let ctl = controller(RecordingSource::default().with("abc123", payload(&["gin"], "2024-02-03 04:05:06")));

    ctl.mount("?lang=rust&sha=abc123").await.unwrap();

    assert_eq!(ctl.source().calls(), vec!["abc123".to_string()]);
    assert_eq!(ctl.store().snapshot().updated_at, "2024-02-03");
}

#[tokio::test]
async fn test_empty_sha_falls_back_to_default() {
    let ctl = controller(RecordingSource::default().with("main", payload(&[], "x")))
        .default_revision("main");

    ctl.mount("?sha=").await.unwrap();
    assert_eq!(ctl.source().calls(), vec!["main".to_string()]);
}

#[tokio::test]
async fn test_decorated_count_matches_raw() {
    let labels = ["actix", "axum", "express", "gin", "rocket"];
    let ctl = controller(RecordingSource::default().with("master", payload(&labels, "d")));

    ctl.fetch_benchmark_data("master", false).await.unwrap();

    let state = ctl.store().snapshot();
    assert_eq!(state.benchmarks.len(), labels.len());
    for (record, label) in state.benchmarks.iter().zip(labels) {
        assert_eq!(record.benchmark.framework.label, label);
        assert_eq!(record.label, format!("{} (1.0)", label));
    }
}

#[tokio::test]
async fn test_date_only_updated_when_requested() {
    let ctl = controller(
        RecordingSource::default()
            .with("master", payload(&["a"], "2023-05-01 10:00:00"))
            .with("old", payload(&["b"], "2020-01-01 00:00:00")),
    );

    ctl.fetch_benchmark_data("master", true).await.unwrap();
    ctl.fetch_benchmark_data("old", false).await.unwrap();

    let state = ctl.store().snapshot();
    assert_eq!(state.updated_at, "2023-05-01");
    assert_eq!(state.revision.as_deref(), Some("old"));
    assert_eq!(state.benchmarks[0].benchmark.framework.label, "b");
}

#[tokio::test]
async fn test_refetch_same_revision_recolors() {
    let ctl = controller(RecordingSource::default().with("master", payload(&["a", "b", "c"], "d")));

    ctl.fetch_benchmark_data("master", true).await.unwrap();
    let first = ctl.store().snapshot().benchmarks;
    ctl.fetch_benchmark_data("master", true).await.unwrap();
    let second = ctl.store().snapshot().benchmarks;

    // Same records, fresh colors drawn from the sampler
    assert_eq!(first.len(), second.len());
    assert!(first
        .iter()
        .zip(&second)
        .all(|(a, b)| a.benchmark == b.benchmark));
    assert_ne!(
        first.iter().map(|r| &r.color).collect::<Vec<_>>(),
        second.iter().map(|r| &r.color).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn test_empty_result_is_ready() {
    let ctl = controller(RecordingSource::default().with("master", payload(&[], "2023-05-01 10:00:00")));

    ctl.mount("").await.unwrap();

    let state = ctl.store().snapshot();
    assert_eq!(state.status, LoadStatus::Ready);
    assert!(state.benchmarks.is_empty());
    assert_eq!(benchboard::ResultView::new(&state.benchmarks).entries.len(), 0);
}

#[tokio::test]
async fn test_failure_enters_failed_state() {
    let ctl = controller(RecordingSource::default().with("master", payload(&["a"], "2023-05-01 1")));

    ctl.mount("").await.unwrap();
    let err = ctl.fetch_benchmark_data("missing", false).await.unwrap_err();
    assert!(matches!(err, SourceError::Status { status: 404, .. }));

    let state = ctl.store().snapshot();
    assert!(!state.is_loading());
    assert!(state.error().unwrap().contains("404"));
    // Data from the earlier load is still there
    assert_eq!(state.benchmarks.len(), 1);

    // No retry happened
    assert_eq!(ctl.source().calls().len(), 2);

    ctl.fetch_benchmark_data("master", false).await.unwrap();
    assert_eq!(ctl.store().snapshot().status, LoadStatus::Ready);
}

#[tokio::test]
async fn test_overlapping_fetches_last_response_wins() {
    let (tx_first, rx_first) = oneshot::channel();
    let (tx_second, rx_second) = oneshot::channel();
    let gates = HashMap::from([
        ("first".to_string(), rx_first),
        ("second".to_string(), rx_second),
    ]);

    let ctl = Arc::new(Controller::with_colors(
        GatedSource {
            gates: Mutex::new(gates),
        },
        SharedState::new(),
        SeededColors::new(1),
    ));

    let first = tokio::spawn({
        let ctl = ctl.clone();
        async move { ctl.fetch_benchmark_data("first", false).await }
    });
    let second = tokio::spawn({
        let ctl = ctl.clone();
        async move { ctl.fetch_benchmark_data("second", false).await }
    });

    while ctl.store().read(AppState::pending) < 2 {
        tokio::task::yield_now().await;
    }
    assert!(ctl.store().snapshot().is_loading());

    // The call issued second answers first
    tx_second.send(payload(&["from-second"], "d")).unwrap();
    second.await.unwrap().unwrap();
    assert!(ctl.store().snapshot().is_loading());

    tx_first.send(payload(&["from-first"], "d")).unwrap();
    first.await.unwrap().unwrap();

    let state = ctl.store().snapshot();
    assert_eq!(state.status, LoadStatus::Ready);
    assert_eq!(state.revision.as_deref(), Some("first"));
    assert_eq!(state.benchmarks[0].benchmark.framework.label, "from-first");
}

#[tokio::test]
async fn test_custom_store_sees_every_transition() {
    /// Records the status after every update
    #[derive(Default)]
    struct TracingStore {
        state: Mutex<AppState>,
        history: Mutex<Vec<LoadStatus>>,
    }

    impl StateStore for TracingStore {
        fn update<F: FnOnce(&mut AppState)>(&self, f: F) {
            let mut state = self.state.lock().unwrap();
            f(&mut state);
            self.history.lock().unwrap().push(state.status.clone());
        }
    }

    let source = RecordingSource::default().with("master", payload(&["a"], "d"));
    let ctl = Controller::with_colors(source, TracingStore::default(), SeededColors::new(2));
    ctl.mount("").await.unwrap();

    let history = ctl.store().history.lock().unwrap().clone();
    assert_eq!(history, vec![LoadStatus::Loading, LoadStatus::Ready]);
    assert_eq!(ctl.store().state.lock().unwrap().hardware, Some(serde_json::from_str::<Hardware>(r#"{"cpus": 4}"#).unwrap()));
}

#[tokio::test]
async fn test_abandoned_fetch_settles_state() {
    let ctl = Controller::with_colors(StallingSource, SharedState::new(), SeededColors::new(3));

    let abandoned =
        tokio::time::timeout(Duration::from_millis(10), ctl.fetch_benchmark_data("stalled", false)).await;
    assert!(abandoned.is_err());

    // Nothing was shown yet, so the abandoned first load counts as a failure
    let state = ctl.store().snapshot();
    assert_eq!(state.pending(), 0);
    assert!(!state.is_loading());
    assert!(state.error().is_some());

    ctl.mount("").await.unwrap();
    assert_eq!(ctl.store().snapshot().status, LoadStatus::Ready);

    // Abandoning a later switch leaves the shown data ready
    let abandoned =
        tokio::time::timeout(Duration::from_millis(10), ctl.fetch_benchmark_data("stalled", false)).await;
    assert!(abandoned.is_err());

    let state = ctl.store().snapshot();
    assert_eq!(state.pending(), 0);
    assert_eq!(state.status, LoadStatus::Ready);
    assert_eq!(state.revision.as_deref(), Some("master"));

    ctl.fetch_benchmark_data("other", false).await.unwrap();
    assert_eq!(ctl.store().snapshot().status, LoadStatus::Ready);
}
