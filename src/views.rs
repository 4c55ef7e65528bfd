//! View Models
//!
//! Render-ready data for each route, derived from the application state.
//! Both the server-rendered pages and the CLI print from these.

use serde::Serialize;

use crate::controller::AppState;
use crate::model::DisplayRecord;

/// Data for the home view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeView {
    pub updated_at: String,
    pub hardware: Vec<(String, String)>,
}

impl HomeView {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            updated_at: state.updated_at.clone(),
            hardware: state
                .hardware
                .as_ref()
                .map(|hw| hw.entries())
                .unwrap_or_default(),
        }
    }
}

/// One framework row in the result view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntry {
    pub label: String,
    pub color: String,
    pub background_color: String,
    pub metrics: Vec<(String, f64)>,
}

impl ResultEntry {
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics
            .iter()
            .find(|(metric, _)| metric == name)
            .map(|(_, value)| *value)
    }
}

impl From<&DisplayRecord> for ResultEntry {
    fn from(record: &DisplayRecord) -> Self {
        Self {
            label: record.label.clone(),
            color: record.color.clone(),
            background_color: record.background_color.clone(),
            metrics: record.benchmark.metrics(),
        }
    }
}

/// Data for the result view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    pub entries: Vec<ResultEntry>,
    /// Every metric name present in any entry, in first-seen order
    pub metric_names: Vec<String>,
}

impl ResultView {
    pub fn new(records: &[DisplayRecord]) -> Self {
        let entries: Vec<ResultEntry> = records.iter().map(ResultEntry::from).collect();
        let metric_names = metric_names(&entries);
        Self {
            entries,
            metric_names,
        }
    }

    /// One chart series: every entry's value for `metric`
    pub fn series(&self, metric: &str) -> Vec<(&ResultEntry, Option<f64>)> {
        self.entries
            .iter()
            .map(|entry| (entry, entry.metric(metric)))
            .collect()
    }
}

/// A framework column in the comparison view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareColumn {
    pub label: String,
    pub color: String,
}

/// One metric compared across the selected frameworks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompareRow {
    pub metric: String,
    /// One value per column, `None` where a framework lacks the metric
    pub values: Vec<Option<f64>>,
}

/// Data for the comparison view
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompareView {
    pub columns: Vec<CompareColumn>,
    pub rows: Vec<CompareRow>,
}

impl CompareView {
    /// Compare the frameworks named in `selection`; an empty selection compares all
    ///
    /// Names match either the framework label or the full "label (version)"
    /// string, case-insensitively. Unknown names are ignored.
    pub fn new(records: &[DisplayRecord], selection: &[String]) -> Self {
        let selected: Vec<ResultEntry> = records
            .iter()
            .filter(|record| selection.is_empty() || is_selected(record, selection))
            .map(ResultEntry::from)
            .collect();

        let rows = metric_names(&selected)
            .into_iter()
            .map(|metric| CompareRow {
                values: selected.iter().map(|entry| entry.metric(&metric)).collect(),
                metric,
            })
            .collect();

        let columns = selected
            .into_iter()
            .map(|entry| CompareColumn {
                label: entry.label,
                color: entry.color,
            })
            .collect();

        Self { columns, rows }
    }
}

/// Format a metric value for tables: integers without decimals, "-" when missing
pub fn format_value(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{}", v as i64),
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    }
}

/// Split a comma-separated framework selection
pub fn parse_selection(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

fn is_selected(record: &DisplayRecord, selection: &[String]) -> bool {
    selection.iter().any(|name| {
        name.eq_ignore_ascii_case(&record.benchmark.framework.label)
            || name.eq_ignore_ascii_case(&record.label)
    })
}

fn metric_names(entries: &[ResultEntry]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for entry in entries {
        for (name, _) in &entry.metrics {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
    }
    names
}
