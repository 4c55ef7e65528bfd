//! Benchmark Data Model
//!
//! Wire types returned by the benchmark data source, plus the decorated
//! records the views render.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Revision fetched when the page carries no `sha` parameter
pub const DEFAULT_REVISION: &str = "master";

/// Payload returned by a data source for one revision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkPayload {
    /// One record per measured framework
    pub data: Vec<Benchmark>,
    /// Raw update timestamp, e.g. "2023-05-01 10:00:00"
    pub updated_at: String,
    /// Machine the run was executed on
    pub hardware: Hardware,
}

/// Identity of a measured framework
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Framework {
    /// Display name
    pub label: String,
    pub version: String,
    /// Remaining metadata (language, website, ...) passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Framework {
    pub fn new(label: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            version: version.into(),
            extra: Map::new(),
        }
    }
}

/// One framework's measured results for a revision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub framework: Framework,
    /// Result fields, opaque to everything but the view models
    #[serde(flatten)]
    pub results: Map<String, Value>,
}

impl Benchmark {
    pub fn new(framework: Framework) -> Self {
        Self {
            framework,
            results: Map::new(),
        }
    }

    /// Attach a result field
    pub fn result(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.results.insert(key.into(), value.into());
        self
    }

    /// Numeric result fields, nested objects flattened into dotted names
    pub fn metrics(&self) -> Vec<(String, f64)> {
        let mut out = Vec::new();
        for (key, value) in &self.results {
            collect_numbers(key, value, &mut out);
        }
        out
    }
}

fn collect_numbers(prefix: &str, value: &Value, out: &mut Vec<(String, f64)>) {
    match value {
        Value::Number(n) => {
            if let Some(v) = n.as_f64() {
                out.push((prefix.to_string(), v));
            }
        }
        Value::Object(map) => {
            for (key, nested) in map {
                collect_numbers(&format!("{}.{}", prefix, key), nested, out);
            }
        }
        _ => {}
    }
}

/// Hardware descriptor, kept exactly as the source sent it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hardware(pub Map<String, Value>);

impl Hardware {
    /// Fields rendered as `key: value` strings, ordered by key
    pub fn entries(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(k, v)| {
                let text = match v {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (k.clone(), text)
            })
            .collect()
    }
}

/// Benchmark record decorated for chart rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRecord {
    #[serde(flatten)]
    pub benchmark: Benchmark,
    /// "label (version)"
    pub label: String,
    /// Primary (darkened) color, `#rrggbb`
    pub color: String,
    /// Background (brightened) color, `#rrggbb`
    pub background_color: String,
}
