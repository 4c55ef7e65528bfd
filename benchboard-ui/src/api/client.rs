//! HTTP Data Source
//!
//! Fetches benchmark runs with `gloo-net` from a `{revision}` URL template.

use async_trait::async_trait;
use benchboard::source::{data_url, DEFAULT_DATA_URL};
use benchboard::{BenchmarkPayload, BenchmarkSource, SourceError, SourceResult};
use gloo_net::http::Request;

/// Local storage key holding a custom data URL template
pub const DATA_URL_KEY: &str = "benchboard_data_url";

/// Get the data URL template from local storage or use default
pub fn get_data_url() -> String {
    web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(DATA_URL_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DATA_URL.to_string())
}

/// Benchmark source backed by the browser's fetch API
#[derive(Debug, Clone)]
pub struct GlooSource {
    url_template: String,
}

impl GlooSource {
    pub fn new(url_template: impl Into<String>) -> Self {
        Self {
            url_template: url_template.into(),
        }
    }

    /// Source for the template configured in local storage
    pub fn from_storage() -> Self {
        Self::new(get_data_url())
    }
}

#[async_trait(?Send)]
impl BenchmarkSource for GlooSource {
    async fn fetch(&self, revision: &str) -> SourceResult<BenchmarkPayload> {
        let url = data_url(&self.url_template, revision)?;

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;

        if !response.ok() {
            return Err(SourceError::Status {
                status: response.status(),
                url,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::Request(e.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }
}
