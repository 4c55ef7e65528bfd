//! Benchmark Data Sources
//!
//! A data source resolves a revision identifier to a [`BenchmarkPayload`].
//! The trait is the only seam between the controller and the network, so
//! the browser app and the native binaries plug in their own HTTP stacks.

use async_trait::async_trait;
use thiserror::Error;

use crate::model::BenchmarkPayload;

/// Placeholder substituted with the (percent-encoded) revision in data URLs
pub const REVISION_PLACEHOLDER: &str = "{revision}";

/// Default location of published benchmark runs
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/the-benchmarker/web-frameworks/{revision}/data.min.json";

/// Errors raised while fetching benchmark data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    /// Transport failed (connect, timeout, ...)
    #[error("Request failed: {0}")]
    Request(String),

    /// Server answered with a non-success status
    #[error("Unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// Body was not a valid benchmark payload
    #[error("Malformed payload: {0}")]
    Decode(String),

    /// Data URL template is unusable
    #[error("Invalid data URL: {0}")]
    InvalidUrl(String),

    /// Local file could not be read
    #[error("IO error: {0}")]
    Io(String),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Decode(err.to_string())
    }
}

/// Result type for data source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Anything that can fetch the benchmark run for a revision
///
/// Futures are `Send` with the `native` feature; without it the trait targets
/// single-threaded browser futures.
#[cfg_attr(feature = "native", async_trait)]
#[cfg_attr(not(feature = "native"), async_trait(?Send))]
pub trait BenchmarkSource {
    async fn fetch(&self, revision: &str) -> SourceResult<BenchmarkPayload>;
}

/// Build the data URL for a revision from a `{revision}` template
pub fn data_url(template: &str, revision: &str) -> SourceResult<String> {
    if !template.contains(REVISION_PLACEHOLDER) {
        return Err(SourceError::InvalidUrl(format!(
            "'{}' has no {} placeholder",
            template, REVISION_PLACEHOLDER
        )));
    }
    Ok(template.replace(REVISION_PLACEHOLDER, &urlencoding::encode(revision)))
}

#[cfg(feature = "native")]
pub use native::{DynSource, HttpSource, JsonFileSource};

#[cfg(feature = "native")]
mod native {
    use super::*;
    use reqwest::Client;
    use std::path::PathBuf;
    use std::sync::Arc;
    use std::time::Duration;

    /// Shared, type-erased data source
    pub type DynSource = Arc<dyn BenchmarkSource + Send + Sync>;

    #[async_trait]
    impl<T: BenchmarkSource + Send + Sync + ?Sized> BenchmarkSource for Arc<T> {
        async fn fetch(&self, revision: &str) -> SourceResult<BenchmarkPayload> {
            (**self).fetch(revision).await
        }
    }

    impl From<reqwest::Error> for SourceError {
        fn from(err: reqwest::Error) -> Self {
            if err.is_decode() {
                SourceError::Decode(err.to_string())
            } else {
                SourceError::Request(err.to_string())
            }
        }
    }

    /// Fetches benchmark runs over HTTP
    #[derive(Debug, Clone)]
    pub struct HttpSource {
        client: Client,
        url_template: String,
    }

    impl HttpSource {
        /// Create a source for a `{revision}` URL template
        pub fn new(url_template: impl Into<String>, timeout: Duration) -> SourceResult<Self> {
            let url_template = url_template.into();
            // Validate the template up front rather than on first fetch
            data_url(&url_template, "")?;

            let client = Client::builder().timeout(timeout).build()?;
            Ok(Self {
                client,
                url_template,
            })
        }

        pub fn url_for(&self, revision: &str) -> SourceResult<String> {
            data_url(&self.url_template, revision)
        }
    }

    #[async_trait]
    impl BenchmarkSource for HttpSource {
        async fn fetch(&self, revision: &str) -> SourceResult<BenchmarkPayload> {
            let url = self.url_for(revision)?;
            tracing::debug!(%url, revision, "Requesting benchmark data");

            let response = self.client.get(&url).send().await?;
            if !response.status().is_success() {
                return Err(SourceError::Status {
                    status: response.status().as_u16(),
                    url,
                });
            }

            let body = response.bytes().await?;
            Ok(serde_json::from_slice(&body)?)
        }
    }

    /// Reads a benchmark payload from a local JSON file, ignoring the revision
    #[derive(Debug, Clone)]
    pub struct JsonFileSource {
        path: PathBuf,
    }

    impl JsonFileSource {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self { path: path.into() }
        }
    }

    #[async_trait]
    impl BenchmarkSource for JsonFileSource {
        async fn fetch(&self, revision: &str) -> SourceResult<BenchmarkPayload> {
            tracing::debug!(path = ?self.path, revision, "Reading benchmark data from file");
            let content = tokio::fs::read(&self.path)
                .await
                .map_err(|e| SourceError::Io(format!("{}: {}", self.path.display(), e)))?;
            Ok(serde_json::from_slice(&content)?)
        }
    }
}
