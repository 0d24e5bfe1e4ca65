//! HTTP client for the task analysis service.
//!
//! The service owns all scoring. This client only ships the parsed buffer and
//! hands back the raw JSON body; deciding whether that body is usable is left
//! to the form component.

use std::future::Future;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::config::Config;
use crate::models::AnalyzeRequest;

const ANALYZE_PATH: &str = "/tasks/analyze/";
const SUGGEST_PATH: &str = "/tasks/suggest/";

/// HTTP client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Response was not JSON ({status}): {source}")]
    InvalidBody {
        status: StatusCode,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode request: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Anything that can score a batch of tasks.
///
/// Both calls resolve to the decoded response body whatever the HTTP status.
pub trait AnalysisBackend: Send + Sync {
    fn analyze(
        &self,
        request: &AnalyzeRequest,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send;

    fn suggest(
        &self,
        request: &AnalyzeRequest,
    ) -> impl Future<Output = Result<Value, ClientError>> + Send;
}

/// HTTP client for the analysis service.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    base_url: String,
    client: Client,
}

impl AnalysisClient {
    /// Create client from environment variables.
    pub fn from_env() -> Self {
        Self::from_config(&Config::from_env())
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.base_url.clone())
    }

    /// Create with an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode the body as JSON without looking at the status.
    async fn read_body(&self, response: reqwest::Response) -> Result<Value, ClientError> {
        let status = response.status();
        let body = response.bytes().await?;
        tracing::debug!(%status, bytes = body.len(), "Analysis service responded");

        if !status.is_success() {
            tracing::warn!(%status, "Analysis service returned a non-success status");
        }

        serde_json::from_slice(&body).map_err(|source| ClientError::InvalidBody { status, source })
    }
}

impl AnalysisBackend for AnalysisClient {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<Value, ClientError> {
        tracing::info!(strategy = %request.strategy, "Submitting tasks for analysis");

        let response = self
            .client
            .post(self.url(ANALYZE_PATH))
            .json(request)
            .send()
            .await?;
        self.read_body(response).await
    }

    async fn suggest(&self, request: &AnalyzeRequest) -> Result<Value, ClientError> {
        tracing::info!(strategy = %request.strategy, "Requesting suggestions");

        let tasks = serde_json::to_string(&request.tasks).map_err(ClientError::Encode)?;
        let response = self
            .client
            .get(self.url(SUGGEST_PATH))
            .query(&[("tasks", tasks.as_str()), ("strategy", request.strategy.as_str())])
            .send()
            .await?;
        self.read_body(response).await
    }
}
