//! HTTP adapter for the response analyzer service.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::Duration;

use crate::domain::ports::{AnalysisRequest, AnalysisResult, ResponseAnalyzer};

/// Configuration for the analyzer client.
#[derive(Debug, Clone)]
pub struct HttpResponseAnalyzerConfig {
    /// Service base URL.
    pub base_url: String,
    /// Request timeout in milliseconds. The analyzer runs off the critical
    /// path, so this is generous compared to the question budget.
    pub timeout_ms: u64,
}

impl Default for HttpResponseAnalyzerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8083".to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// Reqwest-backed implementation of [`ResponseAnalyzer`].
pub struct HttpResponseAnalyzer {
    client: Client,
    config: HttpResponseAnalyzerConfig,
}

impl HttpResponseAnalyzer {
    /// Builds the client.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be constructed.
    pub fn new(config: HttpResponseAnalyzerConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .context("Failed to build analyzer HTTP client")?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl ResponseAnalyzer for HttpResponseAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let response = self
            .client
            .post(format!("{}/v1/analysis", self.config.base_url))
            .header(header::CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .context("Analyzer request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Analyzer error {status}: {body}"));
        }

        response
            .json::<AnalysisResult>()
            .await
            .context("Failed to parse analyzer response")
    }
}
