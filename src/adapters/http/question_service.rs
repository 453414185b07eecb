//! HTTP adapter for the adaptive question service.
//!
//! Posts the adaptive context to the external service and maps the reply
//! into the port's typed response. The per-request timeout comes from the
//! request's own budget so the selector's clock and the wire clock agree.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::Duration;

use super::rate_limiter::TokenBucketRateLimiter;
use crate::domain::ports::{NextQuestion, NextQuestionRequest, QuestionService};

/// Configuration for the question service client.
#[derive(Debug, Clone)]
pub struct HttpQuestionServiceConfig {
    /// Service base URL.
    pub base_url: String,
    /// Connect timeout in milliseconds.
    pub connect_timeout_ms: u64,
}

impl Default for HttpQuestionServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8082".to_string(),
            connect_timeout_ms: 300,
        }
    }
}

/// Reqwest-backed implementation of [`QuestionService`].
pub struct HttpQuestionService {
    client: Client,
    config: HttpQuestionServiceConfig,
    limiter: TokenBucketRateLimiter,
}

impl HttpQuestionService {
    /// Builds the client.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be constructed.
    pub fn new(config: HttpQuestionServiceConfig, rate_limit_rps: f64) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .context("Failed to build question service HTTP client")?;

        Ok(Self {
            client,
            config,
            limiter: TokenBucketRateLimiter::new(rate_limit_rps),
        })
    }
}

#[async_trait]
impl QuestionService for HttpQuestionService {
    async fn next_question(&self, request: &NextQuestionRequest) -> Result<NextQuestion> {
        self.limiter.acquire().await;

        let response = self
            .client
            .post(format!("{}/v1/questions/next", self.config.base_url))
            .header(header::CONTENT_TYPE, "application/json")
            .timeout(Duration::from_millis(request.timeout_budget_ms))
            .json(request)
            .send()
            .await
            .context("Question service request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Question service error {status}: {body}"));
        }

        response
            .json::<NextQuestion>()
            .await
            .context("Failed to parse question service response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::QuestionType;

    fn test_request(budget_ms: u64) -> NextQuestionRequest {
        NextQuestionRequest {
            session_id: "sess_1".to_string(),
            theta: 0.4,
            standard_error: 0.8,
            question_index: 2,
            job_role: "Backend Developer".to_string(),
            skills: vec!["rust".to_string()],
            min_difficulty: -1.0,
            max_difficulty: 1.0,
            question_type_hint: Some(QuestionType::Technical),
            timeout_budget_ms: budget_ms,
        }
    }

    #[tokio::test]
    async fn test_next_question_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/questions/next")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "question_id": "q_42",
                    "text": "Explain write-ahead logging",
                    "type": "technical",
                    "difficulty": 0.6,
                    "category": "storage"
                }"#,
            )
            .create_async()
            .await;

        let service = HttpQuestionService::new(
            HttpQuestionServiceConfig {
                base_url: server.url(),
                ..HttpQuestionServiceConfig::default()
            },
            100.0,
        )
        .unwrap();

        let question = service.next_question(&test_request(800)).await.unwrap();

        assert_eq!(question.question_id, "q_42");
        assert_eq!(question.question_type, QuestionType::Technical);
        assert!((question.difficulty - 0.6).abs() < f64::EPSILON);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_next_question_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/questions/next")
            .with_status(503)
            .with_body("overloaded")
            .create_async()
            .await;

        let service = HttpQuestionService::new(
            HttpQuestionServiceConfig {
                base_url: server.url(),
                ..HttpQuestionServiceConfig::default()
            },
            100.0,
        )
        .unwrap();

        let result = service.next_question(&test_request(800)).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_next_question_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/questions/next")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"unexpected": true}"#)
            .create_async()
            .await;

        let service = HttpQuestionService::new(
            HttpQuestionServiceConfig {
                base_url: server.url(),
                ..HttpQuestionServiceConfig::default()
            },
            100.0,
        )
        .unwrap();

        let result = service.next_question(&test_request(800)).await;
        assert!(result.is_err());
    }
}
