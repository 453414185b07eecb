//! HTTP adapter for the user directory.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::domain::ports::{UserDirectory, UserRecord};

/// Configuration for the directory client.
#[derive(Debug, Clone)]
pub struct HttpUserDirectoryConfig {
    /// Service base URL.
    pub base_url: String,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for HttpUserDirectoryConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081".to_string(),
            timeout_ms: 3_000,
        }
    }
}

/// Reqwest-backed implementation of [`UserDirectory`].
pub struct HttpUserDirectory {
    client: Client,
    config: HttpUserDirectoryConfig,
}

impl HttpUserDirectory {
    /// Builds the client.
    ///
    /// # Errors
    /// Returns error if the underlying HTTP client cannot be constructed.
    pub fn new(config: HttpUserDirectoryConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .context("Failed to build user directory HTTP client")?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>> {
        let response = self
            .client
            .get(format!("{}/v1/users/{user_id}", self.config.base_url))
            .send()
            .await
            .context("User directory request failed")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            let status = response.status();
            return Err(anyhow!("User directory error {status}"));
        }

        let user = response
            .json::<UserRecord>()
            .await
            .context("Failed to parse user directory response")?;
        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_user_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/users/42")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "42", "active": true, "display_name": "Ada"}"#)
            .create_async()
            .await;

        let directory = HttpUserDirectory::new(HttpUserDirectoryConfig {
            base_url: server.url(),
            ..HttpUserDirectoryConfig::default()
        })
        .unwrap();

        let user = directory.get_user("42").await.unwrap().unwrap();
        assert_eq!(user.id, "42");
        assert!(user.active);
        assert_eq!(user.display_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_get_user_absent_maps_to_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/users/missing")
            .with_status(404)
            .create_async()
            .await;

        let directory = HttpUserDirectory::new(HttpUserDirectoryConfig {
            base_url: server.url(),
            ..HttpUserDirectoryConfig::default()
        })
        .unwrap();

        assert!(directory.get_user("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_user_server_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v1/users/42")
            .with_status(500)
            .create_async()
            .await;

        let directory = HttpUserDirectory::new(HttpUserDirectoryConfig {
            base_url: server.url(),
            ..HttpUserDirectoryConfig::default()
        })
        .unwrap();

        assert!(directory.get_user("42").await.is_err());
    }
}
