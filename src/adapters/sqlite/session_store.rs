//! SQLite implementation of the session store mirror.
//!
//! One row per session, keyed by identifier, holding the full serialized
//! record. Writes are `INSERT OR REPLACE`: last write wins, matching the
//! store's contract. Transient write failures retry with exponential backoff
//! before surfacing; the caller decides whether the failure is fatal
//! (initialization) or log-only (mid-session mirroring).

use anyhow::{Context, Result};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use sqlx::SqlitePool;
use std::time::Duration;

use crate::domain::models::{InterviewSession, RetryConfig};
use crate::domain::ports::SessionStore;

/// SQLite-backed [`SessionStore`].
#[derive(Clone)]
pub struct SqliteSessionStore {
    pool: SqlitePool,
    retry: RetryConfig,
}

impl SqliteSessionStore {
    /// Wraps an open pool. Call [`Self::migrate`] before first use.
    pub fn new(pool: SqlitePool, retry: RetryConfig) -> Self {
        Self { pool, retry }
    }

    /// Ensures the mirror schema exists.
    ///
    /// # Errors
    /// Returns error if the DDL cannot be applied.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r"CREATE TABLE IF NOT EXISTS sessions (
                session_id TEXT PRIMARY KEY,
                status TEXT NOT NULL,
                state TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create sessions table")?;
        Ok(())
    }

    /// Reads back a mirrored record. Used by the CLI and tests; the engine
    /// itself never reads the mirror while a session is live.
    pub async fn fetch(&self, session_id: &str) -> Result<Option<InterviewSession>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT state FROM sessions WHERE session_id = ?")
                .bind(session_id)
                .fetch_optional(&self.pool)
                .await
                .context("Failed to read session mirror")?;

        match row {
            Some((state,)) => {
                let session = serde_json::from_str(&state)
                    .context("Failed to deserialize mirrored session")?;
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    async fn write_once(
        &self,
        session_id: &str,
        status: &str,
        state: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            r"INSERT OR REPLACE INTO sessions (session_id, status, state, updated_at)
              VALUES (?, ?, ?, ?)",
        )
        .bind(session_id)
        .bind(status)
        .bind(state)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn put(&self, session: &InterviewSession) -> Result<()> {
        // Serialization failures will not heal on retry; only the write loops
        let state =
            serde_json::to_string(session).context("Failed to serialize session state")?;
        let status = session.status.to_string();

        let backoff = ExponentialBackoffBuilder::new()
            .with_initial_interval(Duration::from_millis(self.retry.initial_backoff_ms))
            .with_max_interval(Duration::from_millis(self.retry.max_backoff_ms))
            .with_max_elapsed_time(Some(Duration::from_millis(
                self.retry.max_backoff_ms * u64::from(self.retry.max_retries),
            )))
            .build();

        backoff::future::retry(backoff, || async {
            self.write_once(&session.id, &status, &state)
                .await
                .map_err(backoff::Error::transient)
        })
        .await
        .context("Failed to mirror session state")?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sqlite::connection::create_test_pool;
    use crate::domain::models::{SessionConfig, SessionStatus, TerminationReason};

    async fn create_test_store() -> SqliteSessionStore {
        let pool = create_test_pool().await.unwrap();
        let store = SqliteSessionStore::new(pool, RetryConfig::default());
        store.migrate().await.unwrap();
        store
    }

    fn create_test_session(id: &str) -> InterviewSession {
        InterviewSession::new(
            id.to_string(),
            "cand_1".to_string(),
            "intv_2".to_string(),
            "Backend Developer".to_string(),
            vec!["rust".to_string()],
            SessionConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_put_and_fetch_round_trip() {
        let store = create_test_store().await;
        let session = create_test_session("s1");

        store.put(&session).await.unwrap();

        let fetched = store.fetch("s1").await.unwrap().unwrap();
        assert_eq!(fetched.id, "s1");
        assert_eq!(fetched.candidate_id, "cand_1");
        assert_eq!(fetched.status, SessionStatus::Initialized);
    }

    #[tokio::test]
    async fn test_put_replaces_previous_record() {
        let store = create_test_store().await;
        let mut session = create_test_session("s1");

        store.put(&session).await.unwrap();

        session.mark_started();
        session.theta = 1.1;
        store.put(&session).await.unwrap();

        let fetched = store.fetch("s1").await.unwrap().unwrap();
        assert_eq!(fetched.status, SessionStatus::InProgress);
        assert!((fetched.theta - 1.1).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_terminal_record_preserves_reason() {
        let store = create_test_store().await;
        let mut session = create_test_session("s1");
        session.mark_terminated(TerminationReason::Manual);

        store.put(&session).await.unwrap();

        let fetched = store.fetch("s1").await.unwrap().unwrap();
        assert_eq!(fetched.termination_reason, Some(TerminationReason::Manual));
        assert!(fetched.terminated_at.is_some());
    }

    #[tokio::test]
    async fn test_fetch_absent_session() {
        let store = create_test_store().await;
        assert!(store.fetch("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_migrate_is_idempotent() {
        let store = create_test_store().await;
        store.migrate().await.unwrap();
        store.migrate().await.unwrap();
    }
}
