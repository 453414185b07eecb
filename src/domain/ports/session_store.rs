/// Session store port (trait) for dependency injection.
///
/// The store is a durable mirror of session state, keyed by session
/// identifier, written last-write-wins. The in-memory registry stays
/// authoritative for the engine's own decisions during a session's lifetime;
/// no read-modify-write contract is assumed here.
use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::InterviewSession;

/// Key-value mirror of full session records.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Writes the full session record, replacing any previous value.
    ///
    /// # Errors
    /// Returns error if the write cannot be durably applied. Initialization
    /// treats this as fatal; mid-session mirroring logs and continues.
    async fn put(&self, session: &InterviewSession) -> Result<()>;
}
