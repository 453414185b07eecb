//! In-memory session registry.
//!
//! The registry is the single shared mutable structure in the engine and the
//! source of truth for "is this session active". Entries hold the session
//! behind a per-entry mutex so that all steps of one turn observe a
//! consistent state even when termination races a turn in flight. Removal
//! from the registry is what makes a session inactive; background work
//! re-checks membership before touching anything attributable to a session.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::models::InterviewSession;

/// Shared handle to one live session.
pub type SessionHandle = Arc<Mutex<InterviewSession>>;

/// Concurrent mapping from session identifier to live execution context.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts a session if its identifier is not already present.
    ///
    /// # Errors
    /// Returns `SessionAlreadyExists` if the identifier is taken.
    pub async fn insert(&self, session: InterviewSession) -> EngineResult<SessionHandle> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            return Err(EngineError::SessionAlreadyExists(session.id));
        }
        let id = session.id.clone();
        let handle = Arc::new(Mutex::new(session));
        sessions.insert(id, Arc::clone(&handle));
        Ok(handle)
    }

    /// Looks up a live session handle.
    pub async fn get(&self, session_id: &str) -> Option<SessionHandle> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned()
    }

    /// Removes a session, returning its handle if it was present.
    ///
    /// Callers mark the session terminal only after removal so that from the
    /// outside the two appear atomic: a session visible in the registry is
    /// never terminal.
    pub async fn remove(&self, session_id: &str) -> Option<SessionHandle> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(session_id)
    }

    /// Returns true if the session is live.
    pub async fn contains(&self, session_id: &str) -> bool {
        let sessions = self.sessions.read().await;
        sessions.contains_key(session_id)
    }

    /// Clones the current state of a live session.
    pub async fn snapshot(&self, session_id: &str) -> Option<InterviewSession> {
        let handle = self.get(session_id).await?;
        let session = handle.lock().await;
        Some(session.clone())
    }

    /// Identifiers of all live sessions.
    pub async fn list_active(&self) -> Vec<String> {
        let sessions = self.sessions.read().await;
        sessions.keys().cloned().collect()
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }

    /// Returns true if no session is live.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::SessionConfig;

    fn create_test_session(id: &str) -> InterviewSession {
        InterviewSession::new(
            id.to_string(),
            "cand_1".to_string(),
            "intv_2".to_string(),
            "Backend Developer".to_string(),
            vec![],
            SessionConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let registry = SessionRegistry::new();
        registry.insert(create_test_session("s1")).await.unwrap();

        assert!(registry.contains("s1").await);
        assert!(registry.get("s1").await.is_some());
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_insert_duplicate_fails() {
        let registry = SessionRegistry::new();
        registry.insert(create_test_session("s1")).await.unwrap();

        let result = registry.insert(create_test_session("s1")).await;
        assert!(matches!(result, Err(EngineError::SessionAlreadyExists(_))));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove_returns_handle_once() {
        let registry = SessionRegistry::new();
        registry.insert(create_test_session("s1")).await.unwrap();

        assert!(registry.remove("s1").await.is_some());
        assert!(registry.remove("s1").await.is_none());
        assert!(!registry.contains("s1").await);
    }

    #[tokio::test]
    async fn test_snapshot_clones_current_state() {
        let registry = SessionRegistry::new();
        let handle = registry.insert(create_test_session("s1")).await.unwrap();

        {
            let mut session = handle.lock().await;
            session.theta = 1.5;
        }

        let snapshot = registry.snapshot("s1").await.unwrap();
        assert!((snapshot.theta - 1.5).abs() < f64::EPSILON);

        // Mutating the snapshot does not affect the live session
        let live = registry.snapshot("s1").await.unwrap();
        assert!((live.theta - 1.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_list_active() {
        let registry = SessionRegistry::new();
        registry.insert(create_test_session("s1")).await.unwrap();
        registry.insert(create_test_session("s2")).await.unwrap();

        let mut ids = registry.list_active().await;
        ids.sort();
        assert_eq!(ids, vec!["s1".to_string(), "s2".to_string()]);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_are_isolated() {
        let registry = Arc::new(SessionRegistry::new());

        let mut handles = Vec::new();
        for i in 0..16 {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                registry
                    .insert(create_test_session(&format!("s{i}")))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(registry.len().await, 16);
    }
}
