//! Domain errors for the interview orchestration engine.

use thiserror::Error;

/// Domain-level errors that can occur while orchestrating an interview.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Participant not found: {0}")]
    ParticipantNotFound(String),

    #[error("Participant is not active: {0}")]
    ParticipantInactive(String),

    #[error("Session not found: {0}")]
    SessionNotFound(String),

    #[error("Session already exists: {0}")]
    SessionAlreadyExists(String),

    #[error("Invalid state transition from {from} to {to}: {reason}")]
    InvalidStateTransition { from: String, to: String, reason: String },

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Session store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Question service unavailable: {0}")]
    QuestionServiceUnavailable(String),

    #[error("Question selection timed out after {0}ms")]
    QuestionSelectionTimeout(u64),

    #[error("Response analyzer unavailable: {0}")]
    AnalyzerUnavailable(String),

    #[error("Broadcast failed: {0}")]
    BroadcastFailed(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

impl From<sqlx::Error> for EngineError {
    fn from(err: sqlx::Error) -> Self {
        EngineError::StoreUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::SerializationError(err.to_string())
    }
}
