/// Broadcast gateway port (trait) for dependency injection.
///
/// Push messages are fire-and-forget: the pipeline dispatches them after the
/// response has already returned to the caller, and delivery failures never
/// affect the turn.
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::models::{QuestionRecord, TerminationReason};

/// Client instruction accompanying an immediate next question.
pub const CONTINUE_IMMEDIATELY: &str = "CONTINUE_IMMEDIATELY";

/// Tagged payload pushed to interview clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BroadcastMessage {
    /// Next question, to be presented without waiting
    NextQuestionImmediate {
        /// Session the question belongs to
        session_id: String,
        /// Question to present
        question: QuestionRecord,
        /// Client pacing instruction
        instruction: String,
    },

    /// Interview completed through the termination policy
    SessionCompleted {
        /// Session that ended
        session_id: String,
        /// Why it ended
        reason: TerminationReason,
    },

    /// Interview terminated by an operator
    SessionTerminated {
        /// Session that ended
        session_id: String,
        /// Why it ended
        reason: TerminationReason,
    },
}

impl BroadcastMessage {
    /// Builds the immediate next-question message with the standard pacing
    /// instruction.
    pub fn next_question(session_id: impl Into<String>, question: QuestionRecord) -> Self {
        Self::NextQuestionImmediate {
            session_id: session_id.into(),
            question,
            instruction: CONTINUE_IMMEDIATELY.to_string(),
        }
    }
}

/// Fire-and-forget push channel toward interview clients.
#[async_trait]
pub trait BroadcastGateway: Send + Sync {
    /// Pushes a message for the given session.
    ///
    /// # Errors
    /// Returns error if the gateway cannot accept the message. Callers treat
    /// this as log-only.
    async fn push(&self, session_id: &str, message: BroadcastMessage) -> Result<()>;
}
