//! Structured boundary results.
//!
//! Every boundary operation returns one of these instead of letting an error
//! escape as a raw fault. Callers get a success flag, the session identifier,
//! and either a snapshot or a human-readable message.

use serde::{Deserialize, Serialize};

use super::question::QuestionRecord;
use super::session::InterviewSession;
use super::stage::Stage;
use super::termination::TerminationReason;

/// Result of a lifecycle operation (initialize, activate, terminate, complete).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOutcome {
    /// Whether the operation succeeded
    pub success: bool,

    /// Session the operation addressed
    pub session_id: String,

    /// Session snapshot at the time of the operation, when available
    pub snapshot: Option<InterviewSession>,

    /// Human-readable failure message (`None` on success)
    pub message: Option<String>,
}

impl SessionOutcome {
    /// Successful outcome carrying a snapshot.
    pub fn ok(session: InterviewSession) -> Self {
        Self {
            success: true,
            session_id: session.id.clone(),
            snapshot: Some(session),
            message: None,
        }
    }

    /// Successful outcome with no snapshot (idempotent no-ops).
    pub fn ok_empty(session_id: impl Into<String>) -> Self {
        Self {
            success: true,
            session_id: session_id.into(),
            snapshot: None,
            message: None,
        }
    }

    /// Failed outcome with a human-readable message.
    pub fn failure(session_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            session_id: session_id.into(),
            snapshot: None,
            message: Some(message.into()),
        }
    }
}

/// Result of processing one candidate response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TurnOutcome {
    /// Interview continues with the given question
    NextQuestion {
        /// Session the turn belongs to
        session_id: String,
        /// Question to present next
        question: QuestionRecord,
        /// Ability estimate after the fast-tier update
        theta: f64,
        /// Uncertainty after the fast-tier update
        standard_error: f64,
        /// Stage after any progression
        stage: Stage,
        /// Question index after accepting the response
        question_index: u32,
    },

    /// Interview ended this turn
    Completed {
        /// Session that ended
        session_id: String,
        /// Why the interview ended
        reason: TerminationReason,
        /// Final ability estimate
        final_theta: f64,
        /// Total questions answered
        questions_answered: u32,
    },

    /// Turn could not be processed
    Failed {
        /// Session the turn addressed
        session_id: String,
        /// Human-readable failure message
        message: String,
    },
}

impl TurnOutcome {
    /// Returns true unless the turn failed.
    pub fn is_success(&self) -> bool {
        !matches!(self, Self::Failed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_empty_has_no_snapshot() {
        let outcome = SessionOutcome::ok_empty("sess_1");
        assert!(outcome.success);
        assert!(outcome.snapshot.is_none());
        assert!(outcome.message.is_none());
    }

    #[test]
    fn test_failure_carries_message() {
        let outcome = SessionOutcome::failure("sess_1", "candidate not found");
        assert!(!outcome.success);
        assert_eq!(outcome.message.as_deref(), Some("candidate not found"));
    }

    #[test]
    fn test_turn_outcome_success_flag() {
        let failed = TurnOutcome::Failed {
            session_id: "sess_1".to_string(),
            message: "unknown session".to_string(),
        };
        assert!(!failed.is_success());

        let completed = TurnOutcome::Completed {
            session_id: "sess_1".to_string(),
            reason: TerminationReason::MaxQuestions,
            final_theta: 1.2,
            questions_answered: 20,
        };
        assert!(completed.is_success());
    }
}
