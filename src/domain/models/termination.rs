//! Termination decisions.
//!
//! The termination policy produces a fresh `TerminationDecision` every turn;
//! a stopping decision is recorded onto the session as its terminal state.

use serde::{Deserialize, Serialize};

/// Why an interview ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminationReason {
    /// Configured maximum question count reached
    MaxQuestions,
    /// Minimum question count met and standard error under threshold
    ConfidenceReached,
    /// Wall-clock ceiling reached
    TimeLimit,
    /// Precise-tier analysis recommended an early stop
    ExternalSignal,
    /// Explicit operator termination
    Manual,
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MaxQuestions => write!(f, "max-questions"),
            Self::ConfidenceReached => write!(f, "confidence-reached"),
            Self::TimeLimit => write!(f, "time-limit"),
            Self::ExternalSignal => write!(f, "external-signal"),
            Self::Manual => write!(f, "manual"),
        }
    }
}

/// Outcome of one termination-policy evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TerminationDecision {
    /// Whether the interview should end now
    pub should_stop: bool,

    /// Reason for stopping (`None` when continuing)
    pub reason: Option<TerminationReason>,
}

impl TerminationDecision {
    /// Decision to keep asking questions.
    pub const fn proceed() -> Self {
        Self {
            should_stop: false,
            reason: None,
        }
    }

    /// Decision to end the interview for the given reason.
    pub const fn stop(reason: TerminationReason) -> Self {
        Self {
            should_stop: true,
            reason: Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_proceed() {
        let decision = TerminationDecision::proceed();
        assert!(!decision.should_stop);
        assert!(decision.reason.is_none());
    }

    #[test]
    fn test_stop_carries_reason() {
        let decision = TerminationDecision::stop(TerminationReason::MaxQuestions);
        assert!(decision.should_stop);
        assert_eq!(decision.reason, Some(TerminationReason::MaxQuestions));
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(TerminationReason::MaxQuestions.to_string(), "max-questions");
        assert_eq!(
            TerminationReason::ConfidenceReached.to_string(),
            "confidence-reached"
        );
        assert_eq!(TerminationReason::ExternalSignal.to_string(), "external-signal");
    }

    #[test]
    fn test_reason_serde_kebab_case() {
        let serialized = serde_json::to_string(&TerminationReason::TimeLimit).unwrap();
        assert_eq!(serialized, "\"time-limit\"");
    }
}
