//! Turn-by-turn termination evaluation.
//!
//! Evaluated after every accepted response, in fixed precedence: external
//! early-stop signal, question-count ceiling, confidence threshold, then
//! wall-clock limit. Manual termination bypasses this policy entirely and is
//! handled by the lifecycle manager.

use crate::domain::models::{InterviewSession, TerminationDecision, TerminationReason};

/// Ordered rule set deciding whether to ask another question.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminationPolicy;

impl TerminationPolicy {
    /// Creates the policy.
    pub fn new() -> Self {
        Self
    }

    /// Evaluates the policy against the session's current state.
    ///
    /// Precedence:
    /// 1. external early-stop recommendation
    /// 2. `question_index >= max_questions`
    /// 3. `question_index >= min_questions` and
    ///    `standard_error <= confidence_threshold`
    /// 4. elapsed time >= `time_limit_minutes`
    pub fn evaluate(&self, session: &InterviewSession) -> TerminationDecision {
        if session.early_stop_recommended {
            return TerminationDecision::stop(TerminationReason::ExternalSignal);
        }

        if session.question_index >= session.config.max_questions {
            return TerminationDecision::stop(TerminationReason::MaxQuestions);
        }

        if session.question_index >= session.config.min_questions
            && session.standard_error <= session.config.confidence_threshold
        {
            return TerminationDecision::stop(TerminationReason::ConfidenceReached);
        }

        if session.elapsed_minutes() >= session.config.time_limit_minutes {
            return TerminationDecision::stop(TerminationReason::TimeLimit);
        }

        TerminationDecision::proceed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::SessionConfig;
    use chrono::{Duration, Utc};

    fn create_test_session() -> InterviewSession {
        let mut session = InterviewSession::new(
            "sess_1".to_string(),
            "cand_1".to_string(),
            "intv_2".to_string(),
            "Backend Developer".to_string(),
            vec![],
            SessionConfig::default(),
        );
        session.mark_started();
        session
    }

    #[test]
    fn test_continues_on_fresh_session() {
        let policy = TerminationPolicy::new();
        let session = create_test_session();

        let decision = policy.evaluate(&session);
        assert!(!decision.should_stop);
    }

    #[test]
    fn test_max_questions_stops() {
        let policy = TerminationPolicy::new();
        let mut session = create_test_session();
        session.question_index = 20;

        let decision = policy.evaluate(&session);
        assert!(decision.should_stop);
        assert_eq!(decision.reason, Some(TerminationReason::MaxQuestions));
    }

    #[test]
    fn test_max_questions_wins_regardless_of_standard_error() {
        let policy = TerminationPolicy::new();
        let mut session = create_test_session();
        session.question_index = 20;
        session.standard_error = 0.9;

        let decision = policy.evaluate(&session);
        assert_eq!(decision.reason, Some(TerminationReason::MaxQuestions));
    }

    #[test]
    fn test_confidence_reached_stops() {
        let policy = TerminationPolicy::new();
        let mut session = create_test_session();
        session.question_index = 7;
        session.standard_error = 0.25;

        let decision = policy.evaluate(&session);
        assert!(decision.should_stop);
        assert_eq!(decision.reason, Some(TerminationReason::ConfidenceReached));
    }

    #[test]
    fn test_confidence_requires_minimum_questions() {
        let policy = TerminationPolicy::new();
        let mut session = create_test_session();
        session.question_index = 3;
        session.standard_error = 0.25;

        let decision = policy.evaluate(&session);
        assert!(!decision.should_stop);
    }

    #[test]
    fn test_external_signal_takes_precedence() {
        let policy = TerminationPolicy::new();
        let mut session = create_test_session();
        session.question_index = 20;
        session.early_stop_recommended = true;

        let decision = policy.evaluate(&session);
        assert_eq!(decision.reason, Some(TerminationReason::ExternalSignal));
    }

    #[test]
    fn test_time_limit_stops() {
        let policy = TerminationPolicy::new();
        let mut session = create_test_session();
        session.started_at = Some(Utc::now() - Duration::minutes(46));

        let decision = policy.evaluate(&session);
        assert!(decision.should_stop);
        assert_eq!(decision.reason, Some(TerminationReason::TimeLimit));
    }

    #[test]
    fn test_time_limit_not_reached() {
        let policy = TerminationPolicy::new();
        let mut session = create_test_session();
        session.started_at = Some(Utc::now() - Duration::minutes(10));

        let decision = policy.evaluate(&session);
        assert!(!decision.should_stop);
    }

    #[test]
    fn test_custom_bounds_from_config() {
        let policy = TerminationPolicy::new();
        let mut session = create_test_session();
        session.config.min_questions = 10;
        session.config.max_questions = 30;
        session.question_index = 25;
        session.standard_error = 0.25;

        // Above min with tight error: confidence, not max
        let decision = policy.evaluate(&session);
        assert_eq!(decision.reason, Some(TerminationReason::ConfidenceReached));

        session.question_index = 30;
        let decision = policy.evaluate(&session);
        assert_eq!(decision.reason, Some(TerminationReason::MaxQuestions));
    }
}
