//! Property tests over the engine's state invariants.

use proptest::prelude::*;

use socratic::domain::models::{
    InterviewSession, ResponseRecord, SessionConfig, Stage, MIN_STANDARD_ERROR, THETA_MAX,
    THETA_MIN,
};
use socratic::services::{AbilityEstimator, TerminationPolicy};

fn test_session() -> InterviewSession {
    InterviewSession::new(
        "prop_session".to_string(),
        "cand".to_string(),
        "intv".to_string(),
        "Backend Developer".to_string(),
        vec![],
        SessionConfig::default(),
    )
}

fn response(time_ms: u64, length: usize) -> ResponseRecord {
    ResponseRecord::new(
        "q".to_string(),
        "z".repeat(length),
        "text".to_string(),
        time_ms,
    )
}

proptest! {
    /// Property: theta stays within its bounds after any number of
    /// fast-tier updates with arbitrary latencies and lengths.
    #[test]
    fn prop_theta_stays_bounded(
        turns in proptest::collection::vec((0u64..200_000, 0usize..500), 1..120)
    ) {
        let estimator = AbilityEstimator::new();
        let mut session = test_session();

        for (time_ms, length) in turns {
            estimator.apply_fast(&mut session, &response(time_ms, length));
            prop_assert!(session.theta >= THETA_MIN);
            prop_assert!(session.theta <= THETA_MAX);
        }
    }

    /// Property: standard error is non-increasing across consecutive
    /// fast-tier updates and never drops below its floor.
    #[test]
    fn prop_standard_error_monotone_with_floor(
        turns in proptest::collection::vec((0u64..200_000, 0usize..500), 1..120)
    ) {
        let estimator = AbilityEstimator::new();
        let mut session = test_session();
        let mut previous = session.standard_error;

        for (time_ms, length) in turns {
            estimator.apply_fast(&mut session, &response(time_ms, length));
            prop_assert!(session.standard_error <= previous);
            prop_assert!(session.standard_error >= MIN_STANDARD_ERROR);
            previous = session.standard_error;
        }
    }

    /// Property: question index advances by exactly one per accepted
    /// response, and stage assignment never regresses.
    #[test]
    fn prop_index_and_stage_monotonic(turn_count in 1u32..60) {
        let mut session = test_session();
        let mut last_stage = Stage::first();

        for expected_index in 1..=turn_count {
            session.accept_response(response(5_000, 40));
            session.advance_stage();

            prop_assert_eq!(session.question_index, expected_index);
            prop_assert!(session.stage >= last_stage);
            last_stage = session.stage;
        }
    }

    /// Property: with the question count at or past the configured maximum,
    /// the policy always stops with the max-questions reason, whatever the
    /// standard error.
    #[test]
    fn prop_max_questions_dominates(
        index in 20u32..100,
        standard_error in 0.1f64..1.0
    ) {
        let policy = TerminationPolicy::new();
        let mut session = test_session();
        session.mark_started();
        session.question_index = index;
        session.standard_error = standard_error;

        let decision = policy.evaluate(&session);
        prop_assert!(decision.should_stop);
        prop_assert_eq!(
            decision.reason,
            Some(socratic::domain::models::TerminationReason::MaxQuestions)
        );
    }

    /// Property: below the minimum question count the confidence rule never
    /// fires, however small the standard error.
    #[test]
    fn prop_confidence_needs_minimum(
        index in 0u32..5,
        standard_error in 0.1f64..0.29
    ) {
        let policy = TerminationPolicy::new();
        let mut session = test_session();
        session.mark_started();
        session.question_index = index;
        session.standard_error = standard_error;

        let decision = policy.evaluate(&session);
        prop_assert!(!decision.should_stop);
    }
}
