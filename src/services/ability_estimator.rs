//! Two-tier ability estimation.
//!
//! The fast tier runs inline on every response and keeps the turn under its
//! latency budget: a deterministic nudge derived from response latency and
//! length only, a coarse proxy for engagement. The precise tier arrives
//! asynchronously from the response analyzer; its result is authoritative and
//! overwrites the fast estimate for the next turn, never retroactively.

use crate::domain::models::{InterviewSession, ResponseRecord, THETA_MAX, THETA_MIN};
use crate::domain::ports::AnalysisResult;

/// Result of one fast-tier update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FastEstimate {
    /// Ability estimate after the update, clamped
    pub theta: f64,

    /// Standard error after decay, floored
    pub standard_error: f64,

    /// Signed nudge that was applied
    pub delta: f64,
}

/// Deterministic fast-tier estimator with precise-tier application.
///
/// Rule: a response under `fast_latency_ms` that exceeds `long_response_chars`
/// nudges theta up by `gain`; a response over `slow_latency_ms` or under
/// `short_response_chars` nudges it down by `gain`; anything else leaves it
/// unchanged. The standard error decays multiplicatively each turn,
/// reflecting accumulating confidence without claiming statistical precision.
#[derive(Debug, Clone)]
pub struct AbilityEstimator {
    gain: f64,
    se_decay: f64,
    fast_latency_ms: u64,
    slow_latency_ms: u64,
    long_response_chars: usize,
    short_response_chars: usize,
}

impl Default for AbilityEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl AbilityEstimator {
    /// Creates an estimator with the standard tuning.
    pub fn new() -> Self {
        Self {
            gain: 0.05,
            se_decay: 0.95,
            fast_latency_ms: 10_000,
            slow_latency_ms: 60_000,
            long_response_chars: 50,
            short_response_chars: 20,
        }
    }

    /// Computes the fast-tier estimate for a response without mutating the
    /// session.
    pub fn fast_estimate(&self, session: &InterviewSession, response: &ResponseRecord) -> FastEstimate {
        let length = response.payload.chars().count();

        let delta = if response.response_time_ms < self.fast_latency_ms
            && length > self.long_response_chars
        {
            self.gain
        } else if response.response_time_ms > self.slow_latency_ms
            || length < self.short_response_chars
        {
            -self.gain
        } else {
            0.0
        };

        FastEstimate {
            theta: (session.theta + delta).clamp(THETA_MIN, THETA_MAX),
            standard_error: (session.standard_error * self.se_decay)
                .max(crate::domain::models::MIN_STANDARD_ERROR),
            delta,
        }
    }

    /// Applies the fast-tier update to the session and returns it.
    pub fn apply_fast(
        &self,
        session: &mut InterviewSession,
        response: &ResponseRecord,
    ) -> FastEstimate {
        let estimate = self.fast_estimate(session, response);
        session.apply_estimate(estimate.theta, estimate.standard_error);
        estimate
    }

    /// Applies an authoritative precise-tier result to the session.
    ///
    /// The analyzer's theta and standard error replace the fast estimate for
    /// the next turn. Bias and early-stop flags are latched onto the session
    /// for the termination policy to observe.
    pub fn apply_precise(&self, session: &mut InterviewSession, result: &AnalysisResult) {
        session.apply_estimate(result.new_theta, result.new_standard_error);
        if result.bias_flag == Some(true) {
            session.bias_flagged = true;
        }
        if result.early_stop_recommended == Some(true) {
            session.early_stop_recommended = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{SessionConfig, MIN_STANDARD_ERROR};

    fn create_test_session() -> InterviewSession {
        InterviewSession::new(
            "sess_1".to_string(),
            "cand_1".to_string(),
            "intv_2".to_string(),
            "Backend Developer".to_string(),
            vec![],
            SessionConfig::default(),
        )
    }

    fn response(time_ms: u64, length: usize) -> ResponseRecord {
        ResponseRecord::new(
            "q1".to_string(),
            "x".repeat(length),
            "text".to_string(),
            time_ms,
        )
    }

    #[test]
    fn test_fast_long_response_nudges_up() {
        let estimator = AbilityEstimator::new();
        let mut session = create_test_session();

        // 8 seconds, 80 characters
        let estimate = estimator.apply_fast(&mut session, &response(8_000, 80));

        assert!((estimate.delta - 0.05).abs() < f64::EPSILON);
        assert!((session.theta - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn test_slow_response_nudges_down() {
        let estimator = AbilityEstimator::new();
        let mut session = create_test_session();

        let estimate = estimator.apply_fast(&mut session, &response(61_000, 80));

        assert!((estimate.delta + 0.05).abs() < f64::EPSILON);
        assert!((session.theta + 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn test_short_response_nudges_down() {
        let estimator = AbilityEstimator::new();
        let mut session = create_test_session();

        let estimate = estimator.apply_fast(&mut session, &response(8_000, 15));

        assert!((estimate.delta + 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn test_middling_response_leaves_theta_unchanged() {
        let estimator = AbilityEstimator::new();
        let mut session = create_test_session();
        session.theta = 0.7;

        // 30 seconds, 35 characters: neither rule fires
        let estimate = estimator.apply_fast(&mut session, &response(30_000, 35));

        assert!((estimate.delta).abs() < f64::EPSILON);
        assert!((session.theta - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_theta_clamped_at_upper_bound() {
        let estimator = AbilityEstimator::new();
        let mut session = create_test_session();
        session.theta = 2.99;

        estimator.apply_fast(&mut session, &response(5_000, 100));
        assert!((session.theta - 3.0).abs() < f64::EPSILON);

        // Further nudges stay at the bound
        estimator.apply_fast(&mut session, &response(5_000, 100));
        assert!((session.theta - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_theta_clamped_at_lower_bound() {
        let estimator = AbilityEstimator::new();
        let mut session = create_test_session();
        session.theta = -2.99;

        estimator.apply_fast(&mut session, &response(61_000, 5));
        assert!((session.theta + 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_standard_error_decays_and_floors() {
        let estimator = AbilityEstimator::new();
        let mut session = create_test_session();

        let mut previous = session.standard_error;
        for _ in 0..100 {
            let estimate = estimator.apply_fast(&mut session, &response(30_000, 35));
            assert!(estimate.standard_error <= previous);
            previous = estimate.standard_error;
        }
        assert!((session.standard_error - MIN_STANDARD_ERROR).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_precise_overwrites_estimate() {
        let estimator = AbilityEstimator::new();
        let mut session = create_test_session();
        session.theta = 0.3;
        session.standard_error = 0.8;

        let result = AnalysisResult {
            score: 0.9,
            theta_change: 0.4,
            new_theta: 0.7,
            new_standard_error: 0.5,
            bias_flag: None,
            early_stop_recommended: Some(true),
        };
        estimator.apply_precise(&mut session, &result);

        assert!((session.theta - 0.7).abs() < f64::EPSILON);
        assert!((session.standard_error - 0.5).abs() < f64::EPSILON);
        assert!(session.early_stop_recommended);
        assert!(!session.bias_flagged);
    }

    #[test]
    fn test_apply_precise_clamps_out_of_range_values() {
        let estimator = AbilityEstimator::new();
        let mut session = create_test_session();

        let result = AnalysisResult {
            score: 1.0,
            theta_change: 9.0,
            new_theta: 9.0,
            new_standard_error: 0.0,
            bias_flag: Some(true),
            early_stop_recommended: None,
        };
        estimator.apply_precise(&mut session, &result);

        assert!((session.theta - 3.0).abs() < f64::EPSILON);
        assert!((session.standard_error - MIN_STANDARD_ERROR).abs() < f64::EPSILON);
        assert!(session.bias_flagged);
    }
}
