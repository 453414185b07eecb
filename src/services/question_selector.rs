//! Next-question selection.
//!
//! The primary path asks the external adaptive question service for a
//! difficulty-matched item inside a hard time budget. The fallback path draws
//! from a fixed rotating pool of generic follow-up prompts and never fails.
//! Past a small index threshold the selector prefers the fallback outright:
//! later-stage transitions tolerate a less perfectly calibrated item, and
//! skipping the network hop keeps the turn well inside its budget.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::models::{InterviewSession, QuestionRecord, QuestionType};
use crate::domain::ports::{NextQuestionRequest, QuestionService};

/// Generic follow-up prompts used when the adaptive service is skipped or
/// unavailable. Indexed by `question_index % len`.
const FALLBACK_POOL: [&str; 8] = [
    "Walk me through how you would debug a production incident you have never seen before.",
    "Describe a trade-off you made recently between code quality and delivery speed.",
    "How would you explain your last project's architecture to a new team member?",
    "Tell me about a time a design decision you made turned out to be wrong.",
    "What would you change about the codebase you know best, and why?",
    "Describe how you approach reviewing a large pull request.",
    "How do you decide when a piece of logic deserves its own abstraction?",
    "Walk me through how you profile and fix a performance regression.",
];

/// Difficulty assigned to every fallback item.
const FALLBACK_DIFFICULTY: f64 = 2.0;

/// Chooses the next question from the adaptive service or the local pool.
pub struct QuestionSelector {
    service: Arc<dyn QuestionService>,
    budget: Duration,
    fallback_after_index: u32,
}

impl QuestionSelector {
    /// Creates a selector over the given service.
    ///
    /// # Arguments
    /// - `service`: adaptive question service (injected dependency)
    /// - `budget_ms`: per-call budget for the primary path, in milliseconds
    /// - `fallback_after_index`: question index past which the pool is
    ///   preferred without calling the service
    pub fn new(service: Arc<dyn QuestionService>, budget_ms: u64, fallback_after_index: u32) -> Self {
        Self {
            service,
            budget: Duration::from_millis(budget_ms),
            fallback_after_index,
        }
    }

    /// Selects the next question for a turn. Never fails: any primary-path
    /// error or timeout falls through to the pool.
    pub async fn select_next(&self, session: &InterviewSession) -> QuestionRecord {
        if session.question_index > self.fallback_after_index {
            debug!(
                session_id = %session.id,
                question_index = session.question_index,
                "past adaptive threshold, drawing from fallback pool"
            );
            return Self::fallback(session.question_index);
        }

        match self.try_primary(session).await {
            Ok(question) => question,
            Err(err) => {
                warn!(
                    session_id = %session.id,
                    error = %err,
                    "adaptive question service unavailable, falling back"
                );
                Self::fallback(session.question_index)
            }
        }
    }

    /// Selects the first question of an interview from the primary path only.
    ///
    /// Activation has no presented question to follow up on, so the fallback
    /// pool is not a meaningful substitute; a failure here fails activation.
    ///
    /// # Errors
    /// Returns error if the service fails or exceeds the budget.
    pub async fn select_initial(&self, session: &InterviewSession) -> EngineResult<QuestionRecord> {
        self.try_primary(session).await
    }

    async fn try_primary(&self, session: &InterviewSession) -> EngineResult<QuestionRecord> {
        let descriptor = session.stage.descriptor();
        let request = NextQuestionRequest {
            session_id: session.id.clone(),
            theta: session.theta,
            standard_error: session.standard_error,
            question_index: session.question_index,
            job_role: session.job_role.clone(),
            skills: session.skills.clone(),
            min_difficulty: descriptor.min_difficulty,
            max_difficulty: descriptor.max_difficulty,
            question_type_hint: Some(descriptor.default_question_type),
            timeout_budget_ms: self.budget.as_millis() as u64,
        };

        let next = tokio::time::timeout(self.budget, self.service.next_question(&request))
            .await
            .map_err(|_| EngineError::QuestionSelectionTimeout(self.budget.as_millis() as u64))?
            .map_err(|err| EngineError::QuestionServiceUnavailable(err.to_string()))?;

        Ok(QuestionRecord::new(
            next.question_id,
            next.text,
            next.question_type,
            next.difficulty,
            next.category,
        ))
    }

    /// Draws the pool item for an index. The synthetic identifier embeds the
    /// index and current time so repeated draws stay unique.
    fn fallback(question_index: u32) -> QuestionRecord {
        let slot = question_index as usize % FALLBACK_POOL.len();
        let question_id = format!(
            "fallback_{}_{}",
            question_index,
            chrono::Utc::now().timestamp_millis()
        );

        QuestionRecord::new(
            question_id,
            FALLBACK_POOL[slot].to_string(),
            QuestionType::FollowUp,
            FALLBACK_DIFFICULTY,
            "technical".to_string(),
        )
    }
}
