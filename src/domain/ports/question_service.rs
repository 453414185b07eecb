/// Adaptive question service port (trait) for dependency injection.
///
/// The selector sends the full adaptive context (estimate, stage band, role)
/// and receives the next difficulty-matched item. Implementations must
/// enforce the request's timeout budget themselves; callers treat a timeout
/// identically to a service error.
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::models::QuestionType;

/// Adaptive context for one next-question request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextQuestionRequest {
    /// Session the question is for
    pub session_id: String,

    /// Current ability estimate
    pub theta: f64,

    /// Current uncertainty of the estimate
    pub standard_error: f64,

    /// Questions answered so far
    pub question_index: u32,

    /// Job role the interview targets
    pub job_role: String,

    /// Skills required by the role
    pub skills: Vec<String>,

    /// Lower difficulty bound from the current stage
    pub min_difficulty: f64,

    /// Upper difficulty bound from the current stage
    pub max_difficulty: f64,

    /// Preferred question type for the current stage
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_type_hint: Option<QuestionType>,

    /// Budget the service must answer within, in milliseconds
    pub timeout_budget_ms: u64,
}

/// Question returned by the adaptive service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextQuestion {
    /// Unique question identifier
    pub question_id: String,

    /// Question text
    pub text: String,

    /// Question kind
    #[serde(rename = "type")]
    pub question_type: QuestionType,

    /// Item difficulty on the ability scale
    pub difficulty: f64,

    /// Topic category
    pub category: String,
}

/// Interface over the external adaptive question service.
#[async_trait]
pub trait QuestionService: Send + Sync {
    /// Requests the next difficulty-matched question.
    ///
    /// # Errors
    /// Returns error if the service is unreachable, answers malformed data,
    /// or exceeds the request's timeout budget.
    async fn next_question(&self, request: &NextQuestionRequest) -> Result<NextQuestion>;
}
