/// Response analyzer port (trait) for dependency injection.
///
/// The precise ability tier delegates to this service on the non-latency
/// critical path. Failures degrade to log-only; the inline fast tier keeps
/// the turn moving.
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Full response payload submitted for precise analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Session the response belongs to
    pub session_id: String,

    /// Question the response answers
    pub question_id: String,

    /// Raw response text
    pub response_text: String,

    /// Response kind as reported by the client
    pub response_type: String,

    /// Time from presentation to submission, in milliseconds
    pub response_time_ms: u64,
}

/// Authoritative ability re-estimate from the analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Scored quality of the response
    pub score: f64,

    /// Signed change applied to theta
    pub theta_change: f64,

    /// New ability estimate
    pub new_theta: f64,

    /// New uncertainty of the estimate
    pub new_standard_error: f64,

    /// Set when the analyzer flags potential item bias
    #[serde(default)]
    pub bias_flag: Option<bool>,

    /// Set when the analyzer recommends ending the interview early
    #[serde(default)]
    pub early_stop_recommended: Option<bool>,
}

/// Interface over the external response analysis service.
#[async_trait]
pub trait ResponseAnalyzer: Send + Sync {
    /// Analyzes a response and re-estimates ability.
    ///
    /// # Errors
    /// Returns error if the analyzer is unreachable or answers malformed
    /// data.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult>;
}
