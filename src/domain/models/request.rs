//! Boundary request payloads.
//!
//! Typed records for the operations callers invoke on the engine. Recognized
//! fields are explicit; anything else rides in the open option maps.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::config::SessionConfig;

/// Request to initialize a new interview session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InitializeRequest {
    /// Candidate to interview
    pub candidate_id: String,

    /// Interviewer conducting the session
    pub interviewer_id: String,

    /// Job role the interview targets
    pub job_role: String,

    /// Skills required by the role
    #[serde(default)]
    pub skills: Vec<String>,

    /// Session tunables; engine defaults fill anything omitted
    #[serde(default)]
    pub config: Option<SessionConfig>,
}

/// One candidate response submitted for processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseSubmission {
    /// Question being answered; defaults to the session's current question
    #[serde(default)]
    pub question_id: Option<String>,

    /// Raw response payload
    pub payload: String,

    /// Response kind as reported by the client (text|code|audio_ref)
    #[serde(default = "default_response_type")]
    pub response_type: String,

    /// Time from question presentation to submission, in milliseconds
    pub response_time_ms: u64,

    /// Free-form metadata forwarded by the client
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

fn default_response_type() -> String {
    "text".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_request_deserializes_minimal_payload() {
        let json = r#"{
            "candidate_id": "1",
            "interviewer_id": "2",
            "job_role": "Backend Developer"
        }"#;
        let request: InitializeRequest = serde_json::from_str(json).unwrap();
        assert!(request.skills.is_empty());
        assert!(request.config.is_none());
    }

    #[test]
    fn test_response_submission_defaults_type_to_text() {
        let json = r#"{"payload": "an answer", "response_time_ms": 4000}"#;
        let submission: ResponseSubmission = serde_json::from_str(json).unwrap();
        assert_eq!(submission.response_type, "text");
        assert!(submission.question_id.is_none());
    }
}
