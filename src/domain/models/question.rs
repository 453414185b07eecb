//! Question and response records.
//!
//! A `QuestionRecord` is created by the question selector and immutable once
//! presented. A `ResponseRecord` is created per candidate turn, never
//! mutated, and appended to the session history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Kind of question presented to the candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Conceptual technical question
    Technical,
    /// Hands-on coding exercise
    Coding,
    /// Behavioral / situational question
    Behavioral,
    /// Architecture and system design question
    SystemDesign,
    /// Generic follow-up prompt from the fallback pool
    FollowUp,
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Technical => write!(f, "technical"),
            Self::Coding => write!(f, "coding"),
            Self::Behavioral => write!(f, "behavioral"),
            Self::SystemDesign => write!(f, "system_design"),
            Self::FollowUp => write!(f, "follow_up"),
        }
    }
}

/// A question as presented to the candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Unique question identifier
    pub question_id: String,

    /// Question text shown to the candidate
    pub text: String,

    /// Question kind
    pub question_type: QuestionType,

    /// Item difficulty on the ability scale
    pub difficulty: f64,

    /// Topic category (e.g. "technical", "algorithms")
    pub category: String,

    /// When the question was presented
    pub presented_at: DateTime<Utc>,
}

impl QuestionRecord {
    /// Creates a record for a question presented now.
    pub fn new(
        question_id: String,
        text: String,
        question_type: QuestionType,
        difficulty: f64,
        category: String,
    ) -> Self {
        Self {
            question_id,
            text,
            question_type,
            difficulty,
            category,
            presented_at: Utc::now(),
        }
    }
}

/// A candidate's answer to one question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    /// Question this response answers
    pub question_id: String,

    /// Raw response payload (text or serialized submission)
    pub payload: String,

    /// Response kind as reported by the client (text|code|audio_ref)
    pub response_type: String,

    /// When the response was submitted
    pub submitted_at: DateTime<Utc>,

    /// Time from question presentation to submission
    pub response_time_ms: u64,

    /// Free-form metadata forwarded by the client
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl ResponseRecord {
    /// Creates a record for a response submitted now.
    pub fn new(
        question_id: String,
        payload: String,
        response_type: String,
        response_time_ms: u64,
    ) -> Self {
        Self {
            question_id,
            payload,
            response_type,
            submitted_at: Utc::now(),
            response_time_ms,
            metadata: HashMap::new(),
        }
    }

    /// Attaches client metadata to the record.
    pub fn with_metadata(mut self, metadata: HashMap<String, serde_json::Value>) -> Self {
        self.metadata = metadata;
        self
    }
}
