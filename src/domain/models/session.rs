/// Domain models for interview sessions.
///
/// An `InterviewSession` is the in-memory execution context for one interview
/// attempt. It is owned exclusively by the orchestration engine for its
/// active lifetime; the external session store only mirrors it.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::config::SessionConfig;
use super::question::{QuestionRecord, ResponseRecord};
use super::stage::{Stage, StageTiming};
use super::termination::TerminationReason;

/// Lower bound of the ability scale.
pub const THETA_MIN: f64 = -3.0;

/// Upper bound of the ability scale.
pub const THETA_MAX: f64 = 3.0;

/// Floor for the standard error of the ability estimate.
pub const MIN_STANDARD_ERROR: f64 = 0.1;

/// Session lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    /// Session created but no question presented yet
    Initialized,
    /// Interview running, questions being exchanged
    InProgress,
    /// Interview finished through the termination policy
    Completed,
    /// Interview ended by an operator or error path
    Terminated,
}

impl SessionStatus {
    /// Returns true for statuses that end the session.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Terminated)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Initialized => write!(f, "initialized"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
            Self::Terminated => write!(f, "terminated"),
        }
    }
}

/// In-memory execution context for one interview attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSession {
    /// Opaque session identifier
    pub id: String,

    /// Candidate being interviewed
    pub candidate_id: String,

    /// Interviewer conducting the session
    pub interviewer_id: String,

    /// Job role the interview targets
    pub job_role: String,

    /// Skills required by the role
    pub skills: Vec<String>,

    /// Per-session tunables
    pub config: SessionConfig,

    /// Current lifecycle status
    pub status: SessionStatus,

    /// Current interview stage
    pub stage: Stage,

    /// Timing records per visited stage, in order of entry
    pub stage_timings: Vec<StageTiming>,

    /// Current ability estimate, bounded to [`THETA_MIN`], [`THETA_MAX`]
    pub theta: f64,

    /// Uncertainty of the estimate, never below [`MIN_STANDARD_ERROR`]
    pub standard_error: f64,

    /// Number of accepted responses; increases by exactly 1 per turn
    pub question_index: u32,

    /// Question currently awaiting a response
    pub current_question: Option<QuestionRecord>,

    /// Every question presented, in order
    pub questions: Vec<QuestionRecord>,

    /// Every accepted response, in order
    pub history: Vec<ResponseRecord>,

    /// Session creation timestamp
    pub initialized_at: DateTime<Utc>,

    /// When the first question was requested
    pub started_at: Option<DateTime<Utc>>,

    /// When the interview completed through the policy
    pub completed_at: Option<DateTime<Utc>>,

    /// When the interview was terminated by an operator
    pub terminated_at: Option<DateTime<Utc>>,

    /// Why the session ended (`None` while live)
    pub termination_reason: Option<TerminationReason>,

    /// Set when precise-tier analysis recommended an early stop
    #[serde(default)]
    pub early_stop_recommended: bool,

    /// Set when precise-tier analysis flagged potential item bias
    #[serde(default)]
    pub bias_flagged: bool,

    /// Aggregates maintained by background performance tracking
    #[serde(default)]
    pub performance: PerformanceStats,
}

/// Per-session aggregates fed by the precise-tier analysis path.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PerformanceStats {
    /// Responses that completed precise analysis
    pub responses_analyzed: u32,

    /// Mean analyzer score across analyzed responses
    pub mean_score: f64,

    /// Mean response latency across analyzed responses, in milliseconds
    pub mean_response_time_ms: f64,
}

impl PerformanceStats {
    /// Folds one analyzed response into the running means.
    pub fn record(&mut self, score: f64, response_time_ms: u64) {
        let n = f64::from(self.responses_analyzed);
        self.mean_score = (self.mean_score * n + score) / (n + 1.0);
        self.mean_response_time_ms =
            (self.mean_response_time_ms * n + response_time_ms as f64) / (n + 1.0);
        self.responses_analyzed += 1;
    }
}

impl InterviewSession {
    /// Creates a session in its initial state: first stage, theta 0.0,
    /// standard error 1.0, question index 0.
    pub fn new(
        id: String,
        candidate_id: String,
        interviewer_id: String,
        job_role: String,
        skills: Vec<String>,
        config: SessionConfig,
    ) -> Self {
        let stage = Stage::first();
        Self {
            id,
            candidate_id,
            interviewer_id,
            job_role,
            skills,
            config,
            status: SessionStatus::Initialized,
            stage,
            stage_timings: vec![StageTiming::begin(stage)],
            theta: 0.0,
            standard_error: 1.0,
            question_index: 0,
            current_question: None,
            questions: Vec::new(),
            history: Vec::new(),
            initialized_at: Utc::now(),
            started_at: None,
            completed_at: None,
            terminated_at: None,
            termination_reason: None,
            early_stop_recommended: false,
            bias_flagged: false,
            performance: PerformanceStats::default(),
        }
    }

    /// Creates a session with a freshly allocated UUID identifier.
    pub fn new_with_uuid(
        candidate_id: String,
        interviewer_id: String,
        job_role: String,
        skills: Vec<String>,
        config: SessionConfig,
    ) -> Self {
        Self::new(
            Uuid::new_v4().to_string(),
            candidate_id,
            interviewer_id,
            job_role,
            skills,
            config,
        )
    }

    /// Marks the interview as running and stamps `started_at`.
    pub fn mark_started(&mut self) {
        self.status = SessionStatus::InProgress;
        self.started_at = Some(Utc::now());
    }

    /// Marks the session completed with the given reason.
    pub fn mark_completed(&mut self, reason: TerminationReason) {
        self.status = SessionStatus::Completed;
        self.completed_at = Some(Utc::now());
        self.termination_reason = Some(reason);
        self.close_current_stage();
    }

    /// Marks the session terminated with the given reason.
    pub fn mark_terminated(&mut self, reason: TerminationReason) {
        self.status = SessionStatus::Terminated;
        self.terminated_at = Some(Utc::now());
        self.termination_reason = Some(reason);
        self.close_current_stage();
    }

    /// Records a presented question as current and appends it to the
    /// transcript.
    pub fn present_question(&mut self, question: QuestionRecord) {
        self.questions.push(question.clone());
        self.current_question = Some(question);
    }

    /// Accepts a response: appends it to history and increments the question
    /// index by exactly one.
    pub fn accept_response(&mut self, response: ResponseRecord) {
        self.history.push(response);
        self.question_index += 1;
        self.current_question = None;
    }

    /// Applies an ability estimate, clamping theta to its bounds and the
    /// standard error to its floor.
    pub fn apply_estimate(&mut self, theta: f64, standard_error: f64) {
        self.theta = theta.clamp(THETA_MIN, THETA_MAX);
        self.standard_error = standard_error.max(MIN_STANDARD_ERROR);
    }

    /// Advances the stage to match the current question index.
    ///
    /// Scans the stage table in order and switches to the first stage whose
    /// range contains the index, unless that stage is already current. The
    /// previous stage's timing record is closed and a new one opened. Stages
    /// never regress.
    pub fn advance_stage(&mut self) {
        let target = Stage::for_index(self.question_index);
        if target != self.stage && target > self.stage {
            self.close_current_stage();
            self.stage = target;
            self.stage_timings.push(StageTiming::begin(target));
        }
    }

    /// Elapsed wall-clock time since the interview started, in minutes.
    /// Sessions that never started report 0.
    pub fn elapsed_minutes(&self) -> u64 {
        self.started_at
            .map(|started| {
                let elapsed = Utc::now() - started;
                elapsed.num_minutes().max(0) as u64
            })
            .unwrap_or(0)
    }

    /// Returns true if the session has ended.
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    fn close_current_stage(&mut self) {
        if let Some(timing) = self.stage_timings.last_mut() {
            if timing.ended_at.is_none() {
                timing.ended_at = Some(Utc::now());
            }
        }
    }
}
