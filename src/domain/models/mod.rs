pub mod config;
pub mod outcome;
pub mod question;
pub mod request;
pub mod session;
pub mod stage;
pub mod termination;

pub use config::{
    Config, DatabaseConfig, EngineConfig, LoggingConfig, RateLimitConfig, RetryConfig,
    ServicesConfig, SessionConfig,
};
pub use outcome::{SessionOutcome, TurnOutcome};
pub use request::{InitializeRequest, ResponseSubmission};
pub use question::{QuestionRecord, QuestionType, ResponseRecord};
pub use session::{
    InterviewSession, PerformanceStats, SessionStatus, MIN_STANDARD_ERROR, THETA_MAX, THETA_MIN,
};
pub use stage::{Stage, StageDescriptor, StageTiming, STAGE_TABLE};
pub use termination::{TerminationDecision, TerminationReason};
