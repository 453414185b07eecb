//! Socratic - Adaptive Interview Orchestration Engine
//!
//! Socratic owns a live interview session from initialization through
//! completion: it drives a six-stage adaptive-testing state machine,
//! re-estimates candidate ability after every response, selects the next
//! question under a sub-two-second budget, and decides when the interview
//! should end.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Pure business logic, models and port traits
//! - **Service Layer** (`services`): Orchestration, estimation and policies
//! - **Adapters** (`adapters`): HTTP, `SQLite` and channel implementations of
//!   the ports
//! - **Infrastructure Layer** (`infrastructure`): Configuration loading
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use socratic::services::InterviewOrchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // Wire ports and drive an interview
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{EngineError, EngineResult};
pub use domain::models::{
    Config, InitializeRequest, InterviewSession, QuestionRecord, ResponseRecord,
    ResponseSubmission, SessionConfig, SessionOutcome, SessionStatus, Stage, TerminationDecision,
    TerminationReason, TurnOutcome,
};
pub use domain::ports::{
    BroadcastGateway, BroadcastMessage, QuestionService, ResponseAnalyzer, SessionStore,
    UserDirectory,
};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{AbilityEstimator, InterviewOrchestrator, SessionRegistry, TerminationPolicy};
