//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines async trait interfaces that infrastructure adapters
//! must implement:
//! - `UserDirectory`: participant validation at initialization
//! - `QuestionService`: adaptive next-question selection
//! - `ResponseAnalyzer`: precise-tier ability estimation
//! - `SessionStore`: durable last-write-wins session mirror
//! - `BroadcastGateway`: fire-and-forget client push
//!
//! These traits define the contracts that allow the domain to be independent
//! of specific infrastructure implementations.

pub mod broadcast_gateway;
pub mod question_service;
pub mod response_analyzer;
pub mod session_store;
pub mod user_directory;

pub use broadcast_gateway::{BroadcastGateway, BroadcastMessage, CONTINUE_IMMEDIATELY};
pub use question_service::{NextQuestion, NextQuestionRequest, QuestionService};
pub use response_analyzer::{AnalysisRequest, AnalysisResult, ResponseAnalyzer};
pub use session_store::SessionStore;
pub use user_directory::{UserDirectory, UserRecord};
