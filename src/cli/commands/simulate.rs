//! Interview simulation command.
//!
//! Drives a full interview through the orchestrator against in-process
//! collaborators: a directory that accepts the simulated participants, a
//! question service scripted over a small item bank, and an analyzer whose
//! score follows response length. Useful for exercising the stage
//! progression and termination policy end to end without any network.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use clap::Args;
use comfy_table::{presets, ContentArrangement, Table};
use rand::Rng;
use std::sync::Arc;

use crate::adapters::channel::ChannelBroadcastGateway;
use crate::adapters::sqlite::{create_test_pool, SqliteSessionStore};
use crate::domain::models::{
    Config, InitializeRequest, QuestionType, ResponseSubmission, RetryConfig, SessionConfig,
    TurnOutcome,
};
use crate::domain::ports::{
    AnalysisRequest, AnalysisResult, NextQuestion, NextQuestionRequest, QuestionService,
    ResponseAnalyzer, UserDirectory, UserRecord,
};
use crate::services::InterviewOrchestrator;

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Job role for the simulated interview
    #[arg(short, long, default_value = "Backend Developer")]
    pub role: String,

    /// Maximum questions before the policy stops the interview
    #[arg(long, default_value = "12")]
    pub max_questions: u32,

    /// Minimum questions before confidence-based stopping
    #[arg(long, default_value = "5")]
    pub min_questions: u32,

    /// Comma-separated skills for the role
    #[arg(short, long, value_delimiter = ',', default_value = "rust,sql")]
    pub skills: Vec<String>,
}

/// Directory that knows the two simulated participants.
struct SimulatedDirectory;

#[async_trait]
impl UserDirectory for SimulatedDirectory {
    async fn get_user(&self, user_id: &str) -> Result<Option<UserRecord>> {
        Ok(Some(UserRecord {
            id: user_id.to_string(),
            active: true,
            display_name: Some(format!("sim-{user_id}")),
        }))
    }
}

/// Question service scripted over a fixed item bank, difficulty tracking the
/// requested band.
struct SimulatedQuestionService;

const SIM_BANK: [&str; 6] = [
    "Explain the difference between a mutex and a semaphore.",
    "Design a schema for an append-only audit log.",
    "How would you shard a counter that takes a million writes a second?",
    "Walk through what happens between typing a URL and the page rendering.",
    "Implement retry with jitter for an idempotent request.",
    "When would you pick a message queue over direct RPC?",
];

#[async_trait]
impl QuestionService for SimulatedQuestionService {
    async fn next_question(&self, request: &NextQuestionRequest) -> Result<NextQuestion> {
        let slot = request.question_index as usize % SIM_BANK.len();
        let difficulty = request
            .theta
            .clamp(request.min_difficulty, request.max_difficulty);
        Ok(NextQuestion {
            question_id: format!("sim_{}", request.question_index),
            text: SIM_BANK[slot].to_string(),
            question_type: request.question_type_hint.unwrap_or(QuestionType::Technical),
            difficulty,
            category: "technical".to_string(),
        })
    }
}

/// Analyzer whose score follows response length.
struct SimulatedAnalyzer;

#[async_trait]
impl ResponseAnalyzer for SimulatedAnalyzer {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let score = (request.response_text.len() as f64 / 200.0).clamp(0.1, 1.0);
        let theta_change = (score - 0.5) * 0.2;
        Ok(AnalysisResult {
            score,
            theta_change,
            new_theta: theta_change,
            new_standard_error: 0.9,
            bias_flag: None,
            early_stop_recommended: None,
        })
    }
}

pub async fn execute(args: SimulateArgs, json: bool) -> Result<()> {
    let session_config = SessionConfig {
        min_questions: args.min_questions,
        max_questions: args.max_questions,
        ..SessionConfig::default()
    };
    session_config.validate().map_err(|reason| anyhow!(reason))?;

    let pool = create_test_pool()
        .await
        .context("Failed to open in-memory mirror")?;
    let store = SqliteSessionStore::new(pool, RetryConfig::default());
    store.migrate().await?;

    let gateway = Arc::new(ChannelBroadcastGateway::default());
    let orchestrator = InterviewOrchestrator::new(
        Arc::new(SimulatedDirectory),
        Arc::new(SimulatedQuestionService),
        Arc::new(SimulatedAnalyzer),
        Arc::new(store),
        Arc::clone(&gateway) as Arc<dyn crate::domain::ports::BroadcastGateway>,
        &Config::default(),
    );

    let outcome = orchestrator
        .initialize(InitializeRequest {
            candidate_id: "sim-candidate".to_string(),
            interviewer_id: "sim-interviewer".to_string(),
            job_role: args.role.clone(),
            skills: args.skills.clone(),
            config: Some(session_config),
        })
        .await;
    if !outcome.success {
        return Err(anyhow!(outcome
            .message
            .unwrap_or_else(|| "initialization failed".to_string())));
    }
    let session_id = outcome.session_id;

    let outcome = orchestrator.activate(&session_id).await;
    if !outcome.success {
        return Err(anyhow!(outcome
            .message
            .unwrap_or_else(|| "activation failed".to_string())));
    }

    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Stage", "Question", "Theta", "Std Err"]);

    let mut rng = rand::thread_rng();
    loop {
        // Synthetic candidate: mostly prompt, sometimes terse or slow
        let (time_ms, length) = match rng.gen_range(0..4u8) {
            0 => (rng.gen_range(3_000..9_000), rng.gen_range(60..200)),
            1 => (rng.gen_range(61_000..90_000), rng.gen_range(60..200)),
            2 => (rng.gen_range(10_000..40_000), rng.gen_range(5..18)),
            _ => (rng.gen_range(15_000..45_000), rng.gen_range(25..45)),
        };

        let turn = orchestrator
            .process_response(
                &session_id,
                ResponseSubmission {
                    question_id: None,
                    payload: "a".repeat(length),
                    response_type: "text".to_string(),
                    response_time_ms: time_ms,
                    metadata: std::collections::HashMap::new(),
                },
            )
            .await;

        match turn {
            TurnOutcome::NextQuestion {
                question,
                theta,
                standard_error,
                stage,
                question_index,
                ..
            } => {
                table.add_row(vec![
                    question_index.to_string(),
                    stage.to_string(),
                    question.question_id.clone(),
                    format!("{theta:+.2}"),
                    format!("{standard_error:.2}"),
                ]);
            }
            TurnOutcome::Completed {
                reason,
                final_theta,
                questions_answered,
                ..
            } => {
                orchestrator
                    .shutdown(std::time::Duration::from_secs(2))
                    .await;

                if json {
                    println!(
                        "{}",
                        serde_json::json!({
                            "success": true,
                            "session_id": session_id,
                            "reason": reason.to_string(),
                            "final_theta": final_theta,
                            "questions_answered": questions_answered,
                        })
                    );
                } else {
                    println!("{table}");
                    println!(
                        "Interview {session_id} finished: {reason} after {questions_answered} questions, final theta {final_theta:+.2}"
                    );
                }
                return Ok(());
            }
            TurnOutcome::Failed { message, .. } => {
                return Err(anyhow!("simulation turn failed: {message}"));
            }
        }
    }
}
