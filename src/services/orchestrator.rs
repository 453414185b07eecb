/// Interview orchestration service coordinating the session lifecycle and the
/// per-response pipeline.
///
/// This is the engine's boundary: callers invoke `initialize`, `activate`,
/// `process_response`, `terminate` and `complete`, and always receive a
/// structured result. Latency-critical steps run inline under the per-session
/// lock; persistence mirroring, precise analysis, broadcasts and analytics
/// are dispatched through the task spawner and may finish after the call has
/// returned.
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, instrument, warn};

use crate::domain::models::{
    Config, InitializeRequest, InterviewSession, ResponseRecord, ResponseSubmission,
    SessionConfig, SessionOutcome, TerminationReason, TurnOutcome,
};
use crate::domain::ports::{
    AnalysisRequest, BroadcastGateway, BroadcastMessage, QuestionService, ResponseAnalyzer,
    SessionStore, UserDirectory,
};

use super::ability_estimator::AbilityEstimator;
use super::question_selector::QuestionSelector;
use super::role_banks::{RoleBankRegistry, RolePlan};
use super::session_registry::SessionRegistry;
use super::task_spawner::{DrainReport, TaskSpawner};
use super::termination_policy::TerminationPolicy;

/// Running counters over all sessions the orchestrator has handled.
#[derive(Debug, Default)]
pub struct EngineStats {
    sessions_initialized: AtomicU64,
    sessions_completed: AtomicU64,
    sessions_terminated: AtomicU64,
    responses_processed: AtomicU64,
}

/// Point-in-time copy of [`EngineStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Sessions successfully initialized
    pub sessions_initialized: u64,
    /// Sessions completed through the termination policy
    pub sessions_completed: u64,
    /// Sessions terminated by an operator
    pub sessions_terminated: u64,
    /// Responses accepted through the pipeline
    pub responses_processed: u64,
}

impl EngineStats {
    fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            sessions_initialized: self.sessions_initialized.load(Ordering::SeqCst),
            sessions_completed: self.sessions_completed.load(Ordering::SeqCst),
            sessions_terminated: self.sessions_terminated.load(Ordering::SeqCst),
            responses_processed: self.responses_processed.load(Ordering::SeqCst),
        }
    }
}

/// Orchestrates interview sessions end to end.
pub struct InterviewOrchestrator {
    registry: Arc<SessionRegistry>,
    directory: Arc<dyn UserDirectory>,
    analyzer: Arc<dyn ResponseAnalyzer>,
    store: Arc<dyn SessionStore>,
    gateway: Arc<dyn BroadcastGateway>,
    selector: QuestionSelector,
    estimator: AbilityEstimator,
    policy: TerminationPolicy,
    role_banks: RoleBankRegistry,
    spawner: Arc<TaskSpawner>,
    stats: Arc<EngineStats>,
    session_defaults: SessionConfig,
}

impl InterviewOrchestrator {
    /// Wires the orchestrator from its collaborator ports and configuration.
    pub fn new(
        directory: Arc<dyn UserDirectory>,
        question_service: Arc<dyn QuestionService>,
        analyzer: Arc<dyn ResponseAnalyzer>,
        store: Arc<dyn SessionStore>,
        gateway: Arc<dyn BroadcastGateway>,
        config: &Config,
    ) -> Self {
        Self {
            registry: Arc::new(SessionRegistry::new()),
            directory,
            analyzer,
            store,
            gateway,
            selector: QuestionSelector::new(
                question_service,
                config.engine.question_budget_ms,
                config.engine.fallback_after_index,
            ),
            estimator: AbilityEstimator::new(),
            policy: TerminationPolicy::new(),
            role_banks: RoleBankRegistry::with_builtin_banks(),
            spawner: Arc::new(TaskSpawner::new()),
            stats: Arc::new(EngineStats::default()),
            session_defaults: config.session_defaults.clone(),
        }
    }

    /// Initializes a new session.
    ///
    /// Validates both participants against the user directory, writes the
    /// initial record to the session store (a failure here is fatal: no
    /// session may exist without durable state), then registers the live
    /// context. Every failure comes back as a structured outcome.
    #[instrument(skip(self, request), fields(candidate = %request.candidate_id))]
    pub async fn initialize(&self, request: InitializeRequest) -> SessionOutcome {
        let config = request.config.unwrap_or_else(|| self.session_defaults.clone());
        if let Err(reason) = config.validate() {
            return SessionOutcome::failure(String::new(), reason);
        }
        if request.job_role.trim().is_empty() {
            return SessionOutcome::failure(String::new(), "Job role cannot be empty");
        }

        for (label, user_id) in [
            ("Candidate", &request.candidate_id),
            ("Interviewer", &request.interviewer_id),
        ] {
            match self.directory.get_user(user_id).await {
                Ok(Some(user)) if user.active => {}
                Ok(Some(_)) => {
                    return SessionOutcome::failure(
                        String::new(),
                        format!("{label} {user_id} is not active"),
                    );
                }
                Ok(None) => {
                    return SessionOutcome::failure(
                        String::new(),
                        format!("{label} {user_id} not found"),
                    );
                }
                Err(err) => {
                    return SessionOutcome::failure(
                        String::new(),
                        format!("User directory unavailable: {err}"),
                    );
                }
            }
        }

        let session = InterviewSession::new_with_uuid(
            request.candidate_id,
            request.interviewer_id,
            request.job_role,
            request.skills,
            config,
        );

        // Initial store write is synchronous and fatal on failure
        if let Err(err) = self.store.put(&session).await {
            return SessionOutcome::failure(
                session.id,
                format!("Failed to persist initial session state: {err}"),
            );
        }

        let session_id = session.id.clone();
        match self.registry.insert(session.clone()).await {
            Ok(_) => {
                self.stats.sessions_initialized.fetch_add(1, Ordering::SeqCst);
                info!(session_id = %session_id, "interview session initialized");
                SessionOutcome::ok(session)
            }
            Err(err) => SessionOutcome::failure(session_id, err.to_string()),
        }
    }

    /// Activates a session: marks it in progress and presents the first
    /// question. A question-selection failure fails the whole activation and
    /// leaves no partial state behind.
    #[instrument(skip(self))]
    pub async fn activate(&self, session_id: &str) -> SessionOutcome {
        let Some(handle) = self.registry.get(session_id).await else {
            return SessionOutcome::failure(session_id, format!("Session {session_id} not found"));
        };

        let mut session = handle.lock().await;
        if session.started_at.is_some() {
            return SessionOutcome::failure(
                session_id,
                format!("Session {session_id} is already active"),
            );
        }

        // Select before mutating anything so a failure leaves the session
        // exactly as initialized
        let question = match self.selector.select_initial(&session).await {
            Ok(question) => question,
            Err(err) => {
                return SessionOutcome::failure(
                    session_id,
                    format!("Activation failed: {err}"),
                );
            }
        };

        session.mark_started();
        session.present_question(question.clone());
        let snapshot = session.clone();
        drop(session);

        self.mirror_session("mirror_activation", snapshot.clone()).await;
        self.broadcast_checked(
            session_id.to_string(),
            BroadcastMessage::next_question(session_id, question),
        )
        .await;

        info!(session_id = %session_id, "interview activated");
        SessionOutcome::ok(snapshot)
    }

    /// Processes one candidate response and returns either the next question
    /// or the completion result. Steps 3-5 (fast estimate, termination check,
    /// question selection) run inline; persistence, precise analysis and the
    /// broadcast are dispatched and excluded from the latency budget.
    #[instrument(skip(self, submission))]
    pub async fn process_response(
        &self,
        session_id: &str,
        submission: ResponseSubmission,
    ) -> TurnOutcome {
        let Some(handle) = self.registry.get(session_id).await else {
            return TurnOutcome::Failed {
                session_id: session_id.to_string(),
                message: format!("Session {session_id} not found"),
            };
        };

        let mut session = handle.lock().await;
        if session.started_at.is_none() {
            return TurnOutcome::Failed {
                session_id: session_id.to_string(),
                message: format!("Session {session_id} has not been activated"),
            };
        }

        let question_id = submission
            .question_id
            .or_else(|| session.current_question.as_ref().map(|q| q.question_id.clone()))
            .unwrap_or_else(|| "unknown".to_string());
        let record = ResponseRecord::new(
            question_id,
            submission.payload,
            submission.response_type,
            submission.response_time_ms,
        )
        .with_metadata(submission.metadata);

        // Accept the response: history append, index +1, stage scan
        session.accept_response(record.clone());
        session.advance_stage();
        self.stats.responses_processed.fetch_add(1, Ordering::SeqCst);

        // Step 1: persist the raw response record (fire-and-forget)
        self.mirror_session("persist_response", session.clone()).await;

        // Step 2: precise-tier analysis (fire-and-forget)
        self.dispatch_analysis(&session, &record).await;

        // Step 3: fast-tier ability update (inline)
        self.estimator.apply_fast(&mut session, &record);

        // Step 4: termination policy (inline)
        let decision = self.policy.evaluate(&session);
        if decision.should_stop {
            let reason = decision.reason.unwrap_or(TerminationReason::MaxQuestions);
            let final_theta = session.theta;
            let questions_answered = session.question_index;
            drop(session);

            let outcome = self.complete(session_id, reason).await;
            if !outcome.success {
                return TurnOutcome::Failed {
                    session_id: session_id.to_string(),
                    message: outcome
                        .message
                        .unwrap_or_else(|| "Completion failed".to_string()),
                };
            }
            return TurnOutcome::Completed {
                session_id: session_id.to_string(),
                reason,
                final_theta,
                questions_answered,
            };
        }

        // Step 5: next question (inline, bounded by the selector's budget)
        let question = self.selector.select_next(&session).await;
        session.present_question(question.clone());
        let theta = session.theta;
        let standard_error = session.standard_error;
        let stage = session.stage;
        let question_index = session.question_index;
        let snapshot = session.clone();
        drop(session);

        self.mirror_session("persist_question", snapshot).await;
        self.broadcast_checked(
            session_id.to_string(),
            BroadcastMessage::next_question(session_id, question.clone()),
        )
        .await;

        TurnOutcome::NextQuestion {
            session_id: session_id.to_string(),
            question,
            theta,
            standard_error,
            stage,
            question_index,
        }
    }

    /// Terminates a session on operator request, bypassing the termination
    /// policy. Idempotent: a second call for the same identifier succeeds
    /// with an empty snapshot.
    #[instrument(skip(self))]
    pub async fn terminate(&self, session_id: &str, reason: TerminationReason) -> SessionOutcome {
        // Remove first: once the session is out of the registry, in-flight
        // background work for it degrades to no-ops
        let Some(handle) = self.registry.remove(session_id).await else {
            return SessionOutcome::ok_empty(session_id);
        };

        let mut session = handle.lock().await;
        session.mark_terminated(reason);
        let snapshot = session.clone();
        drop(session);

        self.stats.sessions_terminated.fetch_add(1, Ordering::SeqCst);
        self.mirror_terminal("mirror_termination", snapshot.clone()).await;
        self.dispatch_broadcast(
            "broadcast_termination",
            session_id.to_string(),
            BroadcastMessage::SessionTerminated {
                session_id: session_id.to_string(),
                reason,
            },
        )
        .await;

        info!(session_id = %session_id, %reason, "interview terminated");
        SessionOutcome::ok(snapshot)
    }

    /// Completes a session through the termination policy. Final analytics
    /// and the statistics update run as background tasks that are not
    /// awaited; their failure never affects the returned result.
    #[instrument(skip(self))]
    pub async fn complete(&self, session_id: &str, reason: TerminationReason) -> SessionOutcome {
        let Some(handle) = self.registry.remove(session_id).await else {
            return SessionOutcome::ok_empty(session_id);
        };

        let mut session = handle.lock().await;
        session.mark_completed(reason);
        let snapshot = session.clone();
        drop(session);

        self.mirror_terminal("mirror_completion", snapshot.clone()).await;
        self.dispatch_broadcast(
            "broadcast_completion",
            session_id.to_string(),
            BroadcastMessage::SessionCompleted {
                session_id: session_id.to_string(),
                reason,
            },
        )
        .await;

        // Final analytics: summarize the transcript off the critical path
        let analytics_snapshot = snapshot.clone();
        self.spawner
            .dispatch("final_analytics", async move {
                let answered = analytics_snapshot.question_index;
                let mean_ms = analytics_snapshot.performance.mean_response_time_ms;
                info!(
                    session_id = %analytics_snapshot.id,
                    questions_answered = answered,
                    final_theta = analytics_snapshot.theta,
                    final_standard_error = analytics_snapshot.standard_error,
                    mean_response_time_ms = mean_ms,
                    "final interview analytics"
                );
                Ok(())
            })
            .await;

        // Statistics update, equally best-effort
        let stats = Arc::clone(&self.stats);
        self.spawner
            .dispatch("statistics_update", async move {
                stats.sessions_completed.fetch_add(1, Ordering::SeqCst);
                Ok(())
            })
            .await;

        info!(session_id = %session_id, %reason, "interview completed");
        SessionOutcome::ok(snapshot)
    }

    /// Plans a role-specific question at schedule time.
    pub fn plan_for_role(&self, job_role: &str, primary_technology: Option<&str>) -> RolePlan {
        self.role_banks.plan_for_role(job_role, primary_technology)
    }

    /// Clones the current state of a live session.
    pub async fn snapshot(&self, session_id: &str) -> Option<InterviewSession> {
        self.registry.snapshot(session_id).await
    }

    /// Identifiers of all live sessions.
    pub async fn list_active(&self) -> Vec<String> {
        self.registry.list_active().await
    }

    /// Point-in-time engine counters.
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Drains outstanding background work, waiting up to `window` per task.
    pub async fn shutdown(&self, window: Duration) -> DrainReport {
        self.spawner.drain(window).await
    }

    /// Mirrors a live session's state, skipping the write if the session has
    /// left the registry by the time the task runs.
    async fn mirror_session(&self, label: &'static str, snapshot: InterviewSession) {
        let store = Arc::clone(&self.store);
        let registry = Arc::clone(&self.registry);
        self.spawner
            .dispatch(label, async move {
                if !registry.contains(&snapshot.id).await {
                    return Ok(());
                }
                store.put(&snapshot).await
            })
            .await;
    }

    /// Mirrors a terminal record. No membership check: the session has just
    /// been removed and this write is the record of that removal.
    async fn mirror_terminal(&self, label: &'static str, snapshot: InterviewSession) {
        let store = Arc::clone(&self.store);
        self.spawner
            .dispatch(label, async move { store.put(&snapshot).await })
            .await;
    }

    /// Broadcasts for a live session, skipping if it has been removed.
    async fn broadcast_checked(&self, session_id: String, message: BroadcastMessage) {
        let gateway = Arc::clone(&self.gateway);
        let registry = Arc::clone(&self.registry);
        self.spawner
            .dispatch("broadcast_next_question", async move {
                if !registry.contains(&session_id).await {
                    return Ok(());
                }
                gateway.push(&session_id, message).await
            })
            .await;
    }

    /// Broadcasts unconditionally (terminal notifications).
    async fn dispatch_broadcast(
        &self,
        label: &'static str,
        session_id: String,
        message: BroadcastMessage,
    ) {
        let gateway = Arc::clone(&self.gateway);
        self.spawner
            .dispatch(label, async move { gateway.push(&session_id, message).await })
            .await;
    }

    /// Dispatches precise-tier analysis for an accepted response. On success
    /// the authoritative estimate and performance aggregates land on the
    /// session for the next turn; on failure the task only logs.
    async fn dispatch_analysis(&self, session: &InterviewSession, record: &ResponseRecord) {
        let request = AnalysisRequest {
            session_id: session.id.clone(),
            question_id: record.question_id.clone(),
            response_text: record.payload.clone(),
            response_type: record.response_type.clone(),
            response_time_ms: record.response_time_ms,
        };
        let analyzer = Arc::clone(&self.analyzer);
        let registry = Arc::clone(&self.registry);
        let estimator = self.estimator.clone();
        let response_time_ms = record.response_time_ms;

        self.spawner
            .dispatch("precise_analysis", async move {
                let result = analyzer.analyze(&request).await?;

                let Some(handle) = registry.get(&request.session_id).await else {
                    // Session ended while the analyzer worked; drop the result
                    return Ok(());
                };
                let mut session = handle.lock().await;
                estimator.apply_precise(&mut session, &result);
                session.performance.record(result.score, response_time_ms);
                if result.bias_flag == Some(true) {
                    warn!(
                        session_id = %request.session_id,
                        question_id = %request.question_id,
                        "analyzer flagged potential item bias"
                    );
                }
                Ok(())
            })
            .await;
    }
}
