//! Benchmarks for the synchronous turn path.
//!
//! The fast-tier estimate, stage scan and termination evaluation run inline
//! on every response; together they must stay far below the two-second turn
//! budget.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use socratic::domain::models::{
    InterviewSession, ResponseRecord, SessionConfig, Stage,
};
use socratic::services::{AbilityEstimator, TerminationPolicy};

fn bench_session() -> InterviewSession {
    let mut session = InterviewSession::new(
        "bench".to_string(),
        "cand".to_string(),
        "intv".to_string(),
        "Backend Developer".to_string(),
        vec!["rust".to_string()],
        SessionConfig::default(),
    );
    session.mark_started();
    session
}

fn bench_fast_estimate(c: &mut Criterion) {
    let estimator = AbilityEstimator::new();
    let session = bench_session();
    let response = ResponseRecord::new(
        "q".to_string(),
        "a".repeat(120),
        "text".to_string(),
        8_000,
    );

    c.bench_function("fast_tier_estimate", |b| {
        b.iter(|| estimator.fast_estimate(black_box(&session), black_box(&response)));
    });
}

fn bench_inline_turn_steps(c: &mut Criterion) {
    let estimator = AbilityEstimator::new();
    let policy = TerminationPolicy::new();

    c.bench_function("inline_turn_steps", |b| {
        b.iter(|| {
            let mut session = bench_session();
            let response = ResponseRecord::new(
                "q".to_string(),
                "a".repeat(120),
                "text".to_string(),
                8_000,
            );
            session.accept_response(response.clone());
            session.advance_stage();
            estimator.apply_fast(&mut session, &response);
            black_box(policy.evaluate(&session))
        });
    });
}

fn bench_stage_scan(c: &mut Criterion) {
    c.bench_function("stage_for_index", |b| {
        b.iter(|| {
            for index in 0u32..30 {
                black_box(Stage::for_index(black_box(index)));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_fast_estimate,
    bench_inline_turn_steps,
    bench_stage_scan
);
criterion_main!(benches);
