//! Role-aware question banks.
//!
//! Used at schedule time, not per turn: given a job role and a primary
//! technology, the registry picks a role-specific bank and draws one random
//! prompt plus an inferred coding language and an estimated duration. Roles
//! are added by registration rather than branching; an unrecognized role
//! falls back to a single generic behavioral question.

use rand::seq::SliceRandom;
use std::collections::HashMap;

use crate::domain::models::QuestionType;

/// One role-specific question bank.
#[derive(Debug, Clone)]
pub struct RoleBank {
    /// Prompts the bank can serve
    pub prompts: Vec<String>,

    /// Coding language assumed when the role implies one
    pub default_language: Option<String>,

    /// Expected time to answer one prompt, in minutes
    pub estimated_duration_minutes: u64,

    /// Question kind the bank serves
    pub question_type: QuestionType,
}

/// A scheduled question drawn from a bank.
#[derive(Debug, Clone, PartialEq)]
pub struct RolePlan {
    /// Bank category the plan came from ("backend", "generic", ...)
    pub category: String,

    /// Prompt to present
    pub prompt: String,

    /// Coding language for the exercise, when applicable
    pub language: Option<String>,

    /// Expected time to answer, in minutes
    pub estimated_duration_minutes: u64,

    /// Question kind
    pub question_type: QuestionType,
}

/// Registry from role category to question bank.
pub struct RoleBankRegistry {
    banks: HashMap<String, RoleBank>,
}

impl Default for RoleBankRegistry {
    fn default() -> Self {
        Self::with_builtin_banks()
    }
}

impl RoleBankRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            banks: HashMap::new(),
        }
    }

    /// Creates a registry pre-populated with the built-in role banks.
    pub fn with_builtin_banks() -> Self {
        let mut registry = Self::new();

        registry.register(
            "frontend",
            RoleBank {
                prompts: vec![
                    "Build an accessible autocomplete component without a framework.".to_string(),
                    "Explain how you would eliminate layout shift on a content-heavy page.".to_string(),
                    "Implement an undo stack for a form editor.".to_string(),
                ],
                default_language: Some("typescript".to_string()),
                estimated_duration_minutes: 25,
                question_type: QuestionType::Coding,
            },
        );
        registry.register(
            "backend",
            RoleBank {
                prompts: vec![
                    "Design a rate limiter shared across service replicas.".to_string(),
                    "Implement idempotent handling for a payment webhook.".to_string(),
                    "Walk through indexing strategy for a slow reporting query.".to_string(),
                ],
                default_language: Some("rust".to_string()),
                estimated_duration_minutes: 30,
                question_type: QuestionType::Coding,
            },
        );
        registry.register(
            "fullstack",
            RoleBank {
                prompts: vec![
                    "Design the API and UI state for a collaborative checklist.".to_string(),
                    "Add optimistic updates to a CRUD screen and reconcile failures.".to_string(),
                ],
                default_language: Some("typescript".to_string()),
                estimated_duration_minutes: 30,
                question_type: QuestionType::Coding,
            },
        );
        registry.register(
            "devops",
            RoleBank {
                prompts: vec![
                    "Design a zero-downtime deploy for a stateful service.".to_string(),
                    "Debug a pod that restarts only under production load.".to_string(),
                ],
                default_language: Some("bash".to_string()),
                estimated_duration_minutes: 20,
                question_type: QuestionType::SystemDesign,
            },
        );
        registry.register(
            "data-science",
            RoleBank {
                prompts: vec![
                    "Design an evaluation for a model whose labels arrive weeks late.".to_string(),
                    "Explain how you would detect training/serving skew.".to_string(),
                ],
                default_language: Some("python".to_string()),
                estimated_duration_minutes: 25,
                question_type: QuestionType::Technical,
            },
        );
        registry.register(
            "mobile",
            RoleBank {
                prompts: vec![
                    "Design offline-first sync for a note-taking app.".to_string(),
                    "Reduce cold-start time for an app with a heavy dependency graph.".to_string(),
                ],
                default_language: Some("kotlin".to_string()),
                estimated_duration_minutes: 25,
                question_type: QuestionType::Coding,
            },
        );

        registry
    }

    /// Registers (or replaces) a bank under a role category.
    pub fn register(&mut self, category: impl Into<String>, bank: RoleBank) {
        self.banks.insert(category.into(), bank);
    }

    /// Plans one question for a job role.
    ///
    /// The role string is matched against registered categories by normalized
    /// substring ("Senior Backend Developer" hits "backend"). When the caller
    /// names a primary technology it overrides the bank's default language.
    /// Unrecognized roles receive the generic behavioral plan.
    pub fn plan_for_role(&self, job_role: &str, primary_technology: Option<&str>) -> RolePlan {
        let normalized = job_role.to_lowercase().replace([' ', '_'], "-");

        let matched = self
            .banks
            .iter()
            .find(|(category, _)| normalized.contains(category.as_str()));

        match matched {
            Some((category, bank)) => {
                let prompt = bank
                    .prompts
                    .choose(&mut rand::thread_rng())
                    .cloned()
                    .unwrap_or_default();
                RolePlan {
                    category: category.clone(),
                    prompt,
                    language: primary_technology
                        .map(str::to_string)
                        .or_else(|| bank.default_language.clone()),
                    estimated_duration_minutes: bank.estimated_duration_minutes,
                    question_type: bank.question_type,
                }
            }
            None => RolePlan {
                category: "generic".to_string(),
                prompt: "Tell me about a project you are proud of and the hardest problem in it."
                    .to_string(),
                language: None,
                estimated_duration_minutes: 15,
                question_type: QuestionType::Behavioral,
            },
        }
    }

    /// Registered category names.
    pub fn categories(&self) -> Vec<String> {
        self.banks.keys().cloned().collect()
    }
}
