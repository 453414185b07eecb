//! Interview stage progression.
//!
//! An interview moves through six ordered stages, each covering an inclusive
//! question-index range with its own difficulty band and default question
//! type. Stage assignment is a pure function of the question index and never
//! regresses for a live session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::question::QuestionType;

/// One of the six ordered interview stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// Warm-up items establishing a baseline estimate
    Calibration,
    /// Wide difficulty sweep around the current estimate
    AdaptiveExploration,
    /// Focused probing of the declared skill set
    SkillDeepDive,
    /// High-difficulty items near the estimate ceiling
    Challenge,
    /// Behavioral questions mixed into the technical track
    BehavioralIntegration,
    /// Closing assessment across the full band
    FinalAssessment,
}

/// Static description of a stage: index range, difficulty band, default type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StageDescriptor {
    /// Stage this descriptor belongs to
    pub stage: Stage,
    /// First question index covered (inclusive)
    pub start_index: u32,
    /// Last question index covered (inclusive)
    pub end_index: u32,
    /// Minimum item difficulty for the range
    pub min_difficulty: f64,
    /// Maximum item difficulty for the range
    pub max_difficulty: f64,
    /// Question type requested from the selector by default
    pub default_question_type: QuestionType,
}

/// The fixed stage table. Ranges partition the question-index axis with no
/// gaps and no overlaps; indices past the last bound pin to the final stage.
pub const STAGE_TABLE: [StageDescriptor; 6] = [
    StageDescriptor {
        stage: Stage::Calibration,
        start_index: 1,
        end_index: 3,
        min_difficulty: -1.0,
        max_difficulty: 1.0,
        default_question_type: QuestionType::Technical,
    },
    StageDescriptor {
        stage: Stage::AdaptiveExploration,
        start_index: 4,
        end_index: 8,
        min_difficulty: -2.0,
        max_difficulty: 2.0,
        default_question_type: QuestionType::Technical,
    },
    StageDescriptor {
        stage: Stage::SkillDeepDive,
        start_index: 9,
        end_index: 12,
        min_difficulty: -1.5,
        max_difficulty: 2.5,
        default_question_type: QuestionType::Coding,
    },
    StageDescriptor {
        stage: Stage::Challenge,
        start_index: 13,
        end_index: 16,
        min_difficulty: 0.5,
        max_difficulty: 3.0,
        default_question_type: QuestionType::SystemDesign,
    },
    StageDescriptor {
        stage: Stage::BehavioralIntegration,
        start_index: 17,
        end_index: 19,
        min_difficulty: -1.0,
        max_difficulty: 1.5,
        default_question_type: QuestionType::Behavioral,
    },
    StageDescriptor {
        stage: Stage::FinalAssessment,
        start_index: 20,
        end_index: 25,
        min_difficulty: -2.0,
        max_difficulty: 3.0,
        default_question_type: QuestionType::Technical,
    },
];

impl Stage {
    /// Returns the first stage of every interview.
    pub const fn first() -> Self {
        Stage::Calibration
    }

    /// Looks up this stage's static descriptor.
    pub fn descriptor(self) -> &'static StageDescriptor {
        match self {
            Self::Calibration => &STAGE_TABLE[0],
            Self::AdaptiveExploration => &STAGE_TABLE[1],
            Self::SkillDeepDive => &STAGE_TABLE[2],
            Self::Challenge => &STAGE_TABLE[3],
            Self::BehavioralIntegration => &STAGE_TABLE[4],
            Self::FinalAssessment => &STAGE_TABLE[5],
        }
    }

    /// Maps a question index to its stage.
    ///
    /// Scans the table in order and returns the first stage whose range
    /// contains the index. Index 0 (no question asked yet) and indices below
    /// the first range map to `Calibration`; indices past the last bound pin
    /// to `FinalAssessment`.
    pub fn for_index(question_index: u32) -> Self {
        for descriptor in &STAGE_TABLE {
            if question_index >= descriptor.start_index && question_index <= descriptor.end_index {
                return descriptor.stage;
            }
        }
        if question_index > STAGE_TABLE[STAGE_TABLE.len() - 1].end_index {
            Stage::FinalAssessment
        } else {
            Stage::Calibration
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Calibration => write!(f, "calibration"),
            Self::AdaptiveExploration => write!(f, "adaptive-exploration"),
            Self::SkillDeepDive => write!(f, "skill-deep-dive"),
            Self::Challenge => write!(f, "challenge"),
            Self::BehavioralIntegration => write!(f, "behavioral-integration"),
            Self::FinalAssessment => write!(f, "final-assessment"),
        }
    }
}

/// Timing record for one stage of one session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTiming {
    /// Stage this record covers
    pub stage: Stage,
    /// When the session entered the stage
    pub started_at: DateTime<Utc>,
    /// When the session left the stage (`None` while current)
    pub ended_at: Option<DateTime<Utc>>,
}

impl StageTiming {
    /// Opens a timing record for a stage entered now.
    pub fn begin(stage: Stage) -> Self {
        Self {
            stage,
            started_at: Utc::now(),
            ended_at: None,
        }
    }
}
