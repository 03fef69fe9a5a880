//! Agent quiz core: score expressions feed a tally, the tally yields a
//! four-letter type code and best-fit role, and both resolve to static
//! profiles.

pub mod answers;
pub mod classifier;
pub mod dataset;
pub mod domain;
pub mod expression;
pub mod gate;
pub mod profiles;
pub mod scoring;
pub mod tally;

pub use answers::{AnswerError, AnswerSet};
pub use classifier::{Classification, RoleScore, AXIS_THRESHOLD};
pub use dataset::{DatasetError, QuestionSetImporter};
pub use domain::{
    AnswerOption, Axis, OptionLabel, Question, QuestionSet, ResultProfile, Role, RoleProfile,
    TypeCode, MAX_OPTIONS, MAX_QUESTIONS, SEED_CATEGORIES,
};
pub use gate::IncompleteSubmission;
pub use scoring::ScoringEngine;
pub use tally::Tally;

use serde::Serialize;
use tracing::info;

/// Runs the gate, scoring, classification and profile lookup for one
/// submission. Holds no per-submission state.
#[derive(Debug, Clone, Default)]
pub struct QuizEvaluator {
    engine: ScoringEngine,
}

impl QuizEvaluator {
    pub fn new(engine: ScoringEngine) -> Self {
        Self { engine }
    }

    pub fn evaluate(
        &self,
        questions: &QuestionSet,
        answers: &AnswerSet,
    ) -> Result<QuizResult, IncompleteSubmission> {
        gate::ensure_complete(answers, questions.len())?;

        let tally = self.engine.score(&answers.within(questions.len()));
        let result = QuizResult::from_tally(tally);
        info!(
            type_code = %result.type_code,
            role = %result.role,
            "quiz evaluated"
        );
        Ok(result)
    }
}

/// Everything a presentation layer needs to render an outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuizResult {
    pub type_code: TypeCode,
    pub role: Role,
    pub profile: ResultProfile,
    pub role_profile: RoleProfile,
    pub role_ranking: Vec<RoleScore>,
    pub tally: Tally,
}

impl QuizResult {
    pub fn from_tally(tally: Tally) -> Self {
        let Classification { type_code, role } = classifier::classify(&tally);
        let profile = *profiles::resolve_type_code(&type_code);

        Self {
            profile,
            role_profile: profiles::role_profile(role),
            role_ranking: classifier::role_ranking(&tally),
            type_code,
            role,
            tally,
        }
    }
}
