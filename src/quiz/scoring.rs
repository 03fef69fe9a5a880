use super::answers::AnswerSet;
use super::domain::SEED_CATEGORIES;
use super::tally::Tally;
use tracing::debug;

/// Turns an answer set into a tally, starting from a fixed seed.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    seed: Vec<String>,
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::with_seed(SEED_CATEGORIES)
    }
}

impl ScoringEngine {
    pub fn with_seed<I, S>(seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            seed: seed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn seed(&self) -> &[String] {
        &self.seed
    }

    /// Sums every parsable segment of every answer. Blank answers add
    /// nothing and malformed segments are skipped one by one.
    pub fn score(&self, answers: &AnswerSet) -> Tally {
        let mut tally = Tally::with_categories(self.seed.iter().cloned());

        for (question, expression) in answers.expressions() {
            for rejected in tally.apply_expression(expression) {
                debug!(question, %rejected, "skipping malformed score segment");
            }
        }

        tally
    }
}
