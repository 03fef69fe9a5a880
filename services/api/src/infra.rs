use agent_quiz::config::QuizConfig;
use agent_quiz::error::AppError;
use agent_quiz::quiz::{AnswerError, AnswerSet, QuestionSet, QuestionSetImporter, QuizEvaluator, QuizResult};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Read-only quiz content shared by every request. Each submission is
/// evaluated independently.
pub(crate) struct QuizService {
    questions: QuestionSet,
    evaluator: QuizEvaluator,
    reveal_delay: Duration,
}

impl QuizService {
    pub(crate) fn new(questions: QuestionSet, reveal_delay: Duration) -> Self {
        Self {
            questions,
            evaluator: QuizEvaluator::default(),
            reveal_delay,
        }
    }

    pub(crate) fn load(config: &QuizConfig) -> Result<Self, AppError> {
        let questions = load_questions(&config.dataset_path)?;
        Ok(Self::new(questions, config.reveal_delay))
    }

    pub(crate) fn questions(&self) -> &QuestionSet {
        &self.questions
    }

    pub(crate) fn reveal_delay(&self) -> Duration {
        self.reveal_delay
    }

    /// Raw score expressions are recorded first; label choices for the same
    /// question replace them.
    pub(crate) fn answers_from(
        &self,
        choices: &BTreeMap<usize, String>,
        raw: &BTreeMap<usize, Option<String>>,
    ) -> Result<AnswerSet, AppError> {
        let total = self.questions.len();
        let mut answers = AnswerSet::new();
        for (index, expression) in raw {
            if *index >= total {
                return Err(AnswerError::UnknownQuestion {
                    index: *index,
                    total,
                }
                .into());
            }
            match expression {
                Some(expression) => answers.record(*index, expression.as_str()),
                None => answers.record_blank(*index),
            }
        }

        let chosen = AnswerSet::from_labels(
            &self.questions,
            choices.iter().map(|(index, label)| (*index, label.as_str())),
        )?;
        for index in 0..self.questions.len() {
            if chosen.is_answered(index) {
                answers.record(index, chosen.expression(index).unwrap_or_default());
            }
        }

        Ok(answers)
    }

    pub(crate) fn evaluate(&self, answers: &AnswerSet) -> Result<QuizResult, AppError> {
        Ok(self.evaluator.evaluate(&self.questions, answers)?)
    }
}

pub(crate) fn load_questions(path: &Path) -> Result<QuestionSet, AppError> {
    Ok(QuestionSetImporter::from_path(path)?)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use std::io::Cursor;

    pub(crate) const SAMPLE_CSV: &str = "question,option_A,option_B,option_C,option_D,score_A,score_B,score_C,score_D\n\
First contact?,Take it,Trade it,Smoke it,Hold it,\"Duelist:3,Aggro:3\",\"Initiator:3,Teamwork:3\",\"Controller:3,Logic:3\",\"Sentinel:3,Stoic:3\"\n\
Clutch time?,Hunt,Listen,,,\"Aggro:3,Duelist:1\",\"Stoic:3,Sentinel:1\",,\n";

    pub(crate) fn service() -> QuizService {
        let questions =
            QuestionSetImporter::from_reader(Cursor::new(SAMPLE_CSV)).expect("sample imports");
        QuizService::new(questions, Duration::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::service;
    use super::*;

    #[test]
    fn choices_override_raw_answers_for_the_same_question() {
        let service = service();
        let choices = BTreeMap::from([(0, "b".to_string())]);
        let raw = BTreeMap::from([(0, Some("Duelist:9".to_string())), (1, None)]);

        let answers = service.answers_from(&choices, &raw).expect("answers build");
        assert_eq!(answers.len(), 2);
        assert_eq!(answers.expression(0), Some("Initiator:3,Teamwork:3"));
        assert!(answers.is_answered(1));
    }

    #[test]
    fn raw_answers_past_the_last_question_are_rejected() {
        let service = service();
        let raw = BTreeMap::from([
            (0, Some("Duelist:1".to_string())),
            (1, None),
            (57, Some("Duelist:1000".to_string())),
        ]);

        let error = service
            .answers_from(&BTreeMap::new(), &raw)
            .expect_err("index 57 is out of range");
        assert!(matches!(
            error,
            AppError::Answers(AnswerError::UnknownQuestion {
                index: 57,
                total: 2
            })
        ));
    }

    #[test]
    fn evaluate_reports_incomplete_submissions() {
        let service = service();
        let choices = BTreeMap::from([(0, "A".to_string())]);
        let answers = service
            .answers_from(&choices, &BTreeMap::new())
            .expect("answers build");

        match service.evaluate(&answers) {
            Err(AppError::Incomplete(incomplete)) => {
                assert_eq!((incomplete.answered, incomplete.total), (1, 2));
            }
            other => panic!("expected incomplete submission, got {other:?}"),
        }
    }

    #[test]
    fn load_questions_propagates_missing_file() {
        let error = load_questions(Path::new("./no-such-dataset.csv")).expect_err("missing");
        assert!(matches!(error, AppError::Dataset(_)));
    }
}
