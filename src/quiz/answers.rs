use super::domain::{OptionLabel, QuestionSet};
use std::collections::BTreeMap;

/// Answers collected for a single evaluation, keyed by 0-based question index.
///
/// A recorded answer may carry no score expression; it still counts as
/// answered. Indices that were never recorded are unanswered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSet {
    answers: BTreeMap<usize, Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnswerError {
    #[error("question {index} does not exist (the quiz has {total} questions)")]
    UnknownQuestion { index: usize, total: usize },
    #[error("question {index} has no option {label}")]
    UnknownOption { index: usize, label: OptionLabel },
    #[error("'{label}' is not an option label (question {index})")]
    InvalidLabel { index: usize, label: String },
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves option labels against `questions`, picking up each option's
    /// score expression.
    pub fn from_choices<I>(questions: &QuestionSet, choices: I) -> Result<Self, AnswerError>
    where
        I: IntoIterator<Item = (usize, OptionLabel)>,
    {
        let mut answers = Self::new();
        for (index, label) in choices {
            let question = questions.get(index).ok_or(AnswerError::UnknownQuestion {
                index,
                total: questions.len(),
            })?;
            let option = question
                .option(label)
                .ok_or(AnswerError::UnknownOption { index, label })?;
            answers.record(index, option.score_expression.clone());
        }
        Ok(answers)
    }

    /// Like [`AnswerSet::from_choices`] but takes raw label text such as `"b"`.
    pub fn from_labels<I, S>(questions: &QuestionSet, labels: I) -> Result<Self, AnswerError>
    where
        I: IntoIterator<Item = (usize, S)>,
        S: AsRef<str>,
    {
        let choices = labels
            .into_iter()
            .map(|(index, raw)| {
                OptionLabel::parse(raw.as_ref())
                    .map(|label| (index, label))
                    .ok_or_else(|| AnswerError::InvalidLabel {
                        index,
                        label: raw.as_ref().to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_choices(questions, choices)
    }

    /// Records (or replaces) the answer for `index`. A blank expression is
    /// stored as an answer without score.
    pub fn record(&mut self, index: usize, expression: impl Into<String>) {
        let expression = expression.into();
        let expression = if expression.trim().is_empty() {
            None
        } else {
            Some(expression)
        };
        self.answers.insert(index, expression);
    }

    pub fn record_blank(&mut self, index: usize) {
        self.answers.insert(index, None);
    }

    pub fn is_answered(&self, index: usize) -> bool {
        self.answers.contains_key(&index)
    }

    pub fn expression(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).and_then(|value| value.as_deref())
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Number of answers whose index falls inside a quiz of `total` questions.
    pub fn answered_within(&self, total: usize) -> usize {
        self.answers.range(..total).count()
    }

    /// Copy holding only the answers that belong to a quiz of `total` questions.
    pub fn within(&self, total: usize) -> Self {
        let answers = self
            .answers
            .range(..total)
            .map(|(index, expression)| (*index, expression.clone()))
            .collect();
        Self { answers }
    }

    pub(crate) fn expressions(&self) -> impl Iterator<Item = (usize, &str)> {
        self.answers
            .iter()
            .filter_map(|(index, expression)| expression.as_deref().map(|expr| (*index, expr)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::domain::{AnswerOption, Question};

    fn questions() -> QuestionSet {
        QuestionSet::new(vec![
            Question {
                text: "Entry or hold?".to_string(),
                options: vec![
                    AnswerOption {
                        label: OptionLabel::A,
                        text: "Entry".to_string(),
                        score_expression: "Duelist:3,Aggro:2".to_string(),
                    },
                    AnswerOption {
                        label: OptionLabel::C,
                        text: "Hold".to_string(),
                        score_expression: "Sentinel:3".to_string(),
                    },
                ],
            },
            Question {
                text: "Comms?".to_string(),
                options: vec![AnswerOption {
                    label: OptionLabel::A,
                    text: "Always".to_string(),
                    score_expression: String::new(),
                }],
            },
        ])
        .expect("valid questions")
    }

    #[test]
    fn from_choices_resolves_score_expressions() {
        let answers =
            AnswerSet::from_choices(&questions(), [(0, OptionLabel::C), (1, OptionLabel::A)])
                .expect("choices resolve");
        assert_eq!(answers.len(), 2);
        assert_eq!(answers.expression(0), Some("Sentinel:3"));
        assert!(answers.is_answered(1));
        assert_eq!(answers.expression(1), None);
    }

    #[test]
    fn from_choices_rejects_unknown_questions_and_labels() {
        let error = AnswerSet::from_choices(&questions(), [(2, OptionLabel::A)])
            .expect_err("out of range");
        assert_eq!(error, AnswerError::UnknownQuestion { index: 2, total: 2 });

        let error = AnswerSet::from_choices(&questions(), [(0, OptionLabel::B)])
            .expect_err("excluded option");
        assert_eq!(
            error,
            AnswerError::UnknownOption {
                index: 0,
                label: OptionLabel::B
            }
        );
    }

    #[test]
    fn from_labels_parses_lenient_label_text() {
        let answers = AnswerSet::from_labels(&questions(), [(0, " c"), (1, "a")])
            .expect("labels resolve");
        assert_eq!(answers.expression(0), Some("Sentinel:3"));

        let error = AnswerSet::from_labels(&questions(), [(0, "Z")]).expect_err("bad label");
        assert_eq!(
            error,
            AnswerError::InvalidLabel {
                index: 0,
                label: "Z".to_string()
            }
        );
    }

    #[test]
    fn record_replaces_previous_answer() {
        let mut answers = AnswerSet::new();
        answers.record(0, "Duelist:1");
        answers.record(0, "Controller:2");
        assert_eq!(answers.len(), 1);
        assert_eq!(answers.expression(0), Some("Controller:2"));
    }

    #[test]
    fn answered_within_ignores_out_of_range_indices() {
        let mut answers = AnswerSet::new();
        answers.record(0, "Duelist:1");
        answers.record_blank(1);
        answers.record(7, "Sentinel:1");
        assert_eq!(answers.answered_within(2), 2);
        assert_eq!(answers.answered_within(8), 3);
    }

    #[test]
    fn within_drops_answers_past_the_last_question() {
        let mut answers = AnswerSet::new();
        answers.record(0, "Duelist:1");
        answers.record_blank(1);
        answers.record(57, "Duelist:1000");

        let kept = answers.within(2);
        assert_eq!(kept.len(), 2);
        assert!(kept.is_answered(1));
        assert!(!kept.is_answered(57));
    }
}
