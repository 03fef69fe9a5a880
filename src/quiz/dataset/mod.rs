mod normalizer;
mod parser;

use super::domain::QuestionSet;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read question dataset: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid question CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("question dataset contains no questions")]
    Empty,
    #[error("question dataset has {count} questions, at most {max} are supported")]
    TooManyQuestions { count: usize, max: usize },
    #[error("question {question} has no options with text")]
    NoOptions { question: usize },
    #[error("question {question} has {count} options, at most 4 are supported")]
    TooManyOptions { question: usize, count: usize },
}

/// Loads a [`QuestionSet`] from the tabular
/// `question, option_A..option_D, score_A..score_D` export.
pub struct QuestionSetImporter;

impl QuestionSetImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<QuestionSet, DatasetError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let questions = Self::from_reader(file)?;
        info!(path = %path.display(), questions = questions.len(), "question dataset loaded");
        Ok(questions)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<QuestionSet, DatasetError> {
        let questions = parser::parse_questions(reader)?;
        QuestionSet::new(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::domain::OptionLabel;
    use std::io::Cursor;

    const HEADER: &str =
        "question,option_A,option_B,option_C,option_D,score_A,score_B,score_C,score_D\n";

    #[test]
    fn clean_text_strips_invisible_characters_and_collapses_whitespace() {
        let cleaned = normalizer::clean_text_for_tests("\u{feff}Who  takes\u{200b} the   entry?");
        assert_eq!(cleaned, "Who takes the entry?");
    }

    #[test]
    fn importer_reads_options_and_scores_in_label_order() {
        let csv = format!(
            "{HEADER}Where do you play?,Entry,Lurk,Anchor,Smoke,\"Duelist:3,Aggro:2\",Sentinel:1,Sentinel:3,Controller:3\n"
        );
        let questions = QuestionSetImporter::from_reader(Cursor::new(csv)).expect("import");

        assert_eq!(questions.len(), 1);
        let question = questions.get(0).expect("question");
        assert_eq!(question.text, "Where do you play?");
        assert_eq!(question.options.len(), 4);
        assert_eq!(
            question.option(OptionLabel::A).expect("A").score_expression,
            "Duelist:3,Aggro:2"
        );
        assert_eq!(question.option(OptionLabel::D).expect("D").text, "Smoke");
    }

    #[test]
    fn importer_excludes_blank_options_and_keeps_labels() {
        let csv = format!("{HEADER}Pick,Yes,,Maybe,,Aggro:1,Logic:9,Stoic:1,\n");
        let questions = QuestionSetImporter::from_reader(Cursor::new(csv)).expect("import");
        let question = questions.get(0).expect("question");

        let labels: Vec<_> = question.options.iter().map(|option| option.label).collect();
        assert_eq!(labels, vec![OptionLabel::A, OptionLabel::C]);
        assert!(question.option(OptionLabel::B).is_none());
    }

    #[test]
    fn importer_keeps_options_without_scores() {
        let csv = format!("{HEADER}Pick,Yes,No,,,,Logic:1,,\n");
        let questions = QuestionSetImporter::from_reader(Cursor::new(csv)).expect("import");
        let question = questions.get(0).expect("question");
        assert_eq!(question.option(OptionLabel::A).expect("A").score_expression, "");
    }

    #[test]
    fn importer_accepts_missing_trailing_columns() {
        let csv = "question,option_A,score_A\nOnly one,Sure,Teamwork:2\n";
        let questions = QuestionSetImporter::from_reader(Cursor::new(csv)).expect("import");
        assert_eq!(questions.get(0).expect("question").options.len(), 1);
    }

    #[test]
    fn importer_skips_blank_rows() {
        let csv = format!("{HEADER},,,,,,,,\nReal,One,,,,Aggro:1,,,\n");
        let questions = QuestionSetImporter::from_reader(Cursor::new(csv)).expect("import");
        assert_eq!(questions.len(), 1);
    }

    #[test]
    fn importer_rejects_question_without_options() {
        let csv = format!("{HEADER}First,One,,,,Aggro:1,,,\nSecond,,,,,Aggro:1,,,\n");
        let error = QuestionSetImporter::from_reader(Cursor::new(csv)).expect_err("invalid");
        assert!(matches!(error, DatasetError::NoOptions { question: 2 }));
    }

    #[test]
    fn importer_rejects_empty_dataset() {
        let error = QuestionSetImporter::from_reader(Cursor::new(HEADER)).expect_err("empty");
        assert!(matches!(error, DatasetError::Empty));
    }

    #[test]
    fn importer_from_path_propagates_io_errors() {
        let error = QuestionSetImporter::from_path("./does-not-exist.csv").expect_err("io error");
        match error {
            DatasetError::Io(_) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
