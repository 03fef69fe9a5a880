use super::normalizer::{clean_expression, clean_text};
use crate::quiz::domain::{AnswerOption, OptionLabel, Question};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// Parses `question, option_A..option_D, score_A..score_D` rows. Rows with a
/// blank question are dropped; options with blank text are excluded.
pub(crate) fn parse_questions<R: Read>(reader: R) -> Result<Vec<Question>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut questions = Vec::new();

    for record in csv_reader.deserialize::<QuestionRow>() {
        let row = record?;
        if let Some(question) = row.into_question() {
            questions.push(question);
        }
    }

    Ok(questions)
}

#[derive(Debug, Deserialize)]
struct QuestionRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    question: Option<String>,
    #[serde(rename = "option_A", default, deserialize_with = "empty_string_as_none")]
    option_a: Option<String>,
    #[serde(rename = "option_B", default, deserialize_with = "empty_string_as_none")]
    option_b: Option<String>,
    #[serde(rename = "option_C", default, deserialize_with = "empty_string_as_none")]
    option_c: Option<String>,
    #[serde(rename = "option_D", default, deserialize_with = "empty_string_as_none")]
    option_d: Option<String>,
    #[serde(rename = "score_A", default, deserialize_with = "empty_string_as_none")]
    score_a: Option<String>,
    #[serde(rename = "score_B", default, deserialize_with = "empty_string_as_none")]
    score_b: Option<String>,
    #[serde(rename = "score_C", default, deserialize_with = "empty_string_as_none")]
    score_c: Option<String>,
    #[serde(rename = "score_D", default, deserialize_with = "empty_string_as_none")]
    score_d: Option<String>,
}

impl QuestionRow {
    fn into_question(self) -> Option<Question> {
        let text = clean_text(self.question.as_deref()?);
        if text.is_empty() {
            return None;
        }

        let cells = [
            (self.option_a, self.score_a),
            (self.option_b, self.score_b),
            (self.option_c, self.score_c),
            (self.option_d, self.score_d),
        ];

        let options = OptionLabel::ordered()
            .into_iter()
            .zip(cells)
            .filter_map(|(label, (text, score))| {
                let text = clean_text(text.as_deref()?);
                if text.is_empty() {
                    return None;
                }
                Some(AnswerOption {
                    label,
                    text,
                    score_expression: score.as_deref().map(clean_expression).unwrap_or_default(),
                })
            })
            .collect();

        Some(Question { text, options })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
