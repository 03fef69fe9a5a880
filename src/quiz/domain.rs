use super::dataset::DatasetError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound on the size of a question set.
pub const MAX_QUESTIONS: usize = 100;

/// Upper bound on the number of options offered by a single question.
pub const MAX_OPTIONS: usize = 4;

/// Column letter identifying an option within a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OptionLabel {
    A,
    B,
    C,
    D,
}

impl OptionLabel {
    pub const fn ordered() -> [Self; MAX_OPTIONS] {
        [Self::A, Self::B, Self::C, Self::D]
    }

    pub const fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }

    /// Accepts a single letter, case-insensitive, surrounding whitespace ignored.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "A" => Some(Self::A),
            "B" => Some(Self::B),
            "C" => Some(Self::C),
            "D" => Some(Self::D),
            _ => None,
        }
    }
}

impl fmt::Display for OptionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub label: OptionLabel,
    pub text: String,
    pub score_expression: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn option(&self, label: OptionLabel) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.label == label)
    }
}

/// Ordered, validated collection of questions.
///
/// Every question carries between one and [`MAX_OPTIONS`] options and the set
/// holds between one and [`MAX_QUESTIONS`] questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    pub fn new(questions: Vec<Question>) -> Result<Self, DatasetError> {
        if questions.is_empty() {
            return Err(DatasetError::Empty);
        }
        if questions.len() > MAX_QUESTIONS {
            return Err(DatasetError::TooManyQuestions {
                count: questions.len(),
                max: MAX_QUESTIONS,
            });
        }

        for (index, question) in questions.iter().enumerate() {
            if question.options.is_empty() {
                return Err(DatasetError::NoOptions {
                    question: index + 1,
                });
            }
            if question.options.len() > MAX_OPTIONS {
                return Err(DatasetError::TooManyOptions {
                    question: index + 1,
                    count: question.options.len(),
                });
            }
        }

        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}

/// Gameplay roles competing for the best-fit recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Duelist,
    Initiator,
    Controller,
    Sentinel,
}

impl Role {
    /// Canonical order; earlier roles win ties.
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Duelist,
            Self::Initiator,
            Self::Controller,
            Self::Sentinel,
        ]
    }

    /// Tally category the role reads its score from.
    pub const fn category(self) -> &'static str {
        match self {
            Self::Duelist => "Duelist",
            Self::Initiator => "Initiator",
            Self::Controller => "Controller",
            Self::Sentinel => "Sentinel",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.category())
    }
}

/// Binary personality dimensions, in type-code order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Aggressiveness,
    ThinkingStyle,
    Temperament,
    TeamOrientation,
}

impl Axis {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Aggressiveness,
            Self::ThinkingStyle,
            Self::Temperament,
            Self::TeamOrientation,
        ]
    }

    pub const fn category(self) -> &'static str {
        match self {
            Self::Aggressiveness => "Aggro",
            Self::ThinkingStyle => "Logic",
            Self::Temperament => "Stoic",
            Self::TeamOrientation => "Teamwork",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Aggressiveness => "Aggressiveness",
            Self::ThinkingStyle => "Thinking style",
            Self::Temperament => "Temperament",
            Self::TeamOrientation => "Team orientation",
        }
    }

    pub const fn high_label(self) -> &'static str {
        match self {
            Self::Aggressiveness => "Aggressive",
            Self::ThinkingStyle => "Logical",
            Self::Temperament => "Stoic",
            Self::TeamOrientation => "Teamwork",
        }
    }

    pub const fn low_label(self) -> &'static str {
        match self {
            Self::Aggressiveness => "Patient",
            Self::ThinkingStyle => "Intuitive",
            Self::Temperament => "Expressive",
            Self::TeamOrientation => "Carry",
        }
    }

    pub const fn high_letter(self) -> char {
        match self {
            Self::Aggressiveness => 'A',
            Self::ThinkingStyle => 'L',
            Self::Temperament => 'S',
            Self::TeamOrientation => 'T',
        }
    }

    pub const fn low_letter(self) -> char {
        match self {
            Self::Aggressiveness => 'P',
            Self::ThinkingStyle => 'I',
            Self::Temperament => 'E',
            Self::TeamOrientation => 'C',
        }
    }
}

/// Categories every tally starts with: roles first, then axes.
pub const SEED_CATEGORIES: [&str; 8] = [
    Role::Duelist.category(),
    Role::Initiator.category(),
    Role::Controller.category(),
    Role::Sentinel.category(),
    Axis::Aggressiveness.category(),
    Axis::ThinkingStyle.category(),
    Axis::Temperament.category(),
    Axis::TeamOrientation.category(),
];

/// Four-letter classification code, one letter per [`Axis`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TypeCode(String);

impl TypeCode {
    pub(crate) fn from_letters(letters: [char; 4]) -> Self {
        Self(letters.iter().collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static descriptive content attached to a type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResultProfile {
    pub title: &'static str,
    pub description: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advice: Option<&'static str>,
}

/// Static descriptive content attached to a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleProfile {
    pub role: Role,
    pub summary: &'static str,
    pub example_agents: &'static [&'static str],
}
