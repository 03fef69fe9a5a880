use super::answers::AnswerSet;
use serde::Serialize;

/// Raised when a submission does not cover every question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{answered} of {total} questions answered")]
pub struct IncompleteSubmission {
    pub answered: usize,
    pub total: usize,
}

/// Precondition for scoring: one answer per question.
pub fn ensure_complete(answers: &AnswerSet, total: usize) -> Result<(), IncompleteSubmission> {
    let answered = answers.answered_within(total);
    if answered < total {
        return Err(IncompleteSubmission { answered, total });
    }
    Ok(())
}
