use thiserror::Error;

use crate::model::question::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BankError {
    #[error("question bank cannot be empty")]
    Empty,
}

/// Ordered, read-only collection of questions for one topic.
///
/// Loaded once at startup and indexed by position for the life of the
/// process; sessions refer to questions by bank index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Builds a bank from validated questions.
    ///
    /// # Errors
    ///
    /// Returns `BankError::Empty` if no questions are given.
    pub fn new(questions: Vec<Question>) -> Result<Self, BankError> {
        if questions.is_empty() {
            return Err(BankError::Empty);
        }
        Ok(Self { questions })
    }

    /// Number of questions in the bank. Always at least 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false; an empty bank cannot be constructed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }
}
