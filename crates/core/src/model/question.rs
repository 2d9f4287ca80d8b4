use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question needs at least 2 choices, got {len}")]
    NotEnoughChoices { len: usize },

    #[error("choice {index} cannot be empty")]
    EmptyChoice { index: usize },

    #[error("correct_index {index} is out of range for {len} choices")]
    CorrectIndexOutOfRange { index: usize, len: usize },
}

//
// ─── QUESTION TYPES ────────────────────────────────────────────────────────────
//

/// Unvalidated question shape, as produced by a bank source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub prompt: String,
    pub choices: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
}

impl QuestionDraft {
    /// Validate the draft into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the prompt is blank, fewer than two choices
    /// are given, any choice is blank, or `correct_index` does not point into
    /// the choice list.
    pub fn validate(self) -> Result<Question, QuestionError> {
        if self.prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt);
        }
        if self.choices.len() < 2 {
            return Err(QuestionError::NotEnoughChoices {
                len: self.choices.len(),
            });
        }
        if let Some(index) = self.choices.iter().position(|c| c.trim().is_empty()) {
            return Err(QuestionError::EmptyChoice { index });
        }
        if self.correct_index >= self.choices.len() {
            return Err(QuestionError::CorrectIndexOutOfRange {
                index: self.correct_index,
                len: self.choices.len(),
            });
        }

        Ok(Question {
            prompt: self.prompt,
            choices: self.choices,
            correct_index: self.correct_index,
            explanation: self.explanation,
        })
    }
}

/// A single multiple-choice question. Immutable once validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    choices: Vec<String>,
    correct_index: usize,
    explanation: String,
}

impl Question {
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn choices(&self) -> &[String] {
        &self.choices
    }

    #[must_use]
    pub fn choice(&self, index: usize) -> Option<&str> {
        self.choices.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    /// The text of the correct choice.
    #[must_use]
    pub fn correct_choice(&self) -> &str {
        // correct_index was range-checked at validation time.
        &self.choices[self.correct_index]
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> QuestionDraft {
        QuestionDraft {
            prompt: "What does EBITDA stand for?".into(),
            choices: vec![
                "Earnings Before Interest, Taxes, Depreciation and Amortization".into(),
                "Earnings Based In Total Debt Accrual".into(),
            ],
            correct_index: 0,
            explanation: "EBITDA is a proxy for operating cash generation.".into(),
        }
    }

    #[test]
    fn valid_draft_validates() {
        let q = draft().validate().unwrap();
        assert_eq!(q.correct_index(), 0);
        assert_eq!(
            q.correct_choice(),
            "Earnings Before Interest, Taxes, Depreciation and Amortization"
        );
        assert_eq!(q.choice(1), Some("Earnings Based In Total Debt Accrual"));
        assert_eq!(q.choice(2), None);
    }

    #[test]
    fn fails_if_prompt_blank() {
        let mut d = draft();
        d.prompt = "   ".into();
        assert_eq!(d.validate().unwrap_err(), QuestionError::EmptyPrompt);
    }

    #[test]
    fn fails_with_single_choice() {
        let mut d = draft();
        d.choices.truncate(1);
        assert_eq!(
            d.validate().unwrap_err(),
            QuestionError::NotEnoughChoices { len: 1 }
        );
    }

    #[test]
    fn fails_if_any_choice_blank() {
        let mut d = draft();
        d.choices[1] = " ".into();
        assert_eq!(
            d.validate().unwrap_err(),
            QuestionError::EmptyChoice { index: 1 }
        );
    }

    #[test]
    fn fails_if_correct_index_out_of_range() {
        let mut d = draft();
        d.correct_index = 2;
        assert_eq!(
            d.validate().unwrap_err(),
            QuestionError::CorrectIndexOutOfRange { index: 2, len: 2 }
        );
    }
}
