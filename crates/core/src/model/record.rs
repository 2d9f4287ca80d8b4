/// Record of a single checked answer.
///
/// Stores everything the final review screen needs, so the review does not
/// have to reach back into the bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub prompt: String,
    pub user_choice: String,
    pub correct_choice: String,
    pub explanation: String,
    pub is_correct: bool,
}

impl AnswerRecord {
    #[must_use]
    pub fn new(
        prompt: impl Into<String>,
        user_choice: impl Into<String>,
        correct_choice: impl Into<String>,
        explanation: impl Into<String>,
        is_correct: bool,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            user_choice: user_choice.into(),
            correct_choice: correct_choice.into(),
            explanation: explanation.into(),
            is_correct,
        }
    }
}
