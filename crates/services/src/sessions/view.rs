use chrono::{DateTime, Utc};

use quiz_core::model::{AnswerRecord, QuizReport, TopicId};

/// One line of the final review screen.
///
/// This is intentionally **not** a UI view-model:
/// - no pre-formatted strings
/// - no localization assumptions
///
/// The presentation layer may format, colorize, or localize as needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewEntry {
    /// 1-based question number within the quiz.
    pub number: usize,
    pub prompt: String,
    pub user_choice: String,
    pub correct_choice: String,
    pub explanation: String,
    pub is_correct: bool,
}

impl ReviewEntry {
    #[must_use]
    pub fn from_record(number: usize, record: &AnswerRecord) -> Self {
        Self {
            number,
            prompt: record.prompt.clone(),
            user_choice: record.user_choice.clone(),
            correct_choice: record.correct_choice.clone(),
            explanation: record.explanation.clone(),
            is_correct: record.is_correct,
        }
    }
}

/// Presentation-agnostic final review for a completed quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalReview {
    pub topic_id: TopicId,
    pub score: u32,
    pub total: u32,
    pub completed_at: DateTime<Utc>,
    pub entries: Vec<ReviewEntry>,
}

impl FinalReview {
    #[must_use]
    pub fn from_report(report: &QuizReport) -> Self {
        let entries = report
            .records()
            .iter()
            .enumerate()
            .map(|(i, record)| ReviewEntry::from_record(i + 1, record))
            .collect();
        Self {
            topic_id: report.topic_id().clone(),
            score: report.correct(),
            total: report.total(),
            completed_at: report.completed_at(),
            entries,
        }
    }
}
