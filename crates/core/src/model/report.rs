use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{AnswerRecord, TopicId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReportError {
    #[error("completed_at is before started_at")]
    InvalidTimeRange,

    #[error("too many records for a single quiz: {len}")]
    TooManyRecords { len: usize },
}

/// Aggregate result for a completed quiz.
///
/// `correct` is derived from the records at construction time, so a report
/// can never disagree with its own answer history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizReport {
    topic_id: TopicId,
    started_at: DateTime<Utc>,
    completed_at: DateTime<Utc>,
    total: u32,
    correct: u32,
    records: Vec<AnswerRecord>,
}

impl QuizReport {
    /// Build a report from the answer history of a finished quiz.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidTimeRange` if `completed_at` is before
    /// `started_at`, or `ReportError::TooManyRecords` if the record count
    /// cannot fit in `u32`.
    pub fn from_records(
        topic_id: TopicId,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
        records: Vec<AnswerRecord>,
    ) -> Result<Self, ReportError> {
        if completed_at < started_at {
            return Err(ReportError::InvalidTimeRange);
        }
        let total = u32::try_from(records.len())
            .map_err(|_| ReportError::TooManyRecords { len: records.len() })?;
        let correct = records.iter().filter(|r| r.is_correct).count() as u32;

        Ok(Self {
            topic_id,
            started_at,
            completed_at,
            total,
            correct,
            records,
        })
    }

    #[must_use]
    pub fn topic_id(&self) -> &TopicId {
        &self.topic_id
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }
}
