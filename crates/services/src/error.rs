//! Shared error types for the services crate.

use thiserror::Error;

use question_bank::SourceError;
use quiz_core::model::{ReportError, TopicId};

/// Errors emitted by the quiz session state machine.
///
/// `NotConfigured`, `QuizComplete`, and `NoPendingAnswer` are contract
/// violations: a presentation layer that follows the state machine never
/// triggers them. `InvalidConfiguration` is an ordinary validation failure
/// and leaves the session untouched.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("quiz has not been configured")]
    NotConfigured,

    #[error("requested {requested} questions but only {available} are available")]
    InvalidConfiguration { requested: usize, available: usize },

    #[error("quiz is already complete")]
    QuizComplete,

    #[error("no answer is pending; check an answer before advancing")]
    NoPendingAnswer,

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Errors emitted while setting up topic trainers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrainerError {
    #[error("question bank unavailable for topic {topic}")]
    BankUnavailable {
        topic: TopicId,
        #[source]
        source: SourceError,
    },
}
