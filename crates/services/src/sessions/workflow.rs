use std::sync::Arc;

use question_bank::BankSource;
use quiz_core::model::{Question, QuizReport, TopicId};

use super::progress::QuizProgress;
use super::service::{CheckedAnswer, QuizSession};
use crate::Clock;
use crate::error::{SessionError, TrainerError};

/// Result of committing an answer via `advance`.
#[derive(Debug, Clone, PartialEq)]
pub struct AdvanceOutcome {
    pub progress: QuizProgress,
    /// Present once the quiz has just completed.
    pub report: Option<QuizReport>,
}

/// Orchestrates one topic's quiz lifecycle.
///
/// Performs the one-shot bank load, owns the time source, and forwards the
/// four controller operations into the session. One trainer per topic;
/// trainers share nothing, so a failure here never affects another topic.
#[derive(Debug)]
pub struct TopicTrainer {
    clock: Clock,
    session: QuizSession,
}

impl TopicTrainer {
    /// Load the topic's bank from `source` and create an unconfigured trainer.
    ///
    /// # Errors
    ///
    /// Returns `TrainerError::BankUnavailable` if the bank cannot be loaded.
    pub fn load(
        source: &dyn BankSource,
        topic_id: TopicId,
        clock: Clock,
    ) -> Result<Self, TrainerError> {
        let bank = source
            .load(&topic_id)
            .map_err(|source| TrainerError::BankUnavailable {
                topic: topic_id.clone(),
                source,
            })?;
        Ok(Self {
            clock,
            session: QuizSession::new(topic_id, Arc::new(bank)),
        })
    }

    #[must_use]
    pub fn topic_id(&self) -> &TopicId {
        self.session.topic_id()
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Start a quiz of `requested` questions.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidConfiguration` if the count is out of
    /// range for the unseen pool.
    pub fn start(&mut self, requested: usize) -> Result<QuizProgress, SessionError> {
        let started_at = self.clock.now();
        self.session.configure(requested, started_at)?;
        Ok(self.session.progress())
    }

    /// The question currently on screen.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` on state machine violations.
    pub fn current_question(&self) -> Result<&Question, SessionError> {
        self.session.current_question()
    }

    /// Check the user's choice against the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError` on state machine violations.
    pub fn check(&mut self, user_choice: &str) -> Result<CheckedAnswer, SessionError> {
        self.session.check_answer(user_choice)
    }

    /// Commit the pending answer and move on; yields the report when the
    /// quiz just completed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoPendingAnswer` without a prior check.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, SessionError> {
        let now = self.clock.now();
        self.session.advance(now)?;
        let report = if self.session.is_complete() {
            Some(self.session.report()?)
        } else {
            None
        };
        Ok(AdvanceOutcome {
            progress: self.session.progress(),
            report,
        })
    }

    /// Abandon the current quiz, keeping the cross-quiz seen set.
    pub fn restart(&mut self) {
        self.session.restart();
    }
}
