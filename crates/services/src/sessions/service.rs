use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use quiz_core::model::{AnswerRecord, Question, QuestionBank, QuizReport, TopicId};

use super::plan::QuizSampler;
use super::progress::QuizProgress;
use crate::error::SessionError;

//
// ─── CHECK OUTCOME ─────────────────────────────────────────────────────────────
//

/// Outcome of checking a single answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedAnswer {
    pub is_correct: bool,
    pub correct_choice: String,
    pub explanation: String,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz state machine for one topic.
///
/// Lifecycle: `Unconfigured → Active ⇄ AnswerPending → … → Complete`, with
/// `restart()` returning to `Unconfigured`. The `seen` set of completed bank
/// indices survives restarts, so consecutive quizzes never repeat a question
/// until the whole bank has been played through.
pub struct QuizSession {
    topic_id: TopicId,
    bank: Arc<QuestionBank>,
    seen: HashSet<usize>,
    question_order: Vec<usize>,
    position: usize,
    history: Vec<AnswerRecord>,
    awaiting_next: bool,
    configured: bool,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Create an unconfigured session over a loaded bank.
    #[must_use]
    pub fn new(topic_id: TopicId, bank: Arc<QuestionBank>) -> Self {
        Self {
            topic_id,
            bank,
            seen: HashSet::new(),
            question_order: Vec::new(),
            position: 0,
            history: Vec::new(),
            awaiting_next: false,
            configured: false,
            started_at: None,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn topic_id(&self) -> &TopicId {
        &self.topic_id
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.configured && self.position >= self.question_order.len()
    }

    /// True after an answer has been checked but before `advance`.
    #[must_use]
    pub fn awaiting_next(&self) -> bool {
        self.awaiting_next
    }

    /// Number of questions this quiz asks.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.question_order.len()
    }

    /// Bank indices completed across quizzes since the last exhaustion reset.
    #[must_use]
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    /// Questions still available for the next `configure` call.
    ///
    /// Accounts for the exhaustion reset: once every bank index has been
    /// seen, the whole bank becomes available again.
    #[must_use]
    pub fn available(&self) -> usize {
        if self.seen.len() >= self.bank.len() {
            self.bank.len()
        } else {
            self.bank.len() - self.seen.len()
        }
    }

    /// Count of correct answers so far, derived from the history.
    #[must_use]
    pub fn score(&self) -> usize {
        self.history.iter().filter(|r| r.is_correct).count()
    }

    #[must_use]
    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns a summary of the current quiz progress.
    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            total: self.selected_count(),
            answered: self.position,
            remaining: self.question_order.len().saturating_sub(self.position),
            score: self.score(),
            is_complete: self.is_complete(),
        }
    }

    /// Configure the session for a new quiz of `requested` questions.
    ///
    /// Draws a uniform random sample of unseen bank indices and resets all
    /// per-quiz state. If the seen set already covers the whole bank it is
    /// cleared first, making every question available again.
    ///
    /// `started_at` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidConfiguration` if `requested` is zero or
    /// exceeds the number of unseen questions. The session is left unchanged
    /// apart from the exhaustion reset.
    pub fn configure(
        &mut self,
        requested: usize,
        started_at: DateTime<Utc>,
    ) -> Result<(), SessionError> {
        if self.seen.len() >= self.bank.len() {
            self.seen.clear();
        }

        let sampler = QuizSampler::new(self.bank.len(), &self.seen);
        let available = sampler.available();
        if requested == 0 || requested > available {
            return Err(SessionError::InvalidConfiguration {
                requested,
                available,
            });
        }

        self.question_order = sampler.draw(requested).order;
        self.position = 0;
        self.history = Vec::new();
        self.awaiting_next = false;
        self.configured = true;
        self.started_at = Some(started_at);
        self.completed_at = None;
        Ok(())
    }

    /// The question at the current position.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotConfigured` before the first `configure`,
    /// or `SessionError::QuizComplete` once every question is answered.
    pub fn current_question(&self) -> Result<&Question, SessionError> {
        if !self.configured {
            return Err(SessionError::NotConfigured);
        }
        let bank_index = *self
            .question_order
            .get(self.position)
            .ok_or(SessionError::QuizComplete)?;
        // Sampled indices always point into the bank.
        self.bank.get(bank_index).ok_or(SessionError::QuizComplete)
    }

    /// Check `user_choice` against the current question.
    ///
    /// Re-checking before `advance` is allowed and overwrites the pending
    /// record in place, so a re-check can never inflate the history or
    /// double-count the score.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NotConfigured` or `SessionError::QuizComplete`
    /// on state machine violations.
    pub fn check_answer(&mut self, user_choice: &str) -> Result<CheckedAnswer, SessionError> {
        let question = self.current_question()?;
        let is_correct = user_choice == question.correct_choice();
        let record = AnswerRecord::new(
            question.prompt(),
            user_choice,
            question.correct_choice(),
            question.explanation(),
            is_correct,
        );
        let outcome = CheckedAnswer {
            is_correct,
            correct_choice: record.correct_choice.clone(),
            explanation: record.explanation.clone(),
        };

        if self.awaiting_next {
            // Re-check: replace the pending record for this position.
            if let Some(pending) = self.history.last_mut() {
                *pending = record;
            }
        } else {
            self.history.push(record);
            self.awaiting_next = true;
        }

        Ok(outcome)
    }

    /// Commit the pending answer and move to the next question.
    ///
    /// Marks the answered bank index as seen. When the last question is
    /// committed the session becomes Complete and `completed_at` is set.
    ///
    /// `now` should come from the services layer clock.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoPendingAnswer` if no check is pending.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<(), SessionError> {
        if !self.awaiting_next {
            return Err(SessionError::NoPendingAnswer);
        }
        if let Some(bank_index) = self.question_order.get(self.position) {
            self.seen.insert(*bank_index);
        }
        self.position += 1;
        self.awaiting_next = false;
        if self.position >= self.question_order.len() {
            self.completed_at = Some(now);
        }
        Ok(())
    }

    /// Reset to Unconfigured, preserving the seen set.
    pub fn restart(&mut self) {
        self.question_order = Vec::new();
        self.position = 0;
        self.history = Vec::new();
        self.awaiting_next = false;
        self.configured = false;
        self.started_at = None;
        self.completed_at = None;
    }

    /// Build the final report for a completed quiz.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::QuizComplete` if the quiz has not finished, or
    /// `SessionError::NotConfigured` before the first `configure`.
    pub fn report(&self) -> Result<QuizReport, SessionError> {
        if !self.configured {
            return Err(SessionError::NotConfigured);
        }
        let (Some(started_at), Some(completed_at)) = (self.started_at, self.completed_at) else {
            return Err(SessionError::QuizComplete);
        };
        Ok(QuizReport::from_records(
            self.topic_id.clone(),
            started_at,
            completed_at,
            self.history.clone(),
        )?)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("topic_id", &self.topic_id)
            .field("bank_len", &self.bank.len())
            .field("seen_len", &self.seen.len())
            .field("selected_count", &self.question_order.len())
            .field("position", &self.position)
            .field("history_len", &self.history.len())
            .field("awaiting_next", &self.awaiting_next)
            .field("configured", &self.configured)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
