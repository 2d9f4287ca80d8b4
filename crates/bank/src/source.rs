use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use quiz_core::model::{BankError, QuestionBank, QuestionDraft, QuestionError, TopicId};

/// Errors surfaced by bank sources.
///
/// All variants mean the same thing to the caller: the topic's bank is
/// unavailable. Other topics are unaffected.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("no bank registered for topic {topic}")]
    UnknownTopic { topic: TopicId },

    #[error("bank file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read bank file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed bank data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid question at index {index}: {source}")]
    Question {
        index: usize,
        source: QuestionError,
    },

    #[error(transparent)]
    Bank(#[from] BankError),

    #[error("lock poisoned: {0}")]
    Poisoned(String),
}

/// Raw question shape as it appears in bank data.
///
/// Mirrors the domain `Question` field for field so sources can deserialize
/// without leaking format concerns into the domain layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRecord {
    pub prompt: String,
    pub choices: Vec<String>,
    pub correct_index: usize,
    #[serde(default)]
    pub explanation: String,
}

impl QuestionRecord {
    /// Convert the record into a validated domain `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the record fails domain validation.
    pub fn into_question(self) -> Result<quiz_core::model::Question, QuestionError> {
        QuestionDraft {
            prompt: self.prompt,
            choices: self.choices,
            correct_index: self.correct_index,
            explanation: self.explanation,
        }
        .validate()
    }
}

/// Validate a list of raw records into a non-empty bank.
///
/// # Errors
///
/// Returns `SourceError::Question` naming the first offending record, or
/// `SourceError::Bank` if the list is empty.
pub(crate) fn build_bank(records: Vec<QuestionRecord>) -> Result<QuestionBank, SourceError> {
    let mut questions = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let question = record
            .into_question()
            .map_err(|source| SourceError::Question { index, source })?;
        questions.push(question);
    }
    Ok(QuestionBank::new(questions)?)
}

/// Contract for supplying a topic's question bank.
///
/// Loading happens once per topic at startup; the returned bank is read-only
/// for the life of the process.
pub trait BankSource: Send + Sync {
    /// Load the bank for a topic.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the bank is missing, malformed, or empty.
    fn load(&self, topic: &TopicId) -> Result<QuestionBank, SourceError>;
}

/// Simple in-memory source for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemorySource {
    banks: Arc<Mutex<HashMap<TopicId, Vec<QuestionRecord>>>>,
}

impl InMemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self {
            banks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Register or replace the records for a topic.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn insert(&self, topic: TopicId, records: Vec<QuestionRecord>) {
        let mut guard = self.banks.lock().expect("bank map lock poisoned");
        guard.insert(topic, records);
    }
}

impl BankSource for InMemorySource {
    fn load(&self, topic: &TopicId) -> Result<QuestionBank, SourceError> {
        let guard = self
            .banks
            .lock()
            .map_err(|e| SourceError::Poisoned(e.to_string()))?;
        let records = guard
            .get(topic)
            .cloned()
            .ok_or_else(|| SourceError::UnknownTopic {
                topic: topic.clone(),
            })?;
        drop(guard);
        build_bank(records)
    }
}
