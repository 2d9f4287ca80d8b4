use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing a topic identifier.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TopicIdError {
    #[error("topic id cannot be empty")]
    Empty,

    #[error("topic id contains invalid character {ch:?}")]
    InvalidChar { ch: char },
}

/// Identifier for a quiz topic, e.g. `mna` or `real-estate`.
///
/// Topic ids double as bank file stems, so they are restricted to a slug
/// alphabet: ASCII lowercase, digits, and `-`.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TopicId(String);

impl TopicId {
    /// Creates a new `TopicId` from a slug.
    ///
    /// # Errors
    ///
    /// Returns `TopicIdError` if the slug is empty or contains a character
    /// outside `[a-z0-9-]`.
    pub fn new(slug: impl Into<String>) -> Result<Self, TopicIdError> {
        let slug = slug.into();
        if slug.is_empty() {
            return Err(TopicIdError::Empty);
        }
        if let Some(ch) = slug
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(TopicIdError::InvalidChar { ch });
        }
        Ok(Self(slug))
    }

    /// Returns the underlying slug.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TopicId({})", self.0)
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TopicId {
    type Err = TopicIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TopicId {
    type Error = TopicIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<TopicId> for String {
    fn from(id: TopicId) -> Self {
        id.0
    }
}
