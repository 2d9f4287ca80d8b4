use std::fs;
use std::path::{Path, PathBuf};

use quiz_core::model::{QuestionBank, TopicId};

use crate::source::{BankSource, QuestionRecord, SourceError, build_bank};

/// Bank source reading one JSON file per topic from a directory.
///
/// The file for topic `mna` is `<dir>/mna.json`: a JSON array of
/// `QuestionRecord` objects. This is the declarative replacement for the
/// original executable question file.
#[derive(Debug, Clone)]
pub struct JsonBankSource {
    dir: PathBuf,
}

impl JsonBankSource {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn bank_path(&self, topic: &TopicId) -> PathBuf {
        self.dir.join(format!("{topic}.json"))
    }
}

impl BankSource for JsonBankSource {
    fn load(&self, topic: &TopicId) -> Result<QuestionBank, SourceError> {
        let path = self.bank_path(topic);
        if !path.is_file() {
            return Err(SourceError::FileNotFound { path });
        }
        let raw = fs::read_to_string(&path)?;
        let records: Vec<QuestionRecord> = serde_json::from_str(&raw)?;
        build_bank(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> JsonBankSource {
        JsonBankSource::new(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
    }

    #[test]
    fn loads_valid_bank_file() {
        let bank = fixtures().load(&TopicId::new("valuation").unwrap()).unwrap();
        assert_eq!(bank.len(), 3);
        assert_eq!(
            bank.get(0).unwrap().prompt(),
            "Which multiple divides enterprise value by EBITDA?"
        );
    }

    #[test]
    fn missing_file_fails_with_path() {
        let err = fixtures()
            .load(&TopicId::new("nonexistent").unwrap())
            .unwrap_err();
        match err {
            SourceError::FileNotFound { path } => {
                assert!(path.ends_with("nonexistent.json"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn malformed_json_fails_to_parse() {
        let err = fixtures()
            .load(&TopicId::new("malformed").unwrap())
            .unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn out_of_range_correct_index_fails() {
        let err = fixtures()
            .load(&TopicId::new("bad-index").unwrap())
            .unwrap_err();
        assert!(matches!(err, SourceError::Question { index: 0, .. }));
    }

    #[test]
    fn empty_array_fails() {
        let err = fixtures().load(&TopicId::new("empty").unwrap()).unwrap_err();
        assert!(matches!(err, SourceError::Bank(_)));
    }
}
