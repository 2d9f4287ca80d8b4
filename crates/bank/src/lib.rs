#![forbid(unsafe_code)]

pub mod json;
pub mod source;

pub use json::JsonBankSource;
pub use source::{BankSource, InMemorySource, QuestionRecord, SourceError};
