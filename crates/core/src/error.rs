use thiserror::Error;

use crate::model::{BankError, QuestionError, ReportError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Bank(#[from] BankError),
    #[error(transparent)]
    Report(#[from] ReportError),
}
