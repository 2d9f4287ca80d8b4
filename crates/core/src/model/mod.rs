mod bank;
mod ids;
mod question;
mod record;
mod report;

pub use bank::{BankError, QuestionBank};
pub use ids::{TopicId, TopicIdError};
pub use question::{Question, QuestionDraft, QuestionError};
pub use record::AnswerRecord;
pub use report::{QuizReport, ReportError};
