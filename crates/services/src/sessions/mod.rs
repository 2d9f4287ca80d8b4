mod plan;
mod progress;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use progress::QuizProgress;
pub use service::{CheckedAnswer, QuizSession};
pub use view::{FinalReview, ReviewEntry};
pub use workflow::{AdvanceOutcome, TopicTrainer};
