#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod sessions;

pub use quiz_core::Clock;

pub use app_services::TrainerServices;
pub use error::{SessionError, TrainerError};
pub use sessions::{
    AdvanceOutcome, CheckedAnswer, FinalReview, QuizProgress, QuizSession, ReviewEntry,
    TopicTrainer,
};
