//! Shared error types for the services crate.

use thiserror::Error;

use anzan_core::model::QuizResultError;
use storage::repository::StorageError;

/// Errors emitted by the quiz services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("unknown grade: {name}")]
    UnknownGrade { name: String },
    #[error("no quiz session in progress")]
    NotStarted,
    #[error("quiz session already completed")]
    Completed,
    #[error("quiz session still has unanswered questions")]
    Incomplete,
    #[error("invalid persisted session state: {0}")]
    InvalidState(String),
    #[error(transparent)]
    Result(#[from] QuizResultError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
