//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuizResultError;
use storage::repository::StorageError;

/// Reasons a session cannot be selected for a subject.
///
/// An exhausted subject is not an error; see `SessionResult::Exhausted`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectionError {
    #[error("subject {0:?} is not in the catalog")]
    InvalidSubject(String),
    #[error("subject {0:?} has no usable questions")]
    EmptyCatalog(String),
}

/// Errors emitted while stepping through a `QuizRun`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RunError {
    #[error("a run needs at least one question")]
    NoQuestions,
    #[error("run already completed")]
    Completed,
    #[error("no option selected for the current question")]
    NoSelection,
    #[error("{0:?} is not an option of the current question")]
    UnknownOption(String),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SessionError {
    #[error("run is not complete yet")]
    Incomplete,
    #[error(transparent)]
    Selection(#[from] SelectionError),
    #[error(transparent)]
    Run(#[from] RunError),
    #[error(transparent)]
    Result(#[from] QuizResultError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
