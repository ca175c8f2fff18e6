#![forbid(unsafe_code)]

pub mod error;
pub mod scoring;
pub mod sessions;

pub use quiz_core::Clock;

pub use error::{RunError, SelectionError, SessionError};
pub use scoring::ScoringTracker;
pub use sessions::{
    QuizRun, QuizService, SessionProgress, SessionResult, SessionSelector, select_session,
};
