mod plan;
mod progress;
mod run;
mod selector;
mod service;

// Public API of the session subsystem.
pub use crate::error::{RunError, SelectionError, SessionError};
pub use plan::{SessionResult, select_session};
pub use progress::SessionProgress;
pub use run::QuizRun;
pub use selector::SessionSelector;
pub use service::QuizService;
