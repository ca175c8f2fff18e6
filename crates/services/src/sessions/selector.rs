use std::sync::Arc;

use rand::Rng;

use quiz_core::model::{QuestionCatalog, QuizSettings, SubjectHistory};
use storage::repository::HistoryStore;

use super::plan::{self, SessionResult};
use crate::error::SelectionError;

/// Selects non-repeating sessions and keeps per-subject history persisted.
///
/// Storage is best-effort: a failed load behaves like an empty history and a
/// failed save still returns the selected questions.
#[derive(Clone)]
pub struct SessionSelector {
    history: Arc<dyn HistoryStore>,
    settings: QuizSettings,
}

impl SessionSelector {
    #[must_use]
    pub fn new(history: Arc<dyn HistoryStore>, settings: QuizSettings) -> Self {
        Self { history, settings }
    }

    /// Select a session for `subject` using the thread-local RNG.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError` if the subject is unknown or has no usable
    /// questions.
    pub async fn select_session(
        &self,
        subject: &str,
        catalog: &QuestionCatalog,
    ) -> Result<SessionResult, SelectionError> {
        plan::subject_questions(catalog, subject)?;
        let mut history = self.load_history(subject).await;
        let result = {
            let mut rng = rand::rng();
            plan::select_session(subject, catalog, &mut history, self.settings, &mut rng)?
        };
        self.commit(subject, &history, &result).await;
        Ok(result)
    }

    /// Select a session with a caller-provided RNG.
    ///
    /// # Errors
    ///
    /// Returns `SelectionError` if the subject is unknown or has no usable
    /// questions.
    pub async fn select_session_with_rng<R: Rng + ?Sized>(
        &self,
        subject: &str,
        catalog: &QuestionCatalog,
        rng: &mut R,
    ) -> Result<SessionResult, SelectionError> {
        plan::subject_questions(catalog, subject)?;
        let mut history = self.load_history(subject).await;
        let result = plan::select_session(subject, catalog, &mut history, self.settings, rng)?;
        self.commit(subject, &history, &result).await;
        Ok(result)
    }

    async fn load_history(&self, subject: &str) -> SubjectHistory {
        match self.history.load(subject).await {
            Ok(history) => history,
            Err(err) => {
                tracing::warn!(%subject, error = %err, "history unavailable, treating as empty");
                SubjectHistory::default()
            }
        }
    }

    async fn commit(&self, subject: &str, history: &SubjectHistory, result: &SessionResult) {
        match result {
            SessionResult::Exhausted => {
                tracing::debug!(%subject, seen = history.len(), "subject exhausted");
            }
            SessionResult::Ready(questions) => {
                tracing::debug!(
                    %subject,
                    selected = questions.len(),
                    seen = history.len(),
                    "session selected"
                );
                if let Err(err) = self.history.save(subject, history).await {
                    tracing::warn!(%subject, error = %err, "failed to persist history");
                }
            }
        }
    }
}
