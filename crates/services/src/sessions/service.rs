use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{
    QuestionCatalog, QuizResult, QuizSettings, ScoreSummary, SessionAnswer,
};
use storage::repository::{HistoryStore, ResultRepository, Storage};

use super::plan::SessionResult;
use super::run::QuizRun;
use super::selector::SessionSelector;
use crate::error::SessionError;
use crate::scoring::ScoringTracker;

/// Session API consumed by a presentation layer.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    catalog: Arc<QuestionCatalog>,
    selector: SessionSelector,
    history: Arc<dyn HistoryStore>,
    results: Arc<dyn ResultRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(
        clock: Clock,
        catalog: Arc<QuestionCatalog>,
        history: Arc<dyn HistoryStore>,
        results: Arc<dyn ResultRepository>,
        settings: QuizSettings,
    ) -> Self {
        Self {
            clock,
            catalog,
            selector: SessionSelector::new(Arc::clone(&history), settings),
            history,
            results,
        }
    }

    /// Build the service on top of a `Storage` bundle.
    #[must_use]
    pub fn from_storage(
        clock: Clock,
        catalog: Arc<QuestionCatalog>,
        storage: &Storage,
        settings: QuizSettings,
    ) -> Self {
        Self::new(
            clock,
            catalog,
            Arc::clone(&storage.history),
            Arc::clone(&storage.results),
            settings,
        )
    }

    #[must_use]
    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    /// Subjects that have at least one playable question.
    #[must_use]
    pub fn subjects(&self) -> Vec<&str> {
        self.catalog.subjects()
    }

    /// Select unseen questions for `subject` and record them as served.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Selection` for unknown or empty subjects.
    pub async fn select_session(&self, subject: &str) -> Result<SessionResult, SessionError> {
        Ok(self.selector.select_session(subject, &self.catalog).await?)
    }

    /// Select a session and wrap it in a `QuizRun`. `None` means exhausted.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Selection` for unknown or empty subjects.
    pub async fn start_run(&self, subject: &str) -> Result<Option<QuizRun>, SessionError> {
        match self.select_session(subject).await? {
            SessionResult::Exhausted => Ok(None),
            SessionResult::Ready(questions) => Ok(Some(QuizRun::new(subject, questions)?)),
        }
    }

    #[must_use]
    pub fn score(&self, answers: &[SessionAnswer]) -> u32 {
        ScoringTracker::score(answers)
    }

    /// Score a completed run and record it on the leaderboard.
    ///
    /// A failure to record the result is logged and does not fail the call.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Incomplete` if the run still has questions.
    pub async fn finish_run(&self, run: &QuizRun) -> Result<ScoreSummary, SessionError> {
        if !run.is_complete() {
            return Err(SessionError::Incomplete);
        }
        let summary = run.summary();
        let result = QuizResult::new(run.subject(), summary, self.clock.now())?;
        if let Err(err) = self.results.append_result(&result).await {
            tracing::warn!(subject = run.subject(), error = %err, "failed to record result");
        }
        Ok(summary)
    }

    /// Forget which questions of `subject` were served.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the history could not be cleared.
    pub async fn reset_subject_progress(&self, subject: &str) -> Result<(), SessionError> {
        self.history.reset(subject).await.map_err(|err| {
            tracing::warn!(%subject, error = %err, "failed to reset progress");
            err
        })?;
        tracing::info!(%subject, "subject progress reset");
        Ok(())
    }

    /// Recorded results, newest first.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if results cannot be read.
    pub async fn leaderboard(
        &self,
        subject: Option<&str>,
        limit: u32,
    ) -> Result<Vec<QuizResult>, SessionError> {
        Ok(self.results.list_results(subject, limit).await?)
    }
}
