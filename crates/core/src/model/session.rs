use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizResultError {
    #[error("score ({score}) exceeds question count ({total})")]
    ScoreExceedsTotal { score: u32, total: u32 },

    #[error("subject cannot be empty")]
    EmptySubject,
}

/// Feedback tier derived from the percentage score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Performance {
    /// 90% and above.
    Outstanding,
    /// 70% to 89%.
    GreatJob,
    /// 50% to 69%.
    GoodEffort,
    /// Below 50%.
    KeepLearning,
}

impl Performance {
    #[must_use]
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            90.. => Self::Outstanding,
            70..=89 => Self::GreatJob,
            50..=69 => Self::GoodEffort,
            _ => Self::KeepLearning,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Outstanding => "Outstanding!",
            Self::GreatJob => "Great Job!",
            Self::GoodEffort => "Good Effort!",
            Self::KeepLearning => "Keep Learning!",
        }
    }
}

/// Score of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreSummary {
    score: u32,
    total: u32,
}

impl ScoreSummary {
    /// # Errors
    ///
    /// Returns `QuizResultError::ScoreExceedsTotal` if `score > total`.
    pub fn new(score: u32, total: u32) -> Result<Self, QuizResultError> {
        if score > total {
            return Err(QuizResultError::ScoreExceedsTotal { score, total });
        }
        Ok(Self { score, total })
    }

    /// Like `new`, but caps `score` at `total` instead of failing.
    #[must_use]
    pub fn clamped(score: u32, total: u32) -> Self {
        Self {
            score: score.min(total),
            total,
        }
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    /// Rounded percentage, 0 for an empty session.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let scaled = u64::from(self.score) * 200 + u64::from(self.total);
        let pct = scaled / (u64::from(self.total) * 2);
        u32::try_from(pct).unwrap_or(100)
    }

    #[must_use]
    pub fn performance(&self) -> Performance {
        Performance::from_percentage(self.percentage())
    }
}

/// Leaderboard entry for a completed session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    subject: String,
    summary: ScoreSummary,
    completed_at: DateTime<Utc>,
}

impl QuizResult {
    /// # Errors
    ///
    /// Returns `QuizResultError::EmptySubject` if the subject is blank.
    pub fn new(
        subject: impl Into<String>,
        summary: ScoreSummary,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, QuizResultError> {
        let subject = subject.into();
        if subject.trim().is_empty() {
            return Err(QuizResultError::EmptySubject);
        }
        Ok(Self {
            subject,
            summary,
            completed_at,
        })
    }

    /// Rehydrate a result from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `QuizResultError` if the stored values are inconsistent.
    pub fn from_persisted(
        subject: String,
        score: u32,
        total: u32,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, QuizResultError> {
        Self::new(subject, ScoreSummary::new(score, total)?, completed_at)
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn summary(&self) -> ScoreSummary {
        self.summary
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.summary.score()
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.summary.total()
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }
}
