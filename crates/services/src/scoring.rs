use quiz_core::model::{ScoreSummary, SessionAnswer};

/// Reduces the answers of a session to a score.
pub struct ScoringTracker;

impl ScoringTracker {
    /// Number of correct answers. Skipped answers never count.
    #[must_use]
    pub fn score(answers: &[SessionAnswer]) -> u32 {
        let correct = answers.iter().filter(|a| a.is_correct()).count();
        u32::try_from(correct).unwrap_or(u32::MAX)
    }

    /// Score plus percentage and performance tier, out of `answers.len()`.
    #[must_use]
    pub fn summarize(answers: &[SessionAnswer]) -> ScoreSummary {
        let total = u32::try_from(answers.len()).unwrap_or(u32::MAX);
        ScoreSummary::clamped(Self::score(answers), total)
    }
}
