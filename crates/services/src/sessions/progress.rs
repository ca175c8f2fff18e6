/// Aggregated view of run progress, useful for a presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    /// Share of answered questions, 0..=100.
    #[must_use]
    pub fn percent_complete(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        let pct = self.answered.saturating_mul(100) / self.total;
        u32::try_from(pct).unwrap_or(100)
    }
}
