use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizSettingsError {
    #[error("session size must be > 0")]
    InvalidSessionSize,
}

/// Tunables for quiz sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    session_size: u32,
}

impl QuizSettings {
    /// Questions served per session unless configured otherwise.
    pub const DEFAULT_SESSION_SIZE: u32 = 10;

    /// Creates validated settings.
    ///
    /// # Errors
    ///
    /// Returns `QuizSettingsError::InvalidSessionSize` if `session_size` is zero.
    pub fn new(session_size: u32) -> Result<Self, QuizSettingsError> {
        if session_size == 0 {
            return Err(QuizSettingsError::InvalidSessionSize);
        }
        Ok(Self { session_size })
    }

    #[must_use]
    pub fn session_size(&self) -> u32 {
        self.session_size
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            session_size: Self::DEFAULT_SESSION_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_serves_ten_questions() {
        assert_eq!(QuizSettings::default().session_size(), 10);
    }

    #[test]
    fn zero_session_size_is_rejected() {
        assert_eq!(
            QuizSettings::new(0).unwrap_err(),
            QuizSettingsError::InvalidSessionSize
        );
        assert_eq!(QuizSettings::new(3).unwrap().session_size(), 3);
    }
}
