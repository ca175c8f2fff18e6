use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Question, QuestionCatalog, QuizSettings, SubjectHistory};

use crate::error::SelectionError;

/// Outcome of selecting questions for a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionResult {
    /// Unseen questions were found; the list is never empty.
    Ready(Vec<Question>),
    /// Every question of the subject is already in history.
    Exhausted,
}

impl SessionResult {
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        matches!(self, SessionResult::Exhausted)
    }

    /// Selected questions, empty when exhausted.
    #[must_use]
    pub fn questions(&self) -> &[Question] {
        match self {
            SessionResult::Ready(questions) => questions,
            SessionResult::Exhausted => &[],
        }
    }
}

/// Questions for `subject`, rejecting unknown or empty subjects.
pub(crate) fn subject_questions<'a>(
    catalog: &'a QuestionCatalog,
    subject: &str,
) -> Result<&'a [Question], SelectionError> {
    let questions = catalog
        .questions(subject)
        .ok_or_else(|| SelectionError::InvalidSubject(subject.to_owned()))?;
    if questions.is_empty() {
        return Err(SelectionError::EmptyCatalog(subject.to_owned()));
    }
    Ok(questions)
}

/// Pick up to `settings.session_size()` unseen questions in uniformly random order.
///
/// On `Ready`, the selected ids are merged into `history`. On `Exhausted` or
/// error, `history` is left untouched.
///
/// # Errors
///
/// Returns `SelectionError::InvalidSubject` if the subject is not in the
/// catalog, or `SelectionError::EmptyCatalog` if it has no usable questions.
pub fn select_session<R: Rng + ?Sized>(
    subject: &str,
    catalog: &QuestionCatalog,
    history: &mut SubjectHistory,
    settings: QuizSettings,
    rng: &mut R,
) -> Result<SessionResult, SelectionError> {
    let questions = subject_questions(catalog, subject)?;

    let mut unseen: Vec<&Question> = questions
        .iter()
        .filter(|q| !history.contains(q.id()))
        .collect();
    if unseen.is_empty() {
        return Ok(SessionResult::Exhausted);
    }

    unseen.shuffle(rng);
    let take = usize::try_from(settings.session_size()).unwrap_or(usize::MAX);
    let selected: Vec<Question> = unseen.into_iter().take(take).cloned().collect();

    history.merge(selected.iter().map(|q| q.id().clone()));
    Ok(SessionResult::Ready(selected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AnswerKey, QuestionId};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::{HashMap, HashSet};

    fn question(id: u64) -> Question {
        Question::new(
            QuestionId::from(id),
            format!("Question {id}"),
            vec!["a".into(), "b".into()],
            &AnswerKey::Index(0),
        )
        .unwrap()
    }

    fn catalog(subject: &str, n: u64) -> QuestionCatalog {
        let mut catalog = QuestionCatalog::new();
        catalog.insert_subject(subject, (1..=n).map(question).collect());
        catalog
    }

    fn ten() -> QuizSettings {
        QuizSettings::default()
    }

    fn one() -> QuizSettings {
        QuizSettings::new(1).unwrap()
    }

    fn ids(result: &SessionResult) -> HashSet<QuestionId> {
        result.questions().iter().map(|q| q.id().clone()).collect()
    }

    #[test]
    fn selects_min_of_size_and_catalog() {
        let mut rng = StdRng::seed_from_u64(1);
        for n in [1_u64, 5, 10, 25] {
            let catalog = catalog("python", n);
            let mut history = SubjectHistory::new();
            let result = select_session("python", &catalog, &mut history, ten(), &mut rng).unwrap();
            let expected = usize::try_from(n.min(10)).unwrap();
            assert_eq!(result.questions().len(), expected);
            assert_eq!(ids(&result).len(), expected);
            assert_eq!(history.len(), expected);
        }
    }

    #[test]
    fn never_repeats_until_exhausted() {
        let catalog = catalog("python", 12);
        let mut history = SubjectHistory::new();
        let mut rng = StdRng::seed_from_u64(42);

        let first = select_session("python", &catalog, &mut history, ten(), &mut rng).unwrap();
        let second = select_session("python", &catalog, &mut history, ten(), &mut rng).unwrap();
        let third = select_session("python", &catalog, &mut history, ten(), &mut rng).unwrap();

        assert_eq!(first.questions().len(), 10);
        assert_eq!(second.questions().len(), 2);
        assert!(ids(&first).is_disjoint(&ids(&second)));
        assert!(third.is_exhausted());
        assert_eq!(history.len(), 12);
    }

    #[test]
    fn exhausted_leaves_history_unchanged() {
        let catalog = catalog("python", 2);
        let mut history: SubjectHistory = [1_u64, 2].into_iter().map(QuestionId::from).collect();
        let before = history.clone();
        let mut rng = StdRng::seed_from_u64(0);

        let result = select_session("python", &catalog, &mut history, ten(), &mut rng).unwrap();

        assert_eq!(result, SessionResult::Exhausted);
        assert_eq!(history, before);
    }

    #[test]
    fn unknown_and_empty_subjects_fail() {
        let mut catalog = catalog("python", 3);
        catalog.insert_subject("empty", Vec::new());
        let mut history = SubjectHistory::new();
        let mut rng = StdRng::seed_from_u64(0);

        let err = select_session("go", &catalog, &mut history, ten(), &mut rng).unwrap_err();
        assert_eq!(err, SelectionError::InvalidSubject("go".into()));

        let err = select_session("empty", &catalog, &mut history, ten(), &mut rng).unwrap_err();
        assert_eq!(err, SelectionError::EmptyCatalog("empty".into()));
        assert!(history.is_empty());
    }

    #[test]
    fn first_position_is_roughly_uniform() {
        let catalog = catalog("python", 4);
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<QuestionId, u32> = HashMap::new();

        for _ in 0..4000 {
            let mut history = SubjectHistory::new();
            let result = select_session("python", &catalog, &mut history, one(), &mut rng).unwrap();
            *counts.entry(result.questions()[0].id().clone()).or_default() += 1;
        }

        assert_eq!(counts.len(), 4);
        for count in counts.values() {
            assert!((800..1200).contains(count), "skewed count {count}");
        }
    }

    #[test]
    fn smallest_session_still_serves_a_question() {
        assert!(QuizSettings::new(0).is_err());

        let catalog = catalog("python", 3);
        let mut history = SubjectHistory::new();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..3 {
            let result = select_session("python", &catalog, &mut history, one(), &mut rng).unwrap();
            assert_eq!(result.questions().len(), 1);
        }
        assert!(
            select_session("python", &catalog, &mut history, one(), &mut rng)
                .unwrap()
                .is_exhausted()
        );
    }
}
