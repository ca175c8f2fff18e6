use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;

/// Question ids already served for one subject.
///
/// Keeps insertion order for persistence; each id appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<QuestionId>", into = "Vec<QuestionId>")]
pub struct SubjectHistory {
    ids: Vec<QuestionId>,
    seen: HashSet<QuestionId>,
}

impl SubjectHistory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: &QuestionId) -> bool {
        self.seen.contains(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionId> {
        self.ids.iter()
    }

    /// Record an id. Returns false if it was already present.
    pub fn insert(&mut self, id: QuestionId) -> bool {
        if self.seen.insert(id.clone()) {
            self.ids.push(id);
            true
        } else {
            false
        }
    }

    /// Merge ids into the history, returning how many were new.
    pub fn merge<I>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = QuestionId>,
    {
        ids.into_iter().map(|id| self.insert(id)).filter(|added| *added).count()
    }
}

impl From<Vec<QuestionId>> for SubjectHistory {
    fn from(ids: Vec<QuestionId>) -> Self {
        let mut history = Self::new();
        history.merge(ids);
        history
    }
}

impl From<SubjectHistory> for Vec<QuestionId> {
    fn from(history: SubjectHistory) -> Self {
        history.ids
    }
}

impl FromIterator<QuestionId> for SubjectHistory {
    fn from_iter<T: IntoIterator<Item = QuestionId>>(iter: T) -> Self {
        let mut history = Self::new();
        history.merge(iter);
        history
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_ignores_duplicates() {
        let mut history = SubjectHistory::new();
        let added = history.merge([1_u64, 2, 2, 3].map(QuestionId::from));
        assert_eq!(added, 3);
        assert_eq!(history.merge([3_u64, 4].map(QuestionId::from)), 1);
        assert_eq!(history.len(), 4);
    }

    #[test]
    fn json_is_an_ordered_array() {
        let history: SubjectHistory = [3_u64, 1, 2].into_iter().map(QuestionId::from).collect();
        let json = serde_json::to_string(&history).unwrap();
        assert_eq!(json, r#"["3","1","2"]"#);
    }

    #[test]
    fn accepts_numeric_arrays_and_dedupes() {
        let history: SubjectHistory = serde_json::from_str("[5, \"5\", 6]").unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.contains(&QuestionId::from(6)));
    }
}
