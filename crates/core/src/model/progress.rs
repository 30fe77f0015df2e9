use std::collections::BTreeSet;

use super::quest::{Grade, QuestKey};

/// Set of quests a user has solved.
///
/// Entries are only ever added; the set type keeps tokens unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletedQuests(BTreeSet<QuestKey>);

impl CompletedQuests {
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Adds `key`, returning `true` if it was not already present.
    pub fn insert(&mut self, key: QuestKey) -> bool {
        self.0.insert(key)
    }

    #[must_use]
    pub fn contains(&self, key: QuestKey) -> bool {
        self.0.contains(&key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of solved quests within one grade.
    #[must_use]
    pub fn count_for_grade(&self, grade: Grade) -> usize {
        self.0.iter().filter(|key| key.grade == grade).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = QuestKey> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<QuestKey> for CompletedQuests {
    fn from_iter<I: IntoIterator<Item = QuestKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_reports_only_new_keys() {
        let mut done = CompletedQuests::new();
        assert!(done.insert(QuestKey::from_raw(2, 3)));
        assert!(!done.insert(QuestKey::from_raw(2, 3)));
        assert_eq!(done.len(), 1);
        assert!(done.contains(QuestKey::from_raw(2, 3)));
        assert!(!done.contains(QuestKey::from_raw(3, 2)));
    }

    #[test]
    fn collecting_duplicates_keeps_one_entry() {
        let done: CompletedQuests = [
            QuestKey::from_raw(1, 1),
            QuestKey::from_raw(1, 1),
            QuestKey::from_raw(4, 2),
        ]
        .into_iter()
        .collect();
        assert_eq!(done.len(), 2);
        assert_eq!(done.count_for_grade(Grade::new(1)), 1);
        assert_eq!(done.count_for_grade(Grade::new(3)), 0);
    }
}
