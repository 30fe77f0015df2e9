use serde::{Deserialize, Serialize};
use std::fmt;

/// Curriculum tier. The built-in catalog uses 1 through 4, but any
/// non-negative value can be visited and stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Grade(u32);

impl Grade {
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordinal of a quest inside its grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestId(u32);

impl QuestId {
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for QuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Composite key of a quest. Its `Display` form is the completion token
/// `"<grade>_<quest>"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QuestKey {
    pub grade: Grade,
    pub quest: QuestId,
}

impl QuestKey {
    #[must_use]
    pub fn new(grade: Grade, quest: QuestId) -> Self {
        Self { grade, quest }
    }

    /// Shorthand for building a key from raw numbers.
    #[must_use]
    pub fn from_raw(grade: u32, quest: u32) -> Self {
        Self::new(Grade::new(grade), QuestId::new(quest))
    }
}

impl fmt::Display for QuestKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.grade, self.quest)
    }
}

/// A single question with its expected answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quest {
    question: String,
    answer: String,
    description: String,
}

impl Quest {
    #[must_use]
    pub fn new(
        question: impl Into<String>,
        answer: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            description: description.into(),
        }
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Checks a submitted answer.
    ///
    /// The submission is trimmed and lowercased; the expected answer is only
    /// lowercased, so surrounding whitespace in catalog data is significant.
    #[must_use]
    pub fn accepts(&self, submitted: &str) -> bool {
        submitted.trim().to_lowercase() == self.answer.to_lowercase()
    }
}
