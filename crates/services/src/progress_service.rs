use std::sync::Arc;

use quest_core::model::{Grade, Quest, QuestCatalog, QuestKey, User, UserId};
use storage::repository::{ProgressRepository, UserRepository};
use tracing::info;

use crate::Clock;
use crate::error::ProgressError;

/// Result of submitting an answer to a known quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// The answer matched. `newly_completed` is false on repeat solves.
    Correct { newly_completed: bool },
    Incorrect,
}

/// One row of a grade's quest list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestStatus {
    pub key: QuestKey,
    pub description: String,
    pub completed: bool,
}

/// Per-grade completion counts for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradeProgress {
    pub grade: Grade,
    pub completed: usize,
    pub total: usize,
}

/// Grade selection, answer checking and completion tracking.
#[derive(Clone)]
pub struct ProgressService {
    clock: Clock,
    users: Arc<dyn UserRepository>,
    progress: Arc<dyn ProgressRepository>,
    catalog: Arc<QuestCatalog>,
}

impl ProgressService {
    #[must_use]
    pub fn new(
        clock: Clock,
        users: Arc<dyn UserRepository>,
        progress: Arc<dyn ProgressRepository>,
        catalog: Arc<QuestCatalog>,
    ) -> Self {
        Self {
            clock,
            users,
            progress,
            catalog,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &QuestCatalog {
        &self.catalog
    }

    /// Look up a quest, or fail with `ProgressError::UnknownQuest`.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownQuest` if the key is not in the catalog.
    pub fn quest(&self, key: QuestKey) -> Result<&Quest, ProgressError> {
        self.catalog
            .lookup(key)
            .ok_or(ProgressError::UnknownQuest(key))
    }

    /// Remember `grade` as the user's current grade, writing only on change.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the update fails.
    pub async fn select_grade(
        &self,
        user: &mut User,
        grade: Grade,
    ) -> Result<bool, ProgressError> {
        if !user.select_grade(grade) {
            return Ok(false);
        }
        self.users.set_grade(user.id(), grade).await?;
        Ok(true)
    }

    /// Record `key` as solved. Returns `true` only for a new completion.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the write fails.
    pub async fn complete_quest(
        &self,
        user_id: UserId,
        key: QuestKey,
    ) -> Result<bool, ProgressError> {
        let recorded = self
            .progress
            .record_completion(user_id, key, self.clock.now())
            .await?;
        if recorded {
            info!(%user_id, quest = %key, "quest completed");
        }
        Ok(recorded)
    }

    /// Whether `key` is recorded as solved, read from the store.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Storage` if the read fails.
    pub async fn is_completed(
        &self,
        user_id: UserId,
        key: QuestKey,
    ) -> Result<bool, ProgressError> {
        Ok(self.progress.completions(user_id).await?.contains(key))
    }

    /// Check `answer` against the quest and record a completion on a match.
    ///
    /// Wrong answers are not stored anywhere.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::UnknownQuest` for a key outside the catalog
    /// and `ProgressError::Storage` if recording fails.
    pub async fn submit_answer(
        &self,
        user: &User,
        key: QuestKey,
        answer: &str,
    ) -> Result<AnswerOutcome, ProgressError> {
        if !self.quest(key)?.accepts(answer) {
            return Ok(AnswerOutcome::Incorrect);
        }
        let newly_completed = self.complete_quest(user.id(), key).await?;
        Ok(AnswerOutcome::Correct { newly_completed })
    }

    /// Quests of `grade` annotated with the user's completion status.
    #[must_use]
    pub fn grade_board(&self, user: &User, grade: Grade) -> Vec<QuestStatus> {
        self.catalog
            .quests_for_grade(grade)
            .map(|(key, quest)| QuestStatus {
                key,
                description: quest.description().to_owned(),
                completed: user.is_quest_completed(key),
            })
            .collect()
    }

    /// Completion counts for every grade in the catalog.
    #[must_use]
    pub fn overview(&self, user: &User) -> Vec<GradeProgress> {
        self.catalog
            .grades()
            .into_iter()
            .map(|grade| GradeProgress {
                grade,
                completed: user.completed().count_for_grade(grade),
                total: self.catalog.quests_for_grade(grade).count(),
            })
            .collect()
    }
}
