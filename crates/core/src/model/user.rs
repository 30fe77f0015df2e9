use chrono::{DateTime, Utc};
use thiserror::Error;

use super::ids::UserId;
use super::progress::CompletedQuests;
use super::quest::{Grade, QuestKey};

/// Accepted username length, in characters.
pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 20;

/// Accepted password length, in characters.
pub const PASSWORD_MIN_LEN: usize = 3;
pub const PASSWORD_MAX_LEN: usize = 20;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum UserError {
    #[error("username cannot be empty")]
    EmptyUsername,

    #[error("password hash cannot be empty")]
    EmptyPasswordHash,
}

/// A registered account together with its quest progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    password_hash: String,
    grade: Option<Grade>,
    created_at: DateTime<Utc>,
    completed: CompletedQuests,
}

impl User {
    /// Rehydrates a user from stored fields.
    ///
    /// Length rules are a registration concern and are not re-checked here, so
    /// accounts created under older rules still load.
    ///
    /// # Errors
    ///
    /// Returns `UserError` if the username or password hash is empty.
    pub fn from_persisted(
        id: UserId,
        username: String,
        password_hash: String,
        grade: Option<Grade>,
        created_at: DateTime<Utc>,
        completed: CompletedQuests,
    ) -> Result<Self, UserError> {
        if username.is_empty() {
            return Err(UserError::EmptyUsername);
        }
        if password_hash.is_empty() {
            return Err(UserError::EmptyPasswordHash);
        }

        Ok(Self {
            id,
            username,
            password_hash,
            grade,
            created_at,
            completed,
        })
    }

    #[must_use]
    pub fn id(&self) -> UserId {
        self.id
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Most recently visited grade, if any.
    #[must_use]
    pub fn grade(&self) -> Option<Grade> {
        self.grade
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn completed(&self) -> &CompletedQuests {
        &self.completed
    }

    #[must_use]
    pub fn is_quest_completed(&self, key: QuestKey) -> bool {
        self.completed.contains(key)
    }

    /// Marks `key` solved. Returns `false` if it already was.
    pub fn record_completion(&mut self, key: QuestKey) -> bool {
        self.completed.insert(key)
    }

    /// Remembers `grade` as the current one. Returns `true` if it changed.
    pub fn select_grade(&mut self, grade: Grade) -> bool {
        if self.grade == Some(grade) {
            return false;
        }
        self.grade = Some(grade);
        true
    }
}
