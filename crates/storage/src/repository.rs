use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quest_core::model::{CompletedQuests, Grade, QuestKey, User, UserId};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Fields needed to create a user; the store assigns the id.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Credential store: user identity, password hash and selected grade.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the username is already taken.
    async fn insert_user(&self, user: NewUserRecord) -> Result<UserId, StorageError>;

    /// Fetch a user, including completed quests.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures; a missing user is `Ok(None)`.
    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError>;

    /// Fetch a user by exact username.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures; a missing user is `Ok(None)`.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StorageError>;

    /// Overwrite the stored grade.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the user does not exist.
    async fn set_grade(&self, id: UserId, grade: Grade) -> Result<(), StorageError>;
}

/// Progress tracker: which quests each user has solved.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Record a completion. Returns `true` if it was not recorded before.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the user does not exist.
    async fn record_completion(
        &self,
        user_id: UserId,
        key: QuestKey,
        completed_at: DateTime<Utc>,
    ) -> Result<bool, StorageError>;

    /// All completions of a user.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn completions(&self, user_id: UserId) -> Result<CompletedQuests, StorageError>;
}

#[derive(Default)]
struct InMemoryState {
    next_id: u64,
    users: BTreeMap<UserId, User>,
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(
        &self,
        f: impl FnOnce(&mut InMemoryState) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let mut guard = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        f(&mut guard)
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn insert_user(&self, user: NewUserRecord) -> Result<UserId, StorageError> {
        self.with_state(|state| {
            if state.users.values().any(|u| u.username() == user.username) {
                return Err(StorageError::Conflict);
            }
            state.next_id += 1;
            let id = UserId::new(state.next_id);
            let stored = User::from_persisted(
                id,
                user.username,
                user.password_hash,
                None,
                user.created_at,
                CompletedQuests::new(),
            )
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
            state.users.insert(id, stored);
            Ok(id)
        })
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError> {
        self.with_state(|state| Ok(state.users.get(&id).cloned()))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        self.with_state(|state| {
            Ok(state
                .users
                .values()
                .find(|u| u.username() == username)
                .cloned())
        })
    }

    async fn set_grade(&self, id: UserId, grade: Grade) -> Result<(), StorageError> {
        self.with_state(|state| {
            let user = state.users.get_mut(&id).ok_or(StorageError::NotFound)?;
            user.select_grade(grade);
            Ok(())
        })
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn record_completion(
        &self,
        user_id: UserId,
        key: QuestKey,
        _completed_at: DateTime<Utc>,
    ) -> Result<bool, StorageError> {
        self.with_state(|state| {
            let user = state
                .users
                .get_mut(&user_id)
                .ok_or(StorageError::NotFound)?;
            Ok(user.record_completion(key))
        })
    }

    async fn completions(&self, user_id: UserId) -> Result<CompletedQuests, StorageError> {
        self.with_state(|state| {
            Ok(state
                .users
                .get(&user_id)
                .map(|u| u.completed().clone())
                .unwrap_or_default())
        })
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn UserRepository>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let users: Arc<dyn UserRepository> = Arc::new(repo.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo);
        Self { users, progress }
    }
}
