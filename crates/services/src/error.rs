//! Shared error types for the services crate.

use thiserror::Error;

use quest_core::model::QuestKey;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

use crate::forms::FieldErrors;

/// Errors emitted by `AccountService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AccountError {
    /// Form input was rejected; carries per-field messages.
    #[error("invalid form input")]
    Invalid(FieldErrors),
    /// Unknown username or wrong password. Deliberately indistinguishable.
    #[error("invalid username or password")]
    BadCredentials,
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("unknown quest {0}")]
    UnknownQuest(QuestKey),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
