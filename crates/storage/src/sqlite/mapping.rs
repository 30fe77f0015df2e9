use quest_core::model::{CompletedQuests, Grade, QuestKey, User, UserId};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Maps driver errors, folding constraint violations into domain variants.
pub(crate) fn db_err(e: sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return StorageError::Conflict;
        }
        if db.is_foreign_key_violation() {
            return StorageError::NotFound;
        }
    }
    StorageError::Connection(e.to_string())
}

pub(crate) fn user_id_to_i64(id: UserId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("user_id overflow".into()))
}

pub(crate) fn user_id_from_i64(v: i64) -> Result<UserId, StorageError> {
    u64::try_from(v)
        .map(UserId::new)
        .map_err(|_| StorageError::Serialization("user_id sign overflow".into()))
}

fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn map_completion_row(row: &SqliteRow) -> Result<QuestKey, StorageError> {
    Ok(QuestKey::from_raw(
        u32_from_i64("grade", row.try_get("grade").map_err(ser)?)?,
        u32_from_i64("quest_id", row.try_get("quest_id").map_err(ser)?)?,
    ))
}

pub(crate) fn map_user_row(
    row: &SqliteRow,
    completed: CompletedQuests,
) -> Result<User, StorageError> {
    let grade = row
        .try_get::<Option<i64>, _>("grade")
        .map_err(ser)?
        .map(|g| u32_from_i64("grade", g).map(Grade::new))
        .transpose()?;

    User::from_persisted(
        user_id_from_i64(row.try_get("id").map_err(ser)?)?,
        row.try_get("username").map_err(ser)?,
        row.try_get("password_hash").map_err(ser)?,
        grade,
        row.try_get("created_at").map_err(ser)?,
        completed,
    )
    .map_err(ser)
}
