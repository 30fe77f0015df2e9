use async_trait::async_trait;
use quest_core::model::{Grade, User, UserId};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use super::SqliteRepository;
use super::mapping::{db_err, map_user_row, ser, user_id_from_i64, user_id_to_i64};
use super::progress_repo::load_completions;
use crate::repository::{NewUserRecord, StorageError, UserRepository};

impl SqliteRepository {
    async fn hydrate(&self, row: Option<SqliteRow>) -> Result<Option<User>, StorageError> {
        let Some(row) = row else {
            return Ok(None);
        };
        let id = user_id_from_i64(row.try_get("id").map_err(ser)?)?;
        let completed = load_completions(&self.pool, id).await?;
        map_user_row(&row, completed).map(Some)
    }
}

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn insert_user(&self, user: NewUserRecord) -> Result<UserId, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO users (username, password_hash, grade, created_at)
            VALUES (?1, ?2, NULL, ?3)
            ",
        )
        .bind(user.username)
        .bind(user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        user_id_from_i64(res.last_insert_rowid())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, username, password_hash, grade, created_at
            FROM users WHERE id = ?1
            ",
        )
        .bind(user_id_to_i64(id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        self.hydrate(row).await
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, username, password_hash, grade, created_at
            FROM users WHERE username = ?1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        self.hydrate(row).await
    }

    async fn set_grade(&self, id: UserId, grade: Grade) -> Result<(), StorageError> {
        let res = sqlx::query("UPDATE users SET grade = ?2 WHERE id = ?1")
            .bind(user_id_to_i64(id)?)
            .bind(i64::from(grade.value()))
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
