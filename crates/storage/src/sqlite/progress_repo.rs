use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quest_core::model::{CompletedQuests, QuestKey, UserId};
use sqlx::SqlitePool;

use super::SqliteRepository;
use super::mapping::{db_err, map_completion_row, user_id_to_i64};
use crate::repository::{ProgressRepository, StorageError};

pub(super) async fn load_completions(
    pool: &SqlitePool,
    user_id: UserId,
) -> Result<CompletedQuests, StorageError> {
    let rows = sqlx::query(
        r"
        SELECT grade, quest_id
        FROM quest_completions
        WHERE user_id = ?1
        ORDER BY grade, quest_id
        ",
    )
    .bind(user_id_to_i64(user_id)?)
    .fetch_all(pool)
    .await
    .map_err(db_err)?;

    rows.iter().map(map_completion_row).collect()
}

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn record_completion(
        &self,
        user_id: UserId,
        key: QuestKey,
        completed_at: DateTime<Utc>,
    ) -> Result<bool, StorageError> {
        let res = sqlx::query(
            r"
            INSERT INTO quest_completions (user_id, grade, quest_id, completed_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(user_id, grade, quest_id) DO NOTHING
            ",
        )
        .bind(user_id_to_i64(user_id)?)
        .bind(i64::from(key.grade.value()))
        .bind(i64::from(key.quest.value()))
        .bind(completed_at)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(res.rows_affected() == 1)
    }

    async fn completions(&self, user_id: UserId) -> Result<CompletedQuests, StorageError> {
        load_completions(&self.pool, user_id).await
    }
}
