use std::collections::HashSet;

use async_trait::async_trait;
use course_core::model::{LessonSlug, ProgressRecord, UserId};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{bool_to_i64, slug_from_row};
use crate::repository::{ProgressRepository, StorageError};

#[async_trait]
impl ProgressRepository for SqliteRepository {
    async fn fetch_completed_slugs(
        &self,
        user_id: UserId,
    ) -> Result<HashSet<LessonSlug>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT lesson_slug
            FROM user_progress
            WHERE user_id = ?1 AND completed = 1
            ",
        )
        .bind(user_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let slugs = rows
            .iter()
            .filter_map(|row| match slug_from_row(row) {
                Ok(slug) => Some(slug),
                Err(err) => {
                    let raw: String = row.try_get("lesson_slug").unwrap_or_default();
                    tracing::warn!(slug = %raw, error = %err, "skipping unreadable progress row");
                    None
                }
            })
            .collect();
        Ok(slugs)
    }

    async fn is_completed(&self, user_id: UserId, slug: &LessonSlug) -> Result<bool, StorageError> {
        let row = sqlx::query(
            r"
            SELECT 1
            FROM user_progress
            WHERE user_id = ?1 AND lesson_slug = ?2 AND completed = 1
            ",
        )
        .bind(user_id.to_string())
        .bind(slug.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(row.is_some())
    }

    async fn mark_complete(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO user_progress (user_id, lesson_slug, completed, completed_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(user_id, lesson_slug) DO UPDATE SET
                completed = excluded.completed,
                completed_at = excluded.completed_at
            ",
        )
        .bind(record.user_id.to_string())
        .bind(record.lesson_slug.as_str())
        .bind(bool_to_i64(record.completed))
        .bind(record.completed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}
