use std::collections::HashSet;

use async_trait::async_trait;
use course_core::model::{LessonSlug, ProgressRecord, UserId};

use super::rows::{ProgressUpsertRow, SlugRow};
use super::{RemoteRepository, check_status, transport};
use crate::repository::{ProgressRepository, StorageError};

const TABLE: &str = "user_progress";

#[async_trait]
impl ProgressRepository for RemoteRepository {
    async fn fetch_completed_slugs(
        &self,
        user_id: UserId,
    ) -> Result<HashSet<LessonSlug>, StorageError> {
        let response = self
            .get(TABLE)
            .query(&[
                ("select", "lesson_slug".to_string()),
                ("user_id", format!("eq.{user_id}")),
                ("completed", "is.true".to_string()),
            ])
            .send()
            .await
            .map_err(transport)?;
        let rows: Vec<SlugRow> = check_status(response).await?.json().await.map_err(transport)?;

        let slugs = rows
            .into_iter()
            .filter_map(|row| {
                let raw = row.lesson_slug.clone();
                match row.into_slug() {
                    Ok(slug) => Some(slug),
                    Err(err) => {
                        tracing::warn!(slug = %raw, error = %err, "skipping unreadable progress row");
                        None
                    }
                }
            })
            .collect();
        Ok(slugs)
    }

    async fn is_completed(&self, user_id: UserId, slug: &LessonSlug) -> Result<bool, StorageError> {
        let response = self
            .get(TABLE)
            .query(&[
                ("select", "lesson_slug".to_string()),
                ("user_id", format!("eq.{user_id}")),
                ("lesson_slug", format!("eq.{slug}")),
                ("completed", "is.true".to_string()),
                ("limit", "1".to_string()),
            ])
            .send()
            .await
            .map_err(transport)?;
        let rows: Vec<SlugRow> = check_status(response).await?.json().await.map_err(transport)?;

        Ok(!rows.is_empty())
    }

    async fn mark_complete(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let body = [ProgressUpsertRow::from(record)];
        let response = self
            .post(TABLE)
            .query(&[("on_conflict", "user_id,lesson_slug")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&body)
            .send()
            .await
            .map_err(transport)?;
        check_status(response).await?;

        tracing::debug!(
            user_id = %record.user_id,
            slug = %record.lesson_slug,
            "remote progress upserted"
        );
        Ok(())
    }
}
