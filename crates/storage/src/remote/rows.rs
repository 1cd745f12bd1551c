use chrono::{DateTime, Utc};
use course_core::model::{LessonSlug, Product, ProductDraft, ProductId, ProgressRecord};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::repository::StorageError;

#[derive(Debug, Deserialize)]
pub(super) struct SlugRow {
    pub lesson_slug: String,
}

impl SlugRow {
    pub(super) fn into_slug(self) -> Result<LessonSlug, StorageError> {
        LessonSlug::parse(self.lesson_slug)
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

#[derive(Debug, Serialize)]
pub(super) struct ProgressUpsertRow<'a> {
    pub user_id: Uuid,
    pub lesson_slug: &'a str,
    pub completed: bool,
    pub completed_at: DateTime<Utc>,
}

impl<'a> From<&'a ProgressRecord> for ProgressUpsertRow<'a> {
    fn from(record: &'a ProgressRecord) -> Self {
        Self {
            user_id: record.user_id.value(),
            lesson_slug: record.lesson_slug.as_str(),
            completed: record.completed,
            completed_at: record.completed_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ProductRow {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub link: String,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl ProductRow {
    pub(super) fn into_product(self) -> Result<Product, StorageError> {
        ProductDraft {
            id: ProductId::new(self.id),
            title: self.title,
            description: self.description.unwrap_or_default(),
            category: self.category,
            image_url: self.image_url,
            link: self.link,
            price: self.price.unwrap_or_default(),
            active: self.active,
        }
        .validate()
        .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}
