use course_core::model::{LessonSlug, Product, ProductDraft, ProductId};
use sqlx::Row;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn bool_to_i64(value: bool) -> i64 {
    i64::from(value)
}

pub(crate) fn bool_from_i64(field: &'static str, value: i64) -> Result<bool, StorageError> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(StorageError::Serialization(format!(
            "invalid {field}: {other}"
        ))),
    }
}

pub(crate) fn slug_from_row(row: &sqlx::sqlite::SqliteRow) -> Result<LessonSlug, StorageError> {
    let raw: String = row.try_get("lesson_slug").map_err(ser)?;
    LessonSlug::parse(raw).map_err(ser)
}

pub(crate) fn map_product_row(row: &sqlx::sqlite::SqliteRow) -> Result<Product, StorageError> {
    let id: String = row.try_get("id").map_err(ser)?;
    let id: ProductId = id.parse().map_err(ser)?;
    let active: i64 = row.try_get("active").map_err(ser)?;

    ProductDraft {
        id,
        title: row.try_get("title").map_err(ser)?,
        description: row.try_get("description").map_err(ser)?,
        category: row.try_get("category").map_err(ser)?,
        image_url: row.try_get("image_url").map_err(ser)?,
        link: row.try_get("link").map_err(ser)?,
        price: row.try_get("price").map_err(ser)?,
        active: bool_from_i64("active", active)?,
    }
    .validate()
    .map_err(ser)
}
