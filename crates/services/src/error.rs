//! Shared error types for the services crate.

use thiserror::Error;

use course_core::model::LessonSlug;
use storage::remote::RemoteInitError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by a `LessonContentSource`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentError {
    #[error("no content for lesson {0}")]
    Missing(LessonSlug),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Errors emitted by `LessonService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LessonServiceError {
    #[error("lesson not found: {0}")]
    NotFound(String),
    #[error("lesson is locked (course at {percentage}%)")]
    Locked { percentage: u8 },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProductService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProductServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ActivityService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ActivityServiceError {
    #[error(transparent)]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Remote(#[from] RemoteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
