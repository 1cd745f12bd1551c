use async_trait::async_trait;
use chrono::{DateTime, Utc};
use course_core::model::{LessonSlug, Product, ProductCategory, ProductId, ProgressRecord, UserId};
use std::collections::{HashMap, HashSet};
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

    #[error("unauthorized")]
    Unauthorized,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Per-user lesson completion records.
///
/// Implementations are remote or local round-trips with no retry policy; a
/// failed call leaves stored state unchanged.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Slugs of every lesson the user has completed.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the read fails or a row cannot be mapped.
    async fn fetch_completed_slugs(&self, user_id: UserId)
    -> Result<HashSet<LessonSlug>, StorageError>;

    /// Whether a completion record exists for `(user_id, slug)`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the read fails.
    async fn is_completed(&self, user_id: UserId, slug: &LessonSlug) -> Result<bool, StorageError>;

    /// Upsert a completion keyed by `(user_id, lesson_slug)`. Last write wins.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn mark_complete(&self, record: &ProgressRecord) -> Result<(), StorageError>;
}

/// Read access to the affiliate product table.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Active products, optionally restricted to one category, ordered by title.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the read fails or a row fails validation.
    async fn fetch_active_products(
        &self,
        category: Option<ProductCategory>,
    ) -> Result<Vec<Product>, StorageError>;
}

/// Client-local key/value state (last lesson, streak, ...).
#[async_trait]
pub trait LocalStateRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the read fails.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    progress: Arc<Mutex<HashMap<(UserId, LessonSlug), ProgressRecord>>>,
    products: Arc<Mutex<HashMap<ProductId, Product>>>,
    local_state: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a product. Products are owned by the admin surface;
    /// this exists for seeding and tests.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn upsert_product(&self, product: &Product) -> Result<(), StorageError> {
        let mut guard = self
            .products
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(product.id(), product.clone());
        Ok(())
    }

    /// Completion time of a stored record, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn completed_at(
        &self,
        user_id: UserId,
        slug: &LessonSlug,
    ) -> Result<Option<DateTime<Utc>>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .get(&(user_id, slug.clone()))
            .map(|record| record.completed_at))
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn fetch_completed_slugs(
        &self,
        user_id: UserId,
    ) -> Result<HashSet<LessonSlug>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .values()
            .filter(|record| record.user_id == user_id && record.completed)
            .map(|record| record.lesson_slug.clone())
            .collect())
    }

    async fn is_completed(&self, user_id: UserId, slug: &LessonSlug) -> Result<bool, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .get(&(user_id, slug.clone()))
            .is_some_and(|record| record.completed))
    }

    async fn mark_complete(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(
            (record.user_id, record.lesson_slug.clone()),
            record.clone(),
        );
        Ok(())
    }
}

#[async_trait]
impl ProductRepository for InMemoryRepository {
    async fn fetch_active_products(
        &self,
        category: Option<ProductCategory>,
    ) -> Result<Vec<Product>, StorageError> {
        let guard = self
            .products
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut found: Vec<Product> = guard
            .values()
            .filter(|product| product.is_active())
            .filter(|product| category.is_none_or(|c| product.category() == c))
            .cloned()
            .collect();
        found.sort_by(|a, b| a.title().cmp(b.title()));
        Ok(found)
    }
}

#[async_trait]
impl LocalStateRepository for InMemoryRepository {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .local_state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .local_state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut guard = self
            .local_state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub progress: Arc<dyn ProgressRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub local_state: Arc<dyn LocalStateRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(InMemoryRepository::new())
    }

    /// Wrap an existing in-memory repository so callers can keep a handle for seeding.
    #[must_use]
    pub fn from_in_memory(repo: InMemoryRepository) -> Self {
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo.clone());
        let products: Arc<dyn ProductRepository> = Arc::new(repo.clone());
        let local_state: Arc<dyn LocalStateRepository> = Arc::new(repo);
        Self {
            progress,
            products,
            local_state,
        }
    }
}
