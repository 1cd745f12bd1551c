use std::sync::Arc;

use storage::remote::RemoteConfig;
use storage::repository::{LocalStateRepository, Storage};
use storage::sqlite::SqliteRepository;

use crate::Clock;
use crate::activity_service::ActivityService;
use crate::content::LessonContentSource;
use crate::error::AppServicesError;
use crate::lesson_service::LessonService;
use crate::product_service::ProductService;
use crate::progress_service::ProgressService;

/// Assembles app-facing services over one `Storage`.
#[derive(Clone)]
pub struct AppServices {
    lessons: Arc<LessonService>,
    progress: Arc<ProgressService>,
    products: Arc<ProductService>,
    activity: Arc<ActivityService>,
}

impl AppServices {
    #[must_use]
    pub fn new(storage: &Storage, clock: Clock, content: Arc<dyn LessonContentSource>) -> Self {
        let activity = ActivityService::new(clock, Arc::clone(&storage.local_state));
        let lessons = LessonService::new(
            clock,
            Arc::clone(&storage.progress),
            content,
            activity.clone(),
        );
        let progress = ProgressService::new(
            Arc::clone(&storage.progress),
            Arc::clone(&storage.products),
        );
        let products = ProductService::new(Arc::clone(&storage.products));

        Self {
            lessons: Arc::new(lessons),
            progress: Arc::new(progress),
            products: Arc::new(products),
            activity: Arc::new(activity),
        }
    }

    /// Build services backed entirely by `SQLite`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Sqlite` if the database cannot be opened or migrated.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        content: Arc<dyn LessonContentSource>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::new(&storage, clock, content))
    }

    /// Progress and products from the hosted backend; client-local state in
    /// the `SQLite` database at `local_db_url`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the local database or HTTP client cannot be initialised.
    pub async fn new_remote(
        config: RemoteConfig,
        local_db_url: &str,
        clock: Clock,
        content: Arc<dyn LessonContentSource>,
    ) -> Result<Self, AppServicesError> {
        let local = SqliteRepository::connect(local_db_url).await?;
        local.migrate().await?;
        let local_state: Arc<dyn LocalStateRepository> = Arc::new(local);
        tracing::info!(base_url = %config.base_url, "using hosted backend");
        let storage = Storage::remote(config, local_state)?;
        Ok(Self::new(&storage, clock, content))
    }

    #[must_use]
    pub fn lessons(&self) -> Arc<LessonService> {
        Arc::clone(&self.lessons)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn products(&self) -> Arc<ProductService> {
        Arc::clone(&self.products)
    }

    #[must_use]
    pub fn activity(&self) -> Arc<ActivityService> {
        Arc::clone(&self.activity)
    }
}
