use std::sync::Arc;

use course_core::model::UserId;
use services::{ActivityService, LessonService, ProductService, ProgressService};

pub trait UiApp: Send + Sync {
    fn user_id(&self) -> UserId;

    fn lessons(&self) -> Arc<LessonService>;
    fn progress(&self) -> Arc<ProgressService>;
    fn products(&self) -> Arc<ProductService>;
    fn activity(&self) -> Arc<ActivityService>;
}

#[derive(Clone)]
pub struct AppContext {
    user_id: UserId,

    lessons: Arc<LessonService>,
    progress: Arc<ProgressService>,
    products: Arc<ProductService>,
    activity: Arc<ActivityService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            user_id: app.user_id(),
            lessons: app.lessons(),
            progress: app.progress(),
            products: app.products(),
            activity: app.activity(),
        }
    }

    /// The signed-in user every read and write is scoped to.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
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

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
