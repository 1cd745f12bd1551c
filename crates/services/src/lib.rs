#![forbid(unsafe_code)]

pub mod activity_service;
pub mod app_services;
pub mod content;
pub mod error;
pub mod lesson_service;
pub mod product_service;
pub mod progress_service;

pub use course_core::Clock;

pub use activity_service::ActivityService;
pub use app_services::AppServices;
pub use content::{DirectoryContent, EmbeddedContent, LessonContentSource};
pub use error::{
    ActivityServiceError, AppServicesError, ContentError, LessonServiceError,
    ProductServiceError, ProgressServiceError,
};
pub use lesson_service::{Completion, LessonPage, LessonService};
pub use product_service::ProductService;
pub use progress_service::{ProgressService, SurpriseAccess};
