mod activity;
mod card;
mod ids;
mod lesson;
mod product;
mod progress;

pub use ids::{LessonSlug, ParseIdError, ProductId, UserId};

pub use activity::ActivityState;
pub use card::LessonCard;
pub use lesson::{
    BONUS_LESSONS, CatalogEntry, LESSONS, Lesson, LessonKind, TOTAL_LESSONS, find_lesson,
};
pub use product::{Product, ProductCategory, ProductDraft, ProductError};
pub use progress::ProgressRecord;
