use chrono::{DateTime, Utc};

use crate::model::ids::{LessonSlug, UserId};

/// Completion of one lesson by one user.
///
/// At most one record exists per `(user_id, lesson_slug)`; writes are upserts on that pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressRecord {
    pub user_id: UserId,
    pub lesson_slug: LessonSlug,
    pub completed: bool,
    pub completed_at: DateTime<Utc>,
}

impl ProgressRecord {
    /// A record marking the lesson as completed at `now`.
    #[must_use]
    pub fn completed(user_id: UserId, lesson_slug: LessonSlug, now: DateTime<Utc>) -> Self {
        Self {
            user_id,
            lesson_slug,
            completed: true,
            completed_at: now,
        }
    }
}
