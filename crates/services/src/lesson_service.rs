use std::sync::Arc;

use course_core::gate::{self, ProgressSummary};
use course_core::model::{
    BONUS_LESSONS, CatalogEntry, LESSONS, Lesson, LessonCard, LessonKind, LessonSlug,
    ProgressRecord, UserId, find_lesson,
};
use course_core::parser::{fallback_error_content, parse_lesson_cards};
use storage::repository::ProgressRepository;

use crate::Clock;
use crate::activity_service::ActivityService;
use crate::content::LessonContentSource;
use crate::error::LessonServiceError;

/// A lesson ready to be paged through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonPage {
    pub lesson: Lesson,
    pub kind: LessonKind,
    /// Zero-based position within the lesson's track.
    pub position: usize,
    /// Length of the lesson's track.
    pub track_len: usize,
    pub cards: Vec<LessonCard>,
    pub is_completed: bool,
}

impl LessonPage {
    /// Course position shown in the bottom bar.
    #[must_use]
    pub fn position_pct(&self) -> u8 {
        gate::position_pct(self.position, self.track_len)
    }
}

/// Result of a completion write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    /// False when the lesson had already been completed before this write.
    pub first_time: bool,
}

/// Loads lesson decks and records completions.
#[derive(Clone)]
pub struct LessonService {
    clock: Clock,
    progress: Arc<dyn ProgressRepository>,
    content: Arc<dyn LessonContentSource>,
    activity: ActivityService,
}

impl LessonService {
    #[must_use]
    pub fn new(
        clock: Clock,
        progress: Arc<dyn ProgressRepository>,
        content: Arc<dyn LessonContentSource>,
        activity: ActivityService,
    ) -> Self {
        Self {
            clock,
            progress,
            content,
            activity,
        }
    }

    /// Load the card deck for `slug` as seen by `user_id`.
    ///
    /// Core lessons follow the sequential gate; bonus lessons require the
    /// course to be fully completed. Content that cannot be loaded degrades
    /// to the fallback error card instead of failing.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::NotFound` for slugs outside the catalog,
    /// `LessonServiceError::Locked` when the gate denies access, and
    /// `LessonServiceError::Storage` if progress cannot be read.
    pub async fn load_lesson(
        &self,
        user_id: UserId,
        slug: &str,
    ) -> Result<LessonPage, LessonServiceError> {
        let (slug, entry) = resolve(slug)?;

        let completed = self.progress.fetch_completed_slugs(user_id).await?;
        let summary = ProgressSummary::for_course(&completed);
        let accessible = match entry.kind {
            LessonKind::Core => summary.is_accessible(entry.position),
            LessonKind::Bonus => summary.bonus_unlocked,
        };
        if !accessible {
            tracing::debug!(%user_id, %slug, pct = summary.percentage, "lesson locked");
            return Err(LessonServiceError::Locked {
                percentage: summary.percentage,
            });
        }

        let raw = match self.content.load(&slug).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(%slug, error = %err, "lesson content unavailable");
                fallback_error_content().to_string()
            }
        };

        if let Err(err) = self.activity.record_visit(&slug).await {
            tracing::warn!(%slug, error = %err, "failed to record lesson visit");
        }

        let track_len = match entry.kind {
            LessonKind::Core => LESSONS.len(),
            LessonKind::Bonus => BONUS_LESSONS.len(),
        };
        Ok(LessonPage {
            lesson: entry.lesson,
            kind: entry.kind,
            position: entry.position,
            track_len,
            cards: parse_lesson_cards(&raw),
            is_completed: completed.contains(&slug),
        })
    }

    /// Upsert a completion for `(user_id, slug)` stamped with the clock's now.
    ///
    /// Nothing is written locally before the backend accepts the record.
    ///
    /// # Errors
    ///
    /// Returns `LessonServiceError::NotFound` for slugs outside the catalog and
    /// `LessonServiceError::Storage` if the write fails.
    pub async fn mark_complete(
        &self,
        user_id: UserId,
        slug: &str,
    ) -> Result<Completion, LessonServiceError> {
        let (slug, _) = resolve(slug)?;

        let already = self.progress.is_completed(user_id, &slug).await?;
        let record = ProgressRecord::completed(user_id, slug.clone(), self.clock.now());
        if let Err(err) = self.progress.mark_complete(&record).await {
            tracing::warn!(%user_id, %slug, error = %err, "completion write failed");
            return Err(err.into());
        }
        tracing::info!(%user_id, %slug, first_time = !already, "lesson completed");

        if let Err(err) = self.activity.record_visit(&slug).await {
            tracing::warn!(%slug, error = %err, "failed to record lesson activity");
        }

        Ok(Completion {
            first_time: !already,
        })
    }
}

fn resolve(raw: &str) -> Result<(LessonSlug, CatalogEntry), LessonServiceError> {
    let not_found = || LessonServiceError::NotFound(raw.to_string());
    let slug = LessonSlug::parse(raw).map_err(|_| not_found())?;
    let entry = find_lesson(&slug).ok_or_else(not_found)?;
    Ok((slug, entry))
}
