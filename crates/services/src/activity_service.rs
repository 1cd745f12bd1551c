use std::sync::Arc;

use chrono::NaiveDate;
use course_core::model::{ActivityState, LessonSlug};
use serde::{Deserialize, Serialize};
use storage::repository::LocalStateRepository;

use crate::Clock;
use crate::error::ActivityServiceError;

const ACTIVITY_KEY: &str = "activity_state";

/// Stored JSON shape of `ActivityState`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredActivity {
    last_lesson: Option<LessonSlug>,
    last_active_day: Option<NaiveDate>,
    #[serde(default)]
    streak_days: u32,
}

impl From<StoredActivity> for ActivityState {
    fn from(stored: StoredActivity) -> Self {
        Self {
            last_lesson: stored.last_lesson,
            last_active_day: stored.last_active_day,
            streak_days: stored.streak_days,
        }
    }
}

impl From<&ActivityState> for StoredActivity {
    fn from(state: &ActivityState) -> Self {
        Self {
            last_lesson: state.last_lesson.clone(),
            last_active_day: state.last_active_day,
            streak_days: state.streak_days,
        }
    }
}

/// Client-local study activity: last lesson opened and the daily streak.
#[derive(Clone)]
pub struct ActivityService {
    clock: Clock,
    local_state: Arc<dyn LocalStateRepository>,
}

impl ActivityService {
    #[must_use]
    pub fn new(clock: Clock, local_state: Arc<dyn LocalStateRepository>) -> Self {
        Self { clock, local_state }
    }

    /// Current stored activity.
    ///
    /// An unreadable entry is discarded and treated as no activity.
    ///
    /// # Errors
    ///
    /// Returns `ActivityServiceError::Storage` if local state cannot be read.
    pub async fn state(&self) -> Result<ActivityState, ActivityServiceError> {
        let Some(raw) = self.local_state.get(ACTIVITY_KEY).await? else {
            return Ok(ActivityState::default());
        };
        match serde_json::from_str::<StoredActivity>(&raw) {
            Ok(stored) => Ok(stored.into()),
            Err(err) => {
                tracing::warn!(error = %err, "discarding unreadable activity state");
                self.local_state.remove(ACTIVITY_KEY).await?;
                Ok(ActivityState::default())
            }
        }
    }

    /// Record that `slug` was studied today and persist the updated streak.
    ///
    /// # Errors
    ///
    /// Returns `ActivityServiceError` if local state cannot be read or written.
    pub async fn record_visit(
        &self,
        slug: &LessonSlug,
    ) -> Result<ActivityState, ActivityServiceError> {
        let updated = self.state().await?.record(slug.clone(), self.clock.today());
        let encoded = serde_json::to_string(&StoredActivity::from(&updated))?;
        self.local_state.set(ACTIVITY_KEY, &encoded).await?;
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns `ActivityServiceError::Storage` if local state cannot be read.
    pub async fn last_lesson(&self) -> Result<Option<LessonSlug>, ActivityServiceError> {
        Ok(self.state().await?.last_lesson)
    }

    /// Streak as of today; 0 once a full day has been skipped.
    ///
    /// # Errors
    ///
    /// Returns `ActivityServiceError::Storage` if local state cannot be read.
    pub async fn streak(&self) -> Result<u32, ActivityServiceError> {
        Ok(self.state().await?.streak_on(self.clock.today()))
    }
}
