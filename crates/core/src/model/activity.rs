use chrono::NaiveDate;

use crate::model::ids::LessonSlug;

/// Client-local study activity: the last lesson opened and the daily streak.
///
/// Days are calendar days in UTC. A user studying across local midnight in a
/// far-off timezone may see the streak tick over at a different local hour.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityState {
    pub last_lesson: Option<LessonSlug>,
    pub last_active_day: Option<NaiveDate>,
    pub streak_days: u32,
}

impl ActivityState {
    /// Record activity on `slug` during `today`.
    ///
    /// Same day keeps the streak, the following day extends it, and any gap
    /// (or a clock that went backwards) restarts it at 1.
    #[must_use]
    pub fn record(self, slug: LessonSlug, today: NaiveDate) -> Self {
        let streak_days = match self.last_active_day {
            Some(day) if day == today => self.streak_days.max(1),
            Some(day) if day.succ_opt() == Some(today) => self.streak_days.saturating_add(1),
            _ => 1,
        };
        Self {
            last_lesson: Some(slug),
            last_active_day: Some(today),
            streak_days,
        }
    }

    /// Streak as it should be displayed on `today`.
    ///
    /// A streak survives until the end of the day after the last activity.
    #[must_use]
    pub fn streak_on(&self, today: NaiveDate) -> u32 {
        match self.last_active_day {
            Some(day) if day == today || day.succ_opt() == Some(today) => self.streak_days,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn slug() -> LessonSlug {
        LessonSlug::parse("01-introducao").unwrap()
    }

    #[test]
    fn first_activity_starts_streak() {
        let state = ActivityState::default().record(slug(), day(10));
        assert_eq!(state.streak_days, 1);
        assert_eq!(state.last_lesson, Some(slug()));
    }

    #[test]
    fn consecutive_days_extend_and_same_day_keeps() {
        let state = ActivityState::default()
            .record(slug(), day(10))
            .record(slug(), day(11))
            .record(slug(), day(11));
        assert_eq!(state.streak_days, 2);
        assert_eq!(state.last_active_day, Some(day(11)));
    }

    #[test]
    fn gap_resets_streak() {
        let state = ActivityState::default()
            .record(slug(), day(10))
            .record(slug(), day(11))
            .record(slug(), day(14));
        assert_eq!(state.streak_days, 1);
    }

    #[test]
    fn clock_going_backwards_resets_streak() {
        let state = ActivityState::default()
            .record(slug(), day(10))
            .record(slug(), day(9));
        assert_eq!(state.streak_days, 1);
    }

    #[test]
    fn streak_on_expires_after_a_missed_day() {
        let state = ActivityState::default()
            .record(slug(), day(10))
            .record(slug(), day(11));
        assert_eq!(state.streak_on(day(11)), 2);
        assert_eq!(state.streak_on(day(12)), 2);
        assert_eq!(state.streak_on(day(13)), 0);
    }
}
