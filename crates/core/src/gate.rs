//! Access gating over the ordered course.
//!
//! Everything here is a pure function of the completed-slug set and the lesson
//! order. Callers re-evaluate after every read of the persistence layer; no
//! result is cached.

use std::collections::HashSet;

use crate::model::{LESSONS, Lesson, LessonSlug};

/// Percentage required to unlock the bonus content.
pub const UNLOCK_THRESHOLD_PCT: u8 = 100;

/// Rounded completion percentage, `round(completed / total * 100)`.
///
/// `total == 0` yields 0. `completed` is clamped to `total`.
#[must_use]
pub fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    // Integer round-half-up of completed * 100 / total.
    let pct = (completed * 200 + total) / (total * 2);
    u8::try_from(pct).unwrap_or(100)
}

/// Progress through an ordered sequence when standing at zero-based `index`.
///
/// Used for both the lesson position in the course and the card position in
/// a deck. An empty sequence yields 0.
#[must_use]
pub fn position_pct(index: usize, total: usize) -> u8 {
    percentage(index.saturating_add(1), total)
}

/// Whether the bonus content is unlocked at the given percentage.
#[must_use]
pub fn bonus_unlocked(percentage: u8) -> bool {
    percentage >= UNLOCK_THRESHOLD_PCT
}

/// Lesson `index` is accessible when it is the first lesson, its predecessor
/// is completed, or it is itself already completed.
#[must_use]
pub fn is_accessible(lessons: &[Lesson], completed: &HashSet<LessonSlug>, index: usize) -> bool {
    let Some(lesson) = lessons.get(index) else {
        return false;
    };
    if index == 0 || completed.contains(lesson.slug()) {
        return true;
    }
    lessons
        .get(index - 1)
        .is_some_and(|previous| completed.contains(previous.slug()))
}

/// First lesson in order that is not completed.
#[must_use]
pub fn current_lesson_index(lessons: &[Lesson], completed: &HashSet<LessonSlug>) -> Option<usize> {
    lessons
        .iter()
        .position(|lesson| !completed.contains(lesson.slug()))
}

/// Number of catalog lessons present in `completed`. Unknown slugs are ignored.
#[must_use]
pub fn completed_count(lessons: &[Lesson], completed: &HashSet<LessonSlug>) -> usize {
    lessons
        .iter()
        .filter(|lesson| completed.contains(lesson.slug()))
        .count()
}

/// Display state of a lesson row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonStatus {
    Completed,
    /// The recommended next lesson.
    Current,
    /// Accessible but neither completed nor current.
    Available,
    Locked,
}

/// Snapshot of gate decisions for the whole course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressSummary {
    pub completed: usize,
    pub total: usize,
    pub percentage: u8,
    pub bonus_unlocked: bool,
    pub current: Option<usize>,
    pub statuses: Vec<LessonStatus>,
}

impl ProgressSummary {
    /// Evaluate every gate rule against `lessons` in order.
    #[must_use]
    pub fn evaluate(lessons: &[Lesson], completed: &HashSet<LessonSlug>) -> Self {
        let done = completed_count(lessons, completed);
        let total = lessons.len();
        let pct = percentage(done, total);
        let current = current_lesson_index(lessons, completed);
        let statuses = (0..total)
            .map(|index| {
                if completed.contains(lessons[index].slug()) {
                    LessonStatus::Completed
                } else if current == Some(index) {
                    LessonStatus::Current
                } else if is_accessible(lessons, completed, index) {
                    LessonStatus::Available
                } else {
                    LessonStatus::Locked
                }
            })
            .collect();

        Self {
            completed: done,
            total,
            percentage: pct,
            bonus_unlocked: bonus_unlocked(pct),
            current,
            statuses,
        }
    }

    /// Evaluate against the built-in course.
    #[must_use]
    pub fn for_course(completed: &HashSet<LessonSlug>) -> Self {
        Self::evaluate(&LESSONS, completed)
    }

    #[must_use]
    pub fn is_accessible(&self, index: usize) -> bool {
        matches!(
            self.statuses.get(index),
            Some(LessonStatus::Completed | LessonStatus::Current | LessonStatus::Available)
        )
    }

    /// Rank label shown on the dashboard.
    #[must_use]
    pub fn level_label(&self) -> &'static str {
        if self.percentage >= UNLOCK_THRESHOLD_PCT {
            "Elite"
        } else {
            "Iniciado"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(slugs: &[&str]) -> HashSet<LessonSlug> {
        slugs
            .iter()
            .map(|slug| LessonSlug::parse(*slug).unwrap())
            .collect()
    }

    fn first(n: usize) -> HashSet<LessonSlug> {
        LESSONS
            .iter()
            .take(n)
            .map(|lesson| LessonSlug::parse(lesson.slug()).unwrap())
            .collect()
    }

    #[test]
    fn percentage_examples() {
        assert_eq!(percentage(0, 5), 0);
        assert_eq!(percentage(3, 5), 60);
        assert_eq!(percentage(5, 5), 100);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(9, 5), 100);
    }

    #[test]
    fn position_pct_counts_the_current_item() {
        assert_eq!(position_pct(0, 5), 20);
        assert_eq!(position_pct(4, 5), 100);
        assert_eq!(position_pct(0, 3), 33);
        assert_eq!(position_pct(0, 0), 0);
        assert_eq!(position_pct(7, 4), 100);
    }

    #[test]
    fn gate_unlocks_only_at_full_completion() {
        let none = ProgressSummary::for_course(&first(0));
        assert_eq!(none.percentage, 0);
        assert!(!none.bonus_unlocked);

        let partial = ProgressSummary::for_course(&first(3));
        assert_eq!(partial.percentage, 60);
        assert!(!partial.bonus_unlocked);
        assert_eq!(partial.level_label(), "Iniciado");

        let all = ProgressSummary::for_course(&first(5));
        assert_eq!(all.percentage, 100);
        assert!(all.bonus_unlocked);
        assert_eq!(all.current, None);
        assert_eq!(all.level_label(), "Elite");
    }

    #[test]
    fn first_lesson_is_always_accessible() {
        assert!(is_accessible(&LESSONS, &first(0), 0));
    }

    #[test]
    fn lesson_two_requires_predecessor_or_itself() {
        let empty = first(0);
        assert!(!is_accessible(&LESSONS, &empty, 2));

        let with_prev = completed(&["02-fome-saciedade"]);
        assert!(is_accessible(&LESSONS, &with_prev, 2));

        let with_self = completed(&["03-rotina-minima"]);
        assert!(is_accessible(&LESSONS, &with_self, 2));
    }

    #[test]
    fn out_of_range_index_is_not_accessible() {
        assert!(!is_accessible(&LESSONS, &first(5), LESSONS.len()));
    }

    #[test]
    fn statuses_mark_current_and_locked() {
        let summary = ProgressSummary::for_course(&first(2));
        assert_eq!(
            summary.statuses,
            vec![
                LessonStatus::Completed,
                LessonStatus::Completed,
                LessonStatus::Current,
                LessonStatus::Locked,
                LessonStatus::Locked,
            ]
        );
        assert_eq!(summary.current, Some(2));
    }

    #[test]
    fn completed_lesson_stays_accessible_after_gap() {
        // Lesson 4 completed while lesson 3 is not: 4 stays open, 5 opens through 4.
        let summary = ProgressSummary::for_course(&completed(&[
            "01-introducao",
            "04-sono-luz",
        ]));
        assert_eq!(summary.statuses[1], LessonStatus::Current);
        assert_eq!(summary.statuses[2], LessonStatus::Locked);
        assert_eq!(summary.statuses[3], LessonStatus::Completed);
        assert_eq!(summary.statuses[4], LessonStatus::Available);
        assert!(summary.is_accessible(4));
        assert!(!summary.is_accessible(2));
    }

    #[test]
    fn unknown_slugs_do_not_count() {
        let mut set = first(4);
        set.insert(LessonSlug::parse("rotina-7-dias").unwrap());
        let summary = ProgressSummary::for_course(&set);
        assert_eq!(summary.completed, 4);
        assert_eq!(summary.percentage, 80);
        assert!(!summary.bonus_unlocked);
    }
}
