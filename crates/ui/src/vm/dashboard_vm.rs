use course_core::gate::{LessonStatus, ProgressSummary};
use course_core::model::{LESSONS, LessonSlug, find_lesson};

/// One row of the training module list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonRowVm {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub category: String,
    pub xp_label: String,
    pub status: LessonStatus,
}

impl LessonRowVm {
    #[must_use]
    pub fn is_accessible(&self) -> bool {
        self.status != LessonStatus::Locked
    }

    #[must_use]
    pub fn status_class(&self) -> &'static str {
        match self.status {
            LessonStatus::Completed => "lesson-row lesson-row--completed",
            LessonStatus::Current => "lesson-row lesson-row--current",
            LessonStatus::Available => "lesson-row lesson-row--available",
            LessonStatus::Locked => "lesson-row lesson-row--locked",
        }
    }

    #[must_use]
    pub fn icon(&self) -> &'static str {
        match self.status {
            LessonStatus::Completed => "✓",
            LessonStatus::Current => "▶",
            LessonStatus::Available => "○",
            LessonStatus::Locked => "🔒",
        }
    }
}

/// Shortcut back into the last lesson opened on this device.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResumeVm {
    pub slug: String,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DashboardVm {
    pub percentage: u8,
    pub lessons_label: String,
    pub level: &'static str,
    pub bonus_unlocked: bool,
    pub streak_days: u32,
    pub resume: Option<ResumeVm>,
    pub rows: Vec<LessonRowVm>,
}

#[must_use]
pub fn map_dashboard(
    summary: &ProgressSummary,
    streak_days: u32,
    last_lesson: Option<&LessonSlug>,
) -> DashboardVm {
    let rows = LESSONS
        .iter()
        .zip(summary.statuses.iter())
        .map(|(lesson, status)| LessonRowVm {
            slug: lesson.slug().to_string(),
            title: lesson.title().to_string(),
            description: lesson.description().to_string(),
            duration: lesson.duration().to_string(),
            category: lesson.category().to_string(),
            xp_label: format!("+{} XP", lesson.xp()),
            status: *status,
        })
        .collect();

    let resume = last_lesson.and_then(find_lesson).map(|entry| ResumeVm {
        slug: entry.lesson.slug().to_string(),
        title: entry.lesson.title().to_string(),
    });

    DashboardVm {
        percentage: summary.percentage,
        lessons_label: format!("{}/{}", summary.completed, summary.total),
        level: summary.level_label(),
        bonus_unlocked: summary.bonus_unlocked,
        streak_days,
        resume,
        rows,
    }
}
