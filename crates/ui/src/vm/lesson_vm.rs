use course_core::gate;
use course_core::model::LessonKind;
use dioxus::prelude::Key;
use services::LessonPage;

use crate::views::ViewError;
use crate::vm::markdown_vm::markdown_to_html;

/// Horizontal travel, in pixels, a drag must exceed to change cards.
pub const SWIPE_THRESHOLD_PX: f64 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavDirection {
    Prev,
    Next,
}

/// Classify a completed drag. Drags that are more vertical than horizontal
/// are scrolls and never navigate.
#[must_use]
pub fn swipe_direction(dx: f64, dy: f64) -> Option<NavDirection> {
    if dy.abs() > dx.abs() {
        return None;
    }
    if dx < -SWIPE_THRESHOLD_PX {
        Some(NavDirection::Next)
    } else if dx > SWIPE_THRESHOLD_PX {
        Some(NavDirection::Prev)
    } else {
        None
    }
}

#[must_use]
pub fn key_direction(key: &Key) -> Option<NavDirection> {
    match key {
        Key::ArrowRight => Some(NavDirection::Next),
        Key::ArrowLeft => Some(NavDirection::Prev),
        _ => None,
    }
}

/// Position within a card deck. The index is always in range for a
/// non-empty deck.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeckPager {
    index: usize,
    len: usize,
}

impl DeckPager {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn can_prev(&self) -> bool {
        self.index > 0
    }

    #[must_use]
    pub fn can_next(&self) -> bool {
        self.index + 1 < self.len
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.len > 0 && self.index + 1 == self.len
    }

    /// Move one card; returns whether the index changed.
    pub fn step(&mut self, direction: NavDirection) -> bool {
        match direction {
            NavDirection::Next if self.can_next() => self.index += 1,
            NavDirection::Prev if self.can_prev() => self.index -= 1,
            _ => return false,
        }
        true
    }

    #[must_use]
    pub fn card_pct(&self) -> u8 {
        gate::position_pct(self.index, self.len)
    }

    /// `"Card 2 de 5"`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Card {} de {}", self.index + 1, self.len)
    }
}

/// Optimistic completion state of the lesson on screen.
///
/// The flag flips to completed as soon as the user asks, and reverts if the
/// write is rejected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompletionFlag {
    completed: bool,
    saving: bool,
    error: Option<ViewError>,
}

impl CompletionFlag {
    #[must_use]
    pub fn new(completed: bool) -> Self {
        Self {
            completed,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    #[must_use]
    pub fn error(&self) -> Option<ViewError> {
        self.error
    }

    /// Start a save. Returns the flag to restore on failure, or `None` if a
    /// save is already in flight.
    pub fn begin(&mut self) -> Option<bool> {
        if self.saving {
            return None;
        }
        let previous = self.completed;
        self.completed = true;
        self.saving = true;
        self.error = None;
        Some(previous)
    }

    pub fn succeed(&mut self) {
        self.saving = false;
    }

    pub fn fail(&mut self, previous: bool, error: ViewError) {
        self.completed = previous;
        self.saving = false;
        self.error = Some(error);
    }

    #[must_use]
    pub fn button_label(&self) -> &'static str {
        if self.saving {
            "Salvando..."
        } else if self.completed {
            "Concluída!"
        } else {
            "Marcar como Concluída"
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardVm {
    pub heading: String,
    pub body_html: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LessonVm {
    pub title: String,
    pub is_bonus: bool,
    pub cards: Vec<CardVm>,
    pub is_completed: bool,
    /// Course position of this lesson, for the bottom bar.
    pub course_pct: u8,
}

impl LessonVm {
    #[must_use]
    pub fn bottom_label(&self, pager: &DeckPager) -> String {
        format!(
            "{} • Card {}/{}",
            self.title,
            pager.index() + 1,
            pager.len()
        )
    }
}

#[must_use]
pub fn map_lesson(page: &LessonPage) -> LessonVm {
    LessonVm {
        title: page.lesson.title().to_string(),
        is_bonus: page.kind == LessonKind::Bonus,
        cards: page
            .cards
            .iter()
            .map(|card| CardVm {
                heading: card.heading.clone(),
                body_html: markdown_to_html(&card.body),
            })
            .collect(),
        is_completed: page.is_completed,
        course_pct: page.position_pct(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swipe_needs_threshold_and_horizontal_dominance() {
        assert_eq!(swipe_direction(-61.0, 10.0), Some(NavDirection::Next));
        assert_eq!(swipe_direction(61.0, -10.0), Some(NavDirection::Prev));
        assert_eq!(swipe_direction(-60.0, 0.0), None);
        assert_eq!(swipe_direction(30.0, 0.0), None);
        assert_eq!(swipe_direction(-100.0, 120.0), None);
    }

    #[test]
    fn arrow_keys_map_to_directions() {
        assert_eq!(key_direction(&Key::ArrowRight), Some(NavDirection::Next));
        assert_eq!(key_direction(&Key::ArrowLeft), Some(NavDirection::Prev));
        assert_eq!(key_direction(&Key::ArrowUp), None);
    }

    #[test]
    fn pager_stays_in_bounds() {
        let mut pager = DeckPager::new(3);
        assert!(!pager.can_prev());
        assert!(!pager.step(NavDirection::Prev));
        assert!(pager.step(NavDirection::Next));
        assert!(pager.step(NavDirection::Next));
        assert!(pager.is_last());
        assert!(!pager.step(NavDirection::Next));
        assert_eq!(pager.index(), 2);
        assert_eq!(pager.card_pct(), 100);
        assert_eq!(pager.label(), "Card 3 de 3");
    }

    #[test]
    fn single_card_deck_is_already_last() {
        let pager = DeckPager::new(1);
        assert!(pager.is_last());
        assert!(!pager.can_next());
        assert_eq!(pager.card_pct(), 100);
    }

    #[test]
    fn completion_is_optimistic_and_reverts_on_failure() {
        let mut flag = CompletionFlag::new(false);
        let previous = flag.begin().unwrap();
        assert!(flag.is_completed());
        assert_eq!(flag.button_label(), "Salvando...");
        assert_eq!(flag.begin(), None);

        flag.fail(previous, ViewError::SaveFailed);
        assert!(!flag.is_completed());
        assert!(!flag.is_saving());
        assert_eq!(flag.error(), Some(ViewError::SaveFailed));
        assert_eq!(flag.button_label(), "Marcar como Concluída");
    }

    #[test]
    fn completion_success_keeps_flag() {
        let mut flag = CompletionFlag::new(false);
        flag.begin();
        flag.succeed();
        assert!(flag.is_completed());
        assert_eq!(flag.button_label(), "Concluída!");
    }

    #[test]
    fn retry_clears_previous_error() {
        let mut flag = CompletionFlag::new(true);
        let previous = flag.begin().unwrap();
        flag.fail(previous, ViewError::SaveFailed);
        assert!(flag.is_completed());
        flag.begin();
        assert_eq!(flag.error(), None);
    }
}
