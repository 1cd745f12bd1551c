use crate::model::ids::LessonSlug;

//
// ─── LESSON ────────────────────────────────────────────────────────────────────
//

/// Which track a lesson belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LessonKind {
    /// Part of the gated, ordered course.
    Core,
    /// Unlocked only after every core lesson is completed.
    Bonus,
}

/// A lesson definition. Lessons are fixed at build time and never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lesson {
    slug: &'static str,
    title: &'static str,
    description: &'static str,
    duration: &'static str,
    xp: u32,
    category: &'static str,
}

impl Lesson {
    #[must_use]
    pub const fn new(
        slug: &'static str,
        title: &'static str,
        description: &'static str,
        duration: &'static str,
        xp: u32,
        category: &'static str,
    ) -> Self {
        Self {
            slug,
            title,
            description,
            duration,
            xp,
            category,
        }
    }

    #[must_use]
    pub fn slug(&self) -> &'static str {
        self.slug
    }

    #[must_use]
    pub fn title(&self) -> &'static str {
        self.title
    }

    #[must_use]
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Human-readable duration, e.g. `"12 min"`.
    #[must_use]
    pub fn duration(&self) -> &'static str {
        self.duration
    }

    #[must_use]
    pub fn xp(&self) -> u32 {
        self.xp
    }

    #[must_use]
    pub fn category(&self) -> &'static str {
        self.category
    }

    #[must_use]
    pub fn has_slug(&self, slug: &LessonSlug) -> bool {
        self.slug == slug.as_str()
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// The ordered core course. Position in this array is the unlock order.
pub const LESSONS: [Lesson; 5] = [
    Lesson::new(
        "01-introducao",
        "01. Introdução ao Método M",
        "Entenda a filosofia e os objetivos.",
        "5 min",
        10,
        "Fundamentos",
    ),
    Lesson::new(
        "02-fome-saciedade",
        "02. Fome e Saciedade",
        "Reprograme seus hormônios.",
        "12 min",
        20,
        "Nutrição",
    ),
    Lesson::new(
        "03-rotina-minima",
        "03. Rotina Mínima Viável",
        "O mínimo efetivo para resultados.",
        "8 min",
        15,
        "Hábito",
    ),
    Lesson::new(
        "04-sono-luz",
        "04. Sono e Luz",
        "Biohacking circadiano avançado.",
        "15 min",
        25,
        "Sono",
    ),
    Lesson::new(
        "05-performance",
        "05. Performance Máxima",
        "Otimização cognitiva e física.",
        "10 min",
        20,
        "Cognição",
    ),
];

/// Bonus lessons revealed by the surprise page.
pub const BONUS_LESSONS: [Lesson; 2] = [
    Lesson::new(
        "rotina-7-dias",
        "Rotina de 7 Dias",
        "Protocolo de Ativação Semanal.",
        "7 dias",
        100,
        "Protocolo",
    ),
    Lesson::new(
        "lista-compras-secreta",
        "Lista de Compras Secreta",
        "Protocolo de Otimização Nutricional.",
        "Vitalício",
        100,
        "Nutrição",
    ),
];

pub const TOTAL_LESSONS: usize = LESSONS.len();

/// A catalog hit: the lesson plus where it lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub lesson: Lesson,
    pub kind: LessonKind,
    /// Zero-based position within its own track.
    pub position: usize,
}

/// Looks up a lesson by slug across the core course and the bonus track.
///
/// Returns `None` for unknown slugs, which callers treat as "not found".
#[must_use]
pub fn find_lesson(slug: &LessonSlug) -> Option<CatalogEntry> {
    let core = LESSONS
        .iter()
        .enumerate()
        .find(|(_, lesson)| lesson.has_slug(slug))
        .map(|(position, lesson)| CatalogEntry {
            lesson: *lesson,
            kind: LessonKind::Core,
            position,
        });
    core.or_else(|| {
        BONUS_LESSONS
            .iter()
            .enumerate()
            .find(|(_, lesson)| lesson.has_slug(slug))
            .map(|(position, lesson)| CatalogEntry {
                lesson: *lesson,
                kind: LessonKind::Bonus,
                position,
            })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_slugs_are_valid_and_unique() {
        let mut seen = HashSet::new();
        for lesson in LESSONS.iter().chain(BONUS_LESSONS.iter()) {
            assert!(LessonSlug::parse(lesson.slug()).is_ok(), "{}", lesson.slug());
            assert!(seen.insert(lesson.slug()), "duplicate {}", lesson.slug());
        }
    }

    #[test]
    fn find_lesson_reports_track_and_position() {
        let slug = LessonSlug::parse("03-rotina-minima").unwrap();
        let entry = find_lesson(&slug).unwrap();
        assert_eq!(entry.kind, LessonKind::Core);
        assert_eq!(entry.position, 2);
        assert_eq!(entry.lesson.xp(), 15);

        let bonus = LessonSlug::parse("lista-compras-secreta").unwrap();
        let entry = find_lesson(&bonus).unwrap();
        assert_eq!(entry.kind, LessonKind::Bonus);
        assert_eq!(entry.position, 1);
    }

    #[test]
    fn find_lesson_unknown_slug_is_none() {
        let slug = LessonSlug::parse("99-nao-existe").unwrap();
        assert!(find_lesson(&slug).is_none());
    }
}
