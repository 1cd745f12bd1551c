//! Lesson text → card deck.
//!
//! Lesson content is markdown split into pages by a horizontal rule (`---`)
//! on its own line. Each page becomes a [`LessonCard`]; a fixed completion
//! card is always appended so the deck is never empty.

use crate::model::LessonCard;

/// Heading of the terminal card appended to every deck.
pub const COMPLETION_HEADING: &str = "Conclusão";

/// Body of the terminal card appended to every deck.
pub const COMPLETION_BODY: &str = "### Parabéns!\n\nVocê finalizou o conteúdo desta aula.\n\nClique abaixo para marcar como **Concluída** e avançar.";

const DELIMITER: &str = "---";

/// Markdown shown when lesson content cannot be loaded.
#[must_use]
pub fn fallback_error_content() -> &'static str {
    "# Erro\n\nNão foi possível carregar o conteúdo."
}

/// Split raw lesson text into an ordered card deck.
///
/// - A line whose only non-whitespace content is `---` separates cards.
///   Both `\n` and `\r\n` line endings are accepted.
/// - Segments are trimmed; empty segments are dropped, so leading, trailing
///   or repeated delimiters never yield blank cards.
/// - The heading is the first `#`/`##` line of the segment; otherwise
///   `"Seção N"`, numbered over the non-empty segments.
/// - The completion card is always last.
///
/// This never fails: arbitrary input degrades to a single untitled card.
#[must_use]
pub fn parse_lesson_cards(raw: &str) -> Vec<LessonCard> {
    let normalized = raw.replace("\r\n", "\n");

    let mut cards: Vec<LessonCard> = split_segments(&normalized)
        .into_iter()
        .enumerate()
        .map(|(i, body)| {
            let heading =
                extract_heading(&body).unwrap_or_else(|| format!("Seção {}", i + 1));
            LessonCard { heading, body }
        })
        .collect();

    cards.push(completion_card());
    cards
}

/// The fixed terminal card.
#[must_use]
pub fn completion_card() -> LessonCard {
    LessonCard::new(COMPLETION_HEADING, COMPLETION_BODY)
}

fn split_segments(text: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        if line.trim() == DELIMITER {
            push_segment(&mut segments, &current);
            current.clear();
        } else {
            current.push(line);
        }
    }
    push_segment(&mut segments, &current);

    segments
}

fn push_segment(segments: &mut Vec<String>, lines: &[&str]) {
    let joined = lines.join("\n");
    let trimmed = joined.trim();
    if !trimmed.is_empty() {
        segments.push(trimmed.to_string());
    }
}

/// First line starting with one or two `#`, then whitespace, then text.
fn extract_heading(segment: &str) -> Option<String> {
    segment.lines().find_map(|line| {
        let hashes = line.chars().take_while(|&ch| ch == '#').count();
        if !(1..=2).contains(&hashes) {
            return None;
        }
        let rest = &line[hashes..];
        if !rest.starts_with([' ', '\t']) {
            return None;
        }
        let text = rest.trim();
        (!text.is_empty()).then(|| text.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_only_completion_card() {
        assert_eq!(parse_lesson_cards(""), vec![completion_card()]);
        assert_eq!(parse_lesson_cards("   \n\t\r\n  "), vec![completion_card()]);
    }

    #[test]
    fn n_segments_yield_n_plus_one_cards() {
        let raw = "# Um\n\nA\n\n---\n\n## Dois\n\nB\n---\nC";
        let cards = parse_lesson_cards(raw);
        assert_eq!(cards.len(), 4);
        assert_eq!(cards[0].heading, "Um");
        assert_eq!(cards[1].heading, "Dois");
        assert_eq!(cards[2].heading, "Seção 3");
        assert_eq!(cards[3], completion_card());
    }

    #[test]
    fn heading_from_h2() {
        let cards = parse_lesson_cards("## Título\n\nTexto");
        assert_eq!(cards[0].heading, "Título");
        assert_eq!(cards[0].body, "## Título\n\nTexto");
    }

    #[test]
    fn headerless_segment_gets_section_number() {
        let cards = parse_lesson_cards("Sem título aqui.");
        assert_eq!(cards[0].heading, "Seção 1");
    }

    #[test]
    fn h3_and_hash_without_space_are_not_headings() {
        let cards = parse_lesson_cards("### Pequeno\n#hashtag\nCorpo");
        assert_eq!(cards[0].heading, "Seção 1");
    }

    #[test]
    fn heading_may_appear_after_intro_text() {
        let cards = parse_lesson_cards("Intro\n\n# Depois\n\nMais");
        assert_eq!(cards[0].heading, "Depois");
    }

    #[test]
    fn delimiters_at_edges_do_not_create_empty_cards() {
        let cards = parse_lesson_cards("---\n# A\n---\n\n---\n# B\n---");
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[0].heading, "A");
        assert_eq!(cards[1].heading, "B");
    }

    #[test]
    fn section_numbers_count_only_non_empty_segments() {
        let cards = parse_lesson_cards("---\n\n---\nprimeiro\n---\n---\nsegundo");
        assert_eq!(cards[0].heading, "Seção 1");
        assert_eq!(cards[1].heading, "Seção 2");
    }

    #[test]
    fn crlf_and_padded_delimiters_split() {
        let raw = "# A\r\ntexto\r\n  ---  \r\n# B\r\n\t---\r\n# C";
        let cards = parse_lesson_cards(raw);
        let headings: Vec<_> = cards.iter().map(|c| c.heading.as_str()).collect();
        assert_eq!(headings, vec!["A", "B", "C", COMPLETION_HEADING]);
        assert_eq!(cards[0].body, "# A\ntexto");
    }

    #[test]
    fn inline_dashes_do_not_split() {
        let cards = parse_lesson_cards("# A\nnot --- a rule\n----\nstill A");
        assert_eq!(cards.len(), 2);
    }

    #[test]
    fn parsing_is_idempotent() {
        let raw = "# A\n\nx\n---\n## B\ny";
        assert_eq!(parse_lesson_cards(raw), parse_lesson_cards(raw));
    }

    #[test]
    fn fallback_content_parses_to_error_card() {
        let cards = parse_lesson_cards(fallback_error_content());
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].heading, "Erro");
    }

    #[test]
    fn any_non_empty_text_yields_at_least_one_card() {
        for raw in ["x", "---", "#", "# ", "\u{0}", "## \n---\n##"] {
            let cards = parse_lesson_cards(raw);
            assert!(!cards.is_empty(), "{raw:?}");
            assert_eq!(cards.last(), Some(&completion_card()));
        }
    }
}
