//! Match highlighting for terminal output

use crate::search::query::MatchSpan;
use serde::{Deserialize, Serialize};

/// ANSI "underline on"
pub const UNDERLINE: &str = "\x1b[4m";

/// ANSI "reset attributes"
pub const END_UNDERLINE: &str = "\x1b[0m";

/// Wraps matched spans of a text in a pair of markers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlighter {
    pub start_marker: String,
    pub end_marker: String,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(UNDERLINE, END_UNDERLINE)
    }
}

impl Highlighter {
    pub fn new(start_marker: impl Into<String>, end_marker: impl Into<String>) -> Self {
        Self {
            start_marker: start_marker.into(),
            end_marker: end_marker.into(),
        }
    }

    /// Render `text` with every span wrapped, followed by a newline.
    ///
    /// Span offsets count characters. Spans are expected in order and
    /// non-overlapping. A span that reaches back before the previous one is
    /// clipped, and spans are clamped to the text length.
    pub fn display(&self, text: &str, spans: &[MatchSpan]) -> String {
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_len = boundaries.len() - 1;

        let wrapped_len = spans.len() * (self.start_marker.len() + self.end_marker.len());
        let mut out = String::with_capacity(text.len() + wrapped_len + 1);
        let mut cursor = 0;

        for span in spans {
            let end = span.end.min(char_len).max(cursor);
            let start = span.start.clamp(cursor, end);

            out.push_str(&text[boundaries[cursor]..boundaries[start]]);
            out.push_str(&self.start_marker);
            out.push_str(&text[boundaries[start]..boundaries[end]]);
            out.push_str(&self.end_marker);
            cursor = end;
        }

        out.push_str(&text[boundaries[cursor]..]);
        out.push('\n');
        out
    }
}

/// Render with the default underline markers
pub fn display_matching_substring(text: &str, spans: &[MatchSpan]) -> String {
    Highlighter::default().display(text, spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_display_no_match() {
        assert_eq!(display_matching_substring("Hello World", &[]), "Hello World\n");
    }

    #[test]
    fn test_display_single_match() {
        let spans = [MatchSpan::new(3, 7)];
        assert_eq!(
            display_matching_substring("Hello World", &spans),
            format!("Hel{}lo W{}orld\n", UNDERLINE, END_UNDERLINE)
        );
    }

    #[test]
    fn test_display_multiple_and_adjacent_matches() {
        let highlighter = Highlighter::new("[", "]");
        let spans = [MatchSpan::new(0, 1), MatchSpan::new(1, 2), MatchSpan::new(4, 6)];
        assert_eq!(highlighter.display("abcdef", &spans), "[a][b]cd[ef]\n");
    }

    #[test]
    fn test_display_zero_length_span() {
        let highlighter = Highlighter::new("[", "]");
        assert_eq!(highlighter.display("abc", &[MatchSpan::new(1, 1)]), "a[]bc\n");
        assert_eq!(highlighter.display("abc", &[MatchSpan::new(3, 3)]), "abc[]\n");
    }

    #[test]
    fn test_display_clamps_bad_spans() {
        let highlighter = Highlighter::new("[", "]");
        let spans = [MatchSpan::new(1, 3), MatchSpan::new(2, 10)];
        assert_eq!(highlighter.display("abcd", &spans), "a[bc][d]\n");
    }

    #[test]
    fn test_display_multibyte_text() {
        let highlighter = Highlighter::new("[", "]");
        let text = "résumé";
        let spans = crate::search::Matcher::new("é").unwrap().find_spans(text);
        assert_eq!(highlighter.display(text, &spans), "r[é]sum[é]\n");
    }

    #[test]
    fn test_display_counts_characters_not_bytes() {
        let highlighter = Highlighter::new("[", "]");
        assert_eq!(
            highlighter.display("résumé", &[MatchSpan::new(1, 2)]),
            "r[é]sumé\n"
        );
        assert_eq!(
            highlighter.display("naïve café", &[MatchSpan::new(2, 5), MatchSpan::new(9, 40)]),
            "na[ïve] caf[é]\n"
        );
    }

    proptest! {
        #[test]
        fn prop_no_spans_is_text_plus_newline(text in ".{0,64}") {
            prop_assert_eq!(display_matching_substring(&text, &[]), format!("{}\n", text));
        }

        #[test]
        fn prop_stripping_markers_restores_text(text in "[a-zéü€ ]{0,40}") {
            let highlighter = Highlighter::new("<", ">");
            let spans = crate::search::Matcher::new("[aeiouéü]+").unwrap().find_spans(&text);
            let rendered = highlighter.display(&text, &spans);
            let restored: String = rendered.chars().filter(|c| *c != '<' && *c != '>').collect();
            prop_assert_eq!(restored, format!("{}\n", text));
        }

        #[test]
        fn prop_arbitrary_spans_never_drop_text(
            text in "[a-zé€ ]{0,20}",
            raw in proptest::collection::vec((0usize..30, 0usize..30), 0..6),
        ) {
            let spans: Vec<MatchSpan> = raw.into_iter().map(|(a, b)| MatchSpan::new(a, b)).collect();
            let rendered = Highlighter::new("<", ">").display(&text, &spans);
            let restored: String = rendered.chars().filter(|c| *c != '<' && *c != '>').collect();
            prop_assert_eq!(restored, format!("{}\n", text));
        }
    }
}
