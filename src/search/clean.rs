//! Summary text cleanup
//!
//! Bill summaries arrive as HTML fragments inside CDATA sections. Cleaning
//! removes anything that looks like a tag, decodes character references and
//! trims the result. Tags are matched purely by pattern; nesting is never
//! checked.

use once_cell::sync::Lazy;
use regex::Regex;

/// `<` through the next `>` on the same line.
static TAG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<.*?>").expect("tag pattern is a valid regex"));

/// Strip tags, decode HTML entities and trim surrounding whitespace.
pub fn clean_text(raw: &str) -> String {
    let stripped = TAG_PATTERN.replace_all(raw, "");
    let decoded = htmlize::unescape(stripped);
    decoded.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_clean_text_strips_tags_and_whitespace() {
        assert_eq!(clean_text("<p>Hello world!    </p>"), "Hello world!");
    }

    #[test]
    fn test_clean_text_decodes_entities() {
        assert_eq!(
            clean_text("<p>Smith &amp; Wesson &#8212; &lt;b&gt;</p>"),
            "Smith & Wesson \u{2014} <b>"
        );
        assert_eq!(clean_text("caf&eacute;&nbsp;"), "caf\u{e9}");
    }

    #[test]
    fn test_legacy_entities_without_semicolon() {
        assert_eq!(clean_text("&copy 2019"), "\u{a9} 2019");
        assert_eq!(clean_text("Smith &amp Wesson"), "Smith & Wesson");
        assert_eq!(clean_text("it&#x27s"), "it's");
    }

    #[test]
    fn test_numeric_references_follow_html5_rules() {
        // C1 controls are remapped through windows-1252
        assert_eq!(clean_text("&#128;5"), "\u{20ac}5");
        assert_eq!(clean_text("a&#0;b"), "a\u{fffd}b");
        assert_eq!(clean_text("&#xD800;"), "\u{fffd}");
    }

    #[test]
    fn test_multi_codepoint_entity() {
        assert_eq!(clean_text("&NotEqualTilde;"), "\u{2242}\u{338}");
    }

    #[test]
    fn test_unknown_entity_left_alone() {
        assert_eq!(clean_text("AT&T &bogus; x"), "AT&T &bogus; x");
    }

    #[test]
    fn test_tags_do_not_span_lines() {
        assert_eq!(clean_text("a < b\nand c > d"), "a < b\nand c > d");
    }

    #[test]
    fn test_nested_and_unbalanced_tags() {
        assert_eq!(clean_text("<ul><li>one</li><li>two</ul>"), "onetwo");
        assert_eq!(clean_text("</b>dangling"), "dangling");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("   \n\t "), "");
    }

    proptest! {
        #[test]
        fn prop_plain_text_only_trimmed(s in "[a-zA-Z0-9 .,;:!?\\-\n\t]{0,64}") {
            prop_assert_eq!(clean_text(&s), s.trim());
        }

        #[test]
        fn prop_idempotent_on_clean_text(s in "[a-zA-Z0-9 .,;:!?\\-]{0,64}") {
            let once = clean_text(&s);
            prop_assert_eq!(clean_text(&once), once.clone());
        }
    }
}
