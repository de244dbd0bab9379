//! Greedy word wrapping for fixed-width terminal output.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A run of optional whitespace followed by one word.
    static ref SEGMENT: Regex = Regex::new(r"\s*\S+").expect("segment pattern is valid");
}

/// Reflow a single line into lines of at most `width` characters.
///
/// Words are never split; a word longer than `width` gets a line of its
/// own. The first line keeps the input's leading whitespace, later lines
/// start at a word. A line with no words yields one empty line.
pub fn wrap(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let line = line.trim_end();

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for (idx, segment) in SEGMENT.find_iter(line).map(|m| m.as_str()).enumerate() {
        let len = segment.chars().count();
        if idx == 0 || current_len + len <= width {
            current.push_str(segment);
            current_len += len;
        } else {
            lines.push(std::mem::take(&mut current));
            let word = segment.trim_start();
            current.push_str(word);
            current_len = word.chars().count();
        }
    }

    lines.push(current);
    lines
}

/// Wrap every line of `text` and join the results with newlines.
pub fn wrap_text(text: &str, width: usize) -> String {
    text.lines()
        .flat_map(|line| wrap(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wrap_basic() {
        assert_eq!(wrap("the quick brown fox", 10), ["the quick", "brown fox"]);
    }

    #[test]
    fn test_wrap_empty() {
        assert_eq!(wrap("", 10), [""]);
        assert_eq!(wrap("   \t ", 10), [""]);
    }

    #[test]
    fn test_wrap_long_word_kept_whole() {
        assert_eq!(
            wrap("averylongwordthatoverflows", 5),
            ["averylongwordthatoverflows"]
        );
        assert_eq!(
            wrap("a averylongword b", 5),
            ["a", "averylongword", "b"]
        );
    }

    #[test]
    fn test_wrap_keeps_leading_whitespace_on_first_line() {
        assert_eq!(wrap("    (map inc xs) ;; bump", 16), ["    (map inc xs)", ";; bump"]);
    }

    #[test]
    fn test_wrap_keeps_tab_indent() {
        assert_eq!(wrap("\t\t(inc x) ;; add one", 10), ["\t\t(inc x)", ";; add one"]);
        assert_eq!(wrap("a\tb", 1), ["a", "b"]);
    }

    #[test]
    fn test_wrap_drops_trailing_whitespace() {
        assert_eq!(wrap("fits   ", 4), ["fits"]);
    }

    #[test]
    fn test_wrap_exact_width() {
        assert_eq!(wrap("abc def", 7), ["abc def"]);
        assert_eq!(wrap("abc def", 6), ["abc", "def"]);
    }

    #[test]
    fn test_wrap_zero_width_treated_as_one() {
        assert_eq!(wrap("a b", 0), ["a", "b"]);
    }

    #[test]
    fn test_wrap_text_multiline() {
        assert_eq!(
            wrap_text("one two three\n\nfour", 7),
            "one two\nthree\n\nfour"
        );
    }

    proptest! {
        #[test]
        fn prop_wrap_preserves_words(line in "[ \ta-z]{0,60}", width in 1usize..30) {
            let wrapped = wrap(&line, width);
            let rejoined = wrapped.join(" ");
            let expected: Vec<&str> = line.split_whitespace().collect();
            let actual: Vec<&str> = rejoined.split_whitespace().collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn prop_wrap_respects_width(line in "[ \ta-z]{0,60}", width in 1usize..30) {
            for out in wrap(&line, width) {
                let len = out.chars().count();
                prop_assert!(
                    len <= width || out.split_whitespace().count() == 1,
                    "line {:?} exceeds width {}", out, width
                );
            }
        }

        #[test]
        fn prop_wrap_continuation_lines_start_with_word(line in "[ \ta-z]{0,60}", width in 1usize..30) {
            for out in wrap(&line, width).iter().skip(1) {
                prop_assert!(out.chars().next().is_some_and(|c| !c.is_whitespace()));
            }
        }

        #[test]
        fn prop_wrap_first_line_keeps_indent(line in "[ \ta-z]{0,60}", width in 1usize..30) {
            prop_assume!(!line.trim().is_empty());
            let indent = &line[..line.len() - line.trim_start().len()];
            let wrapped = wrap(&line, width);
            prop_assert!(
                wrapped[0].starts_with(indent),
                "first line {:?} lost indent {:?}", wrapped[0], indent
            );
            prop_assert!(!wrapped[0][indent.len()..].starts_with(char::is_whitespace));
        }
    }
}
