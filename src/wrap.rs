//! Word-wrap that steps over ANSI escape sequences
//!
//! Lines break on the last space or tab before the column limit. Escape
//! sequences do not count towards the limit: an `ESC` suspends counting
//! until the next `m`, which covers the SGR codes the markup produces.
//! A blank line (two or more newlines) always ends a line, and the blank
//! lines themselves are kept. A word longer than the limit is cut at the
//! limit.

use crate::ansi::ESC;
use crate::metrics::char_width;
use tracing::trace;

/// Where to end the current line, and how many blank lines follow it
#[derive(Debug, PartialEq, Eq)]
struct Cut {
    at: usize,
    blanks: usize,
}

/// Wrap `text` to `width` columns, joining the lines with `\n`.
pub fn wrap(text: &str, width: usize) -> String {
    wrap_lines(text, width).join("\n")
}

/// Wrap `text` to `width` columns.
pub fn wrap_lines(text: &str, width: usize) -> Vec<String> {
    let limit = width.max(1) + 1;
    let mut lines = Vec::new();
    let mut tail: Vec<char> = text.chars().collect();

    loop {
        let line = trim(&tail);
        let visible: usize = line.iter().map(|&c| char_width(c)).sum();
        if line.len() < limit && visible < limit {
            lines.push(line.iter().collect());
            break;
        }

        let cut = find_cut(line, limit);
        lines.push(line[..cut.at].iter().collect());
        lines.extend(std::iter::repeat_n(String::new(), cut.blanks));

        let rest = &line[cut.at..];
        if trim(rest).is_empty() {
            break;
        }
        tail = rest.to_vec();
    }

    trace!(width, lines = lines.len(), "Wrapped text");
    lines
}

fn is_trimmable(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\0' | '\x0b')
}

fn trim(chars: &[char]) -> &[char] {
    let start = chars.iter().position(|&c| !is_trimmable(c));
    let Some(start) = start else {
        return &[];
    };
    let end = chars
        .iter()
        .rposition(|&c| !is_trimmable(c))
        .map_or(chars.len(), |i| i + 1);
    &chars[start..end]
}

/// Scan a trimmed line for the position to break it at
fn find_cut(chars: &[char], limit: usize) -> Cut {
    let mut counted = 0usize;
    let mut counting = true;
    let mut last_break: Option<usize> = None;

    for (i, &c) in chars.iter().enumerate() {
        if c == ESC {
            counting = false;
        }
        if c == ' ' || c == '\t' {
            last_break = Some(i);
        }
        if counting {
            counted += char_width(c);
        }
        if c == 'm' && !counting {
            counting = true;
        }

        if counted >= limit {
            // no whitespace before the limit: hard break
            let at = last_break.unwrap_or(i).max(1);
            return Cut { at, blanks: 0 };
        }

        if c == '\n' && chars.get(i + 1) == Some(&'\n') {
            let blanks = chars[i + 1..].iter().take_while(|&&c| c == '\n').count();
            return Cut { at: i, blanks };
        }
    }

    Cut {
        at: chars.len(),
        blanks: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::display_width;

    const SAMPLE: &str = "this is the test text for testing wrapping that is ANSI safe. we are testing this on thirty cols. this line ends on on.";

    #[test]
    fn test_first_line() {
        let wrapped = wrap(SAMPLE, 30);
        assert_eq!(wrapped.lines().next(), Some("this is the test text for"));
    }

    #[test]
    fn test_wrap_plain_paragraphs() {
        let text = format!(
            "{}\n\nNew paragraph.\n\n\nNew paragraph after two PHP_EOL.",
            SAMPLE
        );
        let expected = "this is the test text for\n\
                        testing wrapping that is ANSI\n\
                        safe. we are testing this on\n\
                        thirty cols. this line ends on\n\
                        on.\n\
                        \n\
                        New paragraph.\n\
                        \n\
                        \n\
                        New paragraph after two\n\
                        PHP_EOL.";
        assert_eq!(wrap(&text, 30), expected);
    }

    #[test]
    fn test_wrap_styled_text() {
        let text = "this is the \x1b[31m\x1b[1m\x1b[3mtest\x1b[0m text for testing wrapping that is ANSI safe. we are testing this on thirty cols. this line ends on on.";
        let wrapped = wrap(text, 30);
        let lines: Vec<&str> = wrapped.lines().collect();
        assert_eq!(lines[0], "this is the \x1b[31m\x1b[1m\x1b[3mtest\x1b[0m text for");
        assert_eq!(lines[1], "testing wrapping that is ANSI");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(wrap("  short  ", 30), "short");
        assert_eq!(wrap("", 30), "");
    }

    #[test]
    fn test_lines_fit_width() {
        for width in [10, 17, 30, 45] {
            for line in wrap_lines(SAMPLE, width) {
                assert!(display_width(&line) <= width, "{:?} wider than {}", line, width);
            }
        }
    }

    #[test]
    fn test_hard_break_without_whitespace() {
        let lines = wrap_lines("abcdefghijklmnopqrstuvwxyz", 10);
        assert_eq!(lines, vec!["abcdefghij", "klmnopqrst", "uvwxyz"]);
    }

    #[test]
    fn test_hard_break_after_long_word() {
        let lines = wrap_lines("supercalifragilistic word", 8);
        assert_eq!(lines, vec!["supercal", "ifragili", "stic", "word"]);
    }

    #[test]
    fn test_wide_glyphs_count_double() {
        let lines = wrap_lines("仝仝仝仝 仝仝仝仝", 10);
        assert_eq!(lines, vec!["仝仝仝仝", "仝仝仝仝"]);
    }

    #[test]
    fn test_escape_heavy_line_has_no_trailing_blank() {
        let text = "\x1b[31m\x1b[1m\x1b[4mshort\x1b[0m";
        assert_eq!(wrap(text, 10), text);
    }
}
