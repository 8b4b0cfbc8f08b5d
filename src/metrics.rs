//! On-screen width of strings that may carry escape sequences

use crate::ansi::BACKSPACE;
use crate::markup::{CONTROL, ESCAPE, TAB_SPACES};
use unicode_width::UnicodeWidthChar;

/// Number of terminal columns `text` occupies when printed.
///
/// Tabs count as four columns, escape sequences and `^C`/`^Z`/DEL as
/// nothing, wide glyphs as two. A backspace and the character it erases
/// are both removed from the count, on the assumption that the erased
/// character is one column wide.
pub fn display_width(text: &str) -> usize {
    let text = text.replace('\t', TAB_SPACES);
    let text = ESCAPE.replace_all(&text, "");
    let text = CONTROL.replace_all(&text, "");

    let width: usize = text.chars().map(char_width).sum();
    width.saturating_sub(backspace_adjustment(&text))
}

/// Columns for a single printable char: two for wide glyphs, one otherwise
pub fn char_width(c: char) -> usize {
    match UnicodeWidthChar::width(c) {
        Some(2) => 2,
        _ => 1,
    }
}

/// Columns to remove for backspaces, scanning from the end of the string
fn backspace_adjustment(text: &str) -> usize {
    let mut pending = 0usize;
    let mut adjustment = 0usize;
    for c in text.chars().rev() {
        if c == BACKSPACE {
            pending += 1;
        } else if pending > 0 {
            pending -= 1;
            adjustment += 2;
        }
    }
    adjustment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::strip_formatting;

    const ITALIC: &str = "\x1b[3m";
    const RED: &str = "\x1b[31m";
    const CLOSE: &str = "\x1b[0m";

    #[test]
    fn test_plain_widths() {
        assert_eq!(display_width("string!"), 7);
        assert_eq!(display_width("striñg!"), 7);
        assert_eq!(display_width("\ttab"), 7);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn test_wide_glyphs() {
        assert_eq!(display_width("仝string"), 8);
        assert_eq!(display_width("🌈string"), 8);
    }

    #[test]
    fn test_control_bytes_ignored() {
        assert_eq!(display_width("str\x7fing!"), 7);
        assert_eq!(display_width("\x03str\x1aing!"), 7);
    }

    #[test]
    fn test_backspace_cancels_previous_char() {
        assert_eq!(display_width("str\x08iing!"), 7);
        assert_eq!(display_width("str🌈🌈\x08\x08ng"), 7);
    }

    #[test]
    fn test_backspace_over_wide_glyph_under_subtracts() {
        // the rainbow is two columns wide but only one is cancelled
        assert_eq!(display_width("str🌈🌈\x08ng"), 8);
        assert_eq!(display_width("🌈\x08"), 1);
    }

    #[test]
    fn test_unmatched_backspaces() {
        // nothing to their left to cancel, so they count as columns
        assert_eq!(display_width("\x08\x08\x08a"), 4);
        assert_eq!(display_width("a\x08"), 0);
    }

    #[test]
    fn test_escape_sequences_ignored() {
        let wrap = |s: &str| format!("{}{}{}{}", RED, ITALIC, s, CLOSE);
        assert_eq!(display_width(&wrap("string!")), 7);
        assert_eq!(display_width(&wrap("striñg!")), 7);
        assert_eq!(display_width(&wrap("\ttab")), 7);
        assert_eq!(display_width(&wrap("仝string")), 8);
        assert_eq!(display_width(&wrap("🌈string")), 8);
        assert_eq!(display_width(&wrap("str\x7fing!")), 7);
        assert_eq!(display_width(&wrap("str\x08iing!")), 7);
        assert_eq!(display_width(&wrap("str🌈🌈\x08ng")), 8);
    }

    #[test]
    fn test_csi_only_width_matches_stripped() {
        let samples = [
            "\x1b[1mbold\x1b[0m",
            "\x1b[31;1mred bold\x1b[0m plain",
            "\x1b[2Kcleared",
            "no escapes at all",
        ];
        for s in samples {
            let stripped = strip_formatting(s);
            assert_eq!(display_width(s), display_width(&stripped));
            assert_eq!(display_width(s), stripped.chars().count());
        }
    }
}
