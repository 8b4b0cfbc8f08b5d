//! Key handling
//!
//! Keys arrive either as crossterm events (the real terminal) or as raw
//! bytes (scripted input, pipes). Both are folded into [`Key`].

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// A single keystroke as seen by the interactive loops
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Tab,
    Enter,
    Backspace,
    Escape,
    /// Printable character
    Char(char),
    /// Ctrl+C / Ctrl+D
    Interrupt,
    /// Anything else (function keys, releases, unknown sequences)
    Other,
}

impl From<KeyEvent> for Key {
    fn from(key: KeyEvent) -> Self {
        // Ignore non-press events
        if key.kind != KeyEventKind::Press {
            return Key::Other;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
        {
            return Key::Interrupt;
        }

        match key.code {
            KeyCode::Esc => Key::Escape,
            KeyCode::Enter => Key::Enter,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Tab => Key::Tab,
            KeyCode::Backspace => Key::Backspace,
            KeyCode::Char(c) => Key::Char(c),
            _ => Key::Other,
        }
    }
}

/// Decodes a raw terminal byte stream into keys.
///
/// Recognizes the `ESC [ A..D` and `ESC O A..D` arrow sequences, tab,
/// CR/LF, DEL/BS and the ^C/^D interrupts. Everything printable becomes
/// [`Key::Char`].
#[derive(Debug, Default)]
pub struct KeyDecoder;

impl KeyDecoder {
    pub fn decode(bytes: &[u8]) -> Vec<Key> {
        let text = String::from_utf8_lossy(bytes);
        let mut chars = text.chars().peekable();
        let mut keys = Vec::new();

        while let Some(c) = chars.next() {
            let key = match c {
                '\x1b' => match chars.peek() {
                    Some('[') | Some('O') => {
                        chars.next();
                        match chars.next() {
                            Some('A') => Key::Up,
                            Some('B') => Key::Down,
                            Some('C') => Key::Right,
                            Some('D') => Key::Left,
                            _ => Key::Other,
                        }
                    }
                    _ => Key::Escape,
                },
                '\t' => Key::Tab,
                '\n' | '\r' => Key::Enter,
                '\x7f' | '\x08' => Key::Backspace,
                '\x03' | '\x04' => Key::Interrupt,
                c if c.is_control() => Key::Other,
                c => Key::Char(c),
            };
            keys.push(key);
        }
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_arrows() {
        let keys = KeyDecoder::decode(b"\x1b[A\x1b[B\x1b[C\x1b[D\x1bOB");
        assert_eq!(
            keys,
            vec![Key::Up, Key::Down, Key::Right, Key::Left, Key::Down]
        );
    }

    #[test]
    fn test_decode_letters_are_not_arrows() {
        assert_eq!(
            KeyDecoder::decode(b"AB"),
            vec![Key::Char('A'), Key::Char('B')]
        );
    }

    #[test]
    fn test_decode_control_keys() {
        assert_eq!(
            KeyDecoder::decode(b"\t\n\r\x7f\x03\x1b"),
            vec![
                Key::Tab,
                Key::Enter,
                Key::Enter,
                Key::Backspace,
                Key::Interrupt,
                Key::Escape
            ]
        );
    }

    #[test]
    fn test_decode_utf8() {
        assert_eq!(KeyDecoder::decode("ñ ".as_bytes()), vec![Key::Char('ñ'), Key::Char(' ')]);
    }

    #[test]
    fn test_from_key_event() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(Key::from(event), Key::Interrupt);
        let event = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::empty());
        assert_eq!(Key::from(event), Key::Char('x'));
        let event = KeyEvent::new(KeyCode::F(2), KeyModifiers::empty());
        assert_eq!(Key::from(event), Key::Other);
    }
}
