//! Key loop for the vertical and horizontal menus

use super::layout::{BlockLayout, LineLayout};
use super::{Menu, MenuState, Selectable};
use crate::error::{Error, Result};
use crate::term::{CursorGuard, Key, Terminal};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Vertical,
    Horizontal,
}

/// What a key does to a list menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Next,
    Prev,
    Choose,
    Cancel,
    Leader(char),
    Ignore,
}

impl Orientation {
    fn action(&self, key: Key) -> Action {
        match (self, key) {
            (_, Key::Down | Key::Tab) => Action::Next,
            (_, Key::Up) => Action::Prev,
            (Orientation::Horizontal, Key::Right) => Action::Next,
            (Orientation::Horizontal, Key::Left) => Action::Prev,
            (_, Key::Enter) => Action::Choose,
            (_, Key::Interrupt) => Action::Cancel,
            (_, Key::Char(c)) => Action::Leader(c),
            _ => Action::Ignore,
        }
    }
}

/// Draw the menu for the current terminal width, returning the rows used
fn draw<T: Terminal + ?Sized>(
    menu: &Menu,
    term: &mut T,
    state: &MenuState,
    orientation: Orientation,
) -> Result<usize> {
    let columns = term.columns();
    let header = state.header.as_deref();
    let selected_style = menu.effective_selected_style();

    let (screen, rows) = match orientation {
        Orientation::Vertical => {
            let displays = state.displays();
            let layout = BlockLayout::new(header, &displays, menu.placement(), columns);
            let screen = layout.render(state.selected(), &menu.option_style, &selected_style);
            (screen, layout.rows())
        }
        Orientation::Horizontal => {
            let displays = state.displays();
            let layout = LineLayout::new(header, &displays, menu.placement(), columns);
            let screen = layout.render(&displays, state.selected(), &menu.option_style, &selected_style);
            (screen, layout.rows())
        }
    };

    term.write_stdout(&screen)?;
    Ok(rows)
}

pub(super) fn run<T: Terminal + ?Sized>(
    menu: &Menu,
    term: &mut T,
    mut state: MenuState,
    orientation: Orientation,
) -> Result<String> {
    let mut term = CursorGuard::hide(term)?;
    let mut rows = draw(menu, &mut *term, &state, orientation)?;

    loop {
        let key = term.read_key()?;
        trace!(?key, "Menu key");

        match orientation.action(key) {
            Action::Next => state.next(),
            Action::Prev => state.prev(),
            Action::Leader(c) => {
                state.jump_to_leader(c);
            }
            Action::Ignore => {}
            Action::Choose => {
                if menu.erases() {
                    term.erase_lines(rows)?;
                }
                let chosen = state.selected_option().display.clone();
                debug!(index = state.selected(), ?orientation, "Menu option chosen");
                return Ok(chosen);
            }
            Action::Cancel => {
                debug!(?orientation, "Menu cancelled");
                return Err(Error::Interrupted);
            }
        }

        term.erase_lines(rows)?;
        rows = draw(menu, &mut *term, &state, orientation)?;
        debug!(index = state.selected(), rows, "Menu redrawn");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::{Color, ERASE_LINE};
    use crate::markup::strip_formatting;
    use crate::term::ScriptedTerminal;

    const OPTIONS: [&str; 3] = ["one", "two", "three"];

    fn choose(keys: Vec<Key>) -> String {
        let mut term = ScriptedTerminal::new(keys);
        Menu::new().interactive(&mut term, &OPTIONS, None).unwrap()
    }

    #[test]
    fn test_down_then_enter() {
        assert_eq!(choose(vec![Key::Down, Key::Enter]), "two");
    }

    #[test]
    fn test_leader_keys() {
        assert_eq!(choose(vec![Key::Char('t'), Key::Char('w'), Key::Enter]), "two");
    }

    #[test]
    fn test_up_wraps_to_last() {
        assert_eq!(choose(vec![Key::Up, Key::Enter]), "three");
        assert_eq!(choose(vec![Key::Tab, Key::Tab, Key::Tab, Key::Enter]), "one");
    }

    #[test]
    fn test_vertical_ignores_left_and_right() {
        assert_eq!(choose(vec![Key::Right, Key::Left, Key::Enter]), "one");
    }

    #[test]
    fn test_enter_returns_display_with_markup() {
        let mut term = ScriptedTerminal::new(vec![Key::Enter]);
        let options = ["<!GREEN!>go<!CLOSE!>", "stop"];
        let chosen = Menu::new().interactive(&mut term, &options, None).unwrap();
        assert_eq!(chosen, "<!GREEN!>go<!CLOSE!>");
    }

    #[test]
    fn test_initial_draw_highlights_first_option() {
        let mut term = ScriptedTerminal::new(vec![Key::Enter]);
        Menu::new().interactive(&mut term, &OPTIONS, Some("Pick one")).unwrap();
        let lines: Vec<&str> = term.stdout().lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].trim_end(), "Pick one");
        assert!(lines[1].starts_with("\x1b[7m one"));
        assert_eq!(strip_formatting(lines[2]).trim(), "two");
    }

    #[test]
    fn test_redraw_erases_previous_block() {
        let mut term = ScriptedTerminal::new(vec![Key::Down, Key::Down, Key::Enter]);
        Menu::new().interactive(&mut term, &OPTIONS, Some("Header")).unwrap();
        // two redraws, four rows each
        assert_eq!(term.erased_lines(), 8);
    }

    #[test]
    fn test_multiline_option_erases_every_printed_row() {
        let mut term = ScriptedTerminal::new(vec![Key::Down, Key::Enter]);
        Menu::new()
            .erase()
            .interactive(&mut term, &["line1\nline2", "two"], None)
            .unwrap();
        let first_frame = term.stdout().split(ERASE_LINE).next().unwrap_or_default().to_string();
        assert_eq!(first_frame.lines().count(), 3);
        // redraw and the erase on choose both cover three rows
        assert_eq!(term.erased_lines(), 6);
    }

    #[test]
    fn test_redraw_uses_new_terminal_width() {
        let mut term = ScriptedTerminal::new(vec![Key::Down, Key::Enter])
            .with_size(24, 80)
            .resize_after(1, 24, 8);
        Menu::new()
            .menu_centre()
            .interactive(&mut term, &["alpha beta", "two"], None)
            .unwrap();

        let frames: Vec<&str> = term.stdout().split(ERASE_LINE).filter(|frame| !frame.is_empty()).collect();
        assert_eq!(frames.len(), 2);
        // (80 - 10) / 2 columns of margin, one row per option
        assert_eq!(frames[0].lines().count(), 2);
        assert!(strip_formatting(frames[0]).starts_with(&format!("{}alpha beta", " ".repeat(35))));
        assert_eq!(term.erased_lines(), 2);

        let second: Vec<String> = frames[1].lines().map(strip_formatting).collect();
        assert_eq!(second, vec![" alpha", " beta ", " two  "]);
    }

    #[test]
    fn test_erase_on_choose() {
        let mut term = ScriptedTerminal::new(vec![Key::Enter]);
        Menu::new().erase().interactive(&mut term, &OPTIONS, None).unwrap();
        assert_eq!(term.erased_lines(), 3);
    }

    #[test]
    fn test_cursor_restored() {
        let mut term = ScriptedTerminal::new(vec![Key::Down, Key::Enter]);
        Menu::new().interactive(&mut term, &OPTIONS, None).unwrap();
        assert!(term.cursor_visible());
        assert_eq!(term.cursor_hides(), 1);

        let mut term = ScriptedTerminal::new(vec![Key::Interrupt]);
        let result = Menu::new().interactive(&mut term, &OPTIONS, None);
        assert!(matches!(result, Err(Error::Interrupted)));
        assert!(term.cursor_visible());
    }

    #[test]
    fn test_running_out_of_keys_is_an_io_error() {
        let mut term = ScriptedTerminal::new(vec![Key::Down]);
        let result = Menu::new().interactive(&mut term, &OPTIONS, None);
        assert!(matches!(result, Err(Error::Io(_))));
        assert!(term.cursor_visible());
    }

    #[test]
    fn test_selected_colour_replaces_reverse() {
        let mut term = ScriptedTerminal::new(vec![Key::Enter]);
        Menu::new()
            .color_selected(Color::Yellow)
            .interactive(&mut term, &OPTIONS, None)
            .unwrap();
        assert!(term.stdout().starts_with("\x1b[33m one"));
        assert!(!term.stdout().contains("\x1b[7m"));
    }

    #[test]
    fn test_horizontal_moves_with_left_and_right() {
        let mut term = ScriptedTerminal::new(vec![Key::Right, Key::Right, Key::Left, Key::Enter]);
        let chosen = Menu::new().horizontal(&mut term, &OPTIONS, None).unwrap();
        assert_eq!(chosen, "two");

        let mut term = ScriptedTerminal::new(vec![Key::Left, Key::Enter]);
        let chosen = Menu::new().horizontal(&mut term, &OPTIONS, None).unwrap();
        assert_eq!(chosen, "three");
    }

    #[test]
    fn test_horizontal_leader_keys() {
        let mut term = ScriptedTerminal::new(vec![Key::Char('t'), Key::Enter]);
        let chosen = Menu::new().horizontal(&mut term, &OPTIONS, None).unwrap();
        assert_eq!(chosen, "two");

        let mut term = ScriptedTerminal::new(vec![Key::Right, Key::Right, Key::Char('O'), Key::Enter]);
        let chosen = Menu::new().horizontal(&mut term, &OPTIONS, None).unwrap();
        assert_eq!(chosen, "one");
        assert_eq!(term.erased_lines(), 3);
    }

    #[test]
    fn test_horizontal_tab_down_and_up() {
        let mut term = ScriptedTerminal::new(vec![Key::Tab, Key::Down, Key::Enter]);
        let chosen = Menu::new().horizontal(&mut term, &OPTIONS, None).unwrap();
        assert_eq!(chosen, "three");

        let mut term = ScriptedTerminal::new(vec![Key::Tab, Key::Up, Key::Up, Key::Enter]);
        let chosen = Menu::new().horizontal(&mut term, &OPTIONS, None).unwrap();
        assert_eq!(chosen, "three");
    }

    #[test]
    fn test_horizontal_draws_one_line() {
        let mut term = ScriptedTerminal::new(vec![Key::Down, Key::Enter]);
        Menu::new().horizontal(&mut term, &["yes", "no"], None).unwrap();
        assert_eq!(term.erased_lines(), 1);
        let last = term.stdout().lines().last().unwrap_or_default().to_string();
        assert_eq!(strip_formatting(&last), "yes  no");
        assert!(last.contains("\x1b[7mno\x1b[0m"));
    }

    #[test]
    fn test_horizontal_erase_counts_header() {
        let mut term = ScriptedTerminal::new(vec![Key::Enter]);
        Menu::new()
            .erase()
            .horizontal(&mut term, &["yes", "no"], Some("Continue?"))
            .unwrap();
        assert_eq!(term.erased_lines(), 2);
    }

    #[test]
    fn test_centred_menu_has_margin() {
        let mut term = ScriptedTerminal::new(vec![Key::Enter]).with_size(25, 40);
        Menu::new()
            .menu_centre()
            .interactive(&mut term, &["abcd"], None)
            .unwrap();
        // (40 - 4) / 2 columns of margin
        assert!(term.stdout().starts_with(&" ".repeat(18)));
    }
}
