//! Paged output: SPACE for the next page, ENTER for one more line, `q` to stop

use crate::error::{Error, Result};
use crate::term::{Key, Terminal};
use tracing::debug;

/// Rows kept free below each page for the status line
pub const DEFAULT_RESERVED_ROWS: usize = 2;

/// What the reader asked for at the `-- MORE --` prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageAction {
    Page,
    Line,
    Quit,
}

/// Write `rendered` a page at a time, waiting for a key between pages.
pub fn page<T: Terminal + ?Sized>(term: &mut T, rendered: &str, reserved_rows: usize) -> Result<()> {
    let lines: Vec<&str> = rendered.split('\n').collect();
    let total = lines.len();
    let mut remaining = &lines[..];
    let mut take = page_size(term, reserved_rows);

    while !remaining.is_empty() {
        let count = take.min(remaining.len());
        for line in &remaining[..count] {
            term.write_stdout(&format!("{}\n", line))?;
        }
        remaining = &remaining[count..];

        if remaining.is_empty() {
            break;
        }

        let percent = (total - remaining.len()) * 100 / total;
        term.write_stdout(&format!("-- MORE ({}%) --\n", percent))?;

        let action = poll(term)?;
        term.erase_lines(1)?;
        debug!(?action, percent, "Pager prompt answered");

        take = match action {
            PageAction::Page => page_size(term, reserved_rows),
            PageAction::Line => 1,
            PageAction::Quit => break,
        };
    }
    Ok(())
}

fn page_size<T: Terminal + ?Sized>(term: &T, reserved_rows: usize) -> usize {
    term.size().rows.saturating_sub(reserved_rows).max(1)
}

/// Wait for one of the paging keys, ignoring everything else
fn poll<T: Terminal + ?Sized>(term: &mut T) -> Result<PageAction> {
    loop {
        match term.read_key()? {
            Key::Char(' ') => return Ok(PageAction::Page),
            Key::Enter => return Ok(PageAction::Line),
            Key::Char('q') => return Ok(PageAction::Quit),
            Key::Interrupt => {
                term.erase_lines(1)?;
                return Err(Error::Interrupted);
            }
            _ => continue,
        }
    }
}
