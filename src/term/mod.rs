//! Terminal I/O boundary
//!
//! Everything the renderer and the menus need from a terminal goes through
//! the [`Terminal`] trait: writing to stdout or stderr, reading one key,
//! querying the size, toggling the cursor and erasing lines.
//! [`StdTerminal`] drives the real terminal with crossterm;
//! [`ScriptedTerminal`] replays canned keys and records output.

pub mod event;
pub mod scripted;
pub mod stdio;

pub use event::{Key, KeyDecoder};
pub use scripted::ScriptedTerminal;
pub use stdio::StdTerminal;

use crate::ansi::ERASE_LINE;
use std::io;
use std::ops::{Deref, DerefMut};

/// Rows and columns assumed when the terminal cannot be queried
pub const FALLBACK_ROWS: usize = 25;
pub const FALLBACK_COLUMNS: usize = 80;

/// Output stream selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Raw terminal dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    pub rows: usize,
    pub columns: usize,
}

impl TermSize {
    /// Build a size from a query result, falling back to 25x80 when the
    /// query failed or reported zero.
    pub fn or_fallback(queried: Option<(usize, usize)>) -> Self {
        match queried {
            Some((rows, columns)) if rows > 0 && columns > 0 => Self { rows, columns },
            _ => Self::default(),
        }
    }

    /// Columns used for wrapping and alignment.
    ///
    /// Narrow terminals use their full width; wider ones use three
    /// quarters of it, but never less than 80.
    pub fn layout_columns(&self) -> usize {
        if self.columns < FALLBACK_COLUMNS {
            return self.columns;
        }
        (self.columns * 3 / 4).max(FALLBACK_COLUMNS)
    }
}

impl Default for TermSize {
    fn default() -> Self {
        Self {
            rows: FALLBACK_ROWS,
            columns: FALLBACK_COLUMNS,
        }
    }
}

/// The terminal operations the engine depends on
pub trait Terminal {
    /// Write text to the selected stream
    fn write(&mut self, stream: Stream, text: &str) -> io::Result<()>;

    /// Block until one key is available
    fn read_key(&mut self) -> io::Result<Key>;

    /// Current size; queried fresh on every call
    fn size(&self) -> TermSize;

    fn hide_cursor(&mut self) -> io::Result<()>;

    fn show_cursor(&mut self) -> io::Result<()>;

    /// Erase `count` lines above the cursor, leaving it at the start of
    /// the topmost erased line.
    fn erase_lines(&mut self, count: usize) -> io::Result<()> {
        if count == 0 {
            return Ok(());
        }
        self.write(Stream::Stdout, &ERASE_LINE.repeat(count))
    }

    fn write_stdout(&mut self, text: &str) -> io::Result<()> {
        self.write(Stream::Stdout, text)
    }

    fn write_stderr(&mut self, text: &str) -> io::Result<()> {
        self.write(Stream::Stderr, text)
    }

    /// Columns used for wrapping and alignment
    fn columns(&self) -> usize {
        self.size().layout_columns()
    }
}

impl<T: Terminal + ?Sized> Terminal for &mut T {
    fn write(&mut self, stream: Stream, text: &str) -> io::Result<()> {
        (**self).write(stream, text)
    }

    fn read_key(&mut self) -> io::Result<Key> {
        (**self).read_key()
    }

    fn size(&self) -> TermSize {
        (**self).size()
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        (**self).hide_cursor()
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        (**self).show_cursor()
    }

    fn erase_lines(&mut self, count: usize) -> io::Result<()> {
        (**self).erase_lines(count)
    }
}

/// Keeps the cursor hidden while alive and shows it again on drop, so
/// every exit from an interactive loop restores it.
pub struct CursorGuard<'a, T: Terminal + ?Sized> {
    term: &'a mut T,
}

impl<'a, T: Terminal + ?Sized> CursorGuard<'a, T> {
    pub fn hide(term: &'a mut T) -> io::Result<Self> {
        term.hide_cursor()?;
        Ok(Self { term })
    }
}

impl<T: Terminal + ?Sized> Deref for CursorGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.term
    }
}

impl<T: Terminal + ?Sized> DerefMut for CursorGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.term
    }
}

impl<T: Terminal + ?Sized> Drop for CursorGuard<'_, T> {
    fn drop(&mut self) {
        // Best-effort restore
        let _ = self.term.show_cursor();
    }
}
