//! The process's own terminal, driven through crossterm

use super::{Key, Stream, TermSize, Terminal};
use crossterm::{
    ExecutableCommand, QueueableCommand,
    cursor::{Hide, MoveToPreviousLine, Show},
    event::{self, Event},
    style::Print,
    terminal::{self, Clear, ClearType},
};
use std::io::{self, Write};
use tracing::trace;

/// Terminal backed by stdin/stdout/stderr
#[derive(Debug, Default)]
pub struct StdTerminal;

impl StdTerminal {
    pub fn new() -> Self {
        Self
    }
}

/// Raw mode for the duration of one key read
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Terminal for StdTerminal {
    fn write(&mut self, stream: Stream, text: &str) -> io::Result<()> {
        match stream {
            Stream::Stdout => {
                io::stdout().execute(Print(text))?;
            }
            Stream::Stderr => {
                io::stderr().execute(Print(text))?;
            }
        }
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<Key> {
        let _raw = RawMode::enable()?;
        loop {
            // resize, mouse and focus events are not keys
            if let Event::Key(key_event) = event::read()? {
                let key = Key::from(key_event);
                if key != Key::Other {
                    trace!(?key, "Key read");
                    return Ok(key);
                }
            }
        }
    }

    fn size(&self) -> TermSize {
        let queried = terminal::size()
            .ok()
            .map(|(columns, rows)| (rows as usize, columns as usize));
        TermSize::or_fallback(queried)
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        io::stdout().execute(Hide)?;
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        io::stdout().execute(Show)?;
        Ok(())
    }

    fn erase_lines(&mut self, count: usize) -> io::Result<()> {
        let mut stdout = io::stdout();
        for _ in 0..count {
            stdout
                .queue(MoveToPreviousLine(1))?
                .queue(Clear(ClearType::CurrentLine))?;
        }
        stdout.flush()
    }
}
