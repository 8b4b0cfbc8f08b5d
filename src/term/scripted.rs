//! In-memory terminal that replays a fixed key sequence

use super::{Key, KeyDecoder, Stream, TermSize, Terminal};
use std::collections::VecDeque;
use std::io;

/// A terminal double: keys come from a queue, output is captured.
///
/// Reading past the end of the queue fails with `UnexpectedEof` rather
/// than blocking.
#[derive(Debug, Clone)]
pub struct ScriptedTerminal {
    keys: VecDeque<Key>,
    stdout: String,
    stderr: String,
    size: TermSize,
    resizes: VecDeque<(usize, TermSize)>,
    keys_read: usize,
    cursor_visible: bool,
    cursor_hides: usize,
    erased: usize,
}

impl ScriptedTerminal {
    pub fn new(keys: Vec<Key>) -> Self {
        Self {
            keys: keys.into(),
            stdout: String::new(),
            stderr: String::new(),
            size: TermSize::default(),
            resizes: VecDeque::new(),
            keys_read: 0,
            cursor_visible: true,
            cursor_hides: 0,
            erased: 0,
        }
    }

    /// Keys decoded from raw terminal bytes
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(KeyDecoder::decode(bytes))
    }

    pub fn with_size(mut self, rows: usize, columns: usize) -> Self {
        self.size = TermSize { rows, columns };
        self
    }

    /// Change the size once `keys` keys have been read
    pub fn resize_after(mut self, keys: usize, rows: usize, columns: usize) -> Self {
        self.resizes.push_back((keys, TermSize { rows, columns }));
        self
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    pub fn clear_output(&mut self) {
        self.stdout.clear();
        self.stderr.clear();
        self.erased = 0;
    }

    pub fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    /// How many times the cursor was hidden
    pub fn cursor_hides(&self) -> usize {
        self.cursor_hides
    }

    /// Total lines erased since the last `clear_output`
    pub fn erased_lines(&self) -> usize {
        self.erased
    }

    /// Keys not yet consumed
    pub fn remaining_keys(&self) -> usize {
        self.keys.len()
    }
}

impl Terminal for ScriptedTerminal {
    fn write(&mut self, stream: Stream, text: &str) -> io::Result<()> {
        match stream {
            Stream::Stdout => self.stdout.push_str(text),
            Stream::Stderr => self.stderr.push_str(text),
        }
        Ok(())
    }

    fn read_key(&mut self) -> io::Result<Key> {
        let key = self
            .keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more scripted keys"))?;
        self.keys_read += 1;
        while let Some(&(after, size)) = self.resizes.front() {
            if after > self.keys_read {
                break;
            }
            self.size = size;
            self.resizes.pop_front();
        }
        Ok(key)
    }

    fn size(&self) -> TermSize {
        self.size
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.cursor_visible = false;
        self.cursor_hides += 1;
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.cursor_visible = true;
        Ok(())
    }

    fn erase_lines(&mut self, count: usize) -> io::Result<()> {
        self.erased += count;
        if count == 0 {
            return Ok(());
        }
        self.write(Stream::Stdout, &crate::ansi::ERASE_LINE.repeat(count))
    }
}
