//! Styled text: markup, colours, wrapping, alignment and output
//!
//! A [`StyledText`] is built with chained calls and rendered against a
//! column width. Rendering always runs in the same order:
//! 1. expand `<!NAME!>` markup
//! 2. wrap the configured colour and style codes around the text
//! 3. word-wrap to the column width, if enabled
//! 4. pad each line for centre or right alignment

pub mod level;
pub mod pager;

pub use level::Level;

use crate::ansi::{Alignment, CLOSE, Color, StyleAttr};
use crate::error::Result;
use crate::markup::MarkupExpander;
use crate::metrics::display_width;
use crate::term::{Stream, Terminal};
use crate::wrap::wrap;
use lazy_static::lazy_static;

lazy_static! {
    static ref MARKUP: MarkupExpander = MarkupExpander::new();
}

/// One formatting code applied around the whole text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Foreground(Color),
    Background(Color),
    Style(StyleAttr),
}

impl Format {
    pub fn code(&self) -> &'static str {
        match self {
            Format::Foreground(color) => color.fg(),
            Format::Background(color) => color.bg(),
            Format::Style(style) => style.code(),
        }
    }
}

/// Text plus the formatting to render it with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyledText {
    text: Option<String>,
    formatting: Vec<Format>,
    alignment: Alignment,
    wrap: bool,
}

impl StyledText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// A value with no text; renders as `None` and writes nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace the text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn append(mut self, text: &str) -> Self {
        self.text.get_or_insert_with(String::new).push_str(text);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.formatting.push(Format::Foreground(color));
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.formatting.push(Format::Background(color));
        self
    }

    pub fn style(mut self, style: StyleAttr) -> Self {
        self.formatting.push(Format::Style(style));
        self
    }

    pub fn styles(mut self, styles: impl IntoIterator<Item = StyleAttr>) -> Self {
        self.formatting.extend(styles.into_iter().map(Format::Style));
        self
    }

    /// Reverse video, applied ahead of any other formatting
    pub fn reverse(mut self) -> Self {
        self.formatting.insert(0, Format::Style(StyleAttr::Reverse));
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn left(self) -> Self {
        self.align(Alignment::Left)
    }

    pub fn centre(self) -> Self {
        self.align(Alignment::Centre)
    }

    pub fn center(self) -> Self {
        self.centre()
    }

    pub fn right(self) -> Self {
        self.align(Alignment::Right)
    }

    /// Word-wrap to the terminal width when rendering
    pub fn wrap(mut self) -> Self {
        self.wrap = true;
        self
    }

    /// Render for a terminal `columns` wide
    pub fn render_at(&self, columns: usize) -> Option<String> {
        self.render_with(&MARKUP, columns)
    }

    /// Render for a terminal `columns` wide using the given markup table
    pub fn render_with(&self, markup: &MarkupExpander, columns: usize) -> Option<String> {
        let text = self.text.as_deref()?;
        let text = markup.expand(text);
        let text = self.apply_formatting(&text);
        let text = if self.wrap { wrap(&text, columns) } else { text };
        Some(align(&text, self.alignment, columns))
    }

    /// Render for the terminal's current width
    pub fn render<T: Terminal + ?Sized>(&self, term: &T) -> Option<String> {
        self.render_at(term.columns())
    }

    /// Like [`render`](Self::render), but empty text also yields `None`
    pub fn get<T: Terminal + ?Sized>(&self, term: &T) -> Option<String> {
        match self.text.as_deref() {
            Some("") | None => None,
            Some(_) => self.render(term),
        }
    }

    /// Number of terminal rows the rendered text occupies
    pub fn row_count<T: Terminal + ?Sized>(&self, term: &T) -> usize {
        self.render(term)
            .map_or(0, |rendered| rendered.split('\n').count())
    }

    /// Write to stdout
    pub fn write<T: Terminal + ?Sized>(&self, term: &mut T) -> Result<()> {
        self.write_to(term, Stream::Stdout, false)
    }

    /// Write to stdout followed by a newline
    pub fn writeln<T: Terminal + ?Sized>(&self, term: &mut T) -> Result<()> {
        self.write_to(term, Stream::Stdout, true)
    }

    /// Write to stderr, optionally followed by a newline
    pub fn write_error<T: Terminal + ?Sized>(&self, term: &mut T, newline: bool) -> Result<()> {
        self.write_to(term, Stream::Stderr, newline)
    }

    fn write_to<T: Terminal + ?Sized>(&self, term: &mut T, stream: Stream, newline: bool) -> Result<()> {
        if let Some(rendered) = self.render(term) {
            term.write(stream, &rendered)?;
            if newline {
                term.write(stream, "\n")?;
            }
        }
        Ok(())
    }

    /// Write with a leading severity tag, to stderr for error levels
    pub fn log<T: Terminal + ?Sized>(&self, term: &mut T, level: Level, reverse: bool) -> Result<()> {
        let Some(rendered) = self.render(term) else {
            return Ok(());
        };
        level.trace(&crate::markup::strip_formatting(&rendered));
        let line = format!("{} {}\n", level.tag(reverse), rendered);
        term.write(level.stream(), &line)?;
        Ok(())
    }

    pub fn ok<T: Terminal + ?Sized>(&self, term: &mut T, reverse: bool) -> Result<()> {
        self.log(term, Level::Ok, reverse)
    }

    pub fn debug<T: Terminal + ?Sized>(&self, term: &mut T, reverse: bool) -> Result<()> {
        self.log(term, Level::Debug, reverse)
    }

    pub fn info<T: Terminal + ?Sized>(&self, term: &mut T, reverse: bool) -> Result<()> {
        self.log(term, Level::Info, reverse)
    }

    pub fn notice<T: Terminal + ?Sized>(&self, term: &mut T, reverse: bool) -> Result<()> {
        self.log(term, Level::Notice, reverse)
    }

    pub fn warning<T: Terminal + ?Sized>(&self, term: &mut T, reverse: bool) -> Result<()> {
        self.log(term, Level::Warning, reverse)
    }

    pub fn error<T: Terminal + ?Sized>(&self, term: &mut T, reverse: bool) -> Result<()> {
        self.log(term, Level::Error, reverse)
    }

    pub fn critical<T: Terminal + ?Sized>(&self, term: &mut T, reverse: bool) -> Result<()> {
        self.log(term, Level::Critical, reverse)
    }

    pub fn alert<T: Terminal + ?Sized>(&self, term: &mut T, reverse: bool) -> Result<()> {
        self.log(term, Level::Alert, reverse)
    }

    pub fn emergency<T: Terminal + ?Sized>(&self, term: &mut T, reverse: bool) -> Result<()> {
        self.log(term, Level::Emergency, reverse)
    }

    /// Page the rendered text, keeping two rows free for the prompt
    pub fn page<T: Terminal + ?Sized>(&self, term: &mut T) -> Result<()> {
        self.page_reserving(term, pager::DEFAULT_RESERVED_ROWS)
    }

    pub fn page_reserving<T: Terminal + ?Sized>(&self, term: &mut T, reserved_rows: usize) -> Result<()> {
        match self.render(term) {
            Some(rendered) => pager::page(term, &rendered, reserved_rows),
            None => Ok(()),
        }
    }

    fn apply_formatting(&self, text: &str) -> String {
        if self.formatting.is_empty() {
            return text.to_string();
        }
        let codes: String = self.formatting.iter().map(Format::code).collect();
        format!("{}{}{}", codes, text, CLOSE)
    }
}

/// Pad every line of `text` so it sits at `alignment` within `columns`.
///
/// Assumes the text is left-aligned to begin with.
pub fn align(text: &str, alignment: Alignment, columns: usize) -> String {
    if alignment == Alignment::Left {
        return text.to_string();
    }
    text.split('\n')
        .map(|line| {
            let lead = alignment.lead(columns, display_width(line));
            format!("{}{}", " ".repeat(lead), line)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::term::ScriptedTerminal;

    const TEXT: &str = "some text";

    #[test]
    fn test_plain_render() {
        assert_eq!(StyledText::new(TEXT).render_at(80), Some(TEXT.to_string()));
    }

    #[test]
    fn test_empty_renders_none() {
        let mut term = ScriptedTerminal::new(Vec::new());
        let text = StyledText::empty();
        assert_eq!(text.render_at(80), None);
        text.write(&mut term).unwrap();
        text.writeln(&mut term).unwrap();
        text.info(&mut term, false).unwrap();
        assert_eq!(term.stdout(), "");
        assert_eq!(text.row_count(&term), 0);
    }

    #[test]
    fn test_get_treats_empty_string_as_none() {
        let term = ScriptedTerminal::new(Vec::new());
        assert_eq!(StyledText::new("").get(&term), None);
        assert_eq!(StyledText::new(TEXT).get(&term), Some(TEXT.to_string()));
    }

    #[test]
    fn test_text_and_append() {
        let text = StyledText::new("first").text("second").append(" third");
        assert_eq!(text.render_at(80).as_deref(), Some("second third"));
        let text = StyledText::empty().append("only");
        assert_eq!(text.render_at(80).as_deref(), Some("only"));
    }

    #[test]
    fn test_colors() {
        for color in Color::iter() {
            let rendered = StyledText::new(TEXT).color(color).render_at(80);
            assert_eq!(rendered, Some(format!("{}{}\x1b[0m", color.fg(), TEXT)));
        }
        let rendered = StyledText::new(TEXT).background_color(Color::Green).render_at(80);
        assert_eq!(rendered.as_deref(), Some("\x1b[42msome text\x1b[0m"));
    }

    #[test]
    fn test_formatting_keeps_configured_order() {
        let rendered = StyledText::new(TEXT)
            .color(Color::White)
            .color(Color::Red)
            .render_at(80);
        assert_eq!(rendered.as_deref(), Some("\x1b[37m\x1b[31msome text\x1b[0m"));

        let rendered = StyledText::new(TEXT)
            .styles([StyleAttr::Bold, StyleAttr::Italic])
            .render_at(80);
        assert_eq!(rendered.as_deref(), Some("\x1b[1m\x1b[3msome text\x1b[0m"));
    }

    #[test]
    fn test_reverse_goes_first() {
        let rendered = StyledText::new(TEXT).reverse().render_at(80);
        assert_eq!(rendered.as_deref(), Some("\x1b[7msome text\x1b[0m"));
        let rendered = StyledText::new(TEXT).color(Color::Red).reverse().render_at(80);
        assert_eq!(rendered.as_deref(), Some("\x1b[7m\x1b[31msome text\x1b[0m"));
    }

    #[test]
    fn test_markup_expanded_before_formatting() {
        let rendered = StyledText::new("<!REVERSE!>reverse<!CLOSE!> <!RED!>red<!CLOSE!>").render_at(80);
        assert_eq!(
            rendered.as_deref(),
            Some("\x1b[7mreverse\x1b[0m \x1b[31mred\x1b[0m")
        );
    }

    #[test]
    fn test_alignment() {
        assert_eq!(
            StyledText::new(TEXT).right().render_at(80),
            Some(format!("{}{}", " ".repeat(71), TEXT))
        );
        assert_eq!(
            StyledText::new(TEXT).centre().render_at(80),
            Some(format!("{}{}", " ".repeat(35), TEXT))
        );
        assert_eq!(
            StyledText::new(TEXT).center().render_at(80),
            StyledText::new(TEXT).centre().render_at(80)
        );
        assert_eq!(StyledText::new(TEXT).right().left().render_at(80), Some(TEXT.to_string()));
    }

    #[test]
    fn test_alignment_ignores_escape_codes() {
        let rendered = StyledText::new(TEXT).color(Color::Blue).right().render_at(20);
        assert_eq!(rendered, Some(format!("{}\x1b[34msome text\x1b[0m", " ".repeat(11))));
    }

    #[test]
    fn test_wrap_then_align_every_line() {
        let rendered = StyledText::new("alpha beta gamma delta")
            .wrap()
            .right()
            .render_at(12)
            .unwrap();
        let lines: Vec<&str> = rendered.split('\n').collect();
        assert_eq!(lines, vec!["  alpha beta", " gamma delta"]);
    }

    #[test]
    fn test_row_count() {
        let term = ScriptedTerminal::new(Vec::new());
        assert_eq!(StyledText::new("one\ntwo\nthree").row_count(&term), 3);
    }

    #[test]
    fn test_write_streams() {
        let mut term = ScriptedTerminal::new(Vec::new());
        StyledText::new(TEXT).write(&mut term).unwrap();
        StyledText::new(TEXT).write_error(&mut term, true).unwrap();
        assert_eq!(term.stdout(), TEXT);
        assert_eq!(term.stderr(), "some text\n");
    }

    #[test]
    fn test_levels() {
        let mut term = ScriptedTerminal::new(Vec::new());
        let text = StyledText::new(TEXT);

        text.ok(&mut term, false).unwrap();
        assert_eq!(term.stdout(), "[\x1b[32m\x1b[1mOK\x1b[0m] some text\n");
        term.clear_output();

        text.warning(&mut term, false).unwrap();
        assert_eq!(term.stdout(), "[\x1b[33m\x1b[1mWARNING\x1b[0m] some text\n");
        term.clear_output();

        text.error(&mut term, false).unwrap();
        assert_eq!(term.stdout(), "");
        assert_eq!(term.stderr(), "[\x1b[31m\x1b[1mERROR\x1b[0m] some text\n");
        term.clear_output();

        text.critical(&mut term, true).unwrap();
        assert_eq!(term.stderr(), "\x1b[41m\x1b[37m\x1b[1m[CRITICAL]\x1b[0m some text\n");
        term.clear_output();

        text.debug(&mut term, false).unwrap();
        text.info(&mut term, false).unwrap();
        text.notice(&mut term, false).unwrap();
        text.alert(&mut term, false).unwrap();
        text.emergency(&mut term, false).unwrap();
        assert_eq!(term.stdout().lines().count(), 4);
        assert_eq!(term.stderr().lines().count(), 1);
    }

    #[test]
    fn test_page_renders_before_paging() {
        let mut term = ScriptedTerminal::new(Vec::new());
        StyledText::new("<!BOLD!>one<!CLOSE!>\ntwo").page(&mut term).unwrap();
        assert_eq!(term.stdout(), "\x1b[1mone\x1b[0m\ntwo\n");
    }
}
