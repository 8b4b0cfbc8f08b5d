//! Screen layout for menus: wrapping, in-box alignment and the menu margin

use super::OptionStyle;
use crate::ansi::Alignment;
use crate::markup::strip_formatting;
use crate::metrics::display_width;
use crate::text::StyledText;
use crate::wrap::wrap_lines;

/// Gap between options on a horizontal line
pub const OPTION_GAP: &str = "  ";

/// How a menu sits on screen: the alignment of lines inside the menu box
/// and of the box within the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub options: Alignment,
    pub menu: Alignment,
}

impl Placement {
    /// Options get a one-column indent only when both alignments are left
    fn indent(&self) -> usize {
        usize::from(self.options == Alignment::Left && self.menu == Alignment::Left)
    }
}

/// Pad `line` inside a box `width` columns wide
pub fn pad_line(line: &str, width: usize, alignment: Alignment, indent: usize) -> String {
    let text_width = display_width(line);
    let width = width + indent;
    let (left, right) = match alignment {
        Alignment::Centre => {
            let width = width + 1;
            let left = width.saturating_sub(text_width) / 2;
            (left, width.saturating_sub(text_width + left))
        }
        Alignment::Left => (indent, width.saturating_sub(text_width + indent)),
        Alignment::Right => (width.saturating_sub(text_width), 1),
    };
    format!("{}{}{}", " ".repeat(left), line, " ".repeat(right))
}

/// Header lines with markup expanded, wrapped to `columns`
fn header_lines(header: Option<&str>, columns: usize) -> Vec<String> {
    header
        .and_then(|header| StyledText::new(header).wrap().render_at(columns))
        .map(|rendered| rendered.split('\n').map(str::to_string).collect())
        .unwrap_or_default()
}

/// An option's stripped text, split on newlines and wrapped to `columns`
fn option_lines(option: &str, columns: usize) -> Vec<String> {
    strip_formatting(option)
        .split('\n')
        .flat_map(|segment| wrap_lines(segment, columns))
        .collect()
}

fn widest<'a>(lines: impl IntoIterator<Item = &'a String>) -> usize {
    lines.into_iter().map(|line| display_width(line)).max().unwrap_or(0)
}

/// A vertical menu laid out for one terminal width.
///
/// Only styling depends on the selection, so one layout serves every
/// selected index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLayout {
    margin: String,
    header: Vec<String>,
    options: Vec<Vec<String>>,
}

impl BlockLayout {
    pub fn new<S: AsRef<str>>(
        header: Option<&str>,
        options: &[S],
        placement: Placement,
        columns: usize,
    ) -> Self {
        let header = header_lines(header, columns);
        let options: Vec<Vec<String>> = options
            .iter()
            .map(|option| option_lines(option.as_ref(), columns))
            .collect();

        let max_width = widest(&header).max(widest(options.iter().flatten()));
        let indent = placement.indent();

        Self {
            margin: " ".repeat(placement.menu.lead(columns, max_width)),
            header: header
                .iter()
                .map(|line| pad_line(line, max_width, placement.options, 0))
                .collect(),
            options: options
                .iter()
                .map(|lines| {
                    lines
                        .iter()
                        .map(|line| pad_line(line, max_width, placement.options, indent))
                        .collect()
                })
                .collect(),
        }
    }

    /// Terminal rows one render occupies
    pub fn rows(&self) -> usize {
        self.header.len() + self.options.iter().map(Vec::len).sum::<usize>()
    }

    /// Every line of the menu with `selected` highlighted, newline-terminated
    pub fn render(&self, selected: usize, option_style: &OptionStyle, selected_style: &OptionStyle) -> String {
        let mut out = String::new();
        for line in &self.header {
            out.push_str(&format!("{}{}\n", self.margin, line));
        }
        for (index, lines) in self.options.iter().enumerate() {
            let style = if index == selected { selected_style } else { option_style };
            for line in lines {
                out.push_str(&format!("{}{}\n", self.margin, style.apply(line)));
            }
        }
        out
    }
}

/// A single-line menu laid out for one terminal width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineLayout {
    margin: String,
    header: Vec<String>,
    option_rows: usize,
}

impl LineLayout {
    pub fn new<S: AsRef<str>>(
        header: Option<&str>,
        options: &[S],
        placement: Placement,
        columns: usize,
    ) -> Self {
        let header = header_lines(header, columns);
        let joined = options
            .iter()
            .map(|option| strip_formatting(option.as_ref()))
            .collect::<Vec<_>>()
            .join(OPTION_GAP);
        let lines: Vec<String> = joined.split('\n').map(str::to_string).collect();
        let max_width = widest(&header).max(widest(&lines));

        Self {
            margin: " ".repeat(placement.menu.lead(columns, max_width)),
            header: header
                .iter()
                .map(|line| pad_line(line, max_width, placement.options, 0))
                .collect(),
            option_rows: lines.len(),
        }
    }

    /// Header rows plus the option line, and any line breaks inside options
    pub fn rows(&self) -> usize {
        self.header.len() + self.option_rows
    }

    /// Options keep their markup; it is expanded while styling
    pub fn render<S: AsRef<str>>(
        &self,
        options: &[S],
        selected: usize,
        option_style: &OptionStyle,
        selected_style: &OptionStyle,
    ) -> String {
        let mut out = String::new();
        for line in &self.header {
            out.push_str(&format!("{}{}\n", self.margin, line));
        }
        let line = options
            .iter()
            .enumerate()
            .map(|(index, option)| {
                let style = if index == selected { selected_style } else { option_style };
                style.apply(option.as_ref())
            })
            .collect::<Vec<_>>()
            .join(OPTION_GAP);
        out.push_str(&format!("{}{}\n", self.margin, line));
        out
    }
}
