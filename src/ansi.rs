//! ANSI escape codes and the named colours, styles and alignments built on them

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const ESC: char = '\x1b';
pub const BACKSPACE: char = '\x08';

pub const CLOSE: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const ITALIC: &str = "\x1b[3m";
pub const UNDERLINE: &str = "\x1b[4m";
pub const REVERSE: &str = "\x1b[7m";
pub const STRIKE: &str = "\x1b[9m";

/// Move to the start of the previous line and clear it.
pub const ERASE_LINE: &str = "\x1b[F\x1b[2K";

/// The eight standard terminal colours
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

const COLORS: [Color; 8] = [
    Color::Black,
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::White,
];

impl Color {
    /// Iterate all colours in code order
    pub fn iter() -> std::array::IntoIter<Color, 8> {
        COLORS.into_iter()
    }

    /// Lowercase name, as used in config files and on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::White => "white",
        }
    }

    /// Foreground escape sequence
    pub fn fg(&self) -> &'static str {
        match self {
            Color::Black => "\x1b[30m",
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Blue => "\x1b[34m",
            Color::Magenta => "\x1b[35m",
            Color::Cyan => "\x1b[36m",
            Color::White => "\x1b[37m",
        }
    }

    /// Background escape sequence
    pub fn bg(&self) -> &'static str {
        match self {
            Color::Black => "\x1b[40m",
            Color::Red => "\x1b[41m",
            Color::Green => "\x1b[42m",
            Color::Yellow => "\x1b[43m",
            Color::Blue => "\x1b[44m",
            Color::Magenta => "\x1b[45m",
            Color::Cyan => "\x1b[46m",
            Color::White => "\x1b[47m",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Color::iter()
            .find(|c| c.name() == lower)
            .ok_or_else(|| format!("unknown colour '{}'", s))
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StyleAttr {
    Bold,
    /// Terminal support for italic varies
    Italic,
    Underline,
    #[serde(alias = "strikethrough")]
    #[value(alias = "strikethrough")]
    Strike,
    Reverse,
}

impl StyleAttr {
    pub fn code(&self) -> &'static str {
        match self {
            StyleAttr::Bold => BOLD,
            StyleAttr::Italic => ITALIC,
            StyleAttr::Underline => UNDERLINE,
            StyleAttr::Strike => STRIKE,
            StyleAttr::Reverse => REVERSE,
        }
    }
}

impl FromStr for StyleAttr {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bold" => Ok(StyleAttr::Bold),
            "italic" => Ok(StyleAttr::Italic),
            "underline" => Ok(StyleAttr::Underline),
            "strike" | "strikethrough" => Ok(StyleAttr::Strike),
            "reverse" => Ok(StyleAttr::Reverse),
            _ => Err(format!("unknown style '{}'", s)),
        }
    }
}

/// Horizontal alignment of a line within the available columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    #[serde(alias = "center")]
    #[value(alias = "center")]
    Centre,
    Right,
}

impl Alignment {
    /// Leading padding to place something `width` wide inside `columns`.
    ///
    /// Centre rounds down; content wider than the area gets no padding.
    pub fn lead(&self, columns: usize, width: usize) -> usize {
        let free = columns.saturating_sub(width);
        match self {
            Alignment::Left => 0,
            Alignment::Centre => free / 2,
            Alignment::Right => free,
        }
    }
}
