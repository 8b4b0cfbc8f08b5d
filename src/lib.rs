//! knotwork - ANSI-aware text and interactive menus for terminal programs
//!
//! This library provides:
//! - `<!NAME!>` markup expansion and stripping of escape codes
//! - display-width measurement that ignores escape codes
//! - word-wrapping and alignment that step over escape codes
//! - styled text with severity tags and a pager
//! - vertical and horizontal menus and a date picker, driven through a
//!   small [`Terminal`] trait so they can be scripted in tests

pub mod ansi;
pub mod cli;
pub mod config;
pub mod error;
pub mod markup;
pub mod menu;
pub mod metrics;
pub mod term;
pub mod text;
pub mod wrap;

pub use ansi::{Alignment, Color, StyleAttr};
pub use cli::{Cli, Command};
pub use config::{Config, ConfigError, MenuTheme, PagerConfig};
pub use error::{Error, Result};
pub use markup::{MarkupExpander, strip_formatting};
pub use menu::{DateField, DateFieldState, Menu, MenuOption, MenuState, OptionStyle, Selectable};
pub use metrics::display_width;
pub use term::{CursorGuard, Key, ScriptedTerminal, StdTerminal, Stream, TermSize, Terminal};
pub use text::{Level, StyledText};
pub use wrap::{wrap, wrap_lines};
