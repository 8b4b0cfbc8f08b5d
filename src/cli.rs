//! CLI argument parsing with clap

use crate::ansi::{Alignment, Color, StyleAttr};
use crate::config::Config;
use crate::text::Level;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// knotwork - styled terminal text and interactive menus
///
/// Renders `<!NAME!>` markup to ANSI escape codes, wraps and aligns text
/// without counting escape codes, pages long output and runs keyboard
/// driven menus and a date picker.
#[derive(Parser, Debug)]
#[command(name = "knotwork")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to configuration file (TOML format)
    ///
    /// When specified, settings from the config file are used as defaults.
    /// CLI arguments will override config file settings.
    #[arg(short = 'C', long, global = true, env = "KNOTWORK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the log here instead of the Log directory next to the binary
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output log format as JSON
    #[arg(long, global = true)]
    pub json_log: bool,

    /// Alignment of option text inside menus
    #[arg(long, global = true, value_enum)]
    pub option_align: Option<Alignment>,

    /// Alignment of menus in the terminal
    #[arg(long, global = true, value_enum)]
    pub menu_align: Option<Alignment>,

    /// Colour of unselected menu options
    #[arg(long, global = true, value_enum)]
    pub option_color: Option<Color>,

    /// Colour of the selected menu option
    #[arg(long, global = true, value_enum)]
    pub selected_color: Option<Color>,

    /// Style of the selected menu option (repeatable)
    #[arg(long, global = true, value_enum)]
    pub selected_style: Vec<StyleAttr>,

    /// Erase menus once a choice is made
    #[arg(long, global = true)]
    pub erase: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Choose one option from a vertical menu
    Menu {
        /// Menu options; markup is allowed
        #[arg(required = true, num_args = 1..)]
        options: Vec<String>,

        /// Text shown above the options
        #[arg(long)]
        header: Option<String>,
    },

    /// Choose one option from a menu on a single line
    Horizontal {
        /// Menu options; markup is allowed
        #[arg(required = true, num_args = 1..)]
        options: Vec<String>,

        /// Text shown above the options
        #[arg(long)]
        header: Option<String>,
    },

    /// Pick a date, printed as YYYY-MM-DD
    Date {
        /// Starting date, e.g. 2024-05-01, "1 May 2024" or today
        #[arg(default_value = "today")]
        date: String,

        /// Text shown above the picker
        #[arg(long)]
        header: Option<String>,
    },

    /// Show a file (or stdin) a page at a time
    Page {
        /// File to page; reads stdin when omitted
        file: Option<PathBuf>,
    },

    /// Print styled text
    Print {
        /// Text to print; markup is allowed
        text: String,

        #[arg(long, value_enum)]
        color: Option<Color>,

        #[arg(long, value_enum)]
        background: Option<Color>,

        /// Style attribute (repeatable)
        #[arg(long, value_enum)]
        style: Vec<StyleAttr>,

        #[arg(long, value_enum, default_value_t = Alignment::Left)]
        align: Alignment,

        /// Word-wrap to the terminal width
        #[arg(long)]
        wrap: bool,

        /// Prefix a severity tag
        #[arg(long, value_enum)]
        level: Option<Level>,

        /// Show the severity tag on a coloured background
        #[arg(long, requires = "level")]
        reverse: bool,
    },

    /// Word-wrap text to a column width
    Wrap {
        /// Column width
        #[arg(short, long, default_value_t = 80)]
        width: usize,

        /// Text to wrap; markup is allowed
        text: String,
    },

    /// Remove markup and escape codes from text
    Strip {
        text: String,
    },

    /// Print the display width of text
    Width {
        text: String,
    },

    /// Print a sample configuration file
    SampleConfig {
        /// Write the sample here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Command {
    /// Name used in log file names
    pub fn name(&self) -> &'static str {
        match self {
            Command::Menu { .. } => "menu",
            Command::Horizontal { .. } => "horizontal",
            Command::Date { .. } => "date",
            Command::Page { .. } => "page",
            Command::Print { .. } => "print",
            Command::Wrap { .. } => "wrap",
            Command::Strip { .. } => "strip",
            Command::Width { .. } => "width",
            Command::SampleConfig { .. } => "sample-config",
        }
    }
}

impl Cli {
    /// Get config file name (without extension) for log naming
    pub fn config_name(&self) -> Option<String> {
        self.config.as_ref().and_then(|p| {
            p.file_stem()
                .and_then(|s| s.to_str())
                .map(|s| s.to_string())
        })
    }

    /// Merge CLI arguments with config from file
    /// CLI arguments take precedence over config file settings
    pub fn merge_with_config(&self, mut config: Config) -> Config {
        if let Some(alignment) = self.option_align {
            config.menu.option_alignment = alignment;
        }
        if let Some(alignment) = self.menu_align {
            config.menu.menu_alignment = alignment;
        }
        if let Some(color) = self.option_color {
            config.menu.option_color = Some(color);
        }
        if let Some(color) = self.selected_color {
            config.menu.selected_color = Some(color);
        }
        if !self.selected_style.is_empty() {
            config.menu.selected_styles = self.selected_style.clone();
        }
        if self.erase {
            config.menu.erase = true;
        }

        config
    }
}
