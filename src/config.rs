//! Configuration: menu theme and pager settings, stored as TOML

use crate::ansi::{Alignment, Color, StyleAttr};
use crate::text::pager::DEFAULT_RESERVED_ROWS;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// How menus are drawn
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuTheme {
    /// Alignment of option text inside the menu box
    pub option_alignment: Alignment,

    /// Alignment of the menu box in the terminal
    pub menu_alignment: Alignment,

    /// Colour of unselected options
    pub option_color: Option<Color>,

    /// Style attributes of unselected options
    pub option_styles: Vec<StyleAttr>,

    /// Colour of the selected option; with no selected colour or styles
    /// the selection is shown in reverse video
    pub selected_color: Option<Color>,

    /// Style attributes of the selected option
    pub selected_styles: Vec<StyleAttr>,

    /// Erase the menu once a choice is made
    pub erase: bool,
}

/// Paged output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PagerConfig {
    /// Rows kept free under each page for the prompt
    pub reserved_rows: usize,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            reserved_rows: DEFAULT_RESERVED_ROWS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub menu: MenuTheme,
    pub pager: PagerConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::SerializeError { source: e })?;

        fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    /// Generate a sample configuration file content
    pub fn sample_config() -> String {
        r#"# knotwork configuration file
# This file uses TOML format (https://toml.io)

[menu]
# Alignment of option text inside the menu: "left", "centre" or "right"
option_alignment = "left"

# Alignment of the whole menu in the terminal: "left", "centre" or "right"
menu_alignment = "left"

# Colour and styles of unselected options
# Colours: black, red, green, yellow, blue, magenta, cyan, white
# Styles: bold, italic, underline, strike, reverse
# option_color = "white"
option_styles = []

# Colour and styles of the selected option
# With neither set, the selected option is shown in reverse video
# selected_color = "green"
selected_styles = []

# Erase the menu from the screen once a choice is made
erase = false

[pager]
# Rows kept free under each page for the "-- MORE --" prompt
reserved_rows = 2
"#
        .to_string()
    }
}

/// Errors that can occur when loading or saving configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse configuration file
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Failed to write configuration file
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to serialize configuration
    SerializeError { source: toml::ser::Error },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError { path, source } => {
                write!(f, "Failed to read config file '{}': {}", path.display(), source)
            }
            ConfigError::ParseError { path, source } => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), source)
            }
            ConfigError::WriteError { path, source } => {
                write!(f, "Failed to write config file '{}': {}", path.display(), source)
            }
            ConfigError::SerializeError { source } => {
                write!(f, "Failed to serialize config: {}", source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::WriteError { source, .. } => Some(source),
            ConfigError::SerializeError { source } => Some(source),
        }
    }
}
