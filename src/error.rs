//! Error types for knotwork

use crate::config::ConfigError;
use thiserror::Error;

/// Result type alias for knotwork operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for knotwork
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Interrupted by user")]
    Interrupted,

    #[error("Menu has no options to select from")]
    EmptyMenu,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
