//! Severity levels for tagged output, after RFC 5424 (plus a non-standard OK)

use crate::ansi::{BOLD, CLOSE, Color};
use crate::term::Stream;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Ok,
    Debug,
    Info,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}

impl Level {
    pub fn label(&self) -> &'static str {
        match self {
            Level::Ok => "OK",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Notice => "NOTICE",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
            Level::Alert => "ALERT",
            Level::Emergency => "EMERGENCY",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Level::Ok | Level::Debug | Level::Info | Level::Notice => Color::Green,
            Level::Warning | Level::Alert => Color::Yellow,
            Level::Error | Level::Critical | Level::Emergency => Color::Red,
        }
    }

    /// Error, critical and emergency go to stderr
    pub fn stream(&self) -> Stream {
        match self {
            Level::Error | Level::Critical | Level::Emergency => Stream::Stderr,
            _ => Stream::Stdout,
        }
    }

    /// The leading tag, e.g. `[OK]` with the label coloured, or the whole
    /// bracketed tag on a coloured background when `reverse` is set.
    pub fn tag(&self, reverse: bool) -> String {
        if reverse {
            format!(
                "{}{}{}[{}]{}",
                self.color().bg(),
                Color::White.fg(),
                BOLD,
                self.label(),
                CLOSE
            )
        } else {
            format!("[{}{}{}{}]", self.color().fg(), BOLD, self.label(), CLOSE)
        }
    }

    /// Mirror a tagged message into the log
    pub(crate) fn trace(&self, message: &str) {
        match self {
            Level::Debug => tracing::debug!("{}", message),
            Level::Ok | Level::Info | Level::Notice => tracing::info!(level = self.label(), "{}", message),
            Level::Warning | Level::Alert => tracing::warn!(level = self.label(), "{}", message),
            Level::Error | Level::Critical | Level::Emergency => {
                tracing::error!(level = self.label(), "{}", message)
            }
        }
    }
}
