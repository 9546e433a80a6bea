//! Error types and handling infrastructure for elogv.
//!
//! Library code returns [`ElogvError`] through the crate-wide [`Result`] alias; the binary
//! wraps it in `anyhow` at the process boundary.
//!
//! ## Fatal vs. recoverable
//!
//! - **Fatal**: the interactive session unwinds, the terminal is restored and the process
//!   exits with code 1 (`TerminalTooSmall`, `NoEntries`, `CannotOpenDirectory`, I/O failures)
//! - **Recoverable**: absorbed inside the current key-handling turn and shown on the status
//!   line (`FileMissingOnSelect`, `SearchNotFound`)

use std::path::PathBuf;
use thiserror::Error;

/// Minimum terminal width the layout can be drawn in.
pub const MIN_TERMINAL_WIDTH: u16 = 80;
/// Minimum terminal height the layout can be drawn in.
pub const MIN_TERMINAL_HEIGHT: u16 = 12;

/// The main error type for elogv operations.
#[derive(Error, Debug)]
pub enum ElogvError {
    /// Terminal is smaller than the layout needs
    #[error(
        "Terminal too small: {width}x{height} (at least {MIN_TERMINAL_WIDTH}x{MIN_TERMINAL_HEIGHT} required)"
    )]
    TerminalTooSmall { width: u16, height: u16 },

    /// The log directory holds no parseable elog files
    #[error("No elog files found in {dir}")]
    NoEntries { dir: PathBuf },

    /// The log directory could not be listed
    #[error("Cannot open log directory {path}: {source}")]
    CannotOpenDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The selected elog could not be opened for viewing
    #[error("Cannot open {path}")]
    FileMissingOnSelect {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Incremental search found nothing at or after the selection
    #[error("Not found: {query}")]
    SearchNotFound { query: String },

    /// File system related errors (deletion, reading)
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

/// Standard Result type for elogv operations.
pub type Result<T> = std::result::Result<T, ElogvError>;

impl ElogvError {
    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Whether this error must end the interactive session.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::FileMissingOnSelect { .. } | Self::SearchNotFound { .. }
        )
    }
}

impl From<std::io::Error> for ElogvError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileError {
                message: "File not found".to_string(),
                source: err,
            },
            std::io::ErrorKind::PermissionDenied => Self::FileError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::FileError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}

/// Fail with [`ElogvError::TerminalTooSmall`] unless `width x height` fits the layout.
pub fn check_terminal_size(width: u16, height: u16) -> Result<()> {
    if width < MIN_TERMINAL_WIDTH || height < MIN_TERMINAL_HEIGHT {
        return Err(ElogvError::TerminalTooSmall { width, height });
    }
    Ok(())
}
