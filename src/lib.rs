//! # elogv - Terminal Viewer for Portage elog Files
//!
//! Browses the per-package build logs Portage leaves in its elog directory: a sortable
//! list of every log, a pager over the selected one, incremental search and ranged
//! deletion.
//!
//! ## Features
//!
//! - **Catalog**: one entry per log file, classified by the most severe marker it contains
//! - **Compression Support**: transparent handling of gzip, bzip2, xz and zstd logs
//! - **Sorting**: by date, class, category or package, either direction
//! - **Terminal UI**: list, log pane and status line drawn with ratatui
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`config`] - Log directory and display settings
//! - [`file_handler`] - Compression detection and decoding readers
//! - [`catalog`] - Directory scan, file name parsing and classification
//! - [`sort`], [`selection`], [`search`], [`deletion`] - Operations on the catalog
//! - [`pager`] - Wrapped, restartable view over one log file
//! - [`input`] - Key state machine producing commands
//! - [`render::ui`](crate::render::ui) - Terminal user interface components
//! - [`app`] - Controller and event loop

// Core modules
pub mod config;
pub mod error;
pub mod file_handler;

// Catalog and the operations on it
pub mod catalog;
pub mod deletion;
pub mod search;
pub mod selection;
pub mod sort;

pub mod pager;

// Subsystems
pub mod input;
pub mod render;

pub mod app;

// Re-export commonly used types for convenience
pub use error::{ElogvError, Result};

// Public API surface for external usage
pub use app::{Application, Controller, Flow};
pub use catalog::{Catalog, Entry, Severity};
pub use config::ViewerConfig;
pub use deletion::DeleteSpec;
pub use input::Command;
pub use sort::{SortKey, SortState};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
