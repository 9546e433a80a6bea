//! File access for elog files.
//!
//! elog files are stored plain or compressed by Portage's `compress-build-logs`-style
//! features; this module hides the difference behind a buffered reader.

pub mod compression;

pub use compression::{detect_compression, open_decompressed, read_decompressed, CompressionType};
