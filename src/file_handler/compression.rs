//! Compression format detection and transparent decompression.
//!
//! The format is chosen from the file extension (`.gz`, `.bz2`, `.xz`, `.zst`); anything
//! else is read as plain text. Readers are synchronous and buffered so both the catalog
//! scanner (one full read per file) and the pager (line by line) can share them.

use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use xz2::read::XzDecoder;

/// Supported compression formats for transparent file access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionType {
    /// No compression - plain text file
    None,
    /// Gzip compression (.gz files)
    Gzip,
    /// Bzip2 compression (.bz2 files)
    Bzip2,
    /// XZ compression (.xz files)
    Xz,
    /// Zstandard compression (.zst, .zstd files)
    Zstd,
}

impl CompressionType {
    /// Get human-readable name for the compression type
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            Self::Xz => "xz",
            Self::Zstd => "zstd",
        }
    }

    /// Check if this type represents a compressed format
    pub fn is_compressed(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Detect compression type from the file extension.
pub fn detect_compression(path: &Path) -> CompressionType {
    detect_by_extension(path).unwrap_or(CompressionType::None)
}

fn detect_by_extension(path: &Path) -> Option<CompressionType> {
    let ext = path.extension()?.to_str()?;
    match ext.to_lowercase().as_str() {
        "gz" => Some(CompressionType::Gzip),
        "bz2" => Some(CompressionType::Bzip2),
        "xz" => Some(CompressionType::Xz),
        "zst" | "zstd" => Some(CompressionType::Zstd),
        _ => None,
    }
}

/// Open `path` and wrap it in the decoder its extension calls for.
///
/// The returned reader owns the only file handle; dropping it closes the file.
pub fn open_decompressed(path: &Path) -> io::Result<Box<dyn BufRead>> {
    let file = BufReader::new(File::open(path)?);

    let reader: Box<dyn BufRead> = match detect_compression(path) {
        CompressionType::None => Box::new(file),
        CompressionType::Gzip => Box::new(BufReader::new(MultiGzDecoder::new(file))),
        CompressionType::Bzip2 => Box::new(BufReader::new(MultiBzDecoder::new(file))),
        CompressionType::Xz => Box::new(BufReader::new(XzDecoder::new_multi_decoder(file))),
        CompressionType::Zstd => Box::new(BufReader::new(zstd::stream::read::Decoder::with_buffer(
            file,
        )?)),
    };

    Ok(reader)
}

/// Decompress a whole file into memory
pub fn read_decompressed(path: &Path) -> io::Result<Vec<u8>> {
    let mut reader = open_decompressed(path)?;
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Ok(data)
}
