//! The catalog: every elog in the log directory, in display order.
//!
//! A catalog is never patched in place. It is rebuilt from disk at startup, after every
//! deletion and on terminal resize, then sorted and capped.

pub mod entry;
pub mod scanner;

pub use entry::{Entry, EntryName, Severity};
pub use scanner::scan;

use crate::error::Result;
use crate::sort::SortState;
use std::path::{Path, PathBuf};

/// Maximum number of entries kept after sorting.
///
/// Row-indexed terminal backends address list rows with a signed 16-bit index.
pub const MAX_ENTRIES: usize = 32767;

/// Sorted, capped list of elog entries for one directory.
#[derive(Debug, Clone)]
pub struct Catalog {
    dir: PathBuf,
    entries: Vec<Entry>,
}

impl Catalog {
    /// Scan `dir` and sort the result.
    pub fn load(dir: &Path, sort: &SortState) -> Result<Self> {
        let mut catalog = Self {
            dir: dir.to_path_buf(),
            entries: Vec::new(),
        };
        catalog.rebuild(sort)?;
        Ok(catalog)
    }

    /// Build a catalog from entries that are already in memory.
    pub fn from_entries(dir: &Path, mut entries: Vec<Entry>, sort: &SortState) -> Self {
        sort.sort(&mut entries);
        entries.truncate(MAX_ENTRIES);
        Self {
            dir: dir.to_path_buf(),
            entries,
        }
    }

    /// Discard the current entries and rescan the directory.
    ///
    /// On error the previous entries are left untouched.
    pub fn rebuild(&mut self, sort: &SortState) -> Result<()> {
        let mut entries = scan(&self.dir)?;
        sort.sort(&mut entries);
        entries.truncate(MAX_ENTRIES);
        self.entries = entries;
        Ok(())
    }

    /// Re-sort in place. The cap was applied against the previous order, so a resort
    /// never brings back dropped entries until the next rebuild.
    pub fn resort(&mut self, sort: &SortState) {
        sort.sort(&mut self.entries);
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
