//! Ranged deletion of elog files.
//!
//! A [`DeleteSpec`] is resolved against the current selection into a range of catalog
//! indices. The backing files are removed, then the catalog is rescanned from disk and
//! the selection re-clamped.
//!
//! A file that has already vanished is skipped and the batch continues. Any other
//! removal failure aborts the batch.

use crate::catalog::{Catalog, Entry};
use crate::error::{ElogvError, Result};
use crate::selection::SelectionController;
use crate::sort::SortState;
use log::{info, warn};
use std::io;
use std::ops::Range;

/// Which entries a delete command targets, relative to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteSpec {
    /// Every entry in the catalog
    All,
    /// The selection through the last entry
    ToEnd,
    /// The first entry through the selection
    ToStart,
    /// `n` entries starting at the selection; `n >= 1`
    Count(usize),
}

impl DeleteSpec {
    /// Catalog indices targeted when `selection` is selected among `count` entries.
    pub fn target_range(self, selection: usize, count: usize) -> Range<usize> {
        if count == 0 {
            return 0..0;
        }
        let selection = selection.min(count - 1);
        match self {
            Self::All => 0..count,
            Self::ToEnd => selection..count,
            Self::ToStart => 0..selection + 1,
            Self::Count(n) => selection..selection.saturating_add(n.max(1)).min(count),
        }
    }
}

/// Outcome of a deletion batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeletionReport {
    pub removed: usize,
    /// Files that were already gone when their turn came.
    pub skipped: usize,
}

/// Remove the backing files of `entries`.
pub fn remove_files(entries: &[Entry]) -> Result<DeletionReport> {
    let mut report = DeletionReport::default();
    for entry in entries {
        match std::fs::remove_file(&entry.path) {
            Ok(()) => report.removed += 1,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                warn!("{} vanished before deletion, skipping", entry.path.display());
                report.skipped += 1;
            }
            Err(err) => {
                return Err(ElogvError::file_error(
                    format!("Cannot delete {}", entry.path.display()),
                    err,
                ))
            }
        }
    }
    Ok(report)
}

/// Apply `spec`: delete the targeted files, rebuild the catalog and re-clamp the selection.
///
/// The rebuild fails with [`ElogvError::NoEntries`] when nothing is left.
pub fn delete(
    spec: DeleteSpec,
    catalog: &mut Catalog,
    sort: &SortState,
    selection: &mut SelectionController,
) -> Result<DeletionReport> {
    let range = spec.target_range(selection.index(), catalog.len());
    let report = remove_files(&catalog.entries()[range.clone()])?;
    info!(
        "deleted {} elogs ({:?}, indices {:?}, {} already gone)",
        report.removed, spec, range, report.skipped
    );

    catalog.rebuild(sort)?;
    selection.on_catalog_changed(catalog.len());
    if spec == DeleteSpec::ToStart {
        selection.reset();
    }
    Ok(report)
}
