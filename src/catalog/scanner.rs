//! Directory scanning and severity classification.
//!
//! Elogs live either directly in the log directory (`cat:pkg:stamp.log`) or one level down
//! in a category directory (`cat/pkg:stamp.log`). Deeper nesting is ignored.

use crate::catalog::entry::{Entry, EntryName, Severity};
use crate::error::{ElogvError, Result};
use crate::file_handler::read_decompressed;
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Scan `dir` and return every parseable elog, in path order.
///
/// Each file is read once, in full, to determine its severity. Files that cannot be read
/// are still listed as `Info`.
pub fn scan(dir: &Path) -> Result<Vec<Entry>> {
    let candidates = list_candidates(dir)?;

    let entries: Vec<Entry> = candidates
        .into_iter()
        .filter_map(|(relative, path)| {
            let Some(name) = EntryName::parse(&relative) else {
                debug!("skipping {relative}: not an elog file name");
                return None;
            };
            Some(Entry {
                severity: classify_file(&path),
                path,
                category: name.category,
                package: name.package,
                timestamp: name.timestamp,
            })
        })
        .collect();

    if entries.is_empty() {
        return Err(ElogvError::NoEntries {
            dir: dir.to_path_buf(),
        });
    }

    debug!("scanned {} elogs in {}", entries.len(), dir.display());
    Ok(entries)
}

fn classify_file(path: &Path) -> Severity {
    match read_decompressed(path) {
        Ok(content) => Severity::classify(&content),
        Err(err) => {
            warn!("cannot read {}: {err}", path.display());
            Severity::Info
        }
    }
}

/// Collect `(relative name, full path)` pairs for regular files at depth one and two.
fn list_candidates(dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let read_dir = fs::read_dir(dir).map_err(|source| ElogvError::CannotOpenDirectory {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut candidates = Vec::new();
    for dirent in read_dir {
        let dirent = dirent.map_err(|source| ElogvError::CannotOpenDirectory {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = dirent.path();
        let Some(name) = dirent.file_name().to_str().map(str::to_string) else {
            continue;
        };

        if path.is_file() {
            candidates.push((name, path));
        } else if path.is_dir() {
            match fs::read_dir(&path) {
                Ok(children) => {
                    for child in children.flatten() {
                        let child_path = child.path();
                        if !child_path.is_file() {
                            continue;
                        }
                        if let Some(child_name) = child.file_name().to_str() {
                            candidates.push((format!("{name}/{child_name}"), child_path));
                        }
                    }
                }
                Err(err) => warn!("cannot list {}: {err}", path.display()),
            }
        }
    }

    candidates.sort();
    Ok(candidates)
}
