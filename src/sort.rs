//! Sort ordering for the catalog.
//!
//! Date and class sorts are "importance first" in their natural direction: the newest elog
//! and the most severe class lead the list. `reversed` flips whichever order is active.

use crate::catalog::Entry;
use std::cmp::Ordering;

/// Column the catalog is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Date,
    Category,
    Package,
    Class,
}

impl SortKey {
    pub fn name(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Category => "category",
            Self::Package => "package",
            Self::Class => "class",
        }
    }
}

/// Active sort key and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub key: SortKey,
    pub reversed: bool,
}

impl SortState {
    pub fn new(key: SortKey, reversed: bool) -> Self {
        Self { key, reversed }
    }

    pub fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        let ordering = match self.key {
            SortKey::Date => b.timestamp.cmp(&a.timestamp),
            SortKey::Class => b.severity.cmp(&a.severity),
            SortKey::Category => a.category.cmp(&b.category),
            SortKey::Package => a.package.cmp(&b.package),
        };

        if self.reversed {
            ordering.reverse()
        } else {
            ordering
        }
    }

    /// Stable sort of `entries` by the active key.
    pub fn sort(&self, entries: &mut [Entry]) {
        entries.sort_by(|a, b| self.compare(a, b));
    }

    /// Switch to `key`, keeping the direction.
    pub fn set_key(&mut self, key: SortKey) {
        self.key = key;
    }

    /// Alphabetical sort: category first, then package on the next toggle, and so on.
    pub fn toggle_alphabetical(&mut self) {
        self.key = match self.key {
            SortKey::Category => SortKey::Package,
            _ => SortKey::Category,
        };
    }

    pub fn toggle_reversed(&mut self) {
        self.reversed = !self.reversed;
    }

    /// Short description for the header, e.g. `date` or `package (reversed)`.
    pub fn describe(&self) -> String {
        if self.reversed {
            format!("{} (reversed)", self.key.name())
        } else {
            self.key.name().to_string()
        }
    }
}
