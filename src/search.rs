//! Incremental search over `category/package` names.
//!
//! Matching is a literal, case-sensitive substring test. Searches run forward from the
//! selection and never wrap around to the top of the list.

use crate::catalog::Entry;
use crate::error::{ElogvError, Result};
use memchr::memmem;

/// Index of the first entry at or after `start` whose `category/package` contains `query`.
pub fn find_forward(entries: &[Entry], start: usize, query: &str) -> Option<usize> {
    if query.is_empty() {
        return None;
    }
    let finder = memmem::Finder::new(query.as_bytes());

    entries
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, entry)| finder.find(entry.display_name().as_bytes()).is_some())
        .map(|(index, _)| index)
}

/// Prompt buffer and the last confirmed query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchEngine {
    prompt: Option<String>,
    last_query: Option<String>,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the prompt with an empty buffer.
    pub fn start(&mut self) {
        self.prompt = Some(String::new());
    }

    pub fn update(&mut self, buffer: impl Into<String>) {
        self.prompt = Some(buffer.into());
    }

    /// Close the prompt, remembering a non-empty buffer for find-next.
    pub fn confirm(&mut self) -> Option<&str> {
        if let Some(buffer) = self.prompt.take().filter(|b| !b.is_empty()) {
            self.last_query = Some(buffer);
        }
        self.last_query.as_deref()
    }

    /// Close the prompt without touching the remembered query.
    pub fn cancel(&mut self) {
        self.prompt = None;
    }

    pub fn prompt(&self) -> Option<&str> {
        self.prompt.as_deref()
    }

    pub fn is_prompting(&self) -> bool {
        self.prompt.is_some()
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    /// Target index for `query` searched from `selection + start_offset`.
    ///
    /// `start_offset` is 0 while typing, so the current entry can keep matching, and 1 for
    /// find-next. No match is `SearchNotFound`.
    pub fn search(
        &self,
        entries: &[Entry],
        selection: usize,
        query: &str,
        start_offset: usize,
    ) -> Result<usize> {
        find_forward(entries, selection + start_offset, query).ok_or_else(|| {
            ElogvError::SearchNotFound {
                query: query.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Severity;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn entry(category: &str, package: &str) -> Entry {
        Entry {
            path: PathBuf::from(format!("{category}:{package}")),
            category: category.to_string(),
            package: package.to_string(),
            timestamp: NaiveDate::from_ymd_opt(2023, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            severity: Severity::Info,
        }
    }

    fn sample() -> Vec<Entry> {
        vec![
            entry("sys-apps", "coreutils"),
            entry("dev-lang", "python"),
            entry("sys-apps", "portage"),
            entry("dev-python", "setuptools"),
        ]
    }

    #[test]
    fn finds_first_match_from_start() {
        let entries = sample();
        assert_eq!(find_forward(&entries, 0, "core"), Some(0));
        assert_eq!(find_forward(&entries, 0, "python"), Some(1));
        assert_eq!(find_forward(&entries, 2, "python"), Some(3));
    }

    #[test]
    fn matches_across_the_slash() {
        let entries = sample();
        assert_eq!(find_forward(&entries, 0, "apps/port"), Some(2));
    }

    #[test]
    fn does_not_wrap_around() {
        let entries = sample();
        assert_eq!(find_forward(&entries, 1, "core"), None);
        assert_eq!(find_forward(&entries, 10, "core"), None);
    }

    #[test]
    fn empty_and_missing_queries_find_nothing() {
        let entries = sample();
        assert_eq!(find_forward(&entries, 0, ""), None);
        assert_eq!(find_forward(&entries, 0, "zzz"), None);
        assert_eq!(find_forward(&entries, 0, "CORE"), None);
    }

    #[test]
    fn find_next_skips_current() {
        let engine = SearchEngine::new();
        let entries = sample();
        assert_eq!(engine.search(&entries, 0, "sys-apps", 0).unwrap(), 0);
        assert_eq!(engine.search(&entries, 0, "sys-apps", 1).unwrap(), 2);

        let err = engine.search(&entries, 2, "sys-apps", 1).unwrap_err();
        assert!(matches!(&err, ElogvError::SearchNotFound { query } if query == "sys-apps"));
        assert!(!err.is_fatal());
    }

    #[test]
    fn prompt_lifecycle() {
        let mut engine = SearchEngine::new();
        assert!(!engine.is_prompting());

        engine.start();
        assert_eq!(engine.prompt(), Some(""));
        engine.update("py");
        assert_eq!(engine.confirm(), Some("py"));
        assert!(!engine.is_prompting());

        engine.start();
        engine.update("zz");
        engine.cancel();
        assert_eq!(engine.last_query(), Some("py"));

        engine.start();
        assert_eq!(engine.confirm(), Some("py"));
    }
}
