//! A single elog record and its severity class.

use chrono::NaiveDateTime;
use memchr::memmem;
use std::path::PathBuf;

const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";
const TIMESTAMP_LEN: usize = 15;

/// Severity class of an elog, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Qa,
    Log,
    Warn,
    Error,
}

impl Severity {
    /// Classes that are searched for in file content, most severe first.
    /// `Info` is the fallback and never needs a match.
    const BY_PRIORITY: [Severity; 4] = [Self::Error, Self::Warn, Self::Log, Self::Qa];

    const ALL: [Severity; 5] = [Self::Error, Self::Warn, Self::Log, Self::Qa, Self::Info];

    /// Marker token as written by Portage at the start of an elog section.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Info => "INFO:",
            Self::Qa => "QA:",
            Self::Log => "LOG:",
            Self::Warn => "WARN:",
            Self::Error => "ERROR:",
        }
    }

    /// Short label shown in the class column.
    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Qa => "QA",
            Self::Log => "LOG",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }

    /// Highest-priority marker found anywhere in `content`, `Info` if none.
    ///
    /// Markers are plain substrings; they do not have to start a line.
    pub fn classify(content: &[u8]) -> Severity {
        Self::BY_PRIORITY
            .into_iter()
            .find(|severity| memmem::find(content, severity.marker().as_bytes()).is_some())
            .unwrap_or(Self::Info)
    }

    /// Severity of a display line that starts with a marker token.
    pub fn from_line_prefix(line: &str) -> Option<Severity> {
        Self::ALL
            .into_iter()
            .find(|severity| line.starts_with(severity.marker()))
    }
}

/// One parsed elog file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub path: PathBuf,
    pub category: String,
    pub package: String,
    pub timestamp: NaiveDateTime,
    pub severity: Severity,
}

impl Entry {
    /// `category/package`, the text search matches against.
    pub fn display_name(&self) -> String {
        format!("{}/{}", self.category, self.package)
    }

    /// Timestamp formatted for the date column.
    pub fn display_date(&self) -> String {
        self.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Category, package and timestamp decoded from an elog file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryName {
    pub category: String,
    pub package: String,
    pub timestamp: NaiveDateTime,
}

impl EntryName {
    /// Parse a path relative to the log directory.
    ///
    /// Accepts `category:package:YYYYMMDD-HHMMSS.log[.ext]` and
    /// `category/package:YYYYMMDD-HHMMSS.log[.ext]`. Returns `None` for anything else.
    pub fn parse(relative: &str) -> Option<Self> {
        let normalized = relative.replace('/', ":");
        let mut parts = normalized.splitn(3, ':');
        let category = parts.next().filter(|s| !s.is_empty())?;
        let package = parts.next().filter(|s| !s.is_empty())?;
        let rest = parts.next()?;

        let stamp = rest.get(..TIMESTAMP_LEN)?;
        let suffix = &rest[TIMESTAMP_LEN..];
        if !(suffix == ".log" || suffix.starts_with(".log.")) {
            return None;
        }
        let timestamp = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()?;

        Some(Self {
            category: category.to_string(),
            package: package.to_string(),
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32, ss: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(hh, mm, ss)
            .unwrap()
    }

    #[test]
    fn parses_flat_layout() {
        let name = EntryName::parse("dev-lang:python:20230101-123456.log").unwrap();
        assert_eq!(name.category, "dev-lang");
        assert_eq!(name.package, "python");
        assert_eq!(name.timestamp, at(2023, 1, 1, 12, 34, 56));
    }

    #[test]
    fn parses_nested_layout_with_extension() {
        let name = EntryName::parse("sys-apps/coreutils-9.4:20230102-000000.log.xz").unwrap();
        assert_eq!(name.category, "sys-apps");
        assert_eq!(name.package, "coreutils-9.4");
        assert_eq!(name.timestamp, at(2023, 1, 2, 0, 0, 0));
    }

    #[test]
    fn rejects_too_few_components() {
        assert_eq!(EntryName::parse("python:20230101-000000.log"), None);
        assert_eq!(EntryName::parse("summary.log"), None);
        assert_eq!(EntryName::parse(":python:20230101-000000.log"), None);
    }

    #[test]
    fn rejects_bad_timestamp_or_suffix() {
        assert_eq!(EntryName::parse("a:b:2023-01-01.log"), None);
        assert_eq!(EntryName::parse("a:b:20231301-000000.log"), None);
        assert_eq!(EntryName::parse("a:b:20230101-000000.txt"), None);
        assert_eq!(EntryName::parse("a:b:20230101-000000.logfile"), None);
        assert_eq!(EntryName::parse("a:b:20230101-000000"), None);
    }

    #[test]
    fn classify_picks_highest_priority() {
        assert_eq!(
            Severity::classify(b"INFO: setup\nERROR: build failed\n"),
            Severity::Error
        );
        assert_eq!(Severity::classify(b"QA: x\nLOG: y\n"), Severity::Log);
        assert_eq!(Severity::classify(b"WARN: y\nQA: x\n"), Severity::Warn);
        assert_eq!(Severity::classify(b"QA: only\n"), Severity::Qa);
        assert_eq!(Severity::classify(b"INFO: only\n"), Severity::Info);
        assert_eq!(Severity::classify(b"no markers at all"), Severity::Info);
    }

    #[test]
    fn classify_matches_mid_line() {
        assert_eq!(
            Severity::classify(b"something WARN: inline"),
            Severity::Warn
        );
    }

    #[test]
    fn severity_ordering() {
        assert!(Severity::Error > Severity::Warn);
        assert!(Severity::Warn > Severity::Log);
        assert!(Severity::Log > Severity::Qa);
        assert!(Severity::Qa > Severity::Info);
    }

    #[test]
    fn line_prefix_detection() {
        assert_eq!(
            Severity::from_line_prefix("ERROR: compile"),
            Some(Severity::Error)
        );
        assert_eq!(Severity::from_line_prefix("QA: notice"), Some(Severity::Qa));
        assert_eq!(Severity::from_line_prefix(" INFO: indented"), None);
        assert_eq!(Severity::from_line_prefix("plain"), None);
    }

    #[test]
    fn display_helpers() {
        let entry = Entry {
            path: PathBuf::from("/x"),
            category: "dev-lang".to_string(),
            package: "python".to_string(),
            timestamp: at(2023, 1, 1, 0, 0, 0),
            severity: Severity::Info,
        };
        assert_eq!(entry.display_name(), "dev-lang/python");
        assert_eq!(entry.display_date(), "2023-01-01 00:00:00");
    }
}
