//! Lazy, restartable view over one elog file.
//!
//! [`LogPager`] is an explicit cursor over the wrapped display lines of a file. Lines are
//! read and wrapped on demand; when the file is exhausted the pager reports
//! [`PagerStep::Complete`] once and starts over from the first line, so callers see an
//! endless cyclic sequence. The pager owns the only open handle to its file.

pub mod wrap;

pub use wrap::{display_width, expand_tabs, strip_ansi, wrap_line};

use crate::catalog::Severity;
use crate::file_handler::open_decompressed;
use bstr::ByteSlice;
use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

/// One wrapped line ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    pub text: String,
    /// Set when the raw line started with a marker token.
    pub severity: Option<Severity>,
}

impl DisplayLine {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: None,
        }
    }
}

/// Result of advancing the cursor by one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagerStep {
    Line(DisplayLine),
    /// The file was exhausted; the cursor is back at the first line.
    Complete,
}

/// A screenful of display lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Cursor position of the first line on this page.
    pub start: usize,
    pub lines: Vec<DisplayLine>,
    /// The end of the file was reached while filling this page.
    pub complete: bool,
}

pub struct LogPager {
    path: PathBuf,
    wrap_width: usize,
    reader: Option<Box<dyn BufRead>>,
    pending: VecDeque<DisplayLine>,
    position: usize,
    /// Display line count, known once the file has been read to the end.
    total: Option<usize>,
    buf: Vec<u8>,
}

impl std::fmt::Debug for LogPager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogPager")
            .field("path", &self.path)
            .field("wrap_width", &self.wrap_width)
            .field("position", &self.position)
            .field("total", &self.total)
            .finish()
    }
}

impl LogPager {
    /// Open `path` for a terminal `terminal_width` columns wide.
    ///
    /// Lines wrap two columns short of the terminal width.
    pub fn open(path: &Path, terminal_width: u16) -> io::Result<Self> {
        let reader = open_decompressed(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            wrap_width: usize::from(terminal_width.saturating_sub(2)).max(1),
            reader: Some(reader),
            pending: VecDeque::new(),
            position: 0,
            total: None,
            buf: Vec::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn wrap_width(&self) -> usize {
        self.wrap_width
    }

    /// Display lines consumed since the cursor was last at the start.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Number of display lines in the file, once a full pass has been made.
    pub fn total_lines(&self) -> Option<usize> {
        self.total
    }

    /// Rewind to the first line, reopening the file.
    pub fn reset(&mut self) -> io::Result<()> {
        // Close the current handle before opening the next one.
        self.reader = None;
        self.pending.clear();
        self.position = 0;
        self.reader = Some(open_decompressed(&self.path)?);
        Ok(())
    }

    /// Advance by one display line.
    pub fn next_step(&mut self) -> io::Result<PagerStep> {
        if self.pending.is_empty() && !self.fill_pending()? {
            self.total = Some(self.position);
            self.reset()?;
            return Ok(PagerStep::Complete);
        }

        match self.pending.pop_front() {
            Some(line) => {
                self.position += 1;
                Ok(PagerStep::Line(line))
            }
            None => Ok(PagerStep::Complete),
        }
    }

    /// Collect up to `rows` lines.
    ///
    /// A page stops short when the file ends; the next page then starts at the top. If the
    /// cursor sits exactly at the end, the page is filled from the top instead of coming
    /// back empty.
    pub fn next_page(&mut self, rows: usize) -> io::Result<Page> {
        let mut page = Page {
            start: self.position,
            lines: Vec::with_capacity(rows),
            complete: false,
        };

        while page.lines.len() < rows {
            match self.next_step()? {
                PagerStep::Line(line) => page.lines.push(line),
                PagerStep::Complete if page.lines.is_empty() && !page.complete => {
                    page.complete = true;
                    page.start = 0;
                    if self.total == Some(0) {
                        break;
                    }
                }
                PagerStep::Complete => {
                    page.complete = true;
                    break;
                }
            }
        }

        if !page.complete && self.total == Some(self.position) {
            page.complete = true;
        }
        Ok(page)
    }

    /// Move the cursor to display line `position`, wrapping to the start past the end.
    pub fn seek(&mut self, position: usize) -> io::Result<()> {
        self.reset()?;
        while self.position < position {
            if self.next_step()? == PagerStep::Complete {
                break;
            }
        }
        Ok(())
    }

    /// The page of `rows` lines before the one starting at `current_start`.
    pub fn previous_page(&mut self, current_start: usize, rows: usize) -> io::Result<Page> {
        self.seek(current_start.saturating_sub(rows))?;
        self.next_page(rows)
    }

    /// Read raw lines until at least one display line is queued. Returns false at EOF.
    fn fill_pending(&mut self) -> io::Result<bool> {
        let Some(reader) = self.reader.as_mut() else {
            return Ok(false);
        };

        self.buf.clear();
        if reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(false);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
            if self.buf.last() == Some(&b'\r') {
                self.buf.pop();
            }
        }

        let raw = self.buf.to_str_lossy();
        self.pending.extend(render_raw_line(&raw, self.wrap_width));
        Ok(true)
    }
}

/// Turn one raw file line into styled display lines.
///
/// Escape codes are stripped from every line; a line starting with a marker token keeps
/// that severity on all of its segments. Tabs stay in the text.
pub fn render_raw_line(raw: &str, wrap_width: usize) -> Vec<DisplayLine> {
    let severity = Severity::from_line_prefix(raw);
    let text = strip_ansi(raw);

    wrap_line(&text, wrap_width)
        .into_iter()
        .map(|segment| DisplayLine {
            text: segment,
            severity,
        })
        .collect()
}
