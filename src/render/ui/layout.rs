//! Screen geometry.
//!
//! From top to bottom: column header, entry list, info row (selected file), log pane,
//! status line.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Rows taken by the header, info row and status line.
const CHROME_ROWS: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub width: u16,
    pub height: u16,
    pub list_rows: u16,
    pub log_rows: u16,
}

/// Areas for each pane inside a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneAreas {
    pub header: Rect,
    pub list: Rect,
    pub info: Rect,
    pub log: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn new(width: u16, height: u16) -> Self {
        let usable = height.saturating_sub(CHROME_ROWS);
        let list_rows = (usable / 2).max(1);
        Self {
            width,
            height,
            list_rows,
            log_rows: usable.saturating_sub(list_rows),
        }
    }

    /// Row index of the last visible list row relative to the viewport offset.
    pub fn page_height(&self) -> usize {
        usize::from(self.list_rows).saturating_sub(1)
    }

    pub fn log_rows(&self) -> usize {
        usize::from(self.log_rows)
    }

    pub fn split(&self, area: Rect) -> PaneAreas {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(self.list_rows),
                Constraint::Length(1),
                Constraint::Length(self.log_rows),
                Constraint::Length(1),
            ])
            .split(area);

        PaneAreas {
            header: chunks[0],
            list: chunks[1],
            info: chunks[2],
            log: chunks[3],
            status: chunks[4],
        }
    }
}
