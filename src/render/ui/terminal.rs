//! Terminal UI implementation using ratatui
//!
//! This module provides the concrete implementation of UIRenderer using ratatui for the
//! five-pane viewer screen. It only draws what the controller hands it in [`ViewState`].

use crate::catalog::Entry;
use crate::error::{ElogvError, Result};
use crate::pager::{expand_tabs, DisplayLine};
use crate::render::ui::help::help_lines;
use crate::render::ui::{ColorTheme, UIRenderer, ViewState};
use log::debug;
use ratatui::crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};
use std::io::{self, Stdout};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Width of the class column (`ERROR` plus padding).
const CLASS_WIDTH: usize = 7;
/// Width of the date column (`YYYY-MM-DD HH:MM:SS`).
const DATE_WIDTH: usize = 19;
const SEPARATOR: &str = " | ";

/// Terminal UI implementation with ratatui backend
pub struct TerminalUI {
    terminal: Option<CrosstermTerminal>,
    theme: ColorTheme,
}

impl TerminalUI {
    /// Create a new terminal UI instance with the default theme
    pub fn new() -> Result<Self> {
        Self::with_theme(ColorTheme::default())
    }

    /// Create terminal UI with custom theme
    pub fn with_theme(theme: ColorTheme) -> Result<Self> {
        Ok(Self {
            terminal: None,
            theme,
        })
    }

    fn render_header(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let name_width = name_column_width(area.width);
        let text = format!(
            "{}{SEPARATOR}{}{SEPARATOR}{}  [sort: {}]",
            fit("Category/Package", name_width),
            fit("Class", CLASS_WIDTH),
            fit("Date", DATE_WIDTH),
            view_state.sort_label
        );
        frame.render_widget(Paragraph::new(text).style(theme.header), area);
    }

    fn render_list(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let name_width = name_column_width(area.width);
        let lines: Vec<Line> = view_state
            .visible
            .clone()
            .filter_map(|index| view_state.entries.get(index).map(|e| (index, e)))
            .map(|(index, entry)| {
                Self::list_row(entry, name_width, index == view_state.selected, theme)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), area);
    }

    fn list_row<'a>(
        entry: &Entry,
        name_width: usize,
        selected: bool,
        theme: &ColorTheme,
    ) -> Line<'a> {
        let class_style = if selected {
            theme.selection
        } else {
            theme.severity_style(entry.severity)
        };
        let row_style = if selected {
            theme.selection
        } else {
            Style::default()
        };

        Line::from(vec![
            Span::styled(fit(&entry.display_name(), name_width), row_style),
            Span::styled(SEPARATOR, row_style),
            Span::styled(fit(entry.severity.label(), CLASS_WIDTH), class_style),
            Span::styled(SEPARATOR, row_style),
            Span::styled(fit(&entry.display_date(), DATE_WIDTH), row_style),
        ])
    }

    fn render_info(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let text = view_state
            .log_path
            .map(|path| path.display().to_string())
            .unwrap_or_default();
        frame.render_widget(Paragraph::new(text).style(theme.info_line), area);
    }

    fn render_log(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let lines: Vec<Line> = view_state
            .log_lines
            .iter()
            .map(|line| Self::log_line(line, theme))
            .collect();

        // One column of padding on the left.
        let inner = Rect {
            x: area.x.saturating_add(1),
            width: area.width.saturating_sub(1),
            ..area
        };
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn log_line<'a>(line: &'a DisplayLine, theme: &ColorTheme) -> Line<'a> {
        let text = expand_tabs(&line.text);
        match line.severity {
            Some(severity) => Line::styled(text, theme.severity_style(severity)),
            None => Line::raw(text),
        }
    }

    fn render_status(frame: &mut Frame, area: Rect, view_state: &ViewState, theme: &ColorTheme) {
        let position = view_state.position_label();
        let left_width = usize::from(area.width).saturating_sub(position.len() + 1);
        let text = format!(
            "{} {position}",
            fit(&view_state.status_line.format(), left_width)
        );

        let style = if view_state.status_line.not_found {
            theme.alert
        } else {
            theme.status
        };
        frame.render_widget(Paragraph::new(text).style(style), area);
    }

    fn render_help(frame: &mut Frame, area: Rect, theme: &ColorTheme) {
        let lines = help_lines();
        let width = lines
            .iter()
            .map(|l| l.width())
            .max()
            .unwrap_or(0)
            .saturating_add(4);
        let popup = centered_rect(
            u16::try_from(width).unwrap_or(u16::MAX),
            u16::try_from(lines.len() + 2).unwrap_or(u16::MAX),
            area,
        );

        let text: Vec<Line> = lines.into_iter().map(Line::raw).collect();
        let help = Paragraph::new(text).style(theme.help).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Keys (any key closes) "),
        );
        frame.render_widget(Clear, popup);
        frame.render_widget(help, popup);
    }
}

impl UIRenderer for TerminalUI {
    fn render(&mut self, view_state: &ViewState) -> Result<()> {
        if let Some(ref mut terminal) = self.terminal {
            let theme = &self.theme;

            terminal.draw(move |frame| {
                let size = frame.size();
                let areas = view_state.layout.split(size);

                Self::render_header(frame, areas.header, view_state, theme);
                Self::render_list(frame, areas.list, view_state, theme);
                Self::render_info(frame, areas.info, view_state, theme);
                Self::render_log(frame, areas.log, view_state, theme);
                Self::render_status(frame, areas.status, view_state, theme);

                if view_state.help_visible {
                    Self::render_help(frame, size, theme);
                }
            })?;
        }
        Ok(())
    }

    fn initialize(&mut self) -> Result<()> {
        enable_raw_mode()?;
        let terminal = undo_on_failure(enter_alternate_screen(), || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        })?;
        self.terminal = Some(terminal);

        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if self.terminal.is_some() {
            disable_raw_mode()?;
            execute!(io::stdout(), LeaveAlternateScreen)?;
            self.terminal = None;
        }
        Ok(())
    }

    fn suspend(&mut self) -> Result<()> {
        self.cleanup()?;
        debug!("suspending");
        stop_process();
        debug!("resumed");
        self.initialize()
    }

    fn get_terminal_size(&self) -> Result<(u16, u16)> {
        let (cols, rows) = ratatui::crossterm::terminal::size()?;
        Ok((cols, rows))
    }
}

impl Drop for TerminalUI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn enter_alternate_screen() -> io::Result<CrosstermTerminal> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Run `undo` when terminal setup failed part way, so raw mode is not left behind.
fn undo_on_failure<T>(setup: io::Result<T>, undo: impl FnOnce()) -> Result<T> {
    setup.map_err(|err| {
        undo();
        ElogvError::ui(format!("cannot set up terminal: {err}"))
    })
}

/// Stop the process with SIGTSTP; returns once the shell continues it.
#[cfg(unix)]
fn stop_process() {
    // SAFETY: raise has no memory-safety preconditions.
    unsafe {
        libc::raise(libc::SIGTSTP);
    }
}

#[cfg(not(unix))]
fn stop_process() {}

/// Width left for `category/package` once the fixed columns are placed.
fn name_column_width(total: u16) -> usize {
    usize::from(total)
        .saturating_sub(CLASS_WIDTH + DATE_WIDTH + 2 * SEPARATOR.len())
        .max(1)
}

/// Truncate or pad `text` to exactly `width` display columns.
fn fit(text: &str, width: usize) -> String {
    let mut out = String::with_capacity(width);
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}

/// A `width x height` rectangle centered in `area`, clipped to it.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height - height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width - width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);
    horizontal[1]
}
