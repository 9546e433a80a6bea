//! UI state handed to the renderer
//!
//! [`ViewState`] is a borrowed snapshot of the controller built once per frame; the
//! renderer never mutates application state.

use crate::catalog::Entry;
use crate::pager::DisplayLine;
use crate::render::ui::layout::ScreenLayout;
use std::ops::Range;
use std::path::Path;

/// Everything needed to draw one frame
#[derive(Debug)]
pub struct ViewState<'a> {
    pub layout: ScreenLayout,

    /// Full sorted catalog
    pub entries: &'a [Entry],

    /// Catalog indices shown in the list pane
    pub visible: Range<usize>,

    /// Selected catalog index
    pub selected: usize,

    /// Sort description for the header, e.g. `date (reversed)`
    pub sort_label: String,

    /// Path of the file shown in the log pane
    pub log_path: Option<&'a Path>,

    /// Current page of the log pane
    pub log_lines: &'a [DisplayLine],

    pub status_line: &'a StatusLine,

    pub help_visible: bool,
}

impl ViewState<'_> {
    pub fn selected_entry(&self) -> Option<&Entry> {
        self.entries.get(self.selected)
    }

    /// `selected/total`, 1-based
    pub fn position_label(&self) -> String {
        if self.entries.is_empty() {
            return "0/0".to_string();
        }
        format!("{}/{}", self.selected + 1, self.entries.len())
    }
}

/// Prompt shown on the status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    Search(String),
    Delete { count: Option<usize> },
}

/// Status line information
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    pub message: Option<String>,
    pub prompt: Option<Prompt>,
    /// Shown while the search query has no match
    pub not_found: bool,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a temporary message
    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    /// Clear any temporary message
    pub fn clear_message(&mut self) {
        self.message = None;
        self.not_found = false;
    }

    pub fn set_prompt(&mut self, prompt: Prompt) {
        self.prompt = Some(prompt);
    }

    pub fn clear_prompt(&mut self) {
        self.prompt = None;
    }

    /// Text for the left side of the status line
    pub fn format(&self) -> String {
        let mut text = match &self.prompt {
            Some(Prompt::Search(buffer)) => format!("/{buffer}"),
            Some(Prompt::Delete { count: Some(n) }) => format!("delete {n}: d/Enter, Esc cancels"),
            Some(Prompt::Delete { count: None }) => {
                "delete: d one, a all, g to start, G to end, digits count".to_string()
            }
            None => String::new(),
        };

        if self.not_found {
            if !text.is_empty() {
                text.push_str("  ");
            }
            text.push_str("[not found]");
        }
        if let Some(message) = &self.message {
            if !text.is_empty() {
                text.push_str("  ");
            }
            text.push_str(message);
        }
        text
    }
}
