//! Controller: applies [`Command`]s to the catalog, selection, pager and search state.
//!
//! The controller owns every piece of session state and never touches the terminal, so
//! it can be driven directly from tests.

use crate::catalog::Catalog;
use crate::deletion::{self, DeleteSpec};
use crate::error::{check_terminal_size, ElogvError, Result};
use crate::input::{Command, JumpTarget, ScrollDirection};
use crate::pager::{LogPager, Page};
use crate::render::ui::{Prompt, ScreenLayout, StatusLine, ViewState};
use crate::search::SearchEngine;
use crate::selection::SelectionController;
use crate::sort::{SortKey, SortState};
use log::{debug, info, warn};
use std::path::Path;

/// What the event loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Stop the process until the shell continues it
    Suspend,
    Quit,
}

#[derive(Debug)]
pub struct Controller {
    catalog: Catalog,
    sort: SortState,
    selection: SelectionController,
    /// Pager over the selected file; `None` if it could not be opened
    pager: Option<LogPager>,
    page: Page,
    search: SearchEngine,
    layout: ScreenLayout,
    status: StatusLine,
    help_visible: bool,
}

impl Controller {
    /// Scan `dir` and select the first entry for a `width x height` terminal.
    pub fn new(dir: &Path, width: u16, height: u16) -> Result<Self> {
        check_terminal_size(width, height)?;
        let layout = ScreenLayout::new(width, height);
        let sort = SortState::default();
        let catalog = Catalog::load(dir, &sort)?;
        info!("loaded {} elogs from {}", catalog.len(), dir.display());

        let mut controller = Self {
            selection: SelectionController::new(catalog.len(), layout.page_height()),
            catalog,
            sort,
            pager: None,
            page: Page::default(),
            search: SearchEngine::new(),
            layout,
            status: StatusLine::new(),
            help_visible: false,
        };
        if let Err(err) = controller.open_selected() {
            controller.report_recoverable(err)?;
        }
        Ok(controller)
    }

    /// Apply one command. Recoverable errors end up on the status line; fatal ones are
    /// returned.
    pub fn apply(&mut self, command: Command) -> Result<Flow> {
        debug!("command: {:?}", command);
        self.status.clear_message();

        match command {
            Command::MoveBy(delta) => self.select_with(|s| s.move_relative(delta))?,
            Command::JumpTo(JumpTarget::First) => self.select_with(|s| s.move_absolute(0))?,
            Command::JumpTo(JumpTarget::Last) => self.select_with(|s| s.move_to_last())?,
            Command::SetSort(key) => self.resort(|sort| sort.set_key(key))?,
            Command::ToggleAlphabetical => self.resort(|sort| sort.toggle_alphabetical())?,
            Command::ToggleReverse => self.resort(|sort| sort.toggle_reversed())?,
            Command::ScrollLog(direction) => self.scroll_log(direction)?,
            Command::OpenHelp => self.help_visible = true,
            Command::CloseHelp => self.help_visible = false,
            Command::AwaitDeleteSpec { count } => {
                self.status.set_prompt(Prompt::Delete { count });
            }
            Command::CancelDelete => self.status.clear_prompt(),
            Command::Delete(spec) => {
                self.status.clear_prompt();
                self.delete(spec)?;
            }
            Command::StartSearch => {
                self.search.start();
                self.status.set_prompt(Prompt::Search(String::new()));
            }
            Command::UpdateSearch(buffer) => {
                self.status.set_prompt(Prompt::Search(buffer.clone()));
                self.run_search(&buffer, 0)?;
                self.search.update(buffer);
            }
            Command::ConfirmSearch => {
                self.search.confirm();
                self.status.clear_prompt();
            }
            Command::CancelSearch => {
                self.search.cancel();
                self.status.clear_prompt();
            }
            Command::FindNext => {
                if let Some(query) = self.search.last_query().map(str::to_owned) {
                    self.run_search(&query, 1)?;
                }
            }
            Command::Resize { width, height } => self.resize(width, height)?,
            Command::Suspend => return Ok(Flow::Suspend),
            Command::Interrupt | Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Borrowed snapshot for the renderer.
    pub fn view(&self) -> ViewState<'_> {
        ViewState {
            layout: self.layout,
            entries: self.catalog.entries(),
            visible: self.selection.visible_range(),
            selected: self.selection.index(),
            sort_label: self.sort.describe(),
            log_path: self.pager.as_ref().map(LogPager::path),
            log_lines: &self.page.lines,
            status_line: &self.status,
            help_visible: self.help_visible,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort.key
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn pager(&self) -> Option<&LogPager> {
        self.pager.as_ref()
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn layout(&self) -> ScreenLayout {
        self.layout
    }

    pub fn help_visible(&self) -> bool {
        self.help_visible
    }

    /// Move the selection with `change`. If the new entry cannot be opened the selection
    /// goes back to where it was.
    fn select_with<F>(&mut self, change: F) -> Result<()>
    where
        F: FnOnce(&mut SelectionController),
    {
        let previous = self.selection.snapshot();
        change(&mut self.selection);
        if self.selection.index() == previous.index && self.pager.is_some() {
            return Ok(());
        }

        if let Err(err) = self.open_selected() {
            self.selection.restore(previous);
            if let Err(reopen) = self.open_selected() {
                warn!("previous entry is gone too: {reopen}");
            }
            self.report_recoverable(err)?;
        }
        Ok(())
    }

    /// Drop the current pager and open one for the selected entry.
    fn open_selected(&mut self) -> Result<()> {
        self.pager = None;
        self.page = Page::default();

        let Some(entry) = self.catalog.get(self.selection.index()) else {
            return Ok(());
        };
        let path = entry.path.clone();
        let missing = |source: std::io::Error| ElogvError::FileMissingOnSelect {
            path: path.clone(),
            source,
        };

        let mut pager = LogPager::open(&path, self.layout.width).map_err(missing)?;
        self.page = pager.next_page(self.layout.log_rows()).map_err(missing)?;
        self.pager = Some(pager);
        Ok(())
    }

    /// Show a recoverable error on the status line; fatal errors pass through.
    fn report_recoverable(&mut self, err: ElogvError) -> Result<()> {
        if err.is_fatal() {
            return Err(err);
        }
        warn!("{err}");
        self.status.set_message(err.to_string());
        Ok(())
    }

    fn resort<F>(&mut self, change: F) -> Result<()>
    where
        F: FnOnce(&mut SortState),
    {
        change(&mut self.sort);
        self.catalog.resort(&self.sort);
        self.selection.on_catalog_changed(self.catalog.len());
        debug!("sorted by {}", self.sort.describe());
        self.reopen_after_change()
    }

    /// Reopen the pager after the entry under the selection changed underneath it.
    fn reopen_after_change(&mut self) -> Result<()> {
        if let Err(err) = self.open_selected() {
            self.report_recoverable(err)?;
        }
        Ok(())
    }

    fn scroll_log(&mut self, direction: ScrollDirection) -> Result<()> {
        let rows = self.layout.log_rows();
        let Some(pager) = self.pager.as_mut() else {
            return Ok(());
        };

        let page = match direction {
            ScrollDirection::Down => pager.next_page(rows),
            ScrollDirection::Up => pager.previous_page(self.page.start, rows),
        };
        match page {
            Ok(page) => self.page = page,
            Err(source) => {
                let path = pager.path().to_path_buf();
                self.pager = None;
                self.page = Page::default();
                self.report_recoverable(ElogvError::FileMissingOnSelect { path, source })?;
            }
        }
        Ok(())
    }

    fn delete(&mut self, spec: DeleteSpec) -> Result<()> {
        // Close the viewed file before it is removed.
        self.pager = None;
        self.page = Page::default();

        let report = deletion::delete(spec, &mut self.catalog, &self.sort, &mut self.selection)?;
        let mut message = format!("Deleted {} elogs", report.removed);
        if report.skipped > 0 {
            message.push_str(&format!(" ({} already gone)", report.skipped));
        }
        self.reopen_after_change()?;
        if self.status.message.is_none() {
            self.status.set_message(message);
        }
        Ok(())
    }

    /// Search for `query` from `selection + start_offset`, moving there on a match.
    fn run_search(&mut self, query: &str, start_offset: usize) -> Result<()> {
        self.status.not_found = false;
        if query.is_empty() {
            return Ok(());
        }

        let found = self.search.search(
            self.catalog.entries(),
            self.selection.index(),
            query,
            start_offset,
        );
        match found {
            Ok(index) => self.select_with(|s| s.move_absolute(index)),
            Err(err @ ElogvError::SearchNotFound { .. }) => {
                debug!("{err}");
                self.status.not_found = true;
                Ok(())
            }
            Err(err) => Err(err),
        }
    }

    fn resize(&mut self, width: u16, height: u16) -> Result<()> {
        check_terminal_size(width, height)?;
        info!("resized to {width}x{height}");

        self.layout = ScreenLayout::new(width, height);
        self.pager = None;
        self.page = Page::default();
        self.catalog.rebuild(&self.sort)?;
        self.selection.set_page_height(self.layout.page_height());
        self.selection.on_catalog_changed(self.catalog.len());
        self.reopen_after_change()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn populate(dir: &Path) {
        fs::write(
            dir.join("dev-lang:python:20230101-000000.log"),
            "INFO: setup\nLOG: done\n",
        )
        .unwrap();
        fs::write(
            dir.join("sys-apps:coreutils:20230102-000000.log"),
            "INFO: configure\nERROR: build failed\n",
        )
        .unwrap();
        fs::write(
            dir.join("app-misc:screen:20221231-120000.log"),
            (0..40).map(|i| format!("line {i}\n")).collect::<String>(),
        )
        .unwrap();
    }

    fn controller(dir: &Path) -> Controller {
        Controller::new(dir, 80, 24).unwrap()
    }

    fn selected_name(controller: &Controller) -> String {
        controller
            .view()
            .selected_entry()
            .map(|e| e.display_name())
            .unwrap_or_default()
    }

    #[test]
    fn starts_on_newest_entry() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        let controller = controller(dir.path());

        assert_eq!(selected_name(&controller), "sys-apps/coreutils");
        assert_eq!(controller.page().lines[0].text, "INFO: configure");
        assert_eq!(controller.view().sort_label, "date");
    }

    #[test]
    fn too_small_terminal_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        assert!(matches!(
            Controller::new(dir.path(), 79, 24),
            Err(ElogvError::TerminalTooSmall { .. })
        ));

        let mut controller = controller(dir.path());
        let err = controller
            .apply(Command::Resize {
                width: 80,
                height: 11,
            })
            .unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn moving_opens_the_new_file() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        let mut controller = controller(dir.path());

        controller.apply(Command::MoveBy(1)).unwrap();
        assert_eq!(selected_name(&controller), "dev-lang/python");
        assert_eq!(controller.page().lines[0].text, "INFO: setup");

        controller.apply(Command::JumpTo(JumpTarget::Last)).unwrap();
        assert_eq!(selected_name(&controller), "app-misc/screen");
        controller.apply(Command::MoveBy(5)).unwrap();
        assert_eq!(controller.selection().index(), 2);
    }

    #[test]
    fn missing_file_rolls_back_selection() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        let mut controller = controller(dir.path());
        fs::remove_file(dir.path().join("dev-lang:python:20230101-000000.log")).unwrap();

        let flow = controller.apply(Command::MoveBy(1)).unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(selected_name(&controller), "sys-apps/coreutils");
        assert!(controller.pager().is_some());
        assert!(controller
            .status()
            .message
            .as_deref()
            .unwrap_or_default()
            .starts_with("Cannot open"));
    }

    #[test]
    fn scrolling_pages_through_the_log() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        let mut controller = controller(dir.path());
        controller.apply(Command::JumpTo(JumpTarget::Last)).unwrap();

        let rows = controller.layout().log_rows();
        assert_eq!(controller.page().lines[0].text, "line 0");

        controller
            .apply(Command::ScrollLog(ScrollDirection::Down))
            .unwrap();
        assert_eq!(controller.page().lines[0].text, format!("line {rows}"));

        controller
            .apply(Command::ScrollLog(ScrollDirection::Up))
            .unwrap();
        assert_eq!(controller.page().lines[0].text, "line 0");
    }

    #[test]
    fn sort_changes_keep_the_index() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        let mut controller = controller(dir.path());

        controller.apply(Command::ToggleAlphabetical).unwrap();
        assert_eq!(controller.sort_key(), SortKey::Category);
        assert_eq!(controller.selection().index(), 0);
        assert_eq!(selected_name(&controller), "app-misc/screen");

        controller.apply(Command::ToggleAlphabetical).unwrap();
        assert_eq!(controller.sort_key(), SortKey::Package);
        controller.apply(Command::ToggleAlphabetical).unwrap();
        assert_eq!(controller.sort_key(), SortKey::Category);

        controller.apply(Command::SetSort(SortKey::Class)).unwrap();
        assert_eq!(selected_name(&controller), "sys-apps/coreutils");

        controller.apply(Command::ToggleReverse).unwrap();
        assert_eq!(controller.view().sort_label, "class (reversed)");
    }

    #[test]
    fn search_moves_or_flags_not_found() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        let mut controller = controller(dir.path());
        controller.apply(Command::JumpTo(JumpTarget::Last)).unwrap();

        controller.apply(Command::StartSearch).unwrap();
        controller
            .apply(Command::UpdateSearch("zzz".to_string()))
            .unwrap();
        assert!(controller.status().not_found);
        assert_eq!(selected_name(&controller), "app-misc/screen");
        controller.apply(Command::CancelSearch).unwrap();
        assert!(controller.status().prompt.is_none());

        controller.apply(Command::JumpTo(JumpTarget::First)).unwrap();
        controller.apply(Command::StartSearch).unwrap();
        controller
            .apply(Command::UpdateSearch("p".to_string()))
            .unwrap();
        assert_eq!(selected_name(&controller), "sys-apps/coreutils");
        controller
            .apply(Command::UpdateSearch("py".to_string()))
            .unwrap();
        assert_eq!(selected_name(&controller), "dev-lang/python");
        controller.apply(Command::ConfirmSearch).unwrap();
        assert_eq!(controller.search.last_query(), Some("py"));

        controller.apply(Command::FindNext).unwrap();
        assert_eq!(selected_name(&controller), "dev-lang/python");
        assert!(controller.status().not_found);
    }

    #[test]
    fn delete_rebuilds_and_reports() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        let mut controller = controller(dir.path());

        controller
            .apply(Command::AwaitDeleteSpec { count: None })
            .unwrap();
        assert!(matches!(
            controller.status().prompt,
            Some(Prompt::Delete { count: None })
        ));

        controller
            .apply(Command::Delete(DeleteSpec::Count(1)))
            .unwrap();
        assert_eq!(controller.catalog().len(), 2);
        assert_eq!(selected_name(&controller), "dev-lang/python");
        assert_eq!(
            controller.status().message.as_deref(),
            Some("Deleted 1 elogs")
        );
        assert!(controller.status().prompt.is_none());
        assert!(!dir
            .path()
            .join("sys-apps:coreutils:20230102-000000.log")
            .exists());
    }

    #[test]
    fn deleting_everything_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        let mut controller = controller(dir.path());

        let err = controller
            .apply(Command::Delete(DeleteSpec::All))
            .unwrap_err();
        assert!(matches!(err, ElogvError::NoEntries { .. }));
    }

    #[test]
    fn help_and_quit_flow() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        let mut controller = controller(dir.path());

        controller.apply(Command::OpenHelp).unwrap();
        assert!(controller.view().help_visible);
        controller.apply(Command::CloseHelp).unwrap();
        assert!(!controller.help_visible());

        assert_eq!(controller.apply(Command::Suspend).unwrap(), Flow::Suspend);
        assert_eq!(controller.apply(Command::Interrupt).unwrap(), Flow::Quit);
        assert_eq!(controller.apply(Command::Quit).unwrap(), Flow::Quit);
    }

    #[test]
    fn resize_rewraps_and_rescans() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());
        let mut controller = controller(dir.path());
        fs::write(
            dir.path().join("x11-libs:gtk+:20230103-000000.log"),
            "WARN: deprecated\n",
        )
        .unwrap();

        controller
            .apply(Command::Resize {
                width: 120,
                height: 40,
            })
            .unwrap();
        assert_eq!(controller.catalog().len(), 4);
        assert_eq!(controller.layout().width, 120);
        assert_eq!(controller.pager().map(LogPager::wrap_width), Some(118));
        assert_eq!(
            controller.selection().page_height(),
            controller.layout().page_height()
        );
    }
}
