//! High-level input service.
//!
//! Runs the key state machine over raw events and yields [`Command`]s for the controller.
//! Multi-key commands (`d` + range, `/` + query + Enter) are completed here, so the
//! controller never sees a half-typed command.

use crate::deletion::DeleteSpec;
use crate::error::Result;
use crate::input::raw::{EventSource, RawInputEvent};
use crate::sort::SortKey;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Current input mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Normal,
    /// `d` was pressed; `count` holds any digits typed since.
    AwaitingDeleteSpec { count: Option<usize> },
    SearchPrompt,
    HelpOverlay,
}

/// List jump targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JumpTarget {
    First,
    Last,
}

/// Direction for paging the log pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Commands emitted by the state machine and consumed by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    MoveBy(isize),
    JumpTo(JumpTarget),
    SetSort(SortKey),
    ToggleAlphabetical,
    ToggleReverse,
    ScrollLog(ScrollDirection),
    OpenHelp,
    CloseHelp,
    /// Delete prefix typed; waiting for the range. Carries the digits typed so far.
    AwaitDeleteSpec { count: Option<usize> },
    CancelDelete,
    Delete(DeleteSpec),
    StartSearch,
    UpdateSearch(String),
    ConfirmSearch,
    CancelSearch,
    FindNext,
    Resize { width: u16, height: u16 },
    Suspend,
    Interrupt,
    Quit,
}

/// Key state machine for the viewer's bindings.
#[derive(Debug)]
pub struct InputStateMachine {
    state: InputState,
    search_buffer: String,
}

impl InputStateMachine {
    pub fn new() -> Self {
        Self {
            state: InputState::Normal,
            search_buffer: String::new(),
        }
    }

    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> Option<Command> {
        if key_event.kind != KeyEventKind::Press {
            return None;
        }

        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key_event.code == KeyCode::Char('c') {
            return Some(match self.state {
                InputState::SearchPrompt => {
                    self.state = InputState::Normal;
                    self.search_buffer.clear();
                    Command::CancelSearch
                }
                _ => Command::Interrupt,
            });
        }
        if ctrl && key_event.code == KeyCode::Char('z') {
            return Some(Command::Suspend);
        }

        match self.state {
            InputState::Normal => self.handle_normal(key_event.code, ctrl),
            InputState::AwaitingDeleteSpec { count } => self.handle_delete(key_event.code, count),
            InputState::SearchPrompt => self.handle_search(key_event.code, ctrl),
            InputState::HelpOverlay => {
                self.state = InputState::Normal;
                Some(Command::CloseHelp)
            }
        }
    }

    fn handle_normal(&mut self, code: KeyCode, ctrl: bool) -> Option<Command> {
        if ctrl {
            return None;
        }

        let command = match code {
            KeyCode::Down | KeyCode::Char('j') => Command::MoveBy(1),
            KeyCode::Up | KeyCode::Char('k') => Command::MoveBy(-1),
            KeyCode::Home | KeyCode::Char('g') => Command::JumpTo(JumpTarget::First),
            KeyCode::End | KeyCode::Char('G') => Command::JumpTo(JumpTarget::Last),
            KeyCode::PageDown | KeyCode::Char(' ') | KeyCode::Char('+') => {
                Command::ScrollLog(ScrollDirection::Down)
            }
            KeyCode::PageUp | KeyCode::Char('-') => Command::ScrollLog(ScrollDirection::Up),
            KeyCode::Char('t') => Command::SetSort(SortKey::Date),
            KeyCode::Char('c') => Command::SetSort(SortKey::Class),
            KeyCode::Char('a') => Command::ToggleAlphabetical,
            KeyCode::Char('r') => Command::ToggleReverse,
            KeyCode::Char('h') | KeyCode::Char('?') => {
                self.state = InputState::HelpOverlay;
                Command::OpenHelp
            }
            KeyCode::Char('d') => {
                self.state = InputState::AwaitingDeleteSpec { count: None };
                Command::AwaitDeleteSpec { count: None }
            }
            KeyCode::Char('/') => {
                self.state = InputState::SearchPrompt;
                self.search_buffer.clear();
                Command::StartSearch
            }
            KeyCode::Char('n') => Command::FindNext,
            KeyCode::Char('q') => Command::Quit,
            _ => return None,
        };
        Some(command)
    }

    fn handle_delete(&mut self, code: KeyCode, count: Option<usize>) -> Option<Command> {
        let spec = match code {
            KeyCode::Char(digit @ '0'..='9') => {
                let value = digit.to_digit(10).map_or(0, |d| d as usize);
                let count = Some(count.unwrap_or(0).saturating_mul(10).saturating_add(value));
                self.state = InputState::AwaitingDeleteSpec { count };
                return Some(Command::AwaitDeleteSpec { count });
            }
            KeyCode::Char('d') | KeyCode::Enter => DeleteSpec::Count(count.unwrap_or(1).max(1)),
            KeyCode::Char('a') => DeleteSpec::All,
            KeyCode::Char('G') | KeyCode::End => DeleteSpec::ToEnd,
            KeyCode::Char('g') | KeyCode::Home => DeleteSpec::ToStart,
            _ => {
                self.state = InputState::Normal;
                return Some(Command::CancelDelete);
            }
        };

        self.state = InputState::Normal;
        Some(Command::Delete(spec))
    }

    fn handle_search(&mut self, code: KeyCode, ctrl: bool) -> Option<Command> {
        match code {
            KeyCode::Enter => {
                self.state = InputState::Normal;
                self.search_buffer.clear();
                Some(Command::ConfirmSearch)
            }
            KeyCode::Esc => {
                self.state = InputState::Normal;
                self.search_buffer.clear();
                Some(Command::CancelSearch)
            }
            KeyCode::Backspace => {
                self.search_buffer.pop();
                Some(Command::UpdateSearch(self.search_buffer.clone()))
            }
            KeyCode::Char(ch) if !ctrl && !ch.is_control() => {
                self.search_buffer.push(ch);
                Some(Command::UpdateSearch(self.search_buffer.clone()))
            }
            _ => None,
        }
    }

    pub fn get_state(&self) -> InputState {
        self.state
    }
}

impl Default for InputStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Produces [`Command`]s from an [`EventSource`], one blocking read per call.
pub struct InputService {
    state_machine: InputStateMachine,
    source: Box<dyn EventSource>,
}

impl InputService {
    pub fn new(source: Box<dyn EventSource>) -> Self {
        Self {
            state_machine: InputStateMachine::new(),
            source,
        }
    }

    /// Block until an event maps to a command. `Ok(None)` when the source is exhausted.
    pub fn next_command(&mut self) -> Result<Option<Command>> {
        while let Some(event) = self.source.next_event()? {
            if let Some(command) = self.process_raw_event(event) {
                return Ok(Some(command));
            }
        }
        Ok(None)
    }

    pub fn state(&self) -> InputState {
        self.state_machine.get_state()
    }

    fn process_raw_event(&mut self, event: RawInputEvent) -> Option<Command> {
        match event {
            RawInputEvent::Key(key_event) => self.state_machine.handle_key_event(key_event),
            RawInputEvent::Resize { width, height } => Some(Command::Resize { width, height }),
        }
    }
}
