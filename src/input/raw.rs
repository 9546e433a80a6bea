//! Low-level input collection: blocking crossterm reads translated into primitive events
//! that the higher-level input service can consume.

use crate::error::Result;
use ratatui::crossterm::event::{self, Event, KeyEvent};
use std::collections::VecDeque;

/// Low-level events surfaced by the raw input collector.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInputEvent {
    Key(KeyEvent),
    Resize { width: u16, height: u16 },
}

impl RawInputEvent {
    /// Keep keyboard and resize events, drop the rest (mouse, focus, paste).
    pub fn from_event(event: Event) -> Option<Self> {
        match event {
            Event::Key(key_event) => Some(Self::Key(key_event)),
            Event::Resize(width, height) => Some(Self::Resize { width, height }),
            _ => None,
        }
    }
}

/// Source of terminal events. The application blocks on it once per turn.
pub trait EventSource {
    /// Block until the next relevant event. `Ok(None)` means the source is exhausted.
    fn next_event(&mut self) -> Result<Option<RawInputEvent>>;
}

/// Reads events from the real terminal.
#[derive(Debug, Default)]
pub struct CrosstermEventSource;

impl CrosstermEventSource {
    pub fn new() -> Self {
        Self
    }
}

impl EventSource for CrosstermEventSource {
    fn next_event(&mut self) -> Result<Option<RawInputEvent>> {
        loop {
            if let Some(raw) = RawInputEvent::from_event(event::read()?) {
                return Ok(Some(raw));
            }
        }
    }
}

/// Replays a fixed list of events (used by tests and scripted sessions).
#[derive(Debug, Default)]
pub struct ScriptedEventSource {
    pending_events: VecDeque<RawInputEvent>,
}

impl ScriptedEventSource {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            pending_events: events
                .into_iter()
                .filter_map(RawInputEvent::from_event)
                .collect(),
        }
    }
}

impl EventSource for ScriptedEventSource {
    fn next_event(&mut self) -> Result<Option<RawInputEvent>> {
        Ok(self.pending_events.pop_front())
    }
}
