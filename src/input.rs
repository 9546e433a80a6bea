//! Input subsystem: terminal events in, [`Command`]s out.

pub mod raw;
pub mod service;

pub use raw::{CrosstermEventSource, EventSource, RawInputEvent, ScriptedEventSource};
pub use service::{
    Command, InputService, InputState, InputStateMachine, JumpTarget, ScrollDirection,
};
