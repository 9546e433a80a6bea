//! Terminal rendering components.
//!
//! This module hosts the concrete terminal UI implementation along with the supporting
//! view/state structures, screen geometry and styling utilities.

pub mod help;
pub mod layout;
pub mod renderer;
pub mod state;
pub mod terminal;
pub mod theme;

pub use layout::{PaneAreas, ScreenLayout};
pub use renderer::UIRenderer;
pub use state::{Prompt, StatusLine, ViewState};
pub use terminal::TerminalUI;
pub use theme::ColorTheme;

#[cfg(test)]
pub use renderer::tests::MockUIRenderer;
