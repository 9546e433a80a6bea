//! Rendering subsystem.
//!
//! The controller builds a [`ui::ViewState`] each turn and hands it to a
//! [`ui::UIRenderer`]; nothing in here mutates application state.

pub mod ui;

pub use ui::{ColorTheme, ScreenLayout, StatusLine, TerminalUI, UIRenderer, ViewState};
