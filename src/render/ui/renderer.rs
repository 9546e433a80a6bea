//! UI renderer trait
//!
//! This module defines the `UIRenderer` trait for drawing frames and managing terminal
//! lifecycle hooks such as initialization, cleanup and job-control suspend.

use crate::error::Result;
use crate::render::ui::state::ViewState;

/// Core trait for UI rendering
pub trait UIRenderer {
    /// Draw one frame from `view_state`
    fn render(&mut self, view_state: &ViewState) -> Result<()>;

    /// Enter raw mode and the alternate screen
    fn initialize(&mut self) -> Result<()>;

    /// Restore the terminal to its original state
    fn cleanup(&mut self) -> Result<()>;

    /// Tear the display down, stop the process (job control), and bring the display back
    /// once the process is continued
    fn suspend(&mut self) -> Result<()>;

    /// Get current terminal dimensions
    fn get_terminal_size(&self) -> Result<(u16, u16)>; // (width, height)
}
