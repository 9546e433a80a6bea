//! Color theme and styling definitions using ratatui colors
//!
//! Severity colors are shared by the class column of the list and by marker lines in the
//! log pane.

use crate::catalog::Severity;
use ratatui::style::{Color, Modifier, Style};

/// Color theme for terminal UI elements
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Column header row
    pub header: Style,

    /// Highlighted list row
    pub selection: Style,

    /// Info row above the log pane
    pub info_line: Style,

    /// Status line
    pub status: Style,

    /// "not found" indicator and error messages
    pub alert: Style,

    /// Help popup body
    pub help: Style,

    pub error: Color,
    pub warn: Color,
    pub log: Color,
    pub qa: Color,
    pub info: Color,

    /// When false, severities are drawn in the default color
    pub colored_severity: bool,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            header: Style::default().add_modifier(Modifier::BOLD),
            selection: Style::default().fg(Color::White).bg(Color::Blue),
            info_line: Style::default().fg(Color::Black).bg(Color::Cyan),
            status: Style::default().fg(Color::White).bg(Color::Blue),
            alert: Style::default().fg(Color::White).bg(Color::Red),
            help: Style::default().fg(Color::White).bg(Color::Black),
            error: Color::Red,
            warn: Color::Yellow,
            log: Color::Magenta,
            qa: Color::Cyan,
            info: Color::Green,
            colored_severity: true,
        }
    }
}

impl ColorTheme {
    /// Theme for terminals without color support
    pub fn monochrome() -> Self {
        Self {
            header: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            selection: Style::default().add_modifier(Modifier::REVERSED),
            info_line: Style::default().add_modifier(Modifier::REVERSED),
            status: Style::default().add_modifier(Modifier::REVERSED),
            alert: Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED),
            help: Style::default(),
            error: Color::Reset,
            warn: Color::Reset,
            log: Color::Reset,
            qa: Color::Reset,
            info: Color::Reset,
            colored_severity: false,
        }
    }

    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Error => self.error,
            Severity::Warn => self.warn,
            Severity::Log => self.log,
            Severity::Qa => self.qa,
            Severity::Info => self.info,
        }
    }

    /// Style for a marker line or class label of `severity`
    pub fn severity_style(&self, severity: Severity) -> Style {
        if self.colored_severity {
            Style::default().fg(self.severity_color(severity))
        } else if severity >= Severity::Warn {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme() {
        let theme = ColorTheme::default();
        assert_eq!(theme.selection.bg, Some(Color::Blue));
        assert_eq!(
            theme.severity_style(Severity::Error).fg,
            Some(Color::Red)
        );
        assert_eq!(
            theme.severity_style(Severity::Warn).fg,
            Some(Color::Yellow)
        );
        assert_eq!(
            theme.severity_style(Severity::Info).fg,
            Some(Color::Green)
        );
    }

    #[test]
    fn test_monochrome_theme() {
        let theme = ColorTheme::monochrome();
        assert_eq!(theme.severity_style(Severity::Error).fg, None);
        assert!(theme
            .severity_style(Severity::Error)
            .add_modifier
            .contains(Modifier::BOLD));
        assert!(!theme
            .severity_style(Severity::Qa)
            .add_modifier
            .contains(Modifier::BOLD));
        assert!(theme.selection.add_modifier.contains(Modifier::REVERSED));
    }
}
