//! Application orchestration layer
//!
//! [`Application`] ties the input service, the [`Controller`] and a [`UIRenderer`]
//! together in a blocking loop: draw, read one command, apply it.

pub mod controller;

pub use controller::{Controller, Flow};

use crate::config::ViewerConfig;
use crate::error::Result;
use crate::input::{Command, InputService};
use crate::render::ui::UIRenderer;
use log::{debug, error};

/// Application orchestrator
pub struct Application {
    controller: Controller,
    ui_renderer: Box<dyn UIRenderer>,
    input: InputService,
}

impl Application {
    /// Load the catalog for `config` sized to the renderer's terminal.
    ///
    /// Fails before the terminal is touched when the directory cannot be read or the
    /// terminal is too small.
    pub fn new(
        config: &ViewerConfig,
        ui_renderer: Box<dyn UIRenderer>,
        input: InputService,
    ) -> Result<Self> {
        let (width, height) = ui_renderer.get_terminal_size()?;
        let controller = Controller::new(&config.log_dir, width, height)?;
        Ok(Self::with_controller(controller, ui_renderer, input))
    }

    pub fn with_controller(
        controller: Controller,
        ui_renderer: Box<dyn UIRenderer>,
        input: InputService,
    ) -> Self {
        Self {
            controller,
            ui_renderer,
            input,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    /// Run until quit, interrupt, end of input or a fatal error.
    ///
    /// The terminal is restored before any error is returned.
    pub fn run(&mut self) -> Result<()> {
        self.ui_renderer.initialize()?;
        let result = self.event_loop();
        let cleanup = self.ui_renderer.cleanup();

        if let Err(err) = &result {
            error!("session ended: {err}");
        }
        result?;
        cleanup
    }

    fn event_loop(&mut self) -> Result<()> {
        loop {
            self.ui_renderer.render(&self.controller.view())?;

            let Some(command) = self.input.next_command()? else {
                debug!("input exhausted");
                return Ok(());
            };

            match self.controller.apply(command)? {
                Flow::Continue => {}
                Flow::Quit => return Ok(()),
                Flow::Suspend => {
                    self.ui_renderer.suspend()?;
                    let (width, height) = self.ui_renderer.get_terminal_size()?;
                    self.controller.apply(Command::Resize { width, height })?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ElogvError;
    use crate::input::ScriptedEventSource;
    use crate::render::ui::state::ViewState;
    use crate::render::ui::MockUIRenderer;
    use ratatui::crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use std::cell::RefCell;
    use std::path::Path;
    use std::rc::Rc;

    /// Shares the mock's recordings with the test after it has been boxed.
    struct SharedRenderer(Rc<RefCell<MockUIRenderer>>);

    impl UIRenderer for SharedRenderer {
        fn render(&mut self, view_state: &ViewState) -> Result<()> {
            self.0.borrow_mut().render(view_state)
        }

        fn initialize(&mut self) -> Result<()> {
            self.0.borrow_mut().initialize()
        }

        fn cleanup(&mut self) -> Result<()> {
            self.0.borrow_mut().cleanup()
        }

        fn suspend(&mut self) -> Result<()> {
            self.0.borrow_mut().suspend()
        }

        fn get_terminal_size(&self) -> Result<(u16, u16)> {
            self.0.borrow().get_terminal_size()
        }
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn chars(text: &str) -> Vec<Event> {
        text.chars().map(|c| key(KeyCode::Char(c))).collect()
    }

    fn populate(dir: &Path) {
        for (name, body) in [
            ("dev-lang:python:20230101-000000.log", "INFO: ok\n"),
            ("sys-apps:coreutils:20230102-000000.log", "ERROR: build failed\n"),
            ("app-misc:screen:20221231-000000.log", "LOG: note\n"),
        ] {
            std::fs::write(dir.join(name), body).unwrap();
        }
    }

    fn run_script(dir: &Path, events: Vec<Event>) -> (Rc<RefCell<MockUIRenderer>>, Result<()>) {
        let mock = Rc::new(RefCell::new(MockUIRenderer::new()));
        let config = ViewerConfig {
            log_dir: dir.to_path_buf(),
            monochrome: false,
            log_file: None,
        };
        let input = InputService::new(Box::new(ScriptedEventSource::new(events)));
        let mut app =
            Application::new(&config, Box::new(SharedRenderer(Rc::clone(&mock))), input).unwrap();
        let result = app.run();
        (mock, result)
    }

    #[test]
    fn renders_each_turn_and_quits() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());

        let (mock, result) = run_script(
            dir.path(),
            vec![key(KeyCode::Char('j')), key(KeyCode::Char('q')), key(KeyCode::Char('j'))],
        );
        result.unwrap();

        let mock = mock.borrow();
        assert_eq!(mock.render_count, 2);
        assert_eq!(
            mock.selected,
            vec![
                Some("sys-apps/coreutils".to_string()),
                Some("dev-lang/python".to_string())
            ]
        );
        assert!(!mock.is_initialized);
    }

    #[test]
    fn search_prompt_shows_on_status_line() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());

        let mut events = vec![key(KeyCode::Char('/'))];
        events.extend(chars("scr"));
        events.push(key(KeyCode::Enter));
        let (mock, result) = run_script(dir.path(), events);
        result.unwrap();

        let mock = mock.borrow();
        assert!(mock.statuses.contains(&"/scr".to_string()));
        assert_eq!(
            mock.selected.last().cloned().flatten().as_deref(),
            Some("app-misc/screen")
        );
        assert_eq!(mock.statuses.last().map(String::as_str), Some(""));
    }

    #[test]
    fn delete_sequence_and_suspend() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());

        let (mock, result) = run_script(
            dir.path(),
            vec![
                key(KeyCode::Char('d')),
                key(KeyCode::Char('d')),
                Event::Key(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CONTROL)),
            ],
        );
        result.unwrap();

        let mock = mock.borrow();
        assert_eq!(mock.suspend_count, 1);
        assert!(mock.statuses.iter().any(|s| s.starts_with("delete:")));
        assert!(mock.statuses.contains(&"Deleted 1 elogs".to_string()));
        assert!(!dir
            .path()
            .join("sys-apps:coreutils:20230102-000000.log")
            .exists());
    }

    #[test]
    fn fatal_error_restores_terminal() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());

        let mut events = vec![key(KeyCode::Char('d')), key(KeyCode::Char('a'))];
        events.push(key(KeyCode::Char('q')));
        let (mock, result) = run_script(dir.path(), events);

        assert!(matches!(result, Err(ElogvError::NoEntries { .. })));
        assert!(!mock.borrow().is_initialized);
    }

    #[test]
    fn resize_event_is_checked() {
        let dir = tempfile::tempdir().unwrap();
        populate(dir.path());

        let (_, result) = run_script(dir.path(), vec![Event::Resize(60, 20)]);
        assert!(matches!(
            result,
            Err(ElogvError::TerminalTooSmall {
                width: 60,
                height: 20
            })
        ));
    }
}
