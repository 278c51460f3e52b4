//! Main application state.
//!
//! The application is a single form screen with a status line and a help
//! bar. Events come in through [`App::handle_event`]; the terminal loop in
//! `main` draws with [`App::render`] until [`App::should_quit`] is set.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::Span,
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::events::{global_action, Event, GlobalAction};
use crate::ui::components::WidgetEvent;
use crate::ui::{render_context_help, theme, Form, FormEvent, SubmittedField};

/// Kind of a status line message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    /// Informational message.
    Info,
    /// Error message.
    Error,
}

/// A status line message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    /// The message text.
    pub message: String,
    /// The message kind.
    pub kind: StatusKind,
}

/// The main application struct that holds all state.
pub struct App {
    /// The form being edited.
    form: Form,
    /// Application configuration.
    config: Config,
    /// Whether the application should quit.
    should_quit: bool,
    /// Values collected when the user submitted.
    submission: Option<Vec<SubmittedField>>,
    /// Last status message.
    status: Option<Status>,
}

impl App {
    /// Create a new application instance around a prepared form.
    pub fn new(form: Form, config: Config) -> Self {
        debug!("Creating new application instance");
        Self {
            form,
            config,
            should_quit: false,
            submission: None,
            status: None,
        }
    }

    /// Get the form.
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Get the configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Get the submitted values, if the user submitted.
    pub fn submission(&self) -> Option<&[SubmittedField]> {
        self.submission.as_deref()
    }

    /// Take the submitted values, if the user submitted.
    pub fn take_submission(&mut self) -> Option<Vec<SubmittedField>> {
        self.submission.take()
    }

    /// Get the last status message.
    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    /// Show an informational message.
    pub fn notify_info(&mut self, message: impl Into<String>) {
        self.status = Some(Status {
            message: message.into(),
            kind: StatusKind::Info,
        });
    }

    /// Show an error in the status line.
    pub fn handle_error(&mut self, error: &AppError) {
        warn!(error = %error, "Error reported to user");
        let mut message = error.user_message();
        if let Some(action) = error.suggested_action() {
            message.push(' ');
            message.push_str(action);
        }
        self.status = Some(Status {
            message,
            kind: StatusKind::Error,
        });
    }

    /// Handle an application event.
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                match global_action(key, self.form.menu_open()) {
                    Some(GlobalAction::Quit) => {
                        info!("Quit without submitting");
                        self.should_quit = true;
                    }
                    Some(GlobalAction::Submit) => self.submit(),
                    None => {
                        if let Some(event) = self.form.handle_key(key) {
                            self.on_form_event(event);
                        }
                    }
                }
            }
            Event::Mouse(mouse) => {
                if let Some(event) = self.form.handle_mouse(mouse) {
                    self.on_form_event(event);
                }
            }
            Event::Resize(width, height) => {
                debug!(width, height, "Terminal resized");
            }
            Event::Tick => {}
        }
    }

    fn submit(&mut self) {
        let fields = self.form.submit();
        info!(fields = fields.len(), "Form submitted");
        self.submission = Some(fields);
        self.should_quit = true;
    }

    fn on_form_event(&mut self, event: FormEvent) {
        let message = match &event.event {
            WidgetEvent::TagAdded(tag) => format!("Added '{}' to {}", tag, event.input),
            WidgetEvent::TagRemoved(tag) => format!("Removed '{}' from {}", tag, event.input),
        };
        self.notify_info(message);
    }

    /// Render the application.
    pub fn render(&mut self, frame: &mut Frame) {
        let t = theme();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // Form
                Constraint::Length(1), // Status line
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        self.form.render(frame, chunks[0]);

        if let Some(status) = &self.status {
            let color = match status.kind {
                StatusKind::Info => t.info,
                StatusKind::Error => t.error,
            };
            let line = Span::styled(status.message.clone(), Style::default().fg(color));
            frame.render_widget(Paragraph::new(line), chunks[1]);
        }

        render_context_help(frame, chunks[2], self.form.help_context());
    }
}
