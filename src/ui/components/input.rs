//! Form input component.
//!
//! A named form element holding a value. The kind decides how it is drawn,
//! whether it can take focus and what it contributes on submission.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::text_field::TextField;
use crate::ui::theme::theme;

/// Kind of a form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// Plain single-line text.
    Text,
    /// Text drawn masked.
    Password,
    /// Not drawn and never focused; only carries a value.
    Hidden,
    /// On/off toggle.
    Checkbox,
}

/// A named form input.
#[derive(Debug, Clone)]
pub struct Input {
    /// Name used on submission.
    name: String,
    /// The input kind.
    kind: InputKind,
    /// The value holder.
    field: TextField,
    /// Checkbox state.
    checked: bool,
}

impl Input {
    /// Create an empty input.
    pub fn new(name: impl Into<String>, kind: InputKind) -> Self {
        Self {
            name: name.into(),
            kind,
            field: TextField::new(),
            checked: false,
        }
    }

    /// Create an input with an initial value.
    pub fn with_value(name: impl Into<String>, kind: InputKind, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            field: TextField::with_value(value),
            checked: false,
        }
    }

    /// Get the input name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the input kind.
    pub fn kind(&self) -> InputKind {
        self.kind
    }

    /// Change the input kind.
    pub fn set_kind(&mut self, kind: InputKind) {
        self.kind = kind;
    }

    /// Check if the input is hidden.
    pub fn is_hidden(&self) -> bool {
        self.kind == InputKind::Hidden
    }

    /// Check if the input can take keyboard focus.
    pub fn is_focusable(&self) -> bool {
        !self.is_hidden()
    }

    /// Get the current value.
    pub fn value(&self) -> &str {
        self.field.value()
    }

    /// Set the value.
    pub fn set_value(&mut self, value: impl Into<String>) -> &str {
        self.field.set_value(value)
    }

    /// Check if a checkbox is checked.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Set the checkbox state.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// The value posted for this input, if any.
    ///
    /// Unchecked checkboxes post nothing; checked ones post `"on"`.
    pub fn submission_value(&self) -> Option<String> {
        match self.kind {
            InputKind::Checkbox => self.checked.then(|| "on".to_string()),
            _ => Some(self.value().to_string()),
        }
    }

    /// Height needed to draw this input.
    pub fn required_height(&self) -> u16 {
        match self.kind {
            InputKind::Hidden => 0,
            InputKind::Checkbox => 1,
            InputKind::Text | InputKind::Password => 3,
        }
    }

    /// Handle keyboard input.
    ///
    /// Returns true if the value changed.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match self.kind {
            InputKind::Hidden => false,
            InputKind::Checkbox => match key.code {
                KeyCode::Char(' ') | KeyCode::Enter => {
                    self.checked = !self.checked;
                    true
                }
                _ => false,
            },
            InputKind::Text | InputKind::Password => self.field.handle_input(key),
        }
    }

    /// Handle a click on the input.
    pub fn handle_click(&mut self) -> bool {
        if self.kind == InputKind::Checkbox {
            self.checked = !self.checked;
            true
        } else {
            false
        }
    }

    /// Render the input.
    pub fn render(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let t = theme();
        let title_style = if focused {
            Style::default()
                .fg(t.border_focused)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(t.fg)
        };

        match self.kind {
            InputKind::Hidden => {}
            InputKind::Checkbox => {
                let mark = if self.checked { "[x] " } else { "[ ] " };
                let line = Line::from(vec![
                    Span::styled(mark, Style::default().fg(t.accent)),
                    Span::styled(self.name.clone(), title_style),
                ]);
                frame.render_widget(Paragraph::new(line), area);
            }
            InputKind::Text | InputKind::Password => {
                let border_style = if focused {
                    Style::default().fg(t.border_focused)
                } else {
                    Style::default().fg(t.border)
                };
                let block = Block::default()
                    .title(Span::styled(format!(" {} ", self.name), title_style))
                    .borders(Borders::ALL)
                    .border_style(border_style);
                let inner = block.inner(area);
                frame.render_widget(block, area);

                let display = (self.kind == InputKind::Password)
                    .then(|| "•".repeat(self.value().chars().count()));
                self.field.render_line(frame, inner, focused, display);
            }
        }
    }
}
