//! Text field component.
//!
//! This module provides the single-line text field used both as the value
//! holder of a form input and as the visible typing area of the tag widget:
//! - Get/set/clear of the current value
//! - Character input and deletion
//! - Cursor movement (left/right, home/end)
//! - Horizontal scrolling when the value is wider than the field

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::theme;

/// A single-line text field.
///
/// The cursor is kept as a byte offset that always sits on a char boundary.
#[derive(Debug, Clone, Default)]
pub struct TextField {
    /// The current value.
    value: String,
    /// Cursor position within the value (byte offset).
    cursor: usize,
    /// Placeholder text shown when empty.
    placeholder: String,
}

impl TextField {
    /// Create a new empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new field with an initial value.
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self {
            value,
            cursor,
            placeholder: String::new(),
        }
    }

    /// Set the placeholder text.
    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }

    /// Get the placeholder text.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Get the current value.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Set the value, move the cursor to the end and return the new value.
    pub fn set_value(&mut self, value: impl Into<String>) -> &str {
        self.value = value.into();
        self.cursor = self.value.len();
        &self.value
    }

    /// Clear the field.
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Check if the field is empty.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Get the cursor position (byte offset).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Get the cursor position in characters, used for on-screen placement.
    pub fn cursor_column(&self) -> usize {
        self.value[..self.cursor].chars().count()
    }

    /// Handle keyboard input.
    ///
    /// Returns true if the value was modified.
    pub fn handle_input(&mut self, key: KeyEvent) -> bool {
        match (key.code, key.modifiers) {
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                if self.value.is_empty() {
                    false
                } else {
                    self.clear();
                    true
                }
            }
            (KeyCode::Char('w'), KeyModifiers::CONTROL) => self.delete_word_before_cursor(),
            (KeyCode::Char('a'), KeyModifiers::CONTROL) => {
                self.cursor = 0;
                false
            }
            (KeyCode::Char('e'), KeyModifiers::CONTROL) => {
                self.cursor = self.value.len();
                false
            }
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
                self.value.insert(self.cursor, c);
                self.cursor += c.len_utf8();
                true
            }
            (KeyCode::Backspace, _) => match self.prev_boundary() {
                Some(prev) => {
                    self.value.replace_range(prev..self.cursor, "");
                    self.cursor = prev;
                    true
                }
                None => false,
            },
            (KeyCode::Delete, _) => match self.next_boundary() {
                Some(next) => {
                    self.value.replace_range(self.cursor..next, "");
                    true
                }
                None => false,
            },
            (KeyCode::Left, _) => {
                if let Some(prev) = self.prev_boundary() {
                    self.cursor = prev;
                }
                false
            }
            (KeyCode::Right, _) => {
                if let Some(next) = self.next_boundary() {
                    self.cursor = next;
                }
                false
            }
            (KeyCode::Home, _) => {
                self.cursor = 0;
                false
            }
            (KeyCode::End, _) => {
                self.cursor = self.value.len();
                false
            }
            _ => false,
        }
    }

    fn prev_boundary(&self) -> Option<usize> {
        self.value[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
    }

    fn next_boundary(&self) -> Option<usize> {
        self.value[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
    }

    /// Delete the word before the cursor (Ctrl+W).
    fn delete_word_before_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let before = self.value[..self.cursor].trim_end();
        let word_start = before
            .char_indices()
            .rev()
            .find(|(_, c)| !c.is_alphanumeric())
            .map(|(i, c)| i + c.len_utf8())
            .unwrap_or(0);
        self.value.replace_range(word_start..self.cursor, "");
        self.cursor = word_start;
        true
    }

    /// Render the field as a single line without a border.
    ///
    /// `display` replaces the value on screen (used for masked inputs).
    pub fn render_line(&self, frame: &mut Frame, area: Rect, focused: bool, display: Option<String>) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let t = theme();

        let (text, style) = if self.value.is_empty() && !self.placeholder.is_empty() {
            (self.placeholder.clone(), Style::default().fg(t.placeholder))
        } else {
            (
                display.unwrap_or_else(|| self.value.clone()),
                Style::default().fg(t.input_fg),
            )
        };

        // Scroll so the cursor stays visible.
        let column = self.cursor_column() as u16;
        let offset = column.saturating_sub(area.width.saturating_sub(1));
        let visible: String = text.chars().skip(offset as usize).collect();

        frame.render_widget(Paragraph::new(visible).style(style), area);

        if focused {
            frame.set_cursor_position(Position::new(area.x + column - offset, area.y));
        }
    }
}
