//! Event handling for the application.
//!
//! This module turns terminal input into application events and maps the
//! few application-wide shortcuts.

mod handler;
mod keys;

use crossterm::event::{KeyEvent, MouseEvent};

pub use handler::EventHandler;
pub use keys::{global_action, GlobalAction};

/// An application event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The mouse was clicked, moved or scrolled.
    Mouse(MouseEvent),
    /// The terminal was resized (columns, rows).
    Resize(u16, u16),
    /// No input within the tick rate.
    Tick,
}
