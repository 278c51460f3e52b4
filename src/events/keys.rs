//! Application-wide key bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Action bound to a global shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    /// Leave without submitting.
    Quit,
    /// Submit the form and leave.
    Submit,
}

/// Map a key to a global action.
///
/// Esc only quits when no suggestion menu is open; otherwise it belongs to
/// the tag widget, which closes its menu.
pub fn global_action(key: KeyEvent, menu_open: bool) -> Option<GlobalAction> {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(GlobalAction::Quit),
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => Some(GlobalAction::Submit),
        (KeyCode::Esc, _) if !menu_open => Some(GlobalAction::Quit),
        _ => None,
    }
}
