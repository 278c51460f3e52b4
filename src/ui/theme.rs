//! Theme and styling configuration.
//!
//! The theme is installed once per process. Components read it through
//! [`theme`], which falls back to the default palette if nothing was
//! installed.

use std::sync::OnceLock;

use ratatui::style::Color;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Color theme for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Border color of unfocused elements.
    pub border: Color,
    /// Border color of the focused element.
    pub border_focused: Color,
    /// Accent color for titles and key hints.
    pub accent: Color,
    /// Foreground of typed text.
    pub input_fg: Color,
    /// Foreground of placeholder text.
    pub placeholder: Color,
    /// Tag chip foreground.
    pub chip_fg: Color,
    /// Tag chip background.
    pub chip_bg: Color,
    /// Color of the chip close control.
    pub chip_close: Color,
    /// Suggestion menu border.
    pub menu_border: Color,
    /// Suggestion menu item foreground.
    pub menu_fg: Color,
    /// Background of the focused suggestion.
    pub menu_focus_bg: Color,
    /// Foreground of the focused suggestion.
    pub menu_focus_fg: Color,
    /// Color for error messages in the status line.
    pub error: Color,
    /// Color for informational messages in the status line.
    pub info: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Yellow,
            accent: Color::Cyan,
            input_fg: Color::White,
            placeholder: Color::DarkGray,
            chip_fg: Color::Black,
            chip_bg: Color::Rgb(0xEE, 0xEE, 0xEE),
            chip_close: Color::Rgb(0x88, 0x88, 0x88),
            menu_border: Color::Rgb(0xCC, 0xCC, 0xCC),
            menu_fg: Color::White,
            menu_focus_bg: Color::Rgb(0xFE, 0xFB, 0xC6),
            menu_focus_fg: Color::Black,
            error: Color::Red,
            info: Color::Green,
        }
    }
}

/// Install the process-wide theme.
///
/// Only the first call has an effect. Returns true if this call installed
/// the theme.
pub fn init_theme(theme: Theme) -> bool {
    THEME.set(theme).is_ok()
}

/// Get the active theme.
pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}
