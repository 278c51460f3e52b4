//! Application settings configuration.

use serde::{Deserialize, Serialize};

use crate::ui::components::{MatchMode, DEFAULT_MAX_ITEMS};

/// Default event loop tick rate in milliseconds.
pub const DEFAULT_TICK_RATE_MS: u64 = 100;

/// Tag widget settings (`[widget]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    /// Maximum number of suggestions shown at once.
    pub max_items: usize,
    /// How typed text is matched against candidates.
    pub match_mode: MatchMode,
    /// Whether hovering a suggestion focuses it.
    pub hover_focus: bool,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            match_mode: MatchMode::Pattern,
            hover_focus: true,
        }
    }
}

/// Terminal UI settings (`[ui]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Event loop tick rate in milliseconds.
    pub tick_rate_ms: u64,
    /// Whether mouse capture is enabled.
    pub mouse: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
            mouse: true,
        }
    }
}
