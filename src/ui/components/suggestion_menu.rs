//! Suggestion menu component.
//!
//! Filters a static candidate list against the typed text and shows up to
//! a fixed number of matches below the text field. Keeps track of a single
//! focused item for keyboard (and optionally pointer) driven selection.
//!
//! Focus never wraps: moving down from the last item stays there, moving up
//! from the first item clears focus.

use std::sync::Arc;

use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::ui::theme::theme;

/// Default maximum number of suggestions shown at once.
pub const DEFAULT_MAX_ITEMS: usize = 6;

/// Upper bound for the number of suggestions kept by an update.
pub const MAX_ITEMS_LIMIT: usize = 100;

/// How the typed text is matched against candidates.
///
/// Both modes ignore case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The typed text is a regular expression. Text that is not a valid
    /// expression matches nothing.
    #[default]
    Pattern,
    /// The typed text is matched as a plain substring.
    Literal,
}

impl MatchMode {
    /// Build the matcher for `query`, or `None` if it cannot match anything.
    fn matcher(self, query: &str) -> Option<Regex> {
        let pattern = match self {
            MatchMode::Pattern => query.to_string(),
            MatchMode::Literal => regex::escape(query),
        };
        match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            Ok(regex) => Some(regex),
            Err(e) => {
                debug!(query, error = %e, "Query is not a valid pattern");
                None
            }
        }
    }
}

/// Event raised by the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuEvent {
    /// A suggestion was picked with the pointer (suggestion text).
    Selected(String),
}

/// A rendered suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    /// The suggestion text.
    text: String,
    /// Where the item was last drawn.
    area: Option<Rect>,
}

impl MenuItem {
    /// Get the suggestion text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the last drawn area.
    pub fn area(&self) -> Option<Rect> {
        self.area
    }
}

/// Suggestion menu component.
#[derive(Debug, Clone)]
pub struct SuggestionMenu {
    /// All candidates, in their original order.
    candidates: Arc<[String]>,
    /// Items produced by the last update.
    items: Vec<MenuItem>,
    /// Index of the focused item.
    focused: Option<usize>,
    /// Whether the menu is shown.
    visible: bool,
    /// Maximum number of items kept by an update.
    max_items: usize,
    /// How queries are matched.
    match_mode: MatchMode,
    /// Whether hovering an item focuses it.
    hover_focus: bool,
    /// Item currently under the pointer.
    hovered: Option<usize>,
    /// Where the menu was last drawn.
    area: Option<Rect>,
}

impl SuggestionMenu {
    /// Create a hidden, empty menu over `candidates`.
    pub fn new(candidates: Arc<[String]>) -> Self {
        Self {
            candidates,
            items: Vec::new(),
            focused: None,
            visible: false,
            max_items: DEFAULT_MAX_ITEMS,
            match_mode: MatchMode::default(),
            hover_focus: true,
            hovered: None,
            area: None,
        }
    }

    /// Set the maximum number of items kept by an update.
    ///
    /// The value is clamped to `1..=MAX_ITEMS_LIMIT`.
    pub fn set_max_items(&mut self, max_items: usize) {
        self.max_items = max_items.clamp(1, MAX_ITEMS_LIMIT);
    }

    /// Get the maximum number of items kept by an update.
    pub fn max_items(&self) -> usize {
        self.max_items
    }

    /// Set how queries are matched.
    pub fn set_match_mode(&mut self, match_mode: MatchMode) {
        self.match_mode = match_mode;
    }

    /// Set whether hovering an item focuses it.
    pub fn set_hover_focus(&mut self, hover_focus: bool) {
        self.hover_focus = hover_focus;
    }

    /// Get the candidates.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Rebuild the items from the candidates matching `query`.
    ///
    /// Previous items are discarded and focus is cleared.
    pub fn update(&mut self, query: &str) {
        self.items = match self.match_mode.matcher(query) {
            Some(regex) => self
                .candidates
                .iter()
                .filter(|candidate| regex.is_match(candidate))
                .take(self.max_items)
                .map(|text| MenuItem {
                    text: text.clone(),
                    area: None,
                })
                .collect(),
            None => Vec::new(),
        };
        self.focused = None;
        self.hovered = None;
        trace!(query, matches = self.items.len(), "Menu updated");
    }

    /// Show the menu.
    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the menu.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Check if the menu is shown.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Check if the last update produced any item.
    pub fn has_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// Get the current items.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Get the texts of the current items.
    pub fn item_texts(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.text.as_str()).collect()
    }

    /// Get the focused index.
    pub fn focused_index(&self) -> Option<usize> {
        self.focused
    }

    /// Move focus to the next item.
    ///
    /// Focuses the first item when nothing is focused. Stays on the last item.
    pub fn focus_down(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.focused = match self.focused {
            None => Some(0),
            Some(index) if index + 1 < self.items.len() => Some(index + 1),
            Some(index) => Some(index),
        };
    }

    /// Move focus to the previous item.
    ///
    /// Clears focus when the first item is focused. Does nothing when
    /// nothing is focused.
    pub fn focus_up(&mut self) {
        self.focused = match self.focused {
            None | Some(0) => None,
            Some(index) => Some(index - 1),
        };
    }

    /// Check if an item is focused.
    pub fn has_focused_item(&self) -> bool {
        self.focused.is_some()
    }

    /// Get the text of the focused item.
    pub fn focused_item_text(&self) -> Option<&str> {
        self.focused
            .and_then(|index| self.items.get(index))
            .map(|item| item.text.as_str())
    }

    /// Focus the item under the pointer (hover variant).
    pub fn hover(&mut self, index: usize) {
        if self.hover_focus && index < self.items.len() {
            self.focused = Some(index);
        }
    }

    /// Clear focus when the pointer leaves an item (hover variant).
    pub fn unhover(&mut self) {
        if self.hover_focus {
            self.focused = None;
        }
    }

    /// Find the item drawn at the given screen position.
    pub fn item_at(&self, column: u16, row: u16) -> Option<usize> {
        if !self.visible {
            return None;
        }
        let position = Position::new(column, row);
        self.items
            .iter()
            .position(|item| item.area.is_some_and(|area| area.contains(position)))
    }

    /// Check whether the menu, as last drawn, covers the given position.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.visible
            && self
                .area
                .is_some_and(|area| area.contains(Position::new(column, row)))
    }

    /// Handle the pointer moving to the given screen position.
    pub fn handle_hover(&mut self, column: u16, row: u16) {
        let over = self.item_at(column, row);
        match (self.hovered, over) {
            (_, Some(index)) => self.hover(index),
            (Some(_), None) => self.unhover(),
            (None, None) => {}
        }
        self.hovered = over;
    }

    /// Handle a left click at the given screen position.
    pub fn handle_click(&mut self, column: u16, row: u16) -> Option<MenuEvent> {
        let index = self.item_at(column, row)?;
        let text = self.items[index].text.clone();
        debug!(suggestion = %text, "Suggestion clicked");
        Some(MenuEvent::Selected(text))
    }

    /// Render the menu as an overlay anchored below `anchor`.
    ///
    /// The menu opens above the anchor when there is not enough room below.
    pub fn render(&mut self, frame: &mut Frame, anchor: Rect) {
        if !self.visible || self.items.is_empty() {
            self.area = None;
            return;
        }
        let t = theme();
        let bounds = frame.area();

        let widest = self
            .items
            .iter()
            .map(|item| item.text.chars().count())
            .max()
            .unwrap_or(0);
        let width = u16::try_from(widest + 4)
            .unwrap_or(u16::MAX)
            .max(12)
            .min(bounds.width);
        let height = u16::try_from(self.items.len())
            .unwrap_or(u16::MAX)
            .saturating_add(2)
            .min(bounds.height);

        let below = anchor.bottom();
        let y = if below.saturating_add(height) <= bounds.bottom() {
            below
        } else {
            anchor.y.saturating_sub(height).max(bounds.y)
        };
        let x = anchor.x.min(bounds.right().saturating_sub(width));
        let area = Rect::new(x, y, width, height);
        self.area = Some(area);

        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.menu_border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let normal = Style::default().fg(t.menu_fg).add_modifier(Modifier::BOLD);
        let focused = Style::default()
            .fg(t.menu_focus_fg)
            .bg(t.menu_focus_bg)
            .add_modifier(Modifier::BOLD);

        for item in &mut self.items {
            item.area = None;
        }
        let rows = inner.y..inner.bottom();
        for ((index, item), row) in self.items.iter_mut().enumerate().zip(rows) {
            let item_area = Rect::new(inner.x, row, inner.width, 1);
            item.area = Some(item_area);
            let style = if self.focused == Some(index) {
                focused
            } else {
                normal
            };
            frame.render_widget(
                Paragraph::new(format!(" {} ", item.text)).style(style),
                item_area,
            );
        }
    }
}
