//! Tag-entry widget with autocomplete suggestions.
//!
//! Binding a text input of a [`Form`] turns it into a hidden backing input
//! and puts this widget in its place: a row of tag chips, a visible text
//! field and a suggestion menu. The backing input always holds the
//! comma-joined tag list so it is submitted with the form.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::Style,
    text::Span,
    widgets::{Block, Borders},
    Frame,
};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use super::input::{Input, InputKind};
use super::suggestion_menu::{MatchMode, MenuEvent, SuggestionMenu, DEFAULT_MAX_ITEMS};
use super::tag_list::{TagEvent, TagList, SEPARATOR};
use super::text_field::TextField;
use crate::config::WidgetSettings;
use crate::ui::theme::theme;
use crate::ui::views::Form;

/// Errors raised when binding the widget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    /// The candidate data is not an array of strings.
    #[error("Data should be an array of string")]
    InvalidInput,

    /// The target is missing or is not a text input.
    #[error("AutoComplete can only bind to a text input ('{0}' is not one)")]
    InvalidTarget(String),
}

/// Immutable list of candidate suggestions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet(Arc<[String]>);

impl CandidateSet {
    /// Create a candidate set from strings.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(items.into_iter().map(Into::into).collect())
    }

    /// Validate untyped data as a candidate set.
    ///
    /// # Errors
    ///
    /// Returns [`BindError::InvalidInput`] unless `data` is an array whose
    /// elements are all strings.
    pub fn from_json(data: &Value) -> Result<Self, BindError> {
        let array = data.as_array().ok_or(BindError::InvalidInput)?;
        let items = array
            .iter()
            .map(|item| item.as_str().map(str::to_owned))
            .collect::<Option<Vec<String>>>()
            .ok_or(BindError::InvalidInput)?;
        Ok(Self(items.into()))
    }

    /// Get the candidates.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Get the number of candidates.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if there are no candidates.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Behaviour options of a bound widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetOptions {
    /// Maximum number of suggestions shown.
    pub max_items: usize,
    /// How typed text is matched against candidates.
    pub match_mode: MatchMode,
    /// Whether hovering a suggestion focuses it.
    pub hover_focus: bool,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_MAX_ITEMS,
            match_mode: MatchMode::Pattern,
            hover_focus: true,
        }
    }
}

impl From<&WidgetSettings> for WidgetOptions {
    fn from(settings: &WidgetSettings) -> Self {
        Self {
            max_items: settings.max_items,
            match_mode: settings.match_mode,
            hover_focus: settings.hover_focus,
        }
    }
}

/// Event raised by the widget after a tag change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidgetEvent {
    /// A tag was added (tag text).
    TagAdded(String),
    /// A tag was removed (tag text).
    TagRemoved(String),
}

/// Bind the text input `name` of `form` with the default options.
///
/// # Errors
///
/// See [`bind_with`].
pub fn bind(form: &mut Form, name: &str, items: &Value) -> Result<(), BindError> {
    bind_with(form, name, items, WidgetOptions::default())
}

/// Bind the text input `name` of `form` to the candidates in `items`.
///
/// The input is hidden and the widget takes its place in the form. On
/// error the form is left untouched.
///
/// # Errors
///
/// - [`BindError::InvalidInput`] if `items` is not an array of strings
/// - [`BindError::InvalidTarget`] if `name` is not a text input of the form
pub fn bind_with(
    form: &mut Form,
    name: &str,
    items: &Value,
    options: WidgetOptions,
) -> Result<(), BindError> {
    let candidates = CandidateSet::from_json(items)?;
    let index = form
        .text_input_position(name)
        .ok_or_else(|| BindError::InvalidTarget(name.to_string()))?;

    form.enhance(index, |input| AutoComplete::new(input, candidates, options));
    info!(input = name, "Bound autocomplete widget");
    Ok(())
}

/// The tag-entry widget.
#[derive(Debug, Clone)]
pub struct AutoComplete {
    /// The input this widget replaced; hidden, carries the serialized tags.
    original: Input,
    /// The visible typing area.
    text_field: TextField,
    /// The confirmed tags.
    tags: TagList,
    /// The suggestion menu.
    menu: SuggestionMenu,
    /// Where the text field was last drawn; the menu anchors to it.
    input_area: Option<Rect>,
}

impl AutoComplete {
    /// Build the widget around `original`.
    ///
    /// The input is switched to hidden. Its existing value, if any, is split
    /// on commas into the initial tags.
    pub fn new(original: Input, candidates: CandidateSet, options: WidgetOptions) -> Self {
        let mut tags = TagList::new();
        for text in original.value().split(SEPARATOR).filter(|s| !s.is_empty()) {
            tags.add(text);
        }

        let mut menu = SuggestionMenu::new(candidates.0);
        menu.set_max_items(options.max_items);
        menu.set_match_mode(options.match_mode);
        menu.set_hover_focus(options.hover_focus);

        let mut text_field = TextField::new();
        text_field.set_placeholder("Type to add a tag...");

        Self::from_parts(original, text_field, tags, menu)
    }

    /// Assemble the widget from already built parts.
    ///
    /// `original` is switched to hidden and immediately synced to `tags`;
    /// the menu starts hidden.
    pub fn from_parts(
        mut original: Input,
        text_field: TextField,
        tags: TagList,
        mut menu: SuggestionMenu,
    ) -> Self {
        original.set_kind(InputKind::Hidden);
        menu.hide();

        let mut widget = Self {
            original,
            text_field,
            tags,
            menu,
            input_area: None,
        };
        widget.sync_original();
        widget
    }

    /// Name of the bound input.
    pub fn name(&self) -> &str {
        self.original.name()
    }

    /// The hidden backing input.
    pub fn original(&self) -> &Input {
        &self.original
    }

    /// The serialized value carried by the backing input.
    pub fn value(&self) -> &str {
        self.original.value()
    }

    /// The visible text field.
    pub fn text_field(&self) -> &TextField {
        &self.text_field
    }

    /// The tag list.
    pub fn tags(&self) -> &TagList {
        &self.tags
    }

    /// The suggestion menu.
    pub fn menu(&self) -> &SuggestionMenu {
        &self.menu
    }

    /// Check if the suggestion menu is shown.
    pub fn is_menu_visible(&self) -> bool {
        self.menu.is_visible()
    }

    /// Handle keyboard input on the visible text field.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<WidgetEvent> {
        let event = match key.code {
            KeyCode::Down => {
                self.menu.focus_down();
                None
            }
            KeyCode::Up => {
                self.menu.focus_up();
                None
            }
            KeyCode::Enter => match self.menu.focused_item_text().map(str::to_owned) {
                Some(text) => self.select(&text),
                None => None,
            },
            KeyCode::Esc => {
                self.menu.hide();
                return None;
            }
            _ => {
                self.text_field.handle_input(key);
                self.refresh_items();
                None
            }
        };
        self.refresh_visibility();
        event
    }

    /// Handle a mouse event.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<WidgetEvent> {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(MenuEvent::Selected(text)) =
                    self.menu.handle_click(mouse.column, mouse.row)
                {
                    return self.select(&text);
                }
                match self.tags.handle_click(mouse.column, mouse.row) {
                    Some(TagEvent::Removed(text)) => {
                        self.sync_original();
                        Some(WidgetEvent::TagRemoved(text))
                    }
                    None => None,
                }
            }
            MouseEventKind::Moved => {
                self.menu.handle_hover(mouse.column, mouse.row);
                None
            }
            _ => None,
        }
    }

    /// Confirm `text` as a tag.
    ///
    /// Adds the tag, resyncs the backing input, hides the menu and clears
    /// the text field. Returns an event only if the tag was new.
    pub fn select(&mut self, text: &str) -> Option<WidgetEvent> {
        let added = self.tags.add(text);
        self.sync_original();
        self.menu.hide();
        self.text_field.clear();
        added.then(|| WidgetEvent::TagAdded(text.to_string()))
    }

    /// Remove a tag, as its close control would.
    pub fn remove_tag(&mut self, text: &str) -> Option<WidgetEvent> {
        if !self.tags.remove(text) {
            return None;
        }
        self.sync_original();
        Some(WidgetEvent::TagRemoved(text.to_string()))
    }

    /// Hide the menu when keyboard focus moves to another element.
    pub fn blur(&mut self) {
        self.menu.hide();
    }

    /// Re-filter the suggestions after the field value settled.
    fn refresh_items(&mut self) {
        if self.text_field.is_empty() {
            // Nothing to match against; skip building items.
            self.menu.hide();
        } else {
            self.menu.update(self.text_field.value());
        }
    }

    fn refresh_visibility(&mut self) {
        if !self.menu.has_items() || self.text_field.is_empty() {
            self.menu.hide();
        } else {
            self.menu.show();
        }
    }

    fn sync_original(&mut self) {
        let value = self.tags.serialize();
        debug!(input = self.original.name(), value = %value, "Syncing backing input");
        self.original.set_value(value);
    }

    /// Rows needed to draw the widget at `width`, borders included.
    pub fn required_height(&self, width: u16) -> u16 {
        self.tags.rows_needed(width.saturating_sub(2)) + 2
    }

    /// Render the chips and the text field.
    ///
    /// The menu is drawn separately by [`AutoComplete::render_overlay`] so it
    /// can cover elements rendered after this one.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let t = theme();

        let (border_style, title_style) = if focused {
            (
                Style::default().fg(t.border_focused),
                Style::default().fg(t.border_focused),
            )
        } else {
            (Style::default().fg(t.border), Style::default().fg(t.fg))
        };
        let block = Block::default()
            .title(Span::styled(format!(" {} ", self.name()), title_style))
            .borders(Borders::ALL)
            .border_style(border_style);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let input_area = self.tags.layout(inner);
        self.tags.render(frame);
        self.text_field.render_line(frame, input_area, focused, None);
        self.input_area = Some(input_area);
    }

    /// Render the suggestion menu below the text field.
    pub fn render_overlay(&mut self, frame: &mut Frame) {
        if let Some(anchor) = self.input_area {
            self.menu.render(frame, anchor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyModifiers, MouseEvent};
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn widget(items: &[&str]) -> AutoComplete {
        AutoComplete::new(
            Input::new("tags", InputKind::Text),
            CandidateSet::new(items.iter().copied()),
            WidgetOptions::default(),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(widget: &mut AutoComplete, text: &str) {
        for c in text.chars() {
            widget.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn draw(widget: &mut AutoComplete) {
        let mut terminal = Terminal::new(TestBackend::new(40, 20)).unwrap();
        terminal
            .draw(|frame| {
                widget.render(frame, Rect::new(0, 0, 40, 3), true);
                widget.render_overlay(frame);
            })
            .unwrap();
    }

    #[test]
    fn test_candidates_from_json() {
        let set = CandidateSet::from_json(&json!(["a", "b"])).unwrap();
        assert_eq!(set.as_slice(), ["a", "b"]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_candidates_reject_non_array() {
        for data in [json!("notanarray"), json!(null), json!({"a": 1}), json!(3)] {
            assert_eq!(CandidateSet::from_json(&data), Err(BindError::InvalidInput));
        }
    }

    #[test]
    fn test_candidates_reject_non_string_elements() {
        let result = CandidateSet::from_json(&json!(["a", 1]));
        assert_eq!(result, Err(BindError::InvalidInput));
    }

    #[test]
    fn test_empty_candidates_are_valid() {
        let set = CandidateSet::from_json(&json!([])).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_new_hides_original_and_starts_hidden() {
        let widget = widget(&["a"]);
        assert_eq!(widget.original().kind(), InputKind::Hidden);
        assert!(!widget.is_menu_visible());
        assert_eq!(widget.value(), "");
    }

    #[test]
    fn test_new_seeds_tags_from_existing_value() {
        let widget = AutoComplete::new(
            Input::with_value("tags", InputKind::Text, "x,,y,x"),
            CandidateSet::new(["a"]),
            WidgetOptions::default(),
        );
        assert_eq!(widget.tags().data(), vec!["x", "y"]);
        assert_eq!(widget.value(), "x,y");
    }

    #[test]
    fn test_from_parts_syncs_given_tags() {
        let mut tags = TagList::new();
        tags.add("a");
        tags.add("b");
        let mut menu = SuggestionMenu::new(CandidateSet::new(["abc"]).0);
        menu.show();

        let widget = AutoComplete::from_parts(
            Input::with_value("tags", InputKind::Text, "stale"),
            TextField::new(),
            tags,
            menu,
        );

        assert_eq!(widget.value(), "a,b");
        assert_eq!(widget.original().kind(), InputKind::Hidden);
        assert!(!widget.is_menu_visible());
    }

    #[test]
    fn test_typing_shows_matches() {
        let mut widget = widget(&["apple", "banana", "apricot"]);
        type_text(&mut widget, "ap");
        assert!(widget.is_menu_visible());
        assert_eq!(widget.menu().item_texts(), vec!["apple", "apricot"]);
    }

    #[test]
    fn test_typing_without_matches_hides_menu() {
        let mut widget = widget(&["apple"]);
        type_text(&mut widget, "zz");
        assert!(!widget.is_menu_visible());
    }

    #[test]
    fn test_clearing_field_hides_menu() {
        let mut widget = widget(&["apple"]);
        type_text(&mut widget, "a");
        assert!(widget.is_menu_visible());

        widget.handle_key(key(KeyCode::Backspace));
        assert!(!widget.is_menu_visible());
        // Items from the last non-empty query are kept.
        assert!(widget.menu().has_items());
    }

    #[test]
    fn test_arrows_move_focus_without_refiltering() {
        let mut widget = widget(&["tag1", "tag2", "tag3"]);
        type_text(&mut widget, "tag");

        widget.handle_key(key(KeyCode::Down));
        widget.handle_key(key(KeyCode::Down));
        assert_eq!(widget.menu().focused_item_text(), Some("tag2"));
        assert!(widget.is_menu_visible());

        widget.handle_key(key(KeyCode::Up));
        widget.handle_key(key(KeyCode::Up));
        assert!(!widget.menu().has_focused_item());
    }

    #[test]
    fn test_other_keys_refilter_and_reset_focus() {
        let mut widget = widget(&["tag1", "tag2"]);
        type_text(&mut widget, "tag");
        widget.handle_key(key(KeyCode::Down));

        widget.handle_key(key(KeyCode::Left));
        assert!(!widget.menu().has_focused_item());
        assert!(widget.is_menu_visible());
    }

    #[test]
    fn test_enter_on_focused_item_selects() {
        let mut widget = widget(&["tag1", "tag2"]);
        type_text(&mut widget, "tag");
        widget.handle_key(key(KeyCode::Down));
        widget.handle_key(key(KeyCode::Down));

        let event = widget.handle_key(key(KeyCode::Enter));

        assert_eq!(event, Some(WidgetEvent::TagAdded("tag2".to_string())));
        assert_eq!(widget.tags().data(), vec!["tag2"]);
        assert_eq!(widget.value(), "tag2");
        assert!(widget.text_field().is_empty());
        assert!(!widget.is_menu_visible());
    }

    #[test]
    fn test_enter_without_focus_does_nothing() {
        let mut widget = widget(&["tag1"]);
        type_text(&mut widget, "tag");

        assert_eq!(widget.handle_key(key(KeyCode::Enter)), None);
        assert!(widget.tags().is_empty());
        assert_eq!(widget.text_field().value(), "tag");
        assert!(widget.is_menu_visible());
    }

    #[test]
    fn test_selecting_duplicate_still_clears_field() {
        let mut widget = widget(&["tag1"]);
        widget.select("tag1");
        type_text(&mut widget, "tag");
        widget.handle_key(key(KeyCode::Down));

        assert_eq!(widget.handle_key(key(KeyCode::Enter)), None);
        assert_eq!(widget.tags().data(), vec!["tag1"]);
        assert!(widget.text_field().is_empty());
        assert!(!widget.is_menu_visible());
    }

    #[test]
    fn test_esc_hides_menu() {
        let mut widget = widget(&["tag1"]);
        type_text(&mut widget, "t");
        widget.handle_key(key(KeyCode::Esc));
        assert!(!widget.is_menu_visible());
        assert_eq!(widget.text_field().value(), "t");
    }

    #[test]
    fn test_click_on_suggestion_selects_it() {
        let mut widget = widget(&["apple", "banana", "grape", "apricot"]);
        type_text(&mut widget, "a");
        draw(&mut widget);

        let area = widget
            .menu()
            .items()
            .iter()
            .find(|item| item.text() == "apricot")
            .and_then(|item| item.area())
            .unwrap();
        let event = widget.handle_mouse(click(area.x, area.y));

        assert_eq!(event, Some(WidgetEvent::TagAdded("apricot".to_string())));
        assert_eq!(widget.tags().data(), vec!["apricot"]);
        assert_eq!(widget.value(), "apricot");
        assert!(widget.text_field().is_empty());
        assert!(!widget.is_menu_visible());
    }

    #[test]
    fn test_click_on_close_control_removes_tag() {
        let mut widget = widget(&["x", "y"]);
        widget.select("x");
        widget.select("y");
        draw(&mut widget);

        let close = widget.tags().tags()[0].chip().unwrap().close;
        let event = widget.handle_mouse(click(close.x, close.y));

        assert_eq!(event, Some(WidgetEvent::TagRemoved("x".to_string())));
        assert_eq!(widget.tags().data(), vec!["y"]);
        assert_eq!(widget.value(), "y");
    }

    #[test]
    fn test_backing_value_tracks_tags() {
        let mut widget = widget(&[]);
        widget.select("a");
        widget.select("b");
        widget.select("a");
        widget.remove_tag("a");
        widget.remove_tag("missing");
        widget.select("c");

        assert_eq!(widget.value(), widget.tags().data().join(","));
        assert_eq!(widget.value(), "b,c");
    }

    #[test]
    fn test_hover_focuses_suggestion() {
        let mut widget = widget(&["tag1", "tag2"]);
        type_text(&mut widget, "tag");
        draw(&mut widget);

        let area = widget.menu().items()[1].area().unwrap();
        widget.handle_mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: area.x,
            row: area.y,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(widget.menu().focused_item_text(), Some("tag2"));

        let event = widget.handle_key(key(KeyCode::Enter));
        assert_eq!(event, Some(WidgetEvent::TagAdded("tag2".to_string())));
    }

    #[test]
    fn test_options_applied_to_menu() {
        let options = WidgetOptions {
            max_items: 1,
            match_mode: MatchMode::Literal,
            hover_focus: false,
        };
        let mut widget = AutoComplete::new(
            Input::new("tags", InputKind::Text),
            CandidateSet::new(["a.1", "a.2", "ab"]),
            options,
        );
        type_text(&mut widget, "a.");
        assert_eq!(widget.menu().item_texts(), vec!["a.1"]);
    }

    #[test]
    fn test_required_height_grows_with_tags() {
        let mut widget = widget(&[]);
        assert_eq!(widget.required_height(22), 3);
        widget.select("abcdefgh");
        widget.select("ijklmnop");
        assert_eq!(widget.required_height(22), 5);
    }

    #[test]
    fn test_bind_error_messages() {
        assert_eq!(
            BindError::InvalidInput.to_string(),
            "Data should be an array of string"
        );
        assert!(BindError::InvalidTarget("age".to_string())
            .to_string()
            .contains("'age'"));
    }
}
