//! Form view.
//!
//! The form is the host document of the application: an ordered list of
//! inputs and bound tag widgets. It owns keyboard focus, routes key and
//! mouse events to the focused element and produces the submitted values.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders},
    Frame,
};
use serde::Serialize;
use tracing::{debug, trace};

use crate::ui::components::{AutoComplete, HelpContext, Input, InputKind, WidgetEvent};
use crate::ui::theme::theme;

/// An element of the form.
#[derive(Debug, Clone)]
pub enum Element {
    /// A plain input.
    Input(Input),
    /// A tag widget together with the hidden input it replaced.
    AutoComplete(Box<AutoComplete>),
}

impl Element {
    fn is_focusable(&self) -> bool {
        match self {
            Element::Input(input) => input.is_focusable(),
            Element::AutoComplete(_) => true,
        }
    }

    fn blur(&mut self) {
        if let Element::AutoComplete(widget) = self {
            widget.blur();
        }
    }
}

/// Event raised by the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormEvent {
    /// Name of the input whose widget raised the event.
    pub input: String,
    /// What happened.
    pub event: WidgetEvent,
}

/// One submitted name/value pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmittedField {
    /// Input name.
    pub name: String,
    /// Input value.
    pub value: String,
}

/// The form view.
#[derive(Debug, Clone)]
pub struct Form {
    /// Title drawn on the outer border.
    title: String,
    /// Elements in document order.
    elements: Vec<Element>,
    /// Index of the focused element.
    focus: Option<usize>,
    /// Where each element was last drawn.
    areas: Vec<Option<Rect>>,
}

impl Form {
    /// Create an empty form.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            elements: Vec::new(),
            focus: None,
            areas: Vec::new(),
        }
    }

    /// Append an input.
    ///
    /// The first focusable element added takes focus.
    pub fn add_input(&mut self, input: Input) -> &mut Self {
        self.elements.push(Element::Input(input));
        if self.focus.is_none() {
            self.focus = self.first_focusable();
        }
        self
    }

    /// Append an empty text input.
    pub fn add_text(&mut self, name: impl Into<String>) -> &mut Self {
        self.add_input(Input::new(name, InputKind::Text))
    }

    /// Append a hidden input.
    pub fn add_hidden(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.add_input(Input::with_value(name, InputKind::Hidden, value))
    }

    /// Get the elements in document order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Find an input by name, including inputs taken over by widgets.
    pub fn input(&self, name: &str) -> Option<&Input> {
        self.elements.iter().find_map(|element| match element {
            Element::Input(input) if input.name() == name => Some(input),
            Element::AutoComplete(widget) if widget.name() == name => Some(widget.original()),
            _ => None,
        })
    }

    /// Find the widget bound to the input `name`.
    pub fn widget(&self, name: &str) -> Option<&AutoComplete> {
        self.elements.iter().find_map(|element| match element {
            Element::AutoComplete(widget) if widget.name() == name => Some(widget.as_ref()),
            _ => None,
        })
    }

    /// Find the widget bound to the input `name`, mutably.
    pub fn widget_mut(&mut self, name: &str) -> Option<&mut AutoComplete> {
        self.elements.iter_mut().find_map(|element| match element {
            Element::AutoComplete(widget) if widget.name() == name => Some(widget.as_mut()),
            _ => None,
        })
    }

    /// Position of the plain text input called `name`.
    pub fn text_input_position(&self, name: &str) -> Option<usize> {
        self.elements.iter().position(|element| {
            matches!(element, Element::Input(input)
                if input.name() == name && input.kind() == InputKind::Text)
        })
    }

    /// Set the value of the plain input at `index`.
    ///
    /// Returns false if the element at `index` is not a plain input.
    pub fn set_input_value(&mut self, index: usize, value: impl Into<String>) -> bool {
        match self.elements.get_mut(index) {
            Some(Element::Input(input)) => {
                input.set_value(value);
                true
            }
            _ => false,
        }
    }

    /// Replace the input at `index` with a widget built from it.
    ///
    /// Returns false if the element at `index` is not a plain input.
    pub fn enhance(&mut self, index: usize, build: impl FnOnce(Input) -> AutoComplete) -> bool {
        if !matches!(self.elements.get(index), Some(Element::Input(_))) {
            return false;
        }
        let element = match self.elements.remove(index) {
            Element::Input(input) => Element::AutoComplete(Box::new(build(input))),
            other => other,
        };
        self.elements.insert(index, element);
        true
    }

    /// Index of the focused element.
    pub fn focused_index(&self) -> Option<usize> {
        self.focus
    }

    /// Get the focused element.
    pub fn focused(&self) -> Option<&Element> {
        self.focus.and_then(|index| self.elements.get(index))
    }

    /// Focus the element at `index` if it can take focus.
    pub fn focus(&mut self, index: usize) {
        if self.focus == Some(index) {
            return;
        }
        if !self.elements.get(index).is_some_and(Element::is_focusable) {
            return;
        }
        if let Some(previous) = self.focus.and_then(|i| self.elements.get_mut(i)) {
            previous.blur();
        }
        trace!(index, "Focus moved");
        self.focus = Some(index);
    }

    /// Move focus to the next focusable element, wrapping around.
    pub fn focus_next(&mut self) {
        let count = self.elements.len();
        let start = self.focus.unwrap_or(count.saturating_sub(1));
        if let Some(index) = (1..=count)
            .map(|offset| (start + offset) % count)
            .find(|&i| self.elements[i].is_focusable())
        {
            self.focus(index);
        }
    }

    /// Move focus to the previous focusable element, wrapping around.
    pub fn focus_prev(&mut self) {
        let count = self.elements.len();
        let start = self.focus.unwrap_or(0);
        if let Some(index) = (1..=count)
            .map(|offset| (start + count - offset) % count)
            .find(|&i| self.elements[i].is_focusable())
        {
            self.focus(index);
        }
    }

    fn first_focusable(&self) -> Option<usize> {
        self.elements.iter().position(Element::is_focusable)
    }

    /// Check if the focused element has its suggestion menu open.
    pub fn menu_open(&self) -> bool {
        matches!(self.focused(), Some(Element::AutoComplete(widget)) if widget.is_menu_visible())
    }

    /// Help context for the focused element.
    pub fn help_context(&self) -> HelpContext {
        match self.focused() {
            Some(Element::AutoComplete(widget)) if widget.is_menu_visible() => {
                HelpContext::Suggestions
            }
            Some(Element::AutoComplete(_)) => HelpContext::TagField,
            _ => HelpContext::Field,
        }
    }

    /// Handle keyboard input.
    ///
    /// Tab and Shift+Tab move focus; everything else goes to the focused
    /// element.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<FormEvent> {
        match (key.code, key.modifiers) {
            (KeyCode::Tab, KeyModifiers::NONE) => {
                self.focus_next();
                None
            }
            (KeyCode::BackTab, _) | (KeyCode::Tab, KeyModifiers::SHIFT) => {
                self.focus_prev();
                None
            }
            _ => {
                let element = self.focus.and_then(|i| self.elements.get_mut(i))?;
                match element {
                    Element::Input(input) => {
                        input.handle_input(key);
                        None
                    }
                    Element::AutoComplete(widget) => {
                        let event = widget.handle_key(key)?;
                        Some(Self::widget_event(widget, event))
                    }
                }
            }
        }
    }

    /// Handle a mouse event.
    ///
    /// A click focuses the element under the pointer before it is handled.
    /// The open menu of the focused widget takes precedence over elements
    /// it covers.
    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<FormEvent> {
        let target = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let index = self.element_at(mouse.column, mouse.row)?;
                self.focus(index);
                index
            }
            MouseEventKind::Moved => self.focus?,
            _ => return None,
        };

        match self.elements.get_mut(target)? {
            Element::Input(input) => {
                if matches!(mouse.kind, MouseEventKind::Down(_)) {
                    input.handle_click();
                }
                None
            }
            Element::AutoComplete(widget) => {
                let event = widget.handle_mouse(mouse)?;
                Some(Self::widget_event(widget, event))
            }
        }
    }

    fn widget_event(widget: &AutoComplete, event: WidgetEvent) -> FormEvent {
        debug!(input = widget.name(), event = ?event, value = widget.value(), "Widget event");
        FormEvent {
            input: widget.name().to_string(),
            event,
        }
    }

    /// Find the element drawn at the given position.
    fn element_at(&self, column: u16, row: u16) -> Option<usize> {
        if let Some(index) = self.focus {
            if let Some(Element::AutoComplete(widget)) = self.elements.get(index) {
                if widget.menu().contains(column, row) {
                    return Some(index);
                }
            }
        }
        let position = Position::new(column, row);
        self.areas
            .iter()
            .position(|area| area.is_some_and(|area| area.contains(position)))
    }

    /// Collect the submitted values in document order.
    ///
    /// Hidden inputs are included, so bound widgets submit their tags.
    pub fn submit(&self) -> Vec<SubmittedField> {
        self.elements
            .iter()
            .filter_map(|element| {
                let input = match element {
                    Element::Input(input) => input,
                    Element::AutoComplete(widget) => widget.original(),
                };
                input.submission_value().map(|value| SubmittedField {
                    name: input.name().to_string(),
                    value,
                })
            })
            .collect()
    }

    /// Render the form.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let t = theme();
        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(t.accent).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.border));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        self.areas = vec![None; self.elements.len()];
        let mut y = inner.y;
        for (index, element) in self.elements.iter_mut().enumerate() {
            let height = match element {
                Element::Input(input) => input.required_height(),
                Element::AutoComplete(widget) => widget.required_height(inner.width),
            };
            if height == 0 || y >= inner.bottom() {
                continue;
            }
            let element_area = Rect::new(inner.x, y, inner.width, height.min(inner.bottom() - y));
            let focused = self.focus == Some(index);
            match element {
                Element::Input(input) => input.render(frame, element_area, focused),
                Element::AutoComplete(widget) => widget.render(frame, element_area, focused),
            }
            self.areas[index] = Some(element_area);
            y += element_area.height;
        }

        // Menus go last so they cover the elements below their widget.
        for element in &mut self.elements {
            if let Element::AutoComplete(widget) = element {
                widget.render_overlay(frame);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::components::{bind, BindError};
    use ratatui::{backend::TestBackend, Terminal};
    use serde_json::json;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn type_text(form: &mut Form, text: &str) {
        for c in text.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn draw(form: &mut Form) {
        let mut terminal = Terminal::new(TestBackend::new(50, 20)).unwrap();
        terminal
            .draw(|frame| form.render(frame, frame.area()))
            .unwrap();
    }

    fn tag_form() -> Form {
        let mut form = Form::new("Post");
        form.add_text("tags");
        bind(&mut form, "tags", &json!(["apple", "banana", "grape", "apricot"])).unwrap();
        form
    }

    #[test]
    fn test_bind_hides_original_and_keeps_position() {
        let mut form = Form::new("Post");
        form.add_text("title").add_text("tags").add_text("body");
        bind(&mut form, "tags", &json!(["a"])).unwrap();

        assert!(matches!(form.elements()[1], Element::AutoComplete(_)));
        assert_eq!(form.input("tags").unwrap().kind(), InputKind::Hidden);
        assert_eq!(form.elements().len(), 3);
    }

    #[test]
    fn test_bind_rejects_non_array_data() {
        let mut form = Form::new("Post");
        form.add_text("tags");

        let result = bind(&mut form, "tags", &json!("notanarray"));

        assert_eq!(result, Err(BindError::InvalidInput));
        assert!(form.widget("tags").is_none());
        assert_eq!(form.input("tags").unwrap().kind(), InputKind::Text);
    }

    #[test]
    fn test_bind_checks_data_before_target() {
        let mut form = Form::new("Post");
        let result = bind(&mut form, "missing", &json!(42));
        assert_eq!(result, Err(BindError::InvalidInput));
    }

    #[test]
    fn test_bind_rejects_non_text_targets() {
        let mut form = Form::new("Post");
        form.add_hidden("token", "abc");
        form.add_input(Input::new("agree", InputKind::Checkbox));

        for name in ["token", "agree", "missing"] {
            let result = bind(&mut form, name, &json!(["a"]));
            assert_eq!(result, Err(BindError::InvalidTarget(name.to_string())));
        }
        assert!(matches!(form.elements()[0], Element::Input(_)));
    }

    #[test]
    fn test_bind_twice_is_rejected() {
        let mut form = tag_form();
        let result = bind(&mut form, "tags", &json!(["a"]));
        assert_eq!(result, Err(BindError::InvalidTarget("tags".to_string())));
    }

    #[test]
    fn test_type_and_click_suggestion() {
        let mut form = tag_form();
        type_text(&mut form, "a");
        draw(&mut form);

        let area = form
            .widget("tags")
            .unwrap()
            .menu()
            .items()
            .iter()
            .find(|item| item.text() == "apricot")
            .and_then(|item| item.area())
            .unwrap();
        let event = form.handle_mouse(click(area.x, area.y));

        assert_eq!(
            event,
            Some(FormEvent {
                input: "tags".to_string(),
                event: WidgetEvent::TagAdded("apricot".to_string()),
            })
        );
        let widget = form.widget("tags").unwrap();
        assert_eq!(widget.tags().data(), vec!["apricot"]);
        assert_eq!(form.input("tags").unwrap().value(), "apricot");
        assert!(widget.text_field().is_empty());
        assert!(!widget.is_menu_visible());
        assert_eq!(form.focused_index(), Some(0));
    }

    #[test]
    fn test_menu_covers_elements_below() {
        let mut form = tag_form();
        form.add_text("title");
        type_text(&mut form, "a");
        draw(&mut form);

        // The first suggestion sits over the "title" input.
        let item = form.widget("tags").unwrap().menu().items()[0].area().unwrap();
        let title_area = form.areas[1].unwrap();
        assert!(title_area.contains(Position::new(item.x, item.y)));

        form.handle_mouse(click(item.x, item.y));
        assert_eq!(form.focused_index(), Some(0));
        assert_eq!(form.input("tags").unwrap().value(), "apple");
    }

    #[test]
    fn test_remove_tag_by_click() {
        let mut form = tag_form();
        let widget = form.widget_mut("tags").unwrap();
        widget.select("x");
        widget.select("y");
        draw(&mut form);

        let close = form.widget("tags").unwrap().tags().tags()[0]
            .chip()
            .unwrap()
            .close;
        form.handle_mouse(click(close.x, close.y));

        assert_eq!(form.widget("tags").unwrap().tags().data(), vec!["y"]);
        assert_eq!(form.input("tags").unwrap().value(), "y");
    }

    #[test]
    fn test_tab_skips_hidden_inputs_and_blurs_widget() {
        let mut form = tag_form();
        form.add_hidden("token", "abc");
        form.add_text("title");

        type_text(&mut form, "ap");
        assert!(form.menu_open());

        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focused_index(), Some(2));
        assert!(!form.widget("tags").unwrap().is_menu_visible());

        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focused_index(), Some(0));

        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focused_index(), Some(2));
    }

    #[test]
    fn test_help_context_follows_menu() {
        let mut form = tag_form();
        assert_eq!(form.help_context(), HelpContext::TagField);
        type_text(&mut form, "ap");
        assert_eq!(form.help_context(), HelpContext::Suggestions);
    }

    #[test]
    fn test_submit_includes_hidden_and_widget_values() {
        let mut form = Form::new("Post");
        form.add_text("title")
            .add_text("tags")
            .add_hidden("token", "abc")
            .add_input(Input::new("notify", InputKind::Checkbox));
        bind(&mut form, "tags", &json!(["rust", "tui"])).unwrap();

        form.handle_key(key(KeyCode::Char('T')));
        form.widget_mut("tags").unwrap().select("rust");
        form.widget_mut("tags").unwrap().select("tui");

        let submitted = form.submit();
        let pairs: Vec<(&str, &str)> = submitted
            .iter()
            .map(|field| (field.name.as_str(), field.value.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("title", "T"), ("tags", "rust,tui"), ("token", "abc")]
        );
    }

    #[test]
    fn test_initial_value_seeds_tags() {
        let mut form = Form::new("Post");
        form.add_text("tags");
        assert!(form.set_input_value(0, "rust,,tui"));
        bind(&mut form, "tags", &json!(["rust"])).unwrap();

        assert_eq!(form.widget("tags").unwrap().tags().data(), vec!["rust", "tui"]);
        assert_eq!(form.input("tags").unwrap().value(), "rust,tui");
        assert!(!form.set_input_value(0, "x"));
    }

    #[test]
    fn test_enter_selects_focused_suggestion() {
        let mut form = tag_form();
        type_text(&mut form, "gr");
        form.handle_key(key(KeyCode::Down));
        let event = form.handle_key(key(KeyCode::Enter));

        assert_eq!(
            event.map(|e| e.event),
            Some(WidgetEvent::TagAdded("grape".to_string()))
        );
        assert_eq!(form.input("tags").unwrap().value(), "grape");
    }
}
