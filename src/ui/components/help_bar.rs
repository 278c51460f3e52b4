//! Contextual help bar component.
//!
//! Displays context-sensitive keyboard shortcut hints at the bottom of the screen.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::theme;

/// What the user is currently interacting with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpContext {
    /// Typing into a tag widget with the suggestion menu closed.
    TagField,
    /// The suggestion menu is open.
    Suggestions,
    /// Any other form element.
    Field,
}

/// Get the hint line for a context.
pub fn context_hints(context: HelpContext) -> &'static str {
    match context {
        HelpContext::TagField => "[type] suggest  [click ×] remove tag  [Tab] next  [Ctrl+S] submit  [Esc] quit",
        HelpContext::Suggestions => "[↑/↓] focus  [Enter] add tag  [click] add tag  [Esc] close menu",
        HelpContext::Field => "[Tab/Shift+Tab] move  [Space] toggle  [Ctrl+S] submit  [Esc] quit",
    }
}

/// Render a contextual help bar with hints for the given context.
///
/// This renders a single line of text showing the most commonly used
/// keyboard shortcuts for the current element.
pub fn render_context_help(frame: &mut Frame, area: Rect, context: HelpContext) {
    let hints = context_hints(context);

    let spans = parse_hints_to_spans(hints);
    let line = Line::from(spans);
    let paragraph = Paragraph::new(line);

    frame.render_widget(paragraph, area);
}

/// Split hint text into styled spans.
///
/// Each `[key]` becomes an accented span; the text between keys is dimmed.
fn parse_hints_to_spans(hints: &str) -> Vec<Span<'static>> {
    let t = theme();
    let key_style = Style::default().fg(t.accent);
    let text_style = Style::default().fg(t.placeholder);
    let mut spans = Vec::new();
    let mut rest = hints;

    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']').map(|i| open + i) else {
            break;
        };
        if open > 0 {
            spans.push(Span::styled(rest[..open].to_string(), text_style));
        }
        spans.push(Span::styled(rest[open..=close].to_string(), key_style));
        rest = &rest[close + 1..];
    }
    if !rest.is_empty() {
        spans.push(Span::styled(rest.to_string(), text_style));
    }

    spans
}
