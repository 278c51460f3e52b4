//! Tag list component.
//!
//! An ordered, duplicate-free collection of tags, each rendered as a chip
//! with a close control. Chips are laid out left to right, wrapping onto
//! new rows, and are always placed before the text input region.

use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::debug;

use crate::ui::theme::theme;

/// Gap between two chips, in columns.
const CHIP_GAP: u16 = 1;

/// Minimum width kept for the text input after the last chip.
///
/// If less room is left on the row, the input wraps to the next row.
pub const MIN_INPUT_WIDTH: u16 = 12;

/// Separator used when serializing the tag list.
pub const SEPARATOR: char = ',';

/// Event raised by the tag list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    /// A tag was removed through its close control (tag text).
    Removed(String),
}

/// Screen areas of a rendered chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipArea {
    /// The whole chip.
    pub chip: Rect,
    /// The close control inside the chip.
    pub close: Rect,
}

/// A single tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    /// The tag text.
    text: String,
    /// Where the chip was last laid out, if it fit on screen.
    chip: Option<ChipArea>,
}

impl Tag {
    /// Get the tag text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the last laid out chip area.
    pub fn chip(&self) -> Option<ChipArea> {
        self.chip
    }
}

/// Result of laying out chips and the input region inside an area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipLayout {
    /// One entry per tag; `None` when the chip fell below the area.
    pub chips: Vec<Option<ChipArea>>,
    /// The single-row region left for the text input.
    pub input: Rect,
    /// Number of rows used, including the input row.
    pub rows: u16,
}

/// Width of the chip for `text`: `" text × "`.
fn chip_width(text: &str) -> u16 {
    u16::try_from(text.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(4)
}

/// Lay out chips for `texts` in `area`, followed by the input region.
pub fn layout_chips(texts: &[&str], area: Rect) -> ChipLayout {
    let right = area.right();
    let bottom = area.bottom();
    let mut x = area.x;
    let mut y = area.y;
    let mut chips = Vec::with_capacity(texts.len());

    for text in texts {
        let width = chip_width(text).min(area.width);
        if x > area.x && x.saturating_add(width) > right {
            x = area.x;
            y = y.saturating_add(1);
        }
        if y >= bottom || width == 0 {
            chips.push(None);
            continue;
        }
        let chip = Rect::new(x, y, width, 1);
        let close = Rect::new(x + width.saturating_sub(2), y, 1, 1);
        chips.push(Some(ChipArea { chip, close }));
        x = x.saturating_add(width).saturating_add(CHIP_GAP);
    }

    if x > area.x && x.saturating_add(MIN_INPUT_WIDTH) > right {
        x = area.x;
        y = y.saturating_add(1);
    }
    let y = y.min(bottom.saturating_sub(1).max(area.y));
    let x = x.min(right);
    let input = Rect::new(x, y, right - x, area.height.min(1));
    let rows = y - area.y + 1;

    ChipLayout { chips, input, rows }
}

/// Ordered, duplicate-free tag collection.
#[derive(Debug, Clone, Default)]
pub struct TagList {
    tags: Vec<Tag>,
}

impl TagList {
    /// Create an empty tag list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag.
    ///
    /// Returns false (and does nothing) if a tag with the same text exists.
    pub fn add(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.contains(&text) {
            debug!(tag = %text, "Ignoring duplicate tag");
            return false;
        }
        debug!(tag = %text, "Adding tag");
        self.tags.push(Tag { text, chip: None });
        true
    }

    /// Remove a tag.
    ///
    /// Returns false (and does nothing) if no tag has this text.
    pub fn remove(&mut self, text: &str) -> bool {
        match self.tags.iter().position(|tag| tag.text == text) {
            Some(index) => {
                debug!(tag = %text, "Removing tag");
                self.tags.remove(index);
                true
            }
            None => false,
        }
    }

    /// Check whether a tag with this text exists.
    pub fn contains(&self, text: &str) -> bool {
        self.tags.iter().any(|tag| tag.text == text)
    }

    /// Get the tag texts in order.
    pub fn data(&self) -> Vec<String> {
        self.tags.iter().map(|tag| tag.text.clone()).collect()
    }

    /// Serialize the tag texts for the backing input.
    pub fn serialize(&self) -> String {
        self.data().join(&SEPARATOR.to_string())
    }

    /// Get the tags.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Get the number of tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Check if there are no tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Lay out the chips in `area`, remember their positions and return
    /// the region left for the text input.
    pub fn layout(&mut self, area: Rect) -> Rect {
        let texts: Vec<&str> = self.tags.iter().map(|tag| tag.text.as_str()).collect();
        let layout = layout_chips(&texts, area);
        for (tag, chip) in self.tags.iter_mut().zip(layout.chips) {
            tag.chip = chip;
        }
        layout.input
    }

    /// Number of rows needed to show every chip plus the input in `width`.
    pub fn rows_needed(&self, width: u16) -> u16 {
        let texts: Vec<&str> = self.tags.iter().map(|tag| tag.text.as_str()).collect();
        layout_chips(&texts, Rect::new(0, 0, width, 512)).rows
    }

    /// Handle a left click at the given screen position.
    ///
    /// A click on a chip's close control removes that tag.
    pub fn handle_click(&mut self, column: u16, row: u16) -> Option<TagEvent> {
        let position = Position::new(column, row);
        let text = self
            .tags
            .iter()
            .find(|tag| tag.chip.is_some_and(|area| area.close.contains(position)))
            .map(|tag| tag.text.clone())?;
        self.remove(&text);
        Some(TagEvent::Removed(text))
    }

    /// Render the chips at their laid out positions.
    pub fn render(&self, frame: &mut Frame) {
        let t = theme();
        let chip_style = Style::default().fg(t.chip_fg).bg(t.chip_bg);
        let close_style = chip_style.fg(t.chip_close).add_modifier(Modifier::BOLD);

        for tag in &self.tags {
            let Some(area) = tag.chip else {
                continue;
            };
            let line = Line::from(vec![
                Span::styled(format!(" {} ", tag.text), chip_style),
                Span::styled("×", close_style),
                Span::styled(" ", chip_style),
            ]);
            frame.render_widget(Paragraph::new(line), area.chip);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_add_tags_in_order() {
        let mut tags = TagList::new();
        assert!(tags.add("a"));
        assert!(tags.add("b"));
        assert_eq!(tags.data(), vec!["a", "b"]);
    }

    #[test]
    fn test_add_duplicate_is_noop() {
        let mut tags = TagList::new();
        assert!(tags.add("a"));
        assert!(!tags.add("a"));
        assert_eq!(tags.data(), vec!["a"]);
    }

    #[test]
    fn test_duplicates_are_case_sensitive() {
        let mut tags = TagList::new();
        tags.add("Rust");
        assert!(tags.add("rust"));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut tags = TagList::new();
        tags.add("a");
        tags.add("b");
        tags.add("c");
        assert!(tags.remove("b"));
        assert_eq!(tags.data(), vec!["a", "c"]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut tags = TagList::new();
        tags.add("a");
        assert!(!tags.remove("z"));
        assert_eq!(tags.data(), vec!["a"]);
    }

    #[test]
    fn test_serialize() {
        let mut tags = TagList::new();
        assert_eq!(tags.serialize(), "");
        tags.add("x");
        tags.add("y");
        assert_eq!(tags.serialize(), "x,y");
    }

    #[test]
    fn test_layout_places_input_after_chips() {
        // " ab × " is 6 wide, then a gap.
        let layout = layout_chips(&["ab", "c"], Rect::new(0, 0, 40, 3));
        let first = layout.chips[0].unwrap();
        let second = layout.chips[1].unwrap();

        assert_eq!(first.chip, Rect::new(0, 0, 6, 1));
        assert_eq!(first.close, Rect::new(4, 0, 1, 1));
        assert_eq!(second.chip, Rect::new(7, 0, 5, 1));
        assert_eq!(layout.input, Rect::new(13, 0, 27, 1));
        assert_eq!(layout.rows, 1);
    }

    #[test]
    fn test_layout_wraps_chips_and_input() {
        let layout = layout_chips(&["abcdefgh", "ijklmnop"], Rect::new(0, 0, 20, 4));
        assert_eq!(layout.chips[0].unwrap().chip.y, 0);
        assert_eq!(layout.chips[1].unwrap().chip, Rect::new(0, 1, 12, 1));
        // 13 columns used on row 1, not enough room for the input.
        assert_eq!(layout.input, Rect::new(0, 2, 20, 1));
        assert_eq!(layout.rows, 3);
    }

    #[test]
    fn test_layout_hides_chips_below_area() {
        let layout = layout_chips(&["abcdefgh", "ijklmnop"], Rect::new(0, 0, 14, 1));
        assert!(layout.chips[0].is_some());
        assert!(layout.chips[1].is_none());
        assert_eq!(layout.input.y, 0);
    }

    #[test]
    fn test_rows_needed() {
        let mut tags = TagList::new();
        assert_eq!(tags.rows_needed(20), 1);
        tags.add("abcdefgh");
        tags.add("ijklmnop");
        assert_eq!(tags.rows_needed(20), 3);
    }

    #[test]
    fn test_click_on_close_control_removes_tag() {
        let mut tags = TagList::new();
        tags.add("x");
        tags.add("y");
        tags.layout(Rect::new(0, 0, 40, 2));

        let close = tags.tags()[0].chip().unwrap().close;
        let event = tags.handle_click(close.x, close.y);

        assert_eq!(event, Some(TagEvent::Removed("x".to_string())));
        assert_eq!(tags.data(), vec!["y"]);
    }

    #[test]
    fn test_click_on_chip_label_does_nothing() {
        let mut tags = TagList::new();
        tags.add("x");
        tags.layout(Rect::new(0, 0, 40, 2));

        let chip = tags.tags()[0].chip().unwrap().chip;
        assert_eq!(tags.handle_click(chip.x, chip.y), None);
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_render_draws_chip_text() {
        let mut tags = TagList::new();
        tags.add("test");
        tags.layout(Rect::new(0, 0, 20, 1));

        let mut terminal = Terminal::new(TestBackend::new(20, 1)).unwrap();
        terminal.draw(|frame| tags.render(frame)).unwrap();

        let buffer = terminal.backend().buffer();
        let row: String = (0..8).map(|x| buffer[(x, 0)].symbol().to_string()).collect();
        assert_eq!(row, " test × ");
    }
}
