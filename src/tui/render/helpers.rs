use ratatui::layout::Rect;
use ratatui::text::Span;

use crate::util::unicode;

/// Compute total display width of a slice of spans
pub(super) fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}

/// A `width` x `height` rect centered in `area`, shrunk to fit
pub(super) fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// Split `text` around a cursor so the cursor stays visible in `width`
/// cells. Returns the visible text before and after the cursor.
pub(super) fn cursor_window(text: &str, cursor: usize, width: usize) -> (String, String) {
    let cursor = cursor.min(text.len());
    let (before, after) = text.split_at(cursor);
    // one cell for the cursor itself
    let budget = width.saturating_sub(1);
    let mut start = 0;
    while unicode::display_width(&before[start..]) > budget {
        match unicode::next_grapheme_boundary(before, start) {
            Some(next) => start = next,
            None => break,
        }
    }
    let used = unicode::display_width(&before[start..]) + 1;
    let tail = unicode::truncate_to_width(after, width.saturating_sub(used));
    (before[start..].to_string(), tail)
}
