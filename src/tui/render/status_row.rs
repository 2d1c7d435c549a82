use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode;

use super::helpers::spans_width;

/// Render the status row (bottom of screen): key hints on the left, board
/// totals on the right
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let dim = Style::default().fg(app.theme.dim).bg(bg);

    let hints = if app.ui.is_loading(None) {
        "Loading\u{2026}"
    } else if !app.config.ui.show_key_hints {
        ""
    } else if app.drag.is_dragging() {
        "Drop on a column to move  Esc cancel"
    } else {
        match app.mode {
            Mode::Navigate => {
                "hjkl focus  H/L move  n new task  Enter open  c column  B/E/D board  t theme  ? help  q quit"
            }
            Mode::Detail => "j/k select  Space toggle  m next column  e edit  d delete  Esc close",
            Mode::Form => "Tab next field  Enter save  Esc cancel",
            Mode::Confirm => "y delete  n cancel",
            Mode::Login => "Enter sign in  q quit",
        }
    };

    let right = match app.board() {
        Some(board) => format!(
            "{} columns \u{00B7} {} tasks ",
            board.columns.len(),
            board.task_count()
        ),
        None => String::new(),
    };
    let right_width = unicode::display_width(&right);

    let mut spans = vec![Span::styled(
        unicode::truncate_to_width(&format!(" {}", hints), width.saturating_sub(right_width + 1)),
        dim,
    )];
    let pad = width.saturating_sub(spans_width(&spans) + right_width);
    spans.push(Span::styled(" ".repeat(pad), Style::default().bg(bg)));
    spans.push(Span::styled(right, dim));

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use crate::tui::render::test_helpers::{render_app, test_app};

    #[test]
    fn shows_totals_for_current_board() {
        let mut app = test_app();
        let out = render_app(&mut app, 120, 20);
        let last = out.lines().last().unwrap();
        assert!(last.contains("3 columns \u{00B7} 10 tasks"), "{}", last);
        assert!(last.contains("H/L move"));
    }

    #[test]
    fn hints_can_be_hidden() {
        let mut app = test_app();
        app.config.ui.show_key_hints = false;
        let out = render_app(&mut app, 120, 20);
        let last = out.lines().last().unwrap();
        assert!(!last.contains("quit"));
        assert!(last.contains("tasks"));
    }
}
