use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::ops::ui_state::ToastKind;
use crate::tui::app::App;
use crate::util::unicode;

const TOAST_WIDTH: u16 = 36;

/// Stack toasts in the top-right corner of `area`, oldest first
pub fn render_toasts(frame: &mut Frame, app: &App, area: Rect) {
    let width = TOAST_WIDTH.min(area.width);
    if width < 6 {
        return;
    }
    let x = area.right() - width;
    let mut y = area.y;

    for toast in &app.ui.toasts {
        if y + 3 > area.bottom() {
            break;
        }
        let (icon, color) = match toast.kind {
            ToastKind::Success => ("\u{2713}", app.theme.green),
            ToastKind::Error => ("\u{2717}", app.theme.red),
            ToastKind::Info => ("i", app.theme.highlight),
        };
        let text = unicode::truncate_to_width(
            &format!(" {} {}", icon, toast.message),
            width.saturating_sub(2) as usize,
        );
        let rect = Rect::new(x, y, width, 3);
        frame.render_widget(Clear, rect);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color).bg(app.theme.surface))
            .style(Style::default().bg(app.theme.surface));
        frame.render_widget(
            Paragraph::new(Span::styled(
                text,
                Style::default().fg(app.theme.text).bg(app.theme.surface),
            ))
            .block(block),
            rect,
        );
        y += 3;
    }
}
