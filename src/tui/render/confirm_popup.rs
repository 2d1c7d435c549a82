use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::tui::app::{App, ConfirmAction};
use crate::util::unicode;

use super::helpers::centered_rect_fixed;

/// Render the delete confirmation popup
pub fn render_confirm_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(action) = &app.confirm_state else {
        return;
    };

    let (title, body) = match action {
        ConfirmAction::DeleteBoard { board_index } => {
            let name = app
                .store
                .board(*board_index)
                .map(|b| b.name.as_str())
                .unwrap_or("");
            (
                "Delete this board?",
                format!(
                    "Are you sure you want to delete the '{}' board? This action will remove all columns and tasks and cannot be reversed.",
                    name
                ),
            )
        }
        ConfirmAction::DeleteTask { task } => (
            "Delete this task?",
            format!(
                "Are you sure you want to delete the '{}' task and its subtasks? This action cannot be reversed.",
                task.task_title
            ),
        ),
    };

    let surface = app.theme.surface;
    let red = app.theme.red;
    let text_style = Style::default().fg(app.theme.dim).bg(surface);
    let key_style = Style::default()
        .fg(app.theme.text)
        .bg(surface)
        .add_modifier(Modifier::BOLD);

    let popup_w: u16 = 50.min(area.width.saturating_sub(2));

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            format!(" {}", title),
            Style::default().fg(red).bg(surface).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for line in unicode::wrap_to_width(&body, popup_w.saturating_sub(4) as usize) {
        lines.push(Line::from(Span::styled(format!(" {}", line), text_style)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" y", Style::default().fg(red).bg(surface).add_modifier(Modifier::BOLD)),
        Span::styled(" delete  ", text_style),
        Span::styled("n", key_style),
        Span::styled(" cancel", text_style),
    ]));

    let popup_h = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2));
    let popup = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(red).bg(surface))
        .style(Style::default().bg(surface));
    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(surface)),
        popup,
    );
}
