use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::ops::board_ops::subtask_summary;
use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::centered_rect_fixed;

/// Render the task details popup: description, subtask checklist, status
pub fn render_detail_popup(frame: &mut Frame, app: &App, area: Rect) {
    let (Some(ds), Some(task)) = (&app.detail_state, app.detail_task()) else {
        return;
    };

    let surface = app.theme.surface;
    let text_style = Style::default().fg(app.theme.text).bg(surface);
    let dim_style = Style::default().fg(app.theme.dim).bg(surface);
    let header_style = text_style.add_modifier(Modifier::BOLD);

    let popup_w: u16 = 60.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(4) as usize;

    let mut lines: Vec<Line> = Vec::new();
    for line in unicode::wrap_to_width(&task.title, inner_w) {
        lines.push(Line::from(Span::styled(format!(" {}", line), header_style)));
    }
    lines.push(Line::from(""));

    match task.description.as_deref().filter(|d| !d.trim().is_empty()) {
        Some(description) => {
            for line in unicode::wrap_to_width(description, inner_w) {
                lines.push(Line::from(Span::styled(format!(" {}", line), dim_style)));
            }
        }
        None => lines.push(Line::from(Span::styled(
            " No description",
            dim_style.add_modifier(Modifier::ITALIC),
        ))),
    }
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        format!(" Subtasks ({})", subtask_summary(task)),
        dim_style.add_modifier(Modifier::BOLD),
    )));
    for (i, sub) in task.subtasks().iter().enumerate() {
        let selected = i == ds.cursor;
        let check = if sub.is_completed { "[x]" } else { "[ ]" };
        let mut style = if sub.is_completed {
            dim_style.add_modifier(Modifier::CROSSED_OUT)
        } else {
            text_style
        };
        if selected {
            style = style.bg(app.theme.background).add_modifier(Modifier::BOLD);
        }
        let marker = if selected { "\u{25B8}" } else { " " };
        let title = unicode::truncate_to_width(&sub.title, inner_w.saturating_sub(6));
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(app.theme.highlight).bg(surface)),
            Span::styled(
                format!("{} ", check),
                Style::default().fg(app.theme.highlight).bg(surface),
            ),
            Span::styled(title, style),
        ]));
    }
    lines.push(Line::from(""));

    lines.push(Line::from(vec![
        Span::styled(" Status: ", dim_style),
        Span::styled(ds.task.column.clone(), header_style),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(" Space", dim_style.add_modifier(Modifier::BOLD)),
        Span::styled(" toggle  ", text_style),
        Span::styled("m", dim_style.add_modifier(Modifier::BOLD)),
        Span::styled(" next column  ", text_style),
        Span::styled("e", dim_style.add_modifier(Modifier::BOLD)),
        Span::styled(" edit  ", text_style),
        Span::styled("d", dim_style.add_modifier(Modifier::BOLD)),
        Span::styled(" delete  ", text_style),
        Span::styled("Esc", dim_style.add_modifier(Modifier::BOLD)),
        Span::styled(" close", text_style),
    ]));

    let popup_h = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2));
    let popup = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.highlight).bg(surface))
        .style(Style::default().bg(surface));
    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(surface)),
        popup,
    );
}

#[cfg(test)]
mod tests {
    use crate::tui::render::test_helpers::{render_app, test_app};

    #[test]
    fn shows_subtasks_and_status() {
        let mut app = test_app();
        let handle = app.focused_handle().unwrap();
        app.open_detail(handle);
        let out = render_app(&mut app, 90, 30);
        assert!(out.contains("Subtasks (1 of 3 subtasks)"));
        assert!(out.contains("[x] Sign up page"));
        assert!(out.contains("[ ] Sign in page"));
        assert!(out.contains("Status: Todo"));
    }

    #[test]
    fn toggling_updates_the_count() {
        let mut app = test_app();
        let handle = app.focused_handle().unwrap();
        app.open_detail(handle);
        app.detail_state.as_mut().unwrap().cursor = 1;
        app.toggle_detail_subtask();
        let out = render_app(&mut app, 90, 30);
        assert!(out.contains("2 of 3 subtasks"));
    }
}
