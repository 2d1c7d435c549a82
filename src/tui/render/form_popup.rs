use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::{centered_rect_fixed, cursor_window};

/// Render the add/edit form popup
pub fn render_form_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(form) = &app.form_state else {
        return;
    };

    let surface = app.theme.surface;
    let text_style = Style::default().fg(app.theme.text).bg(surface);
    let dim_style = Style::default().fg(app.theme.dim).bg(surface);
    let label_style = dim_style.add_modifier(Modifier::BOLD);
    let cursor_style = Style::default().fg(app.theme.highlight).bg(surface);

    let popup_w: u16 = 56.min(area.width.saturating_sub(2));
    let field_w = popup_w.saturating_sub(6) as usize;

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            format!(" {}", form.kind.title()),
            text_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    for (i, field) in form.fields.iter().enumerate() {
        let focused = i == form.focused;
        lines.push(Line::from(Span::styled(format!(" {}", field.label), label_style)));
        let marker = Span::styled(
            if focused { " \u{276F} " } else { "   " },
            cursor_style,
        );
        let value = if focused {
            let (before, after) = cursor_window(&field.input.text, field.input.cursor, field_w);
            vec![
                marker,
                Span::styled(before, text_style),
                Span::styled("\u{258C}", cursor_style),
                Span::styled(after, text_style),
            ]
        } else if field.input.text.is_empty() {
            vec![
                marker,
                Span::styled(
                    unicode::truncate_to_width(field.hint, field_w),
                    dim_style.add_modifier(Modifier::ITALIC),
                ),
            ]
        } else {
            vec![
                marker,
                Span::styled(
                    unicode::truncate_to_width(&field.input.text, field_w),
                    text_style,
                ),
            ]
        };
        lines.push(Line::from(value));
        lines.push(Line::from(""));
    }

    if let Some(error) = &form.error {
        for line in unicode::wrap_to_width(error, field_w + 2) {
            lines.push(Line::from(Span::styled(
                format!(" {}", line),
                Style::default().fg(app.theme.red).bg(surface),
            )));
        }
        lines.push(Line::from(""));
    }

    lines.push(Line::from(vec![
        Span::styled(" Enter", label_style),
        Span::styled(format!(" {}  ", form.kind.submit_label()), text_style),
        Span::styled("Tab", label_style),
        Span::styled(" next field  ", text_style),
        Span::styled("Esc", label_style),
        Span::styled(" cancel", text_style),
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
