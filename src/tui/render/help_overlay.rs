use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::App;

use super::helpers::centered_rect_fixed;

const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Board",
        &[
            ("h j k l", "Move focus"),
            ("H / L", "Move card to previous / next column"),
            ("Enter", "Open task details"),
            ("n", "New task in focused column"),
            ("e", "Edit task"),
            ("x", "Delete task"),
            ("c", "Add column"),
            ("mouse", "Drag a card onto another column"),
        ],
    ),
    (
        "Boards",
        &[
            ("Tab / 1-9", "Switch board"),
            ("B", "New board"),
            ("E", "Edit board"),
            ("D", "Delete board"),
        ],
    ),
    (
        "General",
        &[
            ("t", "Toggle light / dark theme"),
            ("O", "Sign out"),
            ("Esc", "Cancel drag / dismiss toast"),
            ("q", "Quit"),
        ],
    ),
];

/// Render the help overlay (toggled with ?)
pub fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.surface;
    let key_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(app.theme.text).bg(bg);
    let header_style = Style::default()
        .fg(app.theme.dim)
        .bg(bg)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(" Key Bindings", header_style)),
        Line::from(""),
    ];
    for (section, bindings) in BINDINGS {
        lines.push(Line::from(Span::styled(format!(" {}", section), header_style)));
        for (key, desc) in *bindings {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<12}", key), key_style),
                Span::styled(*desc, desc_style),
            ]));
        }
        lines.push(Line::from(""));
    }

    let popup_h = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(56, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.highlight).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(
        Paragraph::new(lines).block(block).style(Style::default().bg(bg)),
        overlay_area,
    );
}
