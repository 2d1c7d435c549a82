use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::ThemeName;
use crate::tui::app::App;
use crate::util::unicode;

use super::helpers::spans_width;

/// Render the header: board tabs on the left, theme and avatar on the
/// right, with a separator line below
pub fn render_header(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    render_tabs(frame, app, chunks[0]);

    let separator = Paragraph::new("\u{2500}".repeat(area.width as usize))
        .style(Style::default().fg(app.theme.border).bg(app.theme.background));
    frame.render_widget(separator, chunks[1]);
}

fn render_tabs(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let mut spans: Vec<Span> = vec![
        Span::styled(" ", bg_style),
        Span::styled(
            "\u{25A6} kanban",
            Style::default()
                .fg(app.theme.text)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  ", bg_style),
    ];

    // Right side: theme + avatar, reserved first so tabs clip before it
    let theme_label = match app.theme.name {
        ThemeName::Light => "\u{2600} light",
        ThemeName::Dark => "\u{263E} dark",
    };
    let initial = app.user().map_or('A', |u| u.initial());
    let right = vec![
        Span::styled(theme_label, Style::default().fg(app.theme.dim).bg(bg)),
        Span::styled("  ", bg_style),
        Span::styled(
            format!(" {} ", initial),
            Style::default()
                .fg(app.theme.highlight_text)
                .bg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ", bg_style),
    ];
    let right_width = spans_width(&right);
    let tabs_end = (area.width as usize).saturating_sub(right_width + 1);

    let names: Vec<String> = app.store.boards().iter().map(|b| b.name.clone()).collect();
    for (i, name) in names.iter().enumerate() {
        let x = spans_width(&spans);
        if x >= tabs_end {
            break;
        }
        let label = unicode::truncate_to_width(&format!(" {} ", name), tabs_end - x);
        let w = unicode::display_width(&label) as u16;
        let style = if i == app.board_index {
            Style::default()
                .fg(app.theme.highlight_text)
                .bg(app.theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.dim).bg(bg)
        };
        app.hits
            .record_tab(Rect::new(area.x + x as u16, area.y, w, 1), i);
        spans.push(Span::styled(label, style));
        spans.push(Span::styled(" ", bg_style));
    }

    let used = spans_width(&spans);
    let pad = (area.width as usize).saturating_sub(used + right_width);
    spans.push(Span::styled(" ".repeat(pad), bg_style));
    spans.extend(right);

    frame.render_widget(Paragraph::new(Line::from(spans)).style(bg_style), area);
}
