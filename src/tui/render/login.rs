use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::model::session::User;
use crate::tui::app::App;

use super::helpers::centered_rect_fixed;

/// Mock sign-in screen shown until a session exists
pub fn render_login(frame: &mut Frame, app: &App, area: Rect) {
    let surface = app.theme.surface;
    let text_style = Style::default().fg(app.theme.text).bg(surface);
    let dim_style = Style::default().fg(app.theme.dim).bg(surface);
    let demo = User::demo();

    let lines = vec![
        Line::from(Span::styled(
            "\u{25A6} kanban",
            text_style.add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(""),
        Line::from(Span::styled("Sign in to continue", dim_style)).centered(),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} <{}>", demo.name, demo.email),
            text_style,
        ))
        .centered(),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                " Enter ",
                Style::default()
                    .fg(app.theme.highlight_text)
                    .bg(app.theme.highlight)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" sign in   ", text_style),
            Span::styled("q", dim_style.add_modifier(Modifier::BOLD)),
            Span::styled(" quit", text_style),
        ])
        .centered(),
    ];

    let popup = centered_rect_fixed(44, lines.len() as u16 + 4, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.border).bg(surface))
        .style(Style::default().bg(surface));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    let body = Rect {
        y: inner.y + 1,
        height: inner.height.saturating_sub(1),
        ..inner
    };
    frame.render_widget(Paragraph::new(lines).style(Style::default().bg(surface)), body);
}

#[cfg(test)]
mod tests {
    use crate::io::persistence::Persistence;
    use crate::io::storage::MemoryStore;
    use crate::model::config::Config;
    use crate::tui::app::App;
    use crate::tui::render::test_helpers::render_app;

    #[test]
    fn login_screen_hides_boards() {
        let mut app = App::new(Persistence::new(MemoryStore::new()), Config::default());
        let out = render_app(&mut app, 80, 24);
        assert!(out.contains("Sign in to continue"));
        assert!(out.contains("Demo User <demo@example.com>"));
        assert!(!out.contains("Platform Launch"));
    }
}
