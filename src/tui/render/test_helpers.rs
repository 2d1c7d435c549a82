use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

use crate::io::persistence::Persistence;
use crate::io::storage::MemoryStore;
use crate::model::config::Config;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    buffer_to_string(&draw(w, h, f))
}

fn draw<F>(w: u16, h: u16, f: F) -> Buffer
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();
    terminal.backend().buffer().clone()
}

fn buffer_to_string(buf: &Buffer) -> String {
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// A signed-in app over in-memory storage holding the default boards
pub fn test_app() -> App {
    let mut app = App::new(Persistence::new(MemoryStore::new()), Config::default());
    app.login();
    app
}

/// Full-screen render of `app`, as text
pub fn render_app(app: &mut App, w: u16, h: u16) -> String {
    buffer_to_string(&render_buffer(app, w, h))
}

/// Full-screen render of `app`, with styles
pub fn render_buffer(app: &mut App, w: u16, h: u16) -> Buffer {
    draw(w, h, |frame, _| crate::tui::render::render(frame, app))
}

#[test]
fn render_to_string_trims_blank_rows() {
    let out = render_to_string(TERM_W, TERM_H, |frame, area| {
        frame.render_widget(ratatui::widgets::Paragraph::new("hello"), area);
    });
    assert_eq!(out, "hello");
}
