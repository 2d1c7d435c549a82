use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

pub(super) fn handle_login(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.login(),
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        _ => {}
    }
}
