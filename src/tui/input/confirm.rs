use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::App;

pub(super) fn handle_confirm(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => app.confirm(),
        KeyCode::Char('n') | KeyCode::Esc => app.cancel_confirm(),
        _ => {}
    }
}
