mod common;
mod confirm;
mod detail;
mod form;
mod login;
mod mouse;
mod navigate;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};

use super::app::{App, Mode};

/// Handle a key event in the current mode
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Help overlay closes on any key
    if app.show_help {
        app.show_help = false;
        return;
    }

    let key = common::normalize_key(key);
    match app.mode {
        Mode::Login => login::handle_login(app, key),
        Mode::Navigate => navigate::handle_navigate(app, key),
        Mode::Detail => detail::handle_detail(app, key),
        Mode::Form => form::handle_form(app, key),
        Mode::Confirm => confirm::handle_confirm(app, key),
    }
}

/// Pointer events drive drag-and-drop; only the board view takes them
pub fn handle_mouse(app: &mut App, event: MouseEvent) {
    if app.mode == Mode::Navigate {
        mouse::handle_mouse(app, event);
    }
}

/// Bracketed paste goes into the focused form field
pub fn handle_paste(app: &mut App, text: &str) {
    if app.mode != Mode::Form || text.is_empty() {
        return;
    }
    if let Some(input) = app.form_state.as_mut().and_then(|f| f.focused_input()) {
        input.insert_str(text);
    }
}


#[cfg(test)]
mod tests {
    use super::test_keys::*;
    use super::*;
    use crate::tui::render::test_helpers::test_app;

    #[test]
    fn ctrl_c_quits_from_any_mode() {
        let mut app = test_app();
        app.mode = Mode::Form;
        handle_key(&mut app, ctrl('c'));
        assert!(app.should_quit);
    }

    #[test]
    fn paste_only_in_forms() {
        let mut app = test_app();
        handle_paste(&mut app, "ignored");
        assert!(app.form_state.is_none());

        handle_key(&mut app, ch('c'));
        handle_paste(&mut app, "Review\n");
        assert_eq!(app.form_state.as_ref().unwrap().value(0), "Review ");
    }
}
