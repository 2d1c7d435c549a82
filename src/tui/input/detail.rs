use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, ConfirmAction};
use crate::tui::form::FormState;

pub(super) fn handle_detail(app: &mut App, key: KeyEvent) {
    let subtask_count = app.detail_task().map_or(0, |t| t.subtasks().len());
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_detail(),
        KeyCode::Char('j') | KeyCode::Down => {
            if let Some(ds) = &mut app.detail_state
                && ds.cursor + 1 < subtask_count
            {
                ds.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if let Some(ds) = &mut app.detail_state {
                ds.cursor = ds.cursor.saturating_sub(1);
            }
        }
        KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Char('x') => app.toggle_detail_subtask(),
        KeyCode::Char('m') => app.move_detail_task(),
        KeyCode::Char('e') => {
            let Some(ds) = &app.detail_state else {
                return;
            };
            let handle = ds.task.clone();
            if let Some(task) = app.detail_task() {
                let form = FormState::edit_task(handle, task);
                app.open_form(form);
            }
        }
        KeyCode::Char('d') => {
            if let Some(ds) = &app.detail_state {
                let task = ds.task.clone();
                app.request_confirm(ConfirmAction::DeleteTask { task });
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::Mode;
    use crate::tui::input::test_keys::*;
    use crate::tui::render::test_helpers::test_app;

    fn app_with_detail() -> App {
        let mut app = test_app();
        let handle = app.focused_handle().unwrap();
        app.open_detail(handle);
        app
    }

    #[test]
    fn cursor_stays_within_subtasks() {
        let mut app = app_with_detail();
        let count = app.detail_task().unwrap().subtasks().len();
        for _ in 0..10 {
            handle_detail(&mut app, ch('j'));
        }
        assert_eq!(app.detail_state.as_ref().unwrap().cursor, count - 1);
        for _ in 0..10 {
            handle_detail(&mut app, ch('k'));
        }
        assert_eq!(app.detail_state.as_ref().unwrap().cursor, 0);
    }

    #[test]
    fn space_toggles_selected_subtask() {
        let mut app = app_with_detail();
        handle_detail(&mut app, ch('j'));
        let before = app.detail_task().unwrap().subtasks()[1].is_completed;
        handle_detail(&mut app, ch(' '));
        assert_ne!(app.detail_task().unwrap().subtasks()[1].is_completed, before);
    }

    #[test]
    fn edit_returns_to_detail_on_cancel() {
        let mut app = app_with_detail();
        handle_detail(&mut app, ch('e'));
        assert_eq!(app.mode, Mode::Form);
        app.close_form();
        assert_eq!(app.mode, Mode::Detail);
    }

    #[test]
    fn delete_asks_first() {
        let mut app = app_with_detail();
        handle_detail(&mut app, ch('d'));
        assert_eq!(app.mode, Mode::Confirm);
        app.cancel_confirm();
        assert_eq!(app.mode, Mode::Detail);
    }

    #[test]
    fn esc_closes() {
        let mut app = app_with_detail();
        handle_detail(&mut app, key(KeyCode::Esc));
        assert_eq!(app.mode, Mode::Navigate);
        assert!(app.detail_state.is_none());
    }
}
