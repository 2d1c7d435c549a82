use crossterm::event::{KeyCode, KeyEvent};

use crate::ops::dnd::Direction;
use crate::ops::ui_state::ToastKind;
use crate::tui::app::{App, ConfirmAction};
use crate::tui::form::FormState;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => {
            if app.drag.cancel() == crate::ops::dnd::DragOutcome::Ignored {
                app.dismiss_toast();
            }
        }

        // Focus
        KeyCode::Char('h') | KeyCode::Left => {
            app.focus.column = app.focus.column.saturating_sub(1);
            app.clamp_focus();
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.focus.column += 1;
            app.clamp_focus();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.focus.row = app.focus.row.saturating_sub(1);
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.focus.row += 1;
            app.clamp_focus();
        }
        KeyCode::Char('g') | KeyCode::Home => app.focus.row = 0,
        KeyCode::Char('G') | KeyCode::End => {
            app.focus.row = usize::MAX;
            app.clamp_focus();
        }

        // Boards
        KeyCode::Tab | KeyCode::Char(']') => app.next_board(),
        KeyCode::BackTab | KeyCode::Char('[') => app.prev_board(),
        KeyCode::Char(c @ '1'..='9') => {
            let index = c as usize - '1' as usize;
            app.select_board(index);
        }
        KeyCode::Char('B') => app.open_form(FormState::add_board()),
        KeyCode::Char('E') => {
            if let Some(board) = app.board() {
                let form = FormState::edit_board(app.board_index, board);
                app.open_form(form);
            }
        }
        KeyCode::Char('D') => {
            if app.board().is_some() {
                let board_index = app.board_index;
                app.request_confirm(ConfirmAction::DeleteBoard { board_index });
            }
        }
        KeyCode::Char('c') => {
            if app.board().is_some() {
                let board_index = app.board_index;
                app.open_form(FormState::add_column(board_index));
            }
        }

        // Tasks
        KeyCode::Char('n') => add_task(app),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(handle) = app.focused_handle() {
                app.open_detail(handle);
            }
        }
        KeyCode::Char('e') => {
            if let Some(handle) = app.focused_handle()
                && let Some((_, _, task)) = app.task_for(&handle)
            {
                let form = FormState::edit_task(handle.clone(), task);
                app.open_form(form);
            }
        }
        KeyCode::Char('x') | KeyCode::Delete => {
            if let Some(task) = app.focused_handle() {
                app.request_confirm(ConfirmAction::DeleteTask { task });
            }
        }
        KeyCode::Char('H') => app.move_focused(Direction::Previous),
        KeyCode::Char('L') => app.move_focused(Direction::Next),

        // Session
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('O') => app.logout(),
        _ => {}
    }
}

fn add_task(app: &mut App) {
    let Some(board) = app.board() else {
        return;
    };
    let Some(column) = board
        .columns
        .get(app.focus.column)
        .or_else(|| board.columns.first())
    else {
        app.toast(ToastKind::Info, "Add a column before adding tasks.");
        return;
    };
    let form = FormState::add_task(app.board_index, &column.name);
    app.open_form(form);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::Mode;
    use crate::tui::form::FormKind;
    use crate::tui::input::test_keys::*;
    use crate::tui::render::test_helpers::test_app;

    #[test]
    fn focus_is_clamped() {
        let mut app = test_app();
        for _ in 0..10 {
            handle_navigate(&mut app, ch('l'));
        }
        assert_eq!(app.focus.column, 2);
        for _ in 0..50 {
            handle_navigate(&mut app, ch('j'));
        }
        let rows = app.board().unwrap().columns[2].tasks.len();
        assert_eq!(app.focus.row, rows - 1);
        handle_navigate(&mut app, ch('h'));
        assert!(app.focus.row < app.board().unwrap().columns[1].tasks.len());
    }

    #[test]
    fn number_keys_switch_boards() {
        let mut app = test_app();
        handle_navigate(&mut app, ch('3'));
        assert_eq!(app.board().unwrap().name, "Roadmap");
        handle_navigate(&mut app, ch('9'));
        assert_eq!(app.board_index, 2);
        handle_navigate(&mut app, key(KeyCode::Tab));
        assert_eq!(app.board_index, 0);
        handle_navigate(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.board_index, 2);
    }

    #[test]
    fn shift_l_moves_card_right() {
        let mut app = test_app();
        let handle = app.focused_handle().unwrap();
        handle_navigate(&mut app, ch('L'));
        let (ci, _, task) = app.task_for(&handle).unwrap();
        assert_eq!(ci, 1);
        assert_eq!(task.status.as_deref(), Some("Doing"));
    }

    #[test]
    fn n_prefills_focused_column() {
        let mut app = test_app();
        handle_navigate(&mut app, ch('l'));
        handle_navigate(&mut app, ch('n'));
        let form = app.form_state.as_ref().unwrap();
        assert_eq!(form.kind, FormKind::AddTask { board_index: 0 });
        assert_eq!(form.value(3), "Doing");
    }

    #[test]
    fn n_on_board_without_columns_toasts() {
        let mut app = test_app();
        app.store.dispatch(crate::ops::Command::AddBoard {
            board: crate::model::board::Board::new("Empty", vec![]),
        });
        app.select_board(3);
        handle_navigate(&mut app, ch('n'));
        assert_eq!(app.mode, Mode::Navigate);
        assert_eq!(app.ui.toasts.len(), 1);
    }

    #[test]
    fn enter_opens_details() {
        let mut app = test_app();
        handle_navigate(&mut app, key(KeyCode::Enter));
        assert_eq!(app.mode, Mode::Detail);
    }

    #[test]
    fn esc_dismisses_oldest_toast() {
        let mut app = test_app();
        app.toast(ToastKind::Info, "one");
        app.toast(ToastKind::Info, "two");
        handle_navigate(&mut app, key(KeyCode::Esc));
        assert_eq!(app.ui.toasts.len(), 1);
        assert_eq!(app.ui.toasts[0].message, "two");
    }

    #[test]
    fn logout_returns_to_login() {
        let mut app = test_app();
        handle_navigate(&mut app, ch('O'));
        assert_eq!(app.mode, Mode::Login);
    }
}
