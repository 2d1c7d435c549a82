use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::ops::dnd::{DragOutcome, Point};
use crate::tui::app::App;
use crate::tui::form::FormState;

pub(super) fn handle_mouse(app: &mut App, event: MouseEvent) {
    let at = Point::new(event.column, event.row);
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(board_index) = app.hits.tab_at(at.x, at.y) {
                app.select_board(board_index);
                return;
            }
            if app.hits.is_new_column(at.x, at.y) {
                let board_index = app.board_index;
                app.open_form(FormState::add_column(board_index));
                return;
            }
            let hit = app.hits.hit_at(at.x, at.y);
            app.drag.press(at, &hit);
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let hit = app.hits.hit_at(at.x, at.y);
            app.drag.motion(at, &hit);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let hit = app.hits.hit_at(at.x, at.y);
            match app.drag.release(at, &hit) {
                DragOutcome::Click(handle) => app.open_detail(handle),
                DragOutcome::Dropped(Some(command)) => app.apply_move(command),
                DragOutcome::Dropped(None) | DragOutcome::Cancelled | DragOutcome::Ignored => {}
            }
        }
        MouseEventKind::ScrollDown => {
            app.focus.row += 1;
            app.clamp_focus();
        }
        MouseEventKind::ScrollUp => {
            app.focus.row = app.focus.row.saturating_sub(1);
        }
        _ => {}
    }
}
