pub mod board_view;
pub mod confirm_popup;
pub mod detail_popup;
pub mod form_popup;
pub mod header;
pub mod help_overlay;
pub mod helpers;
pub mod login;
pub mod status_row;
pub mod toasts;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;

use super::app::{App, Mode};

/// Main render function: draws the frame and records hit regions
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    app.hits.clear();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    if app.mode == Mode::Login {
        login::render_login(frame, app, area);
        toasts::render_toasts(frame, app, area);
        return;
    }

    // Layout: header (2 rows) | board | status row (1 row)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // board tabs + separator
            Constraint::Min(1),    // board columns
            Constraint::Length(1), // status row
        ])
        .split(area);

    header::render_header(frame, app, chunks[0]);
    board_view::render_board_view(frame, app, chunks[1]);

    match app.mode {
        Mode::Detail => detail_popup::render_detail_popup(frame, app, area),
        Mode::Form => form_popup::render_form_popup(frame, app, area),
        Mode::Confirm => confirm_popup::render_confirm_popup(frame, app, area),
        Mode::Login | Mode::Navigate => {}
    }

    // Floating card label follows the pointer while dragging
    board_view::render_drag_ghost(frame, app, area);

    if app.show_help {
        help_overlay::render_help_overlay(frame, app, area);
    }

    toasts::render_toasts(frame, app, chunks[1]);
    status_row::render_status_row(frame, app, chunks[2]);
}
