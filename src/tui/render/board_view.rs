use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::model::board::{Board, Column, EntityId, Task};
use crate::ops::board_ops::subtask_summary;
use crate::ops::dnd::{ColumnHandle, DragPhase, TaskHandle};
use crate::tui::app::{App, Focus};
use crate::tui::hitmap::HitMap;
use crate::tui::theme::Theme;
use crate::util::unicode;

pub const COLUMN_WIDTH: u16 = 28;
const COLUMN_GAP: u16 = 1;
const CARD_HEIGHT: u16 = 4;

/// Render the current board's columns side by side, recording card and
/// column regions for mouse hit-testing
pub fn render_board_view(frame: &mut Frame, app: &mut App, area: Rect) {
    let area = Rect {
        x: area.x + 1,
        width: area.width.saturating_sub(1),
        ..area
    };
    let Some(board) = app.store.board(app.board_index) else {
        render_message(frame, &app.theme, area, "No boards yet. Press B to create one.");
        return;
    };
    if board.columns.is_empty() {
        render_message(
            frame,
            &app.theme,
            area,
            "This board is empty. Press c to create a new column.",
        );
        return;
    }

    let mut painter = BoardPainter {
        theme: &app.theme,
        hits: &mut app.hits,
        board_index: app.board_index,
        focus: app.focus,
        dragged: app.drag.dragged_task(),
        hovered: app
            .drag
            .hovered_column()
            .filter(|c| c.board_index == app.board_index)
            .map(|c| c.column.as_str()),
    };
    painter.paint(frame, board, area);
}

struct BoardPainter<'a> {
    theme: &'a Theme,
    hits: &'a mut HitMap,
    board_index: usize,
    focus: Focus,
    dragged: Option<EntityId>,
    hovered: Option<&'a str>,
}

impl BoardPainter<'_> {
    fn paint(&mut self, frame: &mut Frame, board: &Board, area: Rect) {
        let slot = COLUMN_WIDTH + COLUMN_GAP;
        let fit = ((area.width + COLUMN_GAP) / slot).max(1) as usize;
        // Scroll horizontally so the focused column is on screen
        let first = (self.focus.column + 1).saturating_sub(fit);

        let mut next_x = area.x;
        for ci in (first..board.columns.len()).take(fit) {
            let width = COLUMN_WIDTH.min(area.right().saturating_sub(next_x));
            if width < 6 {
                return;
            }
            let rect = Rect::new(next_x, area.y, width, area.height);
            self.paint_column(frame, ci, &board.columns[ci], rect);
            next_x += slot;
        }

        // "+ New Column" placeholder after the last column, if it fits
        if first + fit >= board.columns.len() {
            let width = COLUMN_WIDTH.min(area.right().saturating_sub(next_x));
            if width >= 6 {
                let rect = Rect::new(next_x, area.y, width, area.height.min(5));
                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(self.theme.border).bg(self.theme.background));
                let label = Paragraph::new(Line::from(Span::styled(
                    "+ New Column",
                    Style::default()
                        .fg(self.theme.dim)
                        .add_modifier(Modifier::BOLD),
                )))
                .centered()
                .block(block)
                .style(Style::default().bg(self.theme.background));
                frame.render_widget(label, rect);
                self.hits.record_new_column(rect);
            }
        }
    }

    fn paint_column(&mut self, frame: &mut Frame, ci: usize, column: &Column, rect: Rect) {
        let theme = self.theme;
        let is_hovered = self.hovered == Some(column.name.as_str());
        let border_style = if is_hovered {
            Style::default()
                .fg(theme.highlight)
                .bg(theme.background)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.border).bg(theme.background)
        };

        let heading = unicode::truncate_to_width(
            &format!("{} ({})", column.name.to_uppercase(), column.tasks.len()),
            rect.width.saturating_sub(6) as usize,
        );
        let title = Line::from(vec![
            Span::styled(" \u{25CF} ", Style::default().fg(theme.column_dot(ci))),
            Span::styled(
                format!("{} ", heading),
                Style::default().fg(theme.dim).add_modifier(Modifier::BOLD),
            ),
        ]);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if is_hovered {
                BorderType::Thick
            } else {
                BorderType::Plain
            })
            .border_style(border_style)
            .title(title)
            .style(Style::default().bg(theme.background));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);
        self.hits.record_column(
            rect,
            ColumnHandle {
                board_index: self.board_index,
                column: column.name.clone(),
            },
        );

        if column.tasks.is_empty() {
            if inner.height > 0 {
                let empty = Paragraph::new(Span::styled(
                    "No tasks",
                    Style::default().fg(theme.dim).add_modifier(Modifier::ITALIC),
                ))
                .centered();
                frame.render_widget(empty, Rect { height: 1, ..inner });
            }
            return;
        }

        let visible = (inner.height / CARD_HEIGHT).max(1) as usize;
        let offset = if self.focus.column == ci {
            (self.focus.row + 1).saturating_sub(visible)
        } else {
            0
        };

        for (slot, (row, task)) in column
            .tasks
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .enumerate()
        {
            let y = inner.y + slot as u16 * CARD_HEIGHT;
            let height = CARD_HEIGHT.min(inner.bottom().saturating_sub(y));
            if height < 3 {
                break;
            }
            let card = Rect::new(inner.x, y, inner.width, height);
            let focused = self.focus == Focus { column: ci, row };
            self.paint_card(frame, task, focused, card);
            self.hits.record_card(
                card,
                TaskHandle {
                    board_index: self.board_index,
                    column: column.name.clone(),
                    task_title: task.title.clone(),
                    task_id: task.id,
                },
            );
        }

        let hidden = column.tasks.len().saturating_sub(offset + visible);
        if hidden > 0 && rect.height > 1 {
            let more = format!(" \u{2193} {} more ", hidden);
            let w = (unicode::display_width(&more) as u16).min(rect.width.saturating_sub(2));
            let at = Rect::new(rect.x + 1, rect.bottom() - 1, w, 1);
            frame.render_widget(
                Paragraph::new(Span::styled(more, Style::default().fg(theme.dim))),
                at,
            );
        }
    }

    fn paint_card(&self, frame: &mut Frame, task: &Task, focused: bool, card: Rect) {
        let theme = self.theme;
        let is_dragged = self.dragged == Some(task.id);

        let (border_fg, mut title_style) = if is_dragged {
            (theme.dim, Style::default().fg(theme.dim).add_modifier(Modifier::DIM))
        } else if focused {
            (
                theme.highlight,
                Style::default().fg(theme.highlight).add_modifier(Modifier::BOLD),
            )
        } else {
            (theme.border, Style::default().fg(theme.text).add_modifier(Modifier::BOLD))
        };
        title_style = title_style.bg(theme.surface);
        let mut summary_style = Style::default().fg(theme.dim).bg(theme.surface);
        if is_dragged {
            summary_style = summary_style.add_modifier(Modifier::DIM);
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_fg).bg(theme.background))
            .style(Style::default().bg(theme.surface));
        let inner = block.inner(card);
        let width = inner.width.saturating_sub(1) as usize;
        let lines = vec![
            Line::from(Span::styled(
                format!(" {}", unicode::truncate_to_width(&task.title, width)),
                title_style,
            )),
            Line::from(Span::styled(
                format!(" {}", unicode::truncate_to_width(&subtask_summary(task), width)),
                summary_style,
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .style(Style::default().bg(theme.surface)),
            card,
        );
    }
}

fn render_message(frame: &mut Frame, theme: &Theme, area: Rect, message: &str) {
    if area.height == 0 {
        return;
    }
    let y = area.y + area.height / 2;
    let paragraph = Paragraph::new(Span::styled(message, Style::default().fg(theme.dim)))
        .centered()
        .style(Style::default().bg(theme.background));
    frame.render_widget(paragraph, Rect::new(area.x, y, area.width, 1));
}

/// Label that follows the pointer while a card is being dragged
pub fn render_drag_ghost(frame: &mut Frame, app: &App, area: Rect) {
    let DragPhase::Dragging {
        source, pointer, ..
    } = app.drag.phase()
    else {
        return;
    };
    if pointer.y >= area.bottom() || pointer.x >= area.right() {
        return;
    }
    let room = (area.right() - pointer.x).min(COLUMN_WIDTH) as usize;
    let label = unicode::truncate_to_width(&format!(" \u{2261} {} ", source.task_title), room);
    let width = unicode::display_width(&label) as u16;
    if width == 0 {
        return;
    }
    frame.render_widget(
        Paragraph::new(Span::styled(
            label,
            Style::default()
                .fg(app.theme.highlight_text)
                .bg(app.theme.highlight)
                .add_modifier(Modifier::BOLD),
        )),
        Rect::new(pointer.x, pointer.y, width, 1),
    );
}
