//! Screen regions recorded during render, looked up by mouse input.

use ratatui::layout::{Position, Rect};

use crate::ops::dnd::{ColumnHandle, Hit, TaskHandle};

#[derive(Debug, Clone, Default)]
pub struct HitMap {
    cards: Vec<(Rect, TaskHandle)>,
    columns: Vec<(Rect, ColumnHandle)>,
    tabs: Vec<(Rect, usize)>,
    new_column: Option<Rect>,
}

impl HitMap {
    /// Drop everything from the previous frame
    pub fn clear(&mut self) {
        self.cards.clear();
        self.columns.clear();
        self.tabs.clear();
        self.new_column = None;
    }

    pub fn record_card(&mut self, area: Rect, handle: TaskHandle) {
        self.cards.push((area, handle));
    }

    pub fn record_column(&mut self, area: Rect, handle: ColumnHandle) {
        self.columns.push((area, handle));
    }

    pub fn record_tab(&mut self, area: Rect, board_index: usize) {
        self.tabs.push((area, board_index));
    }

    pub fn record_new_column(&mut self, area: Rect) {
        self.new_column = Some(area);
    }

    /// Card and column under the pointer
    pub fn hit_at(&self, x: u16, y: u16) -> Hit {
        let pos = Position::new(x, y);
        Hit {
            task: self
                .cards
                .iter()
                .find(|(r, _)| r.contains(pos))
                .map(|(_, h)| h.clone()),
            column: self
                .columns
                .iter()
                .find(|(r, _)| r.contains(pos))
                .map(|(_, h)| h.clone()),
        }
    }

    pub fn tab_at(&self, x: u16, y: u16) -> Option<usize> {
        let pos = Position::new(x, y);
        self.tabs
            .iter()
            .find(|(r, _)| r.contains(pos))
            .map(|(_, i)| *i)
    }

    pub fn is_new_column(&self, x: u16, y: u16) -> bool {
        self.new_column
            .is_some_and(|r| r.contains(Position::new(x, y)))
    }
}
