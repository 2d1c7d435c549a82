//! Drag-and-drop coordination: pointer gestures over cards and columns
//! become `MoveTask` commands.
//!
//! Identities are structured values carried through the gesture, so column
//! names and task titles can contain any text.

use crate::model::board::{Board, EntityId};

use super::command::Command;

/// Identity of a draggable task card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskHandle {
    pub board_index: usize,
    pub column: String,
    pub task_title: String,
    pub task_id: EntityId,
}

/// Identity of a droppable column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnHandle {
    pub board_index: usize,
    pub column: String,
}

/// A pointer position in terminal cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub fn new(x: u16, y: u16) -> Self {
        Point { x, y }
    }

    /// Chebyshev distance: one cell in any direction counts as one
    pub fn distance(self, other: Point) -> u16 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }
}

/// What lies under the pointer. A card is always inside its column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hit {
    pub task: Option<TaskHandle>,
    pub column: Option<ColumnHandle>,
}

/// Phase of a single drag gesture
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Pointer is down on a card but has not travelled far enough
    Armed { origin: Point, source: TaskHandle },
    Dragging {
        source: TaskHandle,
        pointer: Point,
        over: Option<ColumnHandle>,
    },
}

/// Result of ending (or failing to start) a gesture
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Nothing happened (e.g. release with no gesture in progress)
    Ignored,
    /// Released before the threshold: treat as a click on the card
    Click(TaskHandle),
    /// Released over a column. `None` when the drop was a no-op.
    Dropped(Option<Command>),
    /// Released outside any column, or aborted
    Cancelled,
}

/// State machine for one pointer gesture:
/// `Idle -> Armed -> Dragging -> (Dropped | Cancelled) -> Idle`.
#[derive(Debug, Clone)]
pub struct DragGesture {
    phase: DragPhase,
    threshold: u16,
}

impl DragGesture {
    pub fn new(threshold: u16) -> Self {
        DragGesture {
            phase: DragPhase::Idle,
            threshold: threshold.max(1),
        }
    }

    pub fn phase(&self) -> &DragPhase {
        &self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, DragPhase::Dragging { .. })
    }

    /// The card being dragged (rendered de-emphasized)
    pub fn dragged_task(&self) -> Option<EntityId> {
        match &self.phase {
            DragPhase::Dragging { source, .. } => Some(source.task_id),
            _ => None,
        }
    }

    /// The column currently under a dragged card (rendered highlighted)
    pub fn hovered_column(&self) -> Option<&ColumnHandle> {
        match &self.phase {
            DragPhase::Dragging { over, .. } => over.as_ref(),
            _ => None,
        }
    }

    /// Pointer pressed. Arms only when pressed on a card.
    pub fn press(&mut self, at: Point, hit: &Hit) {
        self.phase = match &hit.task {
            Some(source) => DragPhase::Armed {
                origin: at,
                source: source.clone(),
            },
            None => DragPhase::Idle,
        };
    }

    /// Pointer moved with the button held
    pub fn motion(&mut self, at: Point, hit: &Hit) {
        match &mut self.phase {
            DragPhase::Idle => {}
            DragPhase::Armed { origin, source } => {
                if origin.distance(at) >= self.threshold {
                    log::trace!("drag started for {:?}", source.task_title);
                    self.phase = DragPhase::Dragging {
                        source: source.clone(),
                        pointer: at,
                        over: hit.column.clone(),
                    };
                }
            }
            DragPhase::Dragging { pointer, over, .. } => {
                *pointer = at;
                *over = hit.column.clone();
            }
        }
    }

    /// Pointer released. Always returns the gesture to `Idle`.
    pub fn release(&mut self, at: Point, hit: &Hit) -> DragOutcome {
        // A release can arrive without an intermediate motion event.
        self.motion(at, hit);
        match std::mem::take(&mut self.phase) {
            DragPhase::Idle => DragOutcome::Ignored,
            DragPhase::Armed { source, .. } => DragOutcome::Click(source),
            DragPhase::Dragging { source, .. } => match &hit.column {
                Some(target) => DragOutcome::Dropped(resolve_drop(&source, target)),
                None => DragOutcome::Cancelled,
            },
        }
    }

    /// Abort the gesture (Esc, focus loss)
    pub fn cancel(&mut self) -> DragOutcome {
        match std::mem::take(&mut self.phase) {
            DragPhase::Idle => DragOutcome::Ignored,
            DragPhase::Armed { .. } | DragPhase::Dragging { .. } => DragOutcome::Cancelled,
        }
    }
}

impl Default for DragGesture {
    fn default() -> Self {
        DragGesture::new(1)
    }
}

/// Turn a drop into at most one `MoveTask`.
///
/// Returns `None` when the target is on another board or is the card's own
/// column.
pub fn resolve_drop(source: &TaskHandle, target: &ColumnHandle) -> Option<Command> {
    if source.board_index != target.board_index {
        log::debug!(
            "drop rejected: board {} onto board {}",
            source.board_index,
            target.board_index
        );
        return None;
    }
    if source.column == target.column {
        return None;
    }
    Some(Command::MoveTask {
        board_index: source.board_index,
        from_column: source.column.clone(),
        to_column: target.column.clone(),
        task_title: source.task_title.clone(),
    })
}

/// Direction for keyboard moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Keyboard equivalent of dragging a card one column over. Resolves through
/// [`resolve_drop`] so both paths share the same checks.
pub fn move_to_adjacent(
    board: &Board,
    source: &TaskHandle,
    direction: Direction,
) -> Option<Command> {
    let idx = board.columns.iter().position(|c| c.name == source.column)?;
    let target_idx = match direction {
        Direction::Previous => idx.checked_sub(1)?,
        Direction::Next => idx + 1,
    };
    let target = board.columns.get(target_idx)?;
    resolve_drop(
        source,
        &ColumnHandle {
            board_index: source.board_index,
            column: target.name.clone(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::board::Column;
    use pretty_assertions::assert_eq;

    fn card(column: &str, title: &str) -> TaskHandle {
        TaskHandle {
            board_index: 0,
            column: column.into(),
            task_title: title.into(),
            task_id: EntityId(7),
        }
    }

    fn col(board_index: usize, column: &str) -> ColumnHandle {
        ColumnHandle {
            board_index,
            column: column.into(),
        }
    }

    fn on_card(column: &str, title: &str) -> Hit {
        Hit {
            task: Some(card(column, title)),
            column: Some(col(0, column)),
        }
    }

    fn on_column(column: &str) -> Hit {
        Hit {
            task: None,
            column: Some(col(0, column)),
        }
    }

    #[test]
    fn drop_on_other_column_moves() {
        let mut g = DragGesture::new(1);
        g.press(Point::new(2, 2), &on_card("Todo", "Design"));
        g.motion(Point::new(20, 3), &on_column("Doing"));
        assert!(g.is_dragging());
        assert_eq!(g.dragged_task(), Some(EntityId(7)));
        assert_eq!(g.hovered_column(), Some(&col(0, "Doing")));

        let outcome = g.release(Point::new(20, 3), &on_column("Doing"));
        assert_eq!(
            outcome,
            DragOutcome::Dropped(Some(Command::MoveTask {
                board_index: 0,
                from_column: "Todo".into(),
                to_column: "Doing".into(),
                task_title: "Design".into(),
            }))
        );
        assert_eq!(g.phase(), &DragPhase::Idle);
    }

    #[test]
    fn release_below_threshold_is_click() {
        let mut g = DragGesture::new(3);
        g.press(Point::new(5, 5), &on_card("Todo", "Design"));
        g.motion(Point::new(6, 6), &on_card("Todo", "Design"));
        assert!(!g.is_dragging());
        let outcome = g.release(Point::new(6, 6), &on_card("Todo", "Design"));
        assert_eq!(outcome, DragOutcome::Click(card("Todo", "Design")));
    }

    #[test]
    fn drop_on_own_column_issues_nothing() {
        let mut g = DragGesture::new(1);
        g.press(Point::new(2, 2), &on_card("Todo", "Design"));
        g.motion(Point::new(2, 8), &on_column("Todo"));
        assert_eq!(
            g.release(Point::new(2, 8), &on_column("Todo")),
            DragOutcome::Dropped(None)
        );
    }

    #[test]
    fn release_outside_columns_cancels() {
        let mut g = DragGesture::new(1);
        g.press(Point::new(2, 2), &on_card("Todo", "Design"));
        g.motion(Point::new(70, 1), &Hit::default());
        assert_eq!(g.release(Point::new(70, 1), &Hit::default()), DragOutcome::Cancelled);
    }

    #[test]
    fn escape_cancels_drag() {
        let mut g = DragGesture::new(1);
        g.press(Point::new(2, 2), &on_card("Todo", "Design"));
        g.motion(Point::new(9, 2), &on_column("Doing"));
        assert_eq!(g.cancel(), DragOutcome::Cancelled);
        assert_eq!(g.phase(), &DragPhase::Idle);
        assert_eq!(g.cancel(), DragOutcome::Ignored);
    }

    #[test]
    fn press_on_empty_space_does_not_arm() {
        let mut g = DragGesture::new(1);
        g.press(Point::new(1, 1), &on_column("Todo"));
        assert_eq!(g.phase(), &DragPhase::Idle);
        assert_eq!(g.release(Point::new(1, 1), &on_column("Todo")), DragOutcome::Ignored);
    }

    #[test]
    fn release_without_motion_past_threshold_still_drags() {
        let mut g = DragGesture::new(1);
        g.press(Point::new(2, 2), &on_card("Todo", "Design"));
        let outcome = g.release(Point::new(30, 2), &on_column("Doing"));
        assert!(matches!(outcome, DragOutcome::Dropped(Some(_))));
    }

    #[test]
    fn cross_board_drop_is_rejected() {
        assert_eq!(resolve_drop(&card("Todo", "Design"), &col(1, "Doing")), None);
    }

    #[test]
    fn names_with_separators_survive() {
        let source = card("To::do", "a::b::c");
        let cmd = resolve_drop(&source, &col(0, "Do::ing")).unwrap();
        assert_eq!(
            cmd,
            Command::MoveTask {
                board_index: 0,
                from_column: "To::do".into(),
                to_column: "Do::ing".into(),
                task_title: "a::b::c".into(),
            }
        );
    }

    #[test]
    fn adjacent_moves_stop_at_edges() {
        let board = Board::new("B", vec![Column::new("Todo"), Column::new("Doing")]);
        let first = card("Todo", "Design");
        assert_eq!(move_to_adjacent(&board, &first, Direction::Previous), None);
        assert!(matches!(
            move_to_adjacent(&board, &first, Direction::Next),
            Some(Command::MoveTask { ref to_column, .. }) if to_column == "Doing"
        ));
        let last = card("Doing", "Design");
        assert_eq!(move_to_adjacent(&board, &last, Direction::Next), None);
    }
}
