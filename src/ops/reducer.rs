use std::sync::Arc;

use crate::model::board::{Board, BoardsState, Column, EntityId, Task};

use super::command::Command;

/// Apply a command to a snapshot.
///
/// Returns the same `Arc` (pointer-equal) when the command did not match
/// anything, and a fresh snapshot otherwise. The input is never modified.
pub fn apply(state: &Arc<BoardsState>, command: &Command) -> Arc<BoardsState> {
    match reduce(state, command) {
        Some(next) => Arc::new(next),
        None => {
            log::trace!("{} matched nothing, state unchanged", command.kind());
            Arc::clone(state)
        }
    }
}

/// Pure transition function. `None` means the command was a no-op.
pub fn reduce(state: &BoardsState, command: &Command) -> Option<BoardsState> {
    let mut next = state.clone();
    let changed = match command {
        Command::AddBoard { board } => {
            next.boards.push(board.clone());
            true
        }
        Command::UpdateBoard { board_index, board } => {
            update_board(&mut next, *board_index, board)
        }
        Command::DeleteBoard { board_index } => {
            if *board_index < next.boards.len() {
                next.boards.remove(*board_index);
                true
            } else {
                false
            }
        }
        Command::AddTask {
            board_index,
            column_name,
            task,
        } => match column_mut(&mut next, *board_index, column_name) {
            Some(column) => {
                column.tasks.push(task.clone());
                true
            }
            None => false,
        },
        Command::UpdateTask {
            board_index,
            column_name,
            task_title,
            task,
        } => update_task(&mut next, *board_index, column_name, task_title, task),
        Command::DeleteTask {
            board_index,
            column_name,
            task_title,
        } => match column_mut(&mut next, *board_index, column_name) {
            Some(column) => match task_position(column, task_title) {
                Some(pos) => {
                    column.tasks.remove(pos);
                    true
                }
                None => false,
            },
            None => false,
        },
        Command::MoveTask {
            board_index,
            from_column,
            to_column,
            task_title,
        } => move_task(&mut next, *board_index, from_column, to_column, task_title),
        Command::ToggleSubtask {
            board_index,
            column_name,
            task_title,
            subtask_title,
        } => toggle_subtask(&mut next, *board_index, column_name, task_title, subtask_title),
        Command::AddColumn {
            board_index,
            column_name,
        } => {
            let name = column_name.trim();
            match next.boards.get_mut(*board_index) {
                Some(board) if !name.is_empty() => {
                    board.columns.push(Column::new(name));
                    true
                }
                _ => false,
            }
        }
        Command::SetBoards { boards } => {
            next.boards = boards.clone();
            true
        }
    };

    if !changed {
        return None;
    }
    next.assign_ids();
    Some(next)
}

fn column_mut<'a>(
    state: &'a mut BoardsState,
    board_index: usize,
    column_name: &str,
) -> Option<&'a mut Column> {
    state.boards.get_mut(board_index)?.column_mut(column_name)
}

fn task_position(column: &Column, title: &str) -> Option<usize> {
    column.tasks.iter().position(|t| t.title == title)
}

fn update_board(state: &mut BoardsState, board_index: usize, board: &Board) -> bool {
    let Some(slot) = state.boards.get_mut(board_index) else {
        return false;
    };
    let id = inherit_id(board.id, slot.id);
    *slot = board.clone();
    slot.id = id;
    true
}

fn update_task(
    state: &mut BoardsState,
    board_index: usize,
    column_name: &str,
    task_title: &str,
    task: &Task,
) -> bool {
    let Some(column) = column_mut(state, board_index, column_name) else {
        return false;
    };
    let Some(pos) = task_position(column, task_title) else {
        return false;
    };
    let slot = &mut column.tasks[pos];
    let id = inherit_id(task.id, slot.id);
    *slot = task.clone();
    slot.id = id;
    true
}

/// Remove from `from`, append to `to` with `status` set, in one transition.
///
/// Both columns must exist; when they are the same column the task ends up
/// at the end of it.
fn move_task(
    state: &mut BoardsState,
    board_index: usize,
    from: &str,
    to: &str,
    task_title: &str,
) -> bool {
    let Some(board) = state.boards.get_mut(board_index) else {
        return false;
    };
    let Some(from_idx) = board.columns.iter().position(|c| c.name == from) else {
        return false;
    };
    let Some(to_idx) = board.columns.iter().position(|c| c.name == to) else {
        return false;
    };
    let Some(pos) = task_position(&board.columns[from_idx], task_title) else {
        return false;
    };

    let mut task = board.columns[from_idx].tasks.remove(pos);
    task.status = Some(board.columns[to_idx].name.clone());
    board.columns[to_idx].tasks.push(task);
    true
}

fn toggle_subtask(
    state: &mut BoardsState,
    board_index: usize,
    column_name: &str,
    task_title: &str,
    subtask_title: &str,
) -> bool {
    let subtask = column_mut(state, board_index, column_name)
        .and_then(|c| c.tasks.iter_mut().find(|t| t.title == task_title))
        .and_then(|t| t.subtasks.as_mut())
        .and_then(|subs| subs.iter_mut().find(|s| s.title == subtask_title));
    match subtask {
        Some(sub) => {
            sub.is_completed = !sub.is_completed;
            true
        }
        None => false,
    }
}

fn inherit_id(incoming: EntityId, existing: EntityId) -> EntityId {
    if incoming.is_assigned() {
        incoming
    } else {
        existing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::board::Subtask;
    use pretty_assertions::assert_eq;

    fn launch_state() -> BoardsState {
        let mut design = Task::new("Design");
        design.subtasks = Some(vec![Subtask::new("Research")]);
        let todo = Column {
            tasks: vec![design, Task::new("Build")],
            ..Column::new("Todo")
        };
        BoardsState::new(vec![
            Board::new("Platform Launch", vec![todo, Column::new("Doing")]),
            Board::new("Roadmap", vec![Column::new("Now")]),
        ])
    }

    fn titles(state: &BoardsState, board: usize, column: &str) -> Vec<String> {
        state.boards[board]
            .column(column)
            .unwrap()
            .tasks
            .iter()
            .map(|t| t.title.clone())
            .collect()
    }

    #[test]
    fn add_board_appends() {
        let state = launch_state();
        let next = reduce(
            &state,
            &Command::AddBoard {
                board: Board::new("New", vec![Column::new("A")]),
            },
        )
        .unwrap();
        assert_eq!(next.boards.len(), 3);
        assert_eq!(next.boards[2].name, "New");
        assert!(next.boards[2].id.is_assigned());
        assert!(next.boards[2].columns[0].id.is_assigned());
    }

    #[test]
    fn update_board_inherits_id_when_unassigned() {
        let state = launch_state();
        let old_id = state.boards[1].id;
        let next = reduce(
            &state,
            &Command::UpdateBoard {
                board_index: 1,
                board: Board::new("Renamed", vec![]),
            },
        )
        .unwrap();
        assert_eq!(next.boards[1].name, "Renamed");
        assert_eq!(next.boards[1].id, old_id);
    }

    #[test]
    fn add_task_appends_to_named_column() {
        let state = launch_state();
        let next = reduce(
            &state,
            &Command::AddTask {
                board_index: 0,
                column_name: "Todo".into(),
                task: Task::new("Ship"),
            },
        )
        .unwrap();
        assert_eq!(titles(&next, 0, "Todo"), vec!["Design", "Build", "Ship"]);
    }

    #[test]
    fn add_task_missing_column_is_noop() {
        let state = launch_state();
        let cmd = Command::AddTask {
            board_index: 0,
            column_name: "Nope".into(),
            task: Task::new("Ship"),
        };
        assert!(reduce(&state, &cmd).is_none());
    }

    #[test]
    fn update_task_preserves_position_and_id() {
        let state = launch_state();
        let old_id = state.boards[0].columns[0].tasks[0].id;
        let next = reduce(
            &state,
            &Command::UpdateTask {
                board_index: 0,
                column_name: "Todo".into(),
                task_title: "Design".into(),
                task: Task::new("Design v2"),
            },
        )
        .unwrap();
        assert_eq!(titles(&next, 0, "Todo"), vec!["Design v2", "Build"]);
        assert_eq!(next.boards[0].columns[0].tasks[0].id, old_id);
    }

    #[test]
    fn delete_task_removes_only_first_duplicate() {
        let mut state = launch_state();
        state.boards[0].columns[0].tasks.push(Task::new("Design"));
        let next = reduce(
            &state,
            &Command::DeleteTask {
                board_index: 0,
                column_name: "Todo".into(),
                task_title: "Design".into(),
            },
        )
        .unwrap();
        assert_eq!(titles(&next, 0, "Todo"), vec!["Build", "Design"]);
    }

    #[test]
    fn move_task_to_missing_column_keeps_task() {
        let state = launch_state();
        let cmd = Command::MoveTask {
            board_index: 0,
            from_column: "Todo".into(),
            to_column: "Nowhere".into(),
            task_title: "Design".into(),
        };
        assert!(reduce(&state, &cmd).is_none());
    }

    #[test]
    fn move_task_within_same_column_goes_to_end() {
        let state = launch_state();
        let next = reduce(
            &state,
            &Command::MoveTask {
                board_index: 0,
                from_column: "Todo".into(),
                to_column: "Todo".into(),
                task_title: "Design".into(),
            },
        )
        .unwrap();
        assert_eq!(titles(&next, 0, "Todo"), vec!["Build", "Design"]);
        assert_eq!(next.boards[0].task_count(), state.boards[0].task_count());
    }

    #[test]
    fn move_task_keeps_identity_and_sets_status() {
        let state = launch_state();
        let id = state.boards[0].columns[0].tasks[0].id;
        let next = reduce(
            &state,
            &Command::MoveTask {
                board_index: 0,
                from_column: "Todo".into(),
                to_column: "Doing".into(),
                task_title: "Design".into(),
            },
        )
        .unwrap();
        let moved = next.boards[0].column("Doing").unwrap().task("Design").unwrap();
        assert_eq!(moved.id, id);
        assert_eq!(moved.status.as_deref(), Some("Doing"));
        assert_eq!(moved.subtasks()[0].title, "Research");
    }

    #[test]
    fn toggle_subtask_flips_only_target() {
        let mut state = launch_state();
        state.boards[0].columns[0].tasks[0]
            .subtasks
            .as_mut()
            .unwrap()
            .push(Subtask::new("Interview"));
        let next = reduce(
            &state,
            &Command::ToggleSubtask {
                board_index: 0,
                column_name: "Todo".into(),
                task_title: "Design".into(),
                subtask_title: "Research".into(),
            },
        )
        .unwrap();
        let subs = next.boards[0].columns[0].tasks[0].subtasks();
        assert!(subs[0].is_completed);
        assert!(!subs[1].is_completed);
    }

    #[test]
    fn toggle_subtask_on_task_without_subtasks_is_noop() {
        let state = launch_state();
        let cmd = Command::ToggleSubtask {
            board_index: 0,
            column_name: "Todo".into(),
            task_title: "Build".into(),
            subtask_title: "Anything".into(),
        };
        assert!(reduce(&state, &cmd).is_none());
    }

    #[test]
    fn add_column_trims_name() {
        let state = launch_state();
        let next = reduce(
            &state,
            &Command::AddColumn {
                board_index: 1,
                column_name: "  In Review ".into(),
            },
        )
        .unwrap();
        assert_eq!(next.boards[1].column_names(), vec!["Now", "In Review"]);
        assert!(next.boards[1].columns[1].tasks.is_empty());
    }

    #[test]
    fn set_boards_replaces_and_assigns_ids() {
        let state = launch_state();
        let high_water = state.next_id;
        let next = reduce(
            &state,
            &Command::SetBoards {
                boards: vec![Board::new("Only", vec![Column::new("One")])],
            },
        )
        .unwrap();
        assert_eq!(next.boards.len(), 1);
        assert!(next.boards[0].id.0 >= high_water);
    }

    #[test]
    fn apply_returns_same_arc_on_noop() {
        let state = Arc::new(launch_state());
        let same = apply(&state, &Command::DeleteBoard { board_index: 9 });
        assert!(Arc::ptr_eq(&state, &same));

        let changed = apply(&state, &Command::DeleteBoard { board_index: 0 });
        assert!(!Arc::ptr_eq(&state, &changed));
        assert_eq!(state.boards.len(), 2, "old snapshot stays frozen");
    }

    #[test]
    fn apply_is_deterministic() {
        let state = Arc::new(launch_state());
        let cmd = Command::AddColumn {
            board_index: 0,
            column_name: "Done".into(),
        };
        assert_eq!(*apply(&state, &cmd), *apply(&state, &cmd));
    }
}
