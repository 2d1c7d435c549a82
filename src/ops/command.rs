use serde::{Deserialize, Serialize};

use crate::model::board::{Board, Task};

/// A tagged request to mutate [`BoardsState`](crate::model::BoardsState).
///
/// Boards are addressed by index; columns, tasks and subtasks by name. A
/// command whose target does not resolve is applied as a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all_fields = "camelCase")]
pub enum Command {
    AddBoard {
        board: Board,
    },
    UpdateBoard {
        board_index: usize,
        board: Board,
    },
    DeleteBoard {
        board_index: usize,
    },
    AddTask {
        board_index: usize,
        column_name: String,
        task: Task,
    },
    UpdateTask {
        board_index: usize,
        column_name: String,
        task_title: String,
        task: Task,
    },
    DeleteTask {
        board_index: usize,
        column_name: String,
        task_title: String,
    },
    MoveTask {
        board_index: usize,
        from_column: String,
        to_column: String,
        task_title: String,
    },
    ToggleSubtask {
        board_index: usize,
        column_name: String,
        task_title: String,
        subtask_title: String,
    },
    AddColumn {
        board_index: usize,
        column_name: String,
    },
    SetBoards {
        boards: Vec<Board>,
    },
}

impl Command {
    /// The tag name, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Command::AddBoard { .. } => "AddBoard",
            Command::UpdateBoard { .. } => "UpdateBoard",
            Command::DeleteBoard { .. } => "DeleteBoard",
            Command::AddTask { .. } => "AddTask",
            Command::UpdateTask { .. } => "UpdateTask",
            Command::DeleteTask { .. } => "DeleteTask",
            Command::MoveTask { .. } => "MoveTask",
            Command::ToggleSubtask { .. } => "ToggleSubtask",
            Command::AddColumn { .. } => "AddColumn",
            Command::SetBoards { .. } => "SetBoards",
        }
    }

    /// The board this command targets, if it addresses one by index
    pub fn board_index(&self) -> Option<usize> {
        match self {
            Command::AddBoard { .. } | Command::SetBoards { .. } => None,
            Command::UpdateBoard { board_index, .. }
            | Command::DeleteBoard { board_index }
            | Command::AddTask { board_index, .. }
            | Command::UpdateTask { board_index, .. }
            | Command::DeleteTask { board_index, .. }
            | Command::MoveTask { board_index, .. }
            | Command::ToggleSubtask { board_index, .. }
            | Command::AddColumn { board_index, .. } => Some(*board_index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn move_task_wire_shape() {
        let cmd = Command::MoveTask {
            board_index: 0,
            from_column: "Todo".into(),
            to_column: "Doing".into(),
            task_title: "Design".into(),
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "MoveTask",
                "boardIndex": 0,
                "fromColumn": "Todo",
                "toColumn": "Doing",
                "taskTitle": "Design"
            })
        );
    }

    #[test]
    fn toggle_subtask_parses_from_json() {
        let cmd: Command = serde_json::from_str(
            r#"{"kind":"ToggleSubtask","boardIndex":2,"columnName":"Now","taskTitle":"Launch","subtaskTitle":"Ship"}"#,
        )
        .unwrap();
        assert_eq!(cmd.kind(), "ToggleSubtask");
        assert_eq!(cmd.board_index(), Some(2));
    }

    #[test]
    fn add_board_has_no_board_index() {
        let cmd = Command::AddBoard {
            board: Board::new("X", Vec::new()),
        };
        assert_eq!(cmd.board_index(), None);
    }
}
