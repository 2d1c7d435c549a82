use serde::Serialize;

use crate::model::board::{Board, Column, Subtask, Task};
use crate::model::session::User;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct BoardSummaryJson {
    /// 1-based position, as accepted by board selectors
    pub position: usize,
    pub id: u64,
    pub name: String,
    pub columns: usize,
    pub tasks: usize,
}

#[derive(Serialize)]
pub struct BoardJson {
    pub position: usize,
    pub id: u64,
    pub name: String,
    pub columns: Vec<ColumnJson>,
}

#[derive(Serialize)]
pub struct ColumnJson {
    pub id: u64,
    pub name: String,
    pub tasks: Vec<TaskJson>,
}

#[derive(Serialize)]
pub struct TaskJson {
    pub id: u64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subtasks: Vec<SubtaskJson>,
}

#[derive(Serialize)]
pub struct SubtaskJson {
    pub id: u64,
    pub title: String,
    pub completed: bool,
}

#[derive(Serialize)]
pub struct WhoamiJson {
    pub logged_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserJson>,
    pub theme: String,
}

#[derive(Serialize)]
pub struct UserJson {
    pub id: String,
    pub name: String,
    pub email: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn board_summary_to_json(index: usize, board: &Board) -> BoardSummaryJson {
    BoardSummaryJson {
        position: index + 1,
        id: board.id.0,
        name: board.name.clone(),
        columns: board.columns.len(),
        tasks: board.task_count(),
    }
}

pub fn board_to_json(index: usize, board: &Board) -> BoardJson {
    BoardJson {
        position: index + 1,
        id: board.id.0,
        name: board.name.clone(),
        columns: board.columns.iter().map(column_to_json).collect(),
    }
}

fn column_to_json(column: &Column) -> ColumnJson {
    ColumnJson {
        id: column.id.0,
        name: column.name.clone(),
        tasks: column.tasks.iter().map(task_to_json).collect(),
    }
}

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id.0,
        title: task.title.clone(),
        description: task.description.clone(),
        status: task.status.clone(),
        subtasks: task.subtasks().iter().map(subtask_to_json).collect(),
    }
}

fn subtask_to_json(sub: &Subtask) -> SubtaskJson {
    SubtaskJson {
        id: sub.id.0,
        title: sub.title.clone(),
        completed: sub.is_completed,
    }
}

pub fn user_to_json(user: &User) -> UserJson {
    UserJson {
        id: user.id.clone(),
        name: user.name.clone(),
        email: user.email.clone(),
    }
}
