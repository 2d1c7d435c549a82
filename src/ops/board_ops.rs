//! Form-level validation and construction of boards, columns and tasks.
//!
//! The reducer trusts its input; these helpers are what the TUI forms and
//! CLI handlers call before dispatching.

use crate::model::board::{Board, Column, Subtask, Task};

/// User input rejected before dispatch
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please provide a name for the board.")]
    BlankBoardName,
    #[error("Please add at least one column for the new board.")]
    NoColumns,
    #[error("Please provide a name for the new column.")]
    BlankColumnName,
    #[error("Please provide a title for the task.")]
    BlankTaskTitle,
    #[error("A task named \"{title}\" already exists in {column}.")]
    DuplicateTaskTitle { title: String, column: String },
    #[error("This board has no column named \"{0}\".")]
    UnknownColumn(String),
}

/// Split a comma-separated form field into trimmed, non-blank entries
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build a new board from form input
pub fn new_board(name: &str, column_names: &[String]) -> Result<Board, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::BlankBoardName);
    }
    let columns: Vec<Column> = cleaned(column_names).into_iter().map(Column::new).collect();
    if columns.is_empty() {
        return Err(ValidationError::NoColumns);
    }
    Ok(Board::new(name, columns))
}

/// Rebuild a board from the edit form.
///
/// A blank name keeps the original. Columns whose names survive keep their
/// tasks and identity; new names become empty columns; missing names are
/// dropped along with their tasks.
pub fn edit_board(original: &Board, name: &str, column_names: &[String]) -> Board {
    let name = name.trim();
    let columns = cleaned(column_names)
        .into_iter()
        .map(|col_name| match original.column(&col_name) {
            Some(existing) => existing.clone(),
            None => Column::new(col_name),
        })
        .collect();
    Board {
        id: original.id,
        name: if name.is_empty() {
            original.name.clone()
        } else {
            name.to_string()
        },
        columns,
    }
}

/// Validate a new column name
pub fn column_name(input: &str) -> Result<String, ValidationError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(ValidationError::BlankColumnName);
    }
    Ok(name.to_string())
}

/// Task form contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub subtasks: Vec<String>,
    /// Target column name
    pub status: String,
}

impl TaskDraft {
    /// Pre-fill the form from an existing task
    pub fn from_task(task: &Task, column: &str) -> Self {
        TaskDraft {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            subtasks: task.subtasks().iter().map(|s| s.title.clone()).collect(),
            status: column.to_string(),
        }
    }
}

/// Validate a draft against `board` and build the task.
///
/// `editing` names the task being replaced (its title is allowed to clash
/// with itself, and its subtasks keep completion state by title).
pub fn build_task(
    board: &Board,
    draft: &TaskDraft,
    editing: Option<&Task>,
) -> Result<Task, ValidationError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(ValidationError::BlankTaskTitle);
    }
    let column = board
        .column(draft.status.trim())
        .ok_or_else(|| ValidationError::UnknownColumn(draft.status.trim().to_string()))?;
    let clashes_in = |c: &Column| {
        c.tasks
            .iter()
            .any(|t| t.title == title && editing.is_none_or(|e| e.id != t.id))
    };
    if clashes_in(column) {
        return Err(ValidationError::DuplicateTaskTitle {
            title: title.to_string(),
            column: column.name.clone(),
        });
    }
    // A moving edit is renamed in its source column before the move, so the
    // new title must not shadow another task there either.
    if let Some(source) = editing
        .and_then(|e| board.locate_task(e.id))
        .map(|(ci, _)| &board.columns[ci])
        && source.name != column.name
        && clashes_in(source)
    {
        return Err(ValidationError::DuplicateTaskTitle {
            title: title.to_string(),
            column: source.name.clone(),
        });
    }

    let subtasks: Vec<Subtask> = cleaned(&draft.subtasks)
        .into_iter()
        .map(|sub_title| {
            editing
                .and_then(|e| e.subtasks().iter().find(|s| s.title == sub_title))
                .cloned()
                .unwrap_or_else(|| Subtask::new(sub_title))
        })
        .collect();
    let description = draft.description.trim();

    Ok(Task {
        id: editing.map(|e| e.id).unwrap_or_default(),
        title: title.to_string(),
        description: (!description.is_empty()).then(|| description.to_string()),
        status: Some(column.name.clone()),
        subtasks: (!subtasks.is_empty()).then_some(subtasks),
    })
}

/// "N of M subtasks"
pub fn subtask_summary(task: &Task) -> String {
    let (done, total) = task.subtask_progress();
    let noun = if total == 1 { "subtask" } else { "subtasks" };
    format!("{} of {} {}", done, total, noun)
}

fn cleaned(names: &[String]) -> Vec<String> {
    names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .collect()
}
