use serde::{Deserialize, Serialize};

/// Stable identity for a board, column, task, or subtask.
///
/// `0` means "unassigned". Ids are handed out by the reducer from
/// [`BoardsState::next_id`], so they are deterministic for a given history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl EntityId {
    pub const UNASSIGNED: EntityId = EntityId(0);

    pub fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

fn is_unassigned(id: &EntityId) -> bool {
    !id.is_assigned()
}

/// A completable checklist item owned by a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub is_completed: bool,
}

impl Subtask {
    pub fn new(title: impl Into<String>) -> Self {
        Subtask {
            id: EntityId::UNASSIGNED,
            title: title.into(),
            is_completed: false,
        }
    }
}

/// A unit of work inside a column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub id: EntityId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Mirrors the containing column's name after a move
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<Subtask>>,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Task {
            id: EntityId::UNASSIGNED,
            title: title.into(),
            description: None,
            status: None,
            subtasks: None,
        }
    }

    /// Subtasks as a slice (empty when the task has none)
    pub fn subtasks(&self) -> &[Subtask] {
        self.subtasks.as_deref().unwrap_or(&[])
    }

    /// (completed, total) subtask counts
    pub fn subtask_progress(&self) -> (usize, usize) {
        let subs = self.subtasks();
        (subs.iter().filter(|s| s.is_completed).count(), subs.len())
    }
}

/// A named, ordered list of tasks. The name doubles as a status label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Column {
            id: EntityId::UNASSIGNED,
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    /// First task whose title matches
    pub fn task(&self, title: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.title == title)
    }
}

/// A named collection of ordered columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default, skip_serializing_if = "is_unassigned")]
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl Board {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Board {
            id: EntityId::UNASSIGNED,
            name: name.into(),
            columns,
        }
    }

    /// First column whose name matches
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn task_count(&self) -> usize {
        self.columns.iter().map(|c| c.tasks.len()).sum()
    }

    /// (column index, row) of the task with this id
    pub fn locate_task(&self, id: EntityId) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(ci, column)| {
            column
                .tasks
                .iter()
                .position(|t| t.id == id)
                .map(|row| (ci, row))
        })
    }
}

/// The single root of truth for all boards.
///
/// Board identity for commands is the position in `boards`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardsState {
    pub boards: Vec<Board>,
    /// Next id to hand out; always greater than every assigned id in `boards`
    #[serde(default)]
    pub next_id: u64,
}

impl BoardsState {
    pub fn new(boards: Vec<Board>) -> Self {
        let mut state = BoardsState { boards, next_id: 1 };
        state.assign_ids();
        state
    }

    pub fn board(&self, index: usize) -> Option<&Board> {
        self.boards.get(index)
    }

    /// Give every unassigned entity a fresh id, and move `next_id` past any
    /// ids already present.
    ///
    /// If the id space would run out (e.g. a stored id of `u64::MAX`), every
    /// entity is renumbered from 1 instead.
    pub fn assign_ids(&mut self) {
        let start = self
            .max_id()
            .checked_add(1)
            .map(|after_max| self.next_id.max(after_max).max(1));
        let fits = start.and_then(|start| start.checked_add(self.unassigned_count()));
        let mut next = match (start, fits) {
            (Some(start), Some(_)) => start,
            _ => {
                log::warn!("entity ids exhausted, renumbering");
                self.clear_ids();
                1
            }
        };
        for board in &mut self.boards {
            assign_board_ids(board, &mut next);
        }
        self.next_id = next;
    }

    fn unassigned_count(&self) -> u64 {
        let mut count = 0;
        for board in &self.boards {
            count += u64::from(!board.id.is_assigned());
            for column in &board.columns {
                count += u64::from(!column.id.is_assigned());
                for task in &column.tasks {
                    count += u64::from(!task.id.is_assigned());
                    for sub in task.subtasks() {
                        count += u64::from(!sub.id.is_assigned());
                    }
                }
            }
        }
        count
    }

    fn clear_ids(&mut self) {
        for board in &mut self.boards {
            board.id = EntityId::UNASSIGNED;
            for column in &mut board.columns {
                column.id = EntityId::UNASSIGNED;
                for task in &mut column.tasks {
                    task.id = EntityId::UNASSIGNED;
                    for sub in task.subtasks.iter_mut().flatten() {
                        sub.id = EntityId::UNASSIGNED;
                    }
                }
            }
        }
    }

    fn max_id(&self) -> u64 {
        let mut max = 0;
        for board in &self.boards {
            max = max.max(board.id.0);
            for column in &board.columns {
                max = max.max(column.id.0);
                for task in &column.tasks {
                    max = max.max(task.id.0);
                    for sub in task.subtasks() {
                        max = max.max(sub.id.0);
                    }
                }
            }
        }
        max
    }
}

fn take_id(id: &mut EntityId, next: &mut u64) {
    if !id.is_assigned() {
        *id = EntityId(*next);
        *next += 1;
    }
}

fn assign_board_ids(board: &mut Board, next: &mut u64) {
    take_id(&mut board.id, next);
    for column in &mut board.columns {
        take_id(&mut column.id, next);
        for task in &mut column.tasks {
            assign_task_ids(task, next);
        }
    }
}

fn assign_task_ids(task: &mut Task, next: &mut u64) {
    take_id(&mut task.id, next);
    if let Some(subs) = &mut task.subtasks {
        for sub in subs {
            take_id(&mut sub.id, next);
        }
    }
}
