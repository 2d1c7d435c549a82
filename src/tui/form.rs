//! Modal form state: a list of single-line text fields with a cursor.

use crate::model::board::{Board, Task};
use crate::ops::board_ops::TaskDraft;
use crate::ops::dnd::TaskHandle;
use crate::util::unicode::{next_grapheme_boundary, prev_grapheme_boundary};

/// A single-line text buffer with a byte-offset cursor on grapheme boundaries
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    pub text: String,
    pub cursor: usize,
}

impl TextInput {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        TextInput { text, cursor }
    }

    pub fn insert_char(&mut self, c: char) {
        self.text.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    /// Insert pasted text; newlines become spaces
    pub fn insert_str(&mut self, s: &str) {
        let clean = s.replace(['\r', '\n'], " ");
        self.text.insert_str(self.cursor, &clean);
        self.cursor += clean.len();
    }

    pub fn backspace(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(prev..self.cursor, "");
            self.cursor = prev;
        }
    }

    pub fn delete(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.text, self.cursor) {
            self.text.replace_range(self.cursor..next, "");
        }
    }

    pub fn left(&mut self) {
        if let Some(prev) = prev_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = prev;
        }
    }

    pub fn right(&mut self) {
        if let Some(next) = next_grapheme_boundary(&self.text, self.cursor) {
            self.cursor = next;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.text.len();
    }

    /// Ctrl-U: clear everything before the cursor
    pub fn clear_to_start(&mut self) {
        self.text.replace_range(..self.cursor, "");
        self.cursor = 0;
    }
}

/// What submitting the form does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    AddBoard,
    EditBoard { board_index: usize },
    AddColumn { board_index: usize },
    AddTask { board_index: usize },
    EditTask { task: TaskHandle },
}

impl FormKind {
    pub fn title(&self) -> &'static str {
        match self {
            FormKind::AddBoard => "Add New Board",
            FormKind::EditBoard { .. } => "Edit Board",
            FormKind::AddColumn { .. } => "Add New Column",
            FormKind::AddTask { .. } => "Add New Task",
            FormKind::EditTask { .. } => "Edit Task",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            FormKind::AddBoard => "Create New Board",
            FormKind::AddColumn { .. } => "Add Column",
            FormKind::AddTask { .. } => "Create Task",
            FormKind::EditBoard { .. } | FormKind::EditTask { .. } => "Save Changes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: &'static str,
    pub hint: &'static str,
    pub input: TextInput,
}

impl Field {
    fn new(label: &'static str, hint: &'static str, value: impl Into<String>) -> Self {
        Field {
            label,
            hint,
            input: TextInput::new(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub kind: FormKind,
    pub fields: Vec<Field>,
    pub focused: usize,
    /// Last validation failure, shown under the fields
    pub error: Option<String>,
}

impl FormState {
    fn new(kind: FormKind, fields: Vec<Field>) -> Self {
        FormState {
            kind,
            fields,
            focused: 0,
            error: None,
        }
    }

    pub fn add_board() -> Self {
        FormState::new(
            FormKind::AddBoard,
            vec![
                Field::new("Name", "e.g. Web Design", ""),
                Field::new("Columns", "comma-separated", "Todo, Doing"),
            ],
        )
    }

    pub fn edit_board(board_index: usize, board: &Board) -> Self {
        FormState::new(
            FormKind::EditBoard { board_index },
            vec![
                Field::new("Name", "", board.name.clone()),
                Field::new("Columns", "comma-separated", board.column_names().join(", ")),
            ],
        )
    }

    pub fn add_column(board_index: usize) -> Self {
        FormState::new(
            FormKind::AddColumn { board_index },
            vec![Field::new("Name", "e.g. Review", "")],
        )
    }

    /// `status` pre-fills the target column (usually the focused one)
    pub fn add_task(board_index: usize, status: &str) -> Self {
        FormState::new(
            FormKind::AddTask { board_index },
            task_fields(&TaskDraft {
                status: status.to_string(),
                ..TaskDraft::default()
            }),
        )
    }

    pub fn edit_task(handle: TaskHandle, task: &Task) -> Self {
        let draft = TaskDraft::from_task(task, &handle.column);
        FormState::new(FormKind::EditTask { task: handle }, task_fields(&draft))
    }

    pub fn value(&self, index: usize) -> &str {
        self.fields
            .get(index)
            .map(|f| f.input.text.as_str())
            .unwrap_or("")
    }

    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        self.fields.get_mut(self.focused).map(|f| &mut f.input)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focused = (self.focused + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Task forms only: the draft described by the current field values
    pub fn task_draft(&self) -> TaskDraft {
        TaskDraft {
            title: self.value(0).to_string(),
            description: self.value(1).to_string(),
            subtasks: crate::ops::board_ops::parse_list(self.value(2)),
            status: self.value(3).to_string(),
        }
    }
}

fn task_fields(draft: &TaskDraft) -> Vec<Field> {
    vec![
        Field::new("Title", "e.g. Take coffee break", draft.title.clone()),
        Field::new("Description", "optional", draft.description.clone()),
        Field::new("Subtasks", "comma-separated", draft.subtasks.join(", ")),
        Field::new("Status", "column name", draft.status.clone()),
    ]
}
