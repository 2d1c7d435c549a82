use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kb", about = concat!("▦ kanban v", env!("CARGO_PKG_VERSION"), " - boards, columns and tasks in your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Storage directory (defaults to $KANBAN_DIR, then the platform data dir)
    #[arg(short = 'd', long = "data-dir", global = true)]
    pub data_dir: Option<String>,

    /// Run the board view on in-memory storage seeded with the sample boards
    #[arg(long)]
    pub ephemeral: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List boards
    Boards,
    /// Show a board's columns and tasks
    Show(ShowArgs),
    /// Create a board
    AddBoard(AddBoardArgs),
    /// Rename a board or change its columns
    EditBoard(EditBoardArgs),
    /// Delete a board and everything in it
    DeleteBoard(BoardArg),
    /// Append a column to a board
    AddColumn(AddColumnArgs),
    /// Create a task
    AddTask(AddTaskArgs),
    /// Change a task's title, description, subtasks or status
    EditTask(EditTaskArgs),
    /// Delete a task
    DeleteTask(TaskArg),
    /// Move a task to another column
    Mv(MvArgs),
    /// Toggle a subtask's completion
    Toggle(ToggleArgs),
    /// Sign in (mock)
    Login(LoginArgs),
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Set or toggle the color theme
    Theme(ThemeArgs),
    /// Replace all boards with the sample dataset
    Reset,
}

// ---------------------------------------------------------------------------
// Shared selectors
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct BoardArg {
    /// Board position (1-based, as listed by `kb boards`) or name
    pub board: String,
}

#[derive(Args)]
pub struct TaskArg {
    /// Board position or name
    pub board: String,
    /// Task title
    pub task: String,
    /// Only look for the task in this column
    #[arg(long)]
    pub column: Option<String>,
}

// ---------------------------------------------------------------------------
// Read command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ShowArgs {
    /// Board position or name (defaults to the first board)
    pub board: Option<String>,
    /// Also list each task's subtasks
    #[arg(short, long)]
    pub subtasks: bool,
}

// ---------------------------------------------------------------------------
// Write command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddBoardArgs {
    /// Board name
    pub name: String,
    /// Comma-separated column names
    #[arg(long, default_value = "Todo, Doing")]
    pub columns: String,
}

#[derive(Args)]
pub struct EditBoardArgs {
    #[command(flatten)]
    pub target: BoardArg,
    /// New board name
    #[arg(long)]
    pub name: Option<String>,
    /// Comma-separated column names; existing columns keep their tasks
    #[arg(long)]
    pub columns: Option<String>,
}

#[derive(Args)]
pub struct AddColumnArgs {
    #[command(flatten)]
    pub target: BoardArg,
    /// Column name
    pub name: String,
}

#[derive(Args)]
pub struct AddTaskArgs {
    #[command(flatten)]
    pub target: BoardArg,
    /// Task title
    pub title: String,
    /// Column to add the task to (defaults to the first column)
    #[arg(long)]
    pub column: Option<String>,
    /// Task description
    #[arg(long)]
    pub description: Option<String>,
    /// Subtask title (repeatable)
    #[arg(long = "subtask")]
    pub subtasks: Vec<String>,
}

#[derive(Args)]
pub struct EditTaskArgs {
    #[command(flatten)]
    pub target: TaskArg,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// New description (empty to clear)
    #[arg(long)]
    pub description: Option<String>,
    /// Replace subtasks with these titles (repeatable); matching titles keep completion
    #[arg(long = "subtask")]
    pub subtasks: Vec<String>,
    /// Remove all subtasks
    #[arg(long, conflicts_with = "subtasks")]
    pub clear_subtasks: bool,
    /// Column to move the task to
    #[arg(long)]
    pub status: Option<String>,
}

#[derive(Args)]
pub struct MvArgs {
    #[command(flatten)]
    pub target: TaskArg,
    /// Destination column
    pub to: String,
}

#[derive(Args)]
pub struct ToggleArgs {
    #[command(flatten)]
    pub target: TaskArg,
    /// Subtask title
    pub subtask: String,
}

#[derive(Args)]
pub struct LoginArgs {
    /// Display name
    #[arg(long, default_value = "Demo User")]
    pub name: String,
    /// Email address
    #[arg(long, default_value = "demo@example.com")]
    pub email: String,
}

#[derive(Args)]
pub struct ThemeArgs {
    /// `light` or `dark`; toggles when omitted
    pub theme: Option<String>,
}
