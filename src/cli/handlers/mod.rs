use std::path::Path;
use std::rc::Rc;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::paths;
use crate::io::persistence::Persistence;
use crate::io::storage::FileStore;
use crate::model::board::{Board, Task};
use crate::model::defaults;
use crate::model::session::{Session, ThemeName, User};
use crate::ops::board_ops::{self, TaskDraft, ValidationError};
use crate::ops::dnd::{self, ColumnHandle, TaskHandle};
use crate::ops::{Command, Store};

/// User-facing CLI failures
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("board not found: {0}")]
    UnknownBoard(String),
    #[error("board '{board}' has no column named '{column}'")]
    UnknownColumn { board: String, column: String },
    #[error("task not found: {0}")]
    UnknownTask(String),
    #[error("task '{task}' has no subtask named '{subtask}'")]
    UnknownSubtask { task: String, subtask: String },
    #[error("board '{0}' has no columns (add one with `kb add-column`)")]
    NoColumns(String),
    #[error("unknown theme '{0}' (expected light or dark)")]
    UnknownTheme(String),
    #[error("no subcommand given (try `kb --help`)")]
    NoCommand,
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Storage and store for one invocation. Every state change is saved.
struct Workspace {
    data_dir: std::path::PathBuf,
    persistence: Rc<Persistence>,
    store: Store,
}

impl Workspace {
    fn open(data_dir: &Path) -> Self {
        log::debug!("opening {}", data_dir.display());
        let persistence = Rc::new(Persistence::new(FileStore::new(data_dir)));
        let mut store = Store::new(persistence.load_boards_or_default());
        let saver = Rc::clone(&persistence);
        store.subscribe(move |state| saver.save_boards(state));
        Workspace {
            data_dir: data_dir.to_path_buf(),
            persistence,
            store,
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let json = cli.json;
    let data_dir = paths::resolve_data_dir(cli.data_dir.as_deref());
    let Some(cmd) = cli.command else {
        return Err(CliError::NoCommand.into());
    };
    let mut ws = Workspace::open(&data_dir);

    match cmd {
        // Read commands
        Commands::Boards => cmd_boards(&ws, json),
        Commands::Show(args) => cmd_show(&ws, args, json),
        Commands::Whoami => cmd_whoami(&ws, json),

        // Write commands
        Commands::AddBoard(args) => cmd_add_board(&mut ws, args),
        Commands::EditBoard(args) => cmd_edit_board(&mut ws, args),
        Commands::DeleteBoard(args) => cmd_delete_board(&mut ws, args),
        Commands::AddColumn(args) => cmd_add_column(&mut ws, args),
        Commands::AddTask(args) => cmd_add_task(&mut ws, args),
        Commands::EditTask(args) => cmd_edit_task(&mut ws, args),
        Commands::DeleteTask(args) => cmd_delete_task(&mut ws, args),
        Commands::Mv(args) => cmd_mv(&mut ws, args),
        Commands::Toggle(args) => cmd_toggle(&mut ws, args),
        Commands::Reset => cmd_reset(&mut ws),

        // Session
        Commands::Login(args) => cmd_login(&ws, args),
        Commands::Logout => cmd_logout(&ws),
        Commands::Theme(args) => cmd_theme(&ws, args),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Resolve a 1-based position or a board name (exact, then case-insensitive)
fn resolve_board<'a>(store: &'a Store, selector: &str) -> Result<(usize, &'a Board), CliError> {
    let boards = store.boards();
    let wanted = selector.trim();
    if let Ok(pos) = wanted.parse::<usize>()
        && (1..=boards.len()).contains(&pos)
    {
        return Ok((pos - 1, &boards[pos - 1]));
    }
    boards
        .iter()
        .position(|b| b.name == wanted)
        .or_else(|| boards.iter().position(|b| b.name.eq_ignore_ascii_case(wanted)))
        .map(|i| (i, &boards[i]))
        .ok_or_else(|| CliError::UnknownBoard(selector.to_string()))
}

fn unknown_column(board: &Board, column: &str) -> CliError {
    CliError::UnknownColumn {
        board: board.name.clone(),
        column: column.to_string(),
    }
}

/// A task located by title, optionally within one column
struct FoundTask {
    board_index: usize,
    column: String,
    task: Task,
}

impl FoundTask {
    fn handle(&self) -> TaskHandle {
        TaskHandle {
            board_index: self.board_index,
            column: self.column.clone(),
            task_title: self.task.title.clone(),
            task_id: self.task.id,
        }
    }
}

fn resolve_task(store: &Store, target: &TaskArg) -> Result<FoundTask, CliError> {
    let (board_index, board) = resolve_board(store, &target.board)?;
    if let Some(name) = &target.column
        && board.column(name).is_none()
    {
        return Err(unknown_column(board, name));
    }
    board
        .columns
        .iter()
        .filter(|c| target.column.as_ref().is_none_or(|name| *name == c.name))
        .find_map(|c| {
            c.task(&target.task).map(|t| FoundTask {
                board_index,
                column: c.name.clone(),
                task: t.clone(),
            })
        })
        .ok_or_else(|| CliError::UnknownTask(target.task.clone()))
}

fn plural(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{} {}", n, noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

/// Stored theme, then the config file's, then light
fn current_theme(ws: &Workspace) -> ThemeName {
    ws.persistence.load_theme().unwrap_or_else(|| {
        match config_io::read_config(&ws.data_dir) {
            Ok(config) => config.ui.theme.unwrap_or_default(),
            Err(e) => {
                log::warn!("{}", e);
                ThemeName::default()
            }
        }
    })
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_boards(ws: &Workspace, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let boards = ws.store.boards();
    if json {
        let infos: Vec<BoardSummaryJson> = boards
            .iter()
            .enumerate()
            .map(|(i, b)| board_summary_to_json(i, b))
            .collect();
        println!("{}", serde_json::to_string_pretty(&infos)?);
        return Ok(());
    }

    if boards.is_empty() {
        println!("No boards yet. Create one with `kb add-board`.");
        return Ok(());
    }
    let name_width = boards.iter().map(|b| b.name.chars().count()).max().unwrap_or(0);
    for (i, board) in boards.iter().enumerate() {
        println!(
            "{:>2}  {:<width$}  {}, {}",
            i + 1,
            board.name,
            plural(board.columns.len(), "column"),
            plural(board.task_count(), "task"),
            width = name_width
        );
    }
    Ok(())
}

fn cmd_show(ws: &Workspace, args: ShowArgs, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let selector = args.board.as_deref().unwrap_or("1");
    let (index, board) = resolve_board(&ws.store, selector)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&board_to_json(index, board))?);
        return Ok(());
    }

    println!("{}", board.name);
    if board.columns.is_empty() {
        println!("  (no columns)");
    }
    for column in &board.columns {
        println!("  {} ({})", column.name, column.tasks.len());
        for task in &column.tasks {
            if task.subtasks().is_empty() {
                println!("    - {}", task.title);
            } else {
                println!(
                    "    - {}  [{}]",
                    task.title,
                    board_ops::subtask_summary(task)
                );
            }
            if args.subtasks {
                for sub in task.subtasks() {
                    let mark = if sub.is_completed { 'x' } else { ' ' };
                    println!("        [{}] {}", mark, sub.title);
                }
            }
        }
    }
    Ok(())
}

fn cmd_whoami(ws: &Workspace, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = ws.persistence.load_auth();
    let theme = current_theme(ws);
    let user = session.current_user();

    if json {
        let info = WhoamiJson {
            logged_in: user.is_some(),
            user: user.map(user_to_json),
            theme: theme.to_string(),
        };
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    match user {
        Some(user) => println!("{} <{}>", user.name, user.email),
        None => println!("Not logged in"),
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_add_board(ws: &mut Workspace, args: AddBoardArgs) -> Result<(), Box<dyn std::error::Error>> {
    let columns = board_ops::parse_list(&args.columns);
    let board = board_ops::new_board(&args.name, &columns).map_err(CliError::from)?;
    let name = board.name.clone();
    ws.store.dispatch(Command::AddBoard { board });
    println!("Board created: {} ({})", name, ws.store.boards().len());
    Ok(())
}

fn cmd_edit_board(ws: &mut Workspace, args: EditBoardArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (board_index, original) = resolve_board(&ws.store, &args.target.board)?;
    let columns = match &args.columns {
        Some(list) => board_ops::parse_list(list),
        None => original.columns.iter().map(|c| c.name.clone()).collect(),
    };
    let board = board_ops::edit_board(original, args.name.as_deref().unwrap_or(""), &columns);
    let name = board.name.clone();
    ws.store.dispatch(Command::UpdateBoard { board_index, board });
    println!("Board updated: {}", name);
    Ok(())
}

fn cmd_delete_board(ws: &mut Workspace, args: BoardArg) -> Result<(), Box<dyn std::error::Error>> {
    let (board_index, board) = resolve_board(&ws.store, &args.board)?;
    let name = board.name.clone();
    ws.store.dispatch(Command::DeleteBoard { board_index });
    println!("Board deleted: {}", name);
    Ok(())
}

fn cmd_add_column(ws: &mut Workspace, args: AddColumnArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (board_index, _) = resolve_board(&ws.store, &args.target.board)?;
    let column_name = board_ops::column_name(&args.name).map_err(CliError::from)?;
    ws.store.dispatch(Command::AddColumn {
        board_index,
        column_name: column_name.clone(),
    });
    println!("Column added: {}", column_name);
    Ok(())
}

fn cmd_add_task(ws: &mut Workspace, args: AddTaskArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (board_index, board) = resolve_board(&ws.store, &args.target.board)?;
    let status = match args.column {
        Some(column) => column,
        None => board
            .columns
            .first()
            .map(|c| c.name.clone())
            .ok_or_else(|| CliError::NoColumns(board.name.clone()))?,
    };
    let draft = TaskDraft {
        title: args.title,
        description: args.description.unwrap_or_default(),
        subtasks: args.subtasks,
        status,
    };
    let task = board_ops::build_task(board, &draft, None).map_err(CliError::from)?;
    let column_name = task.status.clone().unwrap_or_default();
    let title = task.title.clone();
    ws.store.dispatch(Command::AddTask {
        board_index,
        column_name: column_name.clone(),
        task,
    });
    println!("Task created: {} in {}", title, column_name);
    Ok(())
}

fn cmd_edit_task(ws: &mut Workspace, args: EditTaskArgs) -> Result<(), Box<dyn std::error::Error>> {
    let found = resolve_task(&ws.store, &args.target)?;
    let (_, board) = resolve_board(&ws.store, &args.target.board)?;

    let mut draft = TaskDraft::from_task(&found.task, &found.column);
    if let Some(title) = args.title {
        draft.title = title;
    }
    if let Some(description) = args.description {
        draft.description = description;
    }
    if args.clear_subtasks {
        draft.subtasks.clear();
    } else if !args.subtasks.is_empty() {
        draft.subtasks = args.subtasks;
    }
    if let Some(status) = args.status {
        draft.status = status;
    }

    let task = board_ops::build_task(board, &draft, Some(&found.task)).map_err(CliError::from)?;
    let to_column = task.status.clone().unwrap_or_default();
    let new_title = task.title.clone();
    ws.store.dispatch(Command::UpdateTask {
        board_index: found.board_index,
        column_name: found.column.clone(),
        task_title: found.task.title.clone(),
        task,
    });
    if to_column != found.column {
        ws.store.dispatch(Command::MoveTask {
            board_index: found.board_index,
            from_column: found.column.clone(),
            to_column: to_column.clone(),
            task_title: new_title.clone(),
        });
        println!("Task updated: {} (moved to {})", new_title, to_column);
    } else {
        println!("Task updated: {}", new_title);
    }
    Ok(())
}

fn cmd_delete_task(ws: &mut Workspace, args: TaskArg) -> Result<(), Box<dyn std::error::Error>> {
    let found = resolve_task(&ws.store, &args)?;
    ws.store.dispatch(Command::DeleteTask {
        board_index: found.board_index,
        column_name: found.column,
        task_title: found.task.title.clone(),
    });
    println!("Task deleted: {}", found.task.title);
    Ok(())
}

fn cmd_mv(ws: &mut Workspace, args: MvArgs) -> Result<(), Box<dyn std::error::Error>> {
    let found = resolve_task(&ws.store, &args.target)?;
    let (_, board) = resolve_board(&ws.store, &args.target.board)?;
    let target = board
        .column(args.to.trim())
        .map(|c| ColumnHandle {
            board_index: found.board_index,
            column: c.name.clone(),
        })
        .ok_or_else(|| unknown_column(board, args.to.trim()))?;

    match dnd::resolve_drop(&found.handle(), &target) {
        Some(command) => {
            ws.store.dispatch(command);
            println!("Task moved: {} → {}", found.task.title, target.column);
        }
        None => println!("{} is already in {}", found.task.title, target.column),
    }
    Ok(())
}

fn cmd_toggle(ws: &mut Workspace, args: ToggleArgs) -> Result<(), Box<dyn std::error::Error>> {
    let found = resolve_task(&ws.store, &args.target)?;
    let subtask = found
        .task
        .subtasks()
        .iter()
        .find(|s| s.title == args.subtask)
        .ok_or_else(|| CliError::UnknownSubtask {
            task: found.task.title.clone(),
            subtask: args.subtask.clone(),
        })?;
    let now_completed = !subtask.is_completed;

    ws.store.dispatch(Command::ToggleSubtask {
        board_index: found.board_index,
        column_name: found.column.clone(),
        task_title: found.task.title.clone(),
        subtask_title: args.subtask.clone(),
    });
    let mark = if now_completed { 'x' } else { ' ' };
    println!("[{}] {}", mark, args.subtask);
    Ok(())
}

fn cmd_reset(ws: &mut Workspace) -> Result<(), Box<dyn std::error::Error>> {
    ws.store.dispatch(Command::SetBoards {
        boards: defaults::default_boards(),
    });
    println!(
        "Boards reset to the sample dataset ({})",
        plural(ws.store.boards().len(), "board")
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Session commands
// ---------------------------------------------------------------------------

fn cmd_login(ws: &Workspace, args: LoginArgs) -> Result<(), Box<dyn std::error::Error>> {
    let user = User {
        id: User::demo().id,
        name: args.name.trim().to_string(),
        email: args.email.trim().to_string(),
    };
    println!("Logged in as {} <{}>", user.name, user.email);
    ws.persistence.save_auth(&Session::logged_in(user));
    Ok(())
}

fn cmd_logout(ws: &Workspace) -> Result<(), Box<dyn std::error::Error>> {
    ws.persistence.save_auth(&Session::default());
    println!("Logged out");
    Ok(())
}

fn cmd_theme(ws: &Workspace, args: ThemeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let theme = match args.theme {
        Some(name) => ThemeName::parse(&name).ok_or(CliError::UnknownTheme(name))?,
        None => current_theme(ws).toggled(),
    };
    ws.persistence.save_theme(theme);
    println!("Theme: {}", theme);
    Ok(())
}
