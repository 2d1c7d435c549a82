use std::io;
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io::read_config;
use crate::io::logging;
use crate::io::persistence::Persistence;
use crate::io::state::ViewState;
use crate::io::storage::{FileStore, MemoryStore};
use crate::model::board::{Board, Task};
use crate::model::config::Config;
use crate::model::session::{Session, User};
use crate::ops::Command;
use crate::ops::board_ops::{self, ValidationError};
use crate::ops::dnd::{self, Direction, DragGesture, TaskHandle};
use crate::ops::store::Store;
use crate::ops::ui_state::{ToastFactory, ToastKind, UiCommand, UiState};

use super::form::{FormKind, FormState};
use super::hitmap::HitMap;
use super::input;
use super::render;
use super::theme::Theme;

const BOARDS_LOADING_KEY: &str = "boards";

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Mock sign-in screen
    Login,
    Navigate,
    /// Task details popup
    Detail,
    /// Add/edit modal
    Form,
    Confirm,
}

/// Focused card position on the current board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Focus {
    pub column: usize,
    pub row: usize,
}

/// Task details popup state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailState {
    pub task: TaskHandle,
    /// Selected subtask row
    pub cursor: usize,
}

/// Pending destructive action awaiting y/n
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteBoard { board_index: usize },
    DeleteTask { task: TaskHandle },
}

/// Main application state
pub struct App {
    pub store: Store,
    pub persistence: Rc<Persistence>,
    pub config: Config,
    pub session: Session,
    pub theme: Theme,
    pub mode: Mode,
    pub should_quit: bool,
    /// Help overlay visible
    pub show_help: bool,
    pub board_index: usize,
    pub focus: Focus,
    pub ui: UiState,
    pub toast_factory: ToastFactory,
    pub drag: DragGesture,
    /// Regions from the last frame, for mouse lookups
    pub hits: HitMap,
    pub detail_state: Option<DetailState>,
    pub form_state: Option<FormState>,
    pub confirm_state: Option<ConfirmAction>,
}

impl App {
    pub fn new(persistence: Persistence, config: Config) -> Self {
        let persistence = Rc::new(persistence);
        let mut ui = UiState::default();

        ui.reduce(UiCommand::StartLoading(BOARDS_LOADING_KEY.into()));
        let mut store = Store::new(persistence.load_boards_or_default());
        ui.reduce(UiCommand::StopLoading(BOARDS_LOADING_KEY.into()));

        let saver = Rc::clone(&persistence);
        store.subscribe(move |state| saver.save_boards(state));

        let session = persistence.load_auth();
        let theme_name = persistence
            .load_theme()
            .or(config.ui.theme)
            .unwrap_or_default();
        let theme = Theme::from_config(theme_name, &config.ui);
        let view = persistence
            .load_view_state()
            .map(|v| v.clamped(store.boards().len()))
            .unwrap_or_default();
        let mode = if session.current_user().is_some() {
            Mode::Navigate
        } else {
            Mode::Login
        };

        let mut app = App {
            store,
            persistence,
            toast_factory: ToastFactory::new(Duration::from_millis(config.toast.dismiss_ms)),
            drag: DragGesture::new(config.drag.threshold),
            config,
            session,
            theme,
            mode,
            should_quit: false,
            show_help: false,
            board_index: view.board_index,
            focus: Focus {
                column: view.column,
                row: view.row,
            },
            ui,
            hits: HitMap::default(),
            detail_state: None,
            form_state: None,
            confirm_state: None,
        };
        app.clamp_focus();
        app
    }

    // -----------------------------------------------------------------------
    // Lookups
    // -----------------------------------------------------------------------

    pub fn board(&self) -> Option<&Board> {
        self.store.board(self.board_index)
    }

    pub fn user(&self) -> Option<&User> {
        self.session.current_user()
    }

    /// Handle for the card at (column, row) on the current board
    pub fn handle_at(&self, column: usize, row: usize) -> Option<TaskHandle> {
        let col = self.board()?.columns.get(column)?;
        let task = col.tasks.get(row)?;
        Some(TaskHandle {
            board_index: self.board_index,
            column: col.name.clone(),
            task_title: task.title.clone(),
            task_id: task.id,
        })
    }

    pub fn focused_handle(&self) -> Option<TaskHandle> {
        self.handle_at(self.focus.column, self.focus.row)
    }

    /// Current version of the task a handle points at. Prefers the id, so a
    /// handle survives renames and moves.
    pub fn task_for(&self, handle: &TaskHandle) -> Option<(usize, usize, &Task)> {
        let board = self.store.board(handle.board_index)?;
        let (ci, row) = board.locate_task(handle.task_id).or_else(|| {
            let ci = board.columns.iter().position(|c| c.name == handle.column)?;
            let row = board.columns[ci]
                .tasks
                .iter()
                .position(|t| t.title == handle.task_title)?;
            Some((ci, row))
        })?;
        Some((ci, row, &board.columns[ci].tasks[row]))
    }

    pub fn detail_task(&self) -> Option<&Task> {
        let ds = self.detail_state.as_ref()?;
        self.task_for(&ds.task).map(|(_, _, t)| t)
    }

    // -----------------------------------------------------------------------
    // Focus and board selection
    // -----------------------------------------------------------------------

    /// Keep the board index and focus inside the current data
    pub fn clamp_focus(&mut self) {
        let board_count = self.store.boards().len();
        if self.board_index >= board_count {
            self.board_index = board_count.saturating_sub(1);
        }
        let (columns, rows) = match self.board() {
            Some(board) => {
                let column = self.focus.column.min(board.columns.len().saturating_sub(1));
                let rows = board.columns.get(column).map_or(0, |c| c.tasks.len());
                (board.columns.len(), rows)
            }
            None => (0, 0),
        };
        self.focus.column = self.focus.column.min(columns.saturating_sub(1));
        self.focus.row = self.focus.row.min(rows.saturating_sub(1));
    }

    pub fn select_board(&mut self, index: usize) {
        if index < self.store.boards().len() && index != self.board_index {
            self.board_index = index;
            self.focus = Focus::default();
            self.drag.cancel();
        }
    }

    pub fn next_board(&mut self) {
        let count = self.store.boards().len();
        if count > 0 {
            self.select_board((self.board_index + 1) % count);
        }
    }

    pub fn prev_board(&mut self) {
        let count = self.store.boards().len();
        if count > 0 {
            self.select_board((self.board_index + count - 1) % count);
        }
    }

    pub fn focus_column(&mut self, column: usize) {
        self.focus.column = column;
        self.clamp_focus();
    }

    /// Focus the last card of a column by name (where moved/added tasks land)
    fn focus_last_in(&mut self, column_name: &str) {
        let Some(board) = self.board() else {
            return;
        };
        if let Some(ci) = board.columns.iter().position(|c| c.name == column_name) {
            self.focus = Focus {
                column: ci,
                row: board.columns[ci].tasks.len().saturating_sub(1),
            };
        }
    }

    // -----------------------------------------------------------------------
    // Toasts
    // -----------------------------------------------------------------------

    pub fn toast(&mut self, kind: ToastKind, message: impl Into<String>) {
        let toast = self.toast_factory.make(kind, message, Instant::now());
        self.ui.reduce(UiCommand::ShowToast(toast));
    }

    /// Dismiss toasts whose deadline has passed
    pub fn tick(&mut self, now: Instant) {
        for command in self.ui.expired(now) {
            self.ui.reduce(command);
        }
    }

    /// Manual dismiss of the oldest toast. Returns false when none are showing.
    pub fn dismiss_toast(&mut self) -> bool {
        match self.ui.toasts.first() {
            Some(toast) => {
                let id = toast.id;
                self.ui.reduce(UiCommand::DismissToast(id));
                true
            }
            None => false,
        }
    }

    // -----------------------------------------------------------------------
    // Task moves (keyboard and drop)
    // -----------------------------------------------------------------------

    /// H/L: move the focused card one column over
    pub fn move_focused(&mut self, direction: Direction) {
        let Some(source) = self.focused_handle() else {
            return;
        };
        let command = self
            .board()
            .and_then(|board| dnd::move_to_adjacent(board, &source, direction));
        if let Some(command) = command {
            self.apply_move(command);
        }
    }

    /// "Move to next column" from the details popup
    pub fn move_detail_task(&mut self) {
        let Some(ds) = &self.detail_state else {
            return;
        };
        let Some((ci, _, task)) = self.task_for(&ds.task) else {
            return;
        };
        let Some(board) = self.store.board(ds.task.board_index) else {
            return;
        };
        let source = TaskHandle {
            board_index: ds.task.board_index,
            column: board.columns[ci].name.clone(),
            task_title: task.title.clone(),
            task_id: task.id,
        };
        if let Some(command) = dnd::move_to_adjacent(board, &source, Direction::Next) {
            self.apply_move(command);
            self.refresh_detail();
        }
    }

    /// Dispatch a resolved `MoveTask` and follow the card with focus
    pub fn apply_move(&mut self, command: Command) {
        let Command::MoveTask { to_column, .. } = &command else {
            return;
        };
        let to_column = to_column.clone();
        let before = self.store.snapshot();
        self.store.dispatch(command);
        if !std::sync::Arc::ptr_eq(&before, &self.store.snapshot()) {
            self.focus_last_in(&to_column);
            self.toast(ToastKind::Success, "Task moved");
        }
    }

    // -----------------------------------------------------------------------
    // Details popup
    // -----------------------------------------------------------------------

    pub fn open_detail(&mut self, handle: TaskHandle) {
        if let Some((ci, row, _)) = self.task_for(&handle) {
            self.focus = Focus { column: ci, row };
        }
        self.detail_state = Some(DetailState {
            task: handle,
            cursor: 0,
        });
        self.mode = Mode::Detail;
    }

    pub fn close_detail(&mut self) {
        self.detail_state = None;
        self.mode = Mode::Navigate;
        self.clamp_focus();
    }

    /// Re-point the open details popup at the task's current column/title,
    /// or close it if the task is gone.
    pub fn refresh_detail(&mut self) {
        let Some(handle) = self.detail_state.as_ref().map(|ds| ds.task.clone()) else {
            return;
        };
        let located = self.task_for(&handle).map(|(ci, row, task)| {
            let column = self
                .store
                .board(handle.board_index)
                .map(|b| b.columns[ci].name.clone())
                .unwrap_or_default();
            (ci, row, column, task.title.clone(), task.subtasks().len())
        });
        match located {
            Some((ci, row, column, title, subtask_count)) => {
                self.focus = Focus { column: ci, row };
                if let Some(ds) = &mut self.detail_state {
                    ds.task.column = column;
                    ds.task.task_title = title;
                    ds.cursor = ds.cursor.min(subtask_count.saturating_sub(1));
                }
            }
            None => self.close_detail(),
        }
    }

    /// Toggle the subtask under the detail cursor
    pub fn toggle_detail_subtask(&mut self) {
        let Some(ds) = &self.detail_state else {
            return;
        };
        let Some(task) = self.detail_task() else {
            return;
        };
        let Some(subtask) = task.subtasks().get(ds.cursor) else {
            return;
        };
        let command = Command::ToggleSubtask {
            board_index: ds.task.board_index,
            column_name: ds.task.column.clone(),
            task_title: task.title.clone(),
            subtask_title: subtask.title.clone(),
        };
        self.store.dispatch(command);
    }

    // -----------------------------------------------------------------------
    // Forms
    // -----------------------------------------------------------------------

    pub fn open_form(&mut self, form: FormState) {
        self.drag.cancel();
        self.form_state = Some(form);
        self.mode = Mode::Form;
    }

    /// Leave the form, returning to the details popup if one is open
    pub fn close_form(&mut self) {
        self.form_state = None;
        if self.detail_state.is_some() {
            self.mode = Mode::Detail;
            self.refresh_detail();
        } else {
            self.mode = Mode::Navigate;
            self.clamp_focus();
        }
    }

    /// Validate and dispatch the open form. Validation failures keep the
    /// form open with the message shown and toasted.
    pub fn submit_form(&mut self) {
        let Some(form) = self.form_state.clone() else {
            return;
        };
        match self.apply_form(&form) {
            Ok(()) => self.close_form(),
            Err(e) => {
                let message = e.to_string();
                if let Some(open) = &mut self.form_state {
                    open.error = Some(message.clone());
                }
                self.toast(ToastKind::Error, message);
            }
        }
    }

    fn apply_form(&mut self, form: &FormState) -> Result<(), ValidationError> {
        match &form.kind {
            FormKind::AddBoard => {
                let columns = board_ops::parse_list(form.value(1));
                let board = board_ops::new_board(form.value(0), &columns)?;
                self.store.dispatch(Command::AddBoard { board });
                self.board_index = self.store.boards().len().saturating_sub(1);
                self.focus = Focus::default();
                self.toast(ToastKind::Success, "Board created");
            }
            FormKind::EditBoard { board_index } => {
                let Some(original) = self.store.board(*board_index) else {
                    return Ok(());
                };
                let columns = board_ops::parse_list(form.value(1));
                let board = board_ops::edit_board(original, form.value(0), &columns);
                self.store.dispatch(Command::UpdateBoard {
                    board_index: *board_index,
                    board,
                });
                self.toast(ToastKind::Success, "Board updated");
            }
            FormKind::AddColumn { board_index } => {
                let column_name = board_ops::column_name(form.value(0))?;
                self.store.dispatch(Command::AddColumn {
                    board_index: *board_index,
                    column_name,
                });
                if let Some(board) = self.store.board(*board_index) {
                    self.focus = Focus {
                        column: board.columns.len().saturating_sub(1),
                        row: 0,
                    };
                }
                self.toast(ToastKind::Success, "Column added");
            }
            FormKind::AddTask { board_index } => {
                let Some(board) = self.store.board(*board_index) else {
                    return Ok(());
                };
                let task = board_ops::build_task(board, &form.task_draft(), None)?;
                let column_name = task.status.clone().unwrap_or_default();
                self.store.dispatch(Command::AddTask {
                    board_index: *board_index,
                    column_name: column_name.clone(),
                    task,
                });
                self.focus_last_in(&column_name);
                self.toast(ToastKind::Success, "Task created");
            }
            FormKind::EditTask { task: handle } => {
                let Some(board) = self.store.board(handle.board_index) else {
                    return Ok(());
                };
                let Some(existing) = board
                    .column(&handle.column)
                    .and_then(|c| c.task(&handle.task_title))
                else {
                    return Ok(());
                };
                let task = board_ops::build_task(board, &form.task_draft(), Some(existing))?;
                let to_column = task.status.clone().unwrap_or_default();
                let new_title = task.title.clone();
                self.store.dispatch(Command::UpdateTask {
                    board_index: handle.board_index,
                    column_name: handle.column.clone(),
                    task_title: handle.task_title.clone(),
                    task,
                });
                if to_column != handle.column {
                    self.store.dispatch(Command::MoveTask {
                        board_index: handle.board_index,
                        from_column: handle.column.clone(),
                        to_column,
                        task_title: new_title,
                    });
                }
                self.toast(ToastKind::Success, "Task updated");
            }
        }
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Confirmations
    // -----------------------------------------------------------------------

    pub fn request_confirm(&mut self, action: ConfirmAction) {
        self.drag.cancel();
        self.confirm_state = Some(action);
        self.mode = Mode::Confirm;
    }

    /// Carry out the pending action (y)
    pub fn confirm(&mut self) {
        let Some(action) = self.confirm_state.take() else {
            self.mode = Mode::Navigate;
            return;
        };
        match action {
            ConfirmAction::DeleteBoard { board_index } => {
                self.store.dispatch(Command::DeleteBoard { board_index });
                if board_index < self.board_index {
                    self.board_index -= 1;
                }
                self.focus = Focus::default();
                self.clamp_focus();
                self.toast(ToastKind::Success, "Board deleted");
            }
            ConfirmAction::DeleteTask { task } => {
                self.store.dispatch(Command::DeleteTask {
                    board_index: task.board_index,
                    column_name: task.column,
                    task_title: task.task_title,
                });
                self.detail_state = None;
                self.clamp_focus();
                self.toast(ToastKind::Success, "Task deleted");
            }
        }
        self.mode = Mode::Navigate;
    }

    /// Back out of the confirmation (n / Esc)
    pub fn cancel_confirm(&mut self) {
        self.confirm_state = None;
        self.mode = if self.detail_state.is_some() {
            Mode::Detail
        } else {
            Mode::Navigate
        };
    }

    // -----------------------------------------------------------------------
    // Session and theme
    // -----------------------------------------------------------------------

    pub fn login(&mut self) {
        self.session = Session::logged_in(User::demo());
        self.persistence.save_auth(&self.session);
        self.mode = Mode::Navigate;
        log::info!("logged in as {}", User::demo().email);
    }

    pub fn logout(&mut self) {
        self.session = Session::default();
        self.persistence.save_auth(&self.session);
        self.drag.cancel();
        self.detail_state = None;
        self.form_state = None;
        self.confirm_state = None;
        self.mode = Mode::Login;
    }

    pub fn toggle_theme(&mut self) {
        let name = self.theme.name.toggled();
        self.theme = Theme::from_config(name, &self.config.ui);
        self.persistence.save_theme(name);
    }

    pub fn view_state(&self) -> ViewState {
        ViewState {
            board_index: self.board_index,
            column: self.focus.column,
            row: self.focus.row,
        }
    }
}

/// Run the TUI application against the data directory
pub fn run(data_dir: &Path, ephemeral: bool) -> Result<(), Box<dyn std::error::Error>> {
    logging::init_file(data_dir);
    let config = read_config(data_dir)?;
    let persistence = if ephemeral {
        log::info!("running with in-memory storage");
        Persistence::new(MemoryStore::new())
    } else {
        Persistence::new(FileStore::new(data_dir))
    };

    let mut app = App::new(persistence, config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    app.persistence.save_view_state(&app.view_state());

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }
        app.tick(Instant::now());

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
