use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Builder, Env, Target};

pub const LOG_ENV: &str = "KANBAN_LOG";
pub const LOG_FILE: &str = "kanban.log";

/// Log to stderr. Used by CLI subcommands.
pub fn init_stderr() {
    let _ = builder().target(Target::Stderr).try_init();
}

/// Log to `<data_dir>/kanban.log` so output never lands on the TUI screen.
/// Falls back to no logging when the file can't be opened.
pub fn init_file(data_dir: &Path) {
    let _ = std::fs::create_dir_all(data_dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join(LOG_FILE));
    match file {
        Ok(file) => {
            let _ = builder().target(Target::Pipe(Box::new(file))).try_init();
        }
        Err(_) => {
            let _ = Builder::new().filter_level(log::LevelFilter::Off).try_init();
        }
    }
}

fn builder() -> Builder {
    Builder::from_env(Env::new().filter_or(LOG_ENV, "warn"))
}
