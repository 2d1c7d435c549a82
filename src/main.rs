use clap::Parser;
use kanban::cli::commands::Cli;
use kanban::cli::handlers;
use kanban::io::{logging, paths};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        None => {
            // No subcommand → launch TUI
            let data_dir = paths::resolve_data_dir(cli.data_dir.as_deref());
            if let Err(e) = kanban::tui::run(&data_dir, cli.ephemeral) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Some(_) => {
            logging::init_stderr();
            if let Err(e) = handlers::dispatch(cli) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
    }
}
