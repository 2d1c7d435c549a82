pub mod board_ops;
pub mod command;
pub mod dnd;
pub mod reducer;
pub mod store;
pub mod ui_state;

pub use command::Command;
pub use store::Store;
