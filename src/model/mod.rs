pub mod board;
pub mod config;
pub mod defaults;
pub mod session;

pub use board::*;
pub use config::*;
pub use session::*;
