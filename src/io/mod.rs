pub mod config_io;
pub mod logging;
pub mod paths;
pub mod persistence;
pub mod state;
pub mod storage;

pub use persistence::Persistence;
