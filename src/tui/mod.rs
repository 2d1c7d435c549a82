pub mod app;
pub mod form;
pub mod hitmap;
pub mod input;
pub mod render;
pub mod theme;

pub use app::run;
