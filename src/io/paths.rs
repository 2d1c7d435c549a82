use std::path::PathBuf;

pub const DIR_ENV: &str = "KANBAN_DIR";

/// Resolve the data directory: explicit flag, then `KANBAN_DIR`, then the
/// platform data dir (`~/.local/share/kanban` on Linux).
pub fn resolve_data_dir(explicit: Option<&str>) -> PathBuf {
    if let Some(dir) = explicit {
        return PathBuf::from(dir);
    }
    if let Ok(dir) = std::env::var(DIR_ENV)
        && !dir.trim().is_empty()
    {
        return PathBuf::from(dir);
    }
    dirs::data_dir()
        .map(|d| d.join("kanban"))
        .unwrap_or_else(|| PathBuf::from(".kanban"))
}
