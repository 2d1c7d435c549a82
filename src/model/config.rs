use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::session::ThemeName;

/// Configuration from config.toml in the data directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub drag: DragConfig,
    #[serde(default)]
    pub toast: ToastConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Initial theme when none has been stored yet
    #[serde(default)]
    pub theme: Option<ThemeName>,
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides (e.g. `highlight = "#635FC7"`), applied to both themes
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            theme: None,
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragConfig {
    /// Pointer travel (in cells) before a press becomes a drag
    #[serde(default = "default_drag_threshold")]
    pub threshold: u16,
}

impl Default for DragConfig {
    fn default() -> Self {
        DragConfig {
            threshold: default_drag_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToastConfig {
    #[serde(default = "default_dismiss_ms")]
    pub dismiss_ms: u64,
}

impl Default for ToastConfig {
    fn default() -> Self {
        ToastConfig {
            dismiss_ms: default_dismiss_ms(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_drag_threshold() -> u16 {
    1
}

fn default_dismiss_ms() -> u64 {
    4000
}
