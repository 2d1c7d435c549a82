//! Persistence adapter: typed load/save over a [`KeyValueStore`].
//!
//! Failures never propagate. A failed or corrupt read is treated as "nothing
//! stored" and a failed write is logged and dropped.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::model::board::BoardsState;
use crate::model::defaults;
use crate::model::session::{Session, ThemeName};

use super::state::ViewState;
use super::storage::{KeyValueStore, StorageError};

pub const BOARDS_KEY: &str = "boards_data";
pub const AUTH_KEY: &str = "user_auth";
pub const THEME_KEY: &str = "app_theme";
pub const VIEW_KEY: &str = "view_state";

pub struct Persistence {
    store: Box<dyn KeyValueStore>,
}

impl Persistence {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Persistence {
            store: Box::new(store),
        }
    }

    pub fn load_boards(&self) -> Option<BoardsState> {
        self.load_json(BOARDS_KEY)
    }

    /// Stored boards, or the built-in dataset when nothing usable is stored
    pub fn load_boards_or_default(&self) -> BoardsState {
        match self.load_boards() {
            Some(mut state) => {
                state.assign_ids();
                state
            }
            None => {
                log::info!("no stored boards, using default dataset");
                defaults::default_state()
            }
        }
    }

    pub fn save_boards(&self, state: &BoardsState) {
        self.save_json(BOARDS_KEY, state);
    }

    pub fn load_auth(&self) -> Session {
        self.load_json::<Session>(AUTH_KEY)
            .map(Session::normalized)
            .unwrap_or_default()
    }

    pub fn save_auth(&self, session: &Session) {
        self.save_json(AUTH_KEY, session);
    }

    /// Stored theme; unknown values read as absent
    pub fn load_theme(&self) -> Option<ThemeName> {
        let raw = self.read(THEME_KEY)?;
        ThemeName::parse(&raw)
    }

    pub fn save_theme(&self, theme: ThemeName) {
        if let Err(e) = self.store.set(THEME_KEY, theme.as_str()) {
            log::warn!("could not save theme: {}", e);
        }
    }

    pub fn load_view_state(&self) -> Option<ViewState> {
        self.load_json(VIEW_KEY)
    }

    pub fn save_view_state(&self, view: &ViewState) {
        self.save_json(VIEW_KEY, view);
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("could not read {}: {}", key, e);
                None
            }
        }
    }

    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("ignoring corrupt {}: {}", key, e);
                None
            }
        }
    }

    fn save_json<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(e) = self.try_save_json(key, value) {
            log::warn!("could not save {}: {}", key, e);
        }
    }

    fn try_save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let content = serde_json::to_string_pretty(value)?;
        self.store.set(key, &content)
    }
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}
