//! Transient UI state: loading keys and toast notifications.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    /// Auto-dismiss deadline
    pub expires_at: Instant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    StartLoading(String),
    StopLoading(String),
    ShowToast(Toast),
    DismissToast(u64),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub loading_keys: Vec<String>,
    pub toasts: Vec<Toast>,
}

impl UiState {
    pub fn reduce(&mut self, command: UiCommand) {
        match command {
            UiCommand::StartLoading(key) => {
                if !self.loading_keys.contains(&key) {
                    self.loading_keys.push(key);
                }
            }
            UiCommand::StopLoading(key) => self.loading_keys.retain(|k| *k != key),
            UiCommand::ShowToast(toast) => self.toasts.push(toast),
            UiCommand::DismissToast(id) => self.toasts.retain(|t| t.id != id),
        }
    }

    /// With a key: whether that key is loading. Without: whether anything is.
    pub fn is_loading(&self, key: Option<&str>) -> bool {
        match key {
            Some(key) => self.loading_keys.iter().any(|k| k == key),
            None => !self.loading_keys.is_empty(),
        }
    }

    /// Dismiss commands for every toast whose deadline has passed
    pub fn expired(&self, now: Instant) -> Vec<UiCommand> {
        self.toasts
            .iter()
            .filter(|t| t.expires_at <= now)
            .map(|t| UiCommand::DismissToast(t.id))
            .collect()
    }
}

/// Builds toasts with increasing ids and a fixed lifetime
#[derive(Debug, Clone)]
pub struct ToastFactory {
    next_id: u64,
    lifetime: Duration,
}

impl ToastFactory {
    pub fn new(lifetime: Duration) -> Self {
        ToastFactory {
            next_id: 1,
            lifetime,
        }
    }

    pub fn make(&mut self, kind: ToastKind, message: impl Into<String>, now: Instant) -> Toast {
        let id = self.next_id;
        self.next_id += 1;
        Toast {
            id,
            kind,
            message: message.into(),
            expires_at: now + self.lifetime,
        }
    }
}
