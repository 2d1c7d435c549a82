use std::sync::Arc;

use crate::model::board::{Board, BoardsState};

use super::command::Command;
use super::reducer;

/// Handle returned by [`Store::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

type Subscriber = Box<dyn FnMut(&BoardsState)>;

/// Owns the canonical [`BoardsState`].
///
/// `dispatch` is the only way to change it. Each change replaces the
/// snapshot, so an `Arc` obtained from [`Store::snapshot`] never changes
/// underneath its holder. Subscribers run after every dispatch that changed
/// the state, in subscription order.
pub struct Store {
    state: Arc<BoardsState>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl Store {
    pub fn new(mut initial: BoardsState) -> Self {
        initial.assign_ids();
        Store {
            state: Arc::new(initial),
            subscribers: Vec::new(),
            next_subscription: 1,
        }
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Arc<BoardsState> {
        Arc::clone(&self.state)
    }

    pub fn boards(&self) -> &[Board] {
        &self.state.boards
    }

    pub fn board(&self, index: usize) -> Option<&Board> {
        self.state.boards.get(index)
    }

    /// Reduce `command` into the state and notify subscribers if it changed.
    pub fn dispatch(&mut self, command: Command) {
        let next = reducer::apply(&self.state, &command);
        if Arc::ptr_eq(&next, &self.state) {
            return;
        }
        match command.board_index() {
            Some(index) => log::debug!("dispatched {} on board {}", command.kind(), index),
            None => log::debug!("dispatched {}", command.kind()),
        }
        self.state = next;
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&self.state);
        }
    }

    pub fn subscribe<F>(&mut self, subscriber: F) -> SubscriptionId
    where
        F: FnMut(&BoardsState) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false if the id was not subscribed
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("boards", &self.state.boards.len())
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
