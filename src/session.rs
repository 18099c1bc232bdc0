//! The one game shared by every connection of the HTTP server.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::game::{GameState, MoveError, MoveOutcome, Snapshot};

/// A [`GameState`] behind a mutex.
///
/// Each method holds the lock for its whole read-modify-write sequence, so a
/// move's drop, win check and turn switch are never interleaved with another
/// request. Hand it to adapters as `Arc<Session>`.
#[derive(Debug, Default)]
pub struct Session {
    state: Mutex<GameState>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Play a turn for whoever is to move
    pub fn play(&self, column: usize) -> Result<MoveOutcome, MoveError> {
        self.lock().play(column)
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock().snapshot()
    }

    /// Run `f` against the current state while holding the lock
    pub fn with_state<T>(&self, f: impl FnOnce(&GameState) -> T) -> T {
        f(&self.lock())
    }

    // Every mutation leaves the state consistent, so a panic elsewhere while
    // the lock was held does not invalidate it.
    fn lock(&self) -> MutexGuard<'_, GameState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
