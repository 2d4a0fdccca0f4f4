// SPDX-License-Identifier: MIT OR Apache-2.0

//! Change subscription shared by every observable collaborator.
//!
//! Notifications carry no payload. An observer that hears about a change
//! re-reads whatever current state it cares about from the source.

use parking_lot::Mutex;
use std::sync::Arc;

/// Receives grid change notifications
pub trait GridObserver: Send + Sync {
    fn grid_changed(&self);
}

/// Receives connection status change notifications
pub trait ConnectionObserver: Send + Sync {
    fn connection_changed(&self);
}

/// Receives game state change notifications
pub trait GameObserver: Send + Sync {
    fn game_changed(&self);
}

/// Thread-safe list of subscribers
pub struct Observers<T: ?Sized> {
    list: Mutex<Vec<Arc<T>>>,
}

impl<T: ?Sized> Observers<T> {
    pub fn new() -> Self {
        Self {
            list: Mutex::new(Vec::new()),
        }
    }

    /// Register an observer. There is no unsubscribe; observers live as long as the source.
    pub fn subscribe(&self, observer: Arc<T>) {
        self.list.lock().push(observer);
    }

    /// Number of registered observers
    pub fn len(&self) -> usize {
        self.list.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call `f` for every observer.
    ///
    /// The list is cloned first so observers run without the lock held and
    /// may subscribe or read the source from inside the callback.
    pub fn notify(&self, f: impl Fn(&T)) {
        let snapshot: Vec<Arc<T>> = self.list.lock().clone();
        for observer in &snapshot {
            f(observer);
        }
    }
}

impl<T: ?Sized> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}
