//! Lock-guarded value container.
//!
//! `Atomic<T>` is the building block behind every cache table. All access goes
//! through explicit `get`/`set`/`modify` calls so synchronized call sites are
//! visible, and each critical section is a plain map lookup or insert.

use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A value that can be read and mutated from multiple threads.
pub struct Atomic<T> {
    value: Mutex<T>,
}

impl<T> Atomic<T> {
    /// Wrap a value.
    pub fn new(value: T) -> Self {
        Atomic {
            value: Mutex::new(value),
        }
    }

    /// Replace the current value.
    pub fn set(&self, value: T) {
        *self.lock() = value;
    }

    /// Run `f` with exclusive access to the value and return its result.
    ///
    /// This is the only way to do read-modify-write sequences such as
    /// "insert if absent, else fetch" without racing another thread.
    pub fn modify<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.lock())
    }

    /// Read through a shared reference without cloning the whole value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.lock())
    }

    // A panic inside `modify` cannot leave a map half-written, so a poisoned
    // lock still guards a consistent value.
    fn lock(&self) -> MutexGuard<'_, T> {
        self.value.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Clone> Atomic<T> {
    /// Get a copy of the current value.
    pub fn get(&self) -> T {
        self.lock().clone()
    }
}

impl<T: Default> Default for Atomic<T> {
    fn default() -> Self {
        Atomic::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Atomic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|value| f.debug_tuple("Atomic").field(value).finish())
    }
}
