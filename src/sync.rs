//! # Synchronization Utilities
//!
//! Mutex handling for the process-wide state in this crate: the color spec
//! cache in [`crate::color`] and the writer and last-timestamp state of
//! [`crate::logging::ChatLogger`].
//!
//! A mutex becomes poisoned when a thread panics while holding it. Both users
//! hold data that is safe to keep using after such a panic (a cache of
//! immutable colors, an output sink), so poison is recovered rather than
//! propagated.
//!
//! | Scenario | Function |
//! |----------|----------|
//! | Production code | [`lock_recover`] |
//! | Need context | [`lock_recover_debug`] |
//! | Test code | `.lock().unwrap()` |

use std::sync::{Mutex, MutexGuard};

/// Lock a mutex, recovering from poison if necessary.
///
/// # Example
///
/// ```rust
/// use std::sync::Mutex;
/// use chatmarkup::sync::lock_recover;
///
/// let mutex = Mutex::new(42);
/// let guard = lock_recover(&mutex);
/// assert_eq!(*guard, 42);
/// ```
#[inline]
pub fn lock_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// Lock a mutex, logging a warning with `context` when poison is recovered.
///
/// # Example
///
/// ```rust
/// use std::sync::Mutex;
/// use chatmarkup::sync::lock_recover_debug;
///
/// let mutex = Mutex::new("hello");
/// let guard = lock_recover_debug(&mutex, "my_function");
/// assert_eq!(*guard, "hello");
/// ```
#[inline]
pub fn lock_recover_debug<'a, T>(mutex: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|e| {
        #[cfg(debug_assertions)]
        eprintln!("[chatmarkup::sync] mutex poison recovered at: {context}");
        e.into_inner()
    })
}
