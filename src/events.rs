//! Synchronous signal/slot wiring.
//!
//! The windowing toolkit connects widgets with signal/slot pairs; this module
//! generalizes that contract to an explicit callback registry. A [`Signal<T>`]
//! holds a list of handlers, and `emit` invokes every handler synchronously on
//! the calling thread, in registration order. There is no queueing and no
//! cross-thread dispatch: all panel events run on the UI's single logical
//! thread.
//!
//! # Example
//!
//! ```rust,ignore
//! let changed: Signal<i32> = Signal::new();
//! changed.connect(|value| log::info!("slider moved to {value}"));
//! changed.emit(&1500);
//! ```

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Read a lock, recovering the guard if a writer panicked.
pub(crate) fn read_guard<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

/// Write a lock, recovering the guard if another writer panicked.
pub(crate) fn write_guard<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

type Handler<T> = Box<dyn Fn(&T) + Send + Sync>;

/// A synchronous multi-subscriber notification source.
///
/// Handlers registered with [`connect`](Signal::connect) stay attached for the
/// life of the signal; widgets are torn down together with the panel, so
/// individual disconnection is not needed.
#[derive(Default)]
pub struct Signal<T> {
    handlers: RwLock<Vec<Handler<T>>>,
}

impl<T> Signal<T> {
    /// Create a signal with no handlers attached.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// Register a handler invoked on every `emit`.
    pub fn connect(&self, handler: impl Fn(&T) + Send + Sync + 'static) {
        write_guard(&self.handlers).push(Box::new(handler));
    }

    /// Invoke all handlers with `payload`, in registration order.
    pub fn emit(&self, payload: &T) {
        for handler in read_guard(&self.handlers).iter() {
            handler(payload);
        }
    }

    /// Number of attached handlers.
    pub fn handler_count(&self) -> usize {
        read_guard(&self.handlers).len()
    }
}

impl<T> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("handlers", &self.handler_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn emit_reaches_every_handler() {
        let signal: Signal<i32> = Signal::new();
        let hits = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let hits = hits.clone();
            signal.connect(move |value| {
                assert_eq!(*value, 42);
                hits.fetch_add(1, Ordering::SeqCst);
            });
        }

        signal.emit(&42);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
        assert_eq!(signal.handler_count(), 3);
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let signal: Signal<()> = Signal::new();
        let order = Arc::new(RwLock::new(Vec::new()));

        for tag in ["first", "second", "third"] {
            let order = order.clone();
            signal.connect(move |_| write_guard(&order).push(tag));
        }

        signal.emit(&());
        assert_eq!(*read_guard(&order), vec!["first", "second", "third"]);
    }

    #[test]
    fn emit_without_handlers_is_a_no_op() {
        let signal: Signal<String> = Signal::new();
        signal.emit(&"nobody listening".to_string());
        assert_eq!(signal.handler_count(), 0);
    }
}
