//! Weft signal
//!
//! A minimal typed event broadcaster: listeners register against a
//! [`Signal`] and every [`Signal::broadcast`] invokes them with a borrowed
//! payload. A `live` toggle silences broadcasting without dropping the
//! listener set.
//!
//! Rust closures have no identity, so registration hands back a
//! [`ListenerId`] and removal is by key rather than by function value.
//!
//! # Example
//!
//! ```rust
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use std::sync::Arc;
//! use weft_signal::Signal;
//!
//! let seen = Arc::new(AtomicU32::new(0));
//! let mut resized: Signal<(u32, u32)> = Signal::new();
//!
//! let seen_in = Arc::clone(&seen);
//! let id = resized.add(move |(w, h)| {
//!     seen_in.fetch_add(w + h, Ordering::Relaxed);
//! });
//!
//! resized.broadcast(&(800, 600));
//! assert_eq!(seen.load(Ordering::Relaxed), 1400);
//!
//! resized.remove(id);
//! resized.broadcast(&(1, 1));
//! assert_eq!(seen.load(Ordering::Relaxed), 1400);
//! ```

use slotmap::{new_key_type, SlotMap};
use tracing::trace;

new_key_type! {
    /// Handle to a registered listener.
    pub struct ListenerId;
}

/// Listener callback invoked with a borrowed payload.
pub type Listener<T> = Box<dyn FnMut(&T) + Send>;

/// Typed event broadcaster.
pub struct Signal<T> {
    listeners: SlotMap<ListenerId, Listener<T>>,
    live: bool,
}

impl<T> Signal<T> {
    /// Create a live signal.
    pub fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
            live: true,
        }
    }

    /// Create a signal with broadcasting initially silenced.
    pub fn muted() -> Self {
        Self {
            listeners: SlotMap::with_key(),
            live: false,
        }
    }

    /// Register a listener; returns the handle used to remove it.
    pub fn add<F: FnMut(&T) + Send + 'static>(&mut self, listener: F) -> ListenerId {
        self.listeners.insert(Box::new(listener))
    }

    /// Remove a listener by handle. Returns false when the handle is stale.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id).is_some()
    }

    /// Whether the handle still refers to a registered listener.
    pub fn has(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(id)
    }

    /// Whether any listener is registered.
    pub fn has_any(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Invoke every listener with `payload`, in registration order.
    ///
    /// A no-op while the signal is not live or no listener is registered.
    pub fn broadcast(&mut self, payload: &T) {
        if !self.live || !self.has_any() {
            return;
        }
        trace!(listeners = self.listeners.len(), "signal broadcast");
        for listener in self.listeners.values_mut() {
            listener(payload);
        }
    }

    /// Drop every listener.
    pub fn remove_all(&mut self) {
        self.listeners.clear();
    }

    /// Whether broadcasting is currently enabled.
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Enable or silence broadcasting without touching the listener set.
    pub fn set_live(&mut self, live: bool) {
        self.live = live;
    }
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn counting_signal() -> (Signal<i32>, Arc<Mutex<Vec<i32>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        (Signal::new(), seen)
    }

    #[test]
    fn broadcast_reaches_every_listener_in_order() {
        let (mut signal, seen) = counting_signal();

        let seen_a = Arc::clone(&seen);
        signal.add(move |payload| seen_a.lock().unwrap().push(*payload));
        let seen_b = Arc::clone(&seen);
        signal.add(move |payload| seen_b.lock().unwrap().push(payload * 10));

        signal.broadcast(&1);
        signal.broadcast(&2);

        assert_eq!(*seen.lock().unwrap(), vec![1, 10, 2, 20]);
    }

    #[test]
    fn removed_listeners_stop_receiving() {
        let (mut signal, seen) = counting_signal();

        let seen_in = Arc::clone(&seen);
        let id = signal.add(move |payload| seen_in.lock().unwrap().push(*payload));

        assert!(signal.has(id));
        assert!(signal.has_any());

        signal.broadcast(&1);
        assert!(signal.remove(id));
        assert!(!signal.has(id));
        assert!(!signal.remove(id));

        signal.broadcast(&2);
        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn muting_silences_broadcasts_without_dropping_listeners() {
        let (mut signal, seen) = counting_signal();

        let seen_in = Arc::clone(&seen);
        signal.add(move |payload| seen_in.lock().unwrap().push(*payload));

        signal.set_live(false);
        assert!(!signal.is_live());
        signal.broadcast(&1);
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(signal.len(), 1);

        signal.set_live(true);
        signal.broadcast(&2);
        assert_eq!(*seen.lock().unwrap(), vec![2]);
    }

    #[test]
    fn muted_constructor_starts_silenced() {
        let signal: Signal<()> = Signal::muted();
        assert!(!signal.is_live());
    }

    #[test]
    fn remove_all_clears_the_registry() {
        let (mut signal, seen) = counting_signal();

        let seen_in = Arc::clone(&seen);
        signal.add(move |payload| seen_in.lock().unwrap().push(*payload));
        signal.add(|_| {});

        assert_eq!(signal.len(), 2);
        signal.remove_all();
        assert!(signal.is_empty());

        signal.broadcast(&1);
        assert!(seen.lock().unwrap().is_empty());
    }
}
