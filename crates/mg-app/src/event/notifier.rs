//! Observer registration with deterministic unregistration.
//!
//! Screens and shells subscribe for flow events and get back a disposable
//! handle; dropping the handle removes the registration immediately. No
//! listener outlives its handle, so nothing leaks across screen teardown.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

struct Registry<E> {
    senders: Mutex<HashMap<u64, mpsc::UnboundedSender<E>>>,
    next_id: AtomicU64,
}

impl<E> Registry<E> {
    fn lock_senders(&self) -> MutexGuard<'_, HashMap<u64, mpsc::UnboundedSender<E>>> {
        // A poisoned registry still holds a usable map.
        self.senders.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Fan-out of events to every live subscriber.
pub struct Notifier<E> {
    registry: Arc<Registry<E>>,
}

impl<E> Notifier<E> {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Registry {
                senders: Mutex::new(HashMap::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Register a subscriber.
    ///
    /// Events arrive on the returned receiver for as long as the
    /// [`Subscription`] is alive.
    pub fn subscribe(&self) -> (Subscription<E>, mpsc::UnboundedReceiver<E>) {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();
        self.registry.lock_senders().insert(id, tx);
        (
            Subscription {
                registry: Arc::clone(&self.registry),
                id,
            },
            rx,
        )
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.lock_senders().len()
    }
}

impl<E: Clone> Notifier<E> {
    /// Deliver `event` to every live subscriber, pruning the ones whose
    /// receiver is gone.
    pub fn emit(&self, event: E) {
        let mut senders = self.registry.lock_senders();
        senders.retain(|_, sender| sender.send(event.clone()).is_ok());
    }
}

impl<E> Clone for Notifier<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<E> Default for Notifier<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Disposable handle for one registration.
///
/// Dropping it (or calling [`Subscription::unsubscribe`]) removes the
/// registration deterministically; delivery stops at that point even if the
/// receiver is still alive.
pub struct Subscription<E> {
    registry: Arc<Registry<E>>,
    id: u64,
}

impl<E> Subscription<E> {
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl<E> Drop for Subscription<E> {
    fn drop(&mut self) {
        self.registry.lock_senders().remove(&self.id);
    }
}
