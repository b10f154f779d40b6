//! Synchronous one-to-many notification plumbing.
//!
//! A [`Subject`] holds an ordered set of listeners and broadcasts typed
//! events to all of them, in registration order, on the caller's thread.
//! There is no queueing and no asynchronous dispatch; correctness of the
//! playlist synchronization logic depends on immediate, ordered delivery.

use std::cell::RefCell;
use std::rc::Rc;

/// Receiver half of the notification mechanism.
pub trait Listener<E> {
    fn on_event(&mut self, event: &E);
}

/// Shared, interiorly mutable handle to a listener.
pub type SharedListener<E> = Rc<RefCell<dyn Listener<E>>>;

/// Token returned by [`Subject::register`], used to unregister later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct RegisteredListener<E> {
    id: ListenerId,
    listener: SharedListener<E>,
}

struct Registry<E> {
    listeners: Vec<RegisteredListener<E>>,
    next_id: u64,
}

/// Broadcast endpoint for one event type.
///
/// `Subject` is a cheap clonable handle over a shared registry, so the
/// emitting component and the component managing registrations can each hold
/// their own copy. `emit` snapshots the registration list before delivering,
/// so a listener that registers or unregisters during its own notification
/// does not affect the in-flight delivery pass.
pub struct Subject<E> {
    registry: Rc<RefCell<Registry<E>>>,
}

impl<E> Clone for Subject<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<E> Default for Subject<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Subject<E> {
    pub fn new() -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry {
                listeners: Vec::new(),
                next_id: 0,
            })),
        }
    }

    /// Appends `listener` to the registration order and returns its token.
    pub fn register(&self, listener: SharedListener<E>) -> ListenerId {
        let mut registry = self.registry.borrow_mut();
        let id = ListenerId(registry.next_id);
        registry.next_id += 1;
        registry.listeners.push(RegisteredListener { id, listener });
        id
    }

    /// Removes the listener registered under `id`. Unknown tokens are ignored.
    pub fn unregister(&self, id: ListenerId) {
        self.registry
            .borrow_mut()
            .listeners
            .retain(|entry| entry.id != id);
    }

    /// Delivers `event` to every currently registered listener, in
    /// registration order, before returning.
    pub fn emit(&self, event: &E) {
        let snapshot: Vec<SharedListener<E>> = self
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|entry| Rc::clone(&entry.listener))
            .collect();
        for listener in snapshot {
            listener.borrow_mut().on_event(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}
