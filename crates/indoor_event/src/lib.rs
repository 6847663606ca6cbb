//! # indoor_event - Synchronous Signals
//!
//! Typed publish/subscribe used by every map element and container:
//! - One [`Signal`] per event source and event kind
//! - Handlers run synchronously, in subscription order, on the emitting thread
//! - Unsubscribing is idempotent and safe from inside a running handler

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Event handler function type
pub type EventHandler<E> = Rc<dyn Fn(&E)>;

/// Subscriber ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);

/// Observer list for one kind of event
pub struct Signal<E> {
    handlers: RefCell<Vec<(SubscriberId, EventHandler<E>)>>,
    next_subscriber_id: Cell<u64>,
}

impl<E> Signal<E> {
    /// Create a signal with no subscribers
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
            next_subscriber_id: Cell::new(1),
        }
    }

    /// Subscribe a handler, returning the id used to unsubscribe it
    pub fn subscribe<F>(&self, handler: F) -> SubscriberId
    where
        F: Fn(&E) + 'static,
    {
        let id = SubscriberId(self.next_subscriber_id.get());
        self.next_subscriber_id.set(id.0 + 1);
        self.handlers.borrow_mut().push((id, Rc::new(handler)));
        id
    }

    /// Unsubscribe. Returns false if the id was not (or no longer) subscribed.
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|(sub_id, _)| *sub_id != id);
        handlers.len() != before
    }

    /// Check if a subscriber is still attached
    pub fn is_subscribed(&self, id: SubscriberId) -> bool {
        self.handlers.borrow().iter().any(|(sub_id, _)| *sub_id == id)
    }

    /// Deliver an event to every current subscriber.
    ///
    /// Handlers may subscribe or unsubscribe while the event is delivered; a
    /// handler removed by an earlier handler is skipped.
    pub fn emit(&self, event: &E) {
        let snapshot: Vec<(SubscriberId, EventHandler<E>)> = self
            .handlers
            .borrow()
            .iter()
            .map(|(id, handler)| (*id, Rc::clone(handler)))
            .collect();

        for (id, handler) in snapshot {
            if self.is_subscribed(id) {
                handler(event);
            }
        }
    }

    /// Remove every subscriber
    pub fn clear(&self) {
        self.handlers.borrow_mut().clear();
    }

    /// Get number of subscribers
    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }
}

impl<E> Default for Signal<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Signal<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

/// Prelude
pub mod prelude {
    pub use crate::{EventHandler, Signal, SubscriberId};
}
