//! Synchronous observer registry for graph and algorithm notifications
//!
//! Every mutating operation in the flow engine (adding a reverse edge, a
//! super vertex, a balancing edge...) announces itself through an
//! [`EventHandlers`] registry owned by the object performing the mutation.
//! Handlers are invoked in subscription order, on the caller's thread, before
//! the mutating call returns.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::fmt;

/// Handle returned by [`EventHandlers::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u64);

type Handler<T> = Box<dyn FnMut(&T)>;

/// Ordered registry of callbacks for a single event kind
pub struct EventHandlers<T> {
    handlers: Vec<(HandlerId, Handler<T>)>,
    next_id: u64,
}

impl<T> EventHandlers<T> {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_id: 0,
        }
    }

    /// Registers a callback and returns its handle
    pub fn subscribe<F>(&mut self, handler: F) -> HandlerId
    where
        F: FnMut(&T) + 'static,
    {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    /// Removes a callback; returns false if the handle was unknown
    pub fn unsubscribe(&mut self, id: HandlerId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
        self.handlers.len() != before
    }

    /// Invokes every registered callback with `payload`
    pub fn emit(&mut self, payload: &T) {
        for (_, handler) in self.handlers.iter_mut() {
            handler(payload);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<T> Default for EventHandlers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventHandlers<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventHandlers")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}
