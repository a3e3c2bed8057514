//! Outgoing notifications
//!
//! Events the engine dispatches back to the host (`input`, `change`,
//! `invalid`, submission requests). They are queued for the host to drain
//! after each interaction, and also handed to any subscribed listener at the
//! moment they are dispatched, which preserves dispatch order across both
//! channels.

use std::collections::VecDeque;

/// Listener invoked synchronously on dispatch
pub type Listener<T> = Box<dyn FnMut(&T) + Send>;

pub struct Outbox<T> {
    queued: VecDeque<T>,
    listeners: Vec<Listener<T>>,
}

impl<T: std::fmt::Debug> std::fmt::Debug for Outbox<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Outbox")
            .field("queued", &self.queued)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<T> Default for Outbox<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Outbox<T> {
    pub fn new() -> Self {
        Self {
            queued: VecDeque::new(),
            listeners: Vec::new(),
        }
    }

    /// Register a listener for every future dispatch
    pub fn subscribe<F: FnMut(&T) + Send + 'static>(&mut self, listener: F) {
        self.listeners.push(Box::new(listener));
    }

    /// Dispatch an event: listeners run now, the event is queued for draining
    pub fn dispatch(&mut self, event: T) {
        for listener in &mut self.listeners {
            listener(&event);
        }
        self.queued.push_back(event);
    }

    /// Take every queued event, oldest first
    pub fn drain(&mut self) -> Vec<T> {
        self.queued.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queued.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queued.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_dispatch_queues_and_notifies() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();

        let mut outbox = Outbox::new();
        outbox.subscribe(move |e: &u32| seen_clone.lock().unwrap().push(*e));

        outbox.dispatch(1);
        outbox.dispatch(2);

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
        assert_eq!(outbox.len(), 2);
        assert_eq!(outbox.drain(), vec![1, 2]);
        assert!(outbox.is_empty());
    }
}
