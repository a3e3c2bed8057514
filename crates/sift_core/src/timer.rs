//! Cancellable deferred timer driven by the host clock
//!
//! The engine has no thread and no event loop of its own. Like frame-based
//! animation, time only advances when the host calls [`DeferredTimer::advance`]
//! with the elapsed delta. A timer fires at most once per schedule, and
//! scheduling again (a new keystroke) supersedes the pending deadline.

use std::time::Duration;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DeferredTimer {
    /// Time left until the timer fires (None = not scheduled)
    remaining: Option<Duration>,
}

impl DeferredTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule the timer, replacing any pending deadline
    pub fn schedule(&mut self, delay: Duration) {
        self.remaining = Some(delay);
    }

    pub fn cancel(&mut self) {
        self.remaining = None;
    }

    pub fn is_pending(&self) -> bool {
        self.remaining.is_some()
    }

    /// Advance the clock; returns `true` exactly when the timer fires
    pub fn advance(&mut self, dt: Duration) -> bool {
        match self.remaining {
            Some(left) if dt >= left => {
                self.remaining = None;
                true
            }
            Some(left) => {
                self.remaining = Some(left - dt);
                false
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_fires_once() {
        let mut timer = DeferredTimer::new();
        timer.schedule(Duration::from_millis(500));

        assert!(!timer.advance(Duration::from_millis(300)));
        assert!(timer.is_pending());
        assert!(timer.advance(Duration::from_millis(200)));
        assert!(!timer.is_pending());
        assert!(!timer.advance(Duration::from_millis(500)));
    }

    #[test]
    fn test_reschedule_supersedes() {
        let mut timer = DeferredTimer::new();
        timer.schedule(Duration::from_millis(500));
        assert!(!timer.advance(Duration::from_millis(400)));

        timer.schedule(Duration::from_millis(500));
        assert!(!timer.advance(Duration::from_millis(400)));
        assert!(timer.advance(Duration::from_millis(100)));
    }

    #[test]
    fn test_cancel() {
        let mut timer = DeferredTimer::new();
        timer.schedule(Duration::from_millis(10));
        timer.cancel();
        assert!(!timer.advance(Duration::from_secs(1)));
    }
}
