//! Typeahead search for non-filterable fields
//!
//! Printable keystrokes accumulate into a rolling search string. The string
//! is cleared after [`TYPEAHEAD_TIMEOUT`] without a keystroke, or right after
//! a keystroke that matched nothing, so the next key starts a fresh
//! one-character search.

use std::time::Duration;

use sift_core::timer::DeferredTimer;

use crate::listbox::Listbox;
use crate::option::OptionId;

/// Inactivity period after which the search string resets
pub const TYPEAHEAD_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Clone, Debug, Default)]
pub struct Typeahead {
    search: String,
    timer: DeferredTimer,
}

impl Typeahead {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current accumulated search string
    pub fn query(&self) -> &str {
        &self.search
    }

    /// Extend the search with `text` and look it up in `listbox`
    ///
    /// A miss resets the search immediately.
    pub fn search(&mut self, listbox: &Listbox, text: &str) -> Option<OptionId> {
        self.search.push_str(text);
        self.timer.schedule(TYPEAHEAD_TIMEOUT);

        let found = listbox.search(&self.search);
        if found.is_none() {
            tracing::trace!(query = %self.search, "typeahead miss, resetting");
            self.reset();
        }
        found
    }

    pub fn reset(&mut self) {
        self.search.clear();
        self.timer.cancel();
    }

    /// Advance the clock (call each frame); returns `true` if the search expired
    pub fn update(&mut self, dt: Duration) -> bool {
        if self.timer.advance(dt) {
            tracing::trace!(query = %self.search, "typeahead timed out");
            self.search.clear();
            return true;
        }
        false
    }
}
