//! Keyboard, text, focus and pointer handling
//!
//! Expansion is a two-state machine (collapsed / expanded). Every handler
//! runs the mutation checkpoint first, since a new input event always
//! follows the end of the previous turn.

use std::time::Duration;

use sift_core::events::{Event, EventData, EventResponse, KeyCode, Modifiers};

use super::ComboboxField;
use crate::config::ValuePolicy;
use crate::listbox::Traverse;
use crate::option::OptionId;

impl ComboboxField {
    /// Handle an input event from the host
    pub fn handle_event(&mut self, event: &Event) -> EventResponse {
        self.flush_mutations();

        // Focus is tracked even while disabled
        match &event.data {
            EventData::FocusIn => {
                self.focused = true;
                return EventResponse::PROCEED;
            }
            EventData::FocusOut => {
                self.focused = false;
                if !self.config.disabled {
                    self.handle_focus_out();
                }
                return EventResponse::PROCEED;
            }
            _ => {}
        }

        if self.config.disabled {
            return EventResponse::PROCEED;
        }

        match &event.data {
            EventData::Key { key, modifiers } => self.handle_key(*key, *modifiers),
            EventData::TextInput { text } => self.handle_typeahead(text),
            EventData::Input { text } => self.handle_input(text),
            EventData::Click => {
                self.handle_click();
                EventResponse::PROCEED
            }
            EventData::FocusIn | EventData::FocusOut => EventResponse::PROCEED,
        }
    }

    /// Advance the field's clock (call each frame)
    pub fn update(&mut self, dt: Duration) {
        self.typeahead.update(dt);
    }

    /// Current typeahead search string
    pub fn typeahead_query(&self) -> &str {
        self.typeahead.query()
    }

    // =========================================================================
    // Expansion
    // =========================================================================

    /// Active pointer on a plain (non-typing) open: the selected option,
    /// or the first eligible one
    pub(super) fn default_active(&self) -> Option<OptionId> {
        self.listbox
            .selected()
            .filter(|&id| self.listbox.is_eligible(id))
            .or_else(|| self.listbox.traverse(None, Traverse::First))
    }

    /// Expand without a search: every option matches again
    fn open(&mut self) {
        if self.expanded {
            return;
        }
        self.expanded = true;
        self.autoselectable = None;
        self.listbox.clear_filter();
        self.active = self.default_active();
        tracing::trace!(field = %self.config.id, "expanded");
    }

    /// Collapse, keeping the text as is
    pub(super) fn close(&mut self) {
        if self.expanded {
            tracing::trace!(field = %self.config.id, "collapsed");
        }
        self.expanded = false;
        self.active = None;
    }

    /// Collapse without committing; text is restored per policy
    pub(super) fn collapse_and_restore(&mut self) {
        self.close();
        self.restore_text();
    }

    fn move_active(&mut self, direction: Traverse) {
        if let Some(id) = self.listbox.traverse(self.active, direction) {
            self.active = Some(id);
        }
    }

    // =========================================================================
    // Keys
    // =========================================================================

    fn handle_key(&mut self, key: KeyCode, modifiers: Modifiers) -> EventResponse {
        match key {
            KeyCode::DOWN if modifiers.alt() => {
                self.open();
                EventResponse::PREVENT
            }
            KeyCode::UP if modifiers.alt() => {
                if self.expanded {
                    self.collapse_and_restore();
                }
                EventResponse::PREVENT
            }
            KeyCode::DOWN | KeyCode::UP => {
                if !self.expanded {
                    self.open();
                } else if key == KeyCode::DOWN {
                    self.move_active(Traverse::Next);
                } else {
                    self.move_active(Traverse::Previous);
                }
                EventResponse::PREVENT
            }
            KeyCode::HOME | KeyCode::END => {
                self.open();
                let direction = if key == KeyCode::HOME {
                    Traverse::First
                } else {
                    Traverse::Last
                };
                self.move_active(direction);
                EventResponse::PREVENT
            }
            KeyCode::ESCAPE => {
                if self.expanded {
                    self.collapse_and_restore();
                    EventResponse::PREVENT
                } else {
                    EventResponse::PROCEED
                }
            }
            KeyCode::SPACE if !self.config.filter => {
                if !self.expanded {
                    self.open();
                } else if let Some(id) = self.active {
                    self.select_by_user(id);
                } else {
                    self.collapse_and_restore();
                }
                EventResponse::PREVENT
            }
            KeyCode::ENTER => {
                if self.expanded {
                    if let Some(id) = self.active {
                        self.select_by_user(id);
                    }
                } else {
                    self.submit_implicitly();
                }
                EventResponse::PREVENT
            }
            KeyCode::TAB => {
                if self.expanded {
                    match self.active {
                        Some(id) => self.select_by_user(id),
                        None => self.collapse_and_restore(),
                    }
                }
                EventResponse::PROCEED
            }
            _ => EventResponse::PROCEED,
        }
    }

    // =========================================================================
    // Text
    // =========================================================================

    /// Printable keystroke on a non-filterable field
    fn handle_typeahead(&mut self, text: &str) -> EventResponse {
        if self.config.filter {
            // Filterable fields receive their text through `Input`
            return EventResponse::PROCEED;
        }

        if let Some(id) = self.typeahead.search(&self.listbox, text) {
            if self.expanded {
                self.active = Some(id);
            } else {
                self.select_by_user(id);
            }
        }
        EventResponse::PREVENT
    }

    /// The user edited the text of a filterable field
    fn handle_input(&mut self, text: &str) -> EventResponse {
        if !self.config.filter {
            return EventResponse::PROCEED;
        }

        let previous = self.value.clone();
        self.filter_text = text.to_string();
        self.listbox.apply_filter(text);
        self.autoselectable = self.listbox.exact_match(text);

        if !self.listbox.is_empty() {
            match self.policy() {
                ValuePolicy::AnyValue => {
                    self.listbox.deselect_all();
                    self.value = Some(text.to_string());
                }
                ValuePolicy::Clearable if text.is_empty() => self.force_empty_value(),
                _ => {}
            }
        }

        // Opened by typing: the active option comes from the search result
        self.expanded = true;
        self.active = self.autoselectable;

        self.notify_if_changed(&previous);
        EventResponse::PROCEED
    }

    // =========================================================================
    // Pointer & focus
    // =========================================================================

    fn handle_click(&mut self) {
        if self.config.filter {
            self.open();
        } else if self.expanded {
            self.collapse_and_restore();
        } else {
            self.open();
        }
    }

    fn handle_focus_out(&mut self) {
        self.typeahead.reset();

        if self.config.filter {
            if let Some(id) = self.autoselectable {
                self.select_by_user(id);
            }
        }
        self.collapse_and_restore();
    }

    /// The user clicked an option
    pub fn click_option(&mut self, id: OptionId) {
        self.flush_mutations();
        if self.config.disabled {
            return;
        }
        self.select_by_user(id);
    }

    /// The pointer moved over an option
    pub fn hover_option(&mut self, id: OptionId) {
        self.flush_mutations();
        if self.expanded && !self.config.disabled && self.listbox.is_eligible(id) {
            self.active = Some(id);
        }
    }
}
