//! Reconciliation between value, text and option selection

use sift_core::batch::BatchRecord;

use super::ComboboxField;
use crate::config::ValuePolicy;
use crate::option::OptionId;

impl ComboboxField {
    /// Select `id` exclusively and sync value and text to it
    ///
    /// This is the only path that turns an option into the committed value.
    pub(super) fn commit_option(&mut self, id: OptionId) {
        let Some(option) = self.listbox.get(id) else {
            return;
        };
        let value = option.value().to_string();
        let label = option.label().to_string();

        self.listbox.select_exclusive(id);
        self.value = Some(value);
        self.filter_text = label;
        self.autoselectable = None;
        self.listbox.clear_filter();

        tracing::debug!(field = %self.config.id, value = ?self.value, "option committed");
    }

    /// Commit on behalf of the user: collapses and notifies on change
    pub(super) fn select_by_user(&mut self, id: OptionId) {
        if self.listbox.get(id).map_or(true, |o| o.is_disabled()) {
            return;
        }
        let previous = self.value.clone();
        self.commit_option(id);
        self.close();
        self.notify_if_changed(&previous);
    }

    /// Commit the empty value: the zero-value option if one exists,
    /// otherwise nothing selected
    pub(super) fn force_empty_value(&mut self) {
        match self.listbox.find_by_value("") {
            Some(zero) => self.listbox.select_exclusive(zero),
            None => self.listbox.deselect_all(),
        }
        self.value = Some(String::new());
        self.filter_text.clear();
        self.autoselectable = None;
    }

    /// Zero options: back to the uninitialized state
    fn clear_to_uninitialized(&mut self) {
        self.value = None;
        self.filter_text.clear();
        self.active = None;
        self.autoselectable = None;
        self.listbox.clear_filter();
    }

    /// Displayed text := selected option's label (or empty)
    pub(super) fn sync_text_to_selection(&mut self) {
        self.filter_text = self
            .listbox
            .selected()
            .and_then(|id| self.listbox.get(id))
            .map(|o| o.label().to_string())
            .unwrap_or_default();
    }

    /// Undo uncommitted filter text according to the policy
    pub(super) fn restore_text(&mut self) {
        match self.policy() {
            ValuePolicy::AnyValue => {}
            ValuePolicy::Clearable if self.filter_text.is_empty() => {}
            _ => self.sync_text_to_selection(),
        }
        self.autoselectable = None;
        self.listbox.clear_filter();
    }

    /// Form-reset algorithm
    ///
    /// Last default-selected option; otherwise the empty value when the
    /// policy accepts it; otherwise the first option.
    pub(super) fn reset_to_default(&mut self) {
        if self.listbox.is_empty() {
            self.clear_to_uninitialized();
            return;
        }

        if let Some(id) = self.listbox.last_default_selected() {
            self.commit_option(id);
        } else if self.policy().accepts_empty() {
            self.force_empty_value();
        } else if let Some(first) = self.listbox.first() {
            self.commit_option(first);
        }
    }

    /// The selected option was programmatically deselected
    pub(super) fn reconcile_deselection(&mut self) {
        let policy = self.policy();
        tracing::debug!(field = %self.config.id, ?policy, "selected option deselected");

        match policy {
            ValuePolicy::AnyValue => {
                self.value = Some(self.filter_text.clone());
            }
            ValuePolicy::Clearable => {
                self.value = Some(String::new());
                self.filter_text.clear();
                self.autoselectable = None;
            }
            ValuePolicy::Unclearable => self.reset_to_default(),
        }
    }

    /// Whether the current value/selection pair is acceptable under `policy`
    fn is_valid_under(&self, policy: ValuePolicy) -> bool {
        let selected = self.listbox.selected();
        match policy {
            ValuePolicy::Unclearable => selected.is_some(),
            ValuePolicy::Clearable => {
                selected.is_some()
                    || (self.filter_text.is_empty() && self.value.as_deref() == Some(""))
            }
            ValuePolicy::AnyValue => match selected.and_then(|id| self.listbox.get(id)) {
                Some(option) => option.label() == self.filter_text,
                None => true,
            },
        }
    }

    /// Re-derive a valid value/selection pair after the policy changed
    ///
    /// A pair that is already valid is kept. Otherwise, first match wins:
    /// empty text takes the zero-value option (or clears, where allowed), an
    /// autoselectable option is selected, `AnyValue` accepts the text, and
    /// anything else falls back to the form-reset algorithm.
    pub(super) fn transition_policy(&mut self, policy: ValuePolicy) {
        tracing::debug!(field = %self.config.id, ?policy, "policy transition");

        if self.listbox.is_empty() {
            return;
        }

        if self.is_valid_under(policy) {
            if policy == ValuePolicy::AnyValue && self.listbox.selected().is_none() {
                self.value = Some(self.filter_text.clone());
            }
            return;
        }

        if self.filter_text.is_empty() {
            if let Some(zero) = self.listbox.find_by_value("") {
                self.commit_option(zero);
                return;
            }
            if policy.accepts_empty() {
                self.listbox.deselect_all();
                self.value = Some(String::new());
                return;
            }
        }

        if let Some(id) = self.autoselectable {
            self.commit_option(id);
            return;
        }

        if policy == ValuePolicy::AnyValue {
            self.listbox.deselect_all();
            self.value = Some(self.filter_text.clone());
            return;
        }

        self.reset_to_default();
    }

    /// One reconciliation pass for a batch of structural mutations
    pub(super) fn reconcile_options(&mut self, record: &BatchRecord<OptionId>) {
        tracing::debug!(
            field = %self.config.id,
            mutations = record.len(),
            options = self.listbox.len(),
            "reconciling options"
        );

        if self.active.is_some_and(|id| !self.listbox.contains(id)) {
            self.active = None;
        }
        if self.autoselectable.is_some_and(|id| !self.listbox.contains(id)) {
            self.autoselectable = None;
        }

        if self.listbox.is_empty() {
            self.clear_to_uninitialized();
            return;
        }

        let selected = self.listbox.selected();
        let inserted_default = record
            .inserted()
            .any(|id| self.listbox.get(id).is_some_and(|o| o.is_default_selected()));

        if (record.selected_removed() && selected.is_none()) || inserted_default {
            match self.listbox.last_default_selected() {
                Some(id) => self.commit_option(id),
                None => self.reset_to_default(),
            }
        } else if selected.is_none()
            && (self.value.is_none() || self.policy() == ValuePolicy::Unclearable)
        {
            if let Some(first) = self.listbox.first() {
                self.commit_option(first);
            }
        }

        if self.listbox.is_filtering() {
            self.autoselectable = self.listbox.exact_match(&self.filter_text);
        }
    }
}
