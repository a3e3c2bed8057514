//! Combobox field - the value/filter state machine
//!
//! The field owns the committed value, the displayed filter text, the
//! active (highlighted) option, the expansion state and the acceptance
//! policy, and it is the single arbiter for every option's selection flags.
//!
//! Three surfaces are kept consistent after every trigger:
//!
//! 1. the displayed text ([`ComboboxField::filter_text`]),
//! 2. the committed form value ([`ComboboxField::value`]),
//! 3. the options' `selected` / `default_selected` flags.
//!
//! At every quiescent point the value is either the value of the single
//! selected option, or (only under `AnyValue`, or `Clearable` with empty
//! text) the raw text with nothing selected.
//!
//! # Structural mutations
//!
//! Inserting, removing, moving or replacing options is recorded and
//! reconciled once per turn. The host runs the checkpoint with
//! [`ComboboxField::flush_mutations`] (its microtask-equivalent); every user
//! input entry point runs it first, and [`ComboboxField::batch`] runs it when
//! the outermost batch closes.
//!
//! # Example
//!
//! ```rust
//! use sift_widgets::prelude::*;
//!
//! let mut field = ComboboxField::with_options(
//!     FieldConfig::new("fruit").name("fruit"),
//!     [
//!         ComboboxOption::with_value("Apple"),
//!         ComboboxOption::with_value("Banana"),
//!     ],
//! )
//! .unwrap();
//!
//! assert_eq!(field.value(), Some("Apple"));
//!
//! field.handle_event(&Event::key(KeyCode::END));
//! field.handle_event(&Event::key(KeyCode::ENTER));
//! assert_eq!(field.value(), Some("Banana"));
//! assert_eq!(field.take_events(), vec![FieldEvent::Input, FieldEvent::Change]);
//! ```

mod aria;
mod attributes;
mod form;
mod keyboard;
mod reconcile;


pub use aria::{FieldAria, ListboxAria, OptionAria};
pub use form::{ControlTag, FormOwner, SubmitControl, ValidityState};

use indexmap::IndexMap;
use sift_core::batch::{Mutation, MutationBatch};
use sift_core::error::{Result, SiftError};
use sift_core::notify::Outbox;

use crate::config::{FieldConfig, FilterMethod, ValuePolicy};
use crate::listbox::Listbox;
use crate::option::{ComboboxOption, OptionId};
use crate::typeahead::Typeahead;

/// Notifications the field dispatches to the host
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldEvent {
    /// The committed value changed through user interaction
    Input,
    /// Fired right after `Input` for the same change
    Change,
    /// Constraint validation failed
    Invalid,
    /// Implicit form submission was requested (`Enter` on a collapsed field)
    Submit {
        /// Id of the control acting as submitter, if any
        submitter: Option<String>,
    },
}

/// A headless, form-associated single-select combobox
pub struct ComboboxField {
    config: FieldConfig,
    listbox: Listbox,
    /// Committed value (None only while the listbox is empty)
    value: Option<String>,
    /// Displayed / editable text
    filter_text: String,
    /// Highlighted option within the matching subset
    active: Option<OptionId>,
    /// Option whose label exactly matches the filter text (transient)
    autoselectable: Option<OptionId>,
    expanded: bool,
    focused: bool,
    mutations: MutationBatch<OptionId>,
    typeahead: Typeahead,
    events: Outbox<FieldEvent>,
    form: Option<FormOwner>,
    custom_validity: String,
    /// Every attribute forwarded to the field, in insertion order
    attributes: IndexMap<String, String>,
}

impl std::fmt::Debug for ComboboxField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComboboxField")
            .field("id", &self.config.id)
            .field("value", &self.value)
            .field("filter_text", &self.filter_text)
            .field("expanded", &self.expanded)
            .field("policy", &self.policy())
            .field("listbox", &self.listbox)
            .finish()
    }
}

impl ComboboxField {
    /// Create an empty field
    ///
    /// Fails when the configuration has no id.
    pub fn new(config: FieldConfig) -> Result<Self> {
        if config.id.trim().is_empty() {
            return Err(SiftError::MissingId);
        }

        let listbox = Listbox::new(config.filter_method);
        Ok(Self {
            config,
            listbox,
            value: None,
            filter_text: String::new(),
            active: None,
            autoselectable: None,
            expanded: false,
            focused: false,
            mutations: MutationBatch::new(),
            typeahead: Typeahead::new(),
            events: Outbox::new(),
            form: None,
            custom_validity: String::new(),
            attributes: IndexMap::new(),
        })
    }

    /// Create a field populated with initial options, already reconciled
    pub fn with_options(
        config: FieldConfig,
        options: impl IntoIterator<Item = ComboboxOption>,
    ) -> Result<Self> {
        let mut field = Self::new(config)?;
        for option in options {
            field.append_option(option);
        }
        field.flush_mutations();
        Ok(field)
    }

    // =========================================================================
    // State accessors
    // =========================================================================

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn listbox(&self) -> &Listbox {
        &self.listbox
    }

    /// Committed value; `None` only while there are no options
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Displayed text
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn selected_option(&self) -> Option<OptionId> {
        self.listbox.selected()
    }

    pub fn active_option(&self) -> Option<OptionId> {
        self.active
    }

    /// Position of the active option within the matching subset
    pub fn active_index(&self) -> Option<usize> {
        self.active
            .and_then(|id| self.listbox.matching_index_of(id))
    }

    pub fn autoselectable_option(&self) -> Option<OptionId> {
        self.autoselectable
    }

    pub fn option(&self, id: OptionId) -> Option<&ComboboxOption> {
        self.listbox.get(id)
    }

    /// Position of an option among its siblings
    pub fn option_index(&self, id: OptionId) -> Option<usize> {
        self.listbox.index_of(id)
    }

    /// The acceptance policy in force (`Unclearable` unless filtering)
    pub fn policy(&self) -> ValuePolicy {
        self.config.effective_policy()
    }

    pub fn is_filterable(&self) -> bool {
        self.config.filter
    }

    pub fn is_disabled(&self) -> bool {
        self.config.disabled
    }

    /// The "no matches" placeholder, when it should be shown
    ///
    /// The placeholder is never an option: traversal and matching ignore it.
    pub fn no_matches_message(&self) -> Option<&str> {
        let filtering = self.config.filter && self.expanded && self.listbox.is_filtering();
        if filtering && !self.listbox.is_empty() && self.listbox.matching().is_empty() {
            self.config.no_matches_message.as_deref()
        } else {
            None
        }
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Drain dispatched notifications, oldest first
    pub fn take_events(&mut self) -> Vec<FieldEvent> {
        self.events.drain()
    }

    /// Subscribe to notifications as they are dispatched
    pub fn on_event<F: FnMut(&FieldEvent) + Send + 'static>(&mut self, listener: F) {
        self.events.subscribe(listener);
    }

    /// Fire `input` then `change` if a user action changed the value
    fn notify_if_changed(&mut self, previous: &Option<String>) {
        if *previous != self.value {
            self.events.dispatch(FieldEvent::Input);
            self.events.dispatch(FieldEvent::Change);
        }
    }

    // =========================================================================
    // Structural mutations (batched)
    // =========================================================================

    /// Append an option; reconciled at the next checkpoint
    pub fn append_option(&mut self, option: ComboboxOption) -> OptionId {
        self.insert_option(usize::MAX, option)
    }

    /// Insert an option at `index` (clamped); reconciled at the next checkpoint
    pub fn insert_option(&mut self, index: usize, option: ComboboxOption) -> OptionId {
        let id = self.listbox.insert(index, option);
        self.mutations.record(Mutation::Inserted(id));
        id
    }

    /// Remove (and destroy) an option; reconciled at the next checkpoint
    pub fn remove_option(&mut self, id: OptionId) -> Option<ComboboxOption> {
        let option = self.listbox.remove(id)?;
        self.mutations.record(Mutation::Removed {
            id,
            was_selected: option.is_selected(),
        });
        Some(option)
    }

    /// Move an option to `index` (clamped); observed as a re-insertion
    pub fn move_option(&mut self, id: OptionId, index: usize) -> bool {
        if !self.listbox.move_to(id, index) {
            return false;
        }
        self.mutations.record(Mutation::Moved(id));
        true
    }

    /// Replace every option; one reconciliation covers removal and insertion
    pub fn replace_options(
        &mut self,
        options: impl IntoIterator<Item = ComboboxOption>,
    ) -> Vec<OptionId> {
        let old: Vec<OptionId> = self.listbox.ids().to_vec();
        for id in old {
            self.remove_option(id);
        }
        options
            .into_iter()
            .map(|option| self.append_option(option))
            .collect()
    }

    /// Run `f` as one batch; reconciliation runs once when the outermost batch ends
    pub fn batch<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut Self) -> R,
    {
        self.mutations.batch_start();
        let result = f(self);
        if self.mutations.batch_end() {
            self.flush_mutations();
        }
        result
    }

    /// Checkpoint: reconcile pending structural mutations
    ///
    /// Returns `true` if a reconciliation pass ran.
    pub fn flush_mutations(&mut self) -> bool {
        match self.mutations.take() {
            Some(record) => {
                self.reconcile_options(&record);
                true
            }
            None => false,
        }
    }

    /// Whether structural mutations are waiting for a checkpoint
    pub fn has_pending_mutations(&self) -> bool {
        self.mutations.has_pending()
    }

    /// Number of reconciliation passes run so far
    pub fn reconciliation_count(&self) -> u64 {
        self.mutations.flush_count()
    }

    // =========================================================================
    // Programmatic value
    // =========================================================================

    /// Assign the committed value programmatically
    ///
    /// Returns `false` when the value was rejected: no options exist, or no
    /// option carries the value and the policy doesn't accept it as text.
    /// Rejection keeps the previous state and dispatches nothing.
    pub fn set_value(&mut self, value: &str) -> bool {
        if self.listbox.is_empty() {
            tracing::trace!(value, "value rejected: no options");
            return false;
        }

        if let Some(id) = self.listbox.find_by_value(value) {
            self.commit_option(id);
            return true;
        }

        match self.policy() {
            ValuePolicy::AnyValue => {
                self.listbox.deselect_all();
                self.value = Some(value.to_string());
                self.filter_text = value.to_string();
                self.autoselectable = None;
                true
            }
            ValuePolicy::Clearable if value.is_empty() => {
                self.force_empty_value();
                true
            }
            _ => {
                tracing::trace!(value, policy = ?self.policy(), "value rejected: no matching option");
                false
            }
        }
    }

    // =========================================================================
    // Option mutations (narrow reconciliation)
    // =========================================================================

    /// Set an option's selectedness
    pub fn set_option_selected(&mut self, id: OptionId, selected: bool) {
        let Some(option) = self.listbox.get(id) else {
            return;
        };
        let currently = option.is_selected();

        if selected {
            if !currently {
                self.commit_option(id);
            }
        } else if currently {
            if let Some(option) = self.listbox.get_mut(id) {
                option.set_selected(false);
            }
            self.reconcile_deselection();
        }
    }

    /// Set an option's default-selected flag; selectedness follows it
    pub fn set_option_default_selected(&mut self, id: OptionId, default_selected: bool) {
        let Some(option) = self.listbox.get_mut(id) else {
            return;
        };
        if option.is_default_selected() == default_selected {
            return;
        }
        option.set_default_selected(default_selected);
        self.set_option_selected(id, default_selected);
    }

    /// Change an option's value; the committed value follows if it is selected
    ///
    /// The label and the displayed text are left alone.
    pub fn set_option_value(&mut self, id: OptionId, value: impl Into<String>) {
        let value = value.into();
        let Some(option) = self.listbox.get_mut(id) else {
            return;
        };
        option.set_value(value.clone());
        if option.is_selected() {
            self.value = Some(value);
        }
    }

    /// Override an option's label (`None` = back to its display text)
    pub fn set_option_label(&mut self, id: OptionId, label: Option<String>) {
        let Some(option) = self.listbox.get_mut(id) else {
            return;
        };
        option.set_label(label);
        let selected = option.is_selected();
        let label = option.label().to_string();

        self.listbox.refresh_matching();
        if selected && !self.is_user_filtering() {
            self.filter_text = label;
        }
    }

    pub fn set_option_disabled(&mut self, id: OptionId, disabled: bool) {
        let Some(option) = self.listbox.get_mut(id) else {
            return;
        };
        option.set_disabled(disabled);
        if disabled && self.active == Some(id) {
            self.active = None;
        }
        if disabled && self.autoselectable == Some(id) {
            self.autoselectable = None;
        }
    }

    /// The user is editing the text of an open filterable field
    fn is_user_filtering(&self) -> bool {
        self.config.filter && self.expanded
    }

    // =========================================================================
    // Live configuration
    // =========================================================================

    /// Change the acceptance policy, re-deriving a valid value/selection
    pub fn set_value_is(&mut self, policy: ValuePolicy) {
        if self.config.value_is == policy {
            return;
        }
        self.config.value_is = policy;
        if self.config.filter {
            self.transition_policy(policy);
        }
    }

    /// Enable or disable free-text filtering
    pub fn set_filter(&mut self, filter: bool) {
        if self.config.filter == filter {
            return;
        }
        self.config.filter = filter;
        if !filter {
            self.transition_policy(ValuePolicy::Unclearable);
            self.sync_text_to_selection();
            self.listbox.clear_filter();
            self.autoselectable = None;
            if self.expanded {
                self.active = self.default_active();
            }
        }
    }

    pub fn set_filter_method(&mut self, method: FilterMethod) {
        self.config.filter_method = method;
        self.listbox.set_filter_method(method);
        if self.listbox.is_filtering() {
            self.autoselectable = self.listbox.exact_match(&self.filter_text);
            if self.active.is_some_and(|id| !self.listbox.is_eligible(id)) {
                self.active = self.autoselectable;
            }
        }
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.config.disabled = disabled;
        if disabled && self.expanded {
            self.collapse_and_restore();
        }
    }

    pub fn set_required(&mut self, required: bool) {
        self.config.required = required;
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.config.name = name;
    }

    pub fn set_no_matches_message(&mut self, message: Option<String>) {
        self.config.no_matches_message = message;
    }
}
