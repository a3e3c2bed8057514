//! Form association: reset, constraint validation, submission

use super::{ComboboxField, FieldEvent};

/// Message reported when a required field has no value
pub const VALUE_MISSING_MESSAGE: &str = "Please select an item in the list.";

/// Element kind of a form control that may act as a submitter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlTag {
    Button,
    Input,
    Other,
}

/// A control of the owning form, as far as implicit submission cares
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmitControl {
    pub id: String,
    pub tag: ControlTag,
    /// The raw `type` attribute, if present
    pub type_attr: Option<String>,
    pub disabled: bool,
}

impl SubmitControl {
    /// A `<button>` with no explicit type (a submit button by default)
    pub fn button(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: ControlTag::Button,
            type_attr: None,
            disabled: false,
        }
    }

    /// An `<input>` with the given type
    pub fn input(id: impl Into<String>, type_attr: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tag: ControlTag::Input,
            type_attr: Some(type_attr.into()),
            disabled: false,
        }
    }

    pub fn with_type(mut self, type_attr: impl Into<String>) -> Self {
        self.type_attr = Some(type_attr.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Buttons submit unless typed `reset` or `button` (a missing or invalid
    /// type is the submit default); inputs only as `submit`/`image`
    pub fn is_submit_button(&self) -> bool {
        let kind = self
            .type_attr
            .as_deref()
            .map(|t| t.trim().to_ascii_lowercase());
        match self.tag {
            ControlTag::Button => !matches!(kind.as_deref(), Some("reset") | Some("button")),
            ControlTag::Input => matches!(kind.as_deref(), Some("submit") | Some("image")),
            ControlTag::Other => false,
        }
    }
}

/// The form owning the field, described by its controls in tree order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormOwner {
    pub controls: Vec<SubmitControl>,
}

impl FormOwner {
    pub fn new(controls: Vec<SubmitControl>) -> Self {
        Self { controls }
    }

    /// Resolve the submitter for implicit submission
    fn implicit_submitter(&self) -> ImplicitSubmitter<'_> {
        let mut buttons = self
            .controls
            .iter()
            .filter(|c| c.is_submit_button())
            .peekable();
        if buttons.peek().is_none() {
            return ImplicitSubmitter::Form;
        }
        match buttons.find(|c| !c.disabled) {
            Some(control) => ImplicitSubmitter::Control(control),
            None => ImplicitSubmitter::Blocked,
        }
    }
}

/// Outcome of submitter resolution
enum ImplicitSubmitter<'a> {
    /// The first enabled submit button
    Control(&'a SubmitControl),
    /// No submit button at all: the form submits without a submitter
    Form,
    /// Every submit button is disabled: nothing is submitted
    Blocked,
}

/// Constraint validation state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ValidityState {
    pub value_missing: bool,
    pub custom_error: bool,
}

impl ValidityState {
    pub fn valid(&self) -> bool {
        !self.value_missing && !self.custom_error
    }
}

impl ComboboxField {
    /// Attach (or detach) the owning form
    pub fn set_form(&mut self, form: Option<FormOwner>) {
        self.form = form;
    }

    pub fn form(&self) -> Option<&FormOwner> {
        self.form.as_ref()
    }

    /// The owning form was reset: restore the default selection
    pub fn form_reset(&mut self) {
        self.flush_mutations();
        tracing::debug!(field = %self.config.id, "form reset");

        self.close();
        self.typeahead.reset();
        self.reset_to_default();
        self.listbox.clear_filter();
        self.autoselectable = None;
    }

    /// `(name, value)` for form submission, if the field is submittable
    pub fn form_value(&self) -> Option<(&str, &str)> {
        if self.config.disabled {
            return None;
        }
        let name = self.config.name.as_deref().filter(|n| !n.is_empty())?;
        Some((name, self.value.as_deref()?))
    }

    // =========================================================================
    // Constraint validation
    // =========================================================================

    /// Disabled fields are barred from constraint validation
    pub fn will_validate(&self) -> bool {
        !self.config.disabled
    }

    pub fn validity(&self) -> ValidityState {
        if !self.will_validate() {
            return ValidityState::default();
        }
        ValidityState {
            value_missing: self.config.required && self.value.as_deref().map_or(true, str::is_empty),
            custom_error: !self.custom_validity.is_empty(),
        }
    }

    /// Set a custom validation message; empty clears it
    pub fn set_custom_validity(&mut self, message: impl Into<String>) {
        self.custom_validity = message.into();
    }

    pub fn validation_message(&self) -> String {
        let validity = self.validity();
        if validity.custom_error {
            self.custom_validity.clone()
        } else if validity.value_missing {
            VALUE_MISSING_MESSAGE.to_string()
        } else {
            String::new()
        }
    }

    /// Check validity; fires `Invalid` when it fails
    pub fn check_validity(&mut self) -> bool {
        let valid = self.validity().valid();
        if !valid {
            self.events.dispatch(FieldEvent::Invalid);
        }
        valid
    }

    /// Check validity and report the problem to the user
    pub fn report_validity(&mut self) -> bool {
        let valid = self.check_validity();
        if !valid {
            tracing::debug!(
                field = %self.config.id,
                message = %self.validation_message(),
                "validity reported"
            );
        }
        valid
    }

    /// `Enter` on a collapsed field: submit the owning form
    pub(super) fn submit_implicitly(&mut self) {
        let Some(form) = self.form.as_ref() else {
            return;
        };
        let submitter = match form.implicit_submitter() {
            ImplicitSubmitter::Control(control) => Some(control.id.clone()),
            ImplicitSubmitter::Form => None,
            ImplicitSubmitter::Blocked => {
                tracing::trace!(field = %self.config.id, "implicit submission blocked: submitters disabled");
                return;
            }
        };

        if !self.report_validity() {
            return;
        }
        self.events.dispatch(FieldEvent::Submit { submitter });
    }
}
