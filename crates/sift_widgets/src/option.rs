//! Option entity - a single selectable choice
//!
//! Options hold state only. Every change that matters to selection goes
//! through the owning [`ComboboxField`](crate::field::ComboboxField), which
//! arbitrates exclusivity between siblings; options never coordinate with
//! each other.
//!
//! # Example
//!
//! ```rust
//! use sift_widgets::option::ComboboxOption;
//!
//! let option = ComboboxOption::new("us", "United States").default_selected(true);
//! assert_eq!(option.value(), "us");
//! assert_eq!(option.label(), "United States");
//!
//! // Without an explicit label, the value is displayed
//! let bare = ComboboxOption::with_value("Apple");
//! assert_eq!(bare.label(), "Apple");
//! ```

use slotmap::new_key_type;

new_key_type! {
    /// Unique identifier for an option within its listbox
    pub struct OptionId;
}

/// An option in the combobox listbox
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComboboxOption {
    /// Submission identity
    value: String,
    /// Display content the option was created with
    text: String,
    /// Explicit label overriding the display content
    label: Option<String>,
    /// Current selectedness
    selected: bool,
    /// Declarative "selected on creation/reset" flag
    default_selected: bool,
    /// Excluded from user selection and active traversal
    disabled: bool,
}

impl ComboboxOption {
    /// Create a new option with value and display text
    pub fn new(value: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            text: text.into(),
            label: None,
            selected: false,
            default_selected: false,
            disabled: false,
        }
    }

    /// Create an option whose display text is its initial value
    ///
    /// The text is captured once: changing the value later leaves the label.
    pub fn with_value(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            text: value.clone(),
            value,
            label: None,
            selected: false,
            default_selected: false,
            disabled: false,
        }
    }

    /// Mark this option as selected on creation and on form reset
    pub fn default_selected(mut self, default_selected: bool) -> Self {
        self.default_selected = default_selected;
        self
    }

    /// Mark this option as disabled
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The explicit label, or the display text
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.text)
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_default_selected(&self) -> bool {
        self.default_selected
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    // Mutators are crate-private: the field is the only writer.

    pub(crate) fn set_value(&mut self, value: String) {
        self.value = value;
    }

    pub(crate) fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn set_default_selected(&mut self, default_selected: bool) {
        self.default_selected = default_selected;
    }

    pub(crate) fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}

/// Derive the DOM id of an option: `{field_id}-option-{value}`
pub fn option_dom_id(field_id: &str, value: &str) -> String {
    format!("{}-option-{}", field_id, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_builder() {
        let option = ComboboxOption::new("de", "Germany")
            .default_selected(true)
            .disabled(true);

        assert_eq!(option.value(), "de");
        assert_eq!(option.label(), "Germany");
        assert!(option.is_default_selected());
        assert!(option.is_disabled());
        assert!(!option.is_selected());
    }

    #[test]
    fn test_label_keeps_display_text() {
        let mut option = ComboboxOption::with_value("Cherry");
        assert_eq!(option.label(), "Cherry");

        option.set_value("Plum".to_string());
        assert_eq!(option.value(), "Plum");
        assert_eq!(option.label(), "Cherry");

        option.set_label(Some("Damson".to_string()));
        assert_eq!(option.label(), "Damson");

        option.set_label(None);
        assert_eq!(option.label(), "Cherry");
    }

    #[test]
    fn test_option_dom_id() {
        assert_eq!(option_dom_id("fruit", "apple"), "fruit-option-apple");
    }
}
