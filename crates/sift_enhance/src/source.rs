//! Declarative select source
//!
//! A legacy-style description of a select: an attribute map and a list of
//! `{label, value, selected, disabled}` choices. It can be assembled with the
//! builder methods or loaded from TOML:
//!
//! ```toml
//! [attributes]
//! id = "fruit"
//! name = "fruit"
//! filter = ""
//!
//! [[options]]
//! label = "Apple"
//!
//! [[options]]
//! label = "Banana"
//! value = "banana"
//! selected = true
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sift_core::error::{Result, SiftError};
use sift_widgets::option::ComboboxOption;

/// One choice of the source
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceOption {
    #[serde(default)]
    pub label: String,
    /// Submission value; the label when absent
    #[serde(default)]
    pub value: Option<String>,
    /// Initially selected; becomes the option's default selection
    #[serde(default)]
    pub selected: bool,
    #[serde(default)]
    pub disabled: bool,
}

impl SourceOption {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Convert into a field option
    pub fn to_option(&self) -> ComboboxOption {
        let option = match &self.value {
            Some(value) if *value != self.label => ComboboxOption::new(value.clone(), self.label.clone()),
            _ => ComboboxOption::with_value(self.label.clone()),
        };
        option
            .default_selected(self.selected)
            .disabled(self.disabled)
    }
}

/// Attributes plus choices, observed once at enhancement time
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SelectSource {
    /// Attributes in declaration order
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
    #[serde(default)]
    pub options: Vec<SourceOption>,
}

impl SelectSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a source from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| SiftError::Config(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SiftError::Config(e.to_string()))
    }

    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn option(mut self, option: SourceOption) -> Self {
        self.options.push(option);
        self
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}
