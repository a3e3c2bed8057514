//! Attribute surface
//!
//! Attributes are stored in insertion order. Recognized names are applied to
//! the live configuration; boolean attributes follow presence semantics.

use super::ComboboxField;
use crate::config::{FilterMethod, ValuePolicy};

/// Names applied to the live configuration; `id` is fixed at construction
const CONFIG_ATTRIBUTES: &[&str] = &[
    "id",
    "name",
    "required",
    "disabled",
    "filter",
    "filtermethod",
    "valueis",
    "nomatchesmessage",
];

impl ComboboxField {
    /// Set an attribute; recognized names reconfigure the field
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let name = name.to_ascii_lowercase();
        let value = value.into();
        self.apply_attribute(&name, Some(value.as_str()));
        self.attributes.insert(name, value);
    }

    /// Store an attribute without applying it
    ///
    /// For attributes the configuration already reflects, such as those a
    /// field was built from.
    pub fn record_attribute(&mut self, name: &str, value: impl Into<String>) {
        self.attributes.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Whether the name reconfigures the field when set
    pub fn is_config_attribute(name: &str) -> bool {
        CONFIG_ATTRIBUTES
            .iter()
            .any(|known| known.eq_ignore_ascii_case(name))
    }

    /// Remove an attribute; recognized names revert to their defaults
    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let name = name.to_ascii_lowercase();
        let removed = self.attributes.shift_remove(&name)?;
        self.apply_attribute(&name, None);
        Some(removed)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }

    /// All attributes in insertion order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.attributes
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    fn apply_attribute(&mut self, name: &str, value: Option<&str>) {
        match name {
            "name" => self.set_name(value.map(str::to_string)),
            "required" => self.set_required(value.is_some()),
            "disabled" => self.set_disabled(value.is_some()),
            "filter" => self.set_filter(value.is_some()),
            "filtermethod" => {
                let method = value.map_or(FilterMethod::default(), |raw| {
                    FilterMethod::from_attr(raw).unwrap_or_else(|| {
                        tracing::warn!(field = %self.config.id, value = raw, "unknown filtermethod");
                        FilterMethod::default()
                    })
                });
                self.set_filter_method(method);
            }
            "valueis" => {
                let policy = value.map_or(ValuePolicy::default(), |raw| {
                    ValuePolicy::from_attr(raw).unwrap_or_else(|| {
                        tracing::warn!(field = %self.config.id, value = raw, "unknown valueis");
                        ValuePolicy::default()
                    })
                });
                self.set_value_is(policy);
            }
            "nomatchesmessage" => self.set_no_matches_message(value.map(str::to_string)),
            _ => {}
        }
    }
}
