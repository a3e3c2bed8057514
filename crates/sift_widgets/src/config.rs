//! Field configuration
//!
//! [`FieldConfig`] carries every attribute the field understands. It can be
//! built with the builder-style setters, deserialized (any serde format; the
//! enhancement wrapper reads TOML), or assembled attribute by attribute.

use serde::{Deserialize, Serialize};

/// Value-acceptance policy for free text typed into a filterable field
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValuePolicy {
    /// Any text becomes the committed value
    AnyValue,
    /// Only option values are accepted
    Unclearable,
    /// Option values, or the empty string
    #[default]
    Clearable,
}

impl ValuePolicy {
    /// Parse the attribute spelling (`anyvalue`, `unclearable`, `clearable`)
    pub fn from_attr(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "anyvalue" => Some(ValuePolicy::AnyValue),
            "unclearable" => Some(ValuePolicy::Unclearable),
            "clearable" => Some(ValuePolicy::Clearable),
            _ => None,
        }
    }

    pub fn as_attr(&self) -> &'static str {
        match self {
            ValuePolicy::AnyValue => "anyvalue",
            ValuePolicy::Unclearable => "unclearable",
            ValuePolicy::Clearable => "clearable",
        }
    }

    /// Whether `""` is an acceptable committed value without a matching option
    pub fn accepts_empty(&self) -> bool {
        !matches!(self, ValuePolicy::Unclearable)
    }
}

/// How option labels are compared with the filter text or typeahead search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterMethod {
    /// Label starts with the query (case-insensitive)
    #[default]
    #[serde(rename = "startsWith")]
    StartsWith,
    /// Label contains the query (case-insensitive)
    #[serde(rename = "includes")]
    Includes,
}

impl FilterMethod {
    pub fn from_attr(value: &str) -> Option<Self> {
        match value.trim() {
            "startsWith" => Some(FilterMethod::StartsWith),
            "includes" => Some(FilterMethod::Includes),
            _ => None,
        }
    }

    pub fn as_attr(&self) -> &'static str {
        match self {
            FilterMethod::StartsWith => "startsWith",
            FilterMethod::Includes => "includes",
        }
    }

    /// Check whether `label` matches `query`
    ///
    /// An empty query matches everything.
    pub fn matches(&self, label: &str, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let label_lower = label.to_lowercase();
        let query_lower = query.to_lowercase();
        match self {
            FilterMethod::StartsWith => label_lower.starts_with(&query_lower),
            FilterMethod::Includes => label_lower.contains(&query_lower),
        }
    }
}

/// Combobox field configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Identity of the field; option and listbox ids derive from it
    #[serde(default)]
    pub id: String,
    /// Name used for form submission
    #[serde(default)]
    pub name: Option<String>,
    /// The field must hold a non-empty value to be valid
    #[serde(default)]
    pub required: bool,
    /// Disabled fields ignore user input and are not submitted
    #[serde(default)]
    pub disabled: bool,
    /// Allow free-text filtering
    #[serde(default)]
    pub filter: bool,
    #[serde(default, rename = "filtermethod", alias = "filter_method")]
    pub filter_method: FilterMethod,
    /// Value-acceptance policy (only meaningful when filtering)
    #[serde(default, rename = "valueis", alias = "value_is")]
    pub value_is: ValuePolicy,
    /// Placeholder shown when filtering matches nothing
    #[serde(default, rename = "nomatchesmessage", alias = "no_matches_message")]
    pub no_matches_message: Option<String>,
}

impl FieldConfig {
    /// Create a config for the field with the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Enable free-text filtering
    pub fn filter(mut self, filter: bool) -> Self {
        self.filter = filter;
        self
    }

    pub fn filter_method(mut self, method: FilterMethod) -> Self {
        self.filter_method = method;
        self
    }

    pub fn value_is(mut self, policy: ValuePolicy) -> Self {
        self.value_is = policy;
        self
    }

    pub fn no_matches_message(mut self, message: impl Into<String>) -> Self {
        self.no_matches_message = Some(message.into());
        self
    }

    /// The policy actually in force: non-filterable fields never show
    /// arbitrary text, so they behave as `Unclearable`
    pub fn effective_policy(&self) -> ValuePolicy {
        if self.filter {
            self.value_is
        } else {
            ValuePolicy::Unclearable
        }
    }
}
