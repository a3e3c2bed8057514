//! Sift Enhancement
//!
//! Turns a declarative [`SelectSource`] into a fully wired
//! [`ComboboxField`]. The source is observed once: its choices become the
//! field's initial options (with `selected` mapped to the default selection)
//! and every attribute is forwarded to the field. After that the wrapper
//! steps out of the way.
//!
//! # Example
//!
//! ```rust
//! use sift_enhance::{enhance, SelectSource, SourceOption};
//!
//! let source = SelectSource::new()
//!     .attribute("id", "fruit")
//!     .attribute("name", "fruit")
//!     .option(SourceOption::new("Apple"))
//!     .option(SourceOption::new("Banana").selected(true));
//!
//! let field = enhance(&source).unwrap();
//! assert_eq!(field.value(), Some("Banana"));
//! let (name, value) = sift_enhance::submission(&field).unwrap();
//! assert_eq!((name.as_str(), value.as_str()), ("fruit", "Banana"));
//! ```

pub mod source;

pub use source::{SelectSource, SourceOption};

use sift_core::error::{Result, SiftError};
use sift_widgets::config::{FieldConfig, FilterMethod, ValuePolicy};
use sift_widgets::field::ComboboxField;

/// Build the field configuration described by the source's attributes
///
/// Boolean attributes follow presence semantics. Unrecognized enumerated
/// values fall back to their defaults.
pub fn config_from_source(source: &SelectSource) -> Result<FieldConfig> {
    let id = source
        .get_attribute("id")
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(SiftError::MissingId)?;

    let mut config = FieldConfig::new(id)
        .required(source.get_attribute("required").is_some())
        .disabled(source.get_attribute("disabled").is_some())
        .filter(source.get_attribute("filter").is_some());

    if let Some(name) = source.get_attribute("name") {
        config = config.name(name);
    }
    if let Some(raw) = source.get_attribute("filtermethod") {
        config = config.filter_method(FilterMethod::from_attr(raw).unwrap_or_else(|| {
            tracing::warn!(field = id, value = raw, "unknown filtermethod");
            FilterMethod::default()
        }));
    }
    if let Some(raw) = source.get_attribute("valueis") {
        config = config.value_is(ValuePolicy::from_attr(raw).unwrap_or_else(|| {
            tracing::warn!(field = id, value = raw, "unknown valueis");
            ValuePolicy::default()
        }));
    }
    if let Some(message) = source.get_attribute("nomatchesmessage") {
        config = config.no_matches_message(message);
    }
    Ok(config)
}

/// Construct a wired field from a declarative source
///
/// Fails with [`SiftError::MissingId`] when the source has no `id`.
pub fn enhance(source: &SelectSource) -> Result<ComboboxField> {
    let config = config_from_source(source)?;
    let mut field = ComboboxField::with_options(
        config,
        source.options.iter().map(SourceOption::to_option),
    )?;

    // Configuration attributes were consumed by `config_from_source`
    for (name, value) in &source.attributes {
        if ComboboxField::is_config_attribute(name) {
            field.record_attribute(name, value.as_str());
        } else {
            field.set_attribute(name, value.as_str());
        }
    }

    tracing::debug!(
        field = %field.id(),
        options = source.options.len(),
        attributes = source.attributes.len(),
        "select enhanced"
    );
    Ok(field)
}

/// Read the field's committed value for external serialization
pub fn submission(field: &ComboboxField) -> Option<(String, String)> {
    field
        .form_value()
        .map(|(name, value)| (name.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fruit_source() -> SelectSource {
        SelectSource::new()
            .attribute("id", "fruit")
            .attribute("name", "fruit")
            .option(SourceOption::new("Apple"))
            .option(SourceOption::new("Banana"))
            .option(SourceOption::new("Cherry").disabled(true))
    }

    #[test]
    fn test_missing_id() {
        let source = SelectSource::new().option(SourceOption::new("Apple"));
        assert!(matches!(enhance(&source), Err(SiftError::MissingId)));

        let blank = SelectSource::new().attribute("id", " ");
        assert!(matches!(enhance(&blank), Err(SiftError::MissingId)));
    }

    #[test]
    fn test_enhance_builds_options() {
        let field = enhance(&fruit_source()).unwrap();

        assert_eq!(field.listbox().len(), 3);
        assert_eq!(field.value(), Some("Apple"));
        let cherry = field.listbox().ids()[2];
        assert!(field.option(cherry).unwrap().is_disabled());
    }

    #[test]
    fn test_selected_becomes_default() {
        let source = fruit_source().option(SourceOption::new("Date").selected(true));
        let mut field = enhance(&source).unwrap();
        assert_eq!(field.value(), Some("Date"));

        field.set_value("Banana");
        field.form_reset();
        assert_eq!(field.value(), Some("Date"));
    }

    #[test]
    fn test_attributes_forwarded() {
        let source = fruit_source()
            .attribute("filter", "")
            .attribute("valueIs", "anyvalue")
            .attribute("filterMethod", "includes")
            .attribute("class", "wide");
        let field = enhance(&source).unwrap();

        assert!(field.is_filterable());
        assert_eq!(field.policy(), ValuePolicy::AnyValue);
        assert_eq!(field.listbox().filter_method(), FilterMethod::Includes);
        assert_eq!(field.attribute("class"), Some("wide"));
        assert_eq!(field.attribute("id"), Some("fruit"));
    }

    #[test]
    fn test_config_attributes_applied_once() {
        let source = fruit_source()
            .attribute("disabled", "")
            .attribute("filter", "")
            .attribute("data-size", "l");
        let mut field = enhance(&source).unwrap();

        assert!(field.is_disabled());
        assert!(field.is_filterable());
        let names: Vec<&str> = field.attributes().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["id", "name", "disabled", "filter", "data-size"]);

        // Recorded attributes still revert on removal
        field.remove_attribute("disabled");
        assert!(!field.is_disabled());
    }

    #[test]
    fn test_unknown_policy_falls_back() {
        let source = fruit_source()
            .attribute("filter", "")
            .attribute("valueis", "sometimes");
        let config = config_from_source(&source).unwrap();
        assert_eq!(config.value_is, ValuePolicy::Clearable);
    }

    #[test]
    fn test_submission() {
        let mut field = enhance(&fruit_source()).unwrap();
        assert_eq!(
            submission(&field),
            Some(("fruit".to_string(), "Apple".to_string()))
        );

        field.set_disabled(true);
        assert_eq!(submission(&field), None);
    }

    #[test]
    fn test_enhance_from_toml() {
        let source = SelectSource::from_toml(
            r#"
[attributes]
id = "size"
name = "size"
filter = ""
valueis = "clearable"
required = ""

[[options]]
label = "Small"
value = "s"

[[options]]
label = "Large"
value = "l"
"#,
        )
        .unwrap();
        let mut field = enhance(&source).unwrap();

        assert_eq!(field.value(), Some("s"));
        assert_eq!(field.filter_text(), "Small");
        field.set_value("");
        assert!(!field.check_validity());
    }
}
