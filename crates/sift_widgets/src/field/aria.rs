//! Accessibility snapshots
//!
//! The host mirrors these onto its elements verbatim. Values are the exact
//! attribute strings.

use super::ComboboxField;
use crate::option::{option_dom_id, OptionId};

/// Attributes of the field's input element
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldAria {
    pub role: &'static str,
    pub aria_haspopup: &'static str,
    pub aria_expanded: &'static str,
    pub aria_controls: String,
    /// Active option's id; empty when collapsed or nothing is active
    pub aria_activedescendant: String,
}

/// Attributes of the listbox element
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListboxAria {
    pub role: &'static str,
    pub id: String,
    /// The popup is hidden while collapsed
    pub hidden: bool,
}

/// Attributes of one option element
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionAria {
    pub role: &'static str,
    pub id: String,
    pub aria_selected: &'static str,
    /// Visual-only `data-active` marker
    pub active: bool,
    pub hidden: bool,
    pub disabled: bool,
}

fn bool_attr(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

impl ComboboxField {
    fn listbox_dom_id(&self) -> String {
        format!("{}-listbox", self.config.id)
    }

    pub fn aria(&self) -> FieldAria {
        let activedescendant = match (self.expanded, self.active) {
            (true, Some(id)) => self
                .listbox
                .get(id)
                .map(|o| option_dom_id(&self.config.id, o.value()))
                .unwrap_or_default(),
            _ => String::new(),
        };

        FieldAria {
            role: "combobox",
            aria_haspopup: "listbox",
            aria_expanded: bool_attr(self.expanded),
            aria_controls: self.listbox_dom_id(),
            aria_activedescendant: activedescendant,
        }
    }

    pub fn listbox_aria(&self) -> ListboxAria {
        ListboxAria {
            role: "listbox",
            id: self.listbox_dom_id(),
            hidden: !self.expanded,
        }
    }

    pub fn option_aria(&self, id: OptionId) -> Option<OptionAria> {
        let option = self.listbox.get(id)?;
        Some(OptionAria {
            role: "option",
            id: option_dom_id(&self.config.id, option.value()),
            aria_selected: bool_attr(option.is_selected()),
            active: self.expanded && self.active == Some(id),
            hidden: !self.listbox.is_visible(id),
            disabled: option.is_disabled(),
        })
    }
}
