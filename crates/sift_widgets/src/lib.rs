//! Sift Widget Library
//!
//! Headless single-select combobox with free-text filtering and form
//! participation.
//!
//! # Architecture
//!
//! The combobox is split into three layers:
//!
//! 1. **Options**: passive state holders (value, label, selected flags).
//!    They never coordinate with each other.
//!
//! 2. **Listbox**: the ordered option collection, its matching subset under
//!    the current filter, and clamped active-pointer traversal.
//!
//! 3. **Field**: the arbiter. It owns the committed value and displayed
//!    text, applies the value-acceptance policy, reconciles structural
//!    mutations once per batch, and handles keyboard, text, focus and form
//!    events.
//!
//! Nothing renders: the host feeds [`Event`](sift_core::Event)s in, reads
//! state and accessibility snapshots out, and drains dispatched
//! [`FieldEvent`]s.
//!
//! # Example
//!
//! ```rust
//! use sift_widgets::prelude::*;
//!
//! let mut field = ComboboxField::with_options(
//!     FieldConfig::new("size").filter(true).value_is(ValuePolicy::AnyValue),
//!     [ComboboxOption::with_value("Small"), ComboboxOption::with_value("Large")],
//! )
//! .unwrap();
//!
//! field.handle_event(&Event::input("Medium"));
//! assert_eq!(field.value(), Some("Medium"));
//! assert_eq!(field.selected_option(), None);
//! ```

pub mod config;
pub mod field;
pub mod listbox;
pub mod option;
pub mod typeahead;

pub use config::{FieldConfig, FilterMethod, ValuePolicy};
pub use field::{
    ComboboxField, ControlTag, FieldAria, FieldEvent, FormOwner, ListboxAria, OptionAria,
    SubmitControl, ValidityState,
};
pub use listbox::{Listbox, Traverse};
pub use option::{option_dom_id, ComboboxOption, OptionId};
pub use typeahead::{Typeahead, TYPEAHEAD_TIMEOUT};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{FieldConfig, FilterMethod, ValuePolicy};
    pub use crate::field::{ComboboxField, FieldEvent, FormOwner, SubmitControl};
    pub use crate::option::{ComboboxOption, OptionId};
    pub use sift_core::events::{Event, EventResponse, KeyCode, Modifiers};
}
