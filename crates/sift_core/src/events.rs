//! Input events delivered by the host environment
//!
//! The engine never reads a platform event loop itself. The host translates
//! its native keyboard, text, focus and pointer events into [`Event`]s and
//! hands them to the field, which answers with an [`EventResponse`] telling
//! the host whether to suppress the default action (page scroll, focus
//! advance, form submission).

/// A keyboard key, identified by a stable code
///
/// Printable characters are not keys: they arrive as
/// [`EventData::TextInput`] so that layout-dependent text is resolved by the
/// host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct KeyCode(pub u32);

impl KeyCode {
    pub const BACKSPACE: KeyCode = KeyCode(8);
    pub const TAB: KeyCode = KeyCode(9);
    pub const ENTER: KeyCode = KeyCode(13);
    pub const ESCAPE: KeyCode = KeyCode(27);
    pub const SPACE: KeyCode = KeyCode(32);
    pub const PAGE_UP: KeyCode = KeyCode(33);
    pub const PAGE_DOWN: KeyCode = KeyCode(34);
    pub const END: KeyCode = KeyCode(35);
    pub const HOME: KeyCode = KeyCode(36);
    pub const LEFT: KeyCode = KeyCode(37);
    pub const UP: KeyCode = KeyCode(38);
    pub const RIGHT: KeyCode = KeyCode(39);
    pub const DOWN: KeyCode = KeyCode(40);
    pub const DELETE: KeyCode = KeyCode(46);
}

/// Modifier keys held during a key event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(1 << 1);
    pub const ALT: Modifiers = Modifiers(1 << 2);
    pub const META: Modifiers = Modifiers(1 << 3);

    pub fn shift(&self) -> bool {
        self.0 & Self::SHIFT.0 != 0
    }

    pub fn ctrl(&self) -> bool {
        self.0 & Self::CTRL.0 != 0
    }

    pub fn alt(&self) -> bool {
        self.0 & Self::ALT.0 != 0
    }

    pub fn meta(&self) -> bool {
        self.0 & Self::META.0 != 0
    }

    /// Ctrl or Meta (platform "command" key)
    pub fn command(&self) -> bool {
        self.ctrl() || self.meta()
    }

    /// Combine two modifier sets
    pub fn with(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }
}

/// Event payloads understood by the combobox field
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EventData {
    /// A non-printable key was pressed
    Key { key: KeyCode, modifiers: Modifiers },
    /// A printable keystroke (used for typeahead on non-filterable fields)
    TextInput { text: String },
    /// The user edited the field's text; carries the complete new text
    Input { text: String },
    /// The field itself was clicked
    Click,
    /// The field received focus
    FocusIn,
    /// Focus left the field (and its listbox)
    FocusOut,
}

/// An input event from the host
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub data: EventData,
}

impl Event {
    /// A key press without modifiers
    pub fn key(key: KeyCode) -> Self {
        Self::key_with(key, Modifiers::NONE)
    }

    /// A key press with modifiers
    pub fn key_with(key: KeyCode, modifiers: Modifiers) -> Self {
        Self {
            data: EventData::Key { key, modifiers },
        }
    }

    /// A printable keystroke
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            data: EventData::TextInput { text: text.into() },
        }
    }

    /// The field's editable text changed to `text`
    pub fn input(text: impl Into<String>) -> Self {
        Self {
            data: EventData::Input { text: text.into() },
        }
    }

    pub fn click() -> Self {
        Self {
            data: EventData::Click,
        }
    }

    pub fn focus_in() -> Self {
        Self {
            data: EventData::FocusIn,
        }
    }

    pub fn focus_out() -> Self {
        Self {
            data: EventData::FocusOut,
        }
    }
}

/// What the host should do with the native default action of an event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// The default action (scrolling, focus advance, text entry) must be suppressed
    pub default_prevented: bool,
}

impl EventResponse {
    /// Let the default action run
    pub const PROCEED: EventResponse = EventResponse {
        default_prevented: false,
    };

    /// Suppress the default action
    pub const PREVENT: EventResponse = EventResponse {
        default_prevented: true,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_combine() {
        let mods = Modifiers::ALT.with(Modifiers::SHIFT);
        assert!(mods.alt());
        assert!(mods.shift());
        assert!(!mods.ctrl());
        assert!(!mods.command());

        assert!(Modifiers::META.command());
        assert!(Modifiers::CTRL.command());
    }

    #[test]
    fn test_event_constructors() {
        assert_eq!(
            Event::key(KeyCode::DOWN).data,
            EventData::Key {
                key: KeyCode::DOWN,
                modifiers: Modifiers::NONE
            }
        );
        assert_eq!(
            Event::input("Se").data,
            EventData::Input {
                text: "Se".to_string()
            }
        );
    }
}
