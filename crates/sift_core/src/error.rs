//! Error types for Sift

use thiserror::Error;

/// Errors that can occur while constructing or configuring a combobox
///
/// Normal user interaction never produces an error; these cover fatal
/// configuration problems only.
#[derive(Error, Debug)]
pub enum SiftError {
    /// The field has no identity, so option and listbox ids can't be derived
    #[error("combobox field requires a non-empty id")]
    MissingId,

    /// A declarative source could not be parsed
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for Sift operations
pub type Result<T> = std::result::Result<T, SiftError>;
