//! Error types for binder-schema

use crate::location::SourceLocation;

/// Result type for binder-schema operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while declaring or decoding property schemas
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A raw property name is not declared by the element's schema.
    #[error("unknown property '{name}'{}", fmt_location(.location))]
    UnknownProperty {
        name: String,
        location: Option<SourceLocation>,
    },

    /// A required property was not supplied and has no default.
    #[error("missing required property '{name}'")]
    MissingProperty { name: String },

    /// A raw value could not be converted or failed its validator.
    #[error("invalid value for property '{name}': {reason}{}", fmt_location(.location))]
    InvalidValue {
        name: String,
        reason: String,
        location: Option<SourceLocation>,
    },

    /// The same raw property name was supplied more than once.
    #[error("property '{name}' supplied more than once")]
    DuplicateProperty { name: String },

    /// A schema declared two specs with the same name.
    #[error("schema declares duplicate property spec '{name}'")]
    DuplicateSpec { name: String },
}

fn fmt_location(location: &Option<SourceLocation>) -> String {
    match location {
        Some(loc) => format!(" ({loc})"),
        None => String::new(),
    }
}
