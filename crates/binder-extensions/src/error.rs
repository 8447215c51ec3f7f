//! Error types for binder-extensions

/// Result type for binder-extensions operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving catalogs and mutating collections
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The evaluation scope chain exposes no extensions section.
    #[error("configuration section not found: {path}")]
    SectionNotFound { path: String },

    /// A type name explicitly required by a directive cannot be resolved.
    ///
    /// During whole-catalog scans unresolvable types are skipped with a
    /// warning instead; this error only surfaces when the entry was named
    /// directly by a deserialization directive.
    #[error("extension type could not be resolved: {type_name}")]
    TypeNotFound { type_name: String },

    /// An entry with the same declared name already exists.
    #[error("duplicate extension name '{name}' in collection '{collection}'")]
    DuplicateKey { name: String, collection: String },

    /// The entry's concrete type is not permitted for the collection's
    /// capability contract.
    #[error("type '{type_name}' is not allowed in collection '{collection}'")]
    ElementTypeNotAllowed {
        type_name: String,
        collection: String,
    },

    /// A deserialized element resolved to a type that does not satisfy the
    /// collection's capability contract.
    #[error(
        "element '{name}' resolved to type '{type_name}', which is not valid for collection '{collection}'"
    )]
    InvalidExtensionElement {
        name: String,
        type_name: String,
        collection: String,
    },

    /// A deserialized element's name is not present in the catalog.
    #[error("unrecognized element '{name}' in collection '{collection}'")]
    InvalidExtensionElementName { name: String, collection: String },

    /// Mutation was attempted on a finalized collection.
    #[error("collection '{collection}' is read-only")]
    ReadOnlyViolation { collection: String },

    /// Property decoding error from binder-schema
    #[error(transparent)]
    Schema(#[from] binder_schema::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),
}
