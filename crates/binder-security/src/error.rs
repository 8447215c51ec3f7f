//! Error types for binder-security

/// Result type for binder-security operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while initializing mode detection from a graph
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Two inspected token-parameter slots disagree on the derived-keys
    /// flag. The graph cannot be initialized from a single consistent
    /// setting and is treated as unmapped rather than guessed at.
    #[error("conflicting derived-keys settings across token parameter slots")]
    AmbiguousDerivedKeys,
}
