//! Source locations for declarative configuration entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The originating declaration of a configuration entry.
///
/// Carried through errors so an operator can find the exact declarative
/// entry responsible for a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Path (or logical name) of the configuration file.
    pub file: String,
    /// 1-based line of the declaration, when known.
    pub line: Option<u32>,
}

impl SourceLocation {
    pub fn new(file: impl Into<String>, line: Option<u32>) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.file, line),
            None => write!(f, "{}", self.file),
        }
    }
}
