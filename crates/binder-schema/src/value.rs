//! Property value and semantic-type model.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic type of a declared property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyKind {
    /// Free-form text.
    Text,
    /// Boolean flag; raw values `true`/`false`.
    Flag,
    /// Signed integer.
    Integer,
    /// One of a fixed set of allowed strings.
    Choice { allowed: Vec<String> },
    /// A type-name string resolved later through the type registry.
    TypeName,
}

impl PropertyKind {
    /// Human-readable name used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            PropertyKind::Text => "text",
            PropertyKind::Flag => "flag",
            PropertyKind::Integer => "integer",
            PropertyKind::Choice { .. } => "choice",
            PropertyKind::TypeName => "type name",
        }
    }
}

/// A decoded, validated property value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropertyValue {
    Text(String),
    Flag(bool),
    Integer(i64),
    Choice(String),
    TypeName(String),
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Text(s) | PropertyValue::Choice(s) | PropertyValue::TypeName(s) => {
                write!(f, "{s}")
            }
            PropertyValue::Flag(b) => write!(f, "{b}"),
            PropertyValue::Integer(i) => write!(f, "{i}"),
        }
    }
}

/// Ordered map of decoded property values, keyed by declared name.
///
/// Iteration order is the schema's declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyBag {
    entries: Vec<(String, PropertyValue)>,
}

impl PropertyBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a value under `name`.
    pub fn set(&mut self, name: impl Into<String>, value: PropertyValue) {
        let name = name.into();
        if let Some(slot) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropertyValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }
}
