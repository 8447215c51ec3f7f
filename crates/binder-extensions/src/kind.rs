//! The four fixed extension kinds.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four fixed categories partitioning the extension catalog.
///
/// The kind doubles as the capability contract: an entry's concrete type
/// is permitted in a collection iff the type's declared kind equals the
/// collection's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionKind {
    /// Behavior extensions: service/endpoint behavior contributions.
    Behavior,
    /// Binding-element extensions: single elements of a transport stack.
    BindingElement,
    /// Binding extensions: whole preconfigured transport stacks.
    Binding,
    /// Endpoint extensions: standard endpoint definitions.
    Endpoint,
}

impl ExtensionKind {
    /// All kinds, in catalog declaration order.
    pub const ALL: [ExtensionKind; 4] = [
        ExtensionKind::Behavior,
        ExtensionKind::BindingElement,
        ExtensionKind::Binding,
        ExtensionKind::Endpoint,
    ];

    /// The fixed section key for this kind's collection.
    pub fn collection_name(&self) -> &'static str {
        match self {
            ExtensionKind::Behavior => "behavior_extensions",
            ExtensionKind::BindingElement => "binding_element_extensions",
            ExtensionKind::Binding => "binding_extensions",
            ExtensionKind::Endpoint => "endpoint_extensions",
        }
    }

    /// Inverse of [`collection_name`](Self::collection_name).
    pub fn from_collection_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.collection_name() == name)
    }
}

impl fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection_name())
    }
}
