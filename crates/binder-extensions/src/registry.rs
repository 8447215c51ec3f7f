//! Capability-based type registry.
//!
//! Replaces reflection-style dynamic type loading with a mapping from
//! stable type-name strings to [`TypeDescriptor`]s, populated at startup.
//! Resolution never fails hard: absence is `None`, and the caller decides
//! whether that is a skip-with-warning or a configuration error.

use std::collections::HashMap;
use std::sync::Arc;

use binder_schema::PropertySchema;

use crate::kind::ExtensionKind;

/// Descriptor for a loadable extension type.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    /// Stable, fully-qualified type-name string used in configuration.
    pub type_name: String,
    /// The capability contract this type satisfies.
    pub kind: ExtensionKind,
    /// Schema of the type's named properties.
    pub schema: PropertySchema,
}

impl TypeDescriptor {
    pub fn new(type_name: impl Into<String>, kind: ExtensionKind, schema: PropertySchema) -> Self {
        Self {
            type_name: type_name.into(),
            kind,
            schema,
        }
    }
}

/// Registry of known extension types, keyed by type-name string.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    entries: HashMap<String, Arc<TypeDescriptor>>,
}

impl TypeRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register a type descriptor. A later registration under the same
    /// type name replaces the earlier one.
    pub fn register(&mut self, descriptor: TypeDescriptor) {
        self.entries
            .insert(descriptor.type_name.clone(), Arc::new(descriptor));
    }

    /// Resolve a type-name string to its descriptor.
    pub fn resolve(&self, type_name: &str) -> Option<Arc<TypeDescriptor>> {
        self.entries.get(type_name).cloned()
    }

    /// List all registered type names (sorted).
    pub fn known_types(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
