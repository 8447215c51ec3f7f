//! Resolved extension entries.

use std::sync::Arc;

use binder_schema::{PropertyBag, SourceLocation};

use crate::registry::TypeDescriptor;
use crate::scope::{EvaluationScope, ScopeLevel};

/// Where an entry was declared.
///
/// The scope back-reference is a lookup relationship only: it is consulted
/// for further catalog resolution, never to mutate the scope.
#[derive(Debug, Clone)]
pub struct Origin {
    /// Level of the declaring scope.
    pub level: ScopeLevel,
    /// Originating declaration, when known.
    pub location: Option<SourceLocation>,
    /// The declaring scope, attached by the resolver.
    pub scope: Option<Arc<EvaluationScope>>,
}

impl Origin {
    pub fn new(level: ScopeLevel) -> Self {
        Self {
            level,
            location: None,
            scope: None,
        }
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_scope(mut self, scope: Arc<EvaluationScope>) -> Self {
        self.scope = Some(scope);
        self
    }
}

/// A resolved, named, typed entry in an extension collection.
#[derive(Debug, Clone)]
pub struct ExtensionEntry {
    name: String,
    descriptor: Arc<TypeDescriptor>,
    properties: PropertyBag,
    origin: Option<Origin>,
}

impl ExtensionEntry {
    pub fn new(name: impl Into<String>, descriptor: Arc<TypeDescriptor>) -> Self {
        Self {
            name: name.into(),
            descriptor,
            properties: PropertyBag::new(),
            origin: None,
        }
    }

    pub fn with_properties(mut self, properties: PropertyBag) -> Self {
        self.properties = properties;
        self
    }

    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.origin = Some(origin);
        self
    }

    /// The entry's unique declared name within its collection.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The entry's concrete type name.
    pub fn type_name(&self) -> &str {
        &self.descriptor.type_name
    }

    pub fn descriptor(&self) -> &Arc<TypeDescriptor> {
        &self.descriptor
    }

    pub fn properties(&self) -> &PropertyBag {
        &self.properties
    }

    pub fn origin(&self) -> Option<&Origin> {
        self.origin.as_ref()
    }

    /// The scope this entry was declared in, required for further catalog
    /// lookups on the entry's behalf.
    ///
    /// An entry reaching this point without an attached scope means the
    /// host never established the declaring context before resolving —
    /// a programming error that leaves shared configuration state
    /// indeterminate. The process is terminated rather than surfacing a
    /// catchable error.
    pub fn require_origin_scope(&self) -> &Arc<EvaluationScope> {
        match self.origin.as_ref().and_then(|o| o.scope.as_ref()) {
            Some(scope) => scope,
            None => {
                tracing::error!(
                    entry = %self.name,
                    type_name = %self.descriptor.type_name,
                    "extension entry has no declaring scope attached; aborting"
                );
                std::process::abort();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use binder_schema::PropertySchema;
    use crate::kind::ExtensionKind;

    #[test]
    fn entry_exposes_declared_name_and_type() {
        let descriptor = Arc::new(TypeDescriptor::new(
            "acme.behaviors.tracing",
            ExtensionKind::Behavior,
            PropertySchema::empty(),
        ));
        let entry = ExtensionEntry::new("tracing", descriptor)
            .with_origin(Origin::new(ScopeLevel::Machine));

        assert_eq!(entry.name(), "tracing");
        assert_eq!(entry.type_name(), "acme.behaviors.tracing");
        assert_eq!(entry.origin().unwrap().level, ScopeLevel::Machine);
    }
}
