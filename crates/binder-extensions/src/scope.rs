//! Evaluation scopes and access modes.
//!
//! A scope is an explicit object passed through every resolution call;
//! there is no ambient "current context". Deriving a child from a parent
//! is an explicit constructor ([`EvaluationScope::inherit`]), and catalog
//! visibility always follows the scope chain handed in by the caller.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Hierarchical level of a configuration scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeLevel {
    /// Machine-wide configuration, the root of every chain.
    Machine,
    /// Application-level configuration layered over the machine level.
    Application,
}

impl fmt::Display for ScopeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeLevel::Machine => f.write_str("machine"),
            ScopeLevel::Application => f.write_str("application"),
        }
    }
}

/// Trust level used when resolving a section from a scope.
///
/// `Elevated` bypasses section protection strictly for the duration of the
/// resolving call; entry points taking an `AccessMode` must return only
/// derived, validated data, never the raw section object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Ordinary,
    Elevated,
}

/// One level of the hierarchical configuration context.
///
/// Holds the level's parsed configuration document and an optional parent
/// scope. Section lookup only consults this scope's own document; walking
/// the chain is the resolver's job.
#[derive(Debug)]
pub struct EvaluationScope {
    level: ScopeLevel,
    document: toml::Table,
    /// Logical name of the originating file, threaded into source locations.
    origin: Option<String>,
    /// Section paths requiring elevated access at this scope.
    protected: Vec<String>,
    parent: Option<Arc<EvaluationScope>>,
}

impl EvaluationScope {
    /// Create a machine-level root scope.
    pub fn machine(document: toml::Table, origin: Option<String>) -> Self {
        Self {
            level: ScopeLevel::Machine,
            document,
            origin,
            protected: Vec::new(),
            parent: None,
        }
    }

    /// Derive a child scope that inherits from `parent`.
    ///
    /// This is the explicit "reset to inherited context" operation: the
    /// child's catalog is the parent's resolved entries plus the child
    /// document's own directives, applied by the resolver in order.
    pub fn inherit(
        parent: Arc<EvaluationScope>,
        level: ScopeLevel,
        document: toml::Table,
        origin: Option<String>,
    ) -> Self {
        Self {
            level,
            document,
            origin,
            protected: Vec::new(),
            parent: Some(parent),
        }
    }

    /// Mark a section path as requiring elevated access at this scope.
    pub fn with_protected_section(mut self, path: impl Into<String>) -> Self {
        self.protected.push(path.into());
        self
    }

    pub fn level(&self) -> ScopeLevel {
        self.level
    }

    pub fn parent(&self) -> Option<&Arc<EvaluationScope>> {
        self.parent.as_ref()
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    /// Look up a section by hierarchical path in this scope's own document.
    ///
    /// Returns `None` when the section is absent, or when it is protected
    /// and `mode` is [`AccessMode::Ordinary`].
    pub fn section(&self, path: &str, mode: AccessMode) -> Option<&toml::Value> {
        if mode == AccessMode::Ordinary && self.protected.iter().any(|p| p == path) {
            return None;
        }
        let mut segments = path.split('/');
        let first = segments.next()?;
        let mut current = self.document.get(first)?;
        for segment in segments {
            current = current.as_table()?.get(segment)?;
        }
        Some(current)
    }

    /// The scope chain from the root (machine level) down to this scope.
    pub fn chain(&self) -> Vec<&EvaluationScope> {
        let mut chain = Vec::new();
        let mut current = Some(self);
        while let Some(scope) = current {
            chain.push(scope);
            current = scope.parent.as_deref();
        }
        chain.reverse();
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(toml_str: &str) -> toml::Table {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn section_walks_hierarchical_path() {
        let scope = EvaluationScope::machine(
            document("[service_model.extensions]\nmarker = 1\n"),
            None,
        );
        let section = scope
            .section("service_model/extensions", AccessMode::Ordinary)
            .unwrap();
        assert_eq!(section.get("marker").and_then(|v| v.as_integer()), Some(1));
    }

    #[test]
    fn missing_section_is_none() {
        let scope = EvaluationScope::machine(document(""), None);
        assert!(scope.section("service_model/extensions", AccessMode::Ordinary).is_none());
    }

    #[test]
    fn protected_section_requires_elevated_access() {
        let scope = EvaluationScope::machine(
            document("[service_model.extensions]\nmarker = 1\n"),
            None,
        )
        .with_protected_section("service_model/extensions");

        assert!(scope.section("service_model/extensions", AccessMode::Ordinary).is_none());
        assert!(scope.section("service_model/extensions", AccessMode::Elevated).is_some());
    }

    #[test]
    fn chain_is_root_first() {
        let machine = Arc::new(EvaluationScope::machine(document(""), None));
        let app = EvaluationScope::inherit(
            machine,
            ScopeLevel::Application,
            document(""),
            None,
        );
        let levels: Vec<ScopeLevel> = app.chain().iter().map(|s| s.level()).collect();
        assert_eq!(levels, vec![ScopeLevel::Machine, ScopeLevel::Application]);
    }
}
