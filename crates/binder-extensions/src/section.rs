//! Declarative section model.
//!
//! Three directive verbs exist, for both catalog sections and user element
//! collections: add a named entry, remove an entry by name, clear all
//! entries. No other verbs are defined.

use serde::Deserialize;

use binder_schema::SourceLocation;

use crate::kind::ExtensionKind;

/// A catalog entry declaration: a unique name bound to a type-name string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogEntryDecl {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
}

/// One directive inside a catalog section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CatalogDirective {
    /// `clear = true` empties the accumulated entry list.
    Clear { clear: bool },
    /// `remove = "<name>"` deletes entries with a matching declared name.
    Remove { remove: String },
    /// A named entry declaration appends (replacing same-typed entries).
    Add(CatalogEntryDecl),
}

/// The extensions section of one configuration layer: per-kind directive
/// lists, each empty by default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtensionsSectionDecl {
    #[serde(default)]
    pub behavior_extensions: Vec<CatalogDirective>,
    #[serde(default)]
    pub binding_element_extensions: Vec<CatalogDirective>,
    #[serde(default)]
    pub binding_extensions: Vec<CatalogDirective>,
    #[serde(default)]
    pub endpoint_extensions: Vec<CatalogDirective>,
}

impl ExtensionsSectionDecl {
    /// The directive list for one extension kind.
    pub fn directives(&self, kind: ExtensionKind) -> &[CatalogDirective] {
        match kind {
            ExtensionKind::Behavior => &self.behavior_extensions,
            ExtensionKind::BindingElement => &self.binding_element_extensions,
            ExtensionKind::Binding => &self.binding_extensions,
            ExtensionKind::Endpoint => &self.endpoint_extensions,
        }
    }
}

/// A named element inside a user collection, referencing a catalog entry by
/// element name. Remaining keys are the element's raw property values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ElementDecl {
    pub name: String,
    #[serde(flatten)]
    pub properties: toml::Table,
    #[serde(skip)]
    pub location: Option<SourceLocation>,
}

impl ElementDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: toml::Table::new(),
            location: None,
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// The element's property values as raw string pairs, ready for
    /// schema-driven decoding.
    pub fn raw_properties(&self) -> Vec<(String, String)> {
        self.properties
            .iter()
            .map(|(name, value)| (name.clone(), raw_value(value)))
            .collect()
    }
}

fn raw_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One directive inside a user element collection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Directive {
    Clear { clear: bool },
    Remove { remove: String },
    Add(ElementDecl),
}
