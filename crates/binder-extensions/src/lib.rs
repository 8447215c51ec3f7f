//! Extension catalog and collection resolver for Service Binder.
//!
//! Declarative configuration exposes four fixed catalogs of pluggable,
//! named, typed entries (behavior, binding-element, binding, and endpoint
//! extensions). This crate resolves a catalog for an evaluation scope,
//! applies scope-inheritance merge semantics (`clear` / `remove` / `add`
//! directives against the parent's resolved entries), enforces the
//! one-name-one-type invariant, and gates every entry on the capability
//! contract of its collection.
//!
//! Type resolution is registry-based: a [`TypeRegistry`] maps stable
//! type-name strings to [`TypeDescriptor`]s populated at startup. Absence
//! is an `Option`, never an error; whole-catalog scans degrade gracefully
//! by skipping unresolvable entries with a warning.

pub mod collection;
pub mod element;
pub mod error;
pub mod kind;
pub mod registry;
pub mod resolver;
pub mod scope;
pub mod section;
pub mod store;

pub use collection::{ExtensionCollection, MergeDirective};
pub use element::{ExtensionEntry, Origin};
pub use error::{Error, Result};
pub use kind::ExtensionKind;
pub use registry::{TypeDescriptor, TypeRegistry};
pub use resolver::{ResolvedCatalog, SkippedEntry, lookup_collection};
pub use scope::{AccessMode, EvaluationScope, ScopeLevel};
pub use section::{CatalogDirective, Directive, ElementDecl, ExtensionsSectionDecl};
pub use store::{CatalogStore, LoadedLayer, TomlCatalogStore};

/// Hierarchical path of the extensions section within a configuration layer.
pub const EXTENSIONS_SECTION_PATH: &str = "service_model/extensions";
