//! Ordered, capability-gated collections of named extension entries.

use crate::element::ExtensionEntry;
use crate::error::{Error, Result};
use crate::kind::ExtensionKind;
use crate::registry::TypeRegistry;
use crate::section::Directive;

/// One directive applied during scope-inheritance merging.
#[derive(Debug, Clone)]
pub enum MergeDirective {
    /// Empty the accumulated entry list.
    Clear,
    /// Delete all accumulated entries with a matching declared name.
    Remove { name: String },
    /// Replace any accumulated entry of the same concrete type, then append.
    Entry(ExtensionEntry),
}

/// An ordered set of named entries sharing one extension kind.
///
/// The collection exclusively owns its entries. Names are unique within a
/// collection, and every entry's concrete type must satisfy the
/// collection's capability contract (its kind).
#[derive(Debug, Clone)]
pub struct ExtensionCollection {
    kind: ExtensionKind,
    entries: Vec<ExtensionEntry>,
    read_only: bool,
    modified: bool,
}

impl ExtensionCollection {
    /// Create an empty, mutable collection for `kind`.
    pub fn new(kind: ExtensionKind) -> Self {
        Self {
            kind,
            entries: Vec::new(),
            read_only: false,
            modified: false,
        }
    }

    pub fn kind(&self) -> ExtensionKind {
        self.kind
    }

    pub fn entries(&self) -> &[ExtensionEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&ExtensionEntry> {
        self.entries.iter().find(|e| e.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Whether the collection has been mutated since creation.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Finalize the collection; any further mutation fails with
    /// [`Error::ReadOnlyViolation`].
    pub fn set_read_only(&mut self) {
        self.read_only = true;
    }

    /// Register a new entry.
    ///
    /// Validates, in order: the collection is mutable, the declared name is
    /// not already registered, and the entry's concrete type satisfies the
    /// capability contract. On success the name becomes a registered slot
    /// and the entry is appended.
    pub fn add(&mut self, entry: ExtensionEntry) -> Result<()> {
        self.check_add(&entry)?;
        self.entries.push(entry);
        self.modified = true;
        Ok(())
    }

    /// Non-throwing pre-check combining the same conditions as [`add`](Self::add).
    ///
    /// Used by callers that try several candidate collections in turn
    /// without exceptions as control flow.
    pub fn can_add(&self, entry: &ExtensionEntry) -> bool {
        self.check_add(entry).is_ok()
    }

    fn check_add(&self, entry: &ExtensionEntry) -> Result<()> {
        if self.read_only {
            return Err(Error::ReadOnlyViolation {
                collection: self.kind.collection_name().to_string(),
            });
        }
        if self.contains(entry.name()) {
            return Err(Error::DuplicateKey {
                name: entry.name().to_string(),
                collection: self.kind.collection_name().to_string(),
            });
        }
        if entry.descriptor().kind != self.kind {
            return Err(Error::ElementTypeNotAllowed {
                type_name: entry.type_name().to_string(),
                collection: self.kind.collection_name().to_string(),
            });
        }
        Ok(())
    }

    /// Remove all entries whose concrete type matches `type_name`.
    ///
    /// Matching is by type, not by reference identity. Returns whether any
    /// removal occurred.
    pub fn remove_by_type(&mut self, type_name: &str) -> Result<bool> {
        if self.read_only {
            return Err(Error::ReadOnlyViolation {
                collection: self.kind.collection_name().to_string(),
            });
        }
        let before = self.entries.len();
        self.entries.retain(|e| e.type_name() != type_name);
        let removed = self.entries.len() != before;
        if removed {
            self.modified = true;
        }
        Ok(removed)
    }

    /// Remove all entries with a matching declared name.
    pub fn remove_by_name(&mut self, name: &str) -> Result<bool> {
        if self.read_only {
            return Err(Error::ReadOnlyViolation {
                collection: self.kind.collection_name().to_string(),
            });
        }
        let before = self.entries.len();
        self.entries.retain(|e| e.name() != name);
        let removed = self.entries.len() != before;
        if removed {
            self.modified = true;
        }
        Ok(removed)
    }

    /// Discard all entries.
    pub fn clear(&mut self) -> Result<()> {
        if self.read_only {
            return Err(Error::ReadOnlyViolation {
                collection: self.kind.collection_name().to_string(),
            });
        }
        self.entries.clear();
        self.modified = true;
        Ok(())
    }

    /// Apply scope-inheritance merge semantics.
    ///
    /// Processes `directives` in order against a copy of the parent's
    /// resolved entries: `Clear` empties the accumulator, `Remove` deletes
    /// by declared name, and an entry directive replaces any accumulated
    /// entry of the same concrete type before appending. The accumulated
    /// result replaces this collection's contents, re-added through the
    /// ordinary [`add`](Self::add) path so all invariants hold.
    pub fn merge_with(
        &mut self,
        parent: &[ExtensionEntry],
        directives: impl IntoIterator<Item = MergeDirective>,
    ) -> Result<()> {
        if self.read_only {
            return Err(Error::ReadOnlyViolation {
                collection: self.kind.collection_name().to_string(),
            });
        }

        let mut accumulated: Vec<ExtensionEntry> = parent.to_vec();
        for directive in directives {
            match directive {
                MergeDirective::Clear => accumulated.clear(),
                MergeDirective::Remove { name } => {
                    accumulated.retain(|e| e.name() != name);
                }
                MergeDirective::Entry(entry) => {
                    accumulated.retain(|e| e.type_name() != entry.type_name());
                    accumulated.push(entry);
                }
            }
        }

        self.entries.clear();
        for entry in accumulated {
            self.add(entry)?;
        }
        self.modified = true;
        Ok(())
    }

    /// Populate this collection from user-level directives.
    ///
    /// Each added element references a catalog entry by element name:
    /// a name absent from `catalog` fails with
    /// [`Error::InvalidExtensionElementName`]; a catalog type the registry
    /// cannot resolve fails hard with [`Error::TypeNotFound`] (the entry
    /// was explicitly named, so there is no skip path); a resolved type
    /// outside this collection's capability contract fails with
    /// [`Error::InvalidExtensionElement`]. Raw property values are decoded
    /// through the resolved type's schema before registration.
    pub fn deserialize_from(
        &mut self,
        directives: &[Directive],
        catalog: &ExtensionCollection,
        registry: &TypeRegistry,
    ) -> Result<()> {
        for directive in directives {
            match directive {
                Directive::Clear { clear } => {
                    if *clear {
                        self.clear()?;
                    }
                }
                Directive::Remove { remove } => {
                    self.remove_by_name(remove)?;
                }
                Directive::Add(decl) => {
                    let catalog_entry = catalog.get(&decl.name).ok_or_else(|| {
                        Error::InvalidExtensionElementName {
                            name: decl.name.clone(),
                            collection: self.kind.collection_name().to_string(),
                        }
                    })?;
                    let type_name = catalog_entry.type_name().to_string();
                    let descriptor =
                        registry
                            .resolve(&type_name)
                            .ok_or(Error::TypeNotFound {
                                type_name: type_name.clone(),
                            })?;
                    if descriptor.kind != self.kind {
                        return Err(Error::InvalidExtensionElement {
                            name: decl.name.clone(),
                            type_name,
                            collection: self.kind.collection_name().to_string(),
                        });
                    }
                    let properties = descriptor
                        .schema
                        .decode(&decl.raw_properties(), decl.location.as_ref())?;
                    let mut entry =
                        ExtensionEntry::new(decl.name.clone(), descriptor).with_properties(properties);
                    if let Some(origin) = catalog_entry.origin() {
                        entry = entry.with_origin(origin.clone());
                    }
                    self.add(entry)?;
                }
            }
        }
        Ok(())
    }
}
