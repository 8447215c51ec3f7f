//! Catalog resolution across an evaluation scope chain.

use std::sync::Arc;

use binder_schema::SourceLocation;

use crate::EXTENSIONS_SECTION_PATH;
use crate::collection::{ExtensionCollection, MergeDirective};
use crate::element::{ExtensionEntry, Origin};
use crate::error::{Error, Result};
use crate::kind::ExtensionKind;
use crate::registry::TypeRegistry;
use crate::scope::{AccessMode, EvaluationScope};
use crate::section::{CatalogDirective, ExtensionsSectionDecl};

/// A catalog entry skipped during a whole-catalog scan because its type
/// name could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub name: String,
    pub type_name: String,
}

/// The outcome of resolving a catalog: the collection of resolvable
/// entries, plus the entries that were skipped with a warning.
#[derive(Debug, Clone)]
pub struct ResolvedCatalog {
    pub collection: ExtensionCollection,
    pub skipped: Vec<SkippedEntry>,
}

/// Resolve the catalog collection for one extension kind over a scope chain.
///
/// The chain is processed root-first; each scope that exposes the
/// extensions section contributes its directives through the ordinary
/// merge semantics (clear / remove-by-name / replace-by-type-then-append).
/// Fails with [`Error::SectionNotFound`] when no scope in the chain
/// exposes the section at all.
///
/// Entries whose type name the registry cannot resolve are skipped with a
/// warning rather than failing the whole catalog.
///
/// With [`AccessMode::Elevated`] the section read bypasses section
/// protection strictly inside this call; only the derived, validated
/// catalog is returned, never the resolved section itself.
pub fn lookup_collection(
    kind: ExtensionKind,
    scope: &Arc<EvaluationScope>,
    registry: &TypeRegistry,
    mode: AccessMode,
) -> Result<ResolvedCatalog> {
    let chain = arc_chain(scope);
    let mut collection = ExtensionCollection::new(kind);
    let mut skipped = Vec::new();
    let mut section_seen = false;

    for scope in &chain {
        let Some(section_value) = scope.section(EXTENSIONS_SECTION_PATH, mode) else {
            continue;
        };
        section_seen = true;

        let section: ExtensionsSectionDecl = section_value.clone().try_into()?;
        let directives = section.directives(kind);
        if directives.is_empty() {
            continue;
        }

        tracing::debug!(
            level = %scope.level(),
            %kind,
            directives = directives.len(),
            "Applying catalog directives"
        );

        let merged = to_merge_directives(directives, scope, registry, &mut skipped);
        let parent: Vec<ExtensionEntry> = collection.entries().to_vec();
        collection.merge_with(&parent, merged)?;
    }

    if !section_seen {
        return Err(Error::SectionNotFound {
            path: EXTENSIONS_SECTION_PATH.to_string(),
        });
    }

    Ok(ResolvedCatalog {
        collection,
        skipped,
    })
}

/// The scope chain as owned handles, root first.
fn arc_chain(scope: &Arc<EvaluationScope>) -> Vec<Arc<EvaluationScope>> {
    let mut chain = Vec::new();
    let mut current = Some(scope.clone());
    while let Some(s) = current {
        current = s.parent().cloned();
        chain.push(s);
    }
    chain.reverse();
    chain
}

fn to_merge_directives(
    directives: &[CatalogDirective],
    scope: &Arc<EvaluationScope>,
    registry: &TypeRegistry,
    skipped: &mut Vec<SkippedEntry>,
) -> Vec<MergeDirective> {
    let mut merged = Vec::with_capacity(directives.len());
    for directive in directives {
        match directive {
            CatalogDirective::Clear { clear } => {
                if *clear {
                    merged.push(MergeDirective::Clear);
                }
            }
            CatalogDirective::Remove { remove } => {
                merged.push(MergeDirective::Remove {
                    name: remove.clone(),
                });
            }
            CatalogDirective::Add(decl) => {
                let Some(descriptor) = registry.resolve(&decl.type_name) else {
                    tracing::warn!(
                        name = %decl.name,
                        type_name = %decl.type_name,
                        "Catalog entry type could not be resolved — skipping entry"
                    );
                    skipped.push(SkippedEntry {
                        name: decl.name.clone(),
                        type_name: decl.type_name.clone(),
                    });
                    continue;
                };
                let mut origin = Origin::new(scope.level()).with_scope(scope.clone());
                if let Some(file) = scope.origin() {
                    origin = origin.with_location(SourceLocation::new(file, None));
                }
                merged.push(MergeDirective::Entry(
                    ExtensionEntry::new(decl.name.clone(), descriptor).with_origin(origin),
                ));
            }
        }
    }
    merged
}
