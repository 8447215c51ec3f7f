//! End-to-end catalog flow: layer files on disk -> scope chain -> resolved
//! collections -> element deserialization.

use std::fs;
use std::path::PathBuf;

use binder_extensions::{
    AccessMode, Directive, ElementDecl, ExtensionCollection, ExtensionKind, TomlCatalogStore,
    TypeDescriptor, TypeRegistry, lookup_collection,
};
use binder_schema::{PropertyKind, PropertySchema, PropertySpec, PropertyValue};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write_layer(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn behavior_schema() -> PropertySchema {
    PropertySchema::new(vec![
        PropertySpec::key("name", PropertyKind::Text),
        PropertySpec::optional(
            "max_sessions",
            PropertyKind::Integer,
            PropertyValue::Integer(10),
        ),
    ])
    .unwrap()
}

fn registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register(TypeDescriptor::new(
        "acme.behaviors.tracing",
        ExtensionKind::Behavior,
        behavior_schema(),
    ));
    registry.register(TypeDescriptor::new(
        "acme.behaviors.throttling",
        ExtensionKind::Behavior,
        behavior_schema(),
    ));
    registry.register(TypeDescriptor::new(
        "acme.bindings.tcp",
        ExtensionKind::Binding,
        PropertySchema::empty(),
    ));
    registry
}

#[test]
fn machine_catalog_resolves_through_store_and_scope() {
    let dir = TempDir::new().unwrap();
    let machine = write_layer(
        &dir,
        "machine.toml",
        r#"
[[service_model.extensions.behavior_extensions]]
name = "tracing"
type = "acme.behaviors.tracing"

[[service_model.extensions.binding_extensions]]
name = "tcp"
type = "acme.bindings.tcp"
"#,
    );

    let store = TomlCatalogStore::new(machine, None);
    let scope = store.load_scope().unwrap();
    let registry = registry();

    let behaviors = lookup_collection(
        ExtensionKind::Behavior,
        &scope,
        &registry,
        AccessMode::Ordinary,
    )
    .unwrap();
    assert_eq!(behaviors.collection.len(), 1);
    assert!(behaviors.collection.contains("tracing"));
    assert!(behaviors.skipped.is_empty());

    let bindings = lookup_collection(
        ExtensionKind::Binding,
        &scope,
        &registry,
        AccessMode::Ordinary,
    )
    .unwrap();
    assert_eq!(bindings.collection.len(), 1);
    assert_eq!(
        bindings.collection.get("tcp").unwrap().type_name(),
        "acme.bindings.tcp"
    );
}

#[test]
fn application_layer_merges_over_machine_layer() {
    let dir = TempDir::new().unwrap();
    let machine = write_layer(
        &dir,
        "machine.toml",
        r#"
[[service_model.extensions.behavior_extensions]]
name = "tracing"
type = "acme.behaviors.tracing"

[[service_model.extensions.behavior_extensions]]
name = "throttling"
type = "acme.behaviors.throttling"
"#,
    );
    let app = write_layer(
        &dir,
        "app.toml",
        r#"
[[service_model.extensions.behavior_extensions]]
remove = "throttling"
"#,
    );

    let store = TomlCatalogStore::new(machine, Some(app));
    let scope = store.load_scope().unwrap();

    let resolved = lookup_collection(
        ExtensionKind::Behavior,
        &scope,
        &registry(),
        AccessMode::Ordinary,
    )
    .unwrap();

    let names: Vec<&str> = resolved
        .collection
        .entries()
        .iter()
        .map(|e| e.name())
        .collect();
    assert_eq!(names, vec!["tracing"]);
}

#[test]
fn clear_directive_discards_inherited_entries() {
    let dir = TempDir::new().unwrap();
    let machine = write_layer(
        &dir,
        "machine.toml",
        r#"
[[service_model.extensions.behavior_extensions]]
name = "tracing"
type = "acme.behaviors.tracing"
"#,
    );
    let app = write_layer(
        &dir,
        "app.toml",
        r#"
[[service_model.extensions.behavior_extensions]]
clear = true

[[service_model.extensions.behavior_extensions]]
name = "throttling"
type = "acme.behaviors.throttling"
"#,
    );

    let store = TomlCatalogStore::new(machine, Some(app));
    let scope = store.load_scope().unwrap();
    let resolved = lookup_collection(
        ExtensionKind::Behavior,
        &scope,
        &registry(),
        AccessMode::Ordinary,
    )
    .unwrap();

    let names: Vec<&str> = resolved
        .collection
        .entries()
        .iter()
        .map(|e| e.name())
        .collect();
    assert_eq!(names, vec!["throttling"]);
}

#[test]
fn unresolvable_catalog_entries_are_skipped_not_fatal() {
    let dir = TempDir::new().unwrap();
    let machine = write_layer(
        &dir,
        "machine.toml",
        r#"
[[service_model.extensions.behavior_extensions]]
name = "tracing"
type = "acme.behaviors.tracing"

[[service_model.extensions.behavior_extensions]]
name = "legacy"
type = "acme.behaviors.retired"
"#,
    );

    let store = TomlCatalogStore::new(machine, None);
    let scope = store.load_scope().unwrap();
    let resolved = lookup_collection(
        ExtensionKind::Behavior,
        &scope,
        &registry(),
        AccessMode::Ordinary,
    )
    .unwrap();

    assert_eq!(resolved.collection.len(), 1);
    assert_eq!(resolved.skipped.len(), 1);
    assert_eq!(resolved.skipped[0].name, "legacy");
    assert_eq!(resolved.skipped[0].type_name, "acme.behaviors.retired");
}

#[test]
fn missing_section_is_a_hard_error() {
    let dir = TempDir::new().unwrap();
    let machine = write_layer(&dir, "machine.toml", "[other]\nkey = 1\n");

    let store = TomlCatalogStore::new(machine, None);
    let scope = store.load_scope().unwrap();
    let err = lookup_collection(
        ExtensionKind::Behavior,
        &scope,
        &registry(),
        AccessMode::Ordinary,
    )
    .unwrap_err();

    assert!(matches!(
        err,
        binder_extensions::Error::SectionNotFound { .. }
    ));
}

#[test]
fn resolved_entries_feed_element_deserialization() {
    let dir = TempDir::new().unwrap();
    let machine = write_layer(
        &dir,
        "machine.toml",
        r#"
[[service_model.extensions.behavior_extensions]]
name = "tracing"
type = "acme.behaviors.tracing"
"#,
    );

    let store = TomlCatalogStore::new(machine, None);
    let scope = store.load_scope().unwrap();
    let registry = registry();
    let catalog = lookup_collection(
        ExtensionKind::Behavior,
        &scope,
        &registry,
        AccessMode::Ordinary,
    )
    .unwrap()
    .collection;

    let mut behaviors = ExtensionCollection::new(ExtensionKind::Behavior);
    behaviors
        .deserialize_from(
            &[Directive::Add(
                ElementDecl::new("tracing")
                    .with_property("name", "edge-tracing")
                    .with_property("max_sessions", 5i64),
            )],
            &catalog,
            &registry,
        )
        .unwrap();

    let entry = behaviors.get("tracing").unwrap();
    assert_eq!(entry.type_name(), "acme.behaviors.tracing");
    assert_eq!(
        entry.properties().get("max_sessions"),
        Some(&PropertyValue::Integer(5))
    );
    // default applied in schema order
    assert_eq!(
        entry.properties().get("name"),
        Some(&PropertyValue::Text("edge-tracing".into()))
    );
}

#[test]
fn element_naming_an_unknown_catalog_entry_is_a_hard_error() {
    let catalog = ExtensionCollection::new(ExtensionKind::Behavior);
    let mut behaviors = ExtensionCollection::new(ExtensionKind::Behavior);

    let err = behaviors
        .deserialize_from(
            &[Directive::Add(ElementDecl::new("ghost"))],
            &catalog,
            &registry(),
        )
        .unwrap_err();

    assert!(matches!(
        err,
        binder_extensions::Error::InvalidExtensionElementName { name, .. } if name == "ghost"
    ));
}
