//! Tests for catalog resolution over scope chains.

use std::sync::Arc;

use binder_extensions::{
    AccessMode, Directive, ElementDecl, Error, EvaluationScope, ExtensionCollection,
    ExtensionKind, ScopeLevel, TypeDescriptor, TypeRegistry, lookup_collection,
};
use binder_schema::{PropertyKind, PropertySchema, PropertySpec, PropertyValue};
use pretty_assertions::assert_eq;

fn registry_with(types: &[(&str, ExtensionKind)]) -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    for (name, kind) in types {
        registry.register(TypeDescriptor::new(*name, *kind, PropertySchema::empty()));
    }
    registry
}

fn machine_scope(toml_str: &str) -> Arc<EvaluationScope> {
    Arc::new(EvaluationScope::machine(
        toml::from_str(toml_str).unwrap(),
        Some("machine.toml".to_string()),
    ))
}

fn app_scope(parent: Arc<EvaluationScope>, toml_str: &str) -> Arc<EvaluationScope> {
    Arc::new(EvaluationScope::inherit(
        parent,
        ScopeLevel::Application,
        toml::from_str(toml_str).unwrap(),
        Some("app.toml".to_string()),
    ))
}

#[test]
fn resolves_catalog_entries_from_single_scope() {
    let scope = machine_scope(
        r#"
[[service_model.extensions.behavior_extensions]]
name = "tracing"
type = "acme.tracing"

[[service_model.extensions.behavior_extensions]]
name = "metrics"
type = "acme.metrics"
"#,
    );
    let registry = registry_with(&[
        ("acme.tracing", ExtensionKind::Behavior),
        ("acme.metrics", ExtensionKind::Behavior),
    ]);

    let resolved =
        lookup_collection(ExtensionKind::Behavior, &scope, &registry, AccessMode::Ordinary)
            .unwrap();

    let names: Vec<&str> = resolved.collection.entries().iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["tracing", "metrics"]);
    assert!(resolved.skipped.is_empty());
}

#[test]
fn missing_section_fails_with_section_not_found() {
    let scope = machine_scope("");
    let registry = TypeRegistry::new();

    let err =
        lookup_collection(ExtensionKind::Behavior, &scope, &registry, AccessMode::Ordinary)
            .unwrap_err();
    assert!(matches!(err, Error::SectionNotFound { ref path } if path == "service_model/extensions"));
}

#[test]
fn unresolvable_type_is_skipped_with_warning_record() {
    let scope = machine_scope(
        r#"
[[service_model.extensions.binding_extensions]]
name = "tcp"
type = "acme.tcp"

[[service_model.extensions.binding_extensions]]
name = "exotic"
type = "acme.not-registered"
"#,
    );
    let registry = registry_with(&[("acme.tcp", ExtensionKind::Binding)]);

    let resolved =
        lookup_collection(ExtensionKind::Binding, &scope, &registry, AccessMode::Ordinary)
            .unwrap();

    let names: Vec<&str> = resolved.collection.entries().iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["tcp"]);
    assert_eq!(resolved.skipped.len(), 1);
    assert_eq!(resolved.skipped[0].name, "exotic");
    assert_eq!(resolved.skipped[0].type_name, "acme.not-registered");
}

#[test]
fn child_scope_directives_merge_over_parent() {
    let machine = machine_scope(
        r#"
[[service_model.extensions.behavior_extensions]]
name = "foo"
type = "acme.foo"
"#,
    );
    let app = app_scope(
        machine,
        r#"
[[service_model.extensions.behavior_extensions]]
clear = true

[[service_model.extensions.behavior_extensions]]
name = "bar"
type = "acme.bar"
"#,
    );
    let registry = registry_with(&[
        ("acme.foo", ExtensionKind::Behavior),
        ("acme.bar", ExtensionKind::Behavior),
    ]);

    let resolved =
        lookup_collection(ExtensionKind::Behavior, &app, &registry, AccessMode::Ordinary)
            .unwrap();

    let names: Vec<&str> = resolved.collection.entries().iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["bar"]);
}

#[test]
fn child_remove_directive_deletes_parent_entry() {
    let machine = machine_scope(
        r#"
[[service_model.extensions.endpoint_extensions]]
name = "x"
type = "acme.x"

[[service_model.extensions.endpoint_extensions]]
name = "y"
type = "acme.y"
"#,
    );
    let app = app_scope(
        machine,
        r#"
[[service_model.extensions.endpoint_extensions]]
remove = "x"
"#,
    );
    let registry = registry_with(&[
        ("acme.x", ExtensionKind::Endpoint),
        ("acme.y", ExtensionKind::Endpoint),
    ]);

    let resolved =
        lookup_collection(ExtensionKind::Endpoint, &app, &registry, AccessMode::Ordinary)
            .unwrap();

    let names: Vec<&str> = resolved.collection.entries().iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["y"]);
}

#[test]
fn entries_carry_origin_scope_and_location() {
    let machine = machine_scope(
        r#"
[[service_model.extensions.behavior_extensions]]
name = "tracing"
type = "acme.tracing"
"#,
    );
    let registry = registry_with(&[("acme.tracing", ExtensionKind::Behavior)]);

    let resolved =
        lookup_collection(ExtensionKind::Behavior, &machine, &registry, AccessMode::Ordinary)
            .unwrap();

    let entry = resolved.collection.get("tracing").unwrap();
    let origin = entry.origin().unwrap();
    assert_eq!(origin.level, ScopeLevel::Machine);
    assert_eq!(origin.location.as_ref().unwrap().file, "machine.toml");
    assert_eq!(entry.require_origin_scope().level(), ScopeLevel::Machine);
}

mod access_modes {
    use super::*;
    use pretty_assertions::assert_eq;

    fn protected_scope() -> Arc<EvaluationScope> {
        Arc::new(
            EvaluationScope::machine(
                toml::from_str(
                    r#"
[[service_model.extensions.behavior_extensions]]
name = "tracing"
type = "acme.tracing"
"#,
                )
                .unwrap(),
                None,
            )
            .with_protected_section("service_model/extensions"),
        )
    }

    #[test]
    fn ordinary_access_cannot_see_protected_section() {
        let registry = registry_with(&[("acme.tracing", ExtensionKind::Behavior)]);
        let err = lookup_collection(
            ExtensionKind::Behavior,
            &protected_scope(),
            &registry,
            AccessMode::Ordinary,
        )
        .unwrap_err();
        assert!(matches!(err, Error::SectionNotFound { .. }));
    }

    #[test]
    fn elevated_access_returns_only_derived_catalog() {
        let registry = registry_with(&[("acme.tracing", ExtensionKind::Behavior)]);
        let resolved = lookup_collection(
            ExtensionKind::Behavior,
            &protected_scope(),
            &registry,
            AccessMode::Elevated,
        )
        .unwrap();
        assert_eq!(resolved.collection.len(), 1);
    }
}

mod deserialize {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tracing_schema() -> PropertySchema {
        PropertySchema::new(vec![PropertySpec::optional(
            "max_sessions",
            PropertyKind::Integer,
            PropertyValue::Integer(10),
        )])
        .unwrap()
    }

    fn catalog_and_registry() -> (ExtensionCollection, TypeRegistry) {
        let mut registry = TypeRegistry::new();
        registry.register(TypeDescriptor::new(
            "acme.tracing",
            ExtensionKind::Behavior,
            tracing_schema(),
        ));

        let scope = machine_scope(
            r#"
[[service_model.extensions.behavior_extensions]]
name = "tracing"
type = "acme.tracing"
"#,
        );
        let resolved =
            lookup_collection(ExtensionKind::Behavior, &scope, &registry, AccessMode::Ordinary)
                .unwrap();
        (resolved.collection, registry)
    }

    #[test]
    fn deserialize_resolves_catalog_name_and_decodes_properties() {
        let (catalog, registry) = catalog_and_registry();
        let mut target = ExtensionCollection::new(ExtensionKind::Behavior);

        target
            .deserialize_from(
                &[Directive::Add(
                    ElementDecl::new("tracing").with_property("max_sessions", 5i64),
                )],
                &catalog,
                &registry,
            )
            .unwrap();

        let entry = target.get("tracing").unwrap();
        assert_eq!(
            entry.properties().get("max_sessions"),
            Some(&PropertyValue::Integer(5))
        );
    }

    #[test]
    fn unknown_element_name_is_a_hard_error() {
        let (catalog, registry) = catalog_and_registry();
        let mut target = ExtensionCollection::new(ExtensionKind::Behavior);

        let err = target
            .deserialize_from(
                &[Directive::Add(ElementDecl::new("nonexistent"))],
                &catalog,
                &registry,
            )
            .unwrap_err();
        assert!(
            matches!(err, Error::InvalidExtensionElementName { ref name, .. } if name == "nonexistent")
        );
    }

    #[test]
    fn capability_mismatch_is_invalid_extension_element() {
        let (catalog, registry) = catalog_and_registry();
        // A binding collection deserializing a behavior-kind element.
        let mut target = ExtensionCollection::new(ExtensionKind::Binding);

        let err = target
            .deserialize_from(
                &[Directive::Add(ElementDecl::new("tracing"))],
                &catalog,
                &registry,
            )
            .unwrap_err();
        assert!(matches!(err, Error::InvalidExtensionElement { .. }));
    }

    #[test]
    fn unresolvable_type_named_by_directive_is_a_hard_error() {
        let (catalog, _) = catalog_and_registry();
        // Same catalog, but a registry that no longer knows the type.
        let empty_registry = TypeRegistry::new();
        let mut target = ExtensionCollection::new(ExtensionKind::Behavior);

        let err = target
            .deserialize_from(
                &[Directive::Add(ElementDecl::new("tracing"))],
                &catalog,
                &empty_registry,
            )
            .unwrap_err();
        assert!(matches!(err, Error::TypeNotFound { ref type_name } if type_name == "acme.tracing"));
    }

    #[test]
    fn invalid_property_value_surfaces_schema_error() {
        let (catalog, registry) = catalog_and_registry();
        let mut target = ExtensionCollection::new(ExtensionKind::Behavior);

        let err = target
            .deserialize_from(
                &[Directive::Add(
                    ElementDecl::new("tracing").with_property("max_sessions", "not-a-number"),
                )],
                &catalog,
                &registry,
            )
            .unwrap_err();
        assert!(matches!(err, Error::Schema(_)));
    }
}
