mod common;

use common::document_types;
use docnode_model::{ModelError, PropertyDef, TypeDescriptor, TypeRegistry};
use serde_json::json;

fn document_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::new();
    registry.register(TypeDescriptor::node()).unwrap();
    for descriptor in document_types() {
        registry.register(descriptor).unwrap();
    }
    registry
}

fn names(chain: &[&TypeDescriptor]) -> Vec<String> {
    chain.iter().map(|d| d.name.clone()).collect()
}

// ── register ─────────────────────────────────────────────────────

#[test]
fn register_root_and_children() {
    let registry = document_registry();
    assert_eq!(registry.len(), 5);
    assert_eq!(registry.root(), Some("node"));
    assert!(registry.contains("heading"));
    assert!(!registry.is_empty());
}

#[test]
fn registration_order_is_kept() {
    let registry = document_registry();
    let order: Vec<&str> = registry.type_names().collect();
    assert_eq!(order, vec!["node", "paragraph", "heading", "image", "text"]);
}

#[test]
fn duplicate_type_rejected() {
    let mut registry = document_registry();
    let err = registry
        .register(TypeDescriptor::new("paragraph", "node"))
        .unwrap_err();
    assert!(matches!(err, ModelError::DuplicateType(name) if name == "paragraph"));
}

#[test]
fn duplicate_root_rejected() {
    let mut registry = document_registry();
    let err = registry.register(TypeDescriptor::node()).unwrap_err();
    assert!(matches!(err, ModelError::DuplicateType(_)));
}

#[test]
fn unknown_parent_rejected() {
    let mut registry = document_registry();
    let err = registry
        .register(TypeDescriptor::new("caption", "figure"))
        .unwrap_err();
    match err {
        ModelError::UnknownParent { type_name, parent } => {
            assert_eq!(type_name, "caption");
            assert_eq!(parent, "figure");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(!registry.contains("caption"));
}

#[test]
fn child_before_root_rejected() {
    let mut registry = TypeRegistry::new();
    let err = registry
        .register(TypeDescriptor::new("paragraph", "node"))
        .unwrap_err();
    assert!(matches!(err, ModelError::UnknownParent { .. }));
    assert!(registry.is_empty());
}

#[test]
fn second_root_rejected() {
    let mut registry = document_registry();
    let other_root = TypeDescriptor::root("block")
        .property("type", PropertyDef::string())
        .property("id", PropertyDef::string());
    let err = registry.register(other_root).unwrap_err();
    assert!(matches!(err, ModelError::MultipleRoots { existing, .. } if existing == "node"));
}

#[test]
fn root_must_declare_type_and_id() {
    let mut registry = TypeRegistry::new();
    let err = registry
        .register(TypeDescriptor::root("node").property("type", PropertyDef::string()))
        .unwrap_err();
    assert!(matches!(err, ModelError::MissingRootProperty { property, .. } if property == "id"));
}

#[test]
fn read_only_must_name_a_known_property() {
    let mut registry = document_registry();
    let err = registry
        .register(TypeDescriptor::new("quote", "paragraph").read_only("author"))
        .unwrap_err();
    assert!(matches!(err, ModelError::SchemaViolation { .. }));
}

#[test]
fn read_only_may_name_an_inherited_property() {
    let mut registry = document_registry();
    registry
        .register(TypeDescriptor::new("code", "paragraph").read_only("content"))
        .unwrap();
    assert!(registry.resolve("code").unwrap().read_only.contains("content"));
}

#[test]
fn default_must_match_property_type() {
    let mut registry = document_registry();
    let err = registry
        .register(TypeDescriptor::new("table", "node").property("rows", PropertyDef::number().with_default("three")))
        .unwrap_err();
    assert!(matches!(err, ModelError::SchemaViolation { type_name, .. } if type_name == "table"));
    assert!(!registry.contains("table"));
}

#[test]
fn untyped_defaults_accept_anything() {
    let mut registry = document_registry();
    registry
        .register(
            TypeDescriptor::new("embed", "node")
                .property("data", PropertyDef::any().with_default(json!({"k": 1})))
                .property("ref", PropertyDef::id().with_default("image-1")),
        )
        .unwrap();
    assert!(registry.contains("embed"));
}

// ── resolve / ancestor_chain ─────────────────────────────────────

#[test]
fn resolve_known_type() {
    let registry = document_registry();
    let heading = registry.resolve("heading").unwrap();
    assert_eq!(heading.parent.as_deref(), Some("paragraph"));
    assert!(!heading.is_root());
}

#[test]
fn resolve_unknown_type() {
    let registry = document_registry();
    assert!(matches!(
        registry.resolve("table"),
        Err(ModelError::UnknownType(name)) if name == "table"
    ));
}

#[test]
fn ancestor_chain_is_root_first() {
    let registry = document_registry();
    let chain = registry.ancestor_chain("heading").unwrap();
    assert_eq!(names(&chain), vec!["node", "paragraph", "heading"]);
}

#[test]
fn ancestor_chain_of_root_is_root() {
    let registry = document_registry();
    let chain = registry.ancestor_chain("node").unwrap();
    assert_eq!(names(&chain), vec!["node"]);
}

#[test]
fn ancestor_chain_unknown_type() {
    let registry = document_registry();
    assert!(registry.ancestor_chain("table").is_err());
}

// ── descendants ──────────────────────────────────────────────────

#[test]
fn descendants_breadth_first() {
    let registry = document_registry();
    assert_eq!(
        registry.descendants("node").unwrap(),
        vec!["paragraph", "image", "text", "heading"]
    );
    assert_eq!(registry.descendants("paragraph").unwrap(), vec!["heading"]);
    assert!(registry.descendants("heading").unwrap().is_empty());
}

// ── redefine ─────────────────────────────────────────────────────

#[test]
fn redefine_bumps_generation_and_reports_affected() {
    let mut registry = document_registry();
    assert_eq!(registry.generation(), 0);
    let affected = registry
        .redefine(
            TypeDescriptor::new("paragraph", "node")
                .property("content", PropertyDef::string().with_default("lorem")),
        )
        .unwrap();
    assert_eq!(affected, vec!["paragraph", "heading"]);
    assert_eq!(registry.generation(), 1);
    assert_eq!(
        registry.resolve("paragraph").unwrap().properties["content"].default,
        Some("lorem".into())
    );
}

#[test]
fn redefine_cannot_change_parent() {
    let mut registry = document_registry();
    let err = registry
        .redefine(TypeDescriptor::new("heading", "node"))
        .unwrap_err();
    assert!(matches!(err, ModelError::SchemaViolation { .. }));
    assert_eq!(registry.generation(), 0);
}

#[test]
fn redefine_rejects_bad_default() {
    let mut registry = document_registry();
    let err = registry
        .redefine(
            TypeDescriptor::new("paragraph", "node")
                .property("content", PropertyDef::string().with_default(false)),
        )
        .unwrap_err();
    assert!(matches!(err, ModelError::SchemaViolation { .. }));
    assert_eq!(registry.generation(), 0);
}

#[test]
fn redefine_revalidates_descendants() {
    let mut registry = document_registry();
    registry
        .register(TypeDescriptor::new("code", "paragraph").read_only("content"))
        .unwrap();

    let err = registry
        .redefine(TypeDescriptor::new("paragraph", "node"))
        .unwrap_err();
    assert!(matches!(err, ModelError::SchemaViolation { type_name, .. } if type_name == "code"));
    assert_eq!(registry.generation(), 0);
    assert!(registry.resolve("paragraph").unwrap().properties.contains_key("content"));
}

#[test]
fn redefine_unknown_type() {
    let mut registry = document_registry();
    assert!(matches!(
        registry.redefine(TypeDescriptor::new("table", "node")),
        Err(ModelError::UnknownType(_))
    ));
}

#[test]
fn registering_new_types_keeps_generation() {
    let mut registry = document_registry();
    registry
        .register(TypeDescriptor::new("list", "node"))
        .unwrap();
    assert_eq!(registry.generation(), 0);
}
