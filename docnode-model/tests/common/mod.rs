//! Shared fixtures for node model tests.

#![allow(dead_code)]

use std::sync::Arc;

use docnode_model::{FactoryConfig, PropertyDef, TypeDescriptor, TypeSystem};
use docnode_types::IdGenerator;

/// `node` → `paragraph` → `heading`, plus `image` and `text` directly under `node`.
pub fn document_types() -> Vec<TypeDescriptor> {
    vec![
        TypeDescriptor::new("paragraph", "node")
            .display_name("Paragraph")
            .property("content", PropertyDef::string().with_default("")),
        TypeDescriptor::new("heading", "paragraph")
            .property("level", PropertyDef::number().with_default(1))
            .read_only("level"),
        TypeDescriptor::new("image", "node")
            .property("src", PropertyDef::string())
            .property("caption", PropertyDef::string().with_default("untitled"))
            .property("width", PropertyDef::number())
            .read_only("src"),
        TypeDescriptor::new("text", "node")
            .property("content", PropertyDef::string())
            .property("marks", PropertyDef::array())
            .property("target", PropertyDef::id()),
    ]
}

pub fn seeded_ids() -> Arc<IdGenerator> {
    Arc::new(IdGenerator::with_seed("t").unwrap())
}

/// A lenient system with the document types registered and a seeded id generator.
pub fn document_system() -> TypeSystem {
    let mut system = TypeSystem::with_root().with_id_generator(seeded_ids());
    for descriptor in document_types() {
        system.register(descriptor).unwrap();
    }
    system
}

pub fn strict_document_system() -> TypeSystem {
    let mut system = TypeSystem::with_root()
        .with_id_generator(seeded_ids())
        .with_config(FactoryConfig::strict());
    for descriptor in document_types() {
        system.register(descriptor).unwrap();
    }
    system
}
