//! Shared command implementations for the docnode CLI.

use std::path::Path;

use anyhow::{Context, Result};
use docnode_model::{FactoryConfig, TypeManifest, TypeSystem};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// One row of `docnode types`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TypeListing {
    pub name: String,
    pub label: String,
    pub parent: Option<String>,
    /// Polymorphic type names, most specific first.
    pub type_names: Vec<String>,
}

/// Builds a type system from a manifest file.
///
/// The standard `node` root is registered first unless the manifest declares
/// its own root.
pub fn load_system(manifest_path: &Path, strict: bool) -> Result<TypeSystem> {
    let manifest = TypeManifest::load(manifest_path)
        .with_context(|| format!("failed to load manifest {}", manifest_path.display()))?;
    let declares_root = manifest.types.iter().any(|t| t.is_root());
    let mut system = if declares_root {
        TypeSystem::new()
    } else {
        TypeSystem::with_root()
    };
    if strict {
        system = system.with_config(FactoryConfig::strict());
    }
    let count = manifest
        .register_into(&mut system)
        .context("failed to register manifest types")?;
    debug!(count, declares_root, "loaded type system");
    Ok(system)
}

/// Every registered type in registration order.
pub fn list_types(system: &TypeSystem) -> Result<Vec<TypeListing>> {
    let registry = system.registry();
    registry
        .type_names()
        .map(|name| -> Result<TypeListing> {
            let descriptor = registry.resolve(name)?;
            Ok(TypeListing {
                name: descriptor.name.clone(),
                label: descriptor.label().to_string(),
                parent: descriptor.parent.clone(),
                type_names: system.type_names(name)?,
            })
        })
        .collect()
}

/// The effective schema of `type_name` as JSON.
pub fn schema_json(system: &TypeSystem, type_name: &str) -> Result<Value> {
    let schema = system
        .compile(type_name)
        .with_context(|| format!("cannot compile schema for '{type_name}'"))?;
    Ok(serde_json::to_value(&*schema)?)
}

/// Creates an entity from optional JSON properties and returns its snapshot.
pub fn create_json(system: &TypeSystem, type_name: &str, props: Option<&str>) -> Result<Value> {
    let initial = match props {
        Some(text) => serde_json::from_str(text).context("--props is not valid JSON")?,
        None => Value::Null,
    };
    let entity = system
        .create(type_name, initial)
        .with_context(|| format!("cannot create '{type_name}'"))?;
    Ok(entity.into_snapshot())
}
