//! Schema compilation.
//!
//! Folds the declared schemas of a type's ancestor chain into one
//! [`EffectiveSchema`], root first, so the most specific declaration wins on
//! a name collision. Results are cached per type and shared as
//! `Arc<EffectiveSchema>`; cache entries are only ever inserted or removed
//! whole, under the write lock, so readers never see a partial merge.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use docnode_types::{ID_PROPERTY, TYPE_PROPERTY};
use tracing::debug;

use crate::error::ModelResult;
use crate::registry::TypeRegistry;
use crate::schema::{EffectiveSchema, TypeDescriptor};

#[derive(Debug, Default)]
struct SchemaCache {
    /// Registry generation every cached entry was compiled against.
    generation: u64,
    schemas: HashMap<String, Arc<EffectiveSchema>>,
}

/// Lazily compiles and caches effective schemas.
#[derive(Debug, Default)]
pub struct SchemaCompiler {
    cache: RwLock<SchemaCache>,
}

impl SchemaCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the effective schema of `name`, compiling it on first request.
    ///
    /// If the registry generation moved since the cache was filled, the whole
    /// cache is dropped before the new schema is stored.
    pub fn compile(&self, registry: &TypeRegistry, name: &str) -> ModelResult<Arc<EffectiveSchema>> {
        let generation = registry.generation();
        {
            let cache = self.read();
            if cache.generation == generation {
                if let Some(schema) = cache.schemas.get(name) {
                    return Ok(Arc::clone(schema));
                }
            }
        }

        let chain = registry.ancestor_chain(name)?;
        let schema = Arc::new(fold_chain(&chain, generation));
        debug!(type_name = %name, depth = chain.len(), "compiled schema");

        let mut cache = self.write();
        if cache.generation != generation {
            debug!(
                from = cache.generation,
                to = generation,
                dropped = cache.schemas.len(),
                "registry generation changed, flushing schema cache"
            );
            cache.schemas = HashMap::new();
            cache.generation = generation;
        }
        let entry = cache.schemas.entry(name.to_string()).or_insert(schema);
        Ok(Arc::clone(entry))
    }

    /// Drops the cached schema of `name` and of every known descendant.
    ///
    /// Returns how many cache entries were removed.
    pub fn invalidate(&self, registry: &TypeRegistry, name: &str) -> ModelResult<usize> {
        let mut affected = registry.descendants(name)?;
        affected.push(name.to_string());

        let mut cache = self.write();
        let removed = affected
            .iter()
            .filter(|type_name| cache.schemas.remove(type_name.as_str()).is_some())
            .count();
        debug!(type_name = %name, removed, "invalidated schemas");
        Ok(removed)
    }

    /// Returns true if a schema for `name` is currently cached.
    pub fn is_cached(&self, name: &str) -> bool {
        self.read().schemas.contains_key(name)
    }

    /// Number of cached schemas.
    pub fn len(&self) -> usize {
        self.read().schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().schemas.is_empty()
    }

    /// Drops every cached schema.
    pub fn clear(&self) {
        self.write().schemas.clear();
    }

    fn read(&self) -> RwLockReadGuard<'_, SchemaCache> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, SchemaCache> {
        self.cache.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Merges declared schemas and read-only sets along `chain` (root first).
///
/// A redeclared property keeps the most specific definition, even when its
/// semantic type differs from the inherited one. `type` and `id` are always
/// read-only, whatever the root declares.
pub fn fold_chain(chain: &[&TypeDescriptor], generation: u64) -> EffectiveSchema {
    let mut properties = BTreeMap::new();
    let mut read_only: BTreeSet<String> =
        [TYPE_PROPERTY, ID_PROPERTY].into_iter().map(String::from).collect();
    for descriptor in chain {
        for (name, def) in &descriptor.properties {
            if let Some(previous) = properties.insert(name.clone(), def.clone()) {
                if previous.property_type != def.property_type {
                    debug!(
                        type_name = %descriptor.name,
                        property = %name,
                        inherited = %previous.property_type,
                        declared = %def.property_type,
                        "property redeclared with a different type"
                    );
                }
            }
        }
        read_only.extend(descriptor.read_only.iter().cloned());
    }

    EffectiveSchema {
        type_name: chain.last().map(|d| d.name.clone()).unwrap_or_default(),
        chain: chain.iter().map(|d| d.name.clone()).collect(),
        properties,
        read_only,
        generation,
    }
}
