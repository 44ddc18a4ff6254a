//! Entity construction.

use docnode_types::{IdGenerator, ID_PROPERTY, TYPE_PROPERTY};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::accessor::check_value;
use crate::compiler::SchemaCompiler;
use crate::config::{FactoryConfig, Validation};
use crate::entity::Entity;
use crate::error::{ModelError, ModelResult};
use crate::registry::TypeRegistry;

/// Builds [`Entity`] values from registered types.
///
/// Construction is all-or-nothing: on error no entity is produced and the
/// only side effect that may already have happened is a compiled schema
/// landing in the cache.
pub struct EntityFactory<'a> {
    registry: &'a TypeRegistry,
    compiler: &'a SchemaCompiler,
    ids: &'a IdGenerator,
    config: FactoryConfig,
}

impl<'a> EntityFactory<'a> {
    pub fn new(
        registry: &'a TypeRegistry,
        compiler: &'a SchemaCompiler,
        ids: &'a IdGenerator,
        config: FactoryConfig,
    ) -> Self {
        Self {
            registry,
            compiler,
            ids,
            config,
        }
    }

    /// Creates an entity of `type_name`.
    ///
    /// `initial` must be a JSON object (or `null` for no overrides). Its
    /// values are shallow-merged over the schema defaults. `type` is always
    /// forced to `type_name`; an absent, null or empty `id` is replaced by a
    /// generated `<type>-<token>` id, any other string id is kept as is.
    pub fn create(&self, type_name: &str, initial: Value) -> ModelResult<Entity> {
        self.registry.resolve(type_name)?;
        let schema = self.compiler.compile(self.registry, type_name)?;
        let validation = self.config.validation;

        let initial = match initial {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(ModelError::violation(
                    type_name,
                    format!("initial properties must be an object, got {other}"),
                ));
            }
        };

        let mut properties = schema.defaults();
        for (key, value) in initial {
            if key == TYPE_PROPERTY {
                if value.as_str() != Some(type_name) {
                    debug!(type_name, given = %value, "ignoring supplied type tag");
                }
                continue;
            }
            if key == ID_PROPERTY {
                properties.insert(key, value);
                continue;
            }
            if !schema.contains(&key) && validation == Validation::Lenient {
                warn!(type_name, property = %key, "dropping property not in schema");
                continue;
            }
            check_value(&schema, validation, &key, &value)?;
            properties.insert(key, value);
        }

        properties.insert(TYPE_PROPERTY.to_string(), Value::String(type_name.to_string()));
        let id = match properties.get(ID_PROPERTY) {
            Some(Value::String(id)) if !id.is_empty() => None,
            None | Some(Value::Null | Value::String(_)) => Some(self.ids.next_id(type_name)?),
            Some(other) => {
                return Err(ModelError::violation(
                    type_name,
                    format!("id must be a string, got {other}"),
                ));
            }
        };
        if let Some(id) = id {
            properties.insert(ID_PROPERTY.to_string(), Value::String(id));
        }

        let entity = Entity {
            schema,
            properties,
            validation,
        };
        debug_assert!(entity.has_type_tag());
        Ok(entity)
    }

    /// Rebuilds an entity from a snapshot produced by [`Entity::to_snapshot`],
    /// taking the type from the snapshot's `type` property.
    pub fn create_from_snapshot(&self, snapshot: Value) -> ModelResult<Entity> {
        let type_name = snapshot
            .get(TYPE_PROPERTY)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| ModelError::violation("<snapshot>", "snapshot has no string 'type'"))?;
        self.create(&type_name, snapshot)
    }

    pub fn config(&self) -> FactoryConfig {
        self.config
    }
}
