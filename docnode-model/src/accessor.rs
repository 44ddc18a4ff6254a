//! Uniform property access.
//!
//! One routine serves every type: reads and writes are checked against the
//! entity's attached [`EffectiveSchema`] instead of per-property accessors.

use serde_json::Value;

use crate::config::Validation;
use crate::entity::Entity;
use crate::error::{ModelError, ModelResult};
use crate::schema::EffectiveSchema;

/// Schema-checked get/set over entity properties.
pub struct PropertyAccessor;

impl PropertyAccessor {
    /// Returns the property value, or `None` if `property` is not part of the
    /// entity's schema.
    pub fn get<'a>(entity: &'a Entity, property: &str) -> Option<&'a Value> {
        if !entity.schema.contains(property) {
            return None;
        }
        entity.properties.get(property)
    }

    /// Writes `value` to `property`.
    ///
    /// Read-only properties (the union of read-only declarations along the
    /// type's chain) and properties outside the schema are rejected and the
    /// entity is left untouched.
    pub fn set<'a>(entity: &'a mut Entity, property: &str, value: Value) -> ModelResult<&'a mut Entity> {
        let schema = &entity.schema;
        if schema.is_read_only(property) {
            return Err(ModelError::ReadOnlyProperty {
                type_name: schema.type_name().to_string(),
                property: property.to_string(),
            });
        }
        check_value(schema, entity.validation, property, &value)?;
        entity.properties.insert(property.to_string(), value);
        Ok(entity)
    }
}

/// Verifies that `property` belongs to the schema and, in strict mode, that
/// `value` has the declared JSON kind.
pub(crate) fn check_value(
    schema: &EffectiveSchema,
    validation: Validation,
    property: &str,
    value: &Value,
) -> ModelResult<()> {
    let Some(def) = schema.get(property) else {
        return Err(ModelError::violation(
            schema.type_name(),
            format!("unknown property '{property}'"),
        ));
    };
    if validation == Validation::Strict && !def.property_type.accepts(value) {
        return Err(ModelError::violation(
            schema.type_name(),
            format!("property '{property}' expects {}, got {value}", def.property_type),
        ));
    }
    Ok(())
}
