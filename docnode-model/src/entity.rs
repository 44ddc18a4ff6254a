use std::sync::Arc;

use docnode_types::{ID_PROPERTY, TYPE_PROPERTY};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::accessor::PropertyAccessor;
use crate::config::Validation;
use crate::error::ModelResult;
use crate::schema::{EffectiveSchema, PropertyType};

/// A live node instance.
///
/// Built only by [`EntityFactory`](crate::EntityFactory). The property map
/// always holds exactly the keys of the attached schema, with `type` equal to
/// the concrete type name and a non-empty `id`. Writes go through
/// [`PropertyAccessor`].
#[derive(Debug, Clone)]
pub struct Entity {
    pub(crate) schema: Arc<EffectiveSchema>,
    pub(crate) properties: Map<String, Value>,
    pub(crate) validation: Validation,
}

impl Entity {
    /// The concrete type this entity was created as.
    pub fn type_name(&self) -> &str {
        self.schema.type_name()
    }

    pub fn id(&self) -> &str {
        self.properties
            .get(ID_PROPERTY)
            .and_then(Value::as_str)
            .unwrap_or_default()
    }

    /// The compiled schema attached at construction.
    pub fn schema(&self) -> &Arc<EffectiveSchema> {
        &self.schema
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Reads a property. `None` for properties outside the schema.
    pub fn get(&self, property: &str) -> Option<&Value> {
        PropertyAccessor::get(self, property)
    }

    /// Writes a property, returning `self` for chaining.
    pub fn set(&mut self, property: &str, value: impl Into<Value>) -> ModelResult<&mut Self> {
        PropertyAccessor::set(self, property, value.into())
    }

    pub fn get_str(&self, property: &str) -> Option<&str> {
        self.get(property).and_then(Value::as_str)
    }

    pub fn get_bool(&self, property: &str) -> Option<bool> {
        self.get(property).and_then(Value::as_bool)
    }

    pub fn get_number(&self, property: &str) -> Option<f64> {
        self.get(property).and_then(Value::as_f64)
    }

    /// Flat property map including `type` and `id`, as stored and transported.
    pub fn to_snapshot(&self) -> Value {
        Value::Object(self.properties.clone())
    }

    pub fn into_snapshot(self) -> Value {
        Value::Object(self.properties)
    }

    /// Polymorphic type names, most specific first, root excluded.
    pub fn type_names(&self) -> Vec<&str> {
        self.schema.type_names().collect()
    }

    /// True if this entity's type is `queried` or descends from it. Never true
    /// for the root type.
    pub fn is_instance_of(&self, queried: &str) -> bool {
        self.schema.is_instance_of(queried)
    }

    pub fn property_type(&self, property: &str) -> Option<&PropertyType> {
        self.schema.property_type(property)
    }

    pub(crate) fn has_type_tag(&self) -> bool {
        self.properties.get(TYPE_PROPERTY).and_then(Value::as_str) == Some(self.type_name())
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.type_name() == other.type_name() && self.properties == other.properties
    }
}

impl Serialize for Entity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.properties.serialize(serializer)
    }
}
