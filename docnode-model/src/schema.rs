use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Semantic type of a node property.
///
/// Serialized as a bare snake_case string (`"string"`, `"id"`, ...). Names
/// that are not built in round-trip through [`PropertyType::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    String,
    Number,
    Boolean,
    Array,
    Object,
    /// Reference to another node by id.
    Id,
    /// Accepts any JSON value.
    Any,
    Custom(String),
}

impl PropertyType {
    /// Returns the snake_case name used in manifests and snapshots.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Array => "array",
            Self::Object => "object",
            Self::Id => "id",
            Self::Any => "any",
            Self::Custom(name) => name,
        }
    }

    /// The value a property of this type holds when no default is declared.
    #[must_use]
    pub fn zero_value(&self) -> Value {
        match self {
            Self::String | Self::Id => Value::String(String::new()),
            Self::Number => Value::from(0),
            Self::Boolean => Value::Bool(false),
            Self::Array => Value::Array(Vec::new()),
            Self::Object => Value::Object(Map::new()),
            Self::Any | Self::Custom(_) => Value::Null,
        }
    }

    /// Whether `value` has the JSON kind this type expects.
    ///
    /// `Any` and custom types accept everything.
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String | Self::Id => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Array => value.is_array(),
            Self::Object => value.is_object(),
            Self::Any | Self::Custom(_) => true,
        }
    }
}

impl From<String> for PropertyType {
    fn from(name: String) -> Self {
        match name.as_str() {
            "string" => Self::String,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "array" => Self::Array,
            "object" => Self::Object,
            "id" => Self::Id,
            "any" => Self::Any,
            _ => Self::Custom(name),
        }
    }
}

impl From<&str> for PropertyType {
    fn from(name: &str) -> Self {
        Self::from(name.to_string())
    }
}

impl From<PropertyType> for String {
    fn from(ty: PropertyType) -> Self {
        match ty {
            PropertyType::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A declared property: its semantic type and an optional default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDef {
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

impl PropertyDef {
    #[must_use]
    pub fn new(property_type: PropertyType) -> Self {
        Self {
            property_type,
            default: None,
        }
    }

    /// Shorthand for a string property.
    #[must_use]
    pub fn string() -> Self {
        Self::new(PropertyType::String)
    }

    /// Shorthand for a numeric property.
    #[must_use]
    pub fn number() -> Self {
        Self::new(PropertyType::Number)
    }

    /// Shorthand for a boolean property.
    #[must_use]
    pub fn boolean() -> Self {
        Self::new(PropertyType::Boolean)
    }

    /// Shorthand for an array property.
    #[must_use]
    pub fn array() -> Self {
        Self::new(PropertyType::Array)
    }

    /// Shorthand for an object property.
    #[must_use]
    pub fn object() -> Self {
        Self::new(PropertyType::Object)
    }

    /// Shorthand for a reference to another node.
    #[must_use]
    pub fn id() -> Self {
        Self::new(PropertyType::Id)
    }

    /// Shorthand for an untyped property.
    #[must_use]
    pub fn any() -> Self {
        Self::new(PropertyType::Any)
    }

    /// Sets the declared default value.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// The declared default, or the type's zero value.
    #[must_use]
    pub fn default_value(&self) -> Value {
        self.default
            .clone()
            .unwrap_or_else(|| self.property_type.zero_value())
    }
}

/// The registered definition of one node type.
///
/// `properties` and `read_only` hold only what this level declares; the
/// inherited view is an [`EffectiveSchema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub name: String,
    /// Parent type name. `None` only for the root type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyDef>,
    #[serde(default)]
    pub read_only: BTreeSet<String>,
}

impl TypeDescriptor {
    /// A parentless descriptor.
    #[must_use]
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            display_name: None,
            properties: BTreeMap::new(),
            read_only: BTreeSet::new(),
        }
    }

    /// A descriptor extending `parent`.
    #[must_use]
    pub fn new(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            parent: Some(parent.into()),
            ..Self::root(name)
        }
    }

    /// The standard root type: `node { type: string, id: string }`, both read-only.
    #[must_use]
    pub fn node() -> Self {
        Self::root(docnode_types::ROOT_TYPE)
            .property(docnode_types::TYPE_PROPERTY, PropertyDef::string())
            .property(docnode_types::ID_PROPERTY, PropertyDef::string())
            .read_only(docnode_types::TYPE_PROPERTY)
            .read_only(docnode_types::ID_PROPERTY)
    }

    #[must_use]
    pub fn property(mut self, name: impl Into<String>, def: PropertyDef) -> Self {
        self.properties.insert(name.into(), def);
        self
    }

    #[must_use]
    pub fn read_only(mut self, name: impl Into<String>) -> Self {
        self.read_only.insert(name.into());
        self
    }

    #[must_use]
    pub fn display_name(mut self, label: impl Into<String>) -> Self {
        self.display_name = Some(label.into());
        self
    }

    /// Returns true for the parentless root descriptor.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Human-readable label, falling back to the type name.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }
}

/// The merged schema of a type across its whole ancestor chain.
///
/// Produced by [`SchemaCompiler`](crate::SchemaCompiler) and shared behind an
/// `Arc`; never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveSchema {
    pub(crate) type_name: String,
    /// Type names from the root (first) to this type (last).
    pub(crate) chain: Vec<String>,
    pub(crate) properties: BTreeMap<String, PropertyDef>,
    pub(crate) read_only: BTreeSet<String>,
    #[serde(skip)]
    pub(crate) generation: u64,
}

impl EffectiveSchema {
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Ancestor chain, root first.
    #[must_use]
    pub fn chain(&self) -> &[String] {
        &self.chain
    }

    #[must_use]
    pub fn properties(&self) -> &BTreeMap<String, PropertyDef> {
        &self.properties
    }

    #[must_use]
    pub fn get(&self, property: &str) -> Option<&PropertyDef> {
        self.properties.get(property)
    }

    #[must_use]
    pub fn contains(&self, property: &str) -> bool {
        self.properties.contains_key(property)
    }

    #[must_use]
    pub fn property_type(&self, property: &str) -> Option<&PropertyType> {
        self.properties.get(property).map(|def| &def.property_type)
    }

    /// Union of the read-only sets declared along the chain.
    #[must_use]
    pub fn read_only(&self) -> &BTreeSet<String> {
        &self.read_only
    }

    #[must_use]
    pub fn is_read_only(&self, property: &str) -> bool {
        self.read_only.contains(property)
    }

    /// Registry generation this schema was compiled against.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Polymorphic type names, most specific first, root excluded.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.chain.iter().skip(1).rev().map(String::as_str)
    }

    /// True iff `queried` is this type or one of its non-root ancestors.
    #[must_use]
    pub fn is_instance_of(&self, queried: &str) -> bool {
        self.type_names().any(|name| name == queried)
    }

    /// A property map holding every property's default.
    #[must_use]
    pub fn defaults(&self) -> Map<String, Value> {
        self.properties
            .iter()
            .map(|(name, def)| (name.clone(), def.default_value()))
            .collect()
    }
}
