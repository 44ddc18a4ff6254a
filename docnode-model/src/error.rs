//! Error types for the node model.

use thiserror::Error;

/// Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised by registration, schema compilation and property access.
///
/// All of these are configuration or programming errors: they are reported
/// at the point of violation and never retried.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A type with this name is already registered.
    #[error("type already registered: {0}")]
    DuplicateType(String),

    /// The descriptor names a parent that has not been registered yet.
    #[error("type '{type_name}' extends unknown parent '{parent}'")]
    UnknownParent { type_name: String, parent: String },

    /// No type with this name is registered.
    #[error("unknown type: {0}")]
    UnknownType(String),

    /// A second parentless descriptor was registered.
    #[error("root type already registered as '{existing}', cannot register '{type_name}'")]
    MultipleRoots { existing: String, type_name: String },

    /// The root descriptor does not declare a mandatory property.
    #[error("root type '{type_name}' must declare property '{property}'")]
    MissingRootProperty { type_name: String, property: String },

    /// Attempted to write a property that is read-only for the entity's type.
    #[error("property '{property}' is read-only on type '{type_name}'")]
    ReadOnlyProperty { type_name: String, property: String },

    /// A value or key does not conform to the effective schema.
    #[error("schema violation on type '{type_name}': {detail}")]
    SchemaViolation { type_name: String, detail: String },

    /// A type manifest failed validation.
    #[error("manifest validation error: {0}")]
    ManifestInvalid(String),

    /// Id generation failed.
    #[error("id generation error: {0}")]
    Id(#[from] docnode_types::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ModelError {
    pub(crate) fn violation(type_name: &str, detail: impl Into<String>) -> Self {
        Self::SchemaViolation {
            type_name: type_name.to_string(),
            detail: detail.into(),
        }
    }
}
