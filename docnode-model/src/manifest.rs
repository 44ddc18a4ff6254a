//! Type manifest (types.toml) declaring node types outside of code.
//!
//! ```toml
//! [[types]]
//! name = "paragraph"
//! parent = "node"
//! display_name = "Paragraph"
//!
//! [types.properties.content]
//! type = "string"
//! default = ""
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{ModelError, ModelResult};
use crate::schema::TypeDescriptor;
use crate::system::TypeSystem;

/// A list of type descriptors, registered in file order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TypeManifest {
    #[serde(default)]
    pub types: Vec<TypeDescriptor>,
}

impl TypeManifest {
    /// Parses and validates a manifest from TOML text.
    pub fn from_toml_str(text: &str) -> ModelResult<Self> {
        let manifest: Self = toml::from_str(text)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Reads, parses and validates a manifest file.
    pub fn load(path: &Path) -> ModelResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks names without consulting any registry.
    pub fn validate(&self) -> ModelResult<()> {
        let mut seen = HashSet::new();
        for descriptor in &self.types {
            if descriptor.name.trim().is_empty() {
                return Err(ModelError::ManifestInvalid("type name is required".into()));
            }
            if !seen.insert(descriptor.name.as_str()) {
                return Err(ModelError::ManifestInvalid(format!(
                    "type '{}' declared more than once",
                    descriptor.name
                )));
            }
            if descriptor.parent.as_deref() == Some(descriptor.name.as_str()) {
                return Err(ModelError::ManifestInvalid(format!(
                    "type '{}' cannot extend itself",
                    descriptor.name
                )));
            }
            if descriptor.properties.keys().any(|p| p.trim().is_empty()) {
                return Err(ModelError::ManifestInvalid(format!(
                    "type '{}' declares a property with an empty name",
                    descriptor.name
                )));
            }
        }
        Ok(())
    }

    /// Registers every type in order. Stops at the first failure; types
    /// registered before it stay registered.
    pub fn register_into(&self, system: &mut TypeSystem) -> ModelResult<usize> {
        for descriptor in &self.types {
            system.register(descriptor.clone())?;
        }
        info!(count = self.types.len(), "registered manifest types");
        Ok(self.types.len())
    }
}
