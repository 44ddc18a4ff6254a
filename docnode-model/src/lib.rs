//! Typed node model for docnode.
//!
//! Node types form single-inheritance chains rooted at `node`. Each type
//! declares only its own properties; the effective schema of a type is the
//! merge of every declaration along its chain.
//!
//! - [`TypeRegistry`] — registered [`TypeDescriptor`]s and their parent links
//! - [`SchemaCompiler`] — lazily merged, cached [`EffectiveSchema`]s
//! - [`PropertyAccessor`] — schema-checked get/set with read-only enforcement
//! - [`EntityFactory`] — builds [`Entity`] values with defaults and generated ids
//! - [`TypeIntrospector`] — `type_names` / `is_instance_of` / `property_type`
//! - [`TypeSystem`] — owns all of the above
//! - [`TypeManifest`] — TOML declaration of types
//!
//! The model emits no change events and holds no ownership over entities.

mod accessor;
mod compiler;
mod config;
mod entity;
mod error;
mod factory;
mod introspect;
mod manifest;
mod registry;
mod schema;
mod system;

pub use accessor::PropertyAccessor;
pub use compiler::{fold_chain, SchemaCompiler};
pub use config::{FactoryConfig, Validation};
pub use entity::Entity;
pub use error::{ModelError, ModelResult};
pub use factory::EntityFactory;
pub use introspect::TypeIntrospector;
pub use manifest::TypeManifest;
pub use registry::TypeRegistry;
pub use schema::{EffectiveSchema, PropertyDef, PropertyType, TypeDescriptor};
pub use system::TypeSystem;
