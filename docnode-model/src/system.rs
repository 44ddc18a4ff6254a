use std::sync::Arc;

use docnode_types::IdGenerator;
use serde_json::Value;

use crate::compiler::SchemaCompiler;
use crate::config::FactoryConfig;
use crate::entity::Entity;
use crate::error::ModelResult;
use crate::factory::EntityFactory;
use crate::introspect::TypeIntrospector;
use crate::registry::TypeRegistry;
use crate::schema::{EffectiveSchema, PropertyType, TypeDescriptor};

/// Owns a registry, its schema cache and an id generator.
///
/// Register every type first (`&mut self`), then share the system for
/// entity creation and queries (`&self`). `TypeSystem` is `Send + Sync`.
#[derive(Debug)]
pub struct TypeSystem {
    registry: TypeRegistry,
    compiler: SchemaCompiler,
    ids: Arc<IdGenerator>,
    config: FactoryConfig,
}

impl TypeSystem {
    /// An empty system using the process-wide id generator.
    pub fn new() -> Self {
        Self {
            registry: TypeRegistry::new(),
            compiler: SchemaCompiler::new(),
            ids: IdGenerator::global(),
            config: FactoryConfig::default(),
        }
    }

    /// A system with the standard `node` root already registered.
    pub fn with_root() -> Self {
        let mut system = Self::new();
        system
            .registry
            .register(TypeDescriptor::node())
            .expect("empty registry accepts the standard root");
        system
    }

    #[must_use]
    pub fn with_config(mut self, config: FactoryConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_id_generator(mut self, ids: Arc<IdGenerator>) -> Self {
        self.ids = ids;
        self
    }

    pub fn register(&mut self, descriptor: TypeDescriptor) -> ModelResult<()> {
        self.registry.register(descriptor)
    }

    /// Replaces a registered type and drops the compiled schemas of it and
    /// its descendants. Returns the affected type names.
    pub fn redefine(&mut self, descriptor: TypeDescriptor) -> ModelResult<Vec<String>> {
        let name = descriptor.name.clone();
        let affected = self.registry.redefine(descriptor)?;
        self.compiler.invalidate(&self.registry, &name)?;
        Ok(affected)
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn compiler(&self) -> &SchemaCompiler {
        &self.compiler
    }

    pub fn config(&self) -> FactoryConfig {
        self.config
    }

    pub fn compile(&self, type_name: &str) -> ModelResult<Arc<EffectiveSchema>> {
        self.compiler.compile(&self.registry, type_name)
    }

    pub fn factory(&self) -> EntityFactory<'_> {
        EntityFactory::new(&self.registry, &self.compiler, &self.ids, self.config)
    }

    pub fn introspector(&self) -> TypeIntrospector<'_> {
        TypeIntrospector::new(&self.registry, &self.compiler)
    }

    pub fn create(&self, type_name: &str, initial: Value) -> ModelResult<Entity> {
        self.factory().create(type_name, initial)
    }

    pub fn create_from_snapshot(&self, snapshot: Value) -> ModelResult<Entity> {
        self.factory().create_from_snapshot(snapshot)
    }

    pub fn type_names(&self, type_name: &str) -> ModelResult<Vec<String>> {
        self.introspector().type_names(type_name)
    }

    pub fn is_instance_of(&self, type_name: &str, queried: &str) -> ModelResult<bool> {
        self.introspector().is_instance_of(type_name, queried)
    }

    pub fn property_type(&self, type_name: &str, property: &str) -> ModelResult<Option<PropertyType>> {
        self.introspector().property_type(type_name, property)
    }
}

impl Default for TypeSystem {
    fn default() -> Self {
        Self::new()
    }
}
