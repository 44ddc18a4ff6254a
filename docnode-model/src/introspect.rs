use crate::compiler::SchemaCompiler;
use crate::error::ModelResult;
use crate::registry::TypeRegistry;
use crate::schema::PropertyType;

/// Ancestry and polymorphism queries over registered types.
pub struct TypeIntrospector<'a> {
    registry: &'a TypeRegistry,
    compiler: &'a SchemaCompiler,
}

impl<'a> TypeIntrospector<'a> {
    pub fn new(registry: &'a TypeRegistry, compiler: &'a SchemaCompiler) -> Self {
        Self { registry, compiler }
    }

    /// Type names from `type_name` up to, but excluding, the root.
    pub fn type_names(&self, type_name: &str) -> ModelResult<Vec<String>> {
        let chain = self.registry.ancestor_chain(type_name)?;
        Ok(chain
            .iter()
            .rev()
            .filter(|descriptor| !descriptor.is_root())
            .map(|descriptor| descriptor.name.clone())
            .collect())
    }

    /// True iff `queried` appears in [`type_names`](Self::type_names). The
    /// root type is never a match.
    pub fn is_instance_of(&self, type_name: &str, queried: &str) -> ModelResult<bool> {
        Ok(self.type_names(type_name)?.iter().any(|name| name == queried))
    }

    /// Semantic type of `property` in the effective schema of `type_name`,
    /// or `None` if the schema has no such property.
    pub fn property_type(&self, type_name: &str, property: &str) -> ModelResult<Option<PropertyType>> {
        let schema = self.compiler.compile(self.registry, type_name)?;
        Ok(schema.property_type(property).cloned())
    }
}
