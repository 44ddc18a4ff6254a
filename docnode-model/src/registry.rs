//! Type registry.
//!
//! Holds every registered [`TypeDescriptor`] and the single-parent links
//! between them. Types are registered root-first: a descriptor may only name
//! a parent that is already present, which keeps the ancestor graph a forest
//! of single chains and rules out cycles.

use std::collections::{HashMap, VecDeque};

use docnode_types::{ID_PROPERTY, TYPE_PROPERTY};
use tracing::{debug, info};

use crate::error::{ModelError, ModelResult};
use crate::schema::TypeDescriptor;

/// Registered node types and their parent links.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeDescriptor>,
    children: HashMap<String, Vec<String>>,
    /// Type names in registration order.
    order: Vec<String>,
    root: Option<String>,
    /// Bumped on every redefinition so compiled schemas can detect staleness.
    generation: u64,
}

impl TypeRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a descriptor.
    ///
    /// Fails if the name is taken, if the parent is not registered, or if a
    /// second root is registered.
    pub fn register(&mut self, descriptor: TypeDescriptor) -> ModelResult<()> {
        if self.types.contains_key(&descriptor.name) {
            return Err(ModelError::DuplicateType(descriptor.name));
        }
        self.validate(&descriptor)?;

        let name = descriptor.name.clone();
        match &descriptor.parent {
            Some(parent) => {
                self.children
                    .entry(parent.clone())
                    .or_default()
                    .push(name.clone());
                debug!(type_name = %name, parent = %parent, "registered type");
            }
            None => {
                self.root = Some(name.clone());
                debug!(type_name = %name, "registered root type");
            }
        }
        self.order.push(name.clone());
        self.types.insert(name, descriptor);
        Ok(())
    }

    /// Replaces an already registered descriptor (hot reload).
    ///
    /// The parent link may not change, and every descendant must still be
    /// valid against the new chain; otherwise the registry is left as it was.
    /// Bumps the generation and returns the redefined type followed by all
    /// of its descendants, whose compiled schemas are now stale.
    pub fn redefine(&mut self, descriptor: TypeDescriptor) -> ModelResult<Vec<String>> {
        let existing = self.resolve(&descriptor.name)?;
        if existing.parent != descriptor.parent {
            return Err(ModelError::violation(
                &descriptor.name,
                "redefinition cannot change the parent type",
            ));
        }
        self.validate(&descriptor)?;

        let name = descriptor.name.clone();
        let descendants = self.descendants(&name)?;
        let previous = self.types.insert(name.clone(), descriptor);
        if let Err(err) = self.validate_all(&descendants) {
            if let Some(previous) = previous {
                self.types.insert(name, previous);
            }
            return Err(err);
        }

        let mut affected = vec![name];
        affected.extend(descendants);
        self.generation += 1;
        info!(
            generation = self.generation,
            affected = affected.len(),
            "redefined type '{}'",
            affected[0]
        );
        Ok(affected)
    }

    /// Returns the descriptor for `name`.
    pub fn resolve(&self, name: &str) -> ModelResult<&TypeDescriptor> {
        self.types
            .get(name)
            .ok_or_else(|| ModelError::UnknownType(name.to_string()))
    }

    /// Returns true if `name` is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    /// Descriptors from the root (first) to `name` (last).
    pub fn ancestor_chain(&self, name: &str) -> ModelResult<Vec<&TypeDescriptor>> {
        let mut chain = Vec::new();
        let mut current = Some(self.resolve(name)?);
        while let Some(descriptor) = current {
            chain.push(descriptor);
            current = match &descriptor.parent {
                Some(parent) => Some(self.resolve(parent)?),
                None => None,
            };
        }
        chain.reverse();
        Ok(chain)
    }

    /// Every type that descends from `name`, breadth-first, `name` excluded.
    pub fn descendants(&self, name: &str) -> ModelResult<Vec<String>> {
        self.resolve(name)?;
        let mut found = Vec::new();
        let mut queue: VecDeque<&str> = VecDeque::from([name]);
        while let Some(current) = queue.pop_front() {
            for child in self.children.get(current).into_iter().flatten() {
                found.push(child.clone());
                queue.push_back(child.as_str());
            }
        }
        Ok(found)
    }

    /// The root type's name, once registered.
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    /// Registered type names in registration order.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Current generation; starts at 0 and only moves on redefinition.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    fn validate_all(&self, names: &[String]) -> ModelResult<()> {
        for name in names {
            self.validate(self.resolve(name)?)?;
        }
        Ok(())
    }

    fn validate(&self, descriptor: &TypeDescriptor) -> ModelResult<()> {
        if let Some((property, def)) = descriptor
            .properties
            .iter()
            .find(|(_, def)| def.default.as_ref().is_some_and(|v| !def.property_type.accepts(v)))
        {
            return Err(ModelError::violation(
                &descriptor.name,
                format!("default of '{property}' is not a valid {}", def.property_type),
            ));
        }

        let mut known: Vec<&str> = descriptor.properties.keys().map(String::as_str).collect();
        match &descriptor.parent {
            None => {
                if let Some(existing) = &self.root {
                    if existing != &descriptor.name {
                        return Err(ModelError::MultipleRoots {
                            existing: existing.clone(),
                            type_name: descriptor.name.clone(),
                        });
                    }
                }
                for property in [TYPE_PROPERTY, ID_PROPERTY] {
                    if !descriptor.properties.contains_key(property) {
                        return Err(ModelError::MissingRootProperty {
                            type_name: descriptor.name.clone(),
                            property: property.to_string(),
                        });
                    }
                }
            }
            Some(parent) => {
                if !self.types.contains_key(parent) {
                    return Err(ModelError::UnknownParent {
                        type_name: descriptor.name.clone(),
                        parent: parent.clone(),
                    });
                }
                for ancestor in self.ancestor_chain(parent)? {
                    known.extend(ancestor.properties.keys().map(String::as_str));
                }
            }
        }

        if let Some(stray) = descriptor
            .read_only
            .iter()
            .find(|name| !known.contains(&name.as_str()))
        {
            return Err(ModelError::violation(
                &descriptor.name,
                format!("read-only property '{stray}' is not declared"),
            ));
        }
        Ok(())
    }
}
