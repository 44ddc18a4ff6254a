//! Core type definitions for docnode.
//!
//! This crate holds the small, dependency-light pieces shared by every
//! docnode crate:
//! - the name of the root node type
//! - the per-type id generator that mints `<type>-<token>` identifiers
//!
//! Schema, registry and entity types live in `docnode-model`.

mod ids;

pub use ids::IdGenerator;

/// Name of the root type every node type descends from.
pub const ROOT_TYPE: &str = "node";

/// Property holding an entity's concrete type name.
pub const TYPE_PROPERTY: &str = "type";

/// Property holding an entity's unique id.
pub const ID_PROPERTY: &str = "id";

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid id seed: {0:?}")]
    InvalidSeed(String),

    #[error("invalid type name: {0:?}")]
    InvalidTypeName(String),
}
