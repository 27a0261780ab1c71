//! Hierarchical catalog
//!
//! Directories nest; each directory holds GQL-schemas, and each schema holds
//! graph types and graphs.

pub mod directory;
pub mod path;

pub use directory::{Catalog, Directory, GqlSchema};
pub use path::CatalogPath;

use thiserror::Error;

/// Catalog errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Invalid catalog path: {0}")]
    InvalidPath(String),

    #[error("Directory not found: {0}")]
    DirectoryNotFound(String),

    #[error("GQL-schema {name} not found in {path}")]
    SchemaNotFound { path: String, name: String },

    #[error("Graph type {name} already exists in {schema}")]
    DuplicateGraphType { schema: String, name: String },

    #[error("Graph {name} already exists in {schema}")]
    DuplicateGraph { schema: String, name: String },

    #[error("Graph type {name} not found in {schema}")]
    GraphTypeNotFound { schema: String, name: String },

    #[error("Graph {name} not found in {schema}")]
    GraphNotFound { schema: String, name: String },
}

pub type CatalogResult<T> = Result<T, CatalogError>;
