//! Type system for property graph schemas
//!
//! - Attribute types (labels and typed properties)
//! - Content record types and their builder
//! - Node and edge types built on content record types
//! - Type key resolution for multi-conformant instances
//! - Graph types and the ALL ELEMENT TYPES KEYED invariant

pub mod attribute;
pub mod content;
pub mod element;
pub mod error;
pub mod graph_type;
pub mod resolve;

pub use attribute::{AttributeType, LabelType, PropertyType, ScalarKind};
pub use content::{ContentRecordType, ContentRecordTypeBuilder};
pub use element::{
    EdgeDirection, EdgeType, ElementId, ElementIdAllocator, ElementKind, ElementType, ElementTypeCommon,
    EndpointRef, NodeType,
};
pub use error::{SchemaError, SchemaResult};
pub use graph_type::{DeclaredConstraint, GraphType, GraphTypeBuilder};
pub use resolve::{resolve_content_type, resolve_type, Conformable, Resolution};
