//! Grasch
//!
//! A LEX-extended GQL catalog and type system for property graph schemas.
//!
//! # Architecture
//!
//! - `graph`: in-memory property graph storage and the element read view
//! - `schema`: content record types, node and edge types, graph types, type key resolution
//! - `constraint`: key and cardinality constraints, runtime binding, batch validation
//! - `catalog`: hierarchical directories and GQL-schemas
//! - `session`: profiles, language levels and session configuration
//!
//! ## Example Usage
//!
//! ```rust
//! use grasch::constraint::{ConstraintSpecification, GraphValidator};
//! use grasch::graph::{property_map, GraphStore};
//! use grasch::schema::{ContentRecordType, GraphType, ScalarKind};
//!
//! let person = ContentRecordType::builder()
//!     .add_label("Person")
//!     .add_property("name", ScalarKind::String, true)
//!     .set_type_identifier(["Person"])
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let mut builder = GraphType::builder("People", true);
//! builder.node_type(person).unwrap();
//! builder.constraint(ConstraintSpecification::key("Person", ["Person"]));
//! let graph_type = builder.build().unwrap();
//!
//! let mut store = GraphStore::new("people");
//! let alice = store.insert_node(["Person"], property_map([("name", "Alice")]));
//!
//! let resolved = graph_type.resolve_node(&store.get_node(alice).unwrap().element_data()).unwrap();
//! assert_eq!(resolved.unique().unwrap().name(), "Person");
//!
//! let violations = GraphValidator::new(&graph_type).validate_graph(&store);
//! assert!(violations.is_empty());
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod catalog;
pub mod constraint;
pub mod graph;
pub mod schema;
pub mod session;

// Re-export main types for convenience
pub use graph::{
    Edge, EdgeId, ElementData, ElementRef, GraphError, GraphId, GraphResult, GraphStore, Label, Node, NodeId,
    PropertyMap, PropertyValue,
};

pub use schema::{
    ContentRecordType, EdgeDirection, EdgeType, ElementType, GraphType, GraphTypeBuilder, NodeType, Resolution,
    ScalarKind, SchemaError, SchemaResult,
};

pub use constraint::{
    Constraint, ConstraintSpecification, GraphContext, GraphValidator, RelationshipCounter, Violation, Violations,
};

pub use catalog::{Catalog, CatalogError, CatalogPath, CatalogResult, Directory, GqlSchema};

pub use session::{
    ConfigError, LanguageLevel, LexCompatibility, ProfileConfiguration, Session, SessionConfiguration, SessionError,
    SessionResult,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
