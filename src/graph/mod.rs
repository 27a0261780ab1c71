//! Property graph storage
//!
//! This module is the storage collaborator of the schema engine:
//! - Nodes and edges with multiple labels and properties
//! - Monotonic id assignment at insertion
//! - Read access through [`crate::constraint::GraphContext`]

pub mod edge;
pub mod element;
pub mod node;
pub mod property;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use element::ElementData;
pub use node::Node;
pub use property::{property_map, PropertyMap, PropertyValue};
pub use store::{GraphError, GraphResult, GraphStore};
pub use types::{EdgeId, ElementRef, GraphId, Label, NodeId};
