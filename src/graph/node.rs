//! Node implementation for property graph storage

use super::element::ElementData;
use super::property::{PropertyMap, PropertyValue};
use super::types::{Label, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A stored node
///
/// Nodes can have multiple labels and any number of properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Identifier assigned by the store at insertion
    pub id: NodeId,

    /// Set of labels for this node
    pub labels: BTreeSet<Label>,

    /// Properties associated with this node
    pub properties: PropertyMap,
}

impl Node {
    /// Create a new node with labels and properties
    pub fn new(id: NodeId, labels: Vec<Label>, properties: PropertyMap) -> Self {
        Node {
            id,
            labels: labels.into_iter().collect(),
            properties,
        }
    }

    /// Check if node has a specific label
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Snapshot of the node as element data
    pub fn element_data(&self) -> ElementData {
        ElementData {
            id: Some(self.id.into()),
            labels: self.labels.clone(),
            properties: self.properties.clone(),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
