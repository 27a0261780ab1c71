//! Edge implementation for property graph storage

use super::element::ElementData;
use super::property::{PropertyMap, PropertyValue};
use super::types::{EdgeId, Label, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A stored edge
///
/// `source` and `target` record the order the endpoints were given at
/// insertion. Whether that order means anything is decided by the edge type
/// the edge conforms to, not by storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Identifier assigned by the store at insertion
    pub id: EdgeId,

    /// First endpoint as inserted
    pub source: NodeId,

    /// Second endpoint as inserted
    pub target: NodeId,

    /// Labels naming the relationship type (e.g., "WORKS_FOR")
    pub labels: BTreeSet<Label>,

    /// Properties associated with this edge
    pub properties: PropertyMap,
}

impl Edge {
    pub fn new(
        id: EdgeId,
        source: NodeId,
        target: NodeId,
        labels: Vec<Label>,
        properties: PropertyMap,
    ) -> Self {
        Edge {
            id,
            source,
            target,
            labels: labels.into_iter().collect(),
            properties,
        }
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Check if `node` is either endpoint of this edge
    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }

    /// Snapshot of the edge as element data
    pub fn element_data(&self) -> ElementData {
        ElementData {
            id: Some(self.id.into()),
            labels: self.labels.clone(),
            properties: self.properties.clone(),
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::property::property_map;

    #[test]
    fn test_create_edge() {
        let edge = Edge::new(
            EdgeId::new(1),
            NodeId::new(1),
            NodeId::new(2),
            vec![Label::new("WORKS_FOR")],
            property_map([("position", "Engineer")]),
        );

        assert_eq!(edge.source, NodeId::new(1));
        assert_eq!(edge.target, NodeId::new(2));
        assert!(edge.has_label("WORKS_FOR"));
        assert_eq!(
            edge.get_property("position").and_then(|v| v.as_string()),
            Some("Engineer")
        );
    }

    #[test]
    fn test_touches() {
        let edge = Edge::new(EdgeId::new(1), NodeId::new(1), NodeId::new(2), vec![], PropertyMap::new());
        assert!(edge.touches(NodeId::new(1)));
        assert!(edge.touches(NodeId::new(2)));
        assert!(!edge.touches(NodeId::new(3)));

        let self_loop = Edge::new(EdgeId::new(2), NodeId::new(4), NodeId::new(4), vec![], PropertyMap::new());
        assert!(self_loop.touches(NodeId::new(4)));
    }
}
