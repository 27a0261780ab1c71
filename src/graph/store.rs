//! In-memory graph storage
//!
//! A deliberately simple store: elements are appended, ids are assigned in
//! monotonically increasing order and never reused. The schema engine only
//! reads from it, through [`GraphContext`].

use super::edge::Edge;
use super::element::ElementData;
use super::node::Node;
use super::property::PropertyMap;
use super::types::{EdgeId, ElementRef, GraphId, Label, NodeId};
use crate::constraint::{GraphContext, RelationshipCounter};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during graph operations
#[derive(Error, Debug, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeId),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory graph storage
///
/// - nodes / edges: dense arenas indexed by id
/// - incident: NodeId -> edges touching the node (self-loops listed once)
/// - label_index: Label -> nodes carrying that label
#[derive(Debug)]
pub struct GraphStore {
    id: GraphId,

    /// Graph name inside its catalog schema
    name: String,

    /// Name of the graph type this graph was created for, if any
    graph_type: Option<String>,

    nodes: Vec<Node>,

    edges: Vec<Edge>,

    incident: Vec<Vec<EdgeId>>,

    label_index: HashMap<Label, HashSet<NodeId>>,
}

impl GraphStore {
    /// Create a new empty graph store with a fresh identity
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(GraphId::new(), name)
    }

    /// Create a new empty graph store with a fixed identity
    pub fn with_id(id: GraphId, name: impl Into<String>) -> Self {
        GraphStore {
            id,
            name: name.into(),
            graph_type: None,
            nodes: Vec::new(),
            edges: Vec::new(),
            incident: Vec::new(),
            label_index: HashMap::new(),
        }
    }

    /// Record the graph type this graph conforms to
    pub fn for_graph_type(mut self, graph_type: impl Into<String>) -> Self {
        self.graph_type = Some(graph_type.into());
        self
    }

    pub fn id(&self) -> GraphId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn graph_type_name(&self) -> Option<&str> {
        self.graph_type.as_deref()
    }

    /// Insert a node with labels and properties
    pub fn insert_node<L>(&mut self, labels: impl IntoIterator<Item = L>, properties: PropertyMap) -> NodeId
    where
        L: Into<Label>,
    {
        let id = NodeId::new(self.nodes.len() as u64);
        let node = Node::new(id, labels.into_iter().map(Into::into).collect(), properties);

        for label in &node.labels {
            self.label_index.entry(label.clone()).or_default().insert(id);
        }

        self.nodes.push(node);
        self.incident.push(Vec::new());
        debug!("Inserted node {} into graph {}", id, self.name);
        id
    }

    /// Insert an edge between two existing nodes
    pub fn insert_edge<L>(
        &mut self,
        source: NodeId,
        target: NodeId,
        labels: impl IntoIterator<Item = L>,
        properties: PropertyMap,
    ) -> GraphResult<EdgeId>
    where
        L: Into<Label>,
    {
        if !self.has_node(source) {
            return Err(GraphError::InvalidEdgeSource(source));
        }
        if !self.has_node(target) {
            return Err(GraphError::InvalidEdgeTarget(target));
        }

        let id = EdgeId::new(self.edges.len() as u64);
        let edge = Edge::new(id, source, target, labels.into_iter().map(Into::into).collect(), properties);

        self.incident[source.as_u64() as usize].push(id);
        if source != target {
            self.incident[target.as_u64() as usize].push(id);
        }

        self.edges.push(edge);
        debug!("Inserted edge {} ({} -> {}) into graph {}", id, source, target, self.name);
        Ok(id)
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.as_u64() as usize)
    }

    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.as_u64() as usize)
    }

    pub fn has_node(&self, id: NodeId) -> bool {
        self.get_node(id).is_some()
    }

    /// Edges touching a node, in insertion order
    pub fn incident_edges(&self, node_id: NodeId) -> GraphResult<Vec<&Edge>> {
        let ids = self
            .incident
            .get(node_id.as_u64() as usize)
            .ok_or(GraphError::NodeNotFound(node_id))?;
        Ok(ids.iter().filter_map(|id| self.get_edge(*id)).collect())
    }

    pub fn get_nodes_by_label(&self, label: &Label) -> Vec<&Node> {
        let mut ids: Vec<NodeId> = self
            .label_index
            .get(label)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default();
        ids.sort();
        ids.into_iter().filter_map(|id| self.get_node(id)).collect()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Read an element's labels and properties
    pub fn element_data(&self, id: ElementRef) -> GraphResult<ElementData> {
        match id {
            ElementRef::Node(node_id) => self
                .get_node(node_id)
                .map(Node::element_data)
                .ok_or(GraphError::NodeNotFound(node_id)),
            ElementRef::Edge(edge_id) => self
                .get_edge(edge_id)
                .map(Edge::element_data)
                .ok_or(GraphError::EdgeNotFound(edge_id)),
        }
    }
}

impl RelationshipCounter for GraphStore {
    /// Counts edges labelled `relationship_type` touching the endpoint, in
    /// either direction. A self-loop counts once.
    fn count_relationships(&self, relationship_type: &str, endpoint_id: NodeId) -> u64 {
        self.incident_edges(endpoint_id)
            .map(|edges| edges.iter().filter(|e| e.has_label(relationship_type)).count() as u64)
            .unwrap_or(0)
    }
}

impl GraphContext for GraphStore {
    fn graph_id(&self) -> GraphId {
        self.id
    }

    fn read_element(&self, id: ElementRef) -> Option<ElementData> {
        self.element_data(id).ok()
    }

    fn node_ids(&self) -> Vec<NodeId> {
        self.nodes.iter().map(|n| n.id).collect()
    }

    fn edge_ids(&self) -> Vec<EdgeId> {
        self.edges.iter().map(|e| e.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::property::property_map;

    #[test]
    fn test_ids_are_monotonic() {
        let mut store = GraphStore::new("employee_data");
        let a = store.insert_node(["Person"], PropertyMap::new());
        let b = store.insert_node(["Person"], PropertyMap::new());
        let c = store.insert_node(["Company"], PropertyMap::new());

        assert_eq!(a, NodeId::new(0));
        assert_eq!(b, NodeId::new(1));
        assert_eq!(c, NodeId::new(2));
        assert_eq!(store.node_count(), 3);
        assert_eq!(store.get_nodes_by_label(&Label::new("Person")).len(), 2);
    }

    #[test]
    fn test_insert_edge_requires_endpoints() {
        let mut store = GraphStore::new("g");
        let a = store.insert_node(["Person"], PropertyMap::new());

        assert_eq!(
            store.insert_edge(a, NodeId::new(9), ["KNOWS"], PropertyMap::new()),
            Err(GraphError::InvalidEdgeTarget(NodeId::new(9)))
        );
        assert_eq!(
            store.insert_edge(NodeId::new(9), a, ["KNOWS"], PropertyMap::new()),
            Err(GraphError::InvalidEdgeSource(NodeId::new(9)))
        );
        assert_eq!(store.edge_count(), 0);
    }

    #[test]
    fn test_count_relationships_both_directions() {
        let mut store = GraphStore::new("g");
        let alice = store.insert_node(["Person"], PropertyMap::new());
        let bob = store.insert_node(["Person"], PropertyMap::new());
        let corp = store.insert_node(["Company"], PropertyMap::new());

        store.insert_edge(alice, corp, ["WORKS_FOR"], PropertyMap::new()).unwrap();
        store.insert_edge(bob, corp, ["WORKS_FOR"], PropertyMap::new()).unwrap();
        store.insert_edge(alice, bob, ["KNOWS"], PropertyMap::new()).unwrap();
        store.insert_edge(alice, alice, ["KNOWS"], PropertyMap::new()).unwrap();

        assert_eq!(store.count_relationships("WORKS_FOR", alice), 1);
        assert_eq!(store.count_relationships("WORKS_FOR", corp), 2);
        assert_eq!(store.count_relationships("KNOWS", alice), 2);
        assert_eq!(store.count_relationships("KNOWS", bob), 1);
        assert_eq!(store.count_relationships("KNOWS", NodeId::new(42)), 0);
    }

    #[test]
    fn test_read_element() {
        let mut store = GraphStore::new("g");
        let alice = store.insert_node(["Person"], property_map([("name", "Alice")]));

        let data = store.read_element(alice.into()).unwrap();
        assert_eq!(data.id, Some(ElementRef::Node(alice)));
        assert!(data.has_label("Person"));

        assert!(store.read_element(EdgeId::new(0).into()).is_none());
        assert_eq!(
            store.element_data(NodeId::new(5).into()),
            Err(GraphError::NodeNotFound(NodeId::new(5)))
        );
        assert_eq!(store.node_ids(), vec![alice]);
    }
}
