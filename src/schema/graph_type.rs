//! Graph types
//!
//! A graph type owns its node types, edge types and constraint
//! specifications. With ALL ELEMENT TYPES KEYED set, every element type must
//! be covered by a key constraint and type keys must be exclusive within
//! each element kind, so that resolution can never be ambiguous.
//!
//! Mutation is single-writer. Once authoring is done a graph type is only
//! read, and may be shared across validation threads.

use super::content::ContentRecordType;
use super::element::{
    EdgeDirection, EdgeType, ElementId, ElementIdAllocator, ElementKind, ElementType, NodeType,
};
use super::error::{SchemaError, SchemaResult};
use super::resolve::{resolve_type, Resolution};
use crate::constraint::{
    Constraint, ConstraintBindings, ConstraintId, ConstraintKind, ConstraintSpecification, ConstraintState,
};
use crate::graph::{ElementData, GraphId};
use indexmap::IndexMap;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, warn};

/// A constraint specification attached to a graph type
#[derive(Debug, Clone)]
pub struct DeclaredConstraint {
    pub id: ConstraintId,
    pub spec: Arc<ConstraintSpecification>,
}

#[derive(Debug)]
pub struct GraphType {
    name: String,
    element_types: IndexMap<ElementId, ElementType>,
    constraints: Vec<DeclaredConstraint>,
    all_element_types_keyed: bool,
    ids: ElementIdAllocator,
    bindings: ConstraintBindings,
}

impl GraphType {
    pub fn new(name: impl Into<String>, all_element_types_keyed: bool) -> Self {
        let name = name.into();
        info!("Created graph type {} (all element types keyed: {})", name, all_element_types_keyed);
        GraphType {
            name,
            element_types: IndexMap::new(),
            constraints: Vec::new(),
            all_element_types_keyed,
            ids: ElementIdAllocator::new(),
            bindings: ConstraintBindings::new(),
        }
    }

    pub fn builder(name: impl Into<String>, all_element_types_keyed: bool) -> GraphTypeBuilder {
        GraphTypeBuilder::new(name, all_element_types_keyed)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn all_element_types_keyed(&self) -> bool {
        self.all_element_types_keyed
    }

    /// Allocator for element types added to this graph type after construction
    pub fn ids(&mut self) -> &mut ElementIdAllocator {
        &mut self.ids
    }

    pub fn element_types(&self) -> impl Iterator<Item = &ElementType> {
        self.element_types.values()
    }

    pub fn element_type(&self, id: ElementId) -> Option<&ElementType> {
        self.element_types.get(&id)
    }

    pub fn node_types(&self) -> impl Iterator<Item = &NodeType> {
        self.element_types.values().filter_map(ElementType::as_node)
    }

    pub fn edge_types(&self) -> impl Iterator<Item = &EdgeType> {
        self.element_types.values().filter_map(ElementType::as_edge)
    }

    pub fn node_type(&self, name: &str) -> Option<&NodeType> {
        self.node_types().find(|n| n.name() == name)
    }

    pub fn edge_type(&self, name: &str) -> Option<&EdgeType> {
        self.edge_types().find(|e| e.name() == name)
    }

    pub fn constraints(&self) -> &[DeclaredConstraint] {
        &self.constraints
    }

    /// True if any LEX extension (constraints or keyed typing) is in use
    pub fn uses_lex_extensions(&self) -> bool {
        self.all_element_types_keyed || !self.constraints.is_empty()
    }

    /// Declare a node type. Rejected without change if it would violate an invariant.
    pub fn add_node_type(&mut self, node_type: NodeType) -> SchemaResult<()> {
        info!("Declaring node type {} in graph type {}", node_type.name(), self.name);
        self.insert_checked(node_type.into())
    }

    /// Declare an edge type. Both endpoints must already be declared here.
    pub fn add_edge_type(&mut self, edge_type: EdgeType) -> SchemaResult<()> {
        info!("Declaring edge type {} in graph type {}", edge_type.name(), self.name);
        self.insert_checked(edge_type.into())
    }

    /// Attach a constraint specification, then re-check the keyed invariant.
    /// The constraint is kept either way: it can only add coverage.
    pub fn add_constraint(&mut self, spec: ConstraintSpecification) -> ConstraintId {
        let id = ConstraintId(self.constraints.len() as u32);
        info!("Declaring constraint {} ({}) in graph type {}", id, spec, self.name);
        self.constraints.push(DeclaredConstraint {
            id,
            spec: Arc::new(spec),
        });
        if let Err(e) = self.validate_invariants() {
            warn!("Graph type {} still violates its keyed invariant: {}", self.name, e);
        }
        id
    }

    fn insert_checked(&mut self, element_type: ElementType) -> SchemaResult<()> {
        self.check_insertable(&element_type)?;
        let id = element_type.element_id();
        let name = element_type.name().to_string();
        self.element_types.insert(id, element_type);

        if let Err(e) = self.validate_invariants() {
            warn!("Rejected element type {} in graph type {}: {}", name, self.name, e);
            self.element_types.shift_remove(&id);
            return Err(e);
        }
        Ok(())
    }

    /// Structural checks that do not depend on the keyed invariant
    fn check_insertable(&self, element_type: &ElementType) -> SchemaResult<()> {
        let duplicate = self.element_types.contains_key(&element_type.element_id())
            || self
                .element_types
                .values()
                .any(|t| t.kind() == element_type.kind() && t.name() == element_type.name());
        if duplicate {
            return Err(SchemaError::DuplicateElementType(element_type.name().to_string()));
        }

        if let ElementType::Edge(edge) = element_type {
            for endpoint in edge.endpoints() {
                let declared = matches!(
                    self.element_types.get(&endpoint.element_id()),
                    Some(ElementType::Node(n)) if n == endpoint
                );
                if !declared {
                    return Err(SchemaError::UnknownEndpointType {
                        edge_type: edge.name().to_string(),
                        node_type: endpoint.name().to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Check ALL ELEMENT TYPES KEYED. A no-op when the flag is off.
    pub fn validate_invariants(&self) -> SchemaResult<()> {
        if !self.all_element_types_keyed {
            return Ok(());
        }

        for element_type in self.element_types.values() {
            let keyed = self.constraints.iter().any(|c| c.spec.keys(element_type));
            if !keyed {
                return Err(SchemaError::UnkeyedElementType(element_type.name().to_string()));
            }
        }

        for kind in [ElementKind::Node, ElementKind::Edge] {
            let of_kind: Vec<&ElementType> = self.element_types.values().filter(|t| t.kind() == kind).collect();
            for (i, keyed) in of_kind.iter().enumerate() {
                for (j, other) in of_kind.iter().enumerate() {
                    if i != j && key_overlaps(keyed, other) {
                        return Err(SchemaError::NonExclusiveTypeKey {
                            element_type: keyed.name().to_string(),
                            other: other.name().to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Resolve a node instance against the declared node types
    pub fn resolve_node<'a>(&'a self, instance: &ElementData) -> SchemaResult<Resolution<'a, NodeType>> {
        resolve_type(self.node_types(), instance)
    }

    /// Resolve an edge instance against the declared edge types
    pub fn resolve_edge<'a>(&'a self, instance: &ElementData) -> SchemaResult<Resolution<'a, EdgeType>> {
        resolve_type(self.edge_types(), instance)
    }

    /// Resolve against element types of one kind
    pub fn resolve_element<'a>(
        &'a self,
        kind: ElementKind,
        instance: &ElementData,
    ) -> SchemaResult<Resolution<'a, ElementType>> {
        resolve_type(self.element_types.values().filter(|t| t.kind() == kind), instance)
    }

    /// Constraints that apply to instances of `element_type`
    ///
    /// Key constraints apply to the element types they target. Cardinality
    /// constraints apply to node types that are an endpoint of an edge type
    /// the constraint targets.
    pub fn constraints_for(&self, element_type: &ElementType) -> Vec<&DeclaredConstraint> {
        self.constraints
            .iter()
            .filter(|c| match c.spec.kind() {
                ConstraintKind::Key(_) => c.spec.targets(element_type),
                ConstraintKind::Cardinality(_) => match element_type {
                    ElementType::Node(node) => self.element_types.values().any(|t| {
                        matches!(t, ElementType::Edge(edge)
                            if c.spec.targets(t) && edge.endpoints().contains(&node))
                    }),
                    ElementType::Edge(_) => false,
                },
            })
            .collect()
    }

    /// Runtime instance of a declared constraint for one graph
    pub fn bind(&self, id: ConstraintId, graph_id: GraphId) -> Option<Arc<Constraint>> {
        self.constraints
            .get(id.0 as usize)
            .map(|declared| self.bindings.bind(declared.id, &declared.spec, graph_id))
    }

    pub fn constraint_state(&self, id: ConstraintId, graph_id: GraphId) -> ConstraintState {
        self.bindings.state(id, graph_id)
    }

    /// Discard the runtime instances bound to a graph that is going away
    pub fn release_graph(&self, graph_id: GraphId) -> usize {
        self.bindings.release(graph_id)
    }
}

/// True if an instance shaped like `other` could key-match `keyed`
fn key_overlaps(keyed: &ElementType, other: &ElementType) -> bool {
    let keyed_content = keyed.identifying_content_type();
    let other_content = other.identifying_content_type();

    let other_attrs: BTreeSet<&str> = other_content
        .label_names()
        .chain(other_content.property_types().map(|p| p.name.as_str()))
        .collect();

    keyed_content.is_keyed()
        && keyed_content.label_names().all(|l| other_content.has_label(l))
        && keyed_content
            .type_identifier()
            .iter()
            .all(|k| other_attrs.contains(k.as_str()))
}

/// Collects declarations and validates the keyed invariant once, at the end,
/// so that element types and their key constraints may be declared in any order
#[derive(Debug)]
pub struct GraphTypeBuilder {
    name: String,
    all_element_types_keyed: bool,
    ids: ElementIdAllocator,
    element_types: Vec<ElementType>,
    constraints: Vec<ConstraintSpecification>,
}

impl GraphTypeBuilder {
    pub fn new(name: impl Into<String>, all_element_types_keyed: bool) -> Self {
        GraphTypeBuilder {
            name: name.into(),
            all_element_types_keyed,
            ids: ElementIdAllocator::new(),
            element_types: Vec::new(),
            constraints: Vec::new(),
        }
    }

    /// Declare a node type named after its content type
    pub fn node_type(&mut self, content: ContentRecordType) -> SchemaResult<NodeType> {
        let node = NodeType::new(&mut self.ids, content)?;
        self.element_types.push(node.clone().into());
        Ok(node)
    }

    pub fn named_node_type(&mut self, name: impl Into<String>, content: ContentRecordType) -> NodeType {
        let node = NodeType::named(&mut self.ids, name, content);
        self.element_types.push(node.clone().into());
        node
    }

    /// Declare an edge type named after its arc content type
    pub fn edge_type(
        &mut self,
        first: &NodeType,
        second: &NodeType,
        arc_content: ContentRecordType,
        direction: Option<EdgeDirection>,
    ) -> SchemaResult<EdgeType> {
        let edge = EdgeType::new(&mut self.ids, first.clone(), second.clone(), arc_content, direction)?;
        self.element_types.push(edge.clone().into());
        Ok(edge)
    }

    pub fn named_edge_type(
        &mut self,
        name: impl Into<String>,
        first: &NodeType,
        second: &NodeType,
        arc_content: ContentRecordType,
        direction: Option<EdgeDirection>,
    ) -> EdgeType {
        let edge = EdgeType::named(&mut self.ids, name, first.clone(), second.clone(), arc_content, direction);
        self.element_types.push(edge.clone().into());
        edge
    }

    pub fn constraint(&mut self, spec: ConstraintSpecification) -> &mut Self {
        self.constraints.push(spec);
        self
    }

    pub fn build(self) -> SchemaResult<GraphType> {
        let mut graph_type = GraphType::new(self.name, self.all_element_types_keyed);
        graph_type.ids = self.ids;

        for spec in self.constraints {
            graph_type.add_constraint(spec);
        }
        for element_type in self.element_types {
            graph_type.check_insertable(&element_type)?;
            graph_type.element_types.insert(element_type.element_id(), element_type);
        }

        graph_type.validate_invariants()?;
        Ok(graph_type)
    }
}
