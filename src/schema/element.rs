//! Element types: node types and edge types
//!
//! Both kinds share [`ElementTypeCommon`] (id, name, identifying content
//! type). [`ElementType`] is the closed union over the two kinds.

use super::content::ContentRecordType;
use super::error::{SchemaError, SchemaResult};
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Schema-level identity of an element type, assigned once at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ElementId({})", self.0)
    }
}

/// Hands out element ids in increasing order, never reusing one
#[derive(Debug, Default)]
pub struct ElementIdAllocator {
    next: u64,
}

impl ElementIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continue numbering after ids that are already taken
    pub fn starting_at(next: u64) -> Self {
        ElementIdAllocator { next }
    }

    pub fn allocate(&mut self) -> ElementId {
        let id = ElementId(self.next);
        self.next += 1;
        id
    }
}

/// Fields shared by node types and edge types
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementTypeCommon {
    element_id: ElementId,
    name: String,
    identifying_content_type: ContentRecordType,
}

impl ElementTypeCommon {
    fn new(
        ids: &mut ElementIdAllocator,
        name: impl Into<String>,
        identifying_content_type: ContentRecordType,
    ) -> Self {
        ElementTypeCommon {
            element_id: ids.allocate(),
            name: name.into(),
            identifying_content_type,
        }
    }

    pub fn element_id(&self) -> ElementId {
        self.element_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn identifying_content_type(&self) -> &ContentRecordType {
        &self.identifying_content_type
    }
}

/// A node type wraps exactly one content record type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeType {
    common: ElementTypeCommon,
}

impl NodeType {
    /// Node type named after its content type. Fails with
    /// [`SchemaError::AnonymousType`] when no name can be derived.
    pub fn new(ids: &mut ElementIdAllocator, content: ContentRecordType) -> SchemaResult<Self> {
        let name = content.derived_name()?.to_string();
        Ok(Self::named(ids, name, content))
    }

    /// Node type with an explicit name
    pub fn named(ids: &mut ElementIdAllocator, name: impl Into<String>, content: ContentRecordType) -> Self {
        NodeType {
            common: ElementTypeCommon::new(ids, name, content),
        }
    }

    pub fn common(&self) -> &ElementTypeCommon {
        &self.common
    }

    pub fn element_id(&self) -> ElementId {
        self.common.element_id
    }

    pub fn name(&self) -> &str {
        &self.common.name
    }

    pub fn identifying_content_type(&self) -> &ContentRecordType {
        &self.common.identifying_content_type
    }
}

impl Hash for NodeType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.common.element_id.hash(state);
    }
}

/// One of the two endpoint slots of an edge type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EndpointRef {
    First,
    Second,
}

impl EndpointRef {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointRef::First => "first",
            EndpointRef::Second => "second",
        }
    }
}

impl FromStr for EndpointRef {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(EndpointRef::First),
            "second" => Ok(EndpointRef::Second),
            other => Err(SchemaError::InvalidDirectionReference(other.to_string())),
        }
    }
}

impl fmt::Display for EndpointRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered (tail, head) pair of endpoint slots
///
/// The two references may be equal; they only have to name valid slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EdgeDirection {
    tail: EndpointRef,
    head: EndpointRef,
}

impl EdgeDirection {
    /// Parse a direction from slot tags ("first" / "second")
    pub fn new(tail: &str, head: &str) -> SchemaResult<Self> {
        Ok(EdgeDirection {
            tail: tail.parse()?,
            head: head.parse()?,
        })
    }

    pub fn from_refs(tail: EndpointRef, head: EndpointRef) -> Self {
        EdgeDirection { tail, head }
    }

    pub fn first_to_second() -> Self {
        Self::from_refs(EndpointRef::First, EndpointRef::Second)
    }

    pub fn second_to_first() -> Self {
        Self::from_refs(EndpointRef::Second, EndpointRef::First)
    }

    pub fn tail_reference(&self) -> EndpointRef {
        self.tail
    }

    pub fn head_reference(&self) -> EndpointRef {
        self.head
    }
}

/// An edge type: two endpoint node types, an arc content type and an
/// optional direction. No direction means undirected.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeType {
    common: ElementTypeCommon,
    first_endpoint_type: NodeType,
    second_endpoint_type: NodeType,
    direction: Option<EdgeDirection>,
}

impl EdgeType {
    /// Edge type named after its arc content type
    pub fn new(
        ids: &mut ElementIdAllocator,
        first: NodeType,
        second: NodeType,
        arc_content: ContentRecordType,
        direction: Option<EdgeDirection>,
    ) -> SchemaResult<Self> {
        let name = arc_content.derived_name()?.to_string();
        Ok(Self::named(ids, name, first, second, arc_content, direction))
    }

    /// Edge type with an explicit name
    pub fn named(
        ids: &mut ElementIdAllocator,
        name: impl Into<String>,
        first: NodeType,
        second: NodeType,
        arc_content: ContentRecordType,
        direction: Option<EdgeDirection>,
    ) -> Self {
        EdgeType {
            common: ElementTypeCommon::new(ids, name, arc_content),
            first_endpoint_type: first,
            second_endpoint_type: second,
            direction,
        }
    }

    pub fn common(&self) -> &ElementTypeCommon {
        &self.common
    }

    pub fn element_id(&self) -> ElementId {
        self.common.element_id
    }

    pub fn name(&self) -> &str {
        &self.common.name
    }

    /// The arc content type
    pub fn identifying_content_type(&self) -> &ContentRecordType {
        &self.common.identifying_content_type
    }

    pub fn direction(&self) -> Option<EdgeDirection> {
        self.direction
    }

    pub fn is_directed(&self) -> bool {
        self.direction.is_some()
    }

    pub fn first_endpoint_type(&self) -> &NodeType {
        &self.first_endpoint_type
    }

    pub fn second_endpoint_type(&self) -> &NodeType {
        &self.second_endpoint_type
    }

    pub fn endpoint(&self, slot: EndpointRef) -> &NodeType {
        match slot {
            EndpointRef::First => &self.first_endpoint_type,
            EndpointRef::Second => &self.second_endpoint_type,
        }
    }

    /// Endpoint bound by the tail reference; `None` for undirected edges
    pub fn tail_endpoint_type(&self) -> Option<&NodeType> {
        self.direction.map(|d| self.endpoint(d.tail))
    }

    /// Endpoint bound by the head reference; `None` for undirected edges
    pub fn head_endpoint_type(&self) -> Option<&NodeType> {
        self.direction.map(|d| self.endpoint(d.head))
    }

    /// Tail for directed edges, first endpoint otherwise
    pub fn source_type(&self) -> &NodeType {
        self.tail_endpoint_type().unwrap_or(&self.first_endpoint_type)
    }

    /// Head for directed edges, second endpoint otherwise
    pub fn target_type(&self) -> &NodeType {
        self.head_endpoint_type().unwrap_or(&self.second_endpoint_type)
    }

    /// Both endpoint node types, first then second
    pub fn endpoints(&self) -> [&NodeType; 2] {
        [&self.first_endpoint_type, &self.second_endpoint_type]
    }
}

impl Hash for EdgeType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.common.element_id.hash(state);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementKind {
    Node,
    Edge,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Node => f.write_str("node"),
            ElementKind::Edge => f.write_str("edge"),
        }
    }
}

/// Either kind of element type
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ElementType {
    Node(NodeType),
    Edge(EdgeType),
}

impl ElementType {
    pub fn common(&self) -> &ElementTypeCommon {
        match self {
            ElementType::Node(n) => n.common(),
            ElementType::Edge(e) => e.common(),
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            ElementType::Node(_) => ElementKind::Node,
            ElementType::Edge(_) => ElementKind::Edge,
        }
    }

    pub fn element_id(&self) -> ElementId {
        self.common().element_id()
    }

    pub fn name(&self) -> &str {
        self.common().name()
    }

    pub fn identifying_content_type(&self) -> &ContentRecordType {
        self.common().identifying_content_type()
    }

    pub fn as_node(&self) -> Option<&NodeType> {
        match self {
            ElementType::Node(n) => Some(n),
            ElementType::Edge(_) => None,
        }
    }

    pub fn as_edge(&self) -> Option<&EdgeType> {
        match self {
            ElementType::Edge(e) => Some(e),
            ElementType::Node(_) => None,
        }
    }
}

impl From<NodeType> for ElementType {
    fn from(n: NodeType) -> Self {
        ElementType::Node(n)
    }
}

impl From<EdgeType> for ElementType {
    fn from(e: EdgeType) -> Self {
        ElementType::Edge(e)
    }
}
