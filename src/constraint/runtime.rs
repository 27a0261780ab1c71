//! Runtime constraints
//!
//! A [`Constraint`] binds a specification to one graph. Instances are
//! created lazily, once per (constraint, graph) pair, and never change
//! afterwards, so they are shared behind `Arc`.

use super::spec::{ConstraintId, ConstraintKind, ConstraintSpecification};
use crate::graph::{EdgeId, ElementData, ElementRef, GraphId, NodeId};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Graph-wide relationship counts, supplied by the storage layer
pub trait RelationshipCounter {
    fn count_relationships(&self, relationship_type: &str, endpoint_id: NodeId) -> u64;
}

impl<T: RelationshipCounter + ?Sized> RelationshipCounter for &T {
    fn count_relationships(&self, relationship_type: &str, endpoint_id: NodeId) -> u64 {
        (**self).count_relationships(relationship_type, endpoint_id)
    }
}

/// Read access to a graph instance
pub trait GraphContext: RelationshipCounter {
    fn graph_id(&self) -> GraphId;

    fn read_element(&self, id: ElementRef) -> Option<ElementData>;

    fn node_ids(&self) -> Vec<NodeId>;

    fn edge_ids(&self) -> Vec<EdgeId>;
}

/// Lifecycle of a declared constraint with respect to one graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintState {
    /// Attached to the graph type, no runtime instance for this graph yet
    Declared,
    /// A runtime instance exists for this graph
    Bound,
}

/// A constraint specification bound to one graph
#[derive(Debug)]
pub struct Constraint {
    id: ConstraintId,
    spec: Arc<ConstraintSpecification>,
    graph_id: GraphId,
}

impl Constraint {
    pub fn id(&self) -> ConstraintId {
        self.id
    }

    pub fn specification(&self) -> &ConstraintSpecification {
        &self.spec
    }

    pub fn graph_id(&self) -> GraphId {
        self.graph_id
    }

    /// Check one element. Key constraints only look at the element data;
    /// cardinality constraints count relationships of the element, which must
    /// be a stored node.
    pub fn validate(&self, element: &ElementData, counter: &dyn RelationshipCounter) -> bool {
        match self.spec.kind() {
            ConstraintKind::Key(key) => key.validate(element),
            ConstraintKind::Cardinality(card) => match element.id.and_then(|id| id.as_node()) {
                Some(node) => card.admits(counter.count_relationships(card.relationship_type(), node)),
                None => false,
            },
        }
    }

    /// Human-readable diagnostic for `element`
    pub fn explain(&self, element: &ElementData, counter: &dyn RelationshipCounter) -> String {
        let target = self.spec.target_label();
        match self.spec.kind() {
            ConstraintKind::Key(key) => {
                let missing = key.missing_attributes(element);
                if missing.is_empty() {
                    format!("Key constraint on {} satisfied", target)
                } else {
                    format!("Key constraint violation on {}: missing key attributes: {:?}", target, missing)
                }
            }
            ConstraintKind::Cardinality(card) => match element.id.and_then(|id| id.as_node()) {
                Some(node) => {
                    let count = counter.count_relationships(card.relationship_type(), node);
                    if card.admits(count) {
                        format!(
                            "Cardinality constraint on {} satisfied: {} has {} relationship(s) within {}",
                            card.relationship_type(),
                            node,
                            count,
                            card.bounds()
                        )
                    } else {
                        format!(
                            "Cardinality constraint violation on {}: {} has {} relationship(s), expected {}",
                            card.relationship_type(),
                            node,
                            count,
                            card.bounds()
                        )
                    }
                }
                None => format!(
                    "Cardinality constraint violation on {}: element is not a stored node",
                    card.relationship_type()
                ),
            },
        }
    }
}

/// Cache of bound constraints keyed by (constraint, graph)
#[derive(Debug, Default)]
pub struct ConstraintBindings {
    bound: RwLock<HashMap<(ConstraintId, GraphId), Arc<Constraint>>>,
}

impl ConstraintBindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runtime instance for `(id, graph_id)`, created on first use
    pub fn bind(&self, id: ConstraintId, spec: &Arc<ConstraintSpecification>, graph_id: GraphId) -> Arc<Constraint> {
        let key = (id, graph_id);
        if let Some(bound) = self.bound.read().unwrap_or_else(PoisonError::into_inner).get(&key) {
            return Arc::clone(bound);
        }

        let mut bound = self.bound.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(bound.entry(key).or_insert_with(|| {
            debug!("Binding {} ({}) to {}", id, spec, graph_id);
            Arc::new(Constraint {
                id,
                spec: Arc::clone(spec),
                graph_id,
            })
        }))
    }

    /// Drop every instance bound to `graph_id`, returning how many were held
    pub fn release(&self, graph_id: GraphId) -> usize {
        let mut bound = self.bound.write().unwrap_or_else(PoisonError::into_inner);
        let before = bound.len();
        bound.retain(|(_, g), _| *g != graph_id);
        let released = before - bound.len();
        if released > 0 {
            debug!("Released {} constraint binding(s) for {}", released, graph_id);
        }
        released
    }

    pub fn state(&self, id: ConstraintId, graph_id: GraphId) -> ConstraintState {
        let bound = self.bound.read().unwrap_or_else(PoisonError::into_inner);
        if bound.contains_key(&(id, graph_id)) {
            ConstraintState::Bound
        } else {
            ConstraintState::Declared
        }
    }

    pub fn len(&self) -> usize {
        self.bound.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{property_map, PropertyMap};

    struct FixedCount(u64);

    impl RelationshipCounter for FixedCount {
        fn count_relationships(&self, _relationship_type: &str, _endpoint_id: NodeId) -> u64 {
            self.0
        }
    }

    fn key_spec(attrs: &[&str]) -> Arc<ConstraintSpecification> {
        Arc::new(ConstraintSpecification::key("Person", attrs.iter().copied()))
    }

    #[test]
    fn test_bind_once_per_graph() {
        let bindings = ConstraintBindings::new();
        let spec = key_spec(&["Person"]);
        let g1 = GraphId::from_u128(1);
        let g2 = GraphId::from_u128(2);

        assert_eq!(bindings.state(ConstraintId(0), g1), ConstraintState::Declared);
        let a = bindings.bind(ConstraintId(0), &spec, g1);
        let b = bindings.bind(ConstraintId(0), &spec, g1);
        let c = bindings.bind(ConstraintId(0), &spec, g2);

        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(bindings.len(), 2);
        assert_eq!(bindings.state(ConstraintId(0), g1), ConstraintState::Bound);
        assert_eq!(c.graph_id(), g2);
    }

    #[test]
    fn test_release_forgets_one_graph() {
        let bindings = ConstraintBindings::new();
        let spec = key_spec(&["Person"]);
        let g1 = GraphId::from_u128(1);
        let g2 = GraphId::from_u128(2);
        let before = bindings.bind(ConstraintId(0), &spec, g1);
        bindings.bind(ConstraintId(1), &spec, g1);
        bindings.bind(ConstraintId(0), &spec, g2);

        assert_eq!(bindings.release(g1), 2);
        assert_eq!(bindings.release(g1), 0);
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings.state(ConstraintId(0), g1), ConstraintState::Declared);
        assert_eq!(bindings.state(ConstraintId(0), g2), ConstraintState::Bound);

        // Rebinding after release yields a fresh instance.
        let after = bindings.bind(ConstraintId(0), &spec, g1);
        assert!(!Arc::ptr_eq(&before, &after));
    }

    #[test]
    fn test_key_validate_and_explain() {
        let bindings = ConstraintBindings::new();
        let graph = GraphId::from_u128(1);
        let element = ElementData::new(["Person"], property_map([("age", 30i64)]));

        let by_label = bindings.bind(ConstraintId(0), &key_spec(&["Person"]), graph);
        assert!(by_label.validate(&element, &FixedCount(0)));
        assert!(by_label.validate(&element, &FixedCount(0)));

        let by_name = bindings.bind(ConstraintId(1), &key_spec(&["name"]), graph);
        assert!(!by_name.validate(&element, &FixedCount(0)));
        let message = by_name.explain(&element, &FixedCount(0));
        assert!(message.contains("missing key attributes: [\"name\"]"), "{}", message);
    }

    #[test]
    fn test_cardinality_uses_counter() {
        let bindings = ConstraintBindings::new();
        let spec = Arc::new(ConstraintSpecification::cardinality("WORKS_FOR", 1, Some(1)).unwrap());
        let constraint = bindings.bind(ConstraintId(0), &spec, GraphId::from_u128(1));

        let stored = ElementData::new(["Person"], PropertyMap::new()).with_id(NodeId::new(0));
        assert!(constraint.validate(&stored, &FixedCount(1)));
        assert!(!constraint.validate(&stored, &FixedCount(0)));
        assert!(!constraint.validate(&stored, &FixedCount(2)));
        assert!(constraint
            .explain(&stored, &FixedCount(2))
            .contains("has 2 relationship(s), expected [1, 1]"));

        let detached = ElementData::new(["Person"], PropertyMap::new());
        assert!(!constraint.validate(&detached, &FixedCount(1)));
        assert!(constraint.explain(&detached, &FixedCount(1)).contains("not a stored node"));
    }
}
