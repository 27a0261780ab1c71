//! Validation of graph data against a graph type
//!
//! Per-element failures never abort a run: every finding is collected into
//! [`Violations`] and validation moves on to the next element.

use super::runtime::GraphContext;
use super::spec::ConstraintId;
use super::violation::{Violation, ViolationKind, Violations};
use crate::graph::{ElementData, ElementRef};
use crate::schema::{ElementKind, ElementType, GraphType, SchemaError};
use std::collections::BTreeSet;
use tracing::debug;

/// Validates elements of graphs conforming to one graph type
pub struct GraphValidator<'s> {
    graph_type: &'s GraphType,
}

impl<'s> GraphValidator<'s> {
    pub fn new(graph_type: &'s GraphType) -> Self {
        GraphValidator { graph_type }
    }

    /// Validate a single stored element
    pub fn validate_element(&self, graph: &dyn GraphContext, id: ElementRef) -> Violations {
        let mut violations = Violations::new();
        match graph.read_element(id) {
            Some(data) => self.check(graph, id, &data, &mut violations),
            None => violations.push(Violation::error(
                ViolationKind::ElementNotFound,
                id,
                format!("{} not found in graph {}", id, graph.graph_id()),
            )),
        }
        violations
    }

    /// Validate every node and edge of the graph
    pub fn validate_graph(&self, graph: &dyn GraphContext) -> Violations {
        let mut violations = Violations::new();
        let ids = graph
            .node_ids()
            .into_iter()
            .map(ElementRef::from)
            .chain(graph.edge_ids().into_iter().map(ElementRef::from));

        let mut checked = 0usize;
        for id in ids {
            violations.extend(self.validate_element(graph, id));
            checked += 1;
        }

        debug!(
            "Validated {} element(s) of graph {} against {}: {} finding(s)",
            checked,
            graph.graph_id(),
            self.graph_type.name(),
            violations.len()
        );
        violations
    }

    fn check(&self, graph: &dyn GraphContext, id: ElementRef, data: &ElementData, out: &mut Violations) {
        let kind = match id {
            ElementRef::Node(_) => ElementKind::Node,
            ElementRef::Edge(_) => ElementKind::Edge,
        };

        let resolution = match self.graph_type.resolve_element(kind, data) {
            Ok(r) => r,
            Err(SchemaError::AmbiguousConformance(names)) => {
                out.push(Violation::error(
                    ViolationKind::AmbiguousConformance,
                    id,
                    format!("{} key-matches several {} types: {}", id, kind, names.join(", ")),
                ));
                return;
            }
            Err(e) => {
                out.push(Violation::error(ViolationKind::NonConforming, id, e.to_string()));
                return;
            }
        };

        let applicable: Vec<&ElementType> = match resolution.unique() {
            Some(t) => vec![t],
            None if resolution.is_conforming() => {
                let names: Vec<&str> = resolution.matches.iter().map(|t| t.name()).collect();
                out.push(Violation::warning(
                    ViolationKind::MultiConformance,
                    id,
                    format!("{} conforms to {} {} types without a key: {}", id, names.len(), kind, names.join(", ")),
                ));
                resolution.matches.clone()
            }
            None => {
                let labels: Vec<&str> = data.label_names().collect();
                out.push(Violation::error(
                    ViolationKind::NonConforming,
                    id,
                    format!("{} with labels {:?} conforms to no declared {} type", id, labels, kind),
                ));
                return;
            }
        };

        // Candidates may share constraints; each one is checked once per element.
        let constraint_ids: BTreeSet<ConstraintId> = applicable
            .into_iter()
            .flat_map(|t| self.graph_type.constraints_for(t))
            .map(|declared| declared.id)
            .collect();

        for constraint_id in constraint_ids {
            let Some(constraint) = self.graph_type.bind(constraint_id, graph.graph_id()) else {
                continue;
            };
            if !constraint.validate(data, &graph) {
                let kind = if constraint.specification().is_key() {
                    ViolationKind::Key
                } else {
                    ViolationKind::Cardinality
                };
                out.push(Violation::error(kind, id, constraint.explain(data, &graph)).with_constraint(constraint_id));
            }
        }
    }
}
