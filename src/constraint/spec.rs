//! Constraint specifications
//!
//! A specification is the schema-level half of a constraint. It is declared
//! on a graph type and can be bound to any number of graphs.

use crate::graph::ElementData;
use crate::schema::{ElementType, SchemaError, SchemaResult};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Identity of a constraint declared on a graph type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ConstraintId(pub u32);

impl fmt::Display for ConstraintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConstraintId({})", self.0)
    }
}

/// Key constraint: every key attribute must be present on the element,
/// as a label or as a non-null property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeySpec {
    key_attributes: Vec<String>,
}

impl KeySpec {
    pub fn new<I, S>(key_attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        KeySpec {
            key_attributes: key_attributes.into_iter().map(Into::into).collect(),
        }
    }

    /// Key attributes in declaration order
    pub fn key_attributes(&self) -> &[String] {
        &self.key_attributes
    }

    pub fn validate(&self, element: &ElementData) -> bool {
        self.key_attributes.iter().all(|k| element.has_attribute(k))
    }

    /// Missing key attributes, in declaration order
    pub fn missing_attributes<'s>(&'s self, element: &ElementData) -> Vec<&'s str> {
        self.key_attributes
            .iter()
            .filter(|k| !element.has_attribute(k))
            .map(String::as_str)
            .collect()
    }
}

/// Cardinality constraint: relationships of one type per endpoint node,
/// bounded by `[min, max]` (`max = None` is unbounded)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardinalitySpec {
    relationship_type: String,
    min_cardinality: u64,
    max_cardinality: Option<u64>,
}

impl CardinalitySpec {
    pub fn new(relationship_type: impl Into<String>, min: u64, max: Option<u64>) -> SchemaResult<Self> {
        let relationship_type = relationship_type.into();
        if let Some(max) = max {
            if min > max {
                return Err(SchemaError::InvalidCardinality {
                    relationship_type,
                    min,
                    max,
                });
            }
        }
        Ok(CardinalitySpec {
            relationship_type,
            min_cardinality: min,
            max_cardinality: max,
        })
    }

    pub fn relationship_type(&self) -> &str {
        &self.relationship_type
    }

    pub fn min_cardinality(&self) -> u64 {
        self.min_cardinality
    }

    pub fn max_cardinality(&self) -> Option<u64> {
        self.max_cardinality
    }

    pub fn admits(&self, count: u64) -> bool {
        count >= self.min_cardinality && self.max_cardinality.map_or(true, |max| count <= max)
    }

    /// Bounds rendered as `[min, max]` or `[min, *]`
    pub fn bounds(&self) -> String {
        match self.max_cardinality {
            Some(max) => format!("[{}, {}]", self.min_cardinality, max),
            None => format!("[{}, *]", self.min_cardinality),
        }
    }
}

/// Closed set of constraint kinds
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ConstraintKind {
    Key(KeySpec),
    Cardinality(CardinalitySpec),
}

/// A constraint as declared on a graph type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConstraintSpecification {
    kind: ConstraintKind,
    target_elements: BTreeSet<String>,
}

impl ConstraintSpecification {
    /// Key constraint on the element type named `element_type`
    pub fn key<I, S>(element_type: impl Into<String>, key_attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::key_for([element_type.into()], key_attributes)
    }

    /// Key constraint whose target is a full type identifier
    pub fn key_for<T, I, S>(targets: T, key_attributes: I) -> Self
    where
        T: IntoIterator<Item = String>,
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ConstraintSpecification {
            kind: ConstraintKind::Key(KeySpec::new(key_attributes)),
            target_elements: targets.into_iter().collect(),
        }
    }

    /// Cardinality constraint on a relationship type
    pub fn cardinality(relationship_type: impl Into<String>, min: u64, max: Option<u64>) -> SchemaResult<Self> {
        let spec = CardinalitySpec::new(relationship_type, min, max)?;
        let target_elements = BTreeSet::from([spec.relationship_type.clone()]);
        Ok(ConstraintSpecification {
            kind: ConstraintKind::Cardinality(spec),
            target_elements,
        })
    }

    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    pub fn target_elements(&self) -> &BTreeSet<String> {
        &self.target_elements
    }

    pub fn is_key(&self) -> bool {
        matches!(self.kind, ConstraintKind::Key(_))
    }

    /// Target rendered for diagnostics: `Person` or `{Employee, Person}`
    pub fn target_label(&self) -> String {
        if self.target_elements.len() == 1 {
            self.target_elements.iter().cloned().collect()
        } else {
            let names: Vec<&str> = self.target_elements.iter().map(String::as_str).collect();
            format!("{{{}}}", names.join(", "))
        }
    }

    /// True if this is a key constraint keying `element_type`
    ///
    /// The element type's identifier must be non-empty, and the target must
    /// equal either that identifier or the element type's name.
    pub fn keys(&self, element_type: &ElementType) -> bool {
        if !self.is_key() {
            return false;
        }
        let identifier = element_type.identifying_content_type().type_identifier();
        if identifier.is_empty() {
            return false;
        }
        self.target_elements == *identifier
            || (self.target_elements.len() == 1 && self.target_elements.contains(element_type.name()))
    }

    /// True if this constraint names `element_type` as its target
    pub fn targets(&self, element_type: &ElementType) -> bool {
        self.target_elements.contains(element_type.name())
            || self.target_elements == *element_type.identifying_content_type().type_identifier()
    }
}

impl fmt::Display for ConstraintSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ConstraintKind::Key(k) => {
                write!(f, "KEY {} ({})", self.target_label(), k.key_attributes.join(", "))
            }
            ConstraintKind::Cardinality(c) => {
                write!(f, "CARDINALITY {} {}", c.relationship_type, c.bounds())
            }
        }
    }
}
