//! Schema construction, invariant and conformance errors

use thiserror::Error;

/// Errors raised while authoring or resolving against a schema
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A label or property name was declared twice in one content record type
    #[error("Duplicate attribute: {0}")]
    DuplicateAttribute(String),

    /// A type identifier referenced an attribute that was never declared
    #[error("Unknown attribute in type identifier: {0}")]
    UnknownAttribute(String),

    /// An edge direction tag was not "first" or "second"
    #[error("Invalid direction reference '{0}': must be 'first' or 'second'")]
    InvalidDirectionReference(String),

    /// A name was required but the content type has no type identifier
    #[error("Anonymous content type: no name can be derived from an empty type identifier")]
    AnonymousType,

    /// ALL ELEMENT TYPES KEYED is set and an element type has no covering key constraint
    #[error("Element type {0} has no key constraint but the graph type requires all element types keyed")]
    UnkeyedElementType(String),

    /// Two element types of the same kind would key-match the same instance
    #[error("Type key of {element_type} is not exclusive: it also matches {other}")]
    NonExclusiveTypeKey { element_type: String, other: String },

    /// More than one declared type key-matched the instance labels
    #[error("Ambiguous conformance: instance key-matches {}", .0.join(", "))]
    AmbiguousConformance(Vec<String>),

    /// An edge type references a node type not declared in the graph type
    #[error("Edge type {edge_type} references undeclared node type {node_type}")]
    UnknownEndpointType { edge_type: String, node_type: String },

    /// An element type name was declared twice for the same kind
    #[error("Duplicate element type: {0}")]
    DuplicateElementType(String),

    /// Cardinality bounds with min above max
    #[error("Invalid cardinality for {relationship_type}: min {min} exceeds max {max}")]
    InvalidCardinality { relationship_type: String, min: u64, max: u64 },
}

pub type SchemaResult<T> = Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            SchemaError::InvalidDirectionReference("up".into()).to_string(),
            "Invalid direction reference 'up': must be 'first' or 'second'"
        );
        assert_eq!(
            SchemaError::AmbiguousConformance(vec!["Person".into(), "Employee".into()]).to_string(),
            "Ambiguous conformance: instance key-matches Person, Employee"
        );
    }
}
