//! Validation findings

use super::spec::ConstraintId;
use crate::graph::ElementRef;
use std::fmt;

/// Severity of a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationSeverity {
    /// The element does not satisfy the schema
    Error,
    /// The element satisfies the schema but its type could not be pinned down
    Warning,
}

/// What kind of check produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// A key constraint failed
    Key,
    /// A cardinality constraint failed
    Cardinality,
    /// No declared element type admits the element
    NonConforming,
    /// More than one declared element type key-matches the element
    AmbiguousConformance,
    /// Several types admit the element and none is key-matched
    MultiConformance,
    /// The element could not be read from the graph
    ElementNotFound,
}

/// One finding about one element
#[derive(Debug, Clone)]
pub struct Violation {
    pub kind: ViolationKind,
    pub severity: ViolationSeverity,
    pub element: ElementRef,
    /// Set for constraint failures
    pub constraint: Option<ConstraintId>,
    pub message: String,
}

impl Violation {
    pub fn error(kind: ViolationKind, element: ElementRef, message: impl Into<String>) -> Self {
        Violation {
            kind,
            severity: ViolationSeverity::Error,
            element,
            constraint: None,
            message: message.into(),
        }
    }

    pub fn warning(kind: ViolationKind, element: ElementRef, message: impl Into<String>) -> Self {
        Violation {
            kind,
            severity: ViolationSeverity::Warning,
            element,
            constraint: None,
            message: message.into(),
        }
    }

    pub fn with_constraint(mut self, id: ConstraintId) -> Self {
        self.constraint = Some(id);
        self
    }

    pub fn is_error(&self) -> bool {
        matches!(self.severity, ViolationSeverity::Error)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            ViolationSeverity::Error => "error",
            ViolationSeverity::Warning => "warning",
        };
        write!(f, "{} [{}]: {}", level, self.element, self.message)
    }
}

/// Collection of findings from one validation run
#[derive(Debug, Clone, Default)]
pub struct Violations {
    violations: Vec<Violation>,
}

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.violations.push(violation);
    }

    pub fn extend(&mut self, other: Violations) {
        self.violations.extend(other.violations);
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(Violation::is_error)
    }

    pub fn all(&self) -> &[Violation] {
        &self.violations
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_error())
    }

    /// Findings about one element
    pub fn for_element(&self, element: ElementRef) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.element == element)
    }

    pub fn of_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}
