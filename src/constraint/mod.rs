//! Constraint specifications, runtime constraints and graph validation

pub mod runtime;
pub mod spec;
pub mod validator;
pub mod violation;

pub use runtime::{Constraint, ConstraintBindings, ConstraintState, GraphContext, RelationshipCounter};
pub use spec::{CardinalitySpec, ConstraintId, ConstraintKind, ConstraintSpecification, KeySpec};
pub use validator::GraphValidator;
pub use violation::{Violation, ViolationKind, ViolationSeverity, Violations};
