//! Assigns a type to every HIR expression: introduces unification
//! variables for unknowns, unifies structurally, and solves the resulting
//! constraint set to a fixed point.

pub mod constraint;
pub mod context;
pub mod engine;
pub mod error;
pub mod rules;
pub mod types;
pub mod var;

pub use constraint::{solve, Constraint};
pub use context::{ContextStack, InferenceContext};
pub use engine::InferenceEngine;
pub use error::InferError;
pub use types::{from_type_expr, to_type_expr, Type};
pub use var::{TypeVar, VarKind};

#[cfg(test)]
#[path = "tests/engine_tests.rs"]
mod tests;
