use sema_common::{Category, Diagnostic, Level, Span};
use sema_hir::TypeExpr;

#[derive(Debug, Clone)]
pub enum ConstraintError {
    /// A where-clause requires a trait that no loaded module declares.
    UnsatisfiedBound {
        type_param: String,
        trait_name: String,
        span: Span,
    },
    /// A where-clause's constraint stack revisited a `(type_param,
    /// trait_name)` pair already being validated.
    CyclicConstraint {
        type_param: String,
        trait_name: String,
        span: Span,
    },
    /// Two equality bounds on the same type parameter disagreed; the one
    /// with the lexicographically-first span wins and this records the
    /// loser.
    ConstraintConflict {
        type_param: String,
        first: TypeExpr,
        second: TypeExpr,
        span: Span,
    },
}

impl ConstraintError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ConstraintError::UnsatisfiedBound { type_param, trait_name, span } => Diagnostic::new(
                Level::Error,
                Category::Semantic,
                "E1501",
                "unsatisfied trait bound",
                format!("`{type_param}: {trait_name}` is required but no implementation satisfies it"),
                span.clone(),
            ),
            ConstraintError::CyclicConstraint { type_param, trait_name, span } => Diagnostic::new(
                Level::Error,
                Category::Semantic,
                "E1502",
                "cyclic constraint",
                format!("constraint `{type_param}: {trait_name}` depends on itself"),
                span.clone(),
            ),
            ConstraintError::ConstraintConflict { type_param, first, second, span } => Diagnostic::new(
                Level::Error,
                Category::Semantic,
                "E1503",
                "conflicting equality constraints",
                format!("`{type_param}` is constrained to both `{first:?}` and `{second:?}`"),
                span.clone(),
            ),
        }
    }
}
