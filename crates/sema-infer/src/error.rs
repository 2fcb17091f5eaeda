use crate::types::Type;
use crate::var::TypeVar;
use sema_common::{Category, Diagnostic, Level, Span};

#[derive(Debug, Clone)]
pub enum InferError {
    UnificationFailure { left: Type, right: Type, span: Span },
    InfiniteType { var: TypeVar, ty: Type, span: Span },
    BoundViolation { ty: Type, trait_name: String, span: Span },
    AmbiguousType { ty: Type, span: Span },
    MissingConstraint { ty: Type, span: Span },
}

impl InferError {
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            InferError::UnificationFailure { left, right, span } => Diagnostic::new(
                Level::Error,
                Category::Type,
                "E1601",
                "type mismatch",
                format!("expected `{left:?}`, found `{right:?}`"),
                span.clone(),
            ),
            InferError::InfiniteType { ty, span, .. } => Diagnostic::new(
                Level::Error,
                Category::Type,
                "E1602",
                "infinite type",
                format!("type `{ty:?}` would need to contain itself"),
                span.clone(),
            ),
            InferError::BoundViolation { ty, trait_name, span } => Diagnostic::new(
                Level::Error,
                Category::Type,
                "E1603",
                "unsatisfied bound",
                format!("`{ty:?}` does not implement `{trait_name}`"),
                span.clone(),
            ),
            InferError::AmbiguousType { ty, span } => Diagnostic::new(
                Level::Error,
                Category::Type,
                "E1604",
                "ambiguous type",
                format!("could not infer a concrete type, found `{ty:?}`"),
                span.clone(),
            ),
            InferError::MissingConstraint { ty, span } => Diagnostic::new(
                Level::Error,
                Category::Type,
                "E1605",
                "missing constraint",
                format!("not enough information to satisfy the bound on `{ty:?}`"),
                span.clone(),
            ),
        }
    }
}
