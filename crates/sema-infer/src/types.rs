//! The inference engine's own type representation.
//!
//! Kept distinct from [`sema_hir::TypeExpr`] (the syntactic, as-written
//! annotation) rather than growing a `Var` case onto the HIR's type
//! grammar: the HIR is produced once by the parser collaborator and shared
//! with every later pass, while unification variables are scratch state
//! that only this engine ever creates or mutates.

use crate::var::TypeVar;
use sema_hir::TypeExpr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Var(TypeVar),
    Named { name: String, args: Vec<Type> },
    Generic(String),
    Projection { base: Box<Type>, assoc_name: String },
    Tuple(Vec<Type>),
    Array(Box<Type>),
    Function { params: Vec<Type>, ret: Box<Type> },
    Unit,
}

/// Converts a syntactic type annotation into the inference domain. An
/// `Infer` placeholder becomes a fresh variable via `fresh`, since the two
/// representations disagree on how "unknown" is spelled.
pub fn from_type_expr(expr: &TypeExpr, fresh: &mut impl FnMut() -> TypeVar) -> Type {
    match expr {
        TypeExpr::Named { name, args } => Type::Named {
            name: name.clone(),
            args: args.iter().map(|a| from_type_expr(a, fresh)).collect(),
        },
        TypeExpr::Generic(name) => Type::Generic(name.clone()),
        TypeExpr::Projection { base, assoc_name } => Type::Projection {
            base: Box::new(from_type_expr(base, fresh)),
            assoc_name: assoc_name.clone(),
        },
        TypeExpr::Tuple(xs) => Type::Tuple(xs.iter().map(|x| from_type_expr(x, fresh)).collect()),
        TypeExpr::Array(x) => Type::Array(Box::new(from_type_expr(x, fresh))),
        TypeExpr::Function { params, ret } => Type::Function {
            params: params.iter().map(|p| from_type_expr(p, fresh)).collect(),
            ret: Box::new(from_type_expr(ret, fresh)),
        },
        TypeExpr::Infer => Type::Var(fresh()),
        TypeExpr::Unit => Type::Unit,
    }
}

/// Converts back to the syntactic domain for callers (e.g. the trait
/// resolver) that only understand `TypeExpr`. An unresolved variable has
/// no syntactic spelling, so it becomes `Infer`.
pub fn to_type_expr(ty: &Type) -> TypeExpr {
    match ty {
        Type::Var(_) => TypeExpr::Infer,
        Type::Named { name, args } => TypeExpr::Named {
            name: name.clone(),
            args: args.iter().map(to_type_expr).collect(),
        },
        Type::Generic(name) => TypeExpr::Generic(name.clone()),
        Type::Projection { base, assoc_name } => TypeExpr::Projection {
            base: Box::new(to_type_expr(base)),
            assoc_name: assoc_name.clone(),
        },
        Type::Tuple(xs) => TypeExpr::Tuple(xs.iter().map(to_type_expr).collect()),
        Type::Array(x) => TypeExpr::Array(Box::new(to_type_expr(x))),
        Type::Function { params, ret } => TypeExpr::Function {
            params: params.iter().map(to_type_expr).collect(),
            ret: Box::new(to_type_expr(ret)),
        },
        Type::Unit => TypeExpr::Unit,
    }
}
