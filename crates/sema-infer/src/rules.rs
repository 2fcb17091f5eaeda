//! Per-expression-kind inference rules; the HIR walker (owned by the
//! orchestrating crate) delegates to these rather than unifying by hand at
//! every call site.

use crate::engine::InferenceEngine;
use crate::error::InferError;
use crate::types::Type;
use crate::var::VarKind;
use sema_common::Span;
use sema_hir::{BinaryOp, Literal};

fn named(name: &str) -> Type {
    Type::Named { name: name.to_string(), args: Vec::new() }
}

pub fn bool_type() -> Type {
    named("Bool")
}
pub fn int_type() -> Type {
    named("Int")
}
pub fn float_type() -> Type {
    named("Float")
}
pub fn str_type() -> Type {
    named("Str")
}

pub fn literal_type(lit: &Literal) -> Type {
    match lit {
        Literal::Int(_) => int_type(),
        Literal::Float(_) => float_type(),
        Literal::Bool(_) => bool_type(),
        Literal::Str(_) => str_type(),
        Literal::Unit => Type::Unit,
    }
}

/// `f(args)`: a fresh return variable, unify `fn_type` against a function
/// type over `arg_types`, the variable (resolved) is the result.
pub fn call_rule(
    engine: &mut InferenceEngine,
    fn_type: &Type,
    arg_types: Vec<Type>,
    span: Span,
) -> Result<Type, InferError> {
    let ret = Type::Var(engine.fresh_var(VarKind::Type));
    let expected = Type::Function { params: arg_types, ret: Box::new(ret.clone()) };
    engine.unify(fn_type, &expected, span)?;
    Ok(engine.resolve(&ret))
}

/// Unifies both operands together (arithmetic), requires them identical
/// and returns `Bool` (comparison), or requires both `Bool` and returns
/// `Bool` (logical) — the operator table §4.6 sketches.
pub fn binary_rule(
    engine: &mut InferenceEngine,
    op: BinaryOp,
    lhs: &Type,
    rhs: &Type,
    span: Span,
) -> Result<Type, InferError> {
    match op {
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div => {
            engine.unify(lhs, rhs, span)?;
            Ok(engine.resolve(lhs))
        }
        BinaryOp::Eq | BinaryOp::Ne | BinaryOp::Lt | BinaryOp::Le | BinaryOp::Gt | BinaryOp::Ge => {
            engine.unify(lhs, rhs, span)?;
            Ok(bool_type())
        }
        BinaryOp::And | BinaryOp::Or => {
            engine.unify(lhs, &bool_type(), span.clone())?;
            engine.unify(rhs, &bool_type(), span)?;
            Ok(bool_type())
        }
    }
}

/// Field access has no row-polymorphic record type to unify against here;
/// the walker resolves the receiver's concrete struct through the symbol
/// table and checks the field name itself, so this just hands back a fresh
/// variable for the field's value.
pub fn field_access_rule(engine: &mut InferenceEngine) -> Type {
    Type::Var(engine.fresh_var(VarKind::Type))
}

/// Indexing: unify the receiver with an array of a fresh element variable.
pub fn index_rule(engine: &mut InferenceEngine, receiver: &Type, span: Span) -> Result<Type, InferError> {
    let element = Type::Var(engine.fresh_var(VarKind::Type));
    engine.unify(receiver, &Type::Array(Box::new(element.clone())), span)?;
    Ok(engine.resolve(&element))
}

/// All elements unify to one common element type.
pub fn array_literal_rule(engine: &mut InferenceEngine, elements: &[Type], span: Span) -> Result<Type, InferError> {
    let element = Type::Var(engine.fresh_var(VarKind::Type));
    for e in elements {
        engine.unify(e, &element, span.clone())?;
    }
    Ok(Type::Array(Box::new(engine.resolve(&element))))
}

/// Each field's value unifies against the declared field type; the
/// literal's own type is the named struct.
pub fn struct_literal_rule(
    engine: &mut InferenceEngine,
    struct_name: &str,
    fields: &[(String, Type)],
    declared_fields: &[(String, Type)],
    span: Span,
) -> Result<Type, InferError> {
    for (name, value_ty) in fields {
        if let Some((_, declared_ty)) = declared_fields.iter().find(|(n, _)| n == name) {
            engine.unify(value_ty, declared_ty, span.clone())?;
        }
    }
    Ok(named(struct_name))
}
