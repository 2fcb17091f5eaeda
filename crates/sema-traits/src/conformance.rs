//! Method-by-method conformance and throws/purity checking of an impl
//! against the trait it claims to implement.

use crate::error::{ThrowsViolationKind, TraitError};
use sema_common::Span;
use sema_hir::{FunctionDecl, ImplDecl, TraitDecl};

/// Checks every trait method has a same-name, same-arity, type-matching
/// counterpart in the impl. Returns a single aggregated conflict, or `None`
/// if the impl fully conforms.
pub fn check_conformance(trait_decl: &TraitDecl, impl_decl: &ImplDecl, span: Span) -> Option<TraitError> {
    let mut missing_methods = Vec::new();
    let mut signature_mismatches = Vec::new();

    for trait_method in &trait_decl.methods {
        match impl_decl.methods.iter().find(|m| m.name == trait_method.name) {
            None => missing_methods.push(trait_method.name.clone()),
            Some(impl_method) => {
                if !signatures_match(trait_method, impl_method) {
                    signature_mismatches.push(trait_method.name.clone());
                }
            }
        }
    }

    if missing_methods.is_empty() && signature_mismatches.is_empty() {
        None
    } else {
        Some(TraitError::ImplementationConflict {
            trait_name: trait_decl.name.clone(),
            missing_methods,
            signature_mismatches,
            span,
        })
    }
}

fn signatures_match(trait_method: &FunctionDecl, impl_method: &FunctionDecl) -> bool {
    if trait_method.params.len() != impl_method.params.len() {
        return false;
    }
    let params_match = trait_method
        .params
        .iter()
        .zip(impl_method.params.iter())
        .all(|(t, i)| types_compatible(&t.ty, &i.ty));
    params_match && types_compatible(&trait_method.return_type, &impl_method.return_type)
}

/// Structural equality, with either side's generic parameter references
/// and `Infer` placeholders treated as wildcards — the same relaxation the
/// candidate matcher applies, short of tracking the impl's own bindings
/// here (conformance checking runs after a candidate already won).
fn types_compatible(a: &sema_hir::TypeExpr, b: &sema_hir::TypeExpr) -> bool {
    use sema_hir::TypeExpr::*;
    match (a, b) {
        (Infer, _) | (_, Infer) => true,
        (Generic(_), _) | (_, Generic(_)) => true,
        (Named { name: n1, args: a1 }, Named { name: n2, args: a2 }) => {
            n1 == n2 && a1.len() == a2.len() && a1.iter().zip(a2.iter()).all(|(x, y)| types_compatible(x, y))
        }
        (Tuple(xs), Tuple(ys)) => xs.len() == ys.len() && xs.iter().zip(ys.iter()).all(|(x, y)| types_compatible(x, y)),
        (Array(x), Array(y)) => types_compatible(x, y),
        (Function { params: p1, ret: r1 }, Function { params: p2, ret: r2 }) => {
            p1.len() == p2.len()
                && p1.iter().zip(p2.iter()).all(|(x, y)| types_compatible(x, y))
                && types_compatible(r1, r2)
        }
        _ => a == b,
    }
}

/// Checks the no-throw/purity flags and the thrown-exception covariance
/// rule: every type the impl method may throw must match one the trait
/// declares.
pub fn check_throws(trait_method: &FunctionDecl, impl_method: &FunctionDecl) -> Vec<TraitError> {
    let mut errors = Vec::new();
    let span = impl_method.span.clone();

    if trait_method.throws.is_no_throw && !impl_method.throws.is_no_throw {
        errors.push(TraitError::ThrowsViolation {
            kind: ThrowsViolationKind::NoThrowViolation,
            method: impl_method.name.clone(),
            span: span.clone(),
        });
    }
    if trait_method.throws.is_pure && !impl_method.throws.is_pure {
        errors.push(TraitError::ThrowsViolation {
            kind: ThrowsViolationKind::PurityViolation,
            method: impl_method.name.clone(),
            span: span.clone(),
        });
    }

    for thrown in &impl_method.throws.exception_types {
        let covered = trait_method
            .throws
            .exception_types
            .iter()
            .any(|declared| types_compatible(declared, thrown));
        if !covered {
            errors.push(TraitError::ThrowsViolation {
                kind: ThrowsViolationKind::ExtraException,
                method: impl_method.name.clone(),
                span: span.clone(),
            });
        }
    }

    errors
}
