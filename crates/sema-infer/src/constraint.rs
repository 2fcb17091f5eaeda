//! Constraint kinds and the fixed-point solving loop.

use crate::engine::InferenceEngine;
use crate::error::InferError;
use crate::types::{to_type_expr, Type};
use sema_common::Span;
use sema_traits::TraitResolver;

#[derive(Debug, Clone)]
pub enum Constraint {
    Equality { left: Type, right: Type, span: Span },
    /// Checked by simplified equality for primitives; for named user types,
    /// discharged by looking up a `SubtypeOf`-style trait implementation
    /// relating the two, since the core has no built-in subtyping lattice.
    Subtype { left: Type, right: Type, span: Span },
    TraitBound { ty: Type, trait_name: String, span: Span },
    Lifetime { left: Type, right: Type, span: Span },
    Effect { left: Type, right: Type, span: Span },
}

enum Discharge {
    Resolved,
    Failed(InferError),
    Stuck(Constraint),
}

const SUBTYPE_TRAIT: &str = "SubtypeOf";

fn discharge(engine: &mut InferenceEngine, traits: &TraitResolver, c: Constraint) -> Discharge {
    match c {
        Constraint::Equality { left, right, span } | Constraint::Lifetime { left, right, span } | Constraint::Effect { left, right, span } => {
            match engine.unify(&left, &right, span) {
                Ok(()) => Discharge::Resolved,
                Err(e) => Discharge::Failed(e),
            }
        }
        Constraint::Subtype { left, right, span } => {
            let rl = engine.resolve(&left);
            let rr = engine.resolve(&right);
            if matches!(rl, Type::Var(_)) || matches!(rr, Type::Var(_)) {
                return Discharge::Stuck(Constraint::Subtype { left: rl, right: rr, span });
            }
            match (&rl, &rr) {
                (Type::Named { name: n1, .. }, Type::Named { name: n2, .. }) if n1 == n2 => Discharge::Resolved,
                (Type::Named { .. }, Type::Named { .. }) => {
                    match traits.find_applicable_impl(Some(SUBTYPE_TRAIT), &to_type_expr(&rl), span.clone()) {
                        Ok(_) => Discharge::Resolved,
                        Err(_) => Discharge::Failed(InferError::UnificationFailure { left: rl, right: rr, span }),
                    }
                }
                _ if rl == rr => Discharge::Resolved,
                _ => Discharge::Failed(InferError::UnificationFailure { left: rl, right: rr, span }),
            }
        }
        Constraint::TraitBound { ty, trait_name, span } => {
            let resolved = engine.resolve(&ty);
            if matches!(resolved, Type::Var(_)) {
                return Discharge::Stuck(Constraint::TraitBound { ty: resolved, trait_name, span });
            }
            match traits.find_applicable_impl(Some(&trait_name), &to_type_expr(&resolved), span.clone()) {
                Ok(_) => Discharge::Resolved,
                Err(_) => Discharge::Failed(InferError::BoundViolation { ty: resolved, trait_name, span }),
            }
        }
    }
}

fn unresolved_error(c: Constraint) -> InferError {
    match c {
        Constraint::TraitBound { ty, span, .. } => InferError::MissingConstraint { ty, span },
        Constraint::Subtype { left, span, .. } => InferError::AmbiguousType { ty: left, span },
        Constraint::Equality { .. } | Constraint::Lifetime { .. } | Constraint::Effect { .. } => {
            unreachable!("equality, lifetime, and effect constraints always resolve or fail in unify, never stick")
        }
    }
}

/// Iterates `constraints` to a fixed point: each pass discharges whatever
/// it can, variable bindings made along the way may unstick constraints
/// from an earlier pass, and a pass that makes no progress ends the loop,
/// reporting whatever remains unresolved.
pub fn solve(engine: &mut InferenceEngine, traits: &TraitResolver, mut constraints: Vec<Constraint>) -> Vec<InferError> {
    let mut errors = Vec::new();
    loop {
        constraints.append(&mut engine.take_pending_constraints());
        if constraints.is_empty() {
            break;
        }
        let mut progressed = false;
        let mut remaining = Vec::new();
        for c in constraints {
            match discharge(engine, traits, c) {
                Discharge::Resolved => progressed = true,
                Discharge::Failed(e) => {
                    errors.push(e);
                    progressed = true;
                }
                Discharge::Stuck(c) => remaining.push(c),
            }
        }
        constraints = remaining;
        if !progressed {
            for c in constraints {
                errors.push(unresolved_error(c));
            }
            break;
        }
    }
    errors
}
