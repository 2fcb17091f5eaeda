//! Where-clause validation and fixed-point constraint solving.

use crate::error::ConstraintError;
use crate::projection::ProjectionContext;
use crate::registry::TraitRegistry;
use rustc_hash::FxHashMap;
use sema_common::Span;
use sema_hir::{TypeExpr, WhereClause};

/// The outcome of solving a set of where-clauses: the type and
/// associated-type bindings derived, the trait implementations the caller
/// must still verify exist, and whether every clause was satisfiable.
#[derive(Debug, Clone)]
pub struct ConstraintSolution {
    pub type_bindings: FxHashMap<String, TypeExpr>,
    pub assoc_bindings: FxHashMap<(String, String, String), TypeExpr>,
    pub required_trait_impls: Vec<(String, String)>,
    pub satisfied: bool,
    pub conflicts: Vec<ConstraintError>,
}

/// Validates one where-clause's trait and associated-type bounds against
/// the trait registry, detecting cycles on the active `(type_param,
/// trait_name)` stack. Associated-type bounds recurse into the bounding
/// trait's own declared constraints on that associated type, keyed under
/// `type_param::assoc_name`, so a cycle through a chain of associated
/// types is caught rather than just a direct self-reference.
pub fn validate_where_clause(
    wc: &WhereClause,
    traits: &TraitRegistry,
    active: &mut Vec<(String, String)>,
) -> Vec<ConstraintError> {
    let mut errors = Vec::new();

    for bound in &wc.trait_bounds {
        errors.extend(check_bound(&wc.type_param, bound, wc.span.clone(), traits, active));
    }

    for assoc_bound in &wc.assoc_type_bounds {
        let nested_param = format!("{}::{}", wc.type_param, assoc_bound.assoc_name);
        errors.extend(check_bound(&nested_param, &assoc_bound.bound, wc.span.clone(), traits, active));
    }

    errors
}

fn check_bound(
    type_param: &str,
    bound: &sema_hir::TraitBound,
    span: Span,
    traits: &TraitRegistry,
    active: &mut Vec<(String, String)>,
) -> Vec<ConstraintError> {
    let key = (type_param.to_string(), bound.trait_name.clone());
    if active.contains(&key) {
        return vec![ConstraintError::CyclicConstraint {
            type_param: type_param.to_string(),
            trait_name: bound.trait_name.clone(),
            span,
        }];
    }

    let Some(trait_decl) = traits.get(&bound.trait_name) else {
        return vec![ConstraintError::UnsatisfiedBound {
            type_param: type_param.to_string(),
            trait_name: bound.trait_name.clone(),
            span,
        }];
    };

    active.push(key);
    let mut errors = Vec::new();
    for assoc in &trait_decl.assoc_types {
        let nested_param = format!("{type_param}::{}", assoc.name);
        for nested_bound in &assoc.constraints {
            errors.extend(check_bound(&nested_param, nested_bound, span.clone(), traits, active));
        }
    }
    active.pop();
    errors
}

/// Iterates where-clauses to a fixed point, accumulating equality-bound
/// type bindings and projection resolutions; a disagreement between two
/// equality bounds on the same parameter is resolved in favor of whichever
/// bound's span sorts first, with the loser recorded as a conflict.
pub fn solve(constraints: &[WhereClause], traits: &TraitRegistry) -> ConstraintSolution {
    let mut bindings: FxHashMap<String, (TypeExpr, Span)> = FxHashMap::default();
    let mut conflicts = Vec::new();
    let mut validation_errors = Vec::new();
    let mut active = Vec::new();

    for wc in constraints {
        validation_errors.extend(validate_where_clause(wc, traits, &mut active));
    }

    let mut projections = ProjectionContext::new();
    for wc in constraints {
        for bound in &wc.trait_bounds {
            projections.add_bound(wc.type_param.clone(), bound.clone());
        }
    }

    loop {
        let mut changed = false;
        for wc in constraints {
            for eq in &wc.equality_bounds {
                let candidate = (eq.ty.clone(), wc.span.clone());
                match bindings.get(&wc.type_param).cloned() {
                    None => {
                        bindings.insert(wc.type_param.clone(), candidate);
                        changed = true;
                    }
                    Some((existing_ty, existing_span)) if existing_ty != candidate.0 => {
                        if candidate.1.start < existing_span.start {
                            bindings.insert(wc.type_param.clone(), candidate.clone());
                            changed = true;
                        }
                        conflicts.push(ConstraintError::ConstraintConflict {
                            type_param: wc.type_param.clone(),
                            first: existing_ty,
                            second: candidate.0,
                            span: wc.span.clone(),
                        });
                    }
                    Some(_) => {}
                }
            }
        }
        if !changed {
            break;
        }
    }

    let required_trait_impls = constraints
        .iter()
        .flat_map(|wc| wc.trait_bounds.iter().map(|b| (wc.type_param.clone(), b.trait_name.clone())))
        .collect();

    let type_bindings = bindings.into_iter().map(|(k, (ty, _))| (k, ty)).collect();
    let assoc_bindings = projections
        .assoc_bindings
        .into_iter()
        .filter_map(|(key, binding)| binding.bound_type.clone().map(|ty| (key, ty)))
        .collect();

    let satisfied = validation_errors.is_empty() && conflicts.is_empty();
    ConstraintSolution {
        type_bindings,
        assoc_bindings,
        required_trait_impls,
        satisfied,
        conflicts: validation_errors.into_iter().chain(conflicts).collect(),
    }
}

/// Caches [`ConstraintSolution`]s by canonical constraint-set form so
/// repeated solve requests for the same where-clause set, e.g. from two
/// call sites instantiating the same generic function, don't redo the
/// fixed-point iteration.
#[derive(Default)]
pub struct ConstraintSolver {
    cache: FxHashMap<String, ConstraintSolution>,
}

impl ConstraintSolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn solve_cached(&mut self, constraints: &[WhereClause], traits: &TraitRegistry) -> ConstraintSolution {
        let key = canonical_key(constraints);
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }
        let solution = solve(constraints, traits);
        self.cache.insert(key, solution.clone());
        solution
    }
}

/// A canonical string key for a constraint set, used to cache solutions
/// across repeated solve requests for structurally identical where-clauses.
pub fn canonical_key(constraints: &[WhereClause]) -> String {
    let mut parts: Vec<String> = constraints
        .iter()
        .map(|wc| {
            format!(
                "{}:[{}]:[{}]:[{}]",
                wc.type_param,
                wc.trait_bounds.iter().map(|b| b.trait_name.clone()).collect::<Vec<_>>().join(","),
                wc.assoc_type_bounds
                    .iter()
                    .map(|a| format!("{}={}", a.assoc_name, a.bound.trait_name))
                    .collect::<Vec<_>>()
                    .join(","),
                wc.equality_bounds
                    .iter()
                    .map(|e| format!("{}={:?}", e.assoc_name, e.ty))
                    .collect::<Vec<_>>()
                    .join(","),
            )
        })
        .collect();
    parts.sort();
    parts.join("|")
}
