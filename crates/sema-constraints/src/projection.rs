//! Resolves `T::Item`-style associated-type projections against the trait
//! bounds in scope for `T`.

use crate::registry::TraitRegistry;
use rustc_hash::FxHashMap;
use sema_hir::{TraitBound, TypeExpr};

/// A resolved or still-projected associated-type binding, cached per
/// `(type_param, trait_name, assoc_name)` so repeated projections of the
/// same path return the same placeholder until inference narrows it.
#[derive(Debug, Clone)]
pub struct AssociatedTypeBinding {
    pub trait_name: String,
    pub assoc_type_name: String,
    pub bound_type: Option<TypeExpr>,
    pub constraints: Vec<TraitBound>,
    pub default_type: Option<TypeExpr>,
    pub is_projection: bool,
}

/// Per-solve scratch state: which trait bounds apply to each in-scope type
/// parameter, and the associated-type bindings resolved or synthesized so
/// far.
#[derive(Default)]
pub struct ProjectionContext {
    pub type_param_bounds: FxHashMap<String, Vec<TraitBound>>,
    pub assoc_bindings: FxHashMap<(String, String, String), AssociatedTypeBinding>,
}

impl ProjectionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_bound(&mut self, type_param: impl Into<String>, bound: TraitBound) {
        self.type_param_bounds.entry(type_param.into()).or_default().push(bound);
    }

    /// Resolves `type_param::assoc_name` against whichever in-scope bound
    /// declares an associated type by that name. Returns `TypeExpr::Infer`
    /// if no bound on `type_param` declares it — the caller has nothing to
    /// project against.
    pub fn resolve_projection(
        &mut self,
        type_param: &str,
        assoc_name: &str,
        traits: &TraitRegistry,
    ) -> TypeExpr {
        let Some(bounds) = self.type_param_bounds.get(type_param).cloned() else {
            return TypeExpr::Infer;
        };

        for bound in &bounds {
            let Some(trait_decl) = traits.get(&bound.trait_name) else { continue };
            let Some(assoc_decl) = trait_decl.assoc_types.iter().find(|a| a.name == assoc_name) else {
                continue;
            };

            let key = (type_param.to_string(), bound.trait_name.clone(), assoc_name.to_string());
            if let Some(existing) = self.assoc_bindings.get(&key) {
                if let Some(concrete) = &existing.bound_type {
                    return concrete.clone();
                }
            }

            let projection = TypeExpr::Projection {
                base: Box::new(TypeExpr::Generic(type_param.to_string())),
                assoc_name: assoc_name.to_string(),
            };
            self.assoc_bindings.entry(key).or_insert(AssociatedTypeBinding {
                trait_name: bound.trait_name.clone(),
                assoc_type_name: assoc_name.to_string(),
                bound_type: None,
                constraints: assoc_decl.constraints.clone(),
                default_type: assoc_decl.default_type.clone(),
                is_projection: true,
            });
            return projection;
        }

        TypeExpr::Infer
    }

    /// Replaces a cached projection with a concrete type once inference
    /// determines one, e.g. after unifying `T` with a known struct.
    pub fn bind_concrete(&mut self, type_param: &str, trait_name: &str, assoc_name: &str, concrete: TypeExpr) {
        let key = (type_param.to_string(), trait_name.to_string(), assoc_name.to_string());
        let entry = self.assoc_bindings.entry(key).or_insert(AssociatedTypeBinding {
            trait_name: trait_name.to_string(),
            assoc_type_name: assoc_name.to_string(),
            bound_type: None,
            constraints: Vec::new(),
            default_type: None,
            is_projection: true,
        });
        entry.bound_type = Some(concrete);
        entry.is_projection = false;
    }
}
