//! Builds the trait-name → candidate-impl index once loading completes, and
//! answers "which impl applies" queries against a frozen snapshot of it.

use crate::candidate::{compatible, Priority};
use crate::conformance::{check_conformance, check_throws};
use crate::error::TraitError;
use rustc_hash::FxHashMap;
use sema_common::Span;
use sema_hir::{Declaration, ImplDecl, TraitDecl, TypeExpr};
use sema_loader::Module;

const INHERENT_KEY: &str = "inherent";

#[derive(Clone)]
struct CacheEntry {
    module_path: String,
    decl: ImplDecl,
}

/// The frozen per-trait (or `"inherent"`) impl index built once module
/// loading completes; see the concurrency model's note that the cache does
/// not change for the duration of resolution and inference.
pub struct TraitResolver {
    cache: FxHashMap<String, Vec<CacheEntry>>,
}

pub struct SelectedImpl {
    pub module_path: String,
    pub decl: ImplDecl,
    pub bindings: FxHashMap<String, TypeExpr>,
}

impl TraitResolver {
    pub fn build(modules: &FxHashMap<String, Module>) -> Self {
        let mut cache: FxHashMap<String, Vec<CacheEntry>> = FxHashMap::default();
        let mut module_paths: Vec<&String> = modules.keys().collect();
        module_paths.sort();
        for path in module_paths {
            let module = &modules[path];
            let Some(hir) = &module.hir else { continue };
            for decl in &hir.declarations {
                if let Declaration::Impl(impl_decl) = decl {
                    let key = impl_decl.trait_name.clone().unwrap_or_else(|| INHERENT_KEY.to_string());
                    cache.entry(key).or_default().push(CacheEntry {
                        module_path: module.path().to_string(),
                        decl: impl_decl.clone(),
                    });
                }
            }
        }
        Self { cache }
    }

    /// Selects the unique best-priority impl of `trait_name` (or the
    /// inherent impl, when `trait_name` is `None`) applicable to `target`.
    pub fn find_applicable_impl(
        &self,
        trait_name: Option<&str>,
        target: &TypeExpr,
        span: Span,
    ) -> Result<SelectedImpl, TraitError> {
        let key = trait_name.unwrap_or(INHERENT_KEY);
        let entries = self.cache.get(key).map(Vec::as_slice).unwrap_or(&[]);

        let mut ranked: Vec<(Priority, &CacheEntry, FxHashMap<String, TypeExpr>)> = Vec::new();
        for entry in entries {
            let generics: Vec<String> = entry.decl.generics.iter().map(|g| g.name.clone()).collect();
            if let Some((distance, bindings)) = compatible(&entry.decl.for_type, target, &generics) {
                let is_inherent = entry.decl.trait_name.is_none();
                ranked.push((Priority::compute(is_inherent, distance), entry, bindings));
            }
        }

        if ranked.is_empty() {
            return Err(TraitError::NoApplicableImpl {
                trait_name: trait_name.map(str::to_string),
                target_type: format!("{target:?}"),
                span,
            });
        }

        ranked.sort_by(|a, b| b.0.cmp(&a.0));
        let best = ranked[0].0;
        let winners: Vec<_> = ranked.iter().filter(|(p, ..)| *p == best).collect();
        if winners.len() > 1 {
            let mut candidate_modules: Vec<String> =
                winners.iter().map(|(_, e, _)| e.module_path.clone()).collect();
            candidate_modules.sort();
            return Err(TraitError::AmbiguousImplementation {
                trait_name: trait_name.map(str::to_string),
                target_type: format!("{target:?}"),
                candidate_modules,
                span,
            });
        }

        let (_, entry, bindings) = ranked.into_iter().next().unwrap();
        Ok(SelectedImpl {
            module_path: entry.module_path.clone(),
            decl: entry.decl.clone(),
            bindings,
        })
    }

    /// Runs conformance and throws/purity checking of `impl_decl` against
    /// `trait_decl`, collecting every violation rather than stopping at the
    /// first one.
    pub fn check_impl(&self, trait_decl: &TraitDecl, impl_decl: &ImplDecl, span: Span) -> Vec<TraitError> {
        let mut errors = Vec::new();
        if let Some(conflict) = check_conformance(trait_decl, impl_decl, span.clone()) {
            errors.push(conflict);
        }
        for trait_method in &trait_decl.methods {
            if let Some(impl_method) = impl_decl.methods.iter().find(|m| m.name == trait_method.name) {
                errors.extend(check_throws(trait_method, impl_method));
            }
        }
        errors
    }
}
