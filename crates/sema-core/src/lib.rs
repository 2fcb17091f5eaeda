//! Orchestrates the whole pipeline: load modules, resolve names, validate
//! trait/constraint bounds, infer expression types, and hand back one
//! [`ResolvedProgram`] with every diagnostic collected along the way.

pub mod program;
mod walker;

pub use program::{ModuleResult, ResolvedProgram};

use rustc_hash::FxHashMap;
use sema_common::{CoreOptions, Diagnostic, DiagnosticSink};
use sema_constraints::{validate_where_clause, TraitRegistry};
use sema_hir::{Declaration, HirParser};
use sema_infer::InferenceEngine;
use sema_loader::{FileSystem, ModuleLoader};
use sema_resolve::Resolver;
use sema_traits::TraitResolver;

pub struct Core<P, F> {
    loader: ModuleLoader<P, F>,
    options: CoreOptions,
}

impl<P: HirParser, F: FileSystem> Core<P, F> {
    pub fn new(parser: P, fs: F, options: CoreOptions) -> Self {
        let mut loader = ModuleLoader::new(parser, fs).with_extensions(options.extensions.clone());
        for path in &options.search_paths {
            loader.add_search_path(path.clone());
        }
        Self { loader, options }
    }

    /// Runs the full pipeline over `entry_points`: loading and dependency
    /// ordering, then (in load order, so a module's imports are already
    /// resolved) name resolution, trait/constraint validation, and type
    /// inference for every module reached from them.
    pub fn compile(&mut self, entry_points: &[String]) -> ResolvedProgram {
        let resolve_result = self.loader.resolve_modules(entry_points);

        let mut sink = DiagnosticSink::new(
            self.options.ignore_categories.clone(),
            self.options.ignore_codes.clone(),
            self.options.warnings_as_errors,
            self.options.max_errors,
        );
        for d in resolve_result.diagnostics {
            sink.add(d);
        }

        let modules = self.loader.modules();
        let trait_resolver = TraitResolver::build(modules);
        let trait_registry = TraitRegistry::build(modules);

        let mut results = FxHashMap::default();
        for path in &resolve_result.load_order {
            let Some(module) = modules.get(path) else { continue };
            let Some(hir) = &module.hir else { continue };

            let resolution = Resolver::resolve_module(path, modules, &self.options);
            for d in &resolution.diagnostics {
                sink.add(d.clone());
            }

            for d in Self::validate_declarations(hir, &trait_resolver, &trait_registry) {
                sink.add(d);
            }

            let mut table = resolution.table;
            let mut engine = InferenceEngine::new();
            let inference = walker::infer_module(hir, &mut table, &trait_resolver, &mut engine);
            for e in &inference.errors {
                sink.add(e.to_diagnostic());
            }

            // Diagnostics already went into `sink` above; the copy kept on
            // `ModuleResolution` here is left empty rather than duplicated.
            results.insert(
                path.clone(),
                ModuleResult {
                    resolution: sema_resolve::ModuleResolution {
                        table,
                        resolved_refs: resolution.resolved_refs,
                        diagnostics: Vec::new(),
                    },
                    expr_types: inference.expr_types,
                },
            );
        }

        ResolvedProgram {
            modules: results,
            load_order: resolve_result.load_order,
            diagnostics: sink.into_sorted(),
        }
    }

    /// Checks every impl's trait conformance and throws/purity covariance,
    /// and validates every where-clause on every impl and function against
    /// the trait registry, independent of whether inference ever visits the
    /// generic function in question.
    fn validate_declarations(
        hir: &sema_hir::HirModule,
        trait_resolver: &TraitResolver,
        trait_registry: &TraitRegistry,
    ) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();
        for decl in &hir.declarations {
            match decl {
                Declaration::Impl(impl_decl) => {
                    if let Some(trait_name) = &impl_decl.trait_name {
                        if let Some(trait_decl) = trait_registry.get(trait_name) {
                            for err in trait_resolver.check_impl(trait_decl, impl_decl, impl_decl.span.clone()) {
                                diagnostics.push(err.to_diagnostic());
                            }
                        }
                    }
                    for wc in &impl_decl.where_clauses {
                        let mut active = Vec::new();
                        for err in validate_where_clause(wc, trait_registry, &mut active) {
                            diagnostics.push(err.to_diagnostic());
                        }
                    }
                }
                Declaration::Function(f) => {
                    for wc in &f.where_clauses {
                        let mut active = Vec::new();
                        for err in validate_where_clause(wc, trait_registry, &mut active) {
                            diagnostics.push(err.to_diagnostic());
                        }
                    }
                }
                _ => {}
            }
        }
        diagnostics
    }
}

#[cfg(test)]
#[path = "tests/core_tests.rs"]
mod tests;
