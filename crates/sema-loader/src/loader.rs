//! The module loader: resolves module paths to files, parses them through
//! the upstream parser, and builds the dependency graph.

use crate::error::LoaderError;
use crate::filesystem::FileSystem;
use crate::graph::DependencyGraph;
use crate::module::{Module, ModuleStatus};
use rustc_hash::FxHashMap;
use sema_common::{Diagnostic, Span};
use sema_hir::{HirParser, ModuleSpec, NodeIdGenerator};

/// File suffix candidates tried, in order, for every search path when
/// resolving `a/b/c` to a concrete file.
const CANDIDATE_SUFFIXES: &[&str] = &[".{ext}", "/mod.{ext}", "/index.{ext}"];

pub struct ModuleLoader<P, F> {
    search_paths: Vec<String>,
    extensions: Vec<String>,
    parser: P,
    fs: F,
    node_ids: NodeIdGenerator,
    modules: FxHashMap<String, Module>,
    graph: DependencyGraph,
    /// Recursion stack of in-progress loads, used to detect a cycle the
    /// moment a module is re-entered before it finishes loading.
    load_stack: Vec<String>,
}

pub struct ResolveResult {
    pub load_order: Vec<String>,
    pub cycles: Vec<Vec<String>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<P: HirParser, F: FileSystem> ModuleLoader<P, F> {
    pub fn new(parser: P, fs: F) -> Self {
        Self {
            search_paths: Vec::new(),
            extensions: vec!["src".to_string()],
            parser,
            fs,
            node_ids: NodeIdGenerator::new(),
            modules: FxHashMap::default(),
            graph: DependencyGraph::new(),
            load_stack: Vec::new(),
        }
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn add_search_path(&mut self, path: impl Into<String>) {
        self.search_paths.push(path.into());
    }

    fn resolve_file_path(&self, module_path: &str) -> Option<String> {
        for search_path in &self.search_paths {
            for ext in &self.extensions {
                for suffix in CANDIDATE_SUFFIXES {
                    let suffix = suffix.replace("{ext}", ext);
                    let candidate = format!("{search_path}/{module_path}{suffix}");
                    if self.fs.exists(&candidate) {
                        return Some(candidate);
                    }
                }
            }
        }
        None
    }

    /// Loads `path`, returning the cached result if it was already loaded
    /// (or already failed). Re-entry on a path still on the recursion stack
    /// is reported as a circular import rather than recursing forever.
    pub fn load_module(&mut self, path: &str) -> Result<(), LoaderError> {
        if let Some(existing) = self.modules.get(path) {
            match existing.status {
                ModuleStatus::Loaded | ModuleStatus::Cached => return Ok(()),
                ModuleStatus::Error => return Err(existing.load_error.clone().unwrap()),
                ModuleStatus::Loading | ModuleStatus::Unloaded => {}
            }
        }

        if let Some(pos) = self.load_stack.iter().position(|p| p == path) {
            let mut cycle: Vec<String> = self.load_stack[pos..].to_vec();
            cycle.push(path.to_string());
            return Err(LoaderError::CircularImport { cycle });
        }

        let Some(file_path) = self.resolve_file_path(path) else {
            let err = LoaderError::ModuleNotFound {
                path: path.to_string(),
                search_paths: self.search_paths.clone(),
            };
            self.record_error(path, "", err.clone());
            return Err(err);
        };

        self.load_stack.push(path.to_string());
        self.graph.add_node(path);

        let mut module = Module::new(path, file_path.clone(), Span::synthetic(path));
        module.status = ModuleStatus::Loading;

        let source = match self.fs.read_to_string(&file_path) {
            Ok(s) => s,
            Err(e) => {
                let err = LoaderError::ParseFailure {
                    path: path.to_string(),
                    inner: e.to_string(),
                };
                module.mark_error(err.clone());
                self.modules.insert(path.to_string(), module);
                self.load_stack.pop();
                return Err(err);
            }
        };

        let result = self.parser.parse_module(path, &source, &self.node_ids);
        let outcome = match result {
            Ok(hir) => {
                module.dependencies = hir
                    .imports
                    .iter()
                    .map(|imp| ModuleSpec::new(imp.path.clone()))
                    .collect();
                for dep in module.dependencies.clone() {
                    self.graph.add_edge(path, &dep.path);
                }
                module.mark_loaded(hir);

                let mut poisoned = false;
                let dep_paths: Vec<String> =
                    module.dependencies.iter().map(|d| d.path.clone()).collect();
                self.modules.insert(path.to_string(), module);

                for dep_path in dep_paths {
                    if self.load_module(&dep_path).is_err() {
                        poisoned = true;
                    }
                }
                if poisoned {
                    let err = LoaderError::ParseFailure {
                        path: path.to_string(),
                        inner: "one or more dependencies failed to load".to_string(),
                    };
                    if let Some(m) = self.modules.get_mut(path) {
                        m.mark_error(err.clone());
                    }
                    Err(err)
                } else {
                    Ok(())
                }
            }
            Err(e) => {
                let err = LoaderError::ParseFailure {
                    path: path.to_string(),
                    inner: e.message.clone(),
                };
                module.mark_error(err.clone());
                self.modules.insert(path.to_string(), module);
                Err(err)
            }
        };

        self.load_stack.pop();
        outcome
    }

    fn record_error(&mut self, path: &str, file_path: &str, err: LoaderError) {
        let mut module = Module::new(path, file_path, Span::synthetic(path));
        module.mark_error(err);
        self.modules.insert(path.to_string(), module);
    }

    /// Loads every entry point and computes the load order. Never aborts
    /// early: a module that fails to load is marked `Error` and the loader
    /// moves on to the next entry point and to independent subtrees, so the
    /// caller sees as complete a partial graph as possible.
    pub fn resolve_modules(&mut self, entry_points: &[String]) -> ResolveResult {
        let mut diagnostics = Vec::new();
        for entry in entry_points {
            if let Err(e) = self.load_module(entry) {
                diagnostics.push(e.to_diagnostic(Span::synthetic(entry)));
            }
        }

        match self.graph.topological_sort() {
            Ok(order) => ResolveResult {
                load_order: order,
                cycles: Vec::new(),
                diagnostics,
            },
            Err(cycles) => {
                for cycle in &cycles {
                    diagnostics.push(
                        LoaderError::CircularImport {
                            cycle: cycle.clone(),
                        }
                        .to_diagnostic(Span::synthetic(&cycle[0])),
                    );
                }
                ResolveResult {
                    load_order: Vec::new(),
                    cycles,
                    diagnostics,
                }
            }
        }
    }

    pub fn get_module(&self, path: &str) -> Option<&Module> {
        self.modules.get(path)
    }

    pub fn get_all_modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    /// The full module map, for passes that need to build an index across
    /// every module at once (the symbol/trait/constraint resolvers) rather
    /// than look modules up one at a time.
    pub fn modules(&self) -> &FxHashMap<String, Module> {
        &self.modules
    }

    pub fn get_load_order(&self) -> &[String] {
        &self.graph.load_order
    }

    pub fn get_transitive_dependencies(&self, path: &str) -> rustc_hash::FxHashSet<String> {
        self.graph.transitive_dependencies(path)
    }

    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }
}

#[cfg(test)]
#[path = "tests/loader_tests.rs"]
mod tests;
