use crate::error::LoaderError;
use sema_common::Span;
use sema_hir::{HirModule, ModuleSpec, Version};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleStatus {
    Unloaded,
    Loading,
    Loaded,
    Error,
    Cached,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    Function,
    Variable,
    Type,
    Constant,
    Class,
    Interface,
    Enum,
    Module,
    Namespace,
    Field,
    Method,
    Parameter,
    Generic,
}

/// A subset of a full `Symbol` published to other modules.
#[derive(Debug, Clone)]
pub struct ExportedSymbol {
    pub name: String,
    pub kind: SymbolKind,
    pub originating_module: String,
    pub signature_string: String,
    pub documentation: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct ImportedSymbol {
    pub local_name: String,
    pub original_name: String,
    pub source_module_path: String,
    pub kind: SymbolKind,
    pub alias: Option<String>,
    pub import_span: Span,
}

/// Aggregates everything the loader and later passes know about one module.
///
/// Invariant: a module in status `Loaded` has `hir.is_some()` and
/// `load_error.is_none()`; a module in status `Error` has `load_error.is_some()`.
/// `path` is immutable after construction.
pub struct Module {
    path: String,
    pub version: Option<Version>,
    pub name: String,
    pub file_path: String,
    pub dependencies: Vec<ModuleSpec>,
    pub dev_dependencies: Vec<ModuleSpec>,
    pub hir: Option<HirModule>,
    pub public_symbols: HashMap<String, ExportedSymbol>,
    pub private_symbols: HashMap<String, ExportedSymbol>,
    pub imported_modules: HashMap<String, String>,
    pub imported_symbols: HashMap<String, ImportedSymbol>,
    pub status: ModuleStatus,
    pub load_error: Option<LoaderError>,
    pub span: Span,
}

impl Module {
    pub fn new(path: impl Into<String>, file_path: impl Into<String>, span: Span) -> Self {
        let path = path.into();
        Self {
            name: path.clone(),
            path,
            version: None,
            file_path: file_path.into(),
            dependencies: Vec::new(),
            dev_dependencies: Vec::new(),
            hir: None,
            public_symbols: HashMap::new(),
            private_symbols: HashMap::new(),
            imported_modules: HashMap::new(),
            imported_symbols: HashMap::new(),
            status: ModuleStatus::Unloaded,
            load_error: None,
            span,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn mark_loaded(&mut self, hir: HirModule) {
        self.hir = Some(hir);
        self.load_error = None;
        self.status = ModuleStatus::Loaded;
        self.populate_symbol_tables();
    }

    /// Splits top-level declarations into the public and private symbol
    /// tables the spec's data model gives every module. A declaration is
    /// public when its own visibility says so or its name is in the HIR's
    /// explicit export list (an ambient/re-export declaration).
    fn populate_symbol_tables(&mut self) {
        let Some(hir) = &self.hir else { return };
        let exported_names: std::collections::HashSet<&str> =
            hir.exports.iter().map(|e| e.name.as_str()).collect();

        for decl in &hir.declarations {
            let Some(name) = decl.name() else { continue };
            let (kind, visibility, signature) = match decl {
                sema_hir::Declaration::Function(d) => (
                    SymbolKind::Function,
                    d.visibility.clone(),
                    format!("fn {name}({})", d.params.len()),
                ),
                sema_hir::Declaration::Struct(d) => (
                    SymbolKind::Class,
                    d.visibility.clone(),
                    format!("struct {name} {{{}}}", d.fields.len()),
                ),
                sema_hir::Declaration::Enum(d) => (
                    SymbolKind::Enum,
                    d.visibility.clone(),
                    format!("enum {name} {{{}}}", d.variants.len()),
                ),
                sema_hir::Declaration::Trait(d) => (
                    SymbolKind::Interface,
                    d.visibility.clone(),
                    format!("trait {name} {{{}}}", d.methods.len()),
                ),
                sema_hir::Declaration::Const(d) => {
                    (SymbolKind::Constant, d.visibility.clone(), format!("const {name}"))
                }
                sema_hir::Declaration::Impl(_) => continue,
            };
            let is_public = exported_names.contains(name)
                || matches!(
                    visibility,
                    sema_hir::Visibility::Public | sema_hir::Visibility::Package
                );
            let exported = ExportedSymbol {
                name: name.to_string(),
                kind,
                originating_module: self.path.clone(),
                signature_string: signature,
                documentation: None,
                span: decl.span().clone(),
            };
            if is_public {
                self.public_symbols.insert(name.to_string(), exported);
            } else {
                self.private_symbols.insert(name.to_string(), exported);
            }
        }
    }

    pub fn mark_error(&mut self, error: LoaderError) {
        self.load_error = Some(error);
        self.hir = None;
        self.status = ModuleStatus::Error;
    }

    pub fn is_loaded(&self) -> bool {
        self.status == ModuleStatus::Loaded
    }
}
