//! Lexical scopes: a tree, rooted at the module's top-level scope, that the
//! resolver pushes and pops as it walks into blocks, function bodies and
//! generic parameter lists.

use crate::ids::ScopeId;
use crate::symbol::Symbol;
use rustc_hash::FxHashMap;
use sema_common::Span;
use sema_loader::ImportedSymbol;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Module,
    Namespace,
    Struct,
    Enum,
    Trait,
    Impl,
    Function,
    Block,
    Loop,
    Conditional,
    Generic,
}

/// Per-scope rules governing which visibilities are reachable from it.
/// Trimmed to what the name resolver and trait resolver actually consult;
/// the full cross-module visibility matrix lives with those passes.
#[derive(Debug, Clone, Copy)]
pub struct AccessRules {
    pub permit_private_from_same_module: bool,
}

impl Default for AccessRules {
    fn default() -> Self {
        Self {
            permit_private_from_same_module: true,
        }
    }
}

pub struct Scope {
    pub id: ScopeId,
    pub kind: ScopeKind,
    pub name: Option<String>,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    pub span: Span,
    pub module_path: String,
    pub depth: u32,
    pub symbols: FxHashMap<String, Symbol>,
    pub imported_symbols: FxHashMap<String, ImportedSymbol>,
    pub access_rules: AccessRules,
}

impl Scope {
    pub fn new(
        id: ScopeId,
        kind: ScopeKind,
        name: Option<String>,
        parent: Option<ScopeId>,
        module_path: impl Into<String>,
        depth: u32,
        span: Span,
    ) -> Self {
        Self {
            id,
            kind,
            name,
            parent,
            children: Vec::new(),
            span,
            module_path: module_path.into(),
            depth,
            symbols: FxHashMap::default(),
            imported_symbols: FxHashMap::default(),
            access_rules: AccessRules::default(),
        }
    }
}
