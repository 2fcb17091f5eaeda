//! The scope stack: a tree of [`Scope`]s plus the cursor walking it, with a
//! per-lookup cache invalidated on any change that could affect resolution.

use crate::error::SymbolError;
use crate::ids::{ScopeId, ScopeIdGenerator, SymbolId, SymbolIdGenerator};
use crate::scope::{Scope, ScopeKind};
use crate::symbol::Symbol;
use rustc_hash::FxHashMap;
use sema_common::Span;
use sema_loader::ImportedSymbol;

#[derive(Debug, Default, Clone, Copy)]
pub struct SymbolTableStats {
    pub total_scopes: u32,
    pub total_symbols: u32,
    pub lookups: u64,
    pub cache_hits: u64,
}

impl SymbolTableStats {
    pub fn cache_hit_ratio(&self) -> f64 {
        if self.lookups == 0 {
            0.0
        } else {
            self.cache_hits as f64 / self.lookups as f64
        }
    }
}

pub struct SymbolTable {
    scopes: FxHashMap<ScopeId, Scope>,
    scope_ids: ScopeIdGenerator,
    symbol_ids: SymbolIdGenerator,
    root: ScopeId,
    /// The active scope path; `enter_scope` pushes, `exit_scope` pops. The
    /// root is always at index 0 and can't be popped.
    stack: Vec<ScopeId>,
    allow_shadowing: bool,
    case_sensitive: bool,
    /// Keyed by `(scope, normalized name)`; cleared whenever the active
    /// scope changes or a symbol is inserted, since either can change what
    /// a lookup from the current scope resolves to.
    lookup_cache: FxHashMap<(ScopeId, String), Option<SymbolId>>,
    symbols_by_id: FxHashMap<SymbolId, (ScopeId, String)>,
    stats: SymbolTableStats,
}

impl SymbolTable {
    pub fn new(module_path: impl Into<String>, allow_shadowing: bool, case_sensitive: bool) -> Self {
        let scope_ids = ScopeIdGenerator::new();
        let root_id = scope_ids.alloc();
        let module_path = module_path.into();
        let root = Scope::new(
            root_id,
            ScopeKind::Module,
            Some(module_path.clone()),
            None,
            module_path,
            0,
            Span::synthetic("<module>"),
        );
        let mut scopes = FxHashMap::default();
        scopes.insert(root_id, root);
        Self {
            scopes,
            scope_ids,
            symbol_ids: SymbolIdGenerator::new(),
            root: root_id,
            stack: vec![root_id],
            allow_shadowing,
            case_sensitive,
            lookup_cache: FxHashMap::default(),
            symbols_by_id: FxHashMap::default(),
            stats: SymbolTableStats::default(),
        }
    }

    pub fn root_scope(&self) -> ScopeId {
        self.root
    }

    pub fn current_scope(&self) -> ScopeId {
        *self.stack.last().expect("root scope is never popped")
    }

    fn normalize<'a>(&self, name: &'a str) -> std::borrow::Cow<'a, str> {
        if self.case_sensitive {
            std::borrow::Cow::Borrowed(name)
        } else {
            std::borrow::Cow::Owned(name.to_lowercase())
        }
    }

    pub fn create_scope(&mut self, kind: ScopeKind, name: Option<String>, span: Span) -> ScopeId {
        let parent = self.current_scope();
        let id = self.scope_ids.alloc();
        let (module_path, depth) = {
            let parent_scope = &self.scopes[&parent];
            (parent_scope.module_path.clone(), parent_scope.depth + 1)
        };
        let scope = Scope::new(id, kind, name, Some(parent), module_path, depth, span);
        self.scopes.insert(id, scope);
        self.scopes.get_mut(&parent).unwrap().children.push(id);
        self.stats.total_scopes += 1;
        id
    }

    /// Switches the current scope to `scope_id`. The previous current scope
    /// is restored by a matching `exit_scope`.
    pub fn enter_scope(&mut self, scope_id: ScopeId) -> Result<(), SymbolError> {
        if !self.scopes.contains_key(&scope_id) {
            return Err(SymbolError::UnknownScope { scope_id });
        }
        self.stack.push(scope_id);
        self.lookup_cache.clear();
        Ok(())
    }

    /// Pops the current scope, returning to whichever scope was active
    /// before the matching `enter_scope`. The root scope can't be exited.
    pub fn exit_scope(&mut self) {
        if self.stack.len() > 1 {
            self.stack.pop();
            self.lookup_cache.clear();
        }
    }

    pub fn define_symbol(&mut self, mut symbol: Symbol) -> Result<SymbolId, SymbolError> {
        let scope_id = self.current_scope();
        let key = self.normalize(&symbol.name).into_owned();
        let scope = self.scopes.get_mut(&scope_id).expect("current scope exists");

        let mut shadowed_id = None;
        if let Some(existing) = scope.symbols.get(&key) {
            if !self.allow_shadowing {
                return Err(SymbolError::DuplicateSymbol {
                    name: symbol.name.clone(),
                    previous_span: existing.declaration_span.clone(),
                    redefinition_span: symbol.declaration_span.clone(),
                });
            }
            shadowed_id = Some(existing.id);
        }

        if symbol.id == SymbolId::INVALID {
            symbol.id = self.symbol_ids.alloc();
        }
        symbol.scope_id = scope_id;
        let id = symbol.id;
        scope.symbols.insert(key.clone(), symbol);
        if let Some(shadowed) = shadowed_id {
            self.symbols_by_id.remove(&shadowed);
        }
        self.symbols_by_id.insert(id, (scope_id, key));
        self.stats.total_symbols += 1;
        self.lookup_cache.clear();
        Ok(id)
    }

    pub fn add_import(&mut self, import: ImportedSymbol) -> Result<(), SymbolError> {
        let scope_id = self.current_scope();

        // Detect a local alias cycle: following `local -> original` edges
        // within this scope's import table returns to where it started.
        let mut visited = vec![import.local_name.clone()];
        let mut cursor = import.original_name.clone();
        let scope = &self.scopes[&scope_id];
        loop {
            if cursor == import.local_name {
                visited.push(cursor);
                return Err(SymbolError::CircularImport {
                    chain: visited,
                    span: import.import_span.clone(),
                });
            }
            let Some(next) = scope.imported_symbols.get(&cursor) else {
                break;
            };
            if visited.contains(&cursor) {
                break;
            }
            visited.push(cursor.clone());
            cursor = next.original_name.clone();
        }

        let local_name = import.local_name.clone();
        self.scopes
            .get_mut(&scope_id)
            .unwrap()
            .imported_symbols
            .insert(local_name, import);
        self.lookup_cache.clear();
        Ok(())
    }

    /// Looks up `name` starting at the current scope and walking up through
    /// parents, checking each scope's own symbols then its imports.
    pub fn lookup_symbol(&mut self, name: &str) -> Option<Symbol> {
        let scope_id = self.current_scope();
        self.lookup_symbol_from(name, scope_id, true)
    }

    /// Looks up `name` in exactly one scope, without walking to parents.
    pub fn lookup_symbol_in_scope(&mut self, name: &str, scope_id: ScopeId) -> Option<Symbol> {
        self.lookup_symbol_from(name, scope_id, false)
    }

    fn lookup_symbol_from(&mut self, name: &str, start: ScopeId, walk_parents: bool) -> Option<Symbol> {
        let key = self.normalize(name).into_owned();
        self.stats.lookups += 1;

        if walk_parents {
            let cache_key = (start, key.clone());
            if let Some(cached) = self.lookup_cache.get(&cache_key) {
                self.stats.cache_hits += 1;
                return cached.and_then(|id| self.resolve_id(id));
            }
        }

        let mut cursor = Some(start);
        let found = loop {
            let Some(scope_id) = cursor else { break None };
            let scope = self.scopes.get(&scope_id)?;
            if let Some(symbol) = scope.symbols.get(&key) {
                break Some(symbol.id);
            }
            if let Some(imported) = scope.imported_symbols.get(&key) {
                break self.find_imported_origin(imported);
            }
            if !walk_parents {
                break None;
            }
            cursor = scope.parent;
        };

        if walk_parents {
            self.lookup_cache.insert((start, key), found);
        }
        found.and_then(|id| self.resolve_id(id))
    }

    /// Records a use of `id` at `span`, for the `usage_count` /
    /// `last_used_span` fields later passes (dead-symbol warnings) consult.
    pub fn mark_used(&mut self, id: SymbolId, span: Span) {
        if let Some((scope_id, key)) = self.symbols_by_id.get(&id).cloned() {
            if let Some(symbol) = self
                .scopes
                .get_mut(&scope_id)
                .and_then(|s| s.symbols.get_mut(&key))
            {
                symbol.mark_used(span);
            }
        }
    }

    fn find_imported_origin(&self, imported: &ImportedSymbol) -> Option<SymbolId> {
        // The source module's own symbol table is outside this one; the
        // name resolver links imports to cross-module symbols once all
        // modules are loaded. Locally we only know an import exists.
        let _ = imported;
        None
    }

    fn resolve_id(&self, id: SymbolId) -> Option<Symbol> {
        let (scope_id, key) = self.symbols_by_id.get(&id)?;
        self.scopes.get(scope_id)?.symbols.get(key).cloned()
    }

    pub fn get_scope_path(&self, scope_id: ScopeId) -> Vec<ScopeId> {
        let mut path = Vec::new();
        let mut cursor = Some(scope_id);
        while let Some(id) = cursor {
            path.push(id);
            cursor = self.scopes.get(&id).and_then(|s| s.parent);
        }
        path.reverse();
        path
    }

    pub fn scope(&self, scope_id: ScopeId) -> Option<&Scope> {
        self.scopes.get(&scope_id)
    }

    pub fn stats(&self) -> SymbolTableStats {
        self.stats
    }
}
