//! The two-pass HIR walker: collection of top-level declarations, then
//! resolution of every expression and statement against the scope stack it
//! builds as it goes.

use crate::error::ResolveError;
use rustc_hash::FxHashMap;
use sema_common::{CoreOptions, Diagnostic, Span};
use sema_hir::{
    Block, Declaration, Expr, ExprKind, FunctionDecl, HirModule, NodeId, Stmt, TypeExpr,
};
use sema_loader::{ImportedSymbol, Module, SymbolKind};
use sema_symbols::{ScopeKind, Symbol, SymbolId, SymbolTable};

/// Per-module output: the scope tree built while resolving it, every HIR
/// reference id that resolved successfully, and the diagnostics raised.
pub struct ModuleResolution {
    pub table: SymbolTable,
    /// HIR expression node id -> the symbol it refers to. An id absent from
    /// this map either never referenced a symbol or failed to resolve.
    pub resolved_refs: FxHashMap<NodeId, SymbolId>,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct Resolver<'a> {
    options: &'a CoreOptions,
    table: SymbolTable,
    resolved_refs: FxHashMap<NodeId, SymbolId>,
    errors: Vec<ResolveError>,
}

impl<'a> Resolver<'a> {
    pub fn new(module_path: &str, options: &'a CoreOptions) -> Self {
        Self {
            options,
            table: SymbolTable::new(module_path, options.allow_shadowing, options.case_sensitive),
            resolved_refs: FxHashMap::default(),
            errors: Vec::new(),
        }
    }

    /// Resolves `module`, consulting `modules` (the full loaded set) to
    /// bind cross-module imports against their source module's exports.
    pub fn resolve_module(
        module_path: &str,
        modules: &FxHashMap<String, Module>,
        options: &'a CoreOptions,
    ) -> ModuleResolution {
        let mut resolver = Resolver::new(module_path, options);
        if let Some(module) = modules.get(module_path) {
            if let Some(hir) = &module.hir {
                resolver.collect_imports(hir, modules);
                resolver.collect_declarations(hir);
                resolver.resolve_declarations(hir);
            }
        }
        ModuleResolution {
            table: resolver.table,
            resolved_refs: resolver.resolved_refs,
            diagnostics: resolver.errors.iter().map(ResolveError::to_diagnostic).collect(),
        }
    }

    fn collect_imports(&mut self, hir: &HirModule, modules: &FxHashMap<String, Module>) {
        for import in &hir.imports {
            let Some(source) = modules.get(&import.path) else {
                self.errors.push(ResolveError::InvalidImport {
                    path: import.path.clone(),
                    item: None,
                    span: import.span.clone(),
                });
                continue;
            };

            let Some(items) = &import.items else {
                // Whole-module import: bind the module's own name (or its
                // alias) as a namespace symbol in the importing scope.
                let local_name = import
                    .alias
                    .clone()
                    .unwrap_or_else(|| import.path.rsplit('/').next().unwrap_or(&import.path).to_string());
                let symbol = Symbol::new(
                    SymbolId::INVALID,
                    local_name,
                    SymbolKind::Module,
                    self.table.current_scope(),
                    hir.path.clone(),
                    NodeId::INVALID,
                    import.span.clone(),
                );
                let _ = self.table.define_symbol(symbol);
                continue;
            };

            for item in items {
                let local_name = item.alias.clone().unwrap_or_else(|| item.name.clone());
                let Some(exported) = source
                    .public_symbols
                    .get(&item.name)
                    .or_else(|| source.private_symbols.get(&item.name))
                else {
                    self.errors.push(ResolveError::InvalidImport {
                        path: import.path.clone(),
                        item: Some(item.name.clone()),
                        span: item.span.clone(),
                    });
                    continue;
                };

                if source.public_symbols.get(&item.name).is_none() {
                    self.errors.push(ResolveError::VisibilityViolation {
                        name: item.name.clone(),
                        source_module: import.path.clone(),
                        span: item.span.clone(),
                    });
                    continue;
                }

                let symbol = Symbol::new(
                    SymbolId::INVALID,
                    local_name.clone(),
                    exported.kind.clone(),
                    self.table.current_scope(),
                    hir.path.clone(),
                    NodeId::INVALID,
                    item.span.clone(),
                );
                let _ = self.table.define_symbol(symbol);

                let _ = self.table.add_import(ImportedSymbol {
                    local_name,
                    original_name: item.name.clone(),
                    source_module_path: import.path.clone(),
                    kind: exported.kind.clone(),
                    alias: item.alias.clone(),
                    import_span: item.span.clone(),
                });
            }
        }
    }

    /// Pass 1: registers every top-level declaration so forward references
    /// within the module succeed in pass 2.
    fn collect_declarations(&mut self, hir: &HirModule) {
        for decl in &hir.declarations {
            let Some(name) = decl.name() else { continue };
            let (kind, ty, visibility) = match decl {
                Declaration::Function(d) => {
                    (SymbolKind::Function, function_type(d), d.visibility.clone())
                }
                Declaration::Struct(d) => (SymbolKind::Class, TypeExpr::Infer, d.visibility.clone()),
                Declaration::Enum(d) => (SymbolKind::Enum, TypeExpr::Infer, d.visibility.clone()),
                Declaration::Trait(d) => {
                    (SymbolKind::Interface, TypeExpr::Infer, d.visibility.clone())
                }
                Declaration::Const(d) => (SymbolKind::Constant, d.ty.clone(), d.visibility.clone()),
                Declaration::Impl(_) => continue,
            };
            let symbol = Symbol::new(
                SymbolId::INVALID,
                name,
                kind,
                self.table.current_scope(),
                hir.path.clone(),
                decl.id(),
                decl.span().clone(),
            )
            .with_type(ty)
            .with_visibility(visibility);
            let _ = self.table.define_symbol(symbol);
        }
    }

    /// Pass 2: walks bodies and initializers, creating nested scopes and
    /// resolving every identifier against the table built in pass 1.
    fn resolve_declarations(&mut self, hir: &HirModule) {
        for decl in &hir.declarations {
            match decl {
                Declaration::Function(d) => self.resolve_function(d),
                Declaration::Const(d) => self.resolve_expr(&d.init),
                Declaration::Struct(_) | Declaration::Enum(_) | Declaration::Trait(_) => {}
                Declaration::Impl(d) => {
                    for method in &d.methods {
                        self.resolve_function(method);
                    }
                }
            }
        }
    }

    fn resolve_function(&mut self, decl: &FunctionDecl) {
        let scope = self.table.create_scope(
            ScopeKind::Function,
            Some(decl.name.clone()),
            decl.span.clone(),
        );
        self.table.enter_scope(scope).expect("scope just created");

        for param in &decl.params {
            let symbol = Symbol::new(
                SymbolId::INVALID,
                param.name.clone(),
                SymbolKind::Parameter,
                self.table.current_scope(),
                self.table.scope(scope).map(|s| s.module_path.clone()).unwrap_or_default(),
                NodeId::INVALID,
                param.span.clone(),
            )
            .with_type(param.ty.clone());
            let _ = self.table.define_symbol(symbol);
        }

        if let Some(body) = &decl.body {
            self.resolve_block(body);
        }
        self.table.exit_scope();
    }

    fn resolve_block(&mut self, block: &Block) {
        let scope = self.table.create_scope(ScopeKind::Block, None, block.span.clone());
        self.table.enter_scope(scope).expect("scope just created");
        for stmt in &block.stmts {
            self.resolve_stmt(stmt);
        }
        if let Some(tail) = &block.tail {
            self.resolve_expr(tail);
        }
        self.table.exit_scope();
    }

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Let {
                name, ty, init, span, ..
            } => {
                if let Some(init) = init {
                    self.resolve_expr(init);
                }
                let module_path = self
                    .table
                    .scope(self.table.current_scope())
                    .map(|s| s.module_path.clone())
                    .unwrap_or_default();
                let symbol = Symbol::new(
                    SymbolId::INVALID,
                    name.clone(),
                    SymbolKind::Variable,
                    self.table.current_scope(),
                    module_path,
                    NodeId::INVALID,
                    span.clone(),
                )
                .with_type(ty.clone());
                let _ = self.table.define_symbol(symbol);
            }
            Stmt::Expr(e) => self.resolve_expr(e),
            Stmt::Return { value, .. } => {
                if let Some(value) = value {
                    self.resolve_expr(value);
                }
            }
        }
    }

    fn resolve_expr(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Literal(_) | ExprKind::Error => {}
            ExprKind::Ident(name) => self.resolve_ident(expr.id, name, &expr.span),
            ExprKind::Call { callee, args } => {
                self.resolve_expr(callee);
                for arg in args {
                    self.resolve_expr(arg);
                }
            }
            ExprKind::Binary { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }
            ExprKind::Unary { operand, .. } => self.resolve_expr(operand),
            ExprKind::Field { receiver, .. } => self.resolve_expr(receiver),
            ExprKind::Index { receiver, index } => {
                self.resolve_expr(receiver);
                self.resolve_expr(index);
            }
            ExprKind::ArrayLit(items) => {
                for item in items {
                    self.resolve_expr(item);
                }
            }
            ExprKind::StructLit { name, fields } => {
                self.resolve_ident(expr.id, name, &expr.span);
                for field in fields {
                    self.resolve_expr(&field.value);
                }
            }
            ExprKind::Block(block) => self.resolve_block(block),
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(cond);
                self.resolve_block(then_branch);
                if let Some(else_branch) = else_branch {
                    self.resolve_block(else_branch);
                }
            }
        }
    }

    fn resolve_ident(&mut self, node_id: NodeId, name: &str, span: &Span) {
        match self.table.lookup_symbol(name) {
            Some(symbol) => {
                self.resolved_refs.insert(node_id, symbol.id);
                self.table.mark_used(symbol.id, span.clone());
            }
            None => self.errors.push(ResolveError::UndefinedSymbol {
                name: name.to_string(),
                span: span.clone(),
            }),
        }
    }
}

fn function_type(decl: &FunctionDecl) -> TypeExpr {
    TypeExpr::Function {
        params: decl.params.iter().map(|p| p.ty.clone()).collect(),
        ret: Box::new(decl.return_type.clone()),
    }
}

