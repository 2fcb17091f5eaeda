//! Walks one module's HIR, assigning a [`sema_infer::Type`] to every
//! expression. One walker instance lives for exactly one module; trait-bound
//! discharge (which impl a bound variable's solution satisfies) happens
//! inside [`sema_infer::solve`] once the walk finishes each function body.

use rustc_hash::FxHashMap;
use sema_hir::{
    Block, Declaration, Expr, ExprKind, FunctionDecl, HirModule, NodeId, StructDecl, Stmt,
};
use sema_infer::{from_type_expr, rules, InferError, InferenceEngine, Type, VarKind};
use sema_symbols::SymbolTable;
use sema_traits::TraitResolver;

pub struct ModuleInference {
    pub expr_types: FxHashMap<NodeId, Type>,
    pub errors: Vec<InferError>,
}

struct Walker<'a> {
    engine: &'a mut InferenceEngine,
    table: &'a mut SymbolTable,
    traits: &'a TraitResolver,
    structs: FxHashMap<String, Vec<(String, Type)>>,
    locals: Vec<FxHashMap<String, Type>>,
    return_type: Option<Type>,
    expr_types: FxHashMap<NodeId, Type>,
    errors: Vec<InferError>,
}

pub fn infer_module(
    hir: &HirModule,
    table: &mut SymbolTable,
    traits: &TraitResolver,
    engine: &mut InferenceEngine,
) -> ModuleInference {
    let structs = struct_field_types(hir, engine);
    let mut walker = Walker {
        engine,
        table,
        traits,
        structs,
        locals: Vec::new(),
        return_type: None,
        expr_types: FxHashMap::default(),
        errors: Vec::new(),
    };

    for decl in &hir.declarations {
        match decl {
            Declaration::Function(f) => walker.infer_function(f),
            Declaration::Const(c) => walker.infer_const(&c.ty, &c.init),
            Declaration::Impl(i) => {
                for method in &i.methods {
                    walker.infer_function(method);
                }
            }
            Declaration::Struct(_) | Declaration::Enum(_) | Declaration::Trait(_) => {}
        }
    }

    ModuleInference { expr_types: walker.expr_types, errors: walker.errors }
}

fn struct_field_types(
    hir: &HirModule,
    engine: &mut InferenceEngine,
) -> FxHashMap<String, Vec<(String, Type)>> {
    let mut out = FxHashMap::default();
    for decl in &hir.declarations {
        if let Declaration::Struct(StructDecl { name, fields, .. }) = decl {
            let field_types = fields
                .iter()
                .map(|f| (f.name.clone(), from_type_expr(&f.ty, &mut || engine.fresh_var(VarKind::Type))))
                .collect();
            out.insert(name.clone(), field_types);
        }
    }
    out
}

impl<'a> Walker<'a> {
    fn infer_function(&mut self, decl: &FunctionDecl) {
        let Some(body) = &decl.body else { return };

        let mut frame = FxHashMap::default();
        for p in &decl.params {
            let ty = from_type_expr(&p.ty, &mut || self.engine.fresh_var(VarKind::Type));
            frame.insert(p.name.clone(), ty);
        }
        self.locals.push(frame);

        let prev_return = self.return_type.replace(from_type_expr(&decl.return_type, &mut || {
            self.engine.fresh_var(VarKind::Type)
        }));

        self.block(body);
        self.locals.pop();
        self.return_type = prev_return;

        let pending = self.engine.take_pending_constraints();
        let errors = sema_infer::solve(self.engine, self.traits, pending);
        self.errors.extend(errors);
    }

    fn infer_const(&mut self, ty: &sema_hir::TypeExpr, init: &Expr) {
        let declared = from_type_expr(ty, &mut || self.engine.fresh_var(VarKind::Type));
        let init_ty = self.expr(init);
        if let Err(e) = self.engine.unify(&declared, &init_ty, init.span.clone()) {
            self.errors.push(e);
        }
        let pending = self.engine.take_pending_constraints();
        let errors = sema_infer::solve(self.engine, self.traits, pending);
        self.errors.extend(errors);
    }

    fn lookup_local(&self, name: &str) -> Option<Type> {
        self.locals.iter().rev().find_map(|f| f.get(name).cloned())
    }

    fn block(&mut self, block: &Block) -> Type {
        for stmt in &block.stmts {
            self.stmt(stmt);
        }
        match &block.tail {
            Some(tail) => self.expr(tail),
            None => Type::Unit,
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Let { name, ty, init, .. } => {
                let declared = from_type_expr(ty, &mut || self.engine.fresh_var(VarKind::Type));
                if let Some(init) = init {
                    let init_ty = self.expr(init);
                    if let Err(e) = self.engine.unify(&declared, &init_ty, init.span.clone()) {
                        self.errors.push(e);
                    }
                }
                if let Some(frame) = self.locals.last_mut() {
                    frame.insert(name.clone(), declared);
                }
            }
            Stmt::Expr(e) => {
                self.expr(e);
            }
            Stmt::Return { value, span } => {
                let ty = match value {
                    Some(v) => self.expr(v),
                    None => Type::Unit,
                };
                if let Some(expected) = self.return_type.clone() {
                    if let Err(e) = self.engine.unify(&ty, &expected, span.clone()) {
                        self.errors.push(e);
                    }
                }
            }
        }
    }

    fn expr(&mut self, expr: &Expr) -> Type {
        let ty = match &expr.kind {
            ExprKind::Literal(lit) => rules::literal_type(lit),
            ExprKind::Ident(name) => self.ident_type(name),
            ExprKind::Call { callee, args } => {
                let fn_ty = self.expr(callee);
                let arg_types: Vec<Type> = args.iter().map(|a| self.expr(a)).collect();
                match rules::call_rule(self.engine, &fn_ty, arg_types, expr.span.clone()) {
                    Ok(t) => t,
                    Err(e) => {
                        self.errors.push(e);
                        Type::Var(self.engine.fresh_var(VarKind::Type))
                    }
                }
            }
            ExprKind::Binary { op, left, right } => {
                let l = self.expr(left);
                let r = self.expr(right);
                match rules::binary_rule(self.engine, *op, &l, &r, expr.span.clone()) {
                    Ok(t) => t,
                    Err(e) => {
                        self.errors.push(e);
                        rules::bool_type()
                    }
                }
            }
            ExprKind::Unary { operand, .. } => self.expr(operand),
            ExprKind::Field { receiver, .. } => {
                self.expr(receiver);
                rules::field_access_rule(self.engine)
            }
            ExprKind::Index { receiver, index } => {
                self.expr(index);
                let r = self.expr(receiver);
                match rules::index_rule(self.engine, &r, expr.span.clone()) {
                    Ok(t) => t,
                    Err(e) => {
                        self.errors.push(e);
                        Type::Var(self.engine.fresh_var(VarKind::Type))
                    }
                }
            }
            ExprKind::ArrayLit(items) => {
                let elems: Vec<Type> = items.iter().map(|i| self.expr(i)).collect();
                match rules::array_literal_rule(self.engine, &elems, expr.span.clone()) {
                    Ok(t) => t,
                    Err(e) => {
                        self.errors.push(e);
                        Type::Array(Box::new(Type::Var(self.engine.fresh_var(VarKind::Type))))
                    }
                }
            }
            ExprKind::StructLit { name, fields } => {
                let field_tys: Vec<(String, Type)> =
                    fields.iter().map(|f| (f.name.clone(), self.expr(&f.value))).collect();
                let declared = self.structs.get(name).cloned().unwrap_or_default();
                match rules::struct_literal_rule(self.engine, name, &field_tys, &declared, expr.span.clone()) {
                    Ok(t) => t,
                    Err(e) => {
                        self.errors.push(e);
                        Type::Named { name: name.clone(), args: Vec::new() }
                    }
                }
            }
            ExprKind::Block(block) => self.block(block),
            ExprKind::If { cond, then_branch, else_branch } => {
                let cond_ty = self.expr(cond);
                if let Err(e) = self.engine.unify(&cond_ty, &rules::bool_type(), expr.span.clone()) {
                    self.errors.push(e);
                }
                let then_ty = self.block(then_branch);
                match else_branch {
                    Some(else_block) => {
                        let else_ty = self.block(else_block);
                        if let Err(e) = self.engine.unify(&then_ty, &else_ty, expr.span.clone()) {
                            self.errors.push(e);
                        }
                        self.engine.resolve(&then_ty)
                    }
                    None => Type::Unit,
                }
            }
            ExprKind::Error => Type::Var(self.engine.fresh_var(VarKind::Type)),
        };
        self.expr_types.insert(expr.id, ty.clone());
        ty
    }

    /// Locals shadow module-level symbols; a name found in neither scope
    /// still gets a fresh variable so the walk can continue (resolution
    /// already reported the undefined-symbol error).
    fn ident_type(&mut self, name: &str) -> Type {
        if let Some(local) = self.lookup_local(name) {
            return local;
        }
        match self.table.lookup_symbol(name) {
            Some(symbol) => from_type_expr(&symbol.type_info, &mut || self.engine.fresh_var(VarKind::Type)),
            None => Type::Var(self.engine.fresh_var(VarKind::Type)),
        }
    }
}
