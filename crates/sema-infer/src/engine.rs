//! Unification-variable creation, structural unification, and the occurs
//! check.

use crate::constraint::Constraint;
use crate::error::InferError;
use crate::types::Type;
use crate::var::{TypeVar, VarKind};
use ena::unify::InPlaceUnificationTable;
use rustc_hash::FxHashMap;
use sema_common::Span;

pub struct InferenceEngine {
    table: InPlaceUnificationTable<TypeVar>,
    kinds: FxHashMap<TypeVar, VarKind>,
    /// Upper-bound trait names recorded on creation or via [`Self::add_upper_bound`].
    upper_bounds: FxHashMap<TypeVar, Vec<String>>,
    /// `TraitBound` constraints generated when a bounded variable gets
    /// bound, queued for the next `solve` call to discharge.
    pending_constraints: Vec<Constraint>,
}

impl Default for InferenceEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InferenceEngine {
    pub fn new() -> Self {
        Self {
            table: InPlaceUnificationTable::new(),
            kinds: FxHashMap::default(),
            upper_bounds: FxHashMap::default(),
            pending_constraints: Vec::new(),
        }
    }

    pub fn fresh_var(&mut self, kind: VarKind) -> TypeVar {
        let var = self.table.new_key(None);
        self.kinds.insert(var, kind);
        var
    }

    pub fn kind_of(&self, var: TypeVar) -> Option<VarKind> {
        self.kinds.get(&var).copied()
    }

    pub fn add_upper_bound(&mut self, var: TypeVar, trait_name: impl Into<String>) {
        self.upper_bounds.entry(var).or_default().push(trait_name.into());
    }

    pub fn take_pending_constraints(&mut self) -> Vec<Constraint> {
        std::mem::take(&mut self.pending_constraints)
    }

    /// Follows variable solutions (and union-find roots) transitively,
    /// returning the representative unbound variable if none is found.
    pub fn resolve(&mut self, ty: &Type) -> Type {
        match ty {
            Type::Var(v) => {
                let root = self.table.find(*v);
                match self.table.probe_value(root) {
                    Some(solved) => self.resolve(&solved),
                    None => Type::Var(root),
                }
            }
            Type::Named { name, args } => {
                Type::Named { name: name.clone(), args: args.iter().map(|a| self.resolve(a)).collect() }
            }
            Type::Tuple(xs) => Type::Tuple(xs.iter().map(|x| self.resolve(x)).collect()),
            Type::Array(x) => Type::Array(Box::new(self.resolve(x))),
            Type::Function { params, ret } => Type::Function {
                params: params.iter().map(|p| self.resolve(p)).collect(),
                ret: Box::new(self.resolve(ret)),
            },
            Type::Projection { base, assoc_name } => {
                Type::Projection { base: Box::new(self.resolve(base)), assoc_name: assoc_name.clone() }
            }
            other => other.clone(),
        }
    }

    /// `unify(t1, t2)` per the core's unification rules: identical terms
    /// succeed trivially, a variable binds to the other side (after an
    /// occurs-check), otherwise the two types must decompose structurally
    /// with pairwise-unifiable children.
    pub fn unify(&mut self, t1: &Type, t2: &Type, span: Span) -> Result<(), InferError> {
        let r1 = self.resolve(t1);
        let r2 = self.resolve(t2);

        match (&r1, &r2) {
            (Type::Var(a), Type::Var(b)) if a == b => Ok(()),
            (Type::Var(a), Type::Var(b)) => {
                self.table.unify_var_var(*a, *b).map_err(|c| InferError::UnificationFailure {
                    left: c.left,
                    right: c.right,
                    span,
                })
            }
            (Type::Var(v), _) => self.bind_var(*v, r2.clone(), span),
            (_, Type::Var(v)) => self.bind_var(*v, r1.clone(), span),
            (Type::Unit, Type::Unit) => Ok(()),
            (Type::Generic(a), Type::Generic(b)) if a == b => Ok(()),
            (Type::Named { name: n1, args: a1 }, Type::Named { name: n2, args: a2 })
                if n1 == n2 && a1.len() == a2.len() =>
            {
                for (x, y) in a1.iter().zip(a2.iter()) {
                    self.unify(x, y, span.clone())?;
                }
                Ok(())
            }
            (Type::Tuple(xs), Type::Tuple(ys)) if xs.len() == ys.len() => {
                for (x, y) in xs.iter().zip(ys.iter()) {
                    self.unify(x, y, span.clone())?;
                }
                Ok(())
            }
            (Type::Array(x), Type::Array(y)) => self.unify(x, y, span),
            (Type::Function { params: p1, ret: ret1 }, Type::Function { params: p2, ret: ret2 })
                if p1.len() == p2.len() =>
            {
                for (x, y) in p1.iter().zip(p2.iter()) {
                    self.unify(x, y, span.clone())?;
                }
                self.unify(ret1, ret2, span)
            }
            (Type::Projection { .. }, Type::Projection { .. }) if r1 == r2 => Ok(()),
            _ => Err(InferError::UnificationFailure { left: r1, right: r2, span }),
        }
    }

    fn bind_var(&mut self, var: TypeVar, candidate: Type, span: Span) -> Result<(), InferError> {
        if self.occurs(var, &candidate) {
            return Err(InferError::InfiniteType { var, ty: candidate, span });
        }
        self.table
            .unify_var_value(var, Some(candidate.clone()))
            .map_err(|c| InferError::UnificationFailure { left: c.left, right: c.right, span: span.clone() })?;

        let root = self.table.find(var);
        if let Some(bounds) = self.upper_bounds.get(&root).cloned() {
            for trait_name in bounds {
                self.pending_constraints.push(Constraint::TraitBound {
                    ty: candidate.clone(),
                    trait_name,
                    span: span.clone(),
                });
            }
        }
        Ok(())
    }

    fn occurs(&mut self, var: TypeVar, ty: &Type) -> bool {
        let root = self.table.find(var);
        match self.resolve(ty) {
            Type::Var(other) => other == root,
            Type::Named { args, .. } => args.iter().any(|a| self.occurs(var, a)),
            Type::Tuple(xs) => xs.iter().any(|x| self.occurs(var, x)),
            Type::Array(x) => self.occurs(var, &x),
            Type::Function { params, ret } => params.iter().any(|p| self.occurs(var, p)) || self.occurs(var, &ret),
            Type::Projection { base, .. } => self.occurs(var, &base),
            _ => false,
        }
    }
}
