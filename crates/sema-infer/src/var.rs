//! The `ena` union-find plumbing for unification variables.

use crate::types::Type;
use ena::unify::{UnifyKey, UnifyValue};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeVar(u32);

impl UnifyKey for TypeVar {
    type Value = Option<Type>;

    fn index(&self) -> u32 {
        self.0
    }

    fn from_index(u: u32) -> Self {
        TypeVar(u)
    }

    fn tag() -> &'static str {
        "TypeVar"
    }
}

/// What a variable stands for; solving never mixes kinds (a type variable
/// is never unified against a lifetime variable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarKind {
    Type,
    Lifetime,
    Const,
    Effect,
}

/// Two concrete solutions landing on the same variable (via
/// `unify_var_var` merging two previously-independent variables) conflict
/// unless they're the same type.
#[derive(Debug, Clone)]
pub struct VarConflict {
    pub left: Type,
    pub right: Type,
}

impl UnifyValue for Option<Type> {
    type Error = VarConflict;

    fn unify_values(a: &Self, b: &Self) -> Result<Self, Self::Error> {
        match (a, b) {
            (None, None) => Ok(None),
            (Some(t), None) | (None, Some(t)) => Ok(Some(t.clone())),
            (Some(t1), Some(t2)) => {
                if t1 == t2 {
                    Ok(Some(t1.clone()))
                } else {
                    Err(VarConflict { left: t1.clone(), right: t2.clone() })
                }
            }
        }
    }
}
