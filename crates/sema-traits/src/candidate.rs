//! Type compatibility between an impl's `for_type` and a query target, and
//! the priority tuple that orders the resulting candidates.

use rustc_hash::FxHashMap;
use sema_hir::TypeExpr;

/// How closely a candidate's `for_type` matched the query target.
/// `0` is an exact structural match, `1` went through an `Infer`
/// placeholder, `2` required binding one of the impl's own generics.
pub type Distance = u8;

pub fn compatible(
    for_type: &TypeExpr,
    target: &TypeExpr,
    generics: &[String],
) -> Option<(Distance, FxHashMap<String, TypeExpr>)> {
    let mut bindings = FxHashMap::default();
    let distance = unify(for_type, target, generics, &mut bindings)?;
    Some((distance, bindings))
}

fn unify(
    a: &TypeExpr,
    b: &TypeExpr,
    generics: &[String],
    bindings: &mut FxHashMap<String, TypeExpr>,
) -> Option<Distance> {
    if let TypeExpr::Generic(name) = a {
        if generics.iter().any(|g| g == name) {
            match bindings.get(name) {
                Some(bound) if bound == b => return Some(2),
                Some(_) => return None,
                None => {
                    bindings.insert(name.clone(), b.clone());
                    return Some(2);
                }
            }
        }
    }

    if matches!(a, TypeExpr::Infer) || matches!(b, TypeExpr::Infer) {
        return Some(1);
    }

    match (a, b) {
        (TypeExpr::Named { name: n1, args: a1 }, TypeExpr::Named { name: n2, args: a2 }) => {
            if n1 != n2 || a1.len() != a2.len() {
                return None;
            }
            combine(a1.iter().zip(a2.iter()).map(|(x, y)| unify(x, y, generics, bindings)))
        }
        (TypeExpr::Generic(g1), TypeExpr::Generic(g2)) => (g1 == g2).then_some(0),
        (TypeExpr::Tuple(xs), TypeExpr::Tuple(ys)) if xs.len() == ys.len() => {
            combine(xs.iter().zip(ys.iter()).map(|(x, y)| unify(x, y, generics, bindings)))
        }
        (TypeExpr::Array(x), TypeExpr::Array(y)) => unify(x, y, generics, bindings),
        (
            TypeExpr::Function { params: p1, ret: r1 },
            TypeExpr::Function { params: p2, ret: r2 },
        ) if p1.len() == p2.len() => combine(
            p1.iter()
                .zip(p2.iter())
                .map(|(x, y)| unify(x, y, generics, bindings))
                .chain(std::iter::once(unify(r1, r2, generics, bindings))),
        ),
        (TypeExpr::Unit, TypeExpr::Unit) => Some(0),
        (TypeExpr::Projection { .. }, _) | (_, TypeExpr::Projection { .. }) => {
            (a == b).then_some(0)
        }
        _ => (a == b).then_some(0),
    }
}

fn combine(distances: impl Iterator<Item = Option<Distance>>) -> Option<Distance> {
    let mut max = 0;
    for d in distances {
        max = max.max(d?);
    }
    Some(max)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Priority {
    pub is_inherent: bool,
    pub priority_number: i32,
    pub distance: Distance,
}

impl Priority {
    pub fn compute(is_inherent: bool, distance: Distance) -> Self {
        let mut priority_number = match distance {
            0 => 100,
            1 => 0,
            _ => -10,
        };
        if is_inherent {
            priority_number += 1000;
        }
        Self {
            is_inherent,
            priority_number,
            distance,
        }
    }

    /// Ordering key: inherent first, then higher `priority_number`, then
    /// lower `distance`. Two candidates with an equal key are ambiguous.
    fn rank(self) -> (i32, i32, i32) {
        (
            if self.is_inherent { 1 } else { 0 },
            self.priority_number,
            -(self.distance as i32),
        )
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}
