//! Stable numeric ids for HIR nodes, modules, scopes and symbols.
//!
//! The HIR and symbol table form graphs with cycles (a function calls
//! another defined later, a scope's imported symbol points back into a
//! sibling module). Rather than encode that with owning pointers, every
//! cross-reference is a small `Copy` id resolved through an arena or table.
//! Ids are allocated from a monotonic counter scoped to one core instance;
//! `0` is reserved as "invalid" so a default-initialized id is never
//! mistaken for a real one.

use std::marker::PhantomData;
use std::sync::atomic::{AtomicU32, Ordering};

/// A numeric id tagged by `Tag` so ids from different domains (nodes,
/// modules, scopes, symbols) can't be mixed up at compile time.
pub struct Id<Tag> {
    value: u32,
    _tag: PhantomData<fn() -> Tag>,
}

impl<Tag> Id<Tag> {
    pub const INVALID: Id<Tag> = Id {
        value: 0,
        _tag: PhantomData,
    };

    pub const fn from_raw(value: u32) -> Self {
        Id {
            value,
            _tag: PhantomData,
        }
    }

    pub const fn raw(self) -> u32 {
        self.value
    }

    pub const fn is_valid(self) -> bool {
        self.value != 0
    }
}

impl<Tag> Clone for Id<Tag> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<Tag> Copy for Id<Tag> {}
impl<Tag> PartialEq for Id<Tag> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
impl<Tag> Eq for Id<Tag> {}
impl<Tag> PartialOrd for Id<Tag> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<Tag> Ord for Id<Tag> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}
impl<Tag> std::hash::Hash for Id<Tag> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}
impl<Tag> std::fmt::Debug for Id<Tag> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.value)
    }
}

// Derived impls would require `Tag: Serialize + Deserialize`, which is
// wrong for a zero-sized marker. Serialize through the raw value instead,
// same as the other hand-written impls above.
impl<Tag> serde::Serialize for Id<Tag> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

impl<'de, Tag> serde::Deserialize<'de> for Id<Tag> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u32::deserialize(deserializer)?;
        Ok(Id::from_raw(value))
    }
}

/// Allocates ids of one tag from a monotonic counter starting at 1.
pub struct IdGenerator<Tag> {
    next: AtomicU32,
    _tag: PhantomData<fn() -> Tag>,
}

impl<Tag> Default for IdGenerator<Tag> {
    fn default() -> Self {
        Self {
            next: AtomicU32::new(1),
            _tag: PhantomData,
        }
    }
}

impl<Tag> IdGenerator<Tag> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&self) -> Id<Tag> {
        let value = self.next.fetch_add(1, Ordering::Relaxed);
        Id::from_raw(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    enum TestTag {}

    #[test]
    fn allocates_from_one() {
        let gen = IdGenerator::<TestTag>::new();
        assert_eq!(gen.alloc().raw(), 1);
        assert_eq!(gen.alloc().raw(), 2);
    }

    #[test]
    fn zero_is_invalid() {
        let id: Id<TestTag> = Id::INVALID;
        assert!(!id.is_valid());
    }
}
