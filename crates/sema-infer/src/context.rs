//! The stack of inference contexts the walker pushes and pops while
//! descending into expressions, blocks, and functions.

use crate::types::Type;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Default)]
pub struct InferenceContext {
    pub local_vars: FxHashMap<String, Type>,
    pub expected_type: Option<Type>,
    pub return_type: Option<Type>,
    pub generics_in_scope: Vec<String>,
}

/// Owns the live context stack; never empty once a function is entered.
#[derive(Default)]
pub struct ContextStack {
    frames: Vec<InferenceContext>,
}

impl ContextStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ctx: InferenceContext) {
        self.frames.push(ctx);
    }

    pub fn pop(&mut self) -> Option<InferenceContext> {
        self.frames.pop()
    }

    pub fn current(&self) -> Option<&InferenceContext> {
        self.frames.last()
    }

    pub fn current_mut(&mut self) -> Option<&mut InferenceContext> {
        self.frames.last_mut()
    }

    /// Looks a local variable up starting from the innermost frame,
    /// matching lexical shadowing across nested blocks.
    pub fn lookup_local(&self, name: &str) -> Option<&Type> {
        self.frames.iter().rev().find_map(|f| f.local_vars.get(name))
    }

    pub fn return_type(&self) -> Option<&Type> {
        self.frames.iter().rev().find_map(|f| f.return_type.as_ref())
    }
}
