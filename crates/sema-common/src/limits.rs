//! Centralized limits and thresholds, kept in one place so the numbers can
//! be reasoned about together rather than scattered as magic constants.

/// Maximum scope nesting depth before the resolver gives up with a recursion
/// diagnostic instead of overflowing the stack.
pub const MAX_SCOPE_DEPTH: usize = 512;

/// Maximum number of times the constraint solver's fixed-point loop may
/// iterate before it is considered non-terminating.
pub const MAX_SOLVER_ITERATIONS: usize = 1_000;

/// Maximum depth unification will recurse into structurally nested types
/// before reporting a likely infinite type rather than overflowing.
pub const MAX_UNIFICATION_DEPTH: usize = 256;

/// Default cap on reported errors when a [`crate::config::CoreOptions`]
/// does not override it.
pub const DEFAULT_MAX_ERRORS: usize = 100;
