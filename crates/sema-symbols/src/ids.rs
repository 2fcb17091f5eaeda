//! Tag markers for scope and symbol ids.

use sema_common::ids::{Id, IdGenerator};

pub enum ScopeTag {}
pub type ScopeId = Id<ScopeTag>;
pub type ScopeIdGenerator = IdGenerator<ScopeTag>;

pub enum SymbolTag {}
pub type SymbolId = Id<SymbolTag>;
pub type SymbolIdGenerator = IdGenerator<SymbolTag>;
