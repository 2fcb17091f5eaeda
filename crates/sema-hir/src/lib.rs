//! HIR node shapes shared by the module loader, name resolver, trait
//! resolver, constraint solver and type inference engine, plus the narrow
//! interface to the upstream parser that produces them.

pub mod ast;
pub mod fixtures;
pub mod ids;
pub mod parser;
pub mod version;

pub use ast::*;
pub use ids::{ModuleId, ModuleIdGenerator, NodeId, NodeIdGenerator};
pub use parser::{HirParser, ParseError};
pub use version::{ConstraintOp, ModuleSpec, Version, VersionClause, VersionConstraint};
