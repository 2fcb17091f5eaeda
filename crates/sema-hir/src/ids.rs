//! Tag markers for the id domains that flow through the HIR.

use sema_common::ids::{Id, IdGenerator};

pub enum NodeTag {}
pub type NodeId = Id<NodeTag>;
pub type NodeIdGenerator = IdGenerator<NodeTag>;

pub enum ModuleTag {}
pub type ModuleId = Id<ModuleTag>;
pub type ModuleIdGenerator = IdGenerator<ModuleTag>;
