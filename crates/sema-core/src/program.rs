//! The pipeline's final product: every loaded module's resolution and
//! inference results, keyed by module path.
//!
//! Module identity is the path string throughout this crate, matching
//! [`sema_loader::Module`] and [`sema_hir::HirModule`] — `sema_hir::ModuleId`
//! is allocated but never used as a lookup key anywhere else in the
//! pipeline, so `ResolvedProgram` follows suit rather than introducing a
//! second identity scheme.

use rustc_hash::FxHashMap;
use sema_common::Diagnostic;
use sema_hir::NodeId;
use sema_infer::Type;
use sema_resolve::ModuleResolution;

/// One module's combined resolve + infer output.
pub struct ModuleResult {
    pub resolution: ModuleResolution,
    pub expr_types: FxHashMap<NodeId, Type>,
}

pub struct ResolvedProgram {
    pub modules: FxHashMap<String, ModuleResult>,
    pub load_order: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ResolvedProgram {
    pub fn module(&self, path: &str) -> Option<&ModuleResult> {
        self.modules.get(path)
    }

    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.level == sema_common::Level::Error)
    }
}

