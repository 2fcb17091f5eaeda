//! The `Symbol`: everything the resolver and later passes know about one
//! named binding.

use crate::ids::SymbolId;
use sema_common::Span;
use sema_hir::{NodeId, TypeExpr, Visibility};
use sema_loader::SymbolKind;
use smallvec::SmallVec;

use crate::ids::ScopeId;

#[derive(Debug, Clone)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    pub kind: SymbolKind,
    /// The declared or annotated type, as written. `TypeExpr::Infer` until
    /// an annotation is present; the inference engine resolves the concrete
    /// `Type` separately and keeps it in its own side table, keyed by `id`.
    pub type_info: TypeExpr,
    pub visibility: Visibility,
    pub declaration_span: Span,
    pub scope_id: ScopeId,
    pub module_path: String,
    pub hir_node: NodeId,
    pub is_mutable: bool,
    pub is_generic: bool,
    pub is_exported: bool,
    pub is_deprecated: bool,
    pub type_parameters: SmallVec<[String; 2]>,
    pub documentation: Option<String>,
    pub usage_count: u32,
    pub last_used_span: Option<Span>,
    /// Names this symbol's declaration refers to, for dependency-ordered
    /// passes downstream (trait impl priority, constraint solving).
    pub dependencies: SmallVec<[String; 4]>,
}

impl Symbol {
    pub fn new(
        id: SymbolId,
        name: impl Into<String>,
        kind: SymbolKind,
        scope_id: ScopeId,
        module_path: impl Into<String>,
        hir_node: NodeId,
        declaration_span: Span,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            type_info: TypeExpr::Infer,
            visibility: Visibility::Private,
            declaration_span,
            scope_id,
            module_path: module_path.into(),
            hir_node,
            is_mutable: false,
            is_generic: false,
            is_exported: false,
            is_deprecated: false,
            type_parameters: SmallVec::new(),
            documentation: None,
            usage_count: 0,
            last_used_span: None,
            dependencies: SmallVec::new(),
        }
    }

    pub fn with_type(mut self, ty: TypeExpr) -> Self {
        self.type_info = ty;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.is_exported = matches!(visibility, Visibility::Public | Visibility::Package);
        self.visibility = visibility;
        self
    }

    pub fn mark_used(&mut self, at: Span) {
        self.usage_count += 1;
        self.last_used_span = Some(at);
    }
}
