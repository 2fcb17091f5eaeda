//! HIR node shapes.
//!
//! This is the surface the parser (an external collaborator, see
//! [`crate::parser`]) hands to the core. Every node carries a [`NodeId`]
//! allocated from the parser's shared counter plus a [`Span`] for
//! diagnostics; cross-references between declarations are ids resolved
//! later through the symbol table, never direct pointers.

use crate::ids::NodeId;
use sema_common::Span;
use smallvec::SmallVec;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Import {
    pub id: NodeId,
    pub path: String,
    pub alias: Option<String>,
    /// `None` means "import the module itself"; `Some(items)` is a
    /// named-item import list (`use path::{a, b as c}`).
    pub items: Option<Vec<ImportItem>>,
    pub span: Span,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ImportItem {
    pub name: String,
    pub alias: Option<String>,
    pub span: Span,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Export {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Visibility {
    Private,
    Package,
    Protected,
    Public,
    Internal,
    Readonly,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ThrowsSpec {
    pub exception_types: Vec<TypeExpr>,
    pub is_no_throw: bool,
    pub is_pure: bool,
}

impl Default for ThrowsSpec {
    fn default() -> Self {
        Self {
            exception_types: Vec::new(),
            is_no_throw: true,
            is_pure: false,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: TypeExpr,
    pub span: Span,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct GenericParam {
    pub name: String,
    pub bounds: Vec<TraitBound>,
    pub span: Span,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TraitBound {
    pub trait_name: String,
    pub type_args: Vec<TypeExpr>,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AssocTypeConstraintExpr {
    pub assoc_name: String,
    pub bound: TraitBound,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EqualityBoundExpr {
    pub assoc_name: String,
    pub ty: TypeExpr,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct WhereClause {
    pub type_param: String,
    pub trait_bounds: Vec<TraitBound>,
    pub assoc_type_bounds: Vec<AssocTypeConstraintExpr>,
    pub equality_bounds: Vec<EqualityBoundExpr>,
    pub span: Span,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FunctionDecl {
    pub id: NodeId,
    pub name: String,
    pub generics: Vec<GenericParam>,
    pub where_clauses: Vec<WhereClause>,
    pub params: Vec<Param>,
    pub return_type: TypeExpr,
    pub throws: ThrowsSpec,
    pub body: Option<Block>,
    pub visibility: Visibility,
    pub span: Span,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct FieldDecl {
    pub name: String,
    pub ty: TypeExpr,
    pub visibility: Visibility,
    pub span: Span,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StructDecl {
    pub id: NodeId,
    pub name: String,
    pub generics: Vec<GenericParam>,
    pub fields: Vec<FieldDecl>,
    pub visibility: Visibility,
    pub span: Span,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EnumVariant {
    pub name: String,
    pub fields: Vec<TypeExpr>,
    pub span: Span,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EnumDecl {
    pub id: NodeId,
    pub name: String,
    pub generics: Vec<GenericParam>,
    pub variants: Vec<EnumVariant>,
    pub visibility: Visibility,
    pub span: Span,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AssocTypeDecl {
    pub name: String,
    pub constraints: Vec<TraitBound>,
    pub default_type: Option<TypeExpr>,
    pub span: Span,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TraitDecl {
    pub id: NodeId,
    pub name: String,
    pub generics: Vec<GenericParam>,
    pub assoc_types: Vec<AssocTypeDecl>,
    pub methods: Vec<FunctionDecl>,
    pub visibility: Visibility,
    pub span: Span,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AssocTypeBindingExpr {
    pub name: String,
    pub ty: TypeExpr,
    pub span: Span,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ImplDecl {
    pub id: NodeId,
    /// `None` for an inherent impl.
    pub trait_name: Option<String>,
    pub trait_type_args: Vec<TypeExpr>,
    pub for_type: TypeExpr,
    pub generics: Vec<GenericParam>,
    pub where_clauses: Vec<WhereClause>,
    pub assoc_type_bindings: Vec<AssocTypeBindingExpr>,
    pub methods: Vec<FunctionDecl>,
    pub span: Span,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ConstDecl {
    pub id: NodeId,
    pub name: String,
    pub ty: TypeExpr,
    pub init: Expr,
    pub visibility: Visibility,
    pub span: Span,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum Declaration {
    Function(FunctionDecl),
    Struct(StructDecl),
    Enum(EnumDecl),
    Trait(TraitDecl),
    Impl(ImplDecl),
    Const(ConstDecl),
}

impl Declaration {
    pub fn name(&self) -> Option<&str> {
        match self {
            Declaration::Function(d) => Some(&d.name),
            Declaration::Struct(d) => Some(&d.name),
            Declaration::Enum(d) => Some(&d.name),
            Declaration::Trait(d) => Some(&d.name),
            Declaration::Impl(_) => None,
            Declaration::Const(d) => Some(&d.name),
        }
    }

    pub fn span(&self) -> &Span {
        match self {
            Declaration::Function(d) => &d.span,
            Declaration::Struct(d) => &d.span,
            Declaration::Enum(d) => &d.span,
            Declaration::Trait(d) => &d.span,
            Declaration::Impl(d) => &d.span,
            Declaration::Const(d) => &d.span,
        }
    }

    pub fn id(&self) -> NodeId {
        match self {
            Declaration::Function(d) => d.id,
            Declaration::Struct(d) => d.id,
            Declaration::Enum(d) => d.id,
            Declaration::Trait(d) => d.id,
            Declaration::Impl(d) => d.id,
            Declaration::Const(d) => d.id,
        }
    }
}

/// A type-level expression: a concrete type, a generic parameter reference,
/// or an associated-type projection (`T::Item`) awaiting resolution.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TypeExpr {
    Named {
        name: String,
        args: Vec<TypeExpr>,
    },
    /// Reference to an in-scope generic parameter by name.
    Generic(String),
    Projection {
        base: Box<TypeExpr>,
        assoc_name: String,
    },
    Tuple(Vec<TypeExpr>),
    Array(Box<TypeExpr>),
    Function {
        params: Vec<TypeExpr>,
        ret: Box<TypeExpr>,
    },
    /// Placeholder left by the parser when a type annotation is absent;
    /// the inference engine fills it with a fresh unification variable.
    Infer,
    Unit,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Literal {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Unit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct StructLitField {
    pub name: String,
    pub value: Expr,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum ExprKind {
    Literal(Literal),
    Ident(String),
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Field {
        receiver: Box<Expr>,
        name: String,
    },
    Index {
        receiver: Box<Expr>,
        index: Box<Expr>,
    },
    ArrayLit(Vec<Expr>),
    StructLit {
        name: String,
        fields: Vec<StructLitField>,
    },
    Block(Box<Block>),
    If {
        cond: Box<Expr>,
        then_branch: Box<Block>,
        else_branch: Option<Box<Block>>,
    },
    /// Best-effort placeholder the name resolver substitutes for an
    /// identifier that failed to resolve, so later passes see a value
    /// instead of cascading the failure.
    Error,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Expr {
    pub id: NodeId,
    pub kind: ExprKind,
    pub span: Span,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum Stmt {
    Let {
        id: NodeId,
        name: String,
        ty: TypeExpr,
        init: Option<Expr>,
        is_mutable: bool,
        span: Span,
    },
    Expr(Expr),
    Return {
        value: Option<Expr>,
        span: Span,
    },
}

impl Stmt {
    pub fn span(&self) -> &Span {
        match self {
            Stmt::Let { span, .. } => span,
            Stmt::Expr(e) => &e.span,
            Stmt::Return { span, .. } => span,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Block {
    pub id: NodeId,
    pub stmts: Vec<Stmt>,
    pub tail: Option<Expr>,
    pub span: Span,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct HirModule {
    pub path: String,
    pub imports: Vec<Import>,
    pub exports: Vec<Export>,
    pub declarations: SmallVec<[Declaration; 8]>,
    pub span: Span,
}

impl HirModule {
    pub fn find_declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations
            .iter()
            .find(|d| d.name() == Some(name))
    }
}
