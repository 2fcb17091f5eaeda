use super::*;
use sema_common::Level;
use sema_hir::fixtures::{dummy_span, module, FixtureParser};
use sema_hir::{
    BinaryOp, ConstDecl, Declaration, Expr, ExprKind, FunctionDecl, Literal, NodeIdGenerator,
    Param, ThrowsSpec, TypeExpr, Visibility,
};
use sema_loader::filesystem::MemoryFileSystem;

fn int_type() -> TypeExpr {
    TypeExpr::Named { name: "Int".to_string(), args: Vec::new() }
}

fn lit(n: i64, ids: &NodeIdGenerator, file: &str) -> Expr {
    Expr { id: ids.alloc(), kind: ExprKind::Literal(Literal::Int(n)), span: dummy_span(file) }
}

fn fs_for(paths: &[&str]) -> MemoryFileSystem {
    let mut fs = MemoryFileSystem::new();
    for p in paths {
        fs = fs.with_file(format!("root/{p}.src"), "");
    }
    fs
}

#[test]
fn compiling_a_well_typed_module_produces_no_diagnostics() {
    let ids = NodeIdGenerator::new();
    let lhs = lit(1, &ids, "Main");
    let rhs = lit(2, &ids, "Main");
    let sum = Expr {
        id: ids.alloc(),
        kind: ExprKind::Binary { op: BinaryOp::Add, left: Box::new(lhs), right: Box::new(rhs) },
        span: dummy_span("Main"),
    };
    let const_decl = ConstDecl {
        id: ids.alloc(),
        name: "Total".to_string(),
        ty: int_type(),
        init: sum,
        visibility: Visibility::Public,
        span: dummy_span("Main"),
    };

    let parser = FixtureParser::new()
        .with_module("Main", module("Main", vec![], vec![], vec![Declaration::Const(const_decl)]));
    let fs = fs_for(&["Main"]);

    let options = CoreOptions { search_paths: vec!["root".to_string()], ..CoreOptions::default() };
    let mut core = Core::new(parser, fs, options);

    let program = core.compile(&["Main".to_string()]);
    assert!(!program.has_errors(), "unexpected diagnostics: {:?}", program.diagnostics);
    assert_eq!(program.load_order, vec!["Main".to_string()]);

    let result = program.module("Main").unwrap();
    assert_eq!(result.expr_types.len(), 3);
}

#[test]
fn mismatched_return_type_is_reported_as_a_unification_failure() {
    let ids = NodeIdGenerator::new();
    let body = sema_hir::Block {
        id: ids.alloc(),
        stmts: vec![],
        tail: Some(Expr {
            id: ids.alloc(),
            kind: ExprKind::Literal(Literal::Str("oops".to_string())),
            span: dummy_span("Main"),
        }),
        span: dummy_span("Main"),
    };
    let func = FunctionDecl {
        id: ids.alloc(),
        name: "broken".to_string(),
        generics: Vec::new(),
        where_clauses: Vec::new(),
        params: vec![Param { name: "x".to_string(), ty: int_type(), span: dummy_span("Main") }],
        return_type: int_type(),
        throws: ThrowsSpec::default(),
        body: Some(body),
        visibility: Visibility::Public,
        span: dummy_span("Main"),
    };

    let parser = FixtureParser::new()
        .with_module("Main", module("Main", vec![], vec![], vec![Declaration::Function(func)]));
    let fs = fs_for(&["Main"]);

    let options = CoreOptions { search_paths: vec!["root".to_string()], ..CoreOptions::default() };
    let mut core = Core::new(parser, fs, options);

    let program = core.compile(&["Main".to_string()]);
    assert!(program.has_errors());
    assert!(program.diagnostics.iter().any(|d| d.code == "E1601" && d.level == Level::Error));
}
