use super::*;
use sema_common::Span;
use sema_hir::NodeId;
use sema_loader::{ImportedSymbol, SymbolKind};

fn span() -> Span {
    Span::synthetic("m")
}

fn sym(table: &mut SymbolTable, name: &str) -> SymbolId {
    let symbol = Symbol::new(
        SymbolId::INVALID,
        name,
        SymbolKind::Variable,
        table.current_scope(),
        "m",
        NodeId::INVALID,
        span(),
    );
    table.define_symbol(symbol).unwrap()
}

#[test]
fn defines_and_looks_up_in_same_scope() {
    let mut table = SymbolTable::new("m", false, true);
    sym(&mut table, "x");
    let found = table.lookup_symbol("x").unwrap();
    assert_eq!(found.name, "x");
}

#[test]
fn duplicate_without_shadowing_is_rejected() {
    let mut table = SymbolTable::new("m", false, true);
    sym(&mut table, "x");
    let second = Symbol::new(
        SymbolId::INVALID,
        "x",
        SymbolKind::Variable,
        table.current_scope(),
        "m",
        NodeId::INVALID,
        span(),
    );
    let err = table.define_symbol(second).unwrap_err();
    assert!(matches!(err, SymbolError::DuplicateSymbol { .. }));
}

#[test]
fn shadowing_allowed_hides_prior_binding() {
    let mut table = SymbolTable::new("m", true, true);
    let first = sym(&mut table, "x");
    let second_sym = Symbol::new(
        SymbolId::INVALID,
        "x",
        SymbolKind::Constant,
        table.current_scope(),
        "m",
        NodeId::INVALID,
        span(),
    );
    let second = table.define_symbol(second_sym).unwrap();
    assert_ne!(first, second);
    let found = table.lookup_symbol("x").unwrap();
    assert_eq!(found.kind, SymbolKind::Constant);
}

#[test]
fn lookup_walks_up_to_parent_scope() {
    let mut table = SymbolTable::new("m", false, true);
    sym(&mut table, "outer");
    let child = table.create_scope(ScopeKind::Block, None, span());
    table.enter_scope(child).unwrap();
    assert!(table.lookup_symbol("outer").is_some());
    table.exit_scope();
}

#[test]
fn lookup_in_scope_does_not_walk_to_parent() {
    let mut table = SymbolTable::new("m", false, true);
    sym(&mut table, "outer");
    let child = table.create_scope(ScopeKind::Block, None, span());
    assert!(table.lookup_symbol_in_scope("outer", child).is_none());
}

#[test]
fn exiting_root_scope_is_a_no_op() {
    let mut table = SymbolTable::new("m", false, true);
    let root = table.current_scope();
    table.exit_scope();
    assert_eq!(table.current_scope(), root);
}

#[test]
fn case_insensitive_table_unifies_names() {
    let mut table = SymbolTable::new("m", false, false);
    sym(&mut table, "Foo");
    assert!(table.lookup_symbol("foo").is_some());
}

#[test]
fn scope_path_runs_root_to_leaf() {
    let mut table = SymbolTable::new("m", false, true);
    let root = table.current_scope();
    let mid = table.create_scope(ScopeKind::Function, Some("f".into()), span());
    table.enter_scope(mid).unwrap();
    let inner = table.create_scope(ScopeKind::Block, None, span());
    let path = table.get_scope_path(inner);
    assert_eq!(path, vec![root, mid, inner]);
}

#[test]
fn lookup_cache_invalidated_on_insertion() {
    let mut table = SymbolTable::new("m", false, true);
    assert!(table.lookup_symbol("missing").is_none());
    sym(&mut table, "missing");
    // Without invalidation on insertion this would still report `None`
    // from the cache populated by the line above.
    assert!(table.lookup_symbol("missing").is_some());
}

#[test]
fn self_referential_import_alias_is_a_circular_import() {
    let mut table = SymbolTable::new("m", false, true);
    table
        .add_import(ImportedSymbol {
            local_name: "a".into(),
            original_name: "b".into(),
            source_module_path: "other".into(),
            kind: SymbolKind::Variable,
            alias: None,
            import_span: span(),
        })
        .unwrap();
    let err = table.add_import(ImportedSymbol {
        local_name: "b".into(),
        original_name: "a".into(),
        source_module_path: "m".into(),
        kind: SymbolKind::Variable,
        alias: None,
        import_span: span(),
    });
    assert!(matches!(err, Err(SymbolError::CircularImport { .. })));
}
