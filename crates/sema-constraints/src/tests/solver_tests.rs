use super::*;
use rustc_hash::FxHashMap;
use sema_hir::fixtures::dummy_span;
use sema_hir::{
    AssocTypeConstraintExpr, AssocTypeDecl, Declaration, EqualityBoundExpr, HirModule, TraitBound,
    TraitDecl, TypeExpr, Visibility, WhereClause,
};
use sema_loader::Module;

fn span() -> sema_common::Span {
    dummy_span("m")
}

fn named(name: &str) -> TypeExpr {
    TypeExpr::Named { name: name.to_string(), args: Vec::new() }
}

fn registry_with(decls: Vec<Declaration>) -> TraitRegistry {
    let hir = HirModule {
        path: "m".to_string(),
        imports: Vec::new(),
        exports: Vec::new(),
        declarations: smallvec::SmallVec::from_vec(decls),
        span: span(),
    };
    let mut module = Module::new("m", "m.src", span());
    module.mark_loaded(hir);
    let modules = FxHashMap::from_iter([("m".to_string(), module)]);
    TraitRegistry::build(&modules)
}

fn trait_decl(name: &str, assoc_types: Vec<AssocTypeDecl>) -> TraitDecl {
    TraitDecl {
        id: sema_hir::NodeId::INVALID,
        name: name.to_string(),
        generics: Vec::new(),
        assoc_types,
        methods: Vec::new(),
        visibility: Visibility::Public,
        span: span(),
    }
}

fn bound(trait_name: &str) -> TraitBound {
    TraitBound { trait_name: trait_name.to_string(), type_args: Vec::new() }
}

fn where_clause(type_param: &str, trait_bounds: Vec<TraitBound>) -> WhereClause {
    WhereClause {
        type_param: type_param.to_string(),
        trait_bounds,
        assoc_type_bounds: Vec::new(),
        equality_bounds: Vec::new(),
        span: span(),
    }
}

#[test]
fn where_clause_naming_an_undeclared_trait_is_unsatisfied() {
    let traits = registry_with(vec![]);
    let wc = where_clause("T", vec![bound("Show")]);
    let errors = validate_where_clause(&wc, &traits, &mut Vec::new());
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ConstraintError::UnsatisfiedBound { .. }));
}

#[test]
fn where_clause_naming_a_declared_trait_is_satisfied() {
    let traits = registry_with(vec![Declaration::Trait(trait_decl("Show", vec![]))]);
    let wc = where_clause("T", vec![bound("Show")]);
    let errors = validate_where_clause(&wc, &traits, &mut Vec::new());
    assert!(errors.is_empty());
}

#[test]
fn assoc_type_constraint_cycling_back_to_its_own_trait_is_cyclic() {
    // `Iterator::Item` constrained to implement `Iterator` again forms a
    // direct self-reference once the recursive assoc-type walk revisits it.
    let iterator = trait_decl(
        "Iterator",
        vec![AssocTypeDecl {
            name: "Item".to_string(),
            constraints: vec![bound("Iterator")],
            default_type: None,
            span: span(),
        }],
    );
    let traits = registry_with(vec![Declaration::Trait(iterator)]);
    let wc = where_clause("T", vec![bound("Iterator")]);
    let errors = validate_where_clause(&wc, &traits, &mut Vec::new());
    assert!(errors.iter().any(|e| matches!(e, ConstraintError::CyclicConstraint { .. })));
}

#[test]
fn assoc_type_bound_checks_the_nested_trait() {
    let traits = registry_with(vec![Declaration::Trait(trait_decl("Clone", vec![]))]);
    let wc = WhereClause {
        type_param: "T".to_string(),
        trait_bounds: Vec::new(),
        assoc_type_bounds: vec![AssocTypeConstraintExpr {
            assoc_name: "Item".to_string(),
            bound: bound("Clone"),
        }],
        equality_bounds: Vec::new(),
        span: span(),
    };
    let errors = validate_where_clause(&wc, &traits, &mut Vec::new());
    assert!(errors.is_empty());
}

#[test]
fn resolving_a_projection_synthesizes_a_placeholder() {
    let iterator = trait_decl(
        "Iterator",
        vec![AssocTypeDecl {
            name: "Item".to_string(),
            constraints: Vec::new(),
            default_type: None,
            span: span(),
        }],
    );
    let traits = registry_with(vec![Declaration::Trait(iterator)]);
    let mut ctx = ProjectionContext::new();
    ctx.add_bound("T", bound("Iterator"));

    let resolved = ctx.resolve_projection("T", "Item", &traits);
    assert!(matches!(resolved, TypeExpr::Projection { .. }));
    assert_eq!(ctx.assoc_bindings.len(), 1);
}

#[test]
fn binding_a_projection_concrete_replaces_later_resolutions() {
    let iterator = trait_decl(
        "Iterator",
        vec![AssocTypeDecl {
            name: "Item".to_string(),
            constraints: Vec::new(),
            default_type: None,
            span: span(),
        }],
    );
    let traits = registry_with(vec![Declaration::Trait(iterator)]);
    let mut ctx = ProjectionContext::new();
    ctx.add_bound("T", bound("Iterator"));
    ctx.resolve_projection("T", "Item", &traits);
    ctx.bind_concrete("T", "Iterator", "Item", named("Int"));

    let resolved = ctx.resolve_projection("T", "Item", &traits);
    assert_eq!(resolved, named("Int"));
}

#[test]
fn projection_with_no_bound_on_the_type_param_is_unresolved() {
    let traits = registry_with(vec![]);
    let mut ctx = ProjectionContext::new();
    assert_eq!(ctx.resolve_projection("T", "Item", &traits), TypeExpr::Infer);
}

#[test]
fn single_equality_bound_produces_a_type_binding() {
    let traits = registry_with(vec![]);
    let wc = WhereClause {
        type_param: "T".to_string(),
        trait_bounds: Vec::new(),
        assoc_type_bounds: Vec::new(),
        equality_bounds: vec![EqualityBoundExpr { assoc_name: "Item".to_string(), ty: named("Int") }],
        span: span(),
    };
    let solution = solve(&[wc], &traits);
    assert!(solution.satisfied);
    assert_eq!(solution.type_bindings.get("T"), Some(&named("Int")));
}

#[test]
fn conflicting_equality_bounds_pick_the_earlier_span_and_record_a_conflict() {
    let traits = registry_with(vec![]);
    let earlier = sema_common::Span::new(
        sema_common::Position::new("m", 1, 1, 0),
        sema_common::Position::new("m", 1, 1, 0),
    );
    let later = sema_common::Span::new(
        sema_common::Position::new("m", 2, 1, 10),
        sema_common::Position::new("m", 2, 1, 10),
    );
    let wc_a = WhereClause {
        type_param: "T".to_string(),
        trait_bounds: Vec::new(),
        assoc_type_bounds: Vec::new(),
        equality_bounds: vec![EqualityBoundExpr { assoc_name: "Item".to_string(), ty: named("Int") }],
        span: earlier,
    };
    let wc_b = WhereClause {
        type_param: "T".to_string(),
        trait_bounds: Vec::new(),
        assoc_type_bounds: Vec::new(),
        equality_bounds: vec![EqualityBoundExpr { assoc_name: "Item".to_string(), ty: named("Str") }],
        span: later,
    };
    let solution = solve(&[wc_b, wc_a], &traits);
    assert!(!solution.satisfied);
    assert_eq!(solution.type_bindings.get("T"), Some(&named("Int")));
    assert_eq!(solution.conflicts.len(), 1);
}

#[test]
fn solve_cached_returns_the_same_solution_without_resolving_twice() {
    let traits = registry_with(vec![Declaration::Trait(trait_decl("Show", vec![]))]);
    let wc = where_clause("T", vec![bound("Show")]);
    let mut solver = ConstraintSolver::new();
    let first = solver.solve_cached(&[wc.clone()], &traits);
    let second = solver.solve_cached(&[wc], &traits);
    assert_eq!(first.satisfied, second.satisfied);
    assert_eq!(first.required_trait_impls, second.required_trait_impls);
}
