use super::*;
use rustc_hash::FxHashMap;
use sema_hir::fixtures::dummy_span;
use sema_hir::{Declaration, HirModule, ImplDecl, NodeId};
use sema_loader::Module;

fn span() -> sema_common::Span {
    dummy_span("m")
}

fn named(name: &str) -> Type {
    Type::Named { name: name.to_string(), args: Vec::new() }
}

fn resolver_with_impl(trait_name: &str, for_type: sema_hir::TypeExpr) -> sema_traits::TraitResolver {
    let decl = ImplDecl {
        id: NodeId::INVALID,
        trait_name: Some(trait_name.to_string()),
        trait_type_args: Vec::new(),
        for_type,
        generics: Vec::new(),
        where_clauses: Vec::new(),
        assoc_type_bindings: Vec::new(),
        methods: Vec::new(),
        span: span(),
    };
    let hir = HirModule {
        path: "m".to_string(),
        imports: Vec::new(),
        exports: Vec::new(),
        declarations: smallvec::SmallVec::from_vec(vec![Declaration::Impl(decl)]),
        span: span(),
    };
    let mut module = Module::new("m", "m.src", span());
    module.mark_loaded(hir);
    sema_traits::TraitResolver::build(&FxHashMap::from_iter([("m".to_string(), module)]))
}

#[test]
fn identical_primitives_unify_with_no_error() {
    let mut engine = InferenceEngine::new();
    assert!(engine.unify(&int_type_for_test(), &int_type_for_test(), span()).is_ok());
}

fn int_type_for_test() -> Type {
    named("Int")
}

#[test]
fn variable_binds_to_a_concrete_type() {
    let mut engine = InferenceEngine::new();
    let v = engine.fresh_var(VarKind::Type);
    engine.unify(&Type::Var(v), &named("Int"), span()).unwrap();
    assert_eq!(engine.resolve(&Type::Var(v)), named("Int"));
}

#[test]
fn binding_a_variable_to_itself_through_a_container_is_an_infinite_type() {
    let mut engine = InferenceEngine::new();
    let v = engine.fresh_var(VarKind::Type);
    let self_containing = Type::Array(Box::new(Type::Var(v)));
    let err = engine.unify(&Type::Var(v), &self_containing, span()).unwrap_err();
    assert!(matches!(err, InferError::InfiniteType { .. }));
}

#[test]
fn mismatched_named_types_fail_unification() {
    let mut engine = InferenceEngine::new();
    let err = engine.unify(&named("Int"), &named("Str"), span()).unwrap_err();
    assert!(matches!(err, InferError::UnificationFailure { .. }));
}

#[test]
fn two_variables_bound_together_share_a_solution() {
    let mut engine = InferenceEngine::new();
    let a = engine.fresh_var(VarKind::Type);
    let b = engine.fresh_var(VarKind::Type);
    engine.unify(&Type::Var(a), &Type::Var(b), span()).unwrap();
    engine.unify(&Type::Var(a), &named("Bool"), span()).unwrap();
    assert_eq!(engine.resolve(&Type::Var(b)), named("Bool"));
}

#[test]
fn trait_bound_constraint_resolves_once_the_variable_is_bound() {
    let mut engine = InferenceEngine::new();
    let v = engine.fresh_var(VarKind::Type);
    engine.add_upper_bound(v, "Show");
    engine.unify(&Type::Var(v), &named("Widget"), span()).unwrap();

    let traits = resolver_with_impl("Show", sema_hir::TypeExpr::Named { name: "Widget".to_string(), args: Vec::new() });
    let pending = engine.take_pending_constraints();
    assert_eq!(pending.len(), 1);
    let errors = solve(&mut engine, &traits, pending);
    assert!(errors.is_empty());
}

#[test]
fn trait_bound_constraint_fails_without_an_applicable_impl() {
    let mut engine = InferenceEngine::new();
    let traits = resolver_with_impl("Show", sema_hir::TypeExpr::Named { name: "Other".to_string(), args: Vec::new() });
    let constraint =
        Constraint::TraitBound { ty: named("Widget"), trait_name: "Show".to_string(), span: span() };
    let errors = solve(&mut engine, &traits, vec![constraint]);
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], InferError::BoundViolation { .. }));
}

#[test]
fn trait_bound_on_an_unresolved_variable_is_missing_constraint() {
    let mut engine = InferenceEngine::new();
    let traits = resolver_with_impl("Show", sema_hir::TypeExpr::Named { name: "Widget".to_string(), args: Vec::new() });
    let v = engine.fresh_var(VarKind::Type);
    let constraint = Constraint::TraitBound { ty: Type::Var(v), trait_name: "Show".to_string(), span: span() };
    let errors = solve(&mut engine, &traits, vec![constraint]);
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], InferError::MissingConstraint { .. }));
}

#[test]
fn call_rule_unifies_arguments_and_yields_the_return_type() {
    let mut engine = InferenceEngine::new();
    let fn_type = Type::Function { params: vec![named("Int")], ret: Box::new(named("Bool")) };
    let result = rules::call_rule(&mut engine, &fn_type, vec![named("Int")], span()).unwrap();
    assert_eq!(result, named("Bool"));
}

#[test]
fn array_literal_rule_unifies_all_elements_to_one_type() {
    let mut engine = InferenceEngine::new();
    let elements = vec![named("Int"), named("Int")];
    let result = rules::array_literal_rule(&mut engine, &elements, span()).unwrap();
    assert_eq!(result, Type::Array(Box::new(named("Int"))));
}

#[test]
fn array_literal_rule_rejects_mismatched_elements() {
    let mut engine = InferenceEngine::new();
    let elements = vec![named("Int"), named("Str")];
    assert!(rules::array_literal_rule(&mut engine, &elements, span()).is_err());
}
