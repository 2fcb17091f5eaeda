use super::*;
use rustc_hash::FxHashMap;
use sema_hir::{
    Declaration, FunctionDecl, GenericParam, HirModule, ImplDecl, ThrowsSpec, TraitDecl, TypeExpr,
};
use sema_common::Span;
use sema_loader::Module;

fn span() -> Span {
    Span::synthetic("m")
}

fn named(name: &str) -> TypeExpr {
    TypeExpr::Named {
        name: name.to_string(),
        args: Vec::new(),
    }
}

fn module_with(path: &str, decls: Vec<Declaration>) -> Module {
    let hir = HirModule {
        path: path.to_string(),
        imports: Vec::new(),
        exports: Vec::new(),
        declarations: smallvec::SmallVec::from_vec(decls),
        span: span(),
    };
    let mut module = Module::new(path, format!("{path}.src"), span());
    module.mark_loaded(hir);
    module
}

fn inherent_impl(for_type: TypeExpr) -> ImplDecl {
    ImplDecl {
        id: sema_hir::NodeId::INVALID,
        trait_name: None,
        trait_type_args: Vec::new(),
        for_type,
        generics: Vec::new(),
        where_clauses: Vec::new(),
        assoc_type_bindings: Vec::new(),
        methods: Vec::new(),
        span: span(),
    }
}

fn trait_impl(trait_name: &str, for_type: TypeExpr, methods: Vec<FunctionDecl>) -> ImplDecl {
    ImplDecl {
        id: sema_hir::NodeId::INVALID,
        trait_name: Some(trait_name.to_string()),
        trait_type_args: Vec::new(),
        for_type,
        generics: Vec::new(),
        where_clauses: Vec::new(),
        assoc_type_bindings: Vec::new(),
        methods,
        span: span(),
    }
}

fn method(name: &str, throws: ThrowsSpec) -> FunctionDecl {
    FunctionDecl {
        id: sema_hir::NodeId::INVALID,
        name: name.to_string(),
        generics: Vec::new(),
        where_clauses: Vec::new(),
        params: Vec::new(),
        return_type: TypeExpr::Unit,
        throws,
        body: None,
        visibility: sema_hir::Visibility::Public,
        span: span(),
    }
}

#[test]
fn single_inherent_impl_is_selected() {
    let modules = FxHashMap::from_iter([(
        "m".to_string(),
        module_with("m", vec![Declaration::Impl(inherent_impl(named("Foo")))]),
    )]);
    let resolver = TraitResolver::build(&modules);
    let selected = resolver.find_applicable_impl(None, &named("Foo"), span()).unwrap();
    assert_eq!(selected.module_path, "m");
}

#[test]
fn no_candidates_is_no_applicable_impl() {
    let modules = FxHashMap::default();
    let resolver = TraitResolver::build(&modules);
    let err = resolver.find_applicable_impl(Some("Show"), &named("Foo"), span()).unwrap_err();
    assert!(matches!(err, TraitError::NoApplicableImpl { .. }));
}

#[test]
fn equal_priority_trait_impls_are_ambiguous() {
    let modules = FxHashMap::from_iter([
        (
            "a".to_string(),
            module_with("a", vec![Declaration::Impl(trait_impl("Show", named("Foo"), vec![]))]),
        ),
        (
            "b".to_string(),
            module_with("b", vec![Declaration::Impl(trait_impl("Show", named("Foo"), vec![]))]),
        ),
    ]);
    let resolver = TraitResolver::build(&modules);
    let err = resolver
        .find_applicable_impl(Some("Show"), &named("Foo"), span())
        .unwrap_err();
    assert!(matches!(err, TraitError::AmbiguousImplementation { .. }));
}

#[test]
fn exact_match_beats_generic_impl() {
    let mut generic_impl = trait_impl("Show", TypeExpr::Generic("T".to_string()), vec![]);
    generic_impl.generics = vec![GenericParam {
        name: "T".to_string(),
        bounds: Vec::new(),
        span: span(),
    }];
    let exact_impl = trait_impl("Show", named("Foo"), vec![]);

    let modules = FxHashMap::from_iter([
        ("generic".to_string(), module_with("generic", vec![Declaration::Impl(generic_impl)])),
        ("exact".to_string(), module_with("exact", vec![Declaration::Impl(exact_impl)])),
    ]);
    let resolver = TraitResolver::build(&modules);
    let selected = resolver
        .find_applicable_impl(Some("Show"), &named("Foo"), span())
        .unwrap();
    assert_eq!(selected.module_path, "exact");
}

#[test]
fn inherent_impl_beats_trait_impl_of_equal_priority() {
    let modules = FxHashMap::from_iter([(
        "m".to_string(),
        module_with(
            "m",
            vec![Declaration::Impl(inherent_impl(named("Foo")))],
        ),
    )]);
    let resolver = TraitResolver::build(&modules);
    // Queried with trait_name=None, only the inherent cache bucket is
    // consulted, so this just exercises that inherent impls win their own
    // bucket outright (no trait-impl competitor is even eligible).
    let selected = resolver.find_applicable_impl(None, &named("Foo"), span()).unwrap();
    assert!(selected.decl.trait_name.is_none());
}

#[test]
fn missing_method_is_implementation_conflict() {
    let trait_decl = TraitDecl {
        id: sema_hir::NodeId::INVALID,
        name: "Show".to_string(),
        generics: Vec::new(),
        assoc_types: Vec::new(),
        methods: vec![method("show", ThrowsSpec::default())],
        visibility: sema_hir::Visibility::Public,
        span: span(),
    };
    let impl_decl = trait_impl("Show", named("Foo"), vec![]);
    let errors = TraitResolver::build(&FxHashMap::default()).check_impl(&trait_decl, &impl_decl, span());
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], TraitError::ImplementationConflict { .. }));
}

#[test]
fn no_throw_trait_rejects_throwing_impl() {
    let mut trait_throws = ThrowsSpec::default();
    trait_throws.is_no_throw = true;
    let trait_decl = TraitDecl {
        id: sema_hir::NodeId::INVALID,
        name: "Pure".to_string(),
        generics: Vec::new(),
        assoc_types: Vec::new(),
        methods: vec![method("run", trait_throws)],
        visibility: sema_hir::Visibility::Public,
        span: span(),
    };
    let mut impl_throws = ThrowsSpec::default();
    impl_throws.is_no_throw = false;
    impl_throws.exception_types = vec![named("IoError")];
    let impl_decl = trait_impl("Pure", named("Foo"), vec![method("run", impl_throws)]);

    let errors = TraitResolver::build(&FxHashMap::default()).check_impl(&trait_decl, &impl_decl, span());
    assert!(errors.iter().any(|e| matches!(
        e,
        TraitError::ThrowsViolation {
            kind: ThrowsViolationKind::NoThrowViolation,
            ..
        }
    )));
    assert!(errors.iter().any(|e| matches!(
        e,
        TraitError::ThrowsViolation {
            kind: ThrowsViolationKind::ExtraException,
            ..
        }
    )));
}

