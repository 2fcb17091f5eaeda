use super::*;
use sema_hir::fixtures::{import, module, FixtureParser};
use sema_hir::NodeIdGenerator;

fn mem_fs_for(paths: &[&str]) -> crate::filesystem::MemoryFileSystem {
    let mut fs = crate::filesystem::MemoryFileSystem::new();
    for p in paths {
        fs = fs.with_file(format!("root/{p}.src"), "");
    }
    fs
}

#[test]
fn diamond_dependency_resolves_with_no_cycles() {
    let ids = NodeIdGenerator::new();
    let parser = FixtureParser::new()
        .with_module(
            "App",
            module("App", vec![import("UI", "App", &ids), import("Core", "App", &ids)], vec![], vec![]),
        )
        .with_module("UI", module("UI", vec![import("Utils", "UI", &ids)], vec![], vec![]))
        .with_module("Core", module("Core", vec![import("Utils", "Core", &ids)], vec![], vec![]))
        .with_module("Utils", module("Utils", vec![], vec![], vec![]));

    let fs = mem_fs_for(&["App", "UI", "Core", "Utils"]);
    let mut loader = ModuleLoader::new(parser, fs);
    loader.add_search_path("root");

    let result = loader.resolve_modules(&["App".to_string()]);
    assert!(result.cycles.is_empty(), "unexpected cycles: {:?}", result.cycles);
    assert_eq!(result.load_order.last().unwrap(), "App");
    assert_eq!(result.load_order.first().unwrap(), "Utils");
    assert!(loader.get_module("App").unwrap().is_loaded());

    let deps = loader.get_transitive_dependencies("App");
    assert_eq!(deps.len(), 3);
}

#[test]
fn cycle_across_three_modules_is_reported() {
    let ids = NodeIdGenerator::new();
    let parser = FixtureParser::new()
        .with_module("A", module("A", vec![import("B", "A", &ids)], vec![], vec![]))
        .with_module("B", module("B", vec![import("C", "B", &ids)], vec![], vec![]))
        .with_module("C", module("C", vec![import("A", "C", &ids)], vec![], vec![]));

    let fs = mem_fs_for(&["A", "B", "C"]);
    let mut loader = ModuleLoader::new(parser, fs);
    loader.add_search_path("root");

    let result = loader.resolve_modules(&["A".to_string()]);
    assert!(result.load_order.is_empty());
    assert!(!result.cycles.is_empty());
    assert!(!result.diagnostics.is_empty());
}

#[test]
fn missing_module_reports_module_not_found() {
    let parser = FixtureParser::new();
    let fs = crate::filesystem::MemoryFileSystem::new();
    let mut loader = ModuleLoader::new(parser, fs);
    loader.add_search_path("root");

    let err = loader.load_module("ghost").unwrap_err();
    assert!(matches!(err, LoaderError::ModuleNotFound { .. }));
}

#[test]
fn independent_subtree_still_loads_after_sibling_failure() {
    let ids = NodeIdGenerator::new();
    let parser = FixtureParser::new()
        .with_module(
            "Root",
            module(
                "Root",
                vec![import("Broken", "Root", &ids), import("Fine", "Root", &ids)],
                vec![],
                vec![],
            ),
        )
        .with_module("Fine", module("Fine", vec![], vec![], vec![]));
    // "Broken" has no fixture registered, so it becomes a parse failure, not
    // a missing file (its file does exist).
    let fs = mem_fs_for(&["Root", "Broken", "Fine"]);
    let mut loader = ModuleLoader::new(parser, fs);
    loader.add_search_path("root");

    let _ = loader.load_module("Root");
    assert!(loader.get_module("Fine").unwrap().is_loaded());
    assert_eq!(
        loader.get_module("Root").unwrap().status,
        crate::module::ModuleStatus::Error
    );
}
