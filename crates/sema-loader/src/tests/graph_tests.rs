use super::*;

#[test]
fn diamond_dependency_has_no_cycles() {
    // App -> UI, App -> Core, UI -> Utils, Core -> Utils
    let mut g = DependencyGraph::new();
    g.add_edge("App", "UI");
    g.add_edge("App", "Core");
    g.add_edge("UI", "Utils");
    g.add_edge("Core", "Utils");

    assert!(g.detect_cycles().is_empty());
    let order = g.topological_sort().unwrap();
    assert_eq!(order.last().unwrap(), "App");
    assert_eq!(order.first().unwrap(), "Utils");

    let deps = g.transitive_dependencies("App");
    assert_eq!(
        deps,
        ["UI", "Core", "Utils"].into_iter().map(String::from).collect()
    );
}

#[test]
fn three_cycle_is_detected_and_sort_fails() {
    let mut g = DependencyGraph::new();
    g.add_edge("A", "B");
    g.add_edge("B", "C");
    g.add_edge("C", "A");

    let cycles = g.detect_cycles();
    assert!(!cycles.is_empty());
    let elements: std::collections::HashSet<_> = cycles[0].iter().cloned().collect();
    let expected: std::collections::HashSet<_> =
        ["A", "B", "C"].into_iter().map(String::from).collect();
    assert!(expected.is_subset(&elements));

    assert!(g.topological_sort().is_err());
}

#[test]
fn empty_graph_sorts_to_empty() {
    let mut g = DependencyGraph::new();
    assert_eq!(g.topological_sort().unwrap(), Vec::<String>::new());
}

#[test]
fn single_node_no_edges() {
    let mut g = DependencyGraph::new();
    g.add_node("solo");
    assert_eq!(g.topological_sort().unwrap(), vec!["solo".to_string()]);
}

#[test]
fn self_loop_is_a_length_one_cycle() {
    let mut g = DependencyGraph::new();
    g.add_edge("a", "a");
    let cycles = g.detect_cycles();
    assert_eq!(cycles.len(), 1);
    assert!(g.topological_sort().is_err());
}

#[test]
fn forward_and_reverse_edges_stay_symmetric() {
    let mut g = DependencyGraph::new();
    g.add_edge("a", "b");
    g.add_edge("a", "c");
    assert!(g.reverse["b"].contains(&"a".to_string()));
    assert!(g.reverse["c"].contains(&"a".to_string()));
}

#[test]
fn detect_cycles_is_idempotent() {
    let mut g = DependencyGraph::new();
    g.add_edge("A", "B");
    g.add_edge("B", "A");
    let first: std::collections::HashSet<Vec<String>> = g.detect_cycles().into_iter().collect();
    let second: std::collections::HashSet<Vec<String>> = g.detect_cycles().into_iter().collect();
    assert_eq!(first.len(), second.len());
}

#[test]
fn topological_sort_places_dependencies_before_dependents() {
    let mut g = DependencyGraph::new();
    g.add_edge("App", "UI");
    g.add_edge("App", "Core");
    g.add_edge("UI", "Utils");
    g.add_edge("Core", "Utils");
    let order = g.topological_sort().unwrap();
    let pos = |n: &str| order.iter().position(|x| x == n).unwrap();
    assert!(pos("Utils") < pos("UI"));
    assert!(pos("Utils") < pos("Core"));
    assert!(pos("UI") < pos("App"));
    assert!(pos("Core") < pos("App"));
}
