//! The dependency graph: edges between module paths, cycle detection, and
//! the topological load order.

use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::BinaryHeap;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

#[derive(Debug, Default)]
pub struct DependencyGraph {
    pub forward: FxHashMap<String, Vec<String>>,
    pub reverse: FxHashMap<String, Vec<String>>,
    pub load_order: Vec<String>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, path: &str) {
        self.forward.entry(path.to_string()).or_default();
        self.reverse.entry(path.to_string()).or_default();
    }

    /// Adds the edge `from -> to` ("from depends on to"). Maintains the
    /// forward/reverse symmetry invariant.
    pub fn add_edge(&mut self, from: &str, to: &str) {
        self.add_node(from);
        self.add_node(to);
        let fwd = self.forward.get_mut(from).unwrap();
        if !fwd.contains(&to.to_string()) {
            fwd.push(to.to_string());
        }
        let rev = self.reverse.get_mut(to).unwrap();
        if !rev.contains(&from.to_string()) {
            rev.push(from.to_string());
        }
    }

    /// Depth-first white/gray/black traversal that reports every cycle
    /// encountered in one pass, reconstructed from the active DFS path
    /// between the two endpoints of each gray→gray edge.
    pub fn detect_cycles(&self) -> Vec<Vec<String>> {
        let mut colors: FxHashMap<&str, Color> = self
            .forward
            .keys()
            .map(|k| (k.as_str(), Color::White))
            .collect();
        let mut stack: Vec<&str> = Vec::new();
        let mut cycles = Vec::new();

        let mut nodes: Vec<&str> = self.forward.keys().map(|s| s.as_str()).collect();
        nodes.sort_unstable();

        for start in nodes {
            if colors[start] == Color::White {
                self.visit(start, &mut colors, &mut stack, &mut cycles);
            }
        }
        cycles
    }

    fn visit<'a>(
        &'a self,
        node: &'a str,
        colors: &mut FxHashMap<&'a str, Color>,
        stack: &mut Vec<&'a str>,
        cycles: &mut Vec<Vec<String>>,
    ) {
        colors.insert(node, Color::Gray);
        stack.push(node);

        if let Some(deps) = self.forward.get(node) {
            let mut deps: Vec<&str> = deps.iter().map(|s| s.as_str()).collect();
            deps.sort_unstable();
            for dep in deps {
                match colors.get(dep).copied().unwrap_or(Color::White) {
                    Color::White => self.visit(dep, colors, stack, cycles),
                    Color::Gray => {
                        // Found a back edge into the active path: reconstruct
                        // the cycle from where `dep` sits on the stack.
                        let start_idx = stack.iter().position(|&n| n == dep).unwrap_or(0);
                        let mut cycle: Vec<String> =
                            stack[start_idx..].iter().map(|s| s.to_string()).collect();
                        cycle.push(dep.to_string());
                        cycles.push(cycle);
                    }
                    Color::Black => {}
                }
            }
        }

        stack.pop();
        colors.insert(node, Color::Black);
    }

    /// Kahn's algorithm. Ties among nodes with no remaining incoming edges
    /// are broken by lexicographic path order for determinism. Only call
    /// after `detect_cycles` reports none.
    pub fn topological_sort(&mut self) -> Result<Vec<String>, Vec<Vec<String>>> {
        let cycles = self.detect_cycles();
        if !cycles.is_empty() {
            return Err(cycles);
        }

        // A node is ready once every module it depends on has been emitted.
        let mut remaining_deps: FxHashMap<&str, FxHashSet<&str>> = self
            .forward
            .iter()
            .map(|(k, v)| (k.as_str(), v.iter().map(|s| s.as_str()).collect()))
            .collect();

        let mut ready: BinaryHeap<std::cmp::Reverse<&str>> = remaining_deps
            .iter()
            .filter(|(_, deps)| deps.is_empty())
            .map(|(k, _)| std::cmp::Reverse(*k))
            .collect();

        let mut order = Vec::with_capacity(self.forward.len());
        let mut emitted: FxHashSet<&str> = FxHashSet::default();

        while let Some(std::cmp::Reverse(node)) = ready.pop() {
            if emitted.contains(node) {
                continue;
            }
            emitted.insert(node);
            order.push(node.to_string());

            if let Some(dependents) = self.reverse.get(node) {
                let mut newly_ready: Vec<&str> = Vec::new();
                for dependent in dependents {
                    if let Some(deps) = remaining_deps.get_mut(dependent.as_str()) {
                        deps.remove(node);
                        if deps.is_empty() && !emitted.contains(dependent.as_str()) {
                            newly_ready.push(dependent.as_str());
                        }
                    }
                }
                for n in newly_ready {
                    ready.push(std::cmp::Reverse(n));
                }
            }
        }

        self.load_order = order.clone();
        Ok(order)
    }

    /// All modules reachable from `path` by following forward edges,
    /// excluding `path` itself. Order is stable but otherwise unspecified.
    pub fn transitive_dependencies(&self, path: &str) -> FxHashSet<String> {
        let mut visited = FxHashSet::default();
        let mut stack = VecDeque::new();
        if let Some(deps) = self.forward.get(path) {
            stack.extend(deps.iter().cloned());
        }
        while let Some(node) = stack.pop_front() {
            if visited.insert(node.clone()) {
                if let Some(deps) = self.forward.get(&node) {
                    stack.extend(deps.iter().cloned());
                }
            }
        }
        visited
    }
}

#[cfg(test)]
#[path = "tests/graph_tests.rs"]
mod tests;
