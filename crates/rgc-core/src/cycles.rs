//! Orphaned cycle detection using Tarjan's algorithm.
//!
//! Components that only reference each other all have incoming edges, so
//! none of them is a root and the classification never shows them. The same
//! holds for anything those groups render. This module finds every cycle
//! that no root reaches, plus the cycles nothing else leads into, so the
//! whole unreachable part of the forest can be reported.
//! Time complexity: O(V + E), space complexity: O(V).

use crate::graph::{Forest, NodeId};

/// Unreachable cycles found by [`OrphanedCycleDetector::detect`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrphanedCycles {
    /// Every cycle of two or more components that no root reaches. Names
    /// are sorted within each cycle and cycles among themselves.
    pub cycles: Vec<Vec<String>>,
    /// The alphabetically first member of each orphaned cycle that has no
    /// incoming edge from outside itself, in name order. Every component
    /// unreachable from a root is reachable from one of these.
    pub entry_points: Vec<NodeId>,
}

/// Finds strongly connected components with no way in from a root.
pub struct OrphanedCycleDetector<'a> {
    forest: &'a Forest,
    index_counter: usize,
    stack: Vec<NodeId>,
    indices: Vec<Option<usize>>,
    low_links: Vec<usize>,
    on_stack: Vec<bool>,
    sccs: Vec<Vec<NodeId>>,
}

impl<'a> OrphanedCycleDetector<'a> {
    pub fn new(forest: &'a Forest) -> Self {
        let len = forest.len();
        Self {
            forest,
            index_counter: 0,
            stack: Vec::new(),
            indices: vec![None; len],
            low_links: vec![0; len],
            on_stack: vec![false; len],
            sccs: Vec::new(),
        }
    }

    /// Cycles of two or more components that no root reaches.
    pub fn find_cycles(self) -> Vec<Vec<String>> {
        self.detect().cycles
    }

    /// Orphaned cycles and the entry points covering everything below them.
    pub fn detect(mut self) -> OrphanedCycles {
        for id in 0..self.forest.len() {
            if self.indices[id].is_none() {
                self.strongconnect(id);
            }
        }

        let forest = self.forest;
        let reachable = reachable_from_roots(forest);
        let mut orphans = OrphanedCycles::default();
        let mut entries: Vec<(String, NodeId)> = Vec::new();

        for scc in self.sccs.iter().filter(|scc| scc.len() > 1) {
            // Members of one SCC are all reachable or all unreachable.
            if scc.iter().any(|&member| reachable[member]) {
                continue;
            }

            let mut members: Vec<(&str, NodeId)> = scc
                .iter()
                .filter_map(|&id| forest.node(id).map(|node| (node.name(), id)))
                .collect();
            members.sort();

            let closed = scc.iter().all(|&member| {
                forest
                    .node(member)
                    .is_some_and(|node| node.incoming().iter().all(|from| scc.contains(from)))
            });
            if let (true, Some(&(name, id))) = (closed, members.first()) {
                entries.push((name.to_string(), id));
            }

            orphans
                .cycles
                .push(members.iter().map(|(name, _)| name.to_string()).collect());
        }

        orphans.cycles.sort();
        entries.sort();
        orphans.entry_points = entries.into_iter().map(|(_, id)| id).collect();
        orphans
    }

    /// Iterative strongconnect; an explicit call stack keeps deep component
    /// chains off the thread stack.
    fn strongconnect(&mut self, start: NodeId) {
        let forest = self.forest;
        let mut calls: Vec<(NodeId, usize)> = Vec::new();
        self.enter(start);
        calls.push((start, 0));

        while let Some(frame) = calls.last_mut() {
            let (v, next) = *frame;
            let children = forest
                .node(v)
                .map(|node| node.children())
                .unwrap_or(&[]);

            if let Some(&w) = children.get(next) {
                frame.1 += 1;
                match self.indices[w] {
                    None => {
                        self.enter(w);
                        calls.push((w, 0));
                    }
                    Some(w_index) if self.on_stack[w] => {
                        self.low_links[v] = self.low_links[v].min(w_index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            calls.pop();
            if let Some(&(parent, _)) = calls.last() {
                self.low_links[parent] = self.low_links[parent].min(self.low_links[v]);
            }

            // Found SCC root
            if Some(self.low_links[v]) == self.indices[v] {
                let mut scc = Vec::new();
                while let Some(w) = self.stack.pop() {
                    self.on_stack[w] = false;
                    scc.push(w);
                    if w == v {
                        break;
                    }
                }
                self.sccs.push(scc);
            }
        }
    }

    fn enter(&mut self, v: NodeId) {
        self.indices[v] = Some(self.index_counter);
        self.low_links[v] = self.index_counter;
        self.index_counter += 1;
        self.stack.push(v);
        self.on_stack[v] = true;
    }
}

fn reachable_from_roots(forest: &Forest) -> Vec<bool> {
    let mut reachable = vec![false; forest.len()];
    let mut pending: Vec<NodeId> = forest.roots().to_vec();
    for &root in &pending {
        reachable[root] = true;
    }
    while let Some(id) = pending.pop() {
        let Some(node) = forest.node(id) else {
            continue;
        };
        for &child in node.children() {
            if !reachable[child] {
                reachable[child] = true;
                pending.push(child);
            }
        }
    }
    reachable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::ForestBuilder;
    use crate::registry::Registry;
    use crate::types::ComponentDef;

    fn forest(names: &[&str], edges: &[(&str, &str)]) -> Forest {
        let registry =
            Registry::from_defs(names.iter().map(|n| ComponentDef::new(*n, format!("{n}.tsx"))));
        let mut builder = ForestBuilder::new(&registry);
        for (from, to) in edges {
            builder.link(from, to);
        }
        builder.finish()
    }

    #[test]
    fn test_mutual_pair_is_orphaned() {
        let forest = forest(&["A", "B"], &[("A", "B"), ("B", "A")]);
        let cycles = OrphanedCycleDetector::new(&forest).find_cycles();

        assert_eq!(cycles, vec![vec!["A".to_string(), "B".to_string()]]);
    }

    #[test]
    fn test_cycle_reachable_from_root_is_not_orphaned() {
        let forest = forest(&["App", "A", "B"], &[("App", "A"), ("A", "B"), ("B", "A")]);
        let cycles = OrphanedCycleDetector::new(&forest).find_cycles();

        assert!(cycles.is_empty());
    }

    #[test]
    fn test_no_cycles() {
        // A → B → C (linear)
        let forest = forest(&["A", "B", "C"], &[("A", "B"), ("B", "C")]);
        assert!(OrphanedCycleDetector::new(&forest).find_cycles().is_empty());
    }

    #[test]
    fn test_multiple_cycles_sorted() {
        let forest = forest(
            &["D", "C", "B", "A", "E"],
            &[("D", "C"), ("C", "D"), ("A", "B"), ("B", "E"), ("E", "A")],
        );
        let cycles = OrphanedCycleDetector::new(&forest).find_cycles();

        assert_eq!(cycles.len(), 2);
        assert_eq!(cycles[0], vec!["A", "B", "E"]);
        assert_eq!(cycles[1], vec!["C", "D"]);
    }

    #[test]
    fn test_cycle_below_orphaned_cycle_is_reported() {
        // A <-> B renders C <-> D and a plain Leaf; App stands alone.
        let forest = forest(
            &["App", "A", "B", "C", "D", "Leaf"],
            &[
                ("A", "B"),
                ("B", "A"),
                ("B", "C"),
                ("C", "D"),
                ("D", "C"),
                ("A", "Leaf"),
            ],
        );
        let orphans = OrphanedCycleDetector::new(&forest).detect();

        assert_eq!(
            orphans.cycles,
            vec![vec!["A".to_string(), "B".to_string()], vec!["C".to_string(), "D".to_string()]]
        );
        assert_eq!(orphans.entry_points, vec![forest.id_of("A").unwrap()]);
    }

    #[test]
    fn test_cycle_reachable_through_another_root_path() {
        // App reaches C <-> D only through B; A <-> B is not reachable.
        let forest = forest(
            &["App", "A", "B", "C", "D"],
            &[("A", "B"), ("B", "A"), ("B", "C"), ("C", "D"), ("D", "C"), ("App", "C")],
        );
        let orphans = OrphanedCycleDetector::new(&forest).detect();

        assert_eq!(orphans.cycles, vec![vec!["A".to_string(), "B".to_string()]]);
        assert_eq!(orphans.entry_points, vec![forest.id_of("A").unwrap()]);
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let names: Vec<String> = (0..20_000).map(|i| format!("C{i}")).collect();
        let registry = Registry::from_defs(names.iter().map(|n| ComponentDef::new(n, "x.tsx")));
        let mut builder = ForestBuilder::new(&registry);
        for pair in names.windows(2) {
            builder.link(&pair[0], &pair[1]);
        }
        let forest = builder.finish();

        assert!(OrphanedCycleDetector::new(&forest).find_cycles().is_empty());
    }
}
