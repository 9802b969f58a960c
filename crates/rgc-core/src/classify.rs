//! Root classification and cycle-safe export of the forest.

use crate::error::{Error, Result};
use crate::graph::{Forest, NodeId};
use crate::types::{ClassificationResult, ComponentTree};

/// Split the forest roots into used and unused.
///
/// A root is used iff it composes at least one other component. Roots have
/// no incoming edges by definition, so being referenced never applies.
pub fn classify(forest: &Forest) -> Result<ClassificationResult> {
    let mut result = ClassificationResult::default();

    for &root in forest.roots() {
        let node = forest.node(root).ok_or_else(|| dangling(root))?;
        let tree = export_tree(forest, root)?;
        if node.children().is_empty() {
            result.unused.push(tree);
        } else {
            result.used.push(tree);
        }
    }

    result.used_count = result.used.len();
    result.unused_count = result.unused.len();
    Ok(result)
}

/// Export the subtree under `root`.
///
/// Each component is expanded at its first occurrence only. Meeting it again
/// anywhere in the same tree, whether through a cycle or a shared child,
/// emits a `truncated` leaf. Expanded nodes are therefore bounded by the
/// forest size and the whole tree by its edge count.
pub fn export_tree(forest: &Forest, root: NodeId) -> Result<ComponentTree> {
    let mut visited = vec![false; forest.len()];
    let mut stack = vec![open(forest, root, &mut visited)?];

    // Explicit frames keep long component chains off the thread stack.
    while let Some(frame) = stack.last_mut() {
        if let Some(&child) = frame.children.get(frame.next) {
            frame.next += 1;
            let node = forest.node(child).ok_or_else(|| dangling(child))?;
            if visited[child] {
                frame.tree.children.push(leaf(node.name(), node.path(), true));
            } else {
                let opened = open(forest, child, &mut visited)?;
                stack.push(opened);
            }
            continue;
        }

        let Some(done) = stack.pop() else { break };
        match stack.last_mut() {
            Some(parent) => parent.tree.children.push(done.tree),
            None => return Ok(done.tree),
        }
    }

    Err(dangling(root))
}

/// Export the components no root reaches, one tree per entry point.
///
/// `entry_points` comes from
/// [`OrphanedCycleDetector::detect`](crate::OrphanedCycleDetector::detect).
pub fn export_orphans(forest: &Forest, entry_points: &[NodeId]) -> Result<Vec<ComponentTree>> {
    entry_points
        .iter()
        .map(|&id| export_tree(forest, id))
        .collect()
}

struct Frame<'a> {
    tree: ComponentTree,
    children: &'a [NodeId],
    next: usize,
}

fn open<'a>(forest: &'a Forest, id: NodeId, visited: &mut [bool]) -> Result<Frame<'a>> {
    let node = forest.node(id).ok_or_else(|| dangling(id))?;
    visited[id] = true;
    Ok(Frame {
        tree: leaf(node.name(), node.path(), false),
        children: node.children(),
        next: 0,
    })
}

fn leaf(name: &str, path: &str, truncated: bool) -> ComponentTree {
    ComponentTree {
        name: name.to_string(),
        path: path.to_string(),
        children: Vec::new(),
        truncated,
    }
}

fn dangling(id: NodeId) -> Error {
    Error::Serialization {
        message: format!("node {id} is not part of the forest"),
    }
}
