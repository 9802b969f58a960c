//! Box-drawing rendering of component trees.

use rgc_core::ComponentTree;

/// One line per node. Roots are unindented; descendants hang off `├──`/`└──`.
pub fn render_trees(trees: &[ComponentTree]) -> Vec<String> {
    let mut lines = Vec::new();
    for tree in trees {
        lines.push(label(tree));

        // (node, prefix, is last sibling); an explicit stack keeps long
        // chains off the thread stack.
        let mut pending: Vec<(&ComponentTree, String, bool)> = Vec::new();
        push_children(&mut pending, tree, "");
        while let Some((node, prefix, last)) = pending.pop() {
            let branch = if last { "└── " } else { "├── " };
            lines.push(format!("{}{}{}", prefix, branch, label(node)));

            let next = format!("{}{}", prefix, if last { "    " } else { "│   " });
            push_children(&mut pending, node, &next);
        }
    }
    lines
}

/// `A → B → A` for a cycle `[A, B]`.
pub fn render_cycle(cycle: &[String]) -> String {
    let mut names: Vec<&str> = cycle.iter().map(String::as_str).collect();
    if let Some(first) = cycle.first() {
        names.push(first);
    }
    names.join(" → ")
}

fn push_children<'a>(
    pending: &mut Vec<(&'a ComponentTree, String, bool)>,
    tree: &'a ComponentTree,
    prefix: &str,
) {
    let count = tree.children.len();
    for (idx, child) in tree.children.iter().enumerate().rev() {
        pending.push((child, prefix.to_string(), idx + 1 == count));
    }
}

fn label(tree: &ComponentTree) -> String {
    if tree.truncated {
        format!("{} ({}) ↺", tree.name, tree.path)
    } else {
        format!("{} ({})", tree.name, tree.path)
    }
}
