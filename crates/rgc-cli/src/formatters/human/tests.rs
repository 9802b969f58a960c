//! Tests for human formatter rendering.

use super::*;
use rgc_core::ComponentTree;

fn node(name: &str, children: Vec<ComponentTree>) -> ComponentTree {
    ComponentTree {
        name: name.to_string(),
        path: format!("src/{}.tsx", name),
        children,
        truncated: false,
    }
}

#[test]
fn test_render_nested_tree() {
    let tree = node(
        "App",
        vec![
            node("Layout", vec![node("Nav", vec![])]),
            node("Footer", vec![]),
        ],
    );

    let lines = render_trees(&[tree]);
    assert_eq!(
        lines,
        vec![
            "App (src/App.tsx)",
            "├── Layout (src/Layout.tsx)",
            "│   └── Nav (src/Nav.tsx)",
            "└── Footer (src/Footer.tsx)",
        ]
    );
}

#[test]
fn test_render_marks_truncated_nodes() {
    let mut back = node("App", vec![]);
    back.truncated = true;
    let tree = node("App", vec![node("Modal", vec![back])]);

    let lines = render_trees(&[tree]);
    assert_eq!(lines[2], "    └── App (src/App.tsx) ↺");
}

#[test]
fn test_render_multiple_roots() {
    let lines = render_trees(&[node("A", vec![]), node("B", vec![])]);
    assert_eq!(lines, vec!["A (src/A.tsx)", "B (src/B.tsx)"]);
    assert!(render_trees(&[]).is_empty());
}

#[test]
fn test_render_long_chain() {
    let depth = 3_000;
    let mut tree = node(&format!("C{}", depth - 1), vec![]);
    for i in (0..depth - 1).rev() {
        tree = node(&format!("C{i}"), vec![tree]);
    }

    let lines = render_trees(&[tree]);

    assert_eq!(lines.len(), depth);
    assert_eq!(lines[0], "C0 (src/C0.tsx)");
    let last = &lines[depth - 1];
    assert!(last.ends_with("└── C2999 (src/C2999.tsx)"));
    assert_eq!(last.len() - "└── C2999 (src/C2999.tsx)".len(), 4 * (depth - 2));
}

#[test]
fn test_render_cycle_closes_loop() {
    let cycle = vec!["A".to_string(), "B".to_string()];
    assert_eq!(render_cycle(&cycle), "A → B → A");
    assert_eq!(render_cycle(&[]), "");
}

#[test]
fn test_group_warnings_by_kind() {
    let warnings = vec![
        AnalysisWarning::new(WarningKind::FileTooLarge, "big.js", "2000000 bytes"),
        AnalysisWarning::new(WarningKind::ListingFailed, "src/a", "timeout"),
        AnalysisWarning::new(WarningKind::FileTooLarge, "huge.js", "3000000 bytes"),
    ];

    let grouped = group_warnings(&warnings);
    assert_eq!(grouped.len(), 2);
    let large: Vec<&str> = grouped[&WarningKind::FileTooLarge]
        .iter()
        .map(|w| w.path.as_str())
        .collect();
    assert_eq!(large, vec!["big.js", "huge.js"]);
}
