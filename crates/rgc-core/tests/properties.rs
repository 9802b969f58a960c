//! Property tests for registry, forest and classification invariants.

use proptest::prelude::*;
use rgc_core::{
    classify, export_orphans, ClassificationResult, ComponentExtractor, ComponentTree, Forest, ForestBuilder,
    OrphanedCycleDetector, PatternExtractor, Registry, RegistryBuilder, TraversalKey,
};
use std::collections::HashSet;

/// A synthetic project: file `i` defines `C{defines[i]}` and renders the
/// listed component tags.
#[derive(Debug, Clone)]
struct Project {
    files: Vec<(usize, Vec<usize>)>,
}

impl Project {
    fn sources(&self) -> Vec<(String, String)> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, (defines, renders))| {
                let tags: String = renders.iter().map(|r| format!("<C{r} />")).collect();
                (
                    format!("src/f{i}.tsx"),
                    format!("export function C{defines}() {{\n  return <>{tags}</>;\n}}\n"),
                )
            })
            .collect()
    }
}

fn project() -> impl Strategy<Value = Project> {
    (1usize..12).prop_flat_map(|n| {
        prop::collection::vec((0..n, prop::collection::vec(0..n, 0..4)), n)
            .prop_map(|files| Project { files })
    })
}

fn build(sources: &[(String, String)], order: &[usize]) -> (Registry, Forest) {
    let extractor = PatternExtractor::new().unwrap();
    let mut builder = RegistryBuilder::new();
    for &i in order {
        let (path, text) = &sources[i];
        builder.submit(
            TraversalKey::root().child(i as u32),
            path.clone(),
            extractor.definitions(path, text),
        );
    }
    let (registry, _) = builder.build();

    let mut forest = ForestBuilder::new(&registry);
    for def in registry.iter() {
        let text = &sources
            .iter()
            .find(|(path, _)| *path == def.path)
            .unwrap()
            .1;
        forest.link_all(&def.name, &extractor.references(text));
    }
    (registry, forest.finish())
}

fn run(project: &Project) -> (Registry, Forest, ClassificationResult) {
    let sources = project.sources();
    let order: Vec<usize> = (0..sources.len()).collect();
    let (registry, forest) = build(&sources, &order);
    let result = classify(&forest).unwrap();
    (registry, forest, result)
}

fn collect_names<'a>(tree: &'a ComponentTree, out: &mut Vec<&'a str>) {
    out.push(&tree.name);
    for child in &tree.children {
        collect_names(child, out);
    }
}

proptest! {
    #[test]
    fn forest_names_match_registry(project in project()) {
        let (registry, forest, result) = run(&project);

        let mut seen = HashSet::new();
        for (_, node) in forest.nodes() {
            prop_assert!(seen.insert(node.name().to_string()));
            prop_assert_eq!(registry.get(node.name()), Some(node.def()));
        }
        prop_assert_eq!(seen.len(), registry.len());

        let mut exported = Vec::new();
        for tree in result.used.iter().chain(&result.unused) {
            collect_names(tree, &mut exported);
        }
        for name in exported {
            prop_assert!(registry.contains(name));
        }
    }

    #[test]
    fn roots_partition_registry(project in project()) {
        let (registry, forest, result) = run(&project);

        for def in registry.iter() {
            let id = forest.id_of(&def.name).unwrap();
            let referenced = !forest.node(id).unwrap().incoming().is_empty();
            prop_assert!(forest.is_root(id) != referenced);
        }
        prop_assert_eq!(result.used_count + result.unused_count, forest.roots().len());
    }

    #[test]
    fn classification_is_idempotent(project in project()) {
        let (_, _, first) = run(&project);
        let (_, _, second) = run(&project);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn submission_order_does_not_matter(project in project(), seed in any::<u64>()) {
        let sources = project.sources();
        let forward: Vec<usize> = (0..sources.len()).collect();
        let mut shuffled = forward.clone();
        // Deterministic Fisher-Yates driven by the seed.
        let mut state = seed | 1;
        for i in (1..shuffled.len()).rev() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            shuffled.swap(i, (state % (i as u64 + 1)) as usize);
        }

        let (first, _) = build(&sources, &forward);
        let (second, _) = build(&sources, &shuffled);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn export_depth_is_bounded(project in project()) {
        let (registry, forest, result) = run(&project);

        for tree in result.used.iter().chain(&result.unused) {
            prop_assert!(tree.depth() <= registry.len() + 1);
            prop_assert!(tree.size() <= forest.edge_count() + 1);
        }
        // Every orphaned cycle member is outside the classified forest.
        for cycle in OrphanedCycleDetector::new(&forest).find_cycles() {
            for name in cycle {
                let id = forest.id_of(&name).unwrap();
                prop_assert!(!forest.is_root(id));
            }
        }
    }
}

proptest! {
    #[test]
    fn every_component_is_reported(project in project()) {
        let (registry, forest, result) = run(&project);
        let entry_points = OrphanedCycleDetector::new(&forest).detect().entry_points;
        let orphaned = export_orphans(&forest, &entry_points).unwrap();

        let mut names = Vec::new();
        for tree in result.used.iter().chain(&result.unused).chain(&orphaned) {
            collect_names(tree, &mut names);
        }
        let reported: HashSet<&str> = names.into_iter().collect();
        let registered: HashSet<&str> = registry.iter().map(|d| d.name.as_str()).collect();
        prop_assert_eq!(reported, registered);
    }
}

#[test]
fn mutual_references_terminate() {
    let project = Project {
        files: vec![(0, vec![1]), (1, vec![0])],
    };
    let (_, forest, result) = run(&project);

    assert_eq!(result.used_count + result.unused_count, 0);
    assert_eq!(
        OrphanedCycleDetector::new(&forest).find_cycles(),
        vec![vec!["C0".to_string(), "C1".to_string()]]
    );
}
