//! Name-keyed registry of component definitions.
//!
//! Candidates may arrive in any order from concurrent workers. The builder
//! buffers them by [`TraversalKey`] and only resolves name collisions in
//! [`RegistryBuilder::build`], so the surviving definition never depends on
//! which fetch finished first.

use crate::types::{ComponentCandidate, ComponentDef, TraversalKey};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

/// Immutable mapping `name -> ComponentDef`.
///
/// Iteration is sorted by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    entries: BTreeMap<String, ComponentDef>,
}

impl Registry {
    /// Build a registry directly from definitions; the first definition of
    /// each name wins.
    pub fn from_defs(defs: impl IntoIterator<Item = ComponentDef>) -> Self {
        let mut entries = BTreeMap::new();
        for def in defs {
            entries.entry(def.name.clone()).or_insert(def);
        }
        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<&ComponentDef> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Definitions in name order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentDef> {
        self.entries.values()
    }

    /// Registered names grouped by defining file, both sorted.
    pub fn by_path(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut grouped: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for def in self.entries.values() {
            grouped
                .entry(def.path.as_str())
                .or_default()
                .push(def.name.as_str());
        }
        grouped
    }
}

/// A definition that lost a name collision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shadowed {
    pub name: String,
    /// File whose definition was kept.
    pub kept: String,
    /// File whose definition was dropped.
    pub dropped: String,
}

/// Collects per-file candidates and resolves them deterministically.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    files: BTreeMap<TraversalKey, (String, Vec<ComponentCandidate>)>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the candidates of the file at traversal position `key`.
    ///
    /// Submitting the same key twice replaces the earlier batch.
    pub fn submit(
        &mut self,
        key: TraversalKey,
        path: impl Into<String>,
        candidates: Vec<ComponentCandidate>,
    ) {
        if candidates.is_empty() {
            return;
        }
        self.files.insert(key, (path.into(), candidates));
    }

    /// Number of files with at least one candidate.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    /// Resolve all candidates into a frozen registry.
    ///
    /// Exported candidates of every file are applied first, in traversal
    /// order, then top-level function fallbacks in traversal order. Within
    /// each pass the first definition of a name wins.
    pub fn build(self) -> (Registry, Vec<Shadowed>) {
        let mut entries: BTreeMap<String, ComponentDef> = BTreeMap::new();
        let mut shadowed = Vec::new();

        for exported_pass in [true, false] {
            for (path, candidates) in self.files.values() {
                let selected = candidates
                    .iter()
                    .filter(|c| c.rule.is_exported() == exported_pass);
                for candidate in selected {
                    match entries.entry(candidate.name.clone()) {
                        Entry::Vacant(slot) => {
                            slot.insert(ComponentDef::new(&candidate.name, path));
                        }
                        Entry::Occupied(existing) => {
                            // Fallbacks are only registered for unknown names;
                            // losing to a known one is not a collision.
                            if exported_pass && existing.get().path != *path {
                                shadowed.push(Shadowed {
                                    name: candidate.name.clone(),
                                    kept: existing.get().path.clone(),
                                    dropped: path.clone(),
                                });
                            }
                        }
                    }
                }
            }
        }

        (Registry { entries }, shadowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DetectionRule;

    fn exported(name: &str) -> ComponentCandidate {
        ComponentCandidate {
            name: name.to_string(),
            rule: DetectionRule::ExportedDeclaration,
        }
    }

    fn fallback(name: &str) -> ComponentCandidate {
        ComponentCandidate {
            name: name.to_string(),
            rule: DetectionRule::TopLevelFunction,
        }
    }

    #[test]
    fn test_first_in_traversal_order_wins() {
        let root = TraversalKey::root();
        let mut builder = RegistryBuilder::new();
        // Submitted out of order, as concurrent workers would.
        builder.submit(root.child(1), "lib/Card.tsx", vec![exported("Card")]);
        builder.submit(root.child(0).child(4), "src/Card.tsx", vec![exported("Card")]);

        let (registry, shadowed) = builder.build();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("Card").unwrap().path, "src/Card.tsx");
        assert_eq!(
            shadowed,
            vec![Shadowed {
                name: "Card".to_string(),
                kept: "src/Card.tsx".to_string(),
                dropped: "lib/Card.tsx".to_string(),
            }]
        );
    }

    #[test]
    fn test_exports_beat_earlier_fallbacks() {
        let root = TraversalKey::root();
        let mut builder = RegistryBuilder::new();
        builder.submit(root.child(0), "a/util.js", vec![fallback("Modal")]);
        builder.submit(root.child(1), "b/Modal.jsx", vec![exported("Modal")]);

        let (registry, shadowed) = builder.build();

        assert_eq!(registry.get("Modal").unwrap().path, "b/Modal.jsx");
        assert!(shadowed.is_empty());
    }

    #[test]
    fn test_fallback_registers_unknown_names() {
        let mut builder = RegistryBuilder::new();
        builder.submit(
            TraversalKey::root().child(0),
            "legacy.js",
            vec![fallback("Legacy")],
        );

        let (registry, _) = builder.build();
        assert!(registry.contains("Legacy"));
    }

    #[test]
    fn test_by_path_groups_names() {
        let registry = Registry::from_defs([
            ComponentDef::new("B", "shared.tsx"),
            ComponentDef::new("A", "shared.tsx"),
            ComponentDef::new("C", "c.tsx"),
        ]);

        let grouped = registry.by_path();
        assert_eq!(grouped["shared.tsx"], vec!["A", "B"]);
        assert_eq!(grouped["c.tsx"], vec!["C"]);
    }

    #[test]
    fn test_empty_batches_are_ignored() {
        let mut builder = RegistryBuilder::new();
        builder.submit(TraversalKey::root().child(0), "empty.ts", vec![]);
        assert_eq!(builder.file_count(), 0);
    }
}
