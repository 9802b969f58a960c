//! Core data types for rgc analysis.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A component definition discovered in the project.
///
/// Identity is the `name`; a registry holds at most one definition per name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentDef {
    /// Declared identifier.
    pub name: String,
    /// Path of the defining file, relative to the project root.
    pub path: String,
}

impl ComponentDef {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Which detection rule produced a candidate.
///
/// Variants are ordered by precedence: exported forms win over the
/// top-level function fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionRule {
    /// `export [default] function|class|const Name` at the start of a line.
    ExportedDeclaration,
    /// `export const Name = (` or `export const Name = arg =>`.
    ExportedArrow,
    /// `function Name` at the start of a line.
    TopLevelFunction,
}

impl DetectionRule {
    /// Whether the rule matches an exported symbol.
    pub fn is_exported(&self) -> bool {
        !matches!(self, DetectionRule::TopLevelFunction)
    }
}

/// A definition candidate extracted from one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentCandidate {
    pub name: String,
    pub rule: DetectionRule,
}

/// Position of an entry in the pre-order traversal of the project tree.
///
/// Each element is the entry's index within its parent listing, so the
/// derived lexicographic ordering is exactly pre-order: a directory sorts
/// before its contents, and its contents sort before its next sibling.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TraversalKey(Vec<u32>);

impl TraversalKey {
    /// Key of the project root.
    pub fn root() -> Self {
        Self(Vec::new())
    }

    /// Key of the `index`-th entry listed under this one.
    pub fn child(&self, index: u32) -> Self {
        let mut path = Vec::with_capacity(self.0.len() + 1);
        path.extend_from_slice(&self.0);
        path.push(index);
        Self(path)
    }

    /// Number of directory levels below the root.
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

/// Exported shape of a forest node.
///
/// The parent relation is absent: only the composes direction
/// is part of the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentTree {
    pub name: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ComponentTree>,
    /// Set when this component already appears earlier in the same tree,
    /// either as an ancestor (a cycle) or in a sibling branch. Its children
    /// are listed at that first occurrence only.
    #[serde(default, skip_serializing_if = "is_false")]
    pub truncated: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl ComponentTree {
    /// Total number of nodes in this tree, including the root.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut pending = vec![self];
        while let Some(tree) = pending.pop() {
            count += 1;
            pending.extend(&tree.children);
        }
        count
    }

    /// Longest root-to-leaf path, counting nodes.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(self, 1)];
        while let Some((tree, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            pending.extend(tree.children.iter().map(|child| (child, depth + 1)));
        }
        deepest
    }
}

// Dropping nested vectors recursively would overflow on long chains.
impl Drop for ComponentTree {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut tree) = pending.pop() {
            pending.append(&mut tree.children);
        }
    }
}

/// Used/unused classification of the forest roots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub used_count: usize,
    pub unused_count: usize,
    /// Roots composing at least one other component.
    pub used: Vec<ComponentTree>,
    /// Roots composing nothing.
    pub unused: Vec<ComponentTree>,
}

/// Category of a recoverable failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A subdirectory could not be listed; its subtree was skipped.
    ListingFailed,
    /// A file could not be read.
    FileUnreadable,
    /// A file exceeded the size ceiling and was not fetched.
    FileTooLarge,
    /// A directory was deeper than the configured limit.
    DepthExceeded,
    /// A worker task ended abnormally.
    WorkerFailed,
    /// The deadline expired in best-effort mode.
    DeadlineExpired,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WarningKind::ListingFailed => "listing failed",
            WarningKind::FileUnreadable => "file unreadable",
            WarningKind::FileTooLarge => "file too large",
            WarningKind::DepthExceeded => "depth exceeded",
            WarningKind::WorkerFailed => "worker failed",
            WarningKind::DeadlineExpired => "deadline expired",
        };
        f.write_str(label)
    }
}

/// A recoverable failure recorded during analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisWarning {
    pub kind: WarningKind,
    pub path: String,
    pub message: String,
}

impl AnalysisWarning {
    pub fn new(kind: WarningKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Counters collected across the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistics {
    /// Directory listings that succeeded.
    pub directories_listed: usize,
    /// Source files fetched and scanned for definitions.
    pub files_scanned: usize,
    /// Source files skipped (too large, unreadable, ignored).
    pub files_skipped: usize,
    /// Registered components.
    pub components: usize,
    /// Deduplicated composes edges.
    pub edges: usize,
    /// Wall-clock duration of the whole run.
    pub duration_ms: u64,
}

/// Full outcome of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub result: ClassificationResult,
    /// Groups of components that only reference each other and never
    /// appear under a root.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orphaned_cycles: Vec<Vec<String>>,
    /// Components no root reaches, exported from one member of each
    /// orphaned cycle that nothing else leads into.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub orphaned: Vec<ComponentTree>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<AnalysisWarning>,
    pub statistics: Statistics,
    /// False only when a best-effort run hit its deadline.
    pub complete: bool,
}
