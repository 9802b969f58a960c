//! rgc core - component registry, usage graph and classification.
//!
//! This crate holds everything about the analysis that does not touch I/O:
//!
//! - [`ComponentExtractor`]: pattern-based definition and reference detection
//! - [`RegistryBuilder`] / [`Registry`]: name-keyed definitions with
//!   deterministic collision resolution
//! - [`ForestBuilder`] / [`Forest`]: the "composes" graph and its roots
//! - [`classify`]: used/unused split and cycle-safe export
//! - [`OrphanedCycleDetector`] / [`export_orphans`]: cycles no root reaches,
//!   and everything hanging off them
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │    rgc-cli      │  (User interface)
//! └────────┬────────┘
//!          │
//!          ▼
//! ┌─────────────────┐     ┌─────────────────┐
//! │   rgc-engine    │────▶│  rgc-provider   │  (Content providers)
//! └────────┬────────┘     └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    rgc-core     │  (This crate - pure graph logic)
//! └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use rgc_core::{classify, ComponentExtractor, ForestBuilder, PatternExtractor, RegistryBuilder, TraversalKey};
//!
//! let extractor = PatternExtractor::new()?;
//! let app = "export function App() { return <Header />; }";
//! let header = "export function Header() { return null; }";
//!
//! let mut builder = RegistryBuilder::new();
//! builder.submit(TraversalKey::root().child(0), "App.tsx", extractor.definitions("App.tsx", app));
//! builder.submit(TraversalKey::root().child(1), "Header.tsx", extractor.definitions("Header.tsx", header));
//! let (registry, _shadowed) = builder.build();
//!
//! let mut forest = ForestBuilder::new(&registry);
//! forest.link_all("App", &extractor.references(app));
//! let result = classify(&forest.finish())?;
//!
//! assert_eq!(result.used[0].name, "App");
//! # Ok::<(), rgc_core::Error>(())
//! ```

pub mod classify;
pub mod cycles;
pub mod error;
pub mod extract;
pub mod graph;
pub mod registry;
pub mod types;

// Re-export core types for convenience
pub use classify::{classify, export_orphans, export_tree};
pub use cycles::{OrphanedCycleDetector, OrphanedCycles};
pub use error::{Error, Result};
pub use extract::{ComponentExtractor, PatternExtractor};
pub use graph::{Forest, ForestBuilder, Node, NodeId};
pub use registry::{Registry, RegistryBuilder, Shadowed};
pub use types::{
    AnalysisReport, AnalysisWarning, ClassificationResult, ComponentCandidate, ComponentDef,
    ComponentTree, DetectionRule, Statistics, TraversalKey, WarningKind,
};
