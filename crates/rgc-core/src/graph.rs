//! Usage graph: an arena of nodes linked by "composes" edges.
//!
//! A node may be composed by several parents, so there is no parent pointer.
//! Each node keeps the set of nodes referencing it instead, and root-ness is
//! derived from that set only once every edge is known.

use crate::registry::Registry;
use crate::types::ComponentDef;
use std::collections::{BTreeSet, HashMap};

/// Index of a node inside its [`Forest`].
pub type NodeId = usize;

/// One registered component and its edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    def: ComponentDef,
    children: Vec<NodeId>,
    incoming: BTreeSet<NodeId>,
}

impl Node {
    fn new(def: ComponentDef) -> Self {
        Self {
            def,
            children: Vec::new(),
            incoming: BTreeSet::new(),
        }
    }

    pub fn def(&self) -> &ComponentDef {
        &self.def
    }

    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn path(&self) -> &str {
        &self.def.path
    }

    /// Composed components, in order of first reference.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Components composing this one. Lookup only; never exported.
    pub fn incoming(&self) -> &BTreeSet<NodeId> {
        &self.incoming
    }
}

/// Single-writer builder for a [`Forest`].
#[derive(Debug)]
pub struct ForestBuilder {
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
    edges: usize,
}

impl ForestBuilder {
    /// One node per registry entry, in registry (name) order.
    pub fn new(registry: &Registry) -> Self {
        let nodes: Vec<Node> = registry.iter().cloned().map(Node::new).collect();
        let index = nodes
            .iter()
            .enumerate()
            .map(|(id, node)| (node.def.name.clone(), id))
            .collect();
        Self {
            nodes,
            index,
            edges: 0,
        }
    }

    /// Record `from -> to`.
    ///
    /// Returns `false` when either name is unregistered, for self-references,
    /// and for an edge that already exists.
    pub fn link(&mut self, from: &str, to: &str) -> bool {
        let (Some(&from_id), Some(&to_id)) = (self.index.get(from), self.index.get(to)) else {
            return false;
        };
        if from_id == to_id || !self.nodes[to_id].incoming.insert(from_id) {
            return false;
        }
        self.nodes[from_id].children.push(to_id);
        self.edges += 1;
        true
    }

    /// Link `from` to every name in `references`, returning how many edges
    /// were added.
    pub fn link_all<S: AsRef<str>>(&mut self, from: &str, references: &[S]) -> usize {
        references
            .iter()
            .filter(|to| self.link(from, to.as_ref()))
            .count()
    }

    /// Freeze the graph and compute the root set over the complete edge set.
    pub fn finish(self) -> Forest {
        let roots = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| node.incoming.is_empty())
            .map(|(id, _)| id)
            .collect();
        Forest {
            nodes: self.nodes,
            index: self.index,
            roots,
            edges: self.edges,
        }
    }
}

/// Frozen usage graph with its roots.
#[derive(Debug, Clone)]
pub struct Forest {
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
    roots: Vec<NodeId>,
    edges: usize,
}

impl Forest {
    /// Nodes with no incoming edge, in name order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn id_of(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edges
    }

    pub fn is_root(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.incoming.is_empty())
    }
}
