//! Directed graph model for causal-structure exploration.
//!
//! This module provides:
//! - **DirectedGraph**: a value-semantics directed graph over string node
//!   identifiers, with optional JSON-valued node attributes
//! - **complete_digraph**: the maximal candidate graph over a node set
//! - **interchange**: JSON adjacency (de)serialization
//!
//! ## Design
//!
//! The graph primitives themselves (storage, adjacency, path existence,
//! cycle detection) are delegated to `petgraph`; `DirectedGraph` wraps a
//! [`StableDiGraph`] together with a name→index map so every operation is
//! addressed by node identifier rather than positional index.
//!
//! Graphs handed across component boundaries are treated as frozen
//! snapshots: filters and the enumerator always return a new graph and never
//! mutate one they were given. Ownership makes that discipline structural —
//! transforming operations take `&self` and return `DirectedGraph`.

pub mod interchange;

use std::collections::BTreeMap;

use petgraph::algo::{has_path_connecting, is_cyclic_directed};
use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::Direction;
use rustc_hash::FxHashMap;
use serde_json::Value;

use crate::errors::EngineError;

/// Attribute mapping attached to a node.
///
/// Keys are attribute names; values are arbitrary JSON values so the graph
/// can carry whatever annotations the interchange format supplies.
pub type NodeAttrs = BTreeMap<String, Value>;

/// A node of the graph: its identifier plus an attribute mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    /// The node identifier, unique within the graph.
    pub id: String,
    /// Attributes attached to the node (may be empty).
    pub attrs: NodeAttrs,
}

/// A directed graph over string-identified nodes.
///
/// Self-loops and symmetric edge pairs are ordinary edges, not a distinct
/// type. Parallel edges are collapsed: adding an edge that already exists is
/// a no-op. Edges always reference nodes present in the node set.
#[derive(Debug, Clone, Default)]
pub struct DirectedGraph {
    inner: StableDiGraph<NodeData, ()>,
    index: FxHashMap<String, NodeIndex>,
}

impl DirectedGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node with no attributes. Re-adding an existing id is a no-op.
    pub fn add_node(&mut self, id: impl Into<String>) {
        self.add_node_with_attrs(id, NodeAttrs::new());
    }

    /// Adds a node with an attribute mapping.
    ///
    /// If the node already exists its attributes are replaced.
    pub fn add_node_with_attrs(&mut self, id: impl Into<String>, attrs: NodeAttrs) {
        let id = id.into();
        if let Some(&idx) = self.index.get(&id) {
            self.inner[idx].attrs = attrs;
            return;
        }
        let idx = self.inner.add_node(NodeData { id: id.clone(), attrs });
        self.index.insert(id, idx);
    }

    /// Adds every node in `ids`, none with attributes.
    pub fn add_nodes<I, S>(&mut self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for id in ids {
            self.add_node(id);
        }
    }

    /// Adds a directed edge from `src` to `dst`.
    ///
    /// Idempotent: an already-present edge is left alone. Both endpoints
    /// must exist.
    ///
    /// # Errors
    ///
    /// [`EngineError::Lookup`] if either endpoint is absent from the graph.
    pub fn add_edge(&mut self, src: &str, dst: &str) -> Result<(), EngineError> {
        let s = self.node_index(src)?;
        let d = self.node_index(dst)?;
        if self.inner.find_edge(s, d).is_none() {
            self.inner.add_edge(s, d, ());
        }
        Ok(())
    }

    /// Adds every `(src, dst)` pair in `edges`.
    pub fn add_edges<'a, I>(&mut self, edges: I) -> Result<(), EngineError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        for (src, dst) in edges {
            self.add_edge(src, dst)?;
        }
        Ok(())
    }

    /// Removes the edge from `src` to `dst` if present.
    ///
    /// Returns whether an edge was removed.
    ///
    /// # Errors
    ///
    /// [`EngineError::Lookup`] if either endpoint is absent from the graph.
    pub fn remove_edge(&mut self, src: &str, dst: &str) -> Result<bool, EngineError> {
        let s = self.node_index(src)?;
        let d = self.node_index(dst)?;
        match self.inner.find_edge(s, d) {
            Some(e) => {
                self.inner.remove_edge(e);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Returns a new graph with exactly the edges in `edges` removed.
    ///
    /// Pairs naming edges (or nodes) not present in the graph are ignored;
    /// this mirrors removing a chosen subset of a known edge set, which is
    /// the enumerator's workhorse operation. `self` is not modified.
    pub fn without_edges(&self, edges: &[(String, String)]) -> DirectedGraph {
        let mut out = self.clone();
        for (src, dst) in edges {
            if let (Some(&s), Some(&d)) = (out.index.get(src), out.index.get(dst)) {
                if let Some(e) = out.inner.find_edge(s, d) {
                    out.inner.remove_edge(e);
                }
            }
        }
        out
    }

    /// Whether a node with identifier `id` exists.
    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Whether the edge `src → dst` exists.
    pub fn contains_edge(&self, src: &str, dst: &str) -> bool {
        match (self.index.get(src), self.index.get(dst)) {
            (Some(&s), Some(&d)) => self.inner.find_edge(s, d).is_some(),
            _ => false,
        }
    }

    /// Node identifiers in insertion order.
    pub fn nodes(&self) -> Vec<&str> {
        self.inner
            .node_indices()
            .map(|i| self.inner[i].id.as_str())
            .collect()
    }

    /// All edges as `(src, dst)` identifier pairs.
    pub fn edges(&self) -> Vec<(String, String)> {
        self.inner
            .edge_indices()
            .filter_map(|e| self.inner.edge_endpoints(e))
            .map(|(s, d)| (self.inner[s].id.clone(), self.inner[d].id.clone()))
            .collect()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// In-degree of `id`.
    ///
    /// # Errors
    ///
    /// [`EngineError::Lookup`] if the node is absent.
    pub fn in_degree(&self, id: &str) -> Result<usize, EngineError> {
        let idx = self.node_index(id)?;
        Ok(self
            .inner
            .neighbors_directed(idx, Direction::Incoming)
            .count())
    }

    /// Out-degree of `id`.
    ///
    /// # Errors
    ///
    /// [`EngineError::Lookup`] if the node is absent.
    pub fn out_degree(&self, id: &str) -> Result<usize, EngineError> {
        let idx = self.node_index(id)?;
        Ok(self
            .inner
            .neighbors_directed(idx, Direction::Outgoing)
            .count())
    }

    /// Edges directed into `id`, as `(src, dst)` pairs.
    pub fn in_edges(&self, id: &str) -> Result<Vec<(String, String)>, EngineError> {
        let idx = self.node_index(id)?;
        Ok(self
            .inner
            .neighbors_directed(idx, Direction::Incoming)
            .map(|s| (self.inner[s].id.clone(), id.to_string()))
            .collect())
    }

    /// Edges directed out of `id`, as `(src, dst)` pairs.
    pub fn out_edges(&self, id: &str) -> Result<Vec<(String, String)>, EngineError> {
        let idx = self.node_index(id)?;
        Ok(self
            .inner
            .neighbors_directed(idx, Direction::Outgoing)
            .map(|d| (id.to_string(), self.inner[d].id.clone()))
            .collect())
    }

    /// All self-loop edges, as `(id, id)` pairs.
    pub fn self_loops(&self) -> Vec<(String, String)> {
        self.edges()
            .into_iter()
            .filter(|(s, d)| s == d)
            .collect()
    }

    /// Whether a directed path from `src` to `dst` exists.
    ///
    /// A node trivially has a path to itself.
    ///
    /// # Errors
    ///
    /// [`EngineError::Lookup`] if either node is absent.
    pub fn has_path(&self, src: &str, dst: &str) -> Result<bool, EngineError> {
        let s = self.node_index(src)?;
        let d = self.node_index(dst)?;
        Ok(has_path_connecting(&self.inner, s, d, None))
    }

    /// Whether the graph is acyclic. Self-loops count as cycles.
    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_directed(&self.inner)
    }

    /// The attribute mapping of `id`.
    ///
    /// # Errors
    ///
    /// [`EngineError::Lookup`] if the node is absent.
    pub fn attrs(&self, id: &str) -> Result<&NodeAttrs, EngineError> {
        let idx = self.node_index(id)?;
        Ok(&self.inner[idx].attrs)
    }

    fn node_index(&self, id: &str) -> Result<NodeIndex, EngineError> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| EngineError::Lookup(format!("node '{}' is not in the graph", id)))
    }
}

/// Builds the complete symmetric+reflexive candidate graph over `nodes`.
///
/// For every unordered pair `{x, y}` with `x ≠ y` both directed edges
/// `(x, y)` and `(y, x)` are added, plus a self-loop `(x, x)` for every
/// node. The result has exactly n² edges for n nodes: this is the maximal
/// search universe for subgraph enumeration; callers narrow it via filters
/// before enumerating.
///
/// # Errors
///
/// [`EngineError::Configuration`] if `nodes` contains a duplicate
/// identifier.
pub fn complete_digraph<S: AsRef<str>>(nodes: &[S]) -> Result<DirectedGraph, EngineError> {
    let mut g = DirectedGraph::new();
    for n in nodes {
        let id = n.as_ref();
        if g.contains_node(id) {
            return Err(EngineError::Configuration(format!(
                "duplicate node '{}' in complete graph node set",
                id
            )));
        }
        g.add_node(id);
    }
    for x in nodes {
        for y in nodes {
            g.add_edge(x.as_ref(), y.as_ref())?;
        }
    }
    Ok(g)
}
