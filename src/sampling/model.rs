//! The annotated-graph data model for ancestral sampling.
//!
//! A [`BayesNetModel`] is a directed dependency graph whose nodes carry a
//! finite state space, an ordered parent list, a distribution table, and the
//! symbolic name of the sampling primitive to draw with. The authoring
//! surface is a node list — each entry a `(node_id, NodeSpec)` pair — and
//! every type here derives serde so that list is also the file format.

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::graph::DirectedGraph;

/// A parent-assignment key: each parent's identifier paired with its
/// realized value, ordered consistently with the node's `parents` list.
pub type ParentAssignment = Vec<(String, String)>;

/// One row of a conditional probability table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CptRow {
    /// The parent-assignment key selecting this row.
    pub given: ParentAssignment,
    /// Probability vector over the node's state space, in state order.
    pub probs: Vec<f64>,
}

/// A node's local distribution.
///
/// Probability vectors are consumed as-is: a vector not summing to 1 is an
/// authoring error and is never renormalized at sampling time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Distribution {
    /// Flat probability vector over the state space; used when the node has
    /// no parents.
    Marginal(Vec<f64>),
    /// Rows keyed by parent assignment; used when the node has parents.
    Conditional(Vec<CptRow>),
}

impl Distribution {
    /// Selects the probability vector for a realized parent combination.
    ///
    /// For a marginal distribution the key must be empty. Returns `None`
    /// when no row matches — the table is incomplete for that combination.
    pub fn lookup(&self, key: &ParentAssignment) -> Option<&[f64]> {
        match self {
            Distribution::Marginal(probs) => key.is_empty().then_some(probs.as_slice()),
            Distribution::Conditional(rows) => rows
                .iter()
                .find(|row| row.given == *key)
                .map(|row| row.probs.as_slice()),
        }
    }
}

/// Per-node annotation: state space, sampling primitive, parents, and the
/// local distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    /// Ordered, finite sequence of distinct outcome labels.
    pub state_space: Vec<String>,
    /// Symbolic name resolved against the caller-supplied primitive table
    /// at sampling time.
    pub sample_function: String,
    /// Ordered parent identifiers; conditional table keys follow this order.
    pub parents: Vec<String>,
    /// The local distribution.
    pub distribution: Distribution,
}

/// A discrete Bayesian network: a dependency graph plus per-node
/// annotations.
///
/// The parent-induced edge set must form a DAG (no self-loops, no cycles)
/// for ancestral sampling to be defined; [`BayesNetModel::validate_structure`]
/// checks exactly that and the sampler calls it before drawing anything.
#[derive(Debug, Clone)]
pub struct BayesNetModel {
    graph: DirectedGraph,
    nodes: Vec<(String, NodeSpec)>,
}

impl BayesNetModel {
    /// Builds a model from the authoring node list.
    ///
    /// The dependency graph gains one `parent → child` edge per declared
    /// parent. Parents referencing nodes outside the list are detected here
    /// rather than silently deferred.
    ///
    /// # Errors
    ///
    /// [`EngineError::Configuration`] on a duplicate node id;
    /// [`EngineError::Structural`] when a parent list names an unknown node.
    pub fn from_nodes(nodes: Vec<(String, NodeSpec)>) -> Result<Self, EngineError> {
        let mut graph = DirectedGraph::new();
        for (id, _) in &nodes {
            if graph.contains_node(id) {
                return Err(EngineError::Configuration(format!(
                    "duplicate node '{}' in model definition",
                    id
                )));
            }
            graph.add_node(id.clone());
        }
        for (id, spec) in &nodes {
            for parent in &spec.parents {
                if !graph.contains_node(parent) {
                    return Err(EngineError::Structural(format!(
                        "node '{}' declares parent '{}' which is not in the model",
                        id, parent
                    )));
                }
                graph.add_edge(parent, id)?;
            }
        }
        Ok(Self { graph, nodes })
    }

    /// The dependency graph (parent → child edges).
    pub fn graph(&self) -> &DirectedGraph {
        &self.graph
    }

    /// The authored node list, in authoring order.
    pub fn nodes(&self) -> &[(String, NodeSpec)] {
        &self.nodes
    }

    /// The annotation of `id`, if present.
    pub fn spec(&self, id: &str) -> Option<&NodeSpec> {
        self.nodes
            .iter()
            .find(|(n, _)| n == id)
            .map(|(_, spec)| spec)
    }

    /// Checks that the parent relationships admit a topological order.
    ///
    /// # Errors
    ///
    /// [`EngineError::Structural`] when a node lists itself as a parent or
    /// the parent graph contains a cycle. Unknown parents are already
    /// rejected by [`BayesNetModel::from_nodes`].
    pub fn validate_structure(&self) -> Result<(), EngineError> {
        for (id, spec) in &self.nodes {
            if spec.parents.iter().any(|p| p == id) {
                return Err(EngineError::Structural(format!(
                    "node '{}' lists itself as a parent",
                    id
                )));
            }
        }
        if !self.graph.is_acyclic() {
            return Err(EngineError::Structural(
                "parent relationships contain a cycle; ancestral sampling is undefined".into(),
            ));
        }
        Ok(())
    }
}
