//! Lazy enumeration of edge-subset-induced subgraphs.
//!
//! Given a base graph and a non-empty conjunction of [`Condition`]s, the
//! enumerator walks every subset of the (possibly restricted) edge set —
//! all 2^n of them — removes that subset from a fresh copy of the base
//! graph, and yields the candidate iff every condition holds. The walk is
//! lazy: nothing is materialized beyond the candidate currently under test,
//! so early termination by the consumer is free.
//!
//! Subset order is an implementation detail. No candidate is privileged
//! over another and callers must not depend on emission order beyond "the
//! full filtered set is eventually produced".

use tracing::{debug, trace};

use crate::errors::EngineError;
use crate::explore::conditions::{holds_all, Condition};
use crate::graph::DirectedGraph;

/// Item type of the enumeration stream.
pub type GraphResult = Result<DirectedGraph, EngineError>;

/// Lazy iterator over condition-satisfying subgraphs.
///
/// Single-pass within one invocation; call [`conditional_subgraphs`] (or
/// [`partial_conditional_subgraphs`]) again for a fresh traversal. A
/// condition evaluation error is yielded once and fuses the iterator.
pub struct ConditionalSubgraphs {
    base: DirectedGraph,
    removable: Vec<(String, String)>,
    conditions: Vec<Condition>,
    // Binary odometer over `removable`: selected[i] means edge i is removed
    // from the current candidate.
    selected: Vec<bool>,
    done: bool,
}

impl ConditionalSubgraphs {
    fn new(
        base: DirectedGraph,
        removable: Vec<(String, String)>,
        conditions: Vec<Condition>,
    ) -> Result<Self, EngineError> {
        if conditions.is_empty() {
            return Err(EngineError::Configuration(
                "subgraph enumeration requires a non-empty list of conditions; \
                 an empty list would silently enumerate the entire edge power set"
                    .into(),
            ));
        }
        debug!(
            edges = removable.len(),
            conditions = conditions.len(),
            "enumerating 2^{} edge-removal subsets",
            removable.len()
        );
        let selected = vec![false; removable.len()];
        Ok(Self {
            base,
            removable,
            conditions,
            selected,
            done: false,
        })
    }

    /// Advances the subset odometer. Returns `false` once every subset has
    /// been visited.
    fn advance(&mut self) -> bool {
        for slot in self.selected.iter_mut() {
            if *slot {
                *slot = false;
            } else {
                *slot = true;
                return true;
            }
        }
        false
    }

    fn current_removals(&self) -> Vec<(String, String)> {
        self.removable
            .iter()
            .zip(&self.selected)
            .filter(|(_, &sel)| sel)
            .map(|(e, _)| e.clone())
            .collect()
    }
}

impl Iterator for ConditionalSubgraphs {
    type Item = GraphResult;

    fn next(&mut self) -> Option<GraphResult> {
        while !self.done {
            let removals = self.current_removals();
            let candidate = self.base.without_edges(&removals);
            if !self.advance() {
                self.done = true;
            }
            match holds_all(&candidate, &self.conditions) {
                Ok(true) => {
                    trace!(
                        removed = removals.len(),
                        kept = candidate.edge_count(),
                        "candidate accepted"
                    );
                    return Some(Ok(candidate));
                }
                Ok(false) => continue,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}

/// Lazily enumerates every subgraph of `graph` induced by removing some
/// subset of its edges, yielding those satisfying all of `conditions`.
///
/// # Errors
///
/// [`EngineError::Configuration`] if `conditions` is empty — a deliberate
/// guard against unfiltered power-set enumeration.
pub fn conditional_subgraphs(
    graph: &DirectedGraph,
    conditions: Vec<Condition>,
) -> Result<ConditionalSubgraphs, EngineError> {
    let removable = graph.edges();
    ConditionalSubgraphs::new(graph.clone(), removable, conditions)
}

/// Like [`conditional_subgraphs`], but only the edges in `edge_subset` are
/// eligible for removal; all other edges of `graph` are retained in every
/// candidate.
///
/// Fixing a known-correct skeleton this way shrinks the search space from
/// 2^|E| to 2^|edge_subset|. Passing an empty subset yields exactly one
/// candidate: the graph itself, if it satisfies the conditions.
///
/// # Errors
///
/// [`EngineError::Configuration`] if `conditions` is empty;
/// [`EngineError::Lookup`] if `edge_subset` names an edge (or node) not in
/// the graph.
pub fn partial_conditional_subgraphs(
    graph: &DirectedGraph,
    edge_subset: &[(&str, &str)],
    conditions: Vec<Condition>,
) -> Result<ConditionalSubgraphs, EngineError> {
    let mut removable = Vec::with_capacity(edge_subset.len());
    for (src, dst) in edge_subset {
        if !graph.contains_node(src) {
            return Err(EngineError::Lookup(format!(
                "node '{}' is not in the graph",
                src
            )));
        }
        if !graph.contains_node(dst) {
            return Err(EngineError::Lookup(format!(
                "node '{}' is not in the graph",
                dst
            )));
        }
        if !graph.contains_edge(src, dst) {
            return Err(EngineError::Lookup(format!(
                "edge '{} -> {}' is not in the graph",
                src, dst
            )));
        }
        removable.push((src.to_string(), dst.to_string()));
    }
    ConditionalSubgraphs::new(graph.clone(), removable, conditions)
}
