//! Graph predicate factories for constrained subgraph enumeration.
//!
//! Each factory captures its parameters by value and returns a [`Condition`]:
//! a pure, stateless predicate over an immutable graph snapshot. Conditions
//! carry no graph identity — the same condition may be invoked on arbitrarily
//! many distinct graph instances, which is exactly how the enumerator uses
//! them.
//!
//! A conjunction of conditions is evaluated by short-circuit AND; no
//! particular evaluation order among unrelated conditions is guaranteed, so
//! conditions must not rely on side effects (they have none to rely on).

use std::collections::BTreeSet;

use crate::errors::EngineError;
use crate::graph::DirectedGraph;

/// A pure predicate over a directed graph.
///
/// Returns `Ok(true)` when the graph satisfies the condition. A
/// [`EngineError::Lookup`] is surfaced when the condition's captured
/// parameters address a node absent from the graph; enumeration aborts
/// rather than treating the miss as predicate failure.
pub type Condition = Box<dyn Fn(&DirectedGraph) -> Result<bool, EngineError>>;

/// True iff no node has a self-loop.
pub fn no_self_loops() -> Condition {
    Box::new(|g| Ok(g.self_loops().is_empty()))
}

/// True iff the graph is acyclic (self-loops count as cycles).
pub fn is_dag() -> Condition {
    Box::new(|g| Ok(g.is_acyclic()))
}

/// True iff a directed path `x → y` exists for every `(x, y)` in `pairs`.
///
/// Useful for making known indirect dependencies explicit: the pair need
/// not be a direct edge, only reachable.
pub fn path_complete(pairs: &[(&str, &str)]) -> Condition {
    let pairs: Vec<(String, String)> = owned_pairs(pairs);
    Box::new(move |g| {
        for (x, y) in &pairs {
            if !g.has_path(x, y)? {
                return Ok(false);
            }
        }
        Ok(true)
    })
}

/// True iff every listed node has in-degree 0.
///
/// Useful for making interventions explicit over a set of graphs.
pub fn no_input_nodes(nodes: &[&str]) -> Condition {
    let nodes: Vec<String> = owned_ids(nodes);
    Box::new(move |g| {
        for n in &nodes {
            if g.in_degree(n)? != 0 {
                return Ok(false);
            }
        }
        Ok(true)
    })
}

/// True iff every listed node has out-degree 0.
pub fn no_output_nodes(nodes: &[&str]) -> Condition {
    let nodes: Vec<String> = owned_ids(nodes);
    Box::new(move |g| {
        for n in &nodes {
            if g.out_degree(n)? != 0 {
                return Ok(false);
            }
        }
        Ok(true)
    })
}

/// True iff none of the listed ordered pairs is an edge of the graph.
pub fn no_direct_edges(pairs: &[(&str, &str)]) -> Condition {
    let pairs: Vec<(String, String)> = owned_pairs(pairs);
    Box::new(move |g| Ok(pairs.iter().all(|(x, y)| !g.contains_edge(x, y))))
}

/// True iff, for each `(node, parents)` entry, the node's in-edges exactly
/// equal the declared parent set.
///
/// Equality is order-independent set equality: no missing parents, no extra
/// ones.
pub fn explicit_parents(entries: &[(&str, Vec<&str>)]) -> Condition {
    let entries = owned_entries(entries);
    Box::new(move |g| {
        for (node, parents) in &entries {
            let actual: BTreeSet<String> = g
                .in_edges(node)?
                .into_iter()
                .map(|(src, _)| src)
                .collect();
            let declared: BTreeSet<String> = parents.iter().cloned().collect();
            if actual != declared {
                return Ok(false);
            }
        }
        Ok(true)
    })
}

/// True iff, for each `(node, children)` entry, the node's out-edges exactly
/// equal the declared child set.
pub fn explicit_children(entries: &[(&str, Vec<&str>)]) -> Condition {
    let entries = owned_entries(entries);
    Box::new(move |g| {
        for (node, children) in &entries {
            let actual: BTreeSet<String> = g
                .out_edges(node)?
                .into_iter()
                .map(|(_, dst)| dst)
                .collect();
            let declared: BTreeSet<String> = children.iter().cloned().collect();
            if actual != declared {
                return Ok(false);
            }
        }
        Ok(true)
    })
}

/// Short-circuit conjunction of `conditions` over `graph`.
pub(crate) fn holds_all(
    graph: &DirectedGraph,
    conditions: &[Condition],
) -> Result<bool, EngineError> {
    for c in conditions {
        if !c(graph)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn owned_ids(nodes: &[&str]) -> Vec<String> {
    nodes.iter().map(|s| s.to_string()).collect()
}

fn owned_pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(x, y)| (x.to_string(), y.to_string()))
        .collect()
}

fn owned_entries(entries: &[(&str, Vec<&str>)]) -> Vec<(String, Vec<String>)> {
    entries
        .iter()
        .map(|(n, list)| (n.to_string(), list.iter().map(|s| s.to_string()).collect()))
        .collect()
}
