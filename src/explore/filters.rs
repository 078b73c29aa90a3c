//! Graph-to-graph transform factories for pre-narrowing the search universe.
//!
//! A [`Filter`] takes a graph and returns a new graph; the input is never
//! mutated. Filters compose left-to-right via [`apply_filters`], each step
//! receiving the previous step's output. They are typically applied to the
//! complete candidate graph before enumeration, shrinking the edge set and
//! therefore the 2^|E| subset space.

use crate::graph::DirectedGraph;

/// A pure graph transform. Always returns a new graph.
pub type Filter = Box<dyn Fn(&DirectedGraph) -> DirectedGraph>;

/// Drops every self-loop edge.
pub fn remove_self_loops() -> Filter {
    Box::new(|g| {
        let loops = g.self_loops();
        g.without_edges(&loops)
    })
}

/// Prunes in-edges according to `exceptions`.
///
/// For each `(node, allowed_parents)` pair: if `allowed_parents` is empty
/// every in-edge of `node` is dropped; otherwise only in-edges whose source
/// is in the allowed set are kept. Nodes absent from the graph are ignored,
/// as are nodes not listed in `exceptions`.
pub fn remove_inward_edges(exceptions: &[(&str, Vec<&str>)]) -> Filter {
    let exceptions = owned_entries(exceptions);
    Box::new(move |g| {
        let mut doomed: Vec<(String, String)> = Vec::new();
        for (node, allowed) in &exceptions {
            let in_edges = match g.in_edges(node) {
                Ok(edges) => edges,
                Err(_) => continue,
            };
            for (src, dst) in in_edges {
                if !allowed.iter().any(|a| a == &src) {
                    doomed.push((src, dst));
                }
            }
        }
        g.without_edges(&doomed)
    })
}

/// Prunes out-edges according to `exceptions`; symmetric to
/// [`remove_inward_edges`].
pub fn remove_outward_edges(exceptions: &[(&str, Vec<&str>)]) -> Filter {
    let exceptions = owned_entries(exceptions);
    Box::new(move |g| {
        let mut doomed: Vec<(String, String)> = Vec::new();
        for (node, allowed) in &exceptions {
            let out_edges = match g.out_edges(node) {
                Ok(edges) => edges,
                Err(_) => continue,
            };
            for (src, dst) in out_edges {
                if !allowed.iter().any(|a| a == &dst) {
                    doomed.push((src, dst));
                }
            }
        }
        g.without_edges(&doomed)
    })
}

/// Drops every in-edge of each listed node.
///
/// Shorthand for [`remove_inward_edges`] with an empty allowed-parent set
/// per node: the listed nodes become parentless in the filtered graph.
pub fn orphan_nodes(nodes: &[&str]) -> Filter {
    let entries: Vec<(&str, Vec<&str>)> = nodes.iter().map(|n| (*n, Vec::new())).collect();
    remove_inward_edges(&entries)
}

/// Drops every out-edge of each listed node.
///
/// Shorthand for [`remove_outward_edges`] with an empty allowed-child set
/// per node: the listed nodes become childless in the filtered graph.
pub fn barren_nodes(nodes: &[&str]) -> Filter {
    let entries: Vec<(&str, Vec<&str>)> = nodes.iter().map(|n| (*n, Vec::new())).collect();
    remove_outward_edges(&entries)
}

/// Applies `filters` left-to-right: `apply_filters(g, [f1, f2]) = f2(f1(g))`.
///
/// The input graph is untouched; each step receives the previous step's
/// output.
pub fn apply_filters(graph: &DirectedGraph, filters: &[Filter]) -> DirectedGraph {
    let mut out = graph.clone();
    for f in filters {
        out = f(&out);
    }
    out
}

fn owned_entries(entries: &[(&str, Vec<&str>)]) -> Vec<(String, Vec<String>)> {
    entries
        .iter()
        .map(|(n, list)| (n.to_string(), list.iter().map(|s| s.to_string()).collect()))
        .collect()
}
