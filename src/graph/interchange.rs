//! JSON adjacency interchange for [`DirectedGraph`].
//!
//! The wire shape is the adjacency representation commonly produced by graph
//! libraries: a node list (each entry an object whose `id` field names the
//! node, remaining fields are node attributes) plus a parallel `adjacency`
//! array whose i-th entry lists the out-neighbors of the i-th node, each as
//! an object whose `id` field names the target.
//!
//! Loading normalizes the document: any library-internal synthetic edge
//! attributes (notably a per-edge `id` field) are stripped — only the edge's
//! endpoints survive into the [`DirectedGraph`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::EngineError;
use crate::graph::{DirectedGraph, NodeAttrs};

#[derive(Debug, Serialize, Deserialize)]
struct AdjacencyDoc {
    #[serde(default = "default_directed")]
    directed: bool,
    #[serde(default)]
    multigraph: bool,
    #[serde(default)]
    graph: Value,
    nodes: Vec<Map<String, Value>>,
    adjacency: Vec<Vec<Map<String, Value>>>,
}

fn default_directed() -> bool {
    true
}

/// Loads a [`DirectedGraph`] from a JSON adjacency document.
///
/// Node objects must carry a string `id`; all other fields become node
/// attributes. Edge objects must carry a string `id` naming the target node;
/// all other fields (synthetic edge identifiers included) are dropped.
///
/// # Errors
///
/// [`EngineError::Configuration`] if the document does not parse, a node id
/// is missing or not a string, the adjacency array length does not match the
/// node list, or an adjacency entry targets an unknown node.
pub fn from_adjacency_json(json: &str) -> Result<DirectedGraph, EngineError> {
    let doc: AdjacencyDoc = serde_json::from_str(json)
        .map_err(|e| EngineError::Configuration(format!("invalid adjacency document: {}", e)))?;

    if doc.adjacency.len() != doc.nodes.len() {
        return Err(EngineError::Configuration(format!(
            "adjacency rows ({}) do not match node count ({})",
            doc.adjacency.len(),
            doc.nodes.len()
        )));
    }

    let mut g = DirectedGraph::new();
    let mut ids = Vec::with_capacity(doc.nodes.len());
    for node in &doc.nodes {
        let id = string_id(node, "node")?;
        let mut attrs = NodeAttrs::new();
        for (k, v) in node {
            if k != "id" {
                attrs.insert(k.clone(), v.clone());
            }
        }
        g.add_node_with_attrs(id.as_str(), attrs);
        ids.push(id);
    }

    for (src, row) in ids.iter().zip(&doc.adjacency) {
        for entry in row {
            let dst = string_id(entry, "adjacency entry")?;
            if !g.contains_node(&dst) {
                return Err(EngineError::Configuration(format!(
                    "adjacency entry for '{}' targets unknown node '{}'",
                    src, dst
                )));
            }
            // Everything except the target id is a synthetic edge attribute
            // and is stripped here.
            g.add_edge(src, &dst)?;
        }
    }

    Ok(g)
}

/// Writes a [`DirectedGraph`] as a JSON adjacency document.
///
/// Node attributes round-trip; edges carry only their target `id`.
pub fn to_adjacency_json(graph: &DirectedGraph) -> Result<String, EngineError> {
    let nodes: Vec<Map<String, Value>> = graph
        .nodes()
        .into_iter()
        .map(|id| {
            let mut obj = Map::new();
            obj.insert("id".into(), Value::String(id.to_string()));
            // attrs() cannot fail for an id just listed by nodes()
            if let Ok(attrs) = graph.attrs(id) {
                for (k, v) in attrs {
                    obj.insert(k.clone(), v.clone());
                }
            }
            obj
        })
        .collect();

    let adjacency: Result<Vec<Vec<Map<String, Value>>>, EngineError> = graph
        .nodes()
        .into_iter()
        .map(|id| {
            Ok(graph
                .out_edges(id)?
                .into_iter()
                .map(|(_, dst)| {
                    let mut obj = Map::new();
                    obj.insert("id".into(), Value::String(dst));
                    obj
                })
                .collect())
        })
        .collect();

    let doc = AdjacencyDoc {
        directed: true,
        multigraph: false,
        graph: Value::Object(Map::new()),
        nodes,
        adjacency: adjacency?,
    };

    serde_json::to_string_pretty(&doc)
        .map_err(|e| EngineError::Configuration(format!("failed to serialize graph: {}", e)))
}

fn string_id(obj: &Map<String, Value>, what: &str) -> Result<String, EngineError> {
    match obj.get("id") {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(EngineError::Configuration(format!(
            "{} id must be a string, got {}",
            what, other
        ))),
        None => Err(EngineError::Configuration(format!("{} is missing an id", what))),
    }
}
