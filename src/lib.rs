//! # Causalgraph — constrained structure enumeration and ancestral sampling
//!
//! Causalgraph explores the space of directed graphs satisfying structural
//! constraints, and separately draws joint samples from a discrete
//! probabilistic model defined over one such graph.
//!
//! ## Architecture
//!
//! The crate is organized into three modules:
//!
//! - **graph**: the directed-graph model (`DirectedGraph`), the maximal
//!   candidate graph builder, and JSON adjacency interchange
//! - **explore**: condition and filter factories, the lazy subgraph
//!   enumerator, and the graph-set combinator
//! - **sampling**: the Bayesian network data model, the pluggable
//!   sampling-primitive table, and the ancestral sampler
//!
//! ## Usage
//!
//! Enumerate every DAG over three variables in which `x` is exogenous:
//!
//! ```rust
//! use causalgraph::explore::conditions::{is_dag, no_input_nodes};
//! use causalgraph::explore::enumerate::conditional_subgraphs;
//! use causalgraph::explore::filters::{apply_filters, remove_self_loops};
//! use causalgraph::graph::complete_digraph;
//!
//! let universe = complete_digraph(&["x", "y", "z"])?;
//! let narrowed = apply_filters(&universe, &[remove_self_loops()]);
//! let candidates = conditional_subgraphs(
//!     &narrowed,
//!     vec![is_dag(), no_input_nodes(&["x"])],
//! )?;
//! for graph in candidates {
//!     let graph = graph?;
//!     assert!(graph.is_acyclic());
//! }
//! # Ok::<(), causalgraph::EngineError>(())
//! ```
//!
//! Draw joint samples from an authored network:
//!
//! ```rust
//! use causalgraph::sampling::model::{BayesNetModel, Distribution, NodeSpec};
//! use causalgraph::sampling::primitives::PrimitiveTable;
//! use causalgraph::sampling::sampler::sample;
//!
//! let model = BayesNetModel::from_nodes(vec![(
//!     "coin".into(),
//!     NodeSpec {
//!         state_space: vec!["heads".into(), "tails".into()],
//!         sample_function: "choice".into(),
//!         parents: vec![],
//!         distribution: Distribution::Marginal(vec![0.5, 0.5]),
//!     },
//! )])?;
//! let matrix = sample(&model, 100, &PrimitiveTable::default())?;
//! assert_eq!(matrix.outcomes("coin").unwrap().len(), 100);
//! # Ok::<(), causalgraph::EngineError>(())
//! ```

#![forbid(unsafe_code)]

pub mod errors;
pub mod explore;
pub mod graph;
pub mod sampling;

// Re-export commonly used types
pub use errors::EngineError;
pub use graph::{complete_digraph, DirectedGraph};
