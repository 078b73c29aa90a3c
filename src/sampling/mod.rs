//! Ancestral sampling over discrete Bayesian networks.
//!
//! This module provides:
//! - **model**: the annotated-graph data model (state spaces, parent lists,
//!   distribution tables)
//! - **primitives**: the pluggable categorical-sampling primitive table
//! - **sampler**: topological-order-respecting joint sampling

pub mod model;
pub mod primitives;
pub mod sampler;
