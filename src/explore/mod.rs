//! Constrained subgraph enumeration.
//!
//! This module provides:
//! - **conditions**: graph predicate factories (acyclicity, path
//!   completeness, degree and parentage constraints)
//! - **filters**: graph-to-graph transforms for pre-narrowing the search
//!   universe
//! - **enumerate**: the lazy edge-powerset enumerator
//! - **combinator**: buffered duplication of lazy graph sets for pipeline
//!   composition

pub mod combinator;
pub mod conditions;
pub mod enumerate;
pub mod filters;
