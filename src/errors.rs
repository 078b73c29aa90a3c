//! Error types for graph exploration and sampling.

use thiserror::Error;

/// Errors that can occur while enumerating constrained subgraphs or
/// drawing ancestral samples.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in the future without breaking changes.
///
/// All variants are fatal at the point of detection: the current enumeration
/// or sampling call is aborted and no partial result is returned. Messages
/// carry the offending node, function name, or parent-assignment key so the
/// caller can correct the authored model or condition list.
#[non_exhaustive]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A caller-supplied configuration is unusable.
    ///
    /// Raised for an empty condition list, a zero trial count, a
    /// `sample_function` name absent from the primitive table, a conditional
    /// probability table with no row for a realized parent combination, or a
    /// malformed interchange document.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The model's dependency structure cannot be sampled.
    ///
    /// Raised when parent relationships are cyclic or self-referential,
    /// reference a node outside the model, or when a sampling pass finds no
    /// newly eligible node while unresolved nodes remain.
    #[error("structural error: {0}")]
    Structural(String),

    /// A graph query addressed a node absent from the graph.
    #[error("lookup error: {0}")]
    Lookup(String),
}
