//! Ancestral sampling over a [`BayesNetModel`].
//!
//! Nodes are resolved in dependency order: orphans are drawn from their
//! marginals first, then every node whose parents are all resolved is drawn
//! trial-by-trial, selecting the conditional probability vector by the
//! parent-assignment key built from that trial's realized parent values. Any
//! order respecting the partial order is acceptable and statistically
//! equivalent; the implementation resolves nodes in authoring order within
//! each pass.
//!
//! All failures are fatal to the call: a validation or lookup failure
//! discards any partially built sample matrix.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::errors::EngineError;
use crate::sampling::model::{BayesNetModel, ParentAssignment};
use crate::sampling::primitives::PrimitiveTable;

/// Joint samples keyed by node identifier.
///
/// Each node maps to a sequence of `trials` realized outcome labels, one per
/// independent trial; the i-th entries across nodes form one joint sample.
/// Rows are addressed by identifier, never by a container's incidental
/// iteration order.
#[derive(Debug, Clone)]
pub struct SampleMatrix {
    trials: usize,
    values: FxHashMap<String, Vec<String>>,
}

impl SampleMatrix {
    /// Number of independent trials.
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// The realized outcomes of `node`, in trial order.
    pub fn outcomes(&self, node: &str) -> Option<&[String]> {
        self.values.get(node).map(|v| v.as_slice())
    }

    /// Iterates over `(node, outcomes)` rows in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.values.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }
}

/// Draws `k` independent joint samples from `model`.
///
/// Sampling primitives are resolved by name against `primitives`; see
/// [`PrimitiveTable`]. Probability vectors are used exactly as authored.
///
/// # Errors
///
/// - [`EngineError::Configuration`] if `k` is zero, a `sample_function` name
///   is absent from the table, or a conditional table has no row for a
///   realized parent combination.
/// - [`EngineError::Structural`] if the parent relationships are cyclic or
///   self-referential, or a resolution pass finds no newly eligible node
///   while unresolved nodes remain.
pub fn sample(
    model: &BayesNetModel,
    k: usize,
    primitives: &PrimitiveTable,
) -> Result<SampleMatrix, EngineError> {
    if k == 0 {
        return Err(EngineError::Configuration(
            "sample count k must be a positive integer".into(),
        ));
    }
    model.validate_structure()?;

    let mut values: FxHashMap<String, Vec<String>> = FxHashMap::default();

    // Orphans first: a single size-k draw from each marginal.
    for (id, spec) in model.nodes() {
        if !spec.parents.is_empty() {
            continue;
        }
        let primitive = primitives.get(&spec.sample_function)?;
        let probs = spec.distribution.lookup(&ParentAssignment::new()).ok_or_else(|| {
            EngineError::Configuration(format!(
                "orphan node '{}' needs a marginal distribution",
                id
            ))
        })?;
        let row = primitive(&spec.state_space, k, probs)?;
        if row.len() != k {
            return Err(EngineError::Configuration(format!(
                "sample function '{}' returned {} outcomes for node '{}', expected {}",
                spec.sample_function,
                row.len(),
                id,
                k
            )));
        }
        values.insert(id.clone(), row);
    }
    debug!(orphans = values.len(), trials = k, "marginal draws complete");

    let mut unresolved: Vec<&str> = model
        .nodes()
        .iter()
        .filter(|(id, _)| !values.contains_key(id))
        .map(|(id, _)| id.as_str())
        .collect();

    while !unresolved.is_empty() {
        let eligible: Vec<&str> = unresolved
            .iter()
            .copied()
            .filter(|id| {
                model
                    .spec(*id)
                    .map(|s| s.parents.iter().all(|p| values.contains_key(p)))
                    .unwrap_or(false)
            })
            .collect();

        if eligible.is_empty() {
            return Err(EngineError::Structural(format!(
                "no node became eligible for sampling; unresolved: {:?} \
                 (cycle, or a parent outside the model)",
                unresolved
            )));
        }

        for &id in &eligible {
            // spec exists: eligibility above already resolved it.
            let spec = model
                .spec(id)
                .ok_or_else(|| EngineError::Lookup(format!("node '{}' is not in the model", id)))?;
            let primitive = primitives.get(&spec.sample_function)?;

            let mut row = Vec::with_capacity(k);
            for trial in 0..k {
                let key: ParentAssignment = spec
                    .parents
                    .iter()
                    .map(|p| (p.clone(), values[p][trial].clone()))
                    .collect();
                let probs = spec.distribution.lookup(&key).ok_or_else(|| {
                    EngineError::Configuration(format!(
                        "node '{}' has no distribution entry for parent assignment {:?}",
                        id, key
                    ))
                })?;
                let drawn = primitive(&spec.state_space, 1, probs)?;
                let outcome = drawn.into_iter().next().ok_or_else(|| {
                    EngineError::Configuration(format!(
                        "sample function '{}' returned no outcome for node '{}'",
                        spec.sample_function, id
                    ))
                })?;
                row.push(outcome);
            }
            values.insert(id.to_string(), row);
        }
        unresolved.retain(|id| !values.contains_key(*id));
        debug!(
            resolved = eligible.len(),
            remaining = unresolved.len(),
            "resolution pass complete"
        );
    }

    Ok(SampleMatrix { trials: k, values })
}
