//! Pluggable categorical-sampling primitives.
//!
//! The sampler never draws randomness itself: each model node names a
//! primitive symbolically (`sample_function`) and the name is resolved at
//! sampling time against a caller-supplied [`PrimitiveTable`]. The
//! indirection keeps the randomness source pluggable — tests swap in a
//! deterministic primitive and get fully reproducible joints.

use std::collections::HashMap;

use rand::distributions::WeightedIndex;
use rand::prelude::*;

use crate::errors::EngineError;

/// A categorical-sampling callable.
///
/// Contract: `(state_space, size, probabilities)` returns `size` outcomes
/// drawn from `state_space` according to `probabilities`. Implementations
/// must treat the probability vector as-is — no renormalization.
pub type SamplePrimitive = Box<dyn Fn(&[String], usize, &[f64]) -> Result<Vec<String>, EngineError>>;

/// A table mapping symbolic primitive names to callables.
///
/// The default table provides one entry, `"choice"`, backed by a weighted
/// draw over the thread-local RNG.
pub struct PrimitiveTable {
    table: HashMap<String, SamplePrimitive>,
}

impl Default for PrimitiveTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert("choice", Box::new(choice));
        table
    }
}

impl PrimitiveTable {
    /// A table with no entries. Useful when every primitive is supplied by
    /// the caller.
    pub fn empty() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Registers `primitive` under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, primitive: SamplePrimitive) {
        self.table.insert(name.into(), primitive);
    }

    /// Resolves a symbolic name.
    ///
    /// # Errors
    ///
    /// [`EngineError::Configuration`] naming the missing entry.
    pub fn get(&self, name: &str) -> Result<&SamplePrimitive, EngineError> {
        self.table.get(name).ok_or_else(|| {
            EngineError::Configuration(format!(
                "sample function '{}' is not defined in the primitive table",
                name
            ))
        })
    }
}

/// The default `"choice"` primitive: `size` independent weighted draws.
///
/// # Errors
///
/// [`EngineError::Configuration`] when the probability vector's length does
/// not match the state space or the weights are unusable (e.g. all zero or
/// negative).
pub fn choice(states: &[String], size: usize, probs: &[f64]) -> Result<Vec<String>, EngineError> {
    if states.len() != probs.len() {
        return Err(EngineError::Configuration(format!(
            "probability vector length {} does not match state space length {}",
            probs.len(),
            states.len()
        )));
    }
    let dist = WeightedIndex::new(probs).map_err(|e| {
        EngineError::Configuration(format!("unusable probability vector {:?}: {}", probs, e))
    })?;
    let mut rng = thread_rng();
    Ok((0..size).map(|_| states[dist.sample(&mut rng)].clone()).collect())
}
